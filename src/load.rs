use std::io::Read;
use std::path::Path;

use crate::error::Result;
use crate::types::ConfigSnapshot;

/// Reads a snapshot document from `path`, or from stdin when `path` is `-`.
///
/// `.yaml` and `.yml` files are parsed as YAML, anything else as JSON.
pub fn load_snapshot(path: &str) -> Result<ConfigSnapshot> {
    let content = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        std::fs::read_to_string(path)?
    };
    let yaml = matches!(
        Path::new(path).extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );
    let snapshot = parse_snapshot(&content, yaml)?;
    tracing::debug!(
        path,
        namespace = %snapshot.namespace.name,
        objects = snapshot.object_count(),
        "loaded snapshot"
    );
    Ok(snapshot)
}

pub fn parse_snapshot(content: &str, yaml: bool) -> Result<ConfigSnapshot> {
    if yaml {
        Ok(serde_yaml::from_str(content)?)
    } else {
        Ok(serde_json::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::ConfigKind;

    #[test]
    fn test_parse_json() {
        let snapshot = parse_snapshot(
            r#"{"namespace":{"name":"bookinfo"},"gateways":[{"metadata":{"name":"gw"}}]}"#,
            false,
        )
        .unwrap();
        assert_eq!(snapshot.gateways[0].name(), "gw");
    }

    #[test]
    fn test_parse_yaml() {
        let snapshot = parse_snapshot(
            r#"
namespace:
  name: bookinfo
destinationRules:
  permissions:
    create: true
  items:
    - metadata:
        name: ratings-dr
      spec:
        host: ratings
validations:
  destinationrule:
    ratings-dr:
      name: ratings-dr
      objectType: destinationrule
      valid: true
      checks: []
"#,
            true,
        )
        .unwrap();
        assert_eq!(snapshot.destination_rules.items[0].spec.host.as_deref(), Some("ratings"));
        assert!(snapshot.destination_rules.permissions.create);
        assert!(snapshot
            .validations
            .get(ConfigKind::DestinationRule, "ratings-dr")
            .is_some());
    }

    #[test]
    fn test_demo_snapshot() {
        let snapshot = parse_snapshot(include_str!("../demos/bookinfo.yaml"), true).unwrap();
        assert_eq!(snapshot.namespace.name, "bookinfo");
        assert_eq!(snapshot.object_count(), 6);
        assert!(snapshot.rules[0].spec.r#match.is_some());
        assert!(!snapshot
            .validations
            .get(ConfigKind::VirtualService, "reviews-vs")
            .unwrap()
            .valid);
    }

    #[test]
    fn test_parse_error() {
        assert!(parse_snapshot("{", false).is_err());
        assert!(load_snapshot("/nonexistent/snapshot.json").is_err());
    }
}
