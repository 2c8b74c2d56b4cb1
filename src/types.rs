use std::collections::BTreeMap;
use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::kind::ConfigKind;
use crate::objects::{
    ConfigObject, DestinationRules, Gateway, IstioAdapter, IstioRule, IstioTemplate,
    ObjectValidation, Policy, QuotaSpec, QuotaSpecBinding, ResourcePermissions, ServiceEntry,
    Validations, VirtualServices,
};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Namespace {
    pub name: String,
    pub labels: Option<BTreeMap<String, String>>,
}

/// Every Istio config object of one namespace, as served by the control plane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigSnapshot {
    pub namespace: Namespace,
    pub gateways: Vec<Gateway>,
    pub virtual_services: VirtualServices,
    pub destination_rules: DestinationRules,
    pub service_entries: Vec<ServiceEntry>,
    pub rules: Vec<IstioRule>,
    pub adapters: Vec<IstioAdapter>,
    pub templates: Vec<IstioTemplate>,
    pub quota_specs: Vec<QuotaSpec>,
    pub quota_spec_bindings: Vec<QuotaSpecBinding>,
    pub policies: Vec<Policy>,
    /// Keyed by collection name, see [`ConfigKind::plural`].
    pub permissions: BTreeMap<String, ResourcePermissions>,
    pub validations: Validations,
}

impl ConfigSnapshot {
    /// Objects of `kind`, in snapshot order.
    pub fn objects(&self, kind: ConfigKind) -> Vec<ConfigObject> {
        match kind {
            ConfigKind::Gateway => self.gateways.iter().cloned().map(ConfigObject::Gateway).collect(),
            ConfigKind::VirtualService => self
                .virtual_services
                .items
                .iter()
                .cloned()
                .map(ConfigObject::VirtualService)
                .collect(),
            ConfigKind::DestinationRule => self
                .destination_rules
                .items
                .iter()
                .cloned()
                .map(ConfigObject::DestinationRule)
                .collect(),
            ConfigKind::ServiceEntry => self
                .service_entries
                .iter()
                .cloned()
                .map(ConfigObject::ServiceEntry)
                .collect(),
            ConfigKind::Rule => self.rules.iter().cloned().map(ConfigObject::Rule).collect(),
            ConfigKind::Adapter => self.adapters.iter().cloned().map(ConfigObject::Adapter).collect(),
            ConfigKind::Template => self
                .templates
                .iter()
                .cloned()
                .map(ConfigObject::Template)
                .collect(),
            ConfigKind::QuotaSpec => self
                .quota_specs
                .iter()
                .cloned()
                .map(ConfigObject::QuotaSpec)
                .collect(),
            ConfigKind::QuotaSpecBinding => self
                .quota_spec_bindings
                .iter()
                .cloned()
                .map(ConfigObject::QuotaSpecBinding)
                .collect(),
            ConfigKind::Policy => self.policies.iter().cloned().map(ConfigObject::Policy).collect(),
        }
    }

    pub fn object_count(&self) -> usize {
        self.gateways.len()
            + self.virtual_services.items.len()
            + self.destination_rules.items.len()
            + self.service_entries.len()
            + self.rules.len()
            + self.adapters.len()
            + self.templates.len()
            + self.quota_specs.len()
            + self.quota_spec_bindings.len()
            + self.policies.len()
    }

    /// Permissions for a kind's collection.
    ///
    /// The namespace wide map wins; virtual services and destination rules
    /// fall back to the envelope they were served with.
    pub fn permissions_for(&self, kind: ConfigKind) -> ResourcePermissions {
        if let Some(permissions) = self.permissions.get(kind.plural()) {
            return *permissions;
        }
        match kind {
            ConfigKind::VirtualService => self.virtual_services.permissions,
            ConfigKind::DestinationRule => self.destination_rules.permissions,
            _ => ResourcePermissions::default(),
        }
    }

    /// Detail view of one object, `None` when no object of that kind has `name`.
    pub fn details(&self, kind: ConfigKind, name: &str) -> Option<ConfigDetails> {
        let object = self.objects(kind).into_iter().find(|o| o.name() == name)?;
        Some(ConfigDetails {
            namespace: self.namespace.clone(),
            object,
            permissions: self.permissions_for(kind),
            validation: self.validations.get(kind, name).cloned(),
        })
    }
}

/// One flattened row of a snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigSummary {
    pub namespace: String,
    pub kind: ConfigKind,
    pub name: String,
    pub object: ConfigObject,
    pub validation: Option<ObjectValidation>,
}

impl ConfigSummary {
    pub fn new(namespace: &str, object: ConfigObject, validation: Option<ObjectValidation>) -> Self {
        Self {
            namespace: namespace.to_string(),
            kind: object.kind(),
            name: object.name().to_string(),
            object,
            validation,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDetails {
    pub namespace: Namespace,
    pub object: ConfigObject,
    pub permissions: ResourcePermissions,
    pub validation: Option<ObjectValidation>,
}

/// Identifies the detail page of one object.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigId {
    pub namespace: String,
    pub object_type: String,
    pub object_subtype: String,
    pub object: String,
}

impl Display for ConfigId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "namespaces/{}/istio/{}", self.namespace, self.object_type)?;
        if !self.object_subtype.is_empty() {
            write!(f, "/{}", self.object_subtype)?;
        }
        write!(f, "/{}", self.object)
    }
}

/// `type` and `name` parameters of a list page search string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParsedSearch {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub name: Option<String>,
}

impl ParsedSearch {
    /// Reads `?type=...&name=...`. The first occurrence of a key wins and
    /// values are taken verbatim.
    pub fn parse(search: &str) -> Self {
        let mut parsed = ParsedSearch::default();
        for pair in search.trim_start_matches('?').split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "type" if parsed.kind.is_none() => parsed.kind = Some(value.to_string()),
                "name" if parsed.name.is_none() => parsed.name = Some(value.to_string()),
                _ => {}
            }
        }
        parsed
    }

    pub fn config_kind(&self) -> Option<ConfigKind> {
        self.kind.as_deref().and_then(|k| k.parse().ok())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IstioService {
    pub name: String,
    pub namespace: Option<String>,
    pub domain: Option<String>,
    pub service: Option<String>,
    pub labels: Option<BTreeMap<String, String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{Permissioned, VirtualService, VirtualServiceSpec};
    use serde_json::json;

    fn snapshot() -> ConfigSnapshot {
        serde_json::from_value(json!({
            "namespace": { "name": "bookinfo" },
            "gateways": [{ "metadata": { "name": "bookinfo-gateway" }, "spec": {} }],
            "virtualServices": {
                "permissions": { "create": true, "update": true, "delete": false },
                "items": [{ "metadata": { "name": "reviews-vs" }, "spec": { "hosts": ["reviews"] } }]
            },
            "destinationRules": {
                "permissions": { "create": false, "update": false, "delete": false },
                "items": [{ "metadata": { "name": "ratings-dr" }, "spec": { "host": "ratings" } }]
            },
            "policies": [{ "metadata": { "name": "default" }, "spec": { "peers": [{ "mtls": {} }] } }],
            "permissions": { "gateways": { "create": true, "update": true, "delete": true } },
            "validations": {
                "virtualservice": {
                    "reviews-vs": { "name": "reviews-vs", "objectType": "virtualservice", "valid": true, "checks": [] }
                }
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_snapshot_defaults_missing_collections() {
        let s = snapshot();
        assert_eq!(s.namespace.name, "bookinfo");
        assert!(s.rules.is_empty());
        assert!(s.quota_spec_bindings.is_empty());
        assert_eq!(s.object_count(), 4);
    }

    #[test]
    fn test_objects_by_kind() {
        let s = snapshot();
        let vs = s.objects(ConfigKind::VirtualService);
        assert_eq!(vs.len(), 1);
        assert_eq!(vs[0].name(), "reviews-vs");
        assert!(s.objects(ConfigKind::Template).is_empty());
    }

    #[test]
    fn test_permissions_for() {
        let s = snapshot();
        assert!(s.permissions_for(ConfigKind::Gateway).delete);
        assert_eq!(
            s.permissions_for(ConfigKind::VirtualService),
            ResourcePermissions {
                create: true,
                update: true,
                delete: false
            }
        );
        assert_eq!(
            s.permissions_for(ConfigKind::Rule),
            ResourcePermissions::default()
        );
    }

    #[test]
    fn test_details() {
        let s = snapshot();
        let details = s.details(ConfigKind::VirtualService, "reviews-vs").unwrap();
        assert_eq!(details.namespace.name, "bookinfo");
        assert_eq!(details.object.kind(), ConfigKind::VirtualService);
        assert!(details.permissions.create);
        assert!(details.validation.unwrap().valid);

        let details = s.details(ConfigKind::Policy, "default").unwrap();
        assert!(details.validation.is_none());

        assert!(s.details(ConfigKind::Gateway, "reviews-vs").is_none());
    }

    #[test]
    fn test_summary_takes_kind_and_name_from_object() {
        let vs: VirtualService = VirtualService::new("reviews", VirtualServiceSpec::default());
        let summary = ConfigSummary::new("bookinfo", ConfigObject::VirtualService(vs), None);
        assert_eq!(summary.kind, ConfigKind::VirtualService);
        assert_eq!(summary.name, "reviews");
        assert_eq!(summary.namespace, "bookinfo");
    }

    #[test]
    fn test_snapshot_serializes_camel_case() {
        let s = ConfigSnapshot {
            virtual_services: Permissioned::new(ResourcePermissions::default(), vec![]),
            ..ConfigSnapshot::default()
        };
        let json = serde_json::to_value(&s).unwrap();
        assert!(json.get("virtualServices").is_some());
        assert!(json.get("quotaSpecBindings").is_some());
    }

    #[test]
    fn test_config_id_display() {
        let mut id = ConfigId {
            namespace: "bookinfo".to_string(),
            object_type: "virtualservices".to_string(),
            object_subtype: String::new(),
            object: "reviews".to_string(),
        };
        assert_eq!(id.to_string(), "namespaces/bookinfo/istio/virtualservices/reviews");

        id.object_type = "rules".to_string();
        id.object_subtype = "handler".to_string();
        id.object = "denier".to_string();
        assert_eq!(id.to_string(), "namespaces/bookinfo/istio/rules/handler/denier");
    }

    #[test]
    fn test_parsed_search() {
        let parsed = ParsedSearch::parse("?type=gateways&name=bookinfo&type=rules");
        assert_eq!(parsed.kind.as_deref(), Some("gateways"));
        assert_eq!(parsed.name.as_deref(), Some("bookinfo"));
        assert_eq!(parsed.config_kind(), Some(ConfigKind::Gateway));

        let empty = ParsedSearch::parse("");
        assert_eq!(empty, ParsedSearch::default());
        assert_eq!(empty.config_kind(), None);
    }

    #[test]
    fn test_istio_service() {
        let svc: IstioService = serde_json::from_value(json!({
            "name": "reviews",
            "namespace": "bookinfo",
            "labels": { "app": "reviews" }
        }))
        .unwrap();
        assert_eq!(svc.name, "reviews");
        assert_eq!(svc.domain, None);
        assert_eq!(svc.labels.unwrap()["app"], "reviews");
    }
}
