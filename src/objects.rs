use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::kind::ConfigKind;

/// A Kubernetes-style object: standard metadata plus a kind specific spec.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "S: Deserialize<'de> + Default"))]
pub struct Resource<S> {
    #[serde(default)]
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub spec: S,
}

impl<S> Resource<S> {
    pub fn new(name: &str, spec: S) -> Self {
        Self {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                ..ObjectMeta::default()
            },
            spec,
        }
    }

    /// Object name, empty when the metadata carries none.
    pub fn name(&self) -> &str {
        self.metadata.name.as_deref().unwrap_or_default()
    }
}

pub type Gateway = Resource<GatewaySpec>;
pub type VirtualService = Resource<VirtualServiceSpec>;
pub type DestinationRule = Resource<DestinationRuleSpec>;
pub type ServiceEntry = Resource<ServiceEntrySpec>;
pub type IstioRule = Resource<RuleSpec>;
pub type IstioAdapter = Resource<Value>;
pub type IstioTemplate = Resource<Value>;
pub type QuotaSpec = Resource<Value>;
pub type QuotaSpecBinding = Resource<Value>;
pub type Policy = Resource<Value>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Port {
    pub number: u32,
    pub protocol: String,
    pub name: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Server {
    pub port: Option<Port>,
    pub hosts: Vec<String>,
    pub tls: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GatewaySpec {
    pub servers: Vec<Server>,
    pub selector: BTreeMap<String, String>,
}

/// Route blocks are kept as raw JSON, only hosts and gateways are typed.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VirtualServiceSpec {
    pub hosts: Vec<String>,
    pub gateways: Vec<String>,
    pub http: Vec<Value>,
    pub tcp: Vec<Value>,
    pub tls: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Subset {
    pub name: String,
    pub labels: BTreeMap<String, String>,
    pub traffic_policy: Option<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DestinationRuleSpec {
    pub host: Option<String>,
    pub traffic_policy: Option<Value>,
    pub subsets: Vec<Subset>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServiceEntrySpec {
    pub hosts: Vec<String>,
    pub addresses: Vec<String>,
    pub ports: Vec<Port>,
    pub location: Option<String>,
    pub resolution: Option<String>,
    pub endpoints: Vec<Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleAction {
    pub handler: String,
    pub instances: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RuleSpec {
    pub r#match: Option<String>,
    pub actions: Vec<RuleAction>,
}

/// Objects of kinds served with a permissions envelope.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Permissioned<T> {
    pub permissions: ResourcePermissions,
    pub items: Vec<T>,
}

impl<T> Permissioned<T> {
    pub fn new(permissions: ResourcePermissions, items: Vec<T>) -> Self {
        Self { permissions, items }
    }
}

pub type VirtualServices = Permissioned<VirtualService>;
pub type DestinationRules = Permissioned<DestinationRule>;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcePermissions {
    pub create: bool,
    pub update: bool,
    pub delete: bool,
}

/// Check severity; strings other than `error` and `warning` are kept verbatim.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Severity {
    Error,
    Warning,
    Other(String),
}

impl From<String> for Severity {
    fn from(value: String) -> Self {
        match value.as_str() {
            "error" => Severity::Error,
            "warning" => Severity::Warning,
            _ => Severity::Other(value),
        }
    }
}

impl From<Severity> for String {
    fn from(value: Severity) -> Self {
        match value {
            Severity::Error => "error".to_string(),
            Severity::Warning => "warning".to_string(),
            Severity::Other(other) => other,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectCheck {
    #[serde(default)]
    pub message: String,
    pub severity: Severity,
    #[serde(default)]
    pub path: String,
}

/// Result of validating one object, computed by the control plane.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectValidation {
    pub name: String,
    pub object_type: String,
    pub valid: bool,
    pub checks: Vec<ObjectCheck>,
}

impl ObjectValidation {
    pub fn has_warnings(&self) -> bool {
        self.checks.iter().any(|c| c.severity == Severity::Warning)
    }
}

/// Validation results keyed by kind, then by object name.
///
/// Only lowercase type tags (`gateway`, `virtualservice`, ...) are read when
/// deserializing; any other key is dropped.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Validations(BTreeMap<ConfigKind, BTreeMap<String, ObjectValidation>>);

impl Validations {
    pub fn get(&self, kind: ConfigKind, name: &str) -> Option<&ObjectValidation> {
        self.0.get(&kind).and_then(|by_name| by_name.get(name))
    }

    /// Registers `validation` under its own name.
    pub fn insert(&mut self, kind: ConfigKind, validation: ObjectValidation) {
        self.0
            .entry(kind)
            .or_default()
            .insert(validation.name.clone(), validation);
    }
}

impl<'de> Deserialize<'de> for Validations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut by_kind = BTreeMap::new();
        for (key, objects) in raw {
            match ConfigKind::from_type_tag(&key) {
                Some(kind) => {
                    let objects: BTreeMap<String, ObjectValidation> =
                        serde_json::from_value(objects).map_err(D::Error::custom)?;
                    by_kind.insert(kind, objects);
                }
                None => tracing::warn!(kind = %key, "skipping validations of unknown kind"),
            }
        }
        Ok(Validations(by_kind))
    }
}

/// One object of any kind, as carried by summaries and detail views.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ConfigObject {
    Gateway(Gateway),
    VirtualService(VirtualService),
    DestinationRule(DestinationRule),
    ServiceEntry(ServiceEntry),
    Rule(IstioRule),
    Adapter(IstioAdapter),
    Template(IstioTemplate),
    QuotaSpec(QuotaSpec),
    QuotaSpecBinding(QuotaSpecBinding),
    Policy(Policy),
}

impl ConfigObject {
    pub fn kind(&self) -> ConfigKind {
        match self {
            ConfigObject::Gateway(_) => ConfigKind::Gateway,
            ConfigObject::VirtualService(_) => ConfigKind::VirtualService,
            ConfigObject::DestinationRule(_) => ConfigKind::DestinationRule,
            ConfigObject::ServiceEntry(_) => ConfigKind::ServiceEntry,
            ConfigObject::Rule(_) => ConfigKind::Rule,
            ConfigObject::Adapter(_) => ConfigKind::Adapter,
            ConfigObject::Template(_) => ConfigKind::Template,
            ConfigObject::QuotaSpec(_) => ConfigKind::QuotaSpec,
            ConfigObject::QuotaSpecBinding(_) => ConfigKind::QuotaSpecBinding,
            ConfigObject::Policy(_) => ConfigKind::Policy,
        }
    }

    pub fn metadata(&self) -> &ObjectMeta {
        match self {
            ConfigObject::Gateway(o) => &o.metadata,
            ConfigObject::VirtualService(o) => &o.metadata,
            ConfigObject::DestinationRule(o) => &o.metadata,
            ConfigObject::ServiceEntry(o) => &o.metadata,
            ConfigObject::Rule(o) => &o.metadata,
            ConfigObject::Adapter(o)
            | ConfigObject::Template(o)
            | ConfigObject::QuotaSpec(o)
            | ConfigObject::QuotaSpecBinding(o)
            | ConfigObject::Policy(o) => &o.metadata,
        }
    }

    pub fn name(&self) -> &str {
        self.metadata().name.as_deref().unwrap_or_default()
    }
}
