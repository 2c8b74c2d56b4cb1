use std::fmt::Display;
use std::str::FromStr;

use kube::core::{ApiResource, GroupVersionKind};
use serde::{Deserialize, Serialize};

use crate::error::Error;

const NETWORKING_GROUP: &str = "networking.istio.io";
const NETWORKING_VERSION: &str = "v1alpha3";
const MIXER_GROUP: &str = "config.istio.io";
const MIXER_VERSION: &str = "v1alpha2";

/// The Istio configuration object categories held by a snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigKind {
    Gateway,
    VirtualService,
    DestinationRule,
    ServiceEntry,
    Rule,
    Adapter,
    Template,
    QuotaSpec,
    QuotaSpecBinding,
    Policy,
}

impl ConfigKind {
    /// Every kind, in the order summaries are projected.
    pub const ALL: [ConfigKind; 10] = [
        ConfigKind::Gateway,
        ConfigKind::VirtualService,
        ConfigKind::DestinationRule,
        ConfigKind::ServiceEntry,
        ConfigKind::Rule,
        ConfigKind::Adapter,
        ConfigKind::Template,
        ConfigKind::QuotaSpec,
        ConfigKind::QuotaSpecBinding,
        ConfigKind::Policy,
    ];

    /// Lowercase tag used for summaries and as the validations key.
    pub fn type_tag(self) -> &'static str {
        match self {
            ConfigKind::Gateway => "gateway",
            ConfigKind::VirtualService => "virtualservice",
            ConfigKind::DestinationRule => "destinationrule",
            ConfigKind::ServiceEntry => "serviceentry",
            ConfigKind::Rule => "rule",
            ConfigKind::Adapter => "adapter",
            ConfigKind::Template => "template",
            ConfigKind::QuotaSpec => "quotaspec",
            ConfigKind::QuotaSpecBinding => "quotaspecbinding",
            ConfigKind::Policy => "policy",
        }
    }

    /// Kind for a lowercase type tag only, unlike [`FromStr`].
    pub fn from_type_tag(tag: &str) -> Option<ConfigKind> {
        ConfigKind::ALL.iter().copied().find(|k| k.type_tag() == tag)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ConfigKind::Gateway => "Gateway",
            ConfigKind::VirtualService => "VirtualService",
            ConfigKind::DestinationRule => "DestinationRule",
            ConfigKind::ServiceEntry => "ServiceEntry",
            ConfigKind::Rule => "Rule",
            ConfigKind::Adapter => "Adapter",
            ConfigKind::Template => "Template",
            ConfigKind::QuotaSpec => "QuotaSpec",
            ConfigKind::QuotaSpecBinding => "QuotaSpecBinding",
            ConfigKind::Policy => "Policy",
        }
    }

    /// Collection name, also the key of the snapshot's permissions map.
    pub fn plural(self) -> &'static str {
        match self {
            ConfigKind::Gateway => "gateways",
            ConfigKind::VirtualService => "virtualservices",
            ConfigKind::DestinationRule => "destinationrules",
            ConfigKind::ServiceEntry => "serviceentries",
            ConfigKind::Rule => "rules",
            ConfigKind::Adapter => "adapters",
            ConfigKind::Template => "templates",
            ConfigKind::QuotaSpec => "quotaspecs",
            ConfigKind::QuotaSpecBinding => "quotaspecbindings",
            ConfigKind::Policy => "policies",
        }
    }

    /// Kinds whose summaries carry a validation result.
    pub fn is_validated(self) -> bool {
        matches!(
            self,
            ConfigKind::Gateway
                | ConfigKind::VirtualService
                | ConfigKind::DestinationRule
                | ConfigKind::ServiceEntry
        )
    }

    pub fn gvk(self) -> GroupVersionKind {
        let (group, version) = match self {
            ConfigKind::Gateway
            | ConfigKind::VirtualService
            | ConfigKind::DestinationRule
            | ConfigKind::ServiceEntry => (NETWORKING_GROUP, NETWORKING_VERSION),
            _ => (MIXER_GROUP, MIXER_VERSION),
        };
        GroupVersionKind::gvk(group, version, self.display_name())
    }

    pub fn api_resource(self) -> ApiResource {
        ApiResource::from_gvk_with_plural(&self.gvk(), self.plural())
    }
}

impl Display for ConfigKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_tag())
    }
}

impl FromStr for ConfigKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKind::ALL
            .iter()
            .copied()
            .find(|k| k.type_tag() == s || k.display_name() == s || k.plural() == s)
            .ok_or_else(|| Error::UnknownKind(s.to_string()))
    }
}

/// Collection name for a kind's display name, e.g. `Gateway` -> `gateways`.
pub fn collection_for(kind_name: &str) -> Option<&'static str> {
    ConfigKind::ALL
        .iter()
        .find(|k| k.display_name() == kind_name)
        .map(|k| k.plural())
}

/// Kind display name for a collection name, e.g. `gateways` -> `Gateway`.
///
/// Also resolves the mixer `instance` and `handler` collections, which have
/// no snapshot field of their own.
pub fn kind_name_for(collection: &str) -> Option<&'static str> {
    match collection {
        "instance" => Some("Instance"),
        "handler" => Some("Handler"),
        other => ConfigKind::ALL
            .iter()
            .find(|k| k.plural() == other)
            .map(|k| k.display_name()),
    }
}
