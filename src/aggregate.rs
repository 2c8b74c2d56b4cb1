//! Derived views over a namespace's config snapshot: name filtering,
//! flattening into summaries and filtering summaries by validation state.

use std::fmt::Display;
use std::str::FromStr;

use crate::error::Error;
use crate::kind::ConfigKind;
use crate::types::{ConfigSnapshot, ConfigSummary};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValidationFilter {
    Valid,
    NotValid,
    NotValidated,
    Warning,
}

impl ValidationFilter {
    pub const ALL: [ValidationFilter; 4] = [
        ValidationFilter::Valid,
        ValidationFilter::NotValid,
        ValidationFilter::NotValidated,
        ValidationFilter::Warning,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValidationFilter::Valid => "Valid",
            ValidationFilter::NotValid => "Not Valid",
            ValidationFilter::NotValidated => "Not Validated",
            ValidationFilter::Warning => "Warning",
        }
    }

    fn matches(self, summary: &ConfigSummary) -> bool {
        match (self, &summary.validation) {
            (ValidationFilter::Valid, Some(v)) => v.valid,
            (ValidationFilter::NotValid, Some(v)) => !v.valid,
            (ValidationFilter::NotValidated, None) => true,
            (ValidationFilter::Warning, Some(v)) => v.has_warnings(),
            _ => false,
        }
    }
}

impl Display for ValidationFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ValidationFilter::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::UnknownFilter(s.to_string()))
    }
}

fn include_name<S: AsRef<str>>(name: &str, names: &[S]) -> bool {
    names.iter().any(|n| name.contains(n.as_ref()))
}

/// Keeps the objects whose name contains at least one of `names`.
///
/// An empty `names` returns the snapshot as is. Namespace, permissions and
/// validations are passed through untouched, even for dropped objects.
pub fn filter_by_names<S: AsRef<str>>(mut snapshot: ConfigSnapshot, names: &[S]) -> ConfigSnapshot {
    if names.is_empty() {
        return snapshot;
    }
    let before = snapshot.object_count();

    snapshot.gateways.retain(|o| include_name(o.name(), names));
    snapshot
        .virtual_services
        .items
        .retain(|o| include_name(o.name(), names));
    snapshot
        .destination_rules
        .items
        .retain(|o| include_name(o.name(), names));
    snapshot.service_entries.retain(|o| include_name(o.name(), names));
    snapshot.rules.retain(|o| include_name(o.name(), names));
    snapshot.adapters.retain(|o| include_name(o.name(), names));
    snapshot.templates.retain(|o| include_name(o.name(), names));
    snapshot.quota_specs.retain(|o| include_name(o.name(), names));
    snapshot
        .quota_spec_bindings
        .retain(|o| include_name(o.name(), names));
    snapshot.policies.retain(|o| include_name(o.name(), names));

    tracing::debug!(
        namespace = %snapshot.namespace.name,
        before,
        after = snapshot.object_count(),
        "filtered snapshot by name"
    );
    snapshot
}

/// Flattens a snapshot into one summary per object.
///
/// Kinds are visited in [`ConfigKind::ALL`] order. Only networking kinds
/// look up their validation; mixer kinds never carry one here.
pub fn project_to_summaries(snapshot: &ConfigSnapshot) -> Vec<ConfigSummary> {
    let namespace = &snapshot.namespace.name;
    let summaries: Vec<ConfigSummary> = ConfigKind::ALL
        .iter()
        .flat_map(|&kind| {
            snapshot.objects(kind).into_iter().map(move |object| {
                let validation = if kind.is_validated() {
                    snapshot.validations.get(kind, object.name()).cloned()
                } else {
                    None
                };
                ConfigSummary::new(namespace, object, validation)
            })
        })
        .collect();

    tracing::debug!(namespace = %namespace, count = summaries.len(), "projected summaries");
    summaries
}

/// Keeps the summaries matching any requested validation state.
///
/// No filter, or all four, returns `summaries` as is. A summary is appended
/// once for every requested state it matches, so a valid summary with a
/// warning check shows up twice under `Valid` + `Warning`. The dashboard
/// list relies on that order, do not deduplicate.
pub fn filter_by_validation_state(
    summaries: Vec<ConfigSummary>,
    filters: &[ValidationFilter],
) -> Vec<ConfigSummary> {
    let requested: Vec<ValidationFilter> = ValidationFilter::ALL
        .iter()
        .copied()
        .filter(|f| filters.contains(f))
        .collect();
    if requested.is_empty() || requested.len() == ValidationFilter::ALL.len() {
        return summaries;
    }

    let mut filtered = Vec::new();
    for summary in summaries.iter() {
        for filter in requested.iter() {
            if filter.matches(summary) {
                filtered.push(summary.clone());
            }
        }
    }
    tracing::debug!(
        filters = ?requested,
        before = summaries.len(),
        after = filtered.len(),
        "filtered summaries by validation state"
    );
    filtered
}
