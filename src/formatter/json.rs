use std::fmt::Display;

use serde::Serialize;

use crate::types;

pub struct Json {
    result: JsonSummaryList,
}

#[derive(Serialize)]
struct JsonSummary {
    namespace: String,
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    validation: &'static str,
    warnings: bool,
}

#[derive(Serialize)]
struct JsonSummaryList {
    items: Vec<JsonSummary>,
}

impl From<types::ConfigSummary> for JsonSummary {
    fn from(value: types::ConfigSummary) -> Self {
        let (validation, warnings) = match &value.validation {
            Some(v) if v.valid => ("valid", v.has_warnings()),
            Some(v) => ("not valid", v.has_warnings()),
            None => ("not validated", false),
        };
        Self {
            namespace: value.namespace,
            kind: value.kind.type_tag(),
            name: value.name,
            validation,
            warnings,
        }
    }
}

impl Json {
    pub fn new(summaries: Vec<types::ConfigSummary>) -> Self {
        Self {
            result: JsonSummaryList {
                items: summaries.into_iter().map(|s| s.into()).collect(),
            },
        }
    }
}

impl Display for Json {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match serde_json::to_string(&self.result) {
            Ok(output) => f.write_str(&output),
            Err(_e) => Err(std::fmt::Error),
        }
    }
}
