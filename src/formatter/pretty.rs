use crate::config;
use crate::types;

use comfy_table::{presets::NOTHING, Attribute, Cell, CellAlignment, Color, Table};
use std::fmt::Display;

pub struct Pretty {
    config: config::Config,
    summaries: Vec<types::ConfigSummary>,
}

impl Pretty {
    pub fn new(config: config::Config, summaries: Vec<types::ConfigSummary>) -> Self {
        Self { config, summaries }
    }
}

fn validation_cell(summary: &types::ConfigSummary) -> Cell {
    match &summary.validation {
        Some(v) if !v.valid => Cell::new("✖")
            .fg(Color::Red)
            .set_alignment(CellAlignment::Center),
        Some(v) if v.has_warnings() => Cell::new("⚠")
            .fg(Color::Yellow)
            .set_alignment(CellAlignment::Center),
        Some(_) => Cell::new("✔")
            .fg(Color::AnsiValue(34))
            .set_alignment(CellAlignment::Center),
        None => Cell::new(""),
    }
}

impl Display for Pretty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut table = Table::new();
        table.load_preset(NOTHING);

        let column_count = if self.config.display_namespace { 4 } else { 3 };

        let mut titles = Vec::with_capacity(column_count);
        if self.config.display_namespace {
            titles.push(Cell::new("Namespace").add_attribute(Attribute::Bold));
        }
        titles.extend(
            ["Type", "Name", "Config"]
                .iter()
                .map(|t| Cell::new(t).add_attribute(Attribute::Bold))
                .collect::<Vec<Cell>>(),
        );
        table.set_header(titles);

        self.summaries.iter().for_each(|summary| {
            let mut row: Vec<Cell> = Vec::with_capacity(column_count);
            if self.config.display_namespace {
                row.push(Cell::new(&summary.namespace));
            }
            row.push(Cell::new(summary.kind.display_name()));
            row.push(Cell::new(&summary.name));
            row.push(validation_cell(summary));
            table.add_row(row);
        });

        table.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::objects::{
        ConfigObject, ObjectCheck, ObjectValidation, Severity, VirtualService,
    };

    fn summary(name: &str, validation: Option<ObjectValidation>) -> types::ConfigSummary {
        types::ConfigSummary::new(
            "bookinfo",
            ConfigObject::VirtualService(VirtualService::new(name, Default::default())),
            validation,
        )
    }

    #[test]
    fn test_table_rows() {
        let warning = ObjectValidation {
            valid: true,
            checks: vec![ObjectCheck {
                message: "host not found".to_string(),
                severity: Severity::Warning,
                path: String::new(),
            }],
            ..ObjectValidation::default()
        };
        let summaries = vec![
            summary("reviews", Some(warning)),
            summary("ratings", None),
        ];
        let output = Pretty::new(config::Config::default(), summaries).to_string();
        assert!(output.contains("Type"));
        assert!(!output.contains("Namespace"));
        assert!(output.contains("VirtualService"));
        assert!(output.contains("reviews"));
        assert!(output.contains("⚠"));
        assert!(output.contains("ratings"));
    }

    #[test]
    fn test_namespace_column() {
        let config = config::Config {
            display_namespace: true,
            ..config::Config::default()
        };
        let output = Pretty::new(config, vec![summary("reviews", None)]).to_string();
        assert!(output.contains("Namespace"));
        assert!(output.contains("bookinfo"));
    }
}
