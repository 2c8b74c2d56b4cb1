use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Result;

const NULL_TAG: &str = "!!null";
const CANONICAL: &str = "canonical";

/// Options handed to the YAML editor widget.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorOptions {
    pub show_print_margin: bool,
    pub auto_scroll_editor_into_view: bool,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            show_print_margin: false,
            auto_scroll_editor_into_view: true,
        }
    }
}

/// Scalar styles used when dumping objects as YAML, keyed by tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpOptions {
    pub styles: BTreeMap<String, String>,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            styles: BTreeMap::from([(NULL_TAG.to_string(), CANONICAL.to_string())]),
        }
    }
}

impl DumpOptions {
    /// Serializes `value` as YAML, writing nulls as `~` under the canonical style.
    pub fn dump<T: Serialize>(&self, value: &T) -> Result<String> {
        let yaml = serde_yaml::to_string(value)?;
        if self.styles.get(NULL_TAG).map(String::as_str) == Some(CANONICAL) {
            Ok(canonical_nulls(&yaml))
        } else {
            Ok(yaml)
        }
    }
}

// serde_yaml quotes string scalars spelled `null`, so outside of block
// scalars a bare trailing `null` is always the null scalar.
fn canonical_nulls(yaml: &str) -> String {
    let mut out = String::with_capacity(yaml.len());
    let mut block_indent: Option<usize> = None;
    for line in yaml.lines() {
        if let Some(header_indent) = block_indent {
            if line.trim().is_empty() || indent(line) > header_indent {
                out.push_str(line);
                out.push('\n');
                continue;
            }
            block_indent = None;
        }
        if line == "null" || line.ends_with(": null") || line.trim_start() == "- null" {
            out.push_str(&line[..line.len() - "null".len()]);
            out.push('~');
        } else {
            out.push_str(line);
        }
        out.push('\n');
        if opens_block(line) {
            block_indent = Some(indent(line));
        }
    }
    out
}

fn indent(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}

/// True for a line ending in a literal or folded block header (`|`, `>-`, `|2+`).
fn opens_block(line: &str) -> bool {
    let trimmed = line.trim_end();
    let (prefix, header) = trimmed.rsplit_once(' ').unwrap_or(("", trimmed));
    let mut chars = header.chars();
    matches!(chars.next(), Some('|') | Some('>'))
        && chars.all(|c| c.is_ascii_digit() || c == '-' || c == '+')
        && (prefix.trim().is_empty() || prefix.ends_with(':') || prefix.trim_start() == "-")
}
