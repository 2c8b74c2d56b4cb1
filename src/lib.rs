//! Istio configuration model of a namespace and the derived views a
//! dashboard lists: name filtering, flat summaries and validation filtering.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod formatter;
pub mod kind;
pub mod load;
pub mod objects;
pub mod options;
pub mod types;

pub use aggregate::{
    filter_by_names, filter_by_validation_state, project_to_summaries, ValidationFilter,
};
pub use error::{Error, Result};
pub use kind::ConfigKind;
pub use types::{ConfigSnapshot, ConfigSummary};
