use crate::aggregate::ValidationFilter;

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub display_namespace: bool,
    pub names: Vec<String>,
    pub validation_filters: Vec<ValidationFilter>,
}
