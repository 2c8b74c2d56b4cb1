pub type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("unable to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("unknown config kind `{0}`")]
    UnknownKind(String),

    #[error("unknown validation filter `{0}`, expected one of: Valid, Not Valid, Not Validated, Warning")]
    UnknownFilter(String),

    #[error("no {kind} named `{name}` in namespace `{namespace}`")]
    NotFound {
        namespace: String,
        kind: String,
        name: String,
    },
}
