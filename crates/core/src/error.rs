#[derive(Debug, thiserror::Error)]
pub enum ReconcileError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to read config file: {0}")]
    ConfigRead(std::io::Error),
    #[error("failed to deserialize YAML config: {0}")]
    YamlDeserialization(serde_yaml::Error),
    #[error("failed to deserialize diagnosis record: {0}")]
    RecordDeserialization(serde_json::Error),
    #[error("diagnosis record must be a JSON object")]
    RecordNotObject,
}

pub type ReconcileResult<T> = std::result::Result<T, ReconcileError>;
