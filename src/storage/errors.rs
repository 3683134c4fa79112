use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Stored value under [{key}] could not be parsed: {source}")]
    Parse {
        key: String,
        source: serde_json::Error
    },
    #[error("Value for [{key}] could not be serialized: {source}")]
    Serialize {
        key: String,
        source: serde_json::Error
    },
    #[error("Storage quota exceeded writing [{key}]: {required} bytes needed, {quota} allowed")]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize
    },
    #[error("Transaction export failed: {0}")]
    Export(#[from] csv::Error),
    #[error("Transaction export failed: {0}")]
    Io(#[from] std::io::Error)
}

impl StorageError {
    pub fn parse(key: &str, source: serde_json::Error) -> Self {
        Self::Parse { key: key.to_string(), source }
    }

    pub fn serialize(key: &str, source: serde_json::Error) -> Self {
        Self::Serialize { key: key.to_string(), source }
    }
}
