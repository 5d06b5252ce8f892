#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config ({context}): {detail}")]
    Config { context: &'static str, detail: String },

    #[error("scan: {0}")]
    Scan(#[from] querybind::ScanError),

    #[error("decode: {0}")]
    Decode(#[from] querybind::DecodeError),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
}
