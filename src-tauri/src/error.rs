#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Webview error: {0}")]
    Tauri(#[from] tauri::Error),
}

pub type ShellResult<T> = Result<T, ShellError>;
