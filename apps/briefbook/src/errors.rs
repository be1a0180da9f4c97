use thiserror::Error;

/// Process-surface error type: what can fail while reading presentation
/// records or writing assembled books. Pagination itself never fails — a
/// malformed description degrades to best-effort block extraction and an
/// oversized block becomes an overflowing page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
