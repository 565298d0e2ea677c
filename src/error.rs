//! 引擎錯誤類型

/// 引擎對外回報的錯誤
///
/// 全部都是同步、立即回報的失敗；引擎內部不重試也不吞掉錯誤。
#[derive(thiserror::Error, Debug)]
pub enum EngineError {
    #[error("op cannot be '{0}'")]
    InvalidOperation(String),
    #[error("first ({first}) and second ({second}) must be non-negative, different and below {len}")]
    InvalidIndices { first: i64, second: i64, len: usize },
    #[error("only 5 numbers are supported, got {0}")]
    InvalidNumberCount(usize),
    #[error("play {play} does not replay to its stored numbers")]
    CorruptedState { play: usize },
    #[error("invalid level value {0}")]
    InvalidLevel(String),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
