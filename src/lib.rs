//! 數字運算謎題引擎
//!
//! 給定 5 個數字與一個目標值，玩家每次選兩個數字做四則運算合併成一個，
//! 直到只剩一個數字。
//!
//! - `game`: 純運算層（運算、單步、難度表、謎題生成、算式標籤）
//! - `service`: 狀態層（遊戲狀態、持久化格式、批量生成）
//! - `config`: 生成器配置
//! - `error`: 錯誤類型

pub mod config;
pub mod error;
pub mod game;
pub mod service;

pub use config::GeneratorConfig;
pub use error::{EngineError, Result};
pub use game::{
    all_level_configs, apply_operation, create_solvable_game, format_number, level_config,
    ExpressionLabels, GameLevel, LevelColor, LevelConfig, OnePlay, Operation, PuzzleGenerator,
    SolvableGame,
};
pub use service::{create_new_game, generate_batch, GameState, GameStateRecord, PlayRecord};
