//! 遊戲核心模組
//!
//! 包含謎題引擎的純運算定義：
//! - `constants`: 遊戲常量
//! - `operation`: 四則運算與數字顯示格式
//! - `play`: 單步操作（合併兩個數字）
//! - `levels`: 難度等級表
//! - `generator`: 保證有解的謎題生成器
//! - `labels`: 高難度等級的算式標籤
//!
//! 注意：這一層沒有可變狀態，遊戲狀態在 service 層

pub mod constants;
pub mod operation;
pub mod play;
pub mod levels;
pub mod generator;
pub mod labels;

pub use constants::*;
pub use operation::{Operation, apply_operation, format_number};
pub use play::OnePlay;
pub use levels::{GameLevel, LevelColor, LevelConfig, LEVEL_DEFS, level_config, all_level_configs};
pub use generator::{PuzzleGenerator, SolvableGame, create_solvable_game};
pub use labels::ExpressionLabels;
