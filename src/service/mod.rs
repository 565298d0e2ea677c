//! 服務層模組
//!
//! 提供宿主（UI / 儲存層）使用的遊戲狀態、持久化格式與批量生成

pub mod batch;
pub mod record;
pub mod state;

pub use batch::generate_batch;
pub use record::{GameStateRecord, PlayRecord};
pub use state::{create_new_game, GameState};
