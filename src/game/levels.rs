//! 難度等級
//!
//! 定義 4 種難度，每種只決定目標值的生成範圍與顯示資訊。
//!
//! # 架構
//!
//! 使用聲明式 `LEVEL_DEFS` 表定義所有等級的元數據。

use serde::{Serialize, Serializer};

use super::constants::LEVEL_COUNT;
use crate::error::{EngineError, Result};

// ============================================================================
// 等級定義系統
// ============================================================================

/// 顯示顏色標籤
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LevelColor {
    Green,
    Yellow,
    Red,
}

/// 等級定義結構
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct LevelConfig {
    pub level: GameLevel,
    pub min_target: i64,
    pub max_target: i64,
    pub name: &'static str,
    pub name_long: &'static str,
    pub color: LevelColor,
}

/// 等級定義表（順序與 GameLevel 枚舉一致）
pub static LEVEL_DEFS: [LevelConfig; LEVEL_COUNT] = [
    // 1: Easy
    LevelConfig { level: GameLevel::Easy, min_target: 11, max_target: 40, name: "Easy", name_long: "Easy exercises", color: LevelColor::Green },
    // 2: Medium
    LevelConfig { level: GameLevel::Medium, min_target: 19, max_target: 60, name: "Medium", name_long: "Medium level", color: LevelColor::Yellow },
    // 3: Hard
    LevelConfig { level: GameLevel::Hard, min_target: 60, max_target: 120, name: "Hard", name_long: "Hard exercises", color: LevelColor::Red },
    // 4: VeryHard
    LevelConfig { level: GameLevel::VeryHard, min_target: 100, max_target: 150, name: "Very hard", name_long: "Very hard exercises", color: LevelColor::Red },
];

/// 難度等級（持久化值 1..=4）
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GameLevel {
    Easy = 1,
    Medium = 2,
    Hard = 3,
    VeryHard = 4,
}

impl GameLevel {
    /// 所有等級
    pub fn all() -> &'static [GameLevel] {
        &[
            GameLevel::Easy,
            GameLevel::Medium,
            GameLevel::Hard,
            GameLevel::VeryHard,
        ]
    }

    /// 持久化整數值
    pub fn value(&self) -> i64 {
        *self as i64
    }

    /// 從持久化整數值還原
    pub fn from_value(value: i64) -> Result<Self> {
        match value {
            1 => Ok(GameLevel::Easy),
            2 => Ok(GameLevel::Medium),
            3 => Ok(GameLevel::Hard),
            4 => Ok(GameLevel::VeryHard),
            other => Err(EngineError::InvalidLevel(other.to_string())),
        }
    }

    /// 從名稱或數字解析（CLI 使用）
    pub fn parse(text: &str) -> Result<Self> {
        match text.to_ascii_lowercase().replace(['-', '_'], "").as_str() {
            "easy" => Ok(GameLevel::Easy),
            "medium" => Ok(GameLevel::Medium),
            "hard" => Ok(GameLevel::Hard),
            "veryhard" => Ok(GameLevel::VeryHard),
            _ => text
                .trim()
                .parse::<i64>()
                .map_err(|_| EngineError::InvalidLevel(text.to_string()))
                .and_then(Self::from_value),
        }
    }

    pub fn to_index(&self) -> usize {
        self.value() as usize - 1
    }

    pub fn config(&self) -> &'static LevelConfig {
        &LEVEL_DEFS[self.to_index()]
    }

    /// 目標範圍 [min, max]（含）
    pub fn target_range(&self) -> (i64, i64) {
        let config = self.config();
        (config.min_target, config.max_target)
    }

    /// 是否以算式顯示目前數字（Hard 以上）
    pub fn shows_expressions(&self) -> bool {
        matches!(self, GameLevel::Hard | GameLevel::VeryHard)
    }
}

/// 序列化為持久化整數值，與遊戲記錄的 `level` 欄位一致
impl Serialize for GameLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_i64(self.value())
    }
}

/// 查詢等級配置
pub fn level_config(level: GameLevel) -> &'static LevelConfig {
    level.config()
}

/// 所有等級配置（由易到難）
pub fn all_level_configs() -> &'static [LevelConfig] {
    &LEVEL_DEFS
}

// ============================================================================
// 單元測試
// ============================================================================
