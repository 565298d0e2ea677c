//! 持久化格式
//!
//! 與外部儲存層交換的 JSON 結構：
//!
//! ```text
//! { "level": 1, "numbers": [..5], "target": 24,
//!   "plays": [{ "first": 0, "second": 1, "op": "+",
//!               "numbersPre": [..], "numbersPost": [..] }] }
//! ```
//!
//! JSON 無法表示非有限值，序列化時寫成 null，讀回時當作 NaN。

use serde::{Deserialize, Deserializer, Serialize};

/// 單步操作的持久化形式
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayRecord {
    pub first: i64,
    pub second: i64,
    pub op: String,
    #[serde(deserialize_with = "nullable_numbers")]
    pub numbers_pre: Vec<f64>,
    #[serde(deserialize_with = "nullable_numbers")]
    pub numbers_post: Vec<f64>,
}

/// 遊戲狀態的持久化形式
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStateRecord {
    pub level: i64,
    #[serde(deserialize_with = "nullable_numbers")]
    pub numbers: Vec<f64>,
    #[serde(deserialize_with = "nullable_number")]
    pub target: f64,
    #[serde(default)]
    pub plays: Vec<PlayRecord>,
}

fn nullable_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

fn nullable_numbers<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<f64>, D::Error> {
    let values = Vec::<Option<f64>>::deserialize(deserializer)?;
    Ok(values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect())
}
