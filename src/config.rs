//! 謎題生成器配置
//!
//! 可從 JSON 檔讀取，缺少的欄位使用預設值。

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::game::constants::{GENERATOR_EPSILON, MAX_ITERS, MAX_NUMBER, MIN_NUMBER};

/// 生成器參數
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    /// 有效候選目標的最大嘗試次數
    pub max_iters: usize,
    /// 隨機數字下限（含）
    pub min_number: u32,
    /// 隨機數字上限（含）
    pub max_number: u32,
    /// 判斷結果是否為整數的容差
    pub int_epsilon: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_iters: MAX_ITERS,
            min_number: MIN_NUMBER,
            max_number: MAX_NUMBER,
            int_epsilon: GENERATOR_EPSILON,
        }
    }
}

impl GeneratorConfig {
    /// 從 JSON 字串解析
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str::<Self>(text)?.validated())
    }

    /// 從 JSON 檔讀取
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// 修正不合理的值：迭代次數至少 1，數字下限至少 1 且不大於上限
    pub fn validated(mut self) -> Self {
        self.max_iters = self.max_iters.max(1);
        self.min_number = self.min_number.max(1);
        if self.min_number > self.max_number {
            std::mem::swap(&mut self.min_number, &mut self.max_number);
        }
        if !(self.int_epsilon.is_finite() && self.int_epsilon > 0.0) {
            self.int_epsilon = GENERATOR_EPSILON;
        }
        self
    }
}
