//! 四則運算與數字顯示格式

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use super::constants::DISPLAY_EPSILON;
use crate::error::EngineError;

/// 運算類型
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    /// 所有運算（用於隨機選擇）
    pub fn all() -> &'static [Operation] {
        &[
            Operation::Add,
            Operation::Subtract,
            Operation::Multiply,
            Operation::Divide,
        ]
    }

    /// 均勻隨機選一種運算
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::all()[rng.gen_range(0..Self::all().len())]
    }

    /// 持久化用的 ASCII 符號
    pub fn symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "*",
            Operation::Divide => "/",
        }
    }

    /// 顯示用符號（乘除使用 Unicode ×、÷）
    pub fn display_symbol(&self) -> &'static str {
        match self {
            Operation::Add => "+",
            Operation::Subtract => "-",
            Operation::Multiply => "\u{00D7}",
            Operation::Divide => "\u{00F7}",
        }
    }

    /// 解析持久化符號
    pub fn from_symbol(symbol: &str) -> Result<Self, EngineError> {
        match symbol {
            "+" => Ok(Operation::Add),
            "-" => Ok(Operation::Subtract),
            "*" => Ok(Operation::Multiply),
            "/" => Ok(Operation::Divide),
            other => Err(EngineError::InvalidOperation(other.to_string())),
        }
    }

    /// 計算 `a op b`；除以零得到非有限值，不視為錯誤
    pub fn apply(&self, a: f64, b: f64) -> f64 {
        match self {
            Operation::Add => a + b,
            Operation::Subtract => a - b,
            Operation::Multiply => a * b,
            Operation::Divide => a / b,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_symbol())
    }
}

impl FromStr for Operation {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_symbol(s)
    }
}

/// 對兩個運算元套用運算
pub fn apply_operation(a: f64, b: f64, op: Operation) -> f64 {
    op.apply(a, b)
}

/// 格式化顯示數字
///
/// 與最近整數相差小於 1e-5 時顯示為整數，否則固定兩位小數。
/// 除法常產生 6.9999999 這類結果，不能原樣顯示。
pub fn format_number(n: f64) -> String {
    let rounded = n.round();
    if (rounded - n).abs() < DISPLAY_EPSILON {
        // +0.0 避免輸出 "-0"
        format!("{:.0}", rounded + 0.0)
    } else {
        format!("{:.2}", n)
    }
}

// ============================================================================
// 單元測試
// ============================================================================
