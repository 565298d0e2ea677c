//! 單步操作（OnePlay）
//!
//! 一步操作把目前數字列中的兩個位置以一種運算合併成一個數字。
//! 建構時驗證並立即算出結果，之後不可再修改。

use super::operation::Operation;
use crate::error::{EngineError, Result};

/// 單步操作
#[derive(Clone, Debug, PartialEq)]
pub struct OnePlay {
    first: usize,
    second: usize,
    op: Operation,
    numbers_pre: Vec<f64>,
    numbers_post: Vec<f64>,
}

impl OnePlay {
    /// 建立一步操作
    ///
    /// `first`、`second` 必須不同且都在 `numbers_pre` 範圍內。
    /// `numbers_pre` 會被複製一份快照。
    pub fn new(first: usize, second: usize, op: Operation, numbers_pre: &[f64]) -> Result<Self> {
        check_indices(first as i64, second as i64, numbers_pre.len())?;

        let numbers_pre = numbers_pre.to_vec();
        let numbers_post = merge_numbers(&numbers_pre, first, second, op);

        Ok(Self {
            first,
            second,
            op,
            numbers_pre,
            numbers_post,
        })
    }

    /// 從未驗證的原始欄位建立（持久化資料、外部輸入）
    ///
    /// 先驗證運算符號，再驗證索引。
    pub fn from_raw(first: i64, second: i64, op: &str, numbers_pre: &[f64]) -> Result<Self> {
        let op = Operation::from_symbol(op)?;
        check_indices(first, second, numbers_pre.len())?;
        Self::new(first as usize, second as usize, op, numbers_pre)
    }

    pub fn first(&self) -> usize {
        self.first
    }

    pub fn second(&self) -> usize {
        self.second
    }

    pub fn op(&self) -> Operation {
        self.op
    }

    pub fn numbers_pre(&self) -> &[f64] {
        &self.numbers_pre
    }

    pub fn numbers_post(&self) -> &[f64] {
        &self.numbers_post
    }

    /// 合併後的結果值（位於 numbers_post 中 first 對應的位置）
    pub fn result(&self) -> f64 {
        self.op
            .apply(self.numbers_pre[self.first], self.numbers_pre[self.second])
    }

    /// 與另一組數字逐一比較
    ///
    /// 持久化後非有限值會變成 null，因此兩個非有限值視為相同。
    pub fn post_matches(&self, stored: &[f64]) -> bool {
        self.numbers_post.len() == stored.len()
            && self
                .numbers_post
                .iter()
                .zip(stored)
                .all(|(a, b)| same_value(*a, *b))
    }
}

/// 兩個數字是否視為同一個持久化值
pub(crate) fn same_value(a: f64, b: f64) -> bool {
    a == b || (!a.is_finite() && !b.is_finite())
}

fn check_indices(first: i64, second: i64, len: usize) -> Result<()> {
    let invalid = EngineError::InvalidIndices { first, second, len };
    if first < 0 || second < 0 || first == second {
        return Err(invalid);
    }
    if first as usize >= len || second as usize >= len {
        return Err(invalid);
    }
    Ok(())
}

/// 合併兩個位置
///
/// 先把結果寫入 `first`，再從已寫入結果的陣列移除 `second`（後面元素左移）。
/// 當 `second < first` 時，結果最後落在 `first - 1`。
fn merge_numbers(numbers_pre: &[f64], first: usize, second: usize, op: Operation) -> Vec<f64> {
    let result = op.apply(numbers_pre[first], numbers_pre[second]);

    let mut numbers_post = numbers_pre.to_vec();
    numbers_post[first] = result;
    numbers_post.remove(second);
    numbers_post
}

// ============================================================================
// 單元測試
// ============================================================================
