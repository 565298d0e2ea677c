//! 算式標籤
//!
//! 高難度等級以「產生該數字的算式」顯示目前的數字，例如 `(5 + 3) × 7`。

use super::operation::format_number;
use super::play::OnePlay;

/// 超過此長度的運算元加上括號
const BARE_LABEL_MAX_LEN: usize = 2;

/// 與目前數字一一對應的算式標籤
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpressionLabels {
    labels: Vec<String>,
}

impl ExpressionLabels {
    /// 以初始數字的顯示字串開始
    pub fn from_numbers(numbers: &[f64]) -> Self {
        Self {
            labels: numbers.iter().map(|n| format_number(*n)).collect(),
        }
    }

    /// 依序套用多步操作
    pub fn replay<'a>(numbers: &[f64], plays: impl IntoIterator<Item = &'a OnePlay>) -> Self {
        let mut labels = Self::from_numbers(numbers);
        for play in plays {
            labels.apply(play);
        }
        labels
    }

    /// 套用一步操作：新算式寫入 first，再移除 second
    pub fn apply(&mut self, play: &OnePlay) {
        let (first, second) = (play.first(), play.second());
        if first >= self.labels.len() || second >= self.labels.len() {
            return;
        }

        let label = format!(
            "{} {} {}",
            wrap(&self.labels[first]),
            play.op().display_symbol(),
            wrap(&self.labels[second])
        );
        self.labels[first] = label;
        self.labels.remove(second);
    }

    pub fn as_slice(&self) -> &[String] {
        &self.labels
    }

    pub fn into_vec(self) -> Vec<String> {
        self.labels
    }
}

fn wrap(label: &str) -> String {
    if label.chars().count() > BARE_LABEL_MAX_LEN {
        format!("({})", label)
    } else {
        label.to_string()
    }
}

// ============================================================================
// 單元測試
// ============================================================================
