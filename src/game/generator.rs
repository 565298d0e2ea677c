//! 謎題生成器
//!
//! 不求解：目標值本身就是對生成數字實際套用一串運算得到的，
//! 因此每道題必定有解。

use log::{debug, warn};
use rand::Rng;

use super::constants::{MAX_ATTEMPTS_FACTOR, NUMBER_COUNT};
use super::levels::GameLevel;
use super::operation::Operation;
use crate::config::GeneratorConfig;

/// 生成結果
#[derive(Clone, Debug, PartialEq)]
pub struct SolvableGame {
    pub numbers: Vec<f64>,
    pub target: i64,
    /// 產生 target 的運算鏈：依序以 (0, 1, op) 合併即可得到 target
    pub witness: Vec<Operation>,
}

/// 單次候選
#[derive(Clone, Debug)]
struct Candidate {
    value: i64,
    ops: Vec<Operation>,
}

/// 謎題生成器
#[derive(Clone, Debug, Default)]
pub struct PuzzleGenerator {
    config: GeneratorConfig,
}

impl PuzzleGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self {
            config: config.validated(),
        }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// 生成 5 個均勻分佈的整數（預設 1..=9）
    pub fn generate_numbers<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        (0..NUMBER_COUNT)
            .map(|_| rng.gen_range(self.config.min_number..=self.config.max_number) as f64)
            .collect()
    }

    /// 尋找可構造的目標值
    ///
    /// 每次從 numbers[0] 開始，依序對其餘數字套用隨機運算。
    /// 非整數或負數的結果直接丟棄、不計入次數。
    /// 命中 [min_target, max_target] 即返回；有效候選達到 `max_iters`
    /// 仍未命中時，返回看過的最小候選（可能在範圍外，但仍可構造）。
    pub fn find_solvable_target<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        numbers: &[f64],
        min_target: i64,
        max_target: i64,
    ) -> (i64, Vec<Operation>) {
        let max_attempts = self.config.max_iters.saturating_mul(MAX_ATTEMPTS_FACTOR);
        let mut valid_count = 0usize;
        let mut min_found: Option<Candidate> = None;

        for _ in 0..max_attempts {
            let Some(candidate) = self.try_chain(rng, numbers) else {
                continue;
            };

            if min_found.as_ref().map_or(true, |m| candidate.value < m.value) {
                min_found = Some(candidate.clone());
            }
            valid_count += 1;

            if (min_target..=max_target).contains(&candidate.value) {
                return (candidate.value, candidate.ops);
            }
            if valid_count >= self.config.max_iters {
                break;
            }
        }

        match min_found {
            Some(fallback) => {
                warn!(
                    "no target in [{}, {}] for {:?} after {} candidates, falling back to {}",
                    min_target, max_target, numbers, valid_count, fallback.value
                );
                (fallback.value, fallback.ops)
            }
            None => {
                // 全部嘗試都無效時退回全加法，必為非負整數
                let sum = numbers.iter().sum::<f64>().floor() as i64;
                warn!("no valid chain for {:?}, falling back to sum {}", numbers, sum);
                (sum, vec![Operation::Add; numbers.len().saturating_sub(1)])
            }
        }
    }

    /// 生成數字並找出目標
    pub fn create_solvable_game<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_target: i64,
        max_target: i64,
    ) -> SolvableGame {
        let numbers = self.generate_numbers(rng);
        let (target, witness) = self.find_solvable_target(rng, &numbers, min_target, max_target);
        debug!("generated {:?} -> {} via {:?}", numbers, target, witness);
        SolvableGame {
            numbers,
            target,
            witness,
        }
    }

    /// 依等級的目標範圍生成
    pub fn create_for_level<R: Rng + ?Sized>(&self, rng: &mut R, level: GameLevel) -> SolvableGame {
        let (min_target, max_target) = level.target_range();
        self.create_solvable_game(rng, min_target, max_target)
    }

    /// 套用一條隨機運算鏈；結果非整數或為負時返回 None
    fn try_chain<R: Rng + ?Sized>(&self, rng: &mut R, numbers: &[f64]) -> Option<Candidate> {
        let (&head, rest) = numbers.split_first()?;
        let mut value = head;
        let mut ops = Vec::with_capacity(rest.len());
        for &n in rest {
            let op = Operation::random(rng);
            value = op.apply(value, n);
            ops.push(op);
        }

        if !is_int(value, self.config.int_epsilon) || value < 0.0 {
            return None;
        }
        Some(Candidate {
            value: value.floor() as i64,
            ops,
        })
    }
}

/// 只接受略大於整數的誤差（6.9999999 不算整數）
fn is_int(value: f64, epsilon: f64) -> bool {
    value - value.floor() < epsilon
}

/// 使用預設配置生成
pub fn create_solvable_game<R: Rng + ?Sized>(
    rng: &mut R,
    min_target: i64,
    max_target: i64,
) -> SolvableGame {
    PuzzleGenerator::default().create_solvable_game(rng, min_target, max_target)
}

// ============================================================================
// 單元測試
// ============================================================================
