//! 遊戲常量定義

// ============================================================================
// 遊戲規則常量
// ============================================================================

pub const NUMBER_COUNT: usize = 5;       // 每局起始數字個數
pub const MIN_NUMBER: u32 = 1;           // 隨機數字下限
pub const MAX_NUMBER: u32 = 9;           // 隨機數字上限

// ============================================================================
// 浮點容差
// ============================================================================

pub const DISPLAY_EPSILON: f64 = 1e-5;   // 顯示時視為整數的容差
pub const SOLVED_EPSILON: f64 = 1e-5;    // 判斷過關的容差
pub const GENERATOR_EPSILON: f64 = 1e-6; // 生成器判斷整數目標的容差

// ============================================================================
// 生成器常量
// ============================================================================

pub const MAX_ITERS: usize = 1000;       // 有效候選的最大次數
pub const MAX_ATTEMPTS_FACTOR: usize = 64; // 總嘗試次數上限 = MAX_ITERS * 64
pub const LEVEL_COUNT: usize = 4;
