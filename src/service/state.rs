//! 遊戲狀態管理

use log::{trace, warn};
use rand::Rng;

use super::record::{GameStateRecord, PlayRecord};
use crate::error::{EngineError, Result};
use crate::game::play::same_value;
use crate::game::{
    ExpressionLabels, GameLevel, OnePlay, Operation, PuzzleGenerator, format_number,
    NUMBER_COUNT, SOLVED_EPSILON,
};

/// 一局遊戲：初始數字、目標值與完整的操作歷史
///
/// 操作歷史是只在尾端 push/pop 的堆疊；目前數字永遠由最後一步推導。
/// `Clone` 產生完全獨立的深拷貝，結果與 `from_json(&to_json()?)` 相同：
/// 所有欄位都是自有資料，且 JSON 中的浮點數可逐位元還原。
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    level: GameLevel,
    numbers: Vec<f64>,
    target: f64,
    plays: Vec<OnePlay>,
}

impl GameState {
    /// 建立新局；`numbers` 必須恰好 5 個
    pub fn new(level: GameLevel, numbers: &[f64], target: f64) -> Result<Self> {
        if numbers.len() != NUMBER_COUNT {
            return Err(EngineError::InvalidNumberCount(numbers.len()));
        }

        Ok(Self {
            level,
            numbers: numbers.to_vec(),
            target,
            plays: Vec::new(),
        })
    }

    /// 以指定生成器為該等級生成一局新遊戲
    pub fn new_game<R: Rng + ?Sized>(
        generator: &PuzzleGenerator,
        rng: &mut R,
        level: GameLevel,
    ) -> Self {
        let game = generator.create_for_level(rng, level);
        Self {
            level,
            numbers: game.numbers,
            target: game.target as f64,
            plays: Vec::new(),
        }
    }

    pub fn level(&self) -> GameLevel {
        self.level
    }

    /// 初始數字
    pub fn numbers(&self) -> &[f64] {
        &self.numbers
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn plays(&self) -> &[OnePlay] {
        &self.plays
    }

    /// 目前數字（複本）
    pub fn current_numbers(&self) -> Vec<f64> {
        self.current_slice().to_vec()
    }

    fn current_slice(&self) -> &[f64] {
        match self.plays.last() {
            Some(play) => play.numbers_post(),
            None => &self.numbers,
        }
    }

    /// 對目前數字新增一步操作
    ///
    /// 驗證失敗時狀態不變。
    pub fn add_play(&mut self, first: usize, second: usize, op: Operation) -> Result<&OnePlay> {
        let play = OnePlay::new(first, second, op, self.current_slice())?;
        Ok(self.push_play(play))
    }

    /// 以未驗證的原始輸入新增一步操作（UI / CLI 輸入）
    pub fn add_play_raw(&mut self, first: i64, second: i64, op: &str) -> Result<&OnePlay> {
        let play = OnePlay::from_raw(first, second, op, self.current_slice())?;
        Ok(self.push_play(play))
    }

    fn push_play(&mut self, play: OnePlay) -> &OnePlay {
        trace!(
            "play {} {} {} -> {:?}",
            play.first(),
            play.op().symbol(),
            play.second(),
            play.numbers_post()
        );
        self.plays.push(play);
        &self.plays[self.plays.len() - 1]
    }

    /// 撤銷最後一步；沒有操作時返回 None
    pub fn undo_last_play(&mut self) -> Option<OnePlay> {
        self.plays.pop()
    }

    /// 清除所有操作，回到初始數字
    pub fn reset(&mut self) {
        self.plays.clear();
    }

    /// 是否只剩一個數字且等於目標（容差 1e-5）
    pub fn is_solved(&self) -> bool {
        self.is_solved_within(SOLVED_EPSILON)
    }

    pub fn is_solved_within(&self, epsilon: f64) -> bool {
        match self.current_result() {
            Some(result) => (result - self.target).abs() < epsilon,
            None => false,
        }
    }

    /// 只剩一個數字時返回它
    pub fn current_result(&self) -> Option<f64> {
        match self.current_slice() {
            [only] => Some(*only),
            _ => None,
        }
    }

    /// 顯示用標籤：高難度顯示算式，其餘顯示數字
    pub fn labels(&self) -> Vec<String> {
        if self.level.shows_expressions() {
            ExpressionLabels::replay(&self.numbers, &self.plays).into_vec()
        } else {
            self.current_slice().iter().map(|n| format_number(*n)).collect()
        }
    }

    // ========================================================================
    // 持久化
    // ========================================================================

    pub fn to_record(&self) -> GameStateRecord {
        GameStateRecord {
            level: self.level.value(),
            numbers: self.numbers.clone(),
            target: self.target,
            plays: self
                .plays
                .iter()
                .map(|play| PlayRecord {
                    first: play.first() as i64,
                    second: play.second() as i64,
                    op: play.op().symbol().to_string(),
                    numbers_pre: play.numbers_pre().to_vec(),
                    numbers_post: play.numbers_post().to_vec(),
                })
                .collect(),
        }
    }

    /// 從持久化形式還原
    ///
    /// 每一步都重新經過驗證並重算，與儲存的 numbersPre / numbersPost
    /// 逐一比對；不一致即視為資料損毀。
    pub fn from_record(record: &GameStateRecord) -> Result<Self> {
        let level = GameLevel::from_value(record.level)?;
        let mut state = Self::new(level, &record.numbers, record.target)?;

        for (index, stored) in record.plays.iter().enumerate() {
            if !same_numbers(state.current_slice(), &stored.numbers_pre) {
                warn!("play {} does not continue from the previous numbers", index);
                return Err(EngineError::CorruptedState { play: index });
            }

            let play = OnePlay::from_raw(stored.first, stored.second, &stored.op, &stored.numbers_pre)?;
            if !play.post_matches(&stored.numbers_post) {
                warn!(
                    "play {} replays to {:?}, stored {:?}",
                    index,
                    play.numbers_post(),
                    stored.numbers_post
                );
                return Err(EngineError::CorruptedState { play: index });
            }
            state.plays.push(play);
        }

        Ok(state)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let record: GameStateRecord = serde_json::from_str(text)?;
        Self::from_record(&record)
    }
}

fn same_numbers(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_value(*x, *y))
}

/// 使用預設生成器為該等級生成一局新遊戲
pub fn create_new_game<R: Rng + ?Sized>(rng: &mut R, level: GameLevel) -> GameState {
    GameState::new_game(&PuzzleGenerator::default(), rng, level)
}

// ============================================================================
// 單元測試
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> GameState {
        GameState::new(GameLevel::Easy, &[5.0, 3.0, 7.0, 2.0, 9.0], 42.0).unwrap()
    }

    #[test]
    fn test_new_requires_five_numbers() {
        assert!(matches!(
            GameState::new(GameLevel::Easy, &[1.0, 2.0, 3.0], 10.0),
            Err(EngineError::InvalidNumberCount(3))
        ));
        assert!(matches!(
            GameState::new(GameLevel::Easy, &[1.0; 6], 10.0),
            Err(EngineError::InvalidNumberCount(6))
        ));
    }

    #[test]
    fn test_numbers_are_copied() {
        let mut numbers = vec![5.0, 3.0, 7.0, 2.0, 9.0];
        let state = GameState::new(GameLevel::Easy, &numbers, 42.0).unwrap();
        numbers[0] = 999.0;
        assert_eq!(state.numbers(), &[5.0, 3.0, 7.0, 2.0, 9.0]);

        let mut current = state.current_numbers();
        current[0] = 999.0;
        assert_eq!(state.current_numbers()[0], 5.0);
    }

    #[test]
    fn test_chained_plays() {
        let mut state = sample();
        state.add_play(0, 1, Operation::Add).unwrap();
        assert_eq!(state.current_numbers(), vec![8.0, 7.0, 2.0, 9.0]);
        state.add_play(0, 1, Operation::Multiply).unwrap();
        assert_eq!(state.current_numbers(), vec![56.0, 2.0, 9.0]);
        state.add_play(1, 2, Operation::Add).unwrap();
        assert_eq!(state.current_numbers(), vec![56.0, 11.0]);
        let play = state.add_play(0, 1, Operation::Subtract).unwrap();
        assert_eq!(play.numbers_post(), &[45.0]);
        assert_eq!(state.current_result(), Some(45.0));
        assert_eq!(state.plays().len(), 4);
    }

    #[test]
    fn test_invalid_play_leaves_state_untouched() {
        let mut state = sample();
        state.add_play(0, 1, Operation::Add).unwrap();
        let before = state.clone();

        assert!(matches!(
            state.add_play(0, 0, Operation::Add),
            Err(EngineError::InvalidIndices { .. })
        ));
        // 只剩 4 個數字，index 4 越界
        assert!(state.add_play(0, 4, Operation::Add).is_err());
        assert!(matches!(
            state.add_play_raw(0, 1, "%"),
            Err(EngineError::InvalidOperation(_))
        ));
        assert_eq!(state, before);
    }

    #[test]
    fn test_undo() {
        let mut state = sample();
        assert!(state.undo_last_play().is_none());
        state.add_play(0, 1, Operation::Add).unwrap();
        state.add_play(0, 1, Operation::Multiply).unwrap();

        let undone = state.undo_last_play().unwrap();
        assert_eq!(undone.op(), Operation::Multiply);
        assert_eq!(state.current_numbers(), vec![8.0, 7.0, 2.0, 9.0]);
    }

    #[test]
    fn test_reset_is_idempotent() {
        let mut state = sample();
        state.add_play(0, 1, Operation::Add).unwrap();
        state.reset();
        let once = state.clone();
        state.reset();
        assert_eq!(state, once);
        assert!(state.plays().is_empty());
        assert_eq!(state.current_numbers(), state.numbers().to_vec());
    }

    #[test]
    fn test_solved() {
        let mut state = GameState::new(GameLevel::Easy, &[8.0, 3.0, 4.0, 1.0, 2.0], 24.0).unwrap();
        state.add_play(0, 1, Operation::Multiply).unwrap();
        assert_eq!(state.current_numbers(), vec![24.0, 4.0, 1.0, 2.0]);
        assert!(!state.is_solved());
        assert_eq!(state.current_result(), None);

        // 4 - 2 = 2, 2 - 1 = 1, 24 * 1 = 24
        state.add_play(1, 3, Operation::Subtract).unwrap();
        state.add_play(1, 2, Operation::Subtract).unwrap();
        state.add_play(0, 1, Operation::Multiply).unwrap();
        assert_eq!(state.current_numbers(), vec![24.0]);
        assert!(state.is_solved());
    }

    #[test]
    fn test_solved_with_tolerance() {
        let mut state = GameState::new(GameLevel::Hard, &[1.0, 3.0, 3.0, 1.0, 1.0], 1.0).unwrap();
        state.add_play(0, 1, Operation::Divide).unwrap();
        state.add_play(0, 1, Operation::Multiply).unwrap();
        state.add_play(0, 1, Operation::Multiply).unwrap();
        state.add_play(0, 1, Operation::Multiply).unwrap();
        assert!(state.is_solved());
        assert!(!state.is_solved_within(0.0));
    }

    #[test]
    fn test_single_wrong_number_not_solved() {
        let mut state = sample();
        for _ in 0..4 {
            state.add_play(0, 1, Operation::Add).unwrap();
        }
        assert_eq!(state.current_result(), Some(26.0));
        assert!(!state.is_solved());
    }

    #[test]
    fn test_labels_by_level() {
        let mut easy = sample();
        easy.add_play(0, 1, Operation::Divide).unwrap();
        assert_eq!(easy.labels(), vec!["1.67", "7", "2", "9"]);

        let mut hard = GameState::new(GameLevel::Hard, &[5.0, 3.0, 7.0, 2.0, 9.0], 42.0).unwrap();
        hard.add_play(0, 1, Operation::Divide).unwrap();
        assert_eq!(hard.labels(), vec!["5 ÷ 3", "7", "2", "9"]);
    }

    #[test]
    fn test_json_round_trip() {
        let mut state = sample();
        state.add_play(2, 0, Operation::Multiply).unwrap();
        state.add_play(0, 1, Operation::Divide).unwrap();

        let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.current_numbers(), state.current_numbers());
    }

    #[test]
    fn test_round_trip_fractional_values() {
        let mut state = GameState::new(GameLevel::Medium, &[7.0, 2.0, 6.0, 2.0, 5.0], 30.0).unwrap();
        state.add_play(2, 1, Operation::Add).unwrap();
        state.add_play(3, 1, Operation::Add).unwrap();
        state.add_play(1, 2, Operation::Divide).unwrap();
        state.add_play(1, 0, Operation::Add).unwrap();
        assert_eq!(state.plays()[2].numbers_post(), &[7.0, 2.0 / 13.0]);

        let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
        assert_eq!(restored, state);
        assert_eq!(restored.current_result(), Some(7.0 + 2.0 / 13.0));
    }

    #[test]
    fn test_round_trip_with_division_by_zero() {
        let mut state = GameState::new(GameLevel::Easy, &[5.0, 0.0, 1.0, 1.0, 1.0], 5.0).unwrap();
        state.add_play(0, 1, Operation::Divide).unwrap();
        let text = state.to_json().unwrap();
        assert!(text.contains("null"));

        let restored = GameState::from_json(&text).unwrap();
        assert_eq!(restored.plays().len(), 1);
        assert!(!restored.current_numbers()[0].is_finite());
    }

    #[test]
    fn test_tampered_post_is_corrupted() {
        let mut state = sample();
        state.add_play(0, 1, Operation::Add).unwrap();
        let mut record = state.to_record();
        record.plays[0].numbers_post[0] = 9.0;
        assert!(matches!(
            GameState::from_record(&record),
            Err(EngineError::CorruptedState { play: 0 })
        ));
    }

    #[test]
    fn test_broken_chain_is_corrupted() {
        let mut state = sample();
        state.add_play(0, 1, Operation::Add).unwrap();
        state.add_play(0, 1, Operation::Add).unwrap();
        let mut record = state.to_record();
        // 第二步的前置數字改成與第一步結果不一致，但自身仍可重算
        record.plays[1].numbers_pre = vec![1.0, 7.0, 2.0, 9.0];
        record.plays[1].numbers_post = vec![8.0, 2.0, 9.0];
        assert!(matches!(
            GameState::from_record(&record),
            Err(EngineError::CorruptedState { play: 1 })
        ));
    }

    #[test]
    fn test_invalid_record_fields() {
        let mut record = sample().to_record();
        record.level = 7;
        assert!(matches!(
            GameState::from_record(&record),
            Err(EngineError::InvalidLevel(ref v)) if v == "7"
        ));

        let text = r#"{"level":1,"numbers":[1,2,3,4,5],"target":10,
            "plays":[{"first":-1,"second":1,"op":"+","numbersPre":[1,2,3,4,5],"numbersPost":[3,3,4,5]}]}"#;
        assert!(matches!(
            GameState::from_json(text),
            Err(EngineError::InvalidIndices { first: -1, .. })
        ));
        assert!(matches!(GameState::from_json("{"), Err(EngineError::Json(_))));
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = sample();
        original.add_play(0, 1, Operation::Add).unwrap();
        let mut copy = original.clone();

        assert_eq!(copy, GameState::from_json(&original.to_json().unwrap()).unwrap());

        copy.add_play(0, 1, Operation::Add).unwrap();
        original.undo_last_play();

        assert_eq!(original.plays().len(), 0);
        assert_eq!(copy.plays().len(), 2);
        assert_eq!(copy.current_numbers(), vec![15.0, 2.0, 9.0]);
    }

    fn move_strategy() -> impl Strategy<Value = Vec<(usize, usize, usize)>> {
        prop::collection::vec((0usize..5, 0usize..5, 0usize..4), 0..=4)
    }

    /// 把任意索引折算成對目前長度合法的一步
    fn apply_moves(state: &mut GameState, moves: &[(usize, usize, usize)]) {
        for &(a, b, op) in moves {
            let len = state.current_numbers().len();
            if len < 2 {
                break;
            }
            let first = a % len;
            let second = (first + 1 + b % (len - 1)) % len;
            state.add_play(first, second, Operation::all()[op]).unwrap();
        }
    }

    proptest! {
        #[test]
        fn prop_round_trip_preserves_state(
            numbers in prop::collection::vec(1u32..=9, 5),
            target in 0i64..200,
            moves in move_strategy(),
        ) {
            let numbers: Vec<f64> = numbers.into_iter().map(f64::from).collect();
            let mut state = GameState::new(GameLevel::Medium, &numbers, target as f64).unwrap();
            apply_moves(&mut state, &moves);

            let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
            prop_assert_eq!(restored.level(), state.level());
            prop_assert_eq!(restored.numbers(), state.numbers());
            prop_assert_eq!(restored.target(), state.target());
            prop_assert_eq!(restored.plays().len(), state.plays().len());
            prop_assert!(same_numbers(&restored.current_numbers(), &state.current_numbers()));
        }

        #[test]
        fn prop_round_trip_is_exact_for_fractions(
            numbers in prop::collection::vec(0.01f64..100.0, 5),
            moves in move_strategy(),
        ) {
            let mut state = GameState::new(GameLevel::Hard, &numbers, 50.0).unwrap();
            apply_moves(&mut state, &moves);

            let restored = GameState::from_json(&state.to_json().unwrap()).unwrap();
            prop_assert_eq!(restored.plays().len(), state.plays().len());
            for (a, b) in restored.plays().iter().zip(state.plays()) {
                prop_assert!(same_numbers(a.numbers_post(), b.numbers_post()));
            }
        }

        #[test]
        fn prop_undo_all_restores_initial(
            numbers in prop::collection::vec(1u32..=9, 5),
            moves in move_strategy(),
        ) {
            let numbers: Vec<f64> = numbers.into_iter().map(f64::from).collect();
            let mut state = GameState::new(GameLevel::Easy, &numbers, 10.0).unwrap();
            apply_moves(&mut state, &moves);
            let count = state.plays().len();
            for _ in 0..count {
                prop_assert!(state.undo_last_play().is_some());
            }
            prop_assert_eq!(state.current_numbers(), numbers);
            prop_assert!(state.undo_last_play().is_none());
        }
    }
}
