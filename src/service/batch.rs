//! 批量生成

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;

use super::state::GameState;
use crate::game::{GameLevel, PuzzleGenerator};

/// 平行生成 `count` 局遊戲
///
/// 第 i 局使用種子 `seed + i`，結果與執行緒數無關。
pub fn generate_batch(
    generator: &PuzzleGenerator,
    level: GameLevel,
    count: usize,
    seed: u64,
) -> Vec<GameState> {
    let games: Vec<GameState> = (0..count)
        .into_par_iter()
        .map(|i| {
            let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
            GameState::new_game(generator, &mut rng, level)
        })
        .collect();

    let (min_target, max_target) = level.target_range();
    let in_range = games
        .iter()
        .filter(|g| (min_target as f64..=max_target as f64).contains(&g.target()))
        .count();
    info!(
        "generated {} {:?} games, {} with target in [{}, {}]",
        games.len(),
        level,
        in_range,
        min_target,
        max_target
    );
    games
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_is_deterministic() {
        let generator = PuzzleGenerator::default();
        let a = generate_batch(&generator, GameLevel::Medium, 16, 42);
        let b = generate_batch(&generator, GameLevel::Medium, 16, 42);
        assert_eq!(a.len(), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_matches_sequential_seeds() {
        let generator = PuzzleGenerator::default();
        let batch = generate_batch(&generator, GameLevel::Easy, 4, 100);
        for (i, game) in batch.iter().enumerate() {
            let mut rng = StdRng::seed_from_u64(100 + i as u64);
            let expected = GameState::new_game(&generator, &mut rng, GameLevel::Easy);
            assert_eq!(game, &expected);
        }
    }

    #[test]
    fn test_empty_batch() {
        assert!(generate_batch(&PuzzleGenerator::default(), GameLevel::Hard, 0, 1).is_empty());
    }
}
