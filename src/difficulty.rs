//! Level progression and difficulty tuning
//!
//! Levels are grouped into stages of ten. Each stage grows the grid by one
//! side and the sequence by two tiles; playback speeds up within a stage in
//! three tiers and across stages, never dropping below [`MIN_SPEED_MS`].

/// Levels per stage
pub const LEVELS_PER_STAGE: u32 = 10;
/// Grid side length at stage 1
pub const BASE_GRID_SIZE: u32 = 2;
/// Sequence length at stage 1
pub const BASE_SEQUENCE_LENGTH: usize = 4;
/// Extra sequence tiles per stage
pub const SEQUENCE_GROWTH_PER_STAGE: usize = 2;
/// Highlight duration at stage 1, first tier (ms)
pub const BASE_SPEED_MS: u32 = 450;
/// Speed-up per stage (ms)
pub const STAGE_SPEEDUP_MS: u32 = 80;
/// Fastest allowed highlight duration (ms)
pub const MIN_SPEED_MS: u32 = 100;

/// Everything derived from a level number
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Difficulty {
    /// 1-based stage (block of ten levels)
    pub stage: u32,
    /// 1..=10 position inside the stage
    pub level_in_stage: u32,
    /// Grid side length
    pub grid_size: u32,
    /// Tiles to memorize
    pub sequence_length: usize,
    /// Highlight duration per tile (ms); the gap after it is half this
    pub speed_ms: u32,
}

impl Difficulty {
    /// Difficulty for a 1-based level. Level 0 is treated as level 1.
    pub fn for_level(level: u32) -> Self {
        let steps = level.saturating_sub(1);
        let stage_index = steps / LEVELS_PER_STAGE;
        let stage = stage_index + 1;
        let level_in_stage = steps % LEVELS_PER_STAGE + 1;

        Self {
            stage,
            level_in_stage,
            grid_size: BASE_GRID_SIZE + stage_index,
            sequence_length: BASE_SEQUENCE_LENGTH
                + SEQUENCE_GROWTH_PER_STAGE * stage_index as usize,
            speed_ms: speed_for(stage, level_in_stage),
        }
    }

    /// Number of tiles on the grid
    pub fn tile_count(&self) -> usize {
        self.grid_size as usize * self.grid_size as usize
    }
}

/// Tier reduction inside a stage: levels 1-3, 4-7 and 8-10
fn tier_reduction(level_in_stage: u32) -> u32 {
    match level_in_stage {
        0..=3 => 0,
        4..=7 => 60,
        _ => 120,
    }
}

fn speed_for(stage: u32, level_in_stage: u32) -> u32 {
    let stage_speed =
        BASE_SPEED_MS.saturating_sub(STAGE_SPEEDUP_MS.saturating_mul(stage - 1));
    stage_speed
        .saturating_sub(tier_reduction(level_in_stage))
        .max(MIN_SPEED_MS)
}

/// Display form of a level, e.g. `"Stage 2 - Level 2"` for level 12
pub fn stage_label(level: u32) -> String {
    let d = Difficulty::for_level(level);
    format!("Stage {} - Level {}", d.stage, d.level_in_stage)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_first_level() {
        let d = Difficulty::for_level(1);
        assert_eq!(d.stage, 1);
        assert_eq!(d.level_in_stage, 1);
        assert_eq!(d.grid_size, 2);
        assert_eq!(d.tile_count(), 4);
        assert_eq!(d.sequence_length, 4);
        assert_eq!(d.speed_ms, 450);
    }

    #[test]
    fn test_stage_boundary() {
        let d10 = Difficulty::for_level(10);
        assert_eq!((d10.stage, d10.level_in_stage), (1, 10));
        assert_eq!(d10.grid_size, 2);

        let d11 = Difficulty::for_level(11);
        assert_eq!((d11.stage, d11.level_in_stage), (2, 1));
        assert_eq!(d11.grid_size, 3);
        assert_eq!(d11.sequence_length, 6);
    }

    #[test]
    fn test_speed_tiers() {
        assert_eq!(Difficulty::for_level(3).speed_ms, 450);
        assert_eq!(Difficulty::for_level(4).speed_ms, 390);
        assert_eq!(Difficulty::for_level(7).speed_ms, 390);
        assert_eq!(Difficulty::for_level(8).speed_ms, 330);
        assert_eq!(Difficulty::for_level(10).speed_ms, 330);
        // Stage 2 starts 80ms faster
        assert_eq!(Difficulty::for_level(11).speed_ms, 370);
        // Stage 5, tier 3: 450 - 320 - 120 = 10, clamped
        assert_eq!(Difficulty::for_level(48).speed_ms, MIN_SPEED_MS);
        // Far past the point where the stage speed underflows
        assert_eq!(Difficulty::for_level(500).speed_ms, MIN_SPEED_MS);
    }

    #[test]
    fn test_stage_label() {
        assert_eq!(stage_label(12), "Stage 2 - Level 2");
        assert_eq!(stage_label(23), "Stage 3 - Level 3");
        assert_eq!(stage_label(10), "Stage 1 - Level 10");
    }

    #[test]
    fn test_tile_count_at_extreme_levels() {
        let d = Difficulty::for_level(u32::MAX);
        let side = d.grid_size as usize;
        assert_eq!(d.tile_count(), side * side);
        assert!(d.tile_count() > u32::MAX as usize);
        assert_eq!(d.speed_ms, MIN_SPEED_MS);
    }

    #[test]
    fn test_level_zero_is_level_one() {
        assert_eq!(Difficulty::for_level(0), Difficulty::for_level(1));
    }

    proptest! {
        #[test]
        fn prop_grid_and_length_formulas(level in 1u32..10_000) {
            let d = Difficulty::for_level(level);
            prop_assert_eq!(d.grid_size, 2 + (level - 1) / 10);
            prop_assert_eq!(d.sequence_length, 4 + 2 * ((level - 1) / 10) as usize);
            prop_assert_eq!(d.stage, (level - 1) / 10 + 1);
            prop_assert_eq!(d.level_in_stage, (level - 1) % 10 + 1);
        }

        #[test]
        fn prop_grid_is_non_decreasing(level in 1u32..10_000) {
            let a = Difficulty::for_level(level);
            let b = Difficulty::for_level(level + 1);
            prop_assert!(b.grid_size >= a.grid_size);
        }

        #[test]
        fn prop_speed_is_clamped(level in 1u32..100_000) {
            prop_assert!(Difficulty::for_level(level).speed_ms >= MIN_SPEED_MS);
        }

        #[test]
        fn prop_speed_formula(level in 1u32..1_000) {
            let stage = ((level - 1) / 10 + 1) as i64;
            let tier = match (level - 1) % 10 + 1 {
                1..=3 => 0,
                4..=7 => 60,
                _ => 120,
            };
            let expected = (450 - 80 * (stage - 1) - tier).max(100);
            prop_assert_eq!(i64::from(Difficulty::for_level(level).speed_ms), expected);
        }
    }
}
