//! Random tile sequences

use rand::Rng;

use crate::error::{GameError, Result};

/// Ordered tile indices the player must reproduce
pub type Sequence = Vec<usize>;

/// Generate `length` independent uniform tile indices in `[0, tile_count)`.
///
/// Repeats are allowed. Fails only when the grid has no tiles.
pub fn generate<R: Rng>(rng: &mut R, length: usize, tile_count: usize) -> Result<Sequence> {
    if tile_count == 0 {
        return Err(GameError::EmptyGrid);
    }
    Ok((0..length).map(|_| rng.random_range(0..tile_count)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_empty_grid_fails() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(matches!(generate(&mut rng, 4, 0), Err(GameError::EmptyGrid)));
    }

    #[test]
    fn test_zero_length() {
        let mut rng = Pcg32::seed_from_u64(1);
        assert!(generate(&mut rng, 0, 4).unwrap().is_empty());
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);
        assert_eq!(
            generate(&mut a, 16, 9).unwrap(),
            generate(&mut b, 16, 9).unwrap()
        );
    }

    #[test]
    fn test_single_tile_grid() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(generate(&mut rng, 5, 1).unwrap(), vec![0; 5]);
    }

    proptest! {
        #[test]
        fn prop_length_and_range(seed: u64, n in 0usize..64, t in 1usize..100) {
            let mut rng = Pcg32::seed_from_u64(seed);
            let seq = generate(&mut rng, n, t).unwrap();
            prop_assert_eq!(seq.len(), n);
            prop_assert!(seq.iter().all(|&i| i < t));
        }
    }
}
