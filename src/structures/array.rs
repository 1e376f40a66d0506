//! Array helpers

use rand::Rng;

/// Smallest value produced by [`random_array`]
pub const MIN_VALUE: i64 = 5;

/// Largest value produced by [`random_array`]
pub const MAX_VALUE: i64 = 104;

/// Generate `size` values uniformly in `MIN_VALUE..=MAX_VALUE`
pub fn random_array<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<i64> {
    (0..size)
        .map(|_| rng.gen_range(MIN_VALUE..=MAX_VALUE))
        .collect()
}

pub fn is_sorted(values: &[i64]) -> bool {
    values.windows(2).all(|pair| pair[0] <= pair[1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_random_array_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let values = random_array(120, &mut rng);
        assert_eq!(values.len(), 120);
        assert!(values.iter().all(|v| (MIN_VALUE..=MAX_VALUE).contains(v)));
    }

    #[test]
    fn test_is_sorted() {
        assert!(is_sorted(&[]));
        assert!(is_sorted(&[3]));
        assert!(is_sorted(&[1, 2, 2, 9]));
        assert!(!is_sorted(&[2, 1]));
    }
}
