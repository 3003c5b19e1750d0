//! Closed-form count of bounded compositions.

/// Number of ways to split `n` tokens into ordered groups of 1..=`max_group_size`.
///
/// `count(0) = 1` and `count(i) = count(i-1) + ... + count(i-m)`, a
/// generalized Fibonacci sequence. The sum saturates at `u128::MAX`, which
/// is only reached far beyond any sentence that could be enumerated.
pub fn count_compositions(n: usize, max_group_size: usize) -> u128 {
    let mut counts = vec![0u128; n + 1];
    counts[0] = 1;

    for i in 1..=n {
        let reach = max_group_size.min(i);
        counts[i] = (1..=reach).fold(0u128, |total, j| total.saturating_add(counts[i - j]));
    }

    counts[n]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_sequence_has_one_composition() {
        for m in 0..5 {
            assert_eq!(count_compositions(0, m), 1);
        }
    }

    #[test]
    fn zero_max_group_size_admits_nothing() {
        assert_eq!(count_compositions(3, 0), 0);
    }

    #[test]
    fn max_one_is_always_one() {
        for n in 0..20 {
            assert_eq!(count_compositions(n, 1), 1);
        }
    }

    #[test]
    fn max_two_is_fibonacci() {
        let expected = [1u128, 1, 2, 3, 5, 8, 13, 21, 34, 55];
        for (n, want) in expected.iter().enumerate() {
            assert_eq!(count_compositions(n, 2), *want, "n={n}");
        }
    }

    #[test]
    fn unbounded_is_power_of_two() {
        for n in 1..30 {
            assert_eq!(count_compositions(n, n), 1u128 << (n - 1), "n={n}");
        }
    }

    #[test]
    fn two_tokens_max_two() {
        assert_eq!(count_compositions(2, 2), 2);
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        assert_eq!(count_compositions(500, 500), u128::MAX);
    }
}
