//! Read-only data shared by the benchmark cases.
//!
//! Every fixture is built lazily on first access and never mutated afterwards.
//! Call [`init`] before timing anything so construction cost never leaks into
//! a measured region.

use once_cell::sync::Lazy;
use rand::{Rng, SeedableRng, rngs::StdRng};

pub const TEST_SIZE: usize = 1000;

/// Exclusive upper bound for the pseudo-random integers in [`test_vector`].
pub const RAND_LIMIT: i32 = 1 << 20;

pub const LINE: &str = "The quick brown fox jumped over the lazy dog.\n";
pub const LINE_COUNT: usize = 10_000;
pub const SMALL_LINE_SIZE: usize = 17;

const TEST_VECTOR_SEED: u64 = 0x6765_6e62_656e_6368;

static TEST_VECTOR: Lazy<Vec<i32>> = Lazy::new(|| {
    let mut rng = StdRng::seed_from_u64(TEST_VECTOR_SEED);
    (0..TEST_SIZE).map(|_| rng.gen_range(0..RAND_LIMIT)).collect()
});

static TEST_STR_VECTOR: Lazy<Vec<String>> = Lazy::new(|| (1..=TEST_SIZE).map(|i| i.to_string()).collect());

static TEST_VECTOR_VECTOR: Lazy<Vec<Vec<i32>>> = Lazy::new(|| (1..=100).map(|i| (1..=i).collect()).collect());

static BIG_LINES: Lazy<String> = Lazy::new(|| LINE.repeat(LINE_COUNT));

static SMALL_LINES: Lazy<Vec<String>> = Lazy::new(|| chunk(&BIG_LINES, SMALL_LINE_SIZE));

pub fn test_vector() -> &'static [i32] {
    &TEST_VECTOR
}

pub fn test_str_vector() -> &'static [String] {
    &TEST_STR_VECTOR
}

pub fn test_vector_vector() -> &'static [Vec<i32>] {
    &TEST_VECTOR_VECTOR
}

/// [`LINE`] repeated [`LINE_COUNT`] times.
pub fn big_lines() -> &'static str {
    &BIG_LINES
}

/// [`big_lines`] cut into consecutive [`SMALL_LINE_SIZE`]-byte pieces.
pub fn small_lines() -> &'static [String] {
    &SMALL_LINES
}

/// Decimal renderings of `n` random non-negative integers.
pub fn random_strings(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| rng.gen_range(0..i32::MAX).to_string()).collect()
}

/// Force every lazy fixture.
pub fn init() {
    Lazy::force(&TEST_VECTOR);
    Lazy::force(&TEST_STR_VECTOR);
    Lazy::force(&TEST_VECTOR_VECTOR);
    Lazy::force(&BIG_LINES);
    Lazy::force(&SMALL_LINES);
    tracing::debug!(
        target: "genbench::fixtures",
        big_lines_bytes = BIG_LINES.len(),
        small_lines = SMALL_LINES.len(),
        "fixtures ready"
    );
}

fn chunk(text: &str, size: usize) -> Vec<String> {
    let mut out = Vec::with_capacity(text.len().div_ceil(size.max(1)));
    let mut pos = 0;
    while pos < text.len() {
        let mut end = (pos + size.max(1)).min(text.len());
        while !text.is_char_boundary(end) {
            end += 1;
        }
        out.push(text[pos..end].to_string());
        pos = end;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_is_seeded_and_bounded() {
        let v = test_vector();
        assert_eq!(v.len(), TEST_SIZE);
        assert!(v.iter().all(|&i| (0..RAND_LIMIT).contains(&i)));

        let mut rng = StdRng::seed_from_u64(TEST_VECTOR_SEED);
        let first: i32 = rng.gen_range(0..RAND_LIMIT);
        assert_eq!(v[0], first);
    }

    #[test]
    fn test_str_vector_counts_from_one() {
        let v = test_str_vector();
        assert_eq!(v.len(), TEST_SIZE);
        assert_eq!(v[0], "1");
        assert_eq!(v[TEST_SIZE - 1], "1000");
    }

    #[test]
    fn test_vector_vector_grows_by_one() {
        let vv = test_vector_vector();
        assert_eq!(vv.len(), 100);
        for (idx, v) in vv.iter().enumerate() {
            assert_eq!(v.len(), idx + 1);
            assert_eq!(v.last().copied(), Some(idx as i32 + 1));
        }
    }

    #[test]
    fn test_small_lines_partition_big_lines() {
        let small = small_lines();
        assert_eq!(big_lines().len(), LINE.len() * LINE_COUNT);
        assert_eq!(small.concat(), big_lines());
        assert!(small[..small.len() - 1].iter().all(|s| s.len() == SMALL_LINE_SIZE));
        assert!(small.last().is_some_and(|s| !s.is_empty() && s.len() <= SMALL_LINE_SIZE));
    }

    #[test]
    fn test_chunk_respects_char_boundaries() {
        let parts = chunk("aé€b", 2);
        assert_eq!(parts.concat(), "aé€b");
        assert_eq!(parts, vec!["aé".to_string(), "€".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_random_strings_deterministic() {
        let a = random_strings(16, 7);
        let b = random_strings(16, 7);
        assert_eq!(a, b);
        assert!(a.iter().all(|s| s.parse::<i32>().is_ok()));
    }
}
