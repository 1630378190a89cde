use rand::Rng;

/// Reservoir sample of a source (Algorithm R).
///
/// The source is drained on the first pull; the sampled items are then
/// yielded in reservoir order.
pub struct Sample<I: Iterator, R> {
    source: Option<I>,
    size: usize,
    rng: R,
    reservoir: std::vec::IntoIter<I::Item>,
}

impl<I: Iterator, R: Rng> Sample<I, R> {
    pub(super) fn new(source: I, size: usize, rng: R) -> Self {
        Self {
            source: Some(source),
            size,
            rng,
            reservoir: Vec::new().into_iter(),
        }
    }

    fn fill(&mut self, source: I) {
        let mut reservoir = Vec::with_capacity(self.size.min(source.size_hint().0));
        if self.size > 0 {
            for (seen, item) in source.enumerate() {
                if seen < self.size {
                    reservoir.push(item);
                } else {
                    let slot = self.rng.gen_range(0..=seen);
                    if slot < self.size {
                        reservoir[slot] = item;
                    }
                }
            }
        }
        self.reservoir = reservoir.into_iter();
    }
}

impl<I: Iterator, R: Rng> Iterator for Sample<I, R> {
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        if let Some(source) = self.source.take() {
            self.fill(source);
        }
        self.reservoir.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.source {
            Some(source) => {
                let (lower, upper) = source.size_hint();
                (lower.min(self.size), Some(upper.map_or(self.size, |u| u.min(self.size))))
            }
            None => self.reservoir.size_hint(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::pipeline::GenExt;
    use rand::{SeedableRng, rngs::SmallRng};
    use std::collections::HashSet;

    #[test]
    fn test_short_source_passes_through() {
        let rng = SmallRng::seed_from_u64(1);
        let got: Vec<_> = (1..=5).sample(10, rng).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_huge_size_does_not_preallocate() {
        let got: Vec<_> = (1..=5).sample(usize::MAX, SmallRng::seed_from_u64(1)).collect();
        assert_eq!(got, vec![1, 2, 3, 4, 5]);
        let got: Vec<_> = (1..=3).sample(1 << 40, SmallRng::seed_from_u64(1)).collect();
        assert_eq!(got, vec![1, 2, 3]);
    }

    #[test]
    fn test_sample_size_and_membership() {
        let rng = SmallRng::seed_from_u64(2);
        let got: Vec<u32> = (0..10_000u32).sample(100, rng).collect();
        assert_eq!(got.len(), 100);
        let distinct: HashSet<_> = got.iter().collect();
        assert_eq!(distinct.len(), 100);
        assert!(got.iter().all(|&v| v < 10_000));
    }

    #[test]
    fn test_zero_size_is_empty() {
        let rng = SmallRng::seed_from_u64(3);
        assert_eq!((0..100).sample(0, rng).count(), 0);
    }

    #[test]
    fn test_same_seed_same_sample() {
        let a: Vec<_> = (0..5_000).sample(50, SmallRng::seed_from_u64(9)).collect();
        let b: Vec<_> = (0..5_000).sample(50, SmallRng::seed_from_u64(9)).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_borrowed_rng() {
        let mut rng = SmallRng::seed_from_u64(4);
        let first: u64 = (1..=1000u64).sample(10, &mut rng).sum();
        let second: u64 = (1..=1000u64).sample(10, &mut rng).sum();
        assert!(first > 0 && second > 0);
    }

    #[test]
    fn test_size_hint_capped() {
        let rng = SmallRng::seed_from_u64(5);
        let s = (0..1000).sample(10, rng);
        assert_eq!(s.size_hint(), (10, Some(10)));
    }
}
