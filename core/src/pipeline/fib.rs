use std::num::Wrapping;

use super::VirtualGen;

/// Infinite Fibonacci source with a concrete type (fully inlinable).
///
/// Yields `a += b` then `b += a` alternately starting from `a = 0, b = 1`,
/// i.e. `1, 2, 3, 5, 8, ...`, wrapping on overflow.
#[derive(Debug, Clone)]
pub struct Fib {
    a: Wrapping<u64>,
    b: Wrapping<u64>,
    advance_b: bool,
}

impl Fib {
    pub fn new() -> Self {
        Self {
            a: Wrapping(0),
            b: Wrapping(1),
            advance_b: false,
        }
    }
}

impl Default for Fib {
    fn default() -> Self {
        Self::new()
    }
}

impl Iterator for Fib {
    type Item = Wrapping<u64>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.advance_b {
            self.b += self.a;
            self.advance_b = false;
            Some(self.b)
        } else {
            self.a += self.b;
            self.advance_b = true;
            Some(self.a)
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}

/// The same sequence as [`Fib`], produced by a boxed closure.
pub fn fib_generator() -> VirtualGen<'static, Wrapping<u64>> {
    let mut a = Wrapping(0u64);
    let mut b = Wrapping(1u64);
    let mut advance_b = false;
    VirtualGen::from_fn(move || {
        advance_b = !advance_b;
        if advance_b {
            a += b;
            Some(a)
        } else {
            b += a;
            Some(b)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fib_prefix() {
        let got: Vec<u64> = Fib::new().take(8).map(|w| w.0).collect();
        assert_eq!(got, vec![1, 2, 3, 5, 8, 13, 21, 34]);
    }

    #[test]
    fn test_generator_matches_static() {
        let a: Vec<_> = Fib::new().take(500).collect();
        let b: Vec<_> = fib_generator().take(500).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_wraps_instead_of_overflowing() {
        let sum: Wrapping<u64> = Fib::new().take(1000).sum();
        let again: Wrapping<u64> = fib_generator().take(1000).sum();
        assert_eq!(sum, again);
    }
}
