use std::fmt;

/// Type-erased pipeline stage.
///
/// Every pulled item goes through one dynamic call, so stacking several of
/// these shows the cost of virtualizing a pipeline at each boundary.
pub struct VirtualGen<'a, T> {
    inner: Box<dyn Iterator<Item = T> + 'a>,
}

impl<'a, T> VirtualGen<'a, T> {
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'a,
    {
        Self {
            inner: Box::new(source.into_iter()),
        }
    }

    /// Build a generator from a closure returning `None` once exhausted.
    pub fn from_fn<F>(body: F) -> Self
    where
        F: FnMut() -> Option<T> + 'a,
    {
        Self::new(std::iter::from_fn(body))
    }
}

impl<T> Iterator for VirtualGen<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> fmt::Debug for VirtualGen<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VirtualGen")
            .field("size_hint", &self.inner.size_hint())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_fn_stops_on_none() {
        let mut n = 0;
        let items: Vec<i32> = VirtualGen::from_fn(|| {
            n += 1;
            (n <= 3).then_some(n)
        })
        .collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_size_hint_forwarded() {
        let v = VirtualGen::new(vec![1, 2, 3]);
        assert_eq!(v.size_hint(), (3, Some(3)));
    }

    #[test]
    fn test_borrows_from_caller() {
        let data = vec![String::from("a"), String::from("bc")];
        let total: usize = VirtualGen::new(data.iter()).map(|s| s.len()).sum();
        assert_eq!(total, 3);
    }
}
