//! Lazy pipeline operators that `std::iter` does not ship.
//!
//! Everything here composes with ordinary iterator adapters: sources are plain
//! iterators, and [`GenExt`] adds the missing stages (`resplit`, `unsplit`,
//! `sample`, ...) as extension methods.

mod fib;
mod resplit;
mod sample;
mod virtual_gen;

pub use fib::{Fib, fib_generator};
pub use resplit::Resplit;
pub use sample::Sample;
pub use virtual_gen::VirtualGen;

use rand::Rng;

pub trait GenExt: Iterator + Sized {
    /// Erase the concrete pipeline type behind a boxed iterator.
    fn virtualized<'a>(self) -> VirtualGen<'a, Self::Item>
    where
        Self: 'a,
    {
        VirtualGen::new(self)
    }

    /// Re-split a stream of string chunks on `delim`, regardless of where the
    /// chunk boundaries fall.
    fn resplit<'a, S>(self, delim: char) -> Resplit<'a, Self>
    where
        Self: Iterator<Item = &'a S>,
        S: AsRef<str> + ?Sized + 'a,
    {
        Resplit::new(self, delim)
    }

    fn unsplit(self, delim: char) -> String
    where
        Self::Item: AsRef<str>,
    {
        let mut out = String::new();
        self.unsplit_into(delim, &mut out);
        out
    }

    /// Append the joined items to `out`; existing content is kept.
    fn unsplit_into(self, delim: char, out: &mut String)
    where
        Self::Item: AsRef<str>,
    {
        let mut first = true;
        for item in self {
            if !first {
                out.push(delim);
            }
            first = false;
            out.push_str(item.as_ref());
        }
    }

    /// Uniform sample of at most `n` items, drawn with `rng`.
    fn sample<R: Rng>(self, n: usize, rng: R) -> Sample<Self, R> {
        Sample::new(self, n, rng)
    }

    fn append_to(self, out: &mut Vec<Self::Item>) {
        out.extend(self);
    }
}

impl<I: Iterator> GenExt for I {}
