use std::borrow::Cow;
use std::iter::Fuse;

/// Segments of a chunked string stream, split on a delimiter.
///
/// A segment that lies inside one chunk is borrowed from it; a segment that
/// spans chunk boundaries is stitched into an owned buffer. The delimiter is
/// never part of a segment. Empty segments between two delimiters are kept,
/// a trailing empty segment after a final delimiter is not.
pub struct Resplit<'a, I> {
    source: Fuse<I>,
    delim: char,
    current: &'a str,
    carry: String,
}

impl<'a, I> Resplit<'a, I> {
    pub(super) fn new(source: I, delim: char) -> Self
    where
        I: Iterator,
    {
        Self {
            source: source.fuse(),
            delim,
            current: "",
            carry: String::new(),
        }
    }
}

impl<'a, I, S> Iterator for Resplit<'a, I>
where
    I: Iterator<Item = &'a S>,
    S: AsRef<str> + ?Sized + 'a,
{
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let current: &'a str = self.current;
            if let Some(pos) = current.find(self.delim) {
                let head = &current[..pos];
                self.current = &current[pos + self.delim.len_utf8()..];
                if self.carry.is_empty() {
                    return Some(Cow::Borrowed(head));
                }
                let mut segment = std::mem::take(&mut self.carry);
                segment.push_str(head);
                return Some(Cow::Owned(segment));
            }

            self.carry.push_str(self.current);
            self.current = "";
            match self.source.next() {
                Some(chunk) => self.current = chunk.as_ref(),
                None if self.carry.is_empty() => return None,
                None => return Some(Cow::Owned(std::mem::take(&mut self.carry))),
            }
        }
    }
}
