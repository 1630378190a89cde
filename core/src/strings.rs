//! Hand-written split/join loops used as the imperative baselines.

/// Push every `delim`-separated field of `line` into `out`.
///
/// Produces the same fields as `line.split(delim)`, empty ones included.
pub fn split_into<'a>(delim: char, line: &'a str, out: &mut Vec<&'a str>) {
    let mut start = 0;
    for (idx, ch) in line.char_indices() {
        if ch == delim {
            out.push(&line[start..idx]);
            start = idx + ch.len_utf8();
        }
    }
    out.push(&line[start..]);
}

/// Append `items` joined by `delim` to `out`.
pub fn join_into<S: AsRef<str>>(delim: char, items: &[S], out: &mut String) {
    let Some((first, rest)) = items.split_first() else {
        return;
    };
    let payload: usize = items.iter().map(|s| s.as_ref().len()).sum();
    out.reserve(payload + rest.len() * delim.len_utf8());
    out.push_str(first.as_ref());
    for item in rest {
        out.push(delim);
        out.push_str(item.as_ref());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_into_matches_std_split() {
        for line in ["", "a", "a b", " a  b ", "The quick brown fox jumped over the lazy dog.\n"] {
            let mut parts = Vec::new();
            split_into(' ', line, &mut parts);
            assert_eq!(parts, line.split(' ').collect::<Vec<_>>(), "line {:?}", line);
        }
    }

    #[test]
    fn test_split_into_appends() {
        let mut parts = vec!["keep"];
        split_into(',', "x,y", &mut parts);
        assert_eq!(parts, vec!["keep", "x", "y"]);
    }

    #[test]
    fn test_split_into_multibyte_delimiter() {
        let mut parts = Vec::new();
        split_into('é', "aébéc", &mut parts);
        assert_eq!(parts, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_join_into() {
        let mut out = String::new();
        join_into(',', &["1", "22", "333"], &mut out);
        assert_eq!(out, "1,22,333");

        let empty: [&str; 0] = [];
        join_into(',', &empty, &mut out);
        assert_eq!(out, "1,22,333");
    }

    #[test]
    fn test_join_into_matches_slice_join() {
        let items: Vec<String> = (1..=50).map(|i| i.to_string()).collect();
        let mut out = String::new();
        join_into(',', &items, &mut out);
        assert_eq!(out, items.join(","));
    }
}
