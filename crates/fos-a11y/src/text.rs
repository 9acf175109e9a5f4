//! Text Normalization

/// Collapse whitespace runs to a single space and trim the ends
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for word in text.split_whitespace() {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// Join non-empty fragments with one space
pub(crate) fn join_fragments<I, S>(fragments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for fragment in fragments {
        let fragment = fragment.as_ref();
        if fragment.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(fragment);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  Flash\n\tthe   screen "), "Flash the screen");
        assert_eq!(sanitize("one\r\ntwo"), "one two");
        assert_eq!(sanitize("no\u{a0}break"), "no break");
        assert_eq!(sanitize(" \n "), "");
        assert_eq!(sanitize(""), "");
    }

    #[test]
    fn test_join_skips_empty() {
        assert_eq!(join_fragments(["a", "", "b", ""]), "a b");
        assert_eq!(join_fragments(["", ""]), "");
        assert_eq!(join_fragments(Vec::<String>::new()), "");
    }
}
