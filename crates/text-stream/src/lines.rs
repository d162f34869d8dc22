//! Line segmentation and character-bounded chunking.

use std::borrow::Cow;

/// Reports whether `character` ends a line.
///
/// The set matches the universal line boundaries: LF, CR, VT, FF, the
/// file/group/record separators, NEL, and the Unicode line and paragraph
/// separators. CRLF is handled by [`LineSegments`] as a single boundary.
#[must_use]
pub const fn is_line_boundary(character: char) -> bool {
    matches!(
        character,
        '\n' | '\r'
            | '\u{0b}'
            | '\u{0c}'
            | '\u{1c}'
            | '\u{1d}'
            | '\u{1e}'
            | '\u{85}'
            | '\u{2028}'
            | '\u{2029}'
    )
}

/// Iterator over the lines of a string, each with its terminator.
///
/// A `\r\n` terminator is yielded as `\n`, which is the only case that
/// allocates. Text after the last boundary is yielded without a terminator,
/// and the empty string yields nothing.
///
/// ```
/// use text_stream::lines::LineSegments;
///
/// let lines: Vec<_> = LineSegments::new("a\nb\r\nc").collect();
/// assert_eq!(lines, ["a\n", "b\n", "c"]);
/// assert_eq!(LineSegments::new("").count(), 0);
/// ```
#[derive(Clone, Debug)]
pub struct LineSegments<'a> {
    rest: &'a str,
}

impl<'a> LineSegments<'a> {
    /// Creates an iterator over the lines of `text`.
    #[must_use]
    pub const fn new(text: &'a str) -> Self {
        Self { rest: text }
    }
}

impl<'a> Iterator for LineSegments<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }

        let Some((start, boundary)) = self
            .rest
            .char_indices()
            .find(|&(_, character)| is_line_boundary(character))
        else {
            return Some(Cow::Borrowed(std::mem::take(&mut self.rest)));
        };

        let end = start + boundary.len_utf8();
        if boundary == '\r' && self.rest[end..].starts_with('\n') {
            let mut line = String::with_capacity(end);
            line.push_str(&self.rest[..start]);
            line.push('\n');
            self.rest = &self.rest[end + 1..];
            return Some(Cow::Owned(line));
        }

        let (line, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(Cow::Borrowed(line))
    }
}

impl std::iter::FusedIterator for LineSegments<'_> {}

/// Iterator that cuts a string into pieces of at most `max_chars`
/// characters, never splitting a character.
///
/// ```
/// use text_stream::lines::CharChunks;
///
/// let chunks: Vec<_> = CharChunks::new("h\u{e9}llo", 2).collect();
/// assert_eq!(chunks, ["h\u{e9}", "ll", "o"]);
/// ```
#[derive(Clone, Debug)]
pub struct CharChunks<'a> {
    rest: &'a str,
    max_chars: usize,
}

impl<'a> CharChunks<'a> {
    /// Creates a chunk iterator; a `max_chars` of zero is treated as one.
    #[must_use]
    pub fn new(text: &'a str, max_chars: usize) -> Self {
        Self {
            rest: text,
            max_chars: max_chars.max(1),
        }
    }
}

impl<'a> Iterator for CharChunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        let end = self
            .rest
            .char_indices()
            .nth(self.max_chars)
            .map_or(self.rest.len(), |(index, _)| index);
        let (chunk, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(chunk)
    }
}

impl std::iter::FusedIterator for CharChunks<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        LineSegments::new(text).map(Cow::into_owned).collect()
    }

    #[test]
    fn empty_text_has_no_lines() {
        assert!(lines("").is_empty());
    }

    #[test]
    fn terminators_are_kept() {
        assert_eq!(lines("a"), ["a"]);
        assert_eq!(lines("a\n"), ["a\n"]);
        assert_eq!(lines("\n"), ["\n"]);
        assert_eq!(lines("\na\n"), ["\n", "a\n"]);
        assert_eq!(lines("c\n\n"), ["c\n", "\n"]);
        assert_eq!(lines("f\n\ng"), ["f\n", "\n", "g"]);
    }

    #[test]
    fn every_universal_boundary_splits() {
        for boundary in [
            "\r", "\x0b", "\x0c", "\x1c", "\x1d", "\x1e", "\u{85}", "\u{2028}", "\u{2029}",
        ] {
            let text = format!("a{boundary}b");
            assert_eq!(lines(&text), [format!("a{boundary}"), "b".to_owned()]);
        }
    }

    #[test]
    fn crlf_becomes_lf() {
        assert_eq!(lines("a\r\nb\r\n"), ["a\n", "b\n"]);
        assert_eq!(lines("\r\n"), ["\n"]);
    }

    #[test]
    fn lone_cr_and_cr_cr_lf() {
        assert_eq!(lines("a\r"), ["a\r"]);
        assert_eq!(lines("a\r\r\n"), ["a\r", "\n"]);
        assert_eq!(lines("a\n\r"), ["a\n", "\r"]);
    }

    #[test]
    fn lf_borrows_and_crlf_allocates() {
        let mut segments = LineSegments::new("x\ny\r\n");
        assert!(matches!(segments.next(), Some(Cow::Borrowed("x\n"))));
        assert!(matches!(segments.next(), Some(Cow::Owned(ref line)) if line == "y\n"));
        assert!(segments.next().is_none());
        assert!(segments.next().is_none());
    }

    #[test]
    fn non_boundary_controls_do_not_split() {
        assert_eq!(lines("a\tb\x1fc"), ["a\tb\x1fc"]);
    }

    #[test]
    fn chunks_count_characters_not_bytes() {
        let text = "\u{ff11}".repeat(5);
        let chunks: Vec<_> = CharChunks::new(&text, 2).collect();
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[0].chars().count(), 2);
        assert_eq!(chunks[2].chars().count(), 1);
    }

    #[test]
    fn chunks_of_exact_multiple() {
        let text = "x".repeat(2000);
        let sizes: Vec<_> = CharChunks::new(&text, 1000).map(str::len).collect();
        assert_eq!(sizes, [1000, 1000]);
    }

    #[test]
    fn zero_width_chunks_are_widened() {
        let chunks: Vec<_> = CharChunks::new("ab", 0).collect();
        assert_eq!(chunks, ["a", "b"]);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert_eq!(CharChunks::new("", 10).count(), 0);
    }
}
