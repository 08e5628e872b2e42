//! Comment-aware classification of source offsets.
//!
//! A single forward pass over the text records every `//` and `/* */` span.
//! Delimiters that appear inside an already-open comment are inert, so
//! `// /* not a block` opens nothing and `/* a // b */` closes at `*/`.

use crate::types::{CommentKind, CommentSpan, Region};

/// Every comment span of a text, in order of appearance.
///
/// Building the map is O(n); each [`CommentMap::classify`] query is a binary
/// search, so scanning many offsets of the same text stays linear overall.
#[derive(Debug, Clone)]
pub struct CommentMap {
    len: usize,
    spans: Vec<CommentSpan>,
}

impl CommentMap {
    pub fn new(text: &str) -> Self {
        Self { len: text.len(), spans: scan_spans(text) }
    }

    pub fn spans(&self) -> &[CommentSpan] {
        &self.spans
    }

    /// Classifies `offset`; anything past the end of the text is live.
    pub fn classify(&self, offset: usize) -> Region {
        if offset > self.len {
            return Region::Live;
        }
        let idx = self.spans.partition_point(|span| span.start <= offset);
        if idx == 0 {
            return Region::Live;
        }
        let span = &self.spans[idx - 1];
        if !span.contains(offset) {
            return Region::Live;
        }
        match span.kind {
            CommentKind::Line => Region::LineComment,
            CommentKind::Block => Region::BlockComment,
        }
    }

    pub fn is_live(&self, offset: usize) -> bool {
        self.classify(offset) == Region::Live
    }
}

fn scan_spans(text: &str) -> Vec<CommentSpan> {
    let bytes = text.as_bytes();
    let len = bytes.len();
    let mut spans = Vec::new();
    let mut i = 0;

    while i + 1 < len {
        match (bytes[i], bytes[i + 1]) {
            (b'/', b'/') => {
                let (end, terminated) = match text[i + 2..].find('\n') {
                    Some(rel) => (i + 2 + rel, true),
                    None => (len, false),
                };
                spans.push(CommentSpan { kind: CommentKind::Line, start: i, end, terminated });
                i = end;
            }
            (b'/', b'*') => {
                // Search past the opener so `/*/` does not close itself
                let (end, terminated) = match text[i + 2..].find("*/") {
                    Some(rel) => (i + 2 + rel + 2, true),
                    None => (len, false),
                };
                spans.push(CommentSpan { kind: CommentKind::Block, start: i, end, terminated });
                i = end;
            }
            _ => i += 1,
        }
    }

    spans
}

/// Returns true when `offset` lies inside a `//` comment.
///
/// The comment runs from the first `/` up to, but not including, the newline
/// that ends its line. A `//` that is itself inside a block comment does not
/// count. Offsets past the end of `text` are never inside.
pub fn is_inside_line_comment(text: &str, offset: usize) -> bool {
    CommentMap::new(text).classify(offset) == Region::LineComment
}

/// Returns true when `offset` lies inside a `/* */` comment.
///
/// The span covers the opener through the closing `*/`; an unterminated
/// opener swallows the rest of the text. A `/*` on a line after `//` opens
/// nothing.
pub fn is_inside_block_comment(text: &str, offset: usize) -> bool {
    CommentMap::new(text).classify(offset) == Region::BlockComment
}

/// Removes the first `/* ... */` from `text`, or everything from an
/// unterminated `/*` to the end. `None` yields an empty string.
pub fn remove_first_block_comment<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };
    let Some(start) = text.find("/*") else {
        return text.to_string();
    };
    let end = text[start + 2..].find("*/").map_or(text.len(), |rel| start + 2 + rel + 2);
    splice_out(text, start, end)
}

/// Removes the first `//` comment from `text`, keeping the newline that ends
/// it. `None` yields an empty string.
pub fn remove_first_line_comment<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };
    let Some(start) = text.find("//") else {
        return text.to_string();
    };
    let end = text[start + 2..].find('\n').map_or(text.len(), |rel| start + 2 + rel);
    splice_out(text, start, end)
}

/// Removes every comment from `text` in one pass.
///
/// Unlike looping the single-removal helpers, this honours nesting: a `/*`
/// behind `//` is part of the line comment, and `//` inside a block comment
/// is part of the block.
pub fn strip_comments<'a>(text: impl Into<Option<&'a str>>) -> String {
    let Some(text) = text.into() else {
        return String::new();
    };
    let map = CommentMap::new(text);
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for span in map.spans() {
        out.push_str(&text[cursor..span.start]);
        cursor = span.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn splice_out(text: &str, start: usize, end: usize) -> String {
    let mut out = String::with_capacity(text.len() - (end - start));
    out.push_str(&text[..start]);
    out.push_str(&text[end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_comment_delimiters() {
        assert!(is_inside_block_comment("/**/", 2));
        assert!(!is_inside_block_comment("/**/ ", 4));
        assert!(!is_inside_block_comment("*/", 1));
        assert!(is_inside_block_comment("/* comment */", 3));
        assert!(!is_inside_block_comment("const a", 2));
    }

    #[test]
    fn test_block_comment_multiline() {
        let src = "
        /**
         * comment 1
         */
        const a;
      ";
        assert!(is_inside_block_comment(src, src.find("comment 1").unwrap()));
        assert!(!is_inside_block_comment(src, src.find("const a").unwrap()));
    }

    #[test]
    fn test_block_opener_behind_line_comment_is_inert() {
        let src = "
        // /* comment 1
        const a
        // */
      ";
        assert!(!is_inside_block_comment(src, src.find("comment 1").unwrap()));
        assert!(!is_inside_block_comment(src, src.find("const a").unwrap()));
        assert!(is_inside_line_comment(src, src.find("comment 1").unwrap()));
    }

    #[test]
    fn test_unterminated_block_runs_to_end() {
        let src = "let x = 1; /* open\nlet y = 2;";
        let opener = src.find("/*").unwrap();
        for offset in opener..=src.len() {
            assert!(is_inside_block_comment(src, offset), "offset {offset}");
        }
        assert!(!is_inside_block_comment(src, opener - 1));
    }

    #[test]
    fn test_nested_opener_closes_at_first_closer() {
        let src = "/* a /* b */ live */";
        assert!(is_inside_block_comment(src, src.find('b').unwrap()));
        assert!(!is_inside_block_comment(src, src.find("live").unwrap()));
    }

    #[test]
    fn test_slash_star_slash_does_not_close_itself() {
        assert!(is_inside_block_comment("/*/ still open", 5));
    }

    #[test]
    fn test_line_comment_positions() {
        assert!(is_inside_line_comment("// comment", 0));
        assert!(!is_inside_line_comment("const a = 1 // comment", 0));

        let src = "
      // comment 1
      const a = 1 // comment 2
      // comment 3";
        assert!(is_inside_line_comment(src, src.find("comment 1").unwrap()));
        assert!(is_inside_line_comment(src, src.find("comment 2").unwrap()));
        assert!(is_inside_line_comment(src, src.find("comment 3").unwrap()));
        assert!(!is_inside_line_comment(src, src.find("const a").unwrap()));
    }

    #[test]
    fn test_line_comment_stops_at_newline() {
        let src = "a // one\nb";
        assert!(!is_inside_line_comment(src, src.find('\n').unwrap()));
        assert!(!is_inside_line_comment(src, src.find('b').unwrap()));
    }

    #[test]
    fn test_line_marker_inside_block_is_inert() {
        let src = "/* a // b */ code";
        assert!(!is_inside_line_comment(src, src.find("code").unwrap()));
        assert!(is_inside_block_comment(src, src.find('b').unwrap()));
    }

    #[test]
    fn test_out_of_range_offsets() {
        for text in ["", "// c", "/* c"] {
            assert!(!is_inside_line_comment(text, text.len() + 1));
            assert!(!is_inside_block_comment(text, text.len() + 1));
            assert!(!is_inside_block_comment(text, usize::MAX));
        }
    }

    #[test]
    fn test_classify_is_total() {
        let src = "a // b\n/* c */ d";
        let map = CommentMap::new(src);
        assert_eq!(map.classify(0), Region::Live);
        assert_eq!(map.classify(2), Region::LineComment);
        assert_eq!(map.classify(7), Region::BlockComment);
        assert_eq!(map.classify(src.len() - 1), Region::Live);
        assert_eq!(map.spans().len(), 2);
    }

    #[test]
    fn test_remove_first_block_comment() {
        assert_eq!(remove_first_block_comment("/**/"), "");
        assert_eq!(remove_first_block_comment("/* comment */"), "");
        assert_eq!(remove_first_block_comment("const a = 1 /*/ comment not closed"), "const a = 1 ");
        assert_eq!(
            remove_first_block_comment("const a = 1 /* a comment */ const b = 2"),
            "const a = 1  const b = 2"
        );
        assert_eq!(remove_first_block_comment("/* comment1 *//* comment2 */"), "/* comment2 */");
        assert_eq!(remove_first_block_comment("const a = 1"), "const a = 1");
        assert_eq!(remove_first_block_comment(None), "");
    }

    #[test]
    fn test_remove_first_line_comment() {
        assert_eq!(remove_first_line_comment("// comment"), "");
        assert_eq!(remove_first_line_comment("// comment\n// comment"), "\n// comment");
        assert_eq!(remove_first_line_comment("// comment// comment"), "");
        assert_eq!(remove_first_line_comment("const a = 1 // comment"), "const a = 1 ");
        assert_eq!(remove_first_line_comment("const a = 1"), "const a = 1");
        assert_eq!(remove_first_line_comment(None), "");
    }

    #[test]
    fn test_removal_is_one_per_call() {
        let once = remove_first_line_comment("a // one\nb // two");
        assert_eq!(once, "a \nb // two");
        assert_eq!(remove_first_line_comment(once.as_str()), "a \nb ");
    }

    #[test]
    fn test_strip_comments() {
        assert_eq!(strip_comments("var test // single line"), "var test ");
        assert_eq!(strip_comments("var test // single line /* and multi line */"), "var test ");
        assert_eq!(
            strip_comments("var first /* comment line\n        * comment line\n        */ var second"),
            "var first  var second"
        );
        assert_eq!(strip_comments("var test /* multi line // and single line */"), "var test ");
        assert_eq!(strip_comments(None), "");
    }
}
