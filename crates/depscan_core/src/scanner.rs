use log::trace;
use std::borrow::Cow;

use crate::{
    comments::CommentMap,
    statement::{get_import_info, is_import_statement},
    types::ImportEdge,
};

const KEYWORD: &str = "import";
const BOM: char = '\u{feff}';

/// Extracts every live import of a file, in order of appearance.
///
/// Occurrences inside `//` or `/* */` comments are skipped, including those
/// in multi-line block comments. Repeated imports of a module are kept as
/// separate edges. `None` yields no edges.
///
/// String literals are not tracked. A `//` or `/*` inside a string earlier on
/// the same line is read as a comment opener, so
/// `const u = 'http://x'; import b from 'b'` yields no edges.
pub fn get_file_imports<'a>(source: impl Into<Option<&'a str>>) -> Vec<ImportEdge> {
    let Some(source) = source.into() else {
        trace!("No source text given, no imports");
        return Vec::new();
    };
    let source = source.strip_prefix(BOM).unwrap_or(source);

    let map = CommentMap::new(source);
    let mut edges = Vec::new();

    for (offset, _) in source.match_indices(KEYWORD) {
        if !starts_statement(source, offset) {
            continue;
        }
        if !map.is_live(offset) {
            trace!("Skipping commented-out import at offset {offset}");
            continue;
        }

        let statement = statement_at(source, &map, offset);
        if !is_import_statement(&*statement) {
            trace!("Not an import declaration at offset {offset}");
            continue;
        }

        let edge = get_import_info(&statement);
        trace!("Found import '{}' (binding: {:?})", edge.module_path, edge.binding);
        edges.push(edge);
    }

    trace!("Found {} imports", edges.len());
    edges
}

/// The keyword must begin a statement: only blanks separate it from the
/// start of its line, a `;`, or the end of a block comment.
fn starts_statement(source: &str, offset: usize) -> bool {
    let before = source[..offset].trim_end_matches([' ', '\t']);
    before.is_empty() || before.ends_with(['\n', '\r', ';']) || before.ends_with("*/")
}

/// Text of the statement starting at `start`.
///
/// Normally the rest of the line. When a `{` binding clause stays open past
/// the line, the statement runs to the end of the line holding the live `}`,
/// with comments inside the clause dropped.
fn statement_at<'s>(source: &'s str, map: &CommentMap, start: usize) -> Cow<'s, str> {
    let end = line_end(source, start);
    let line = &source[start..end];

    let Some(open) = line.find('{').map(|rel| start + rel) else {
        return Cow::Borrowed(line);
    };
    if !map.is_live(open) {
        return Cow::Borrowed(line);
    }
    let Some(close) = find_live(source, map, open + 1, '}') else {
        return Cow::Borrowed(line);
    };
    if close < end {
        return Cow::Borrowed(line);
    }

    let end = line_end(source, close);
    let mut statement = String::with_capacity(end - start);
    let mut cursor = start;
    for span in map.spans().iter().filter(|span| span.start > open && span.start < close) {
        statement.push_str(&source[cursor..span.start]);
        cursor = span.end;
    }
    statement.push_str(&source[cursor..end]);
    Cow::Owned(statement)
}

fn line_end(source: &str, from: usize) -> usize {
    source[from..].find('\n').map_or(source.len(), |rel| from + rel)
}

fn find_live(source: &str, map: &CommentMap, from: usize, needle: char) -> Option<usize> {
    source[from..]
        .match_indices(needle)
        .map(|(rel, _)| from + rel)
        .find(|&idx| map.is_live(idx))
}
