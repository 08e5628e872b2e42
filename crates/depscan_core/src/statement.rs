use log::trace;
use regex::Regex;
use std::sync::LazyLock;

use crate::types::ImportEdge;

/// Static `import` declaration forms:
///
/// - `import x from 'm'`
/// - `import x, { a } from 'm'` / `import x, * as ns from 'm'`
/// - `import { a, b } from 'm'`
/// - `import * as ns from 'm'`
/// - `import 'm'`
///
/// Both quotes of the path must be the same kind.
static IMPORT_STATEMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?x)
        ^import\s+
        (?:
            (?:
                [A-Za-z_$][\w$]*\s*,\s*(?:\{[^}]*\}|\*\s*as\s+[A-Za-z_$][\w$]*)\s*
              | [A-Za-z_$][\w$]*\s+
              | \{[^}]*\}\s*
              | \*\s*as\s+[A-Za-z_$][\w$]*\s+
            )
            from\s*
        )?
        (?:'(?P<single>[^'\n]*)'|"(?P<double>[^"\n]*)")
        "#,
    )
    .expect("import statement pattern is valid")
});

static DEFAULT_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^import\s+([A-Za-z_$][\w$]*)(?:\s*,|\s+from\b)")
        .expect("default binding pattern is valid")
});

static NAMESPACE_BINDING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^import\s+\*\s*as\s+([A-Za-z_$][\w$]*)")
        .expect("namespace binding pattern is valid")
});

static QUOTED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"'([^'\n]*)'|"([^"\n]*)""#).expect("quoted literal pattern is valid")
});

/// Returns the first capture group of the first match of `re` in `text`.
pub fn regex_get_capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text).and_then(|caps| caps.get(1)).map(|m| m.as_str().to_string())
}

/// Returns true when `line` is a static import declaration.
///
/// The line is assumed to be live code; leading whitespace is ignored and
/// anything after the path literal (a `;`, trailing code) is allowed.
/// `None` is never an import.
pub fn is_import_statement<'a>(line: impl Into<Option<&'a str>>) -> bool {
    match line.into() {
        Some(line) => IMPORT_STATEMENT.is_match(line.trim_start()),
        None => false,
    }
}

/// Splits an import statement into its module path and binding name.
///
/// The binding is the default identifier (`import x from ...`), or the
/// namespace alias (`import * as ns from ...`). Named-only and side-effect
/// imports have no binding.
///
/// Callers should gate with [`is_import_statement`]; for anything else the
/// result is the first quoted literal with no binding, or an empty path.
pub fn get_import_info(statement: &str) -> ImportEdge {
    let statement = statement.trim_start();

    let module_path = match IMPORT_STATEMENT.captures(statement) {
        Some(caps) => caps
            .name("single")
            .or_else(|| caps.name("double"))
            .map(|m| m.as_str().to_string())
            .unwrap_or_default(),
        None => {
            trace!("Not an import statement, falling back to first literal: {statement}");
            QUOTED
                .captures(statement)
                .and_then(|caps| caps.get(1).or_else(|| caps.get(2)))
                .map(|m| m.as_str().to_string())
                .unwrap_or_default()
        }
    };

    let binding = regex_get_capture(&DEFAULT_BINDING, statement)
        .or_else(|| regex_get_capture(&NAMESPACE_BINDING, statement));

    ImportEdge { module_path, binding }
}
