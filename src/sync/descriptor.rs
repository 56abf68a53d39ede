// stocksync/src/sync/descriptor.rs
use regex::Regex;
use std::sync::LazyLock;

static CODE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]").expect("valid code pattern"));
static ATTRIBUTES_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([^()]*)\)\s*$").expect("valid attributes pattern"));

/// A product descriptor such as `[ABC123] Widget (Red, Large)` split into its parts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductDescriptor {
    pub code: Option<String>,
    pub name: String,
    pub attributes: Vec<String>,
}

/// Splits a raw descriptor into code, name and attribute list.
///
/// Never fails: a missing `[...]` code or `(...)` suffix is reported as `None` or
/// an empty list. Only the first bracketed group is treated as the code, and the
/// parenthesized group must close the string to count as attributes.
pub fn parse(raw: &str) -> ProductDescriptor {
    let code_match = CODE_PATTERN.captures(raw);
    let attributes_match = ATTRIBUTES_PATTERN.captures(raw);

    let code = code_match
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|code| !code.is_empty());

    let attributes = attributes_match
        .as_ref()
        .and_then(|caps| caps.get(1))
        .map(|m| {
            m.as_str()
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    // Cut the attribute suffix first so the code span offsets stay valid.
    let mut name = raw.to_string();
    if let Some(whole) = attributes_match.as_ref().and_then(|caps| caps.get(0)) {
        name.truncate(whole.start());
    }
    if let Some(whole) = code_match.as_ref().and_then(|caps| caps.get(0)) {
        if whole.end() <= name.len() {
            name.replace_range(whole.range(), "");
        }
    }

    ProductDescriptor {
        code,
        name: name.trim().to_string(),
        attributes,
    }
}
