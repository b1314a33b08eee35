//! Search term parsing

/// A search term split into an optional registry and the query itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTerm<'a> {
    /// Registry named before the first slash, if any.
    pub registry: Option<&'a str>,
    /// The query sent to every registry.
    pub query: &'a str,
}

/// Split `raw` at its first slash.
///
/// Everything before the slash is taken as an extra registry to search. The
/// term may hold arbitrary input such as wildcards, so no reference parser is
/// involved and the prefix is not validated. A term like `library/ubuntu` is
/// therefore read as registry `library` and query `ubuntu`.
pub fn parse_term(raw: &str) -> SearchTerm<'_> {
    match raw.split_once('/') {
        Some((registry, query)) => SearchTerm {
            registry: Some(registry),
            query,
        },
        None => SearchTerm {
            registry: None,
            query: raw,
        },
    }
}
