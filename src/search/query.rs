use std::fmt;

/// Sentinel input that selects every repository, most popular first.
pub const ALL_SENTINEL: &str = "all";

const ALL_QUERY: &str = "stars:>=0";

/// Search qualifier string sent to the search service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    /// Map user input to a query: `all` selects everything, anything else is
    /// treated as a topic.
    #[must_use]
    pub fn from_input(input: &str) -> Self {
        let input = input.trim();
        if input.is_empty() || input.eq_ignore_ascii_case(ALL_SENTINEL) {
            Self(ALL_QUERY.to_string())
        } else {
            Self(format!("topic:{input}"))
        }
    }

    /// Use the input verbatim as a search qualifier string.
    #[must_use]
    pub fn raw(query: &str) -> Self {
        Self(query.trim().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
