//! Substring patterns handed to the store.
//!
//! Callers supply raw tokens with no wildcard syntax. [`LikePattern`] turns a
//! token into a case-insensitive "contains" pattern: SQL-backed stores use
//! [`LikePattern::as_sql`] with `ILIKE ... ESCAPE '\'`, in-memory stores use
//! [`LikePattern::matches`].

/// Case-insensitive substring pattern built from one search token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    token: String,
    folded: String,
}

impl LikePattern {
    /// Pattern matching any value that contains `token`.
    pub fn containing(token: impl Into<String>) -> Self {
        let token = token.into();
        let folded = token.to_lowercase();
        Self { token, folded }
    }

    /// The raw token this pattern was built from.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// `%token%` with `\`, `%` and `_` escaped, for `ILIKE ... ESCAPE '\'`.
    pub fn as_sql(&self) -> String {
        let mut out = String::with_capacity(self.token.len() + 2);
        out.push('%');
        for ch in self.token.chars() {
            if matches!(ch, '\\' | '%' | '_') {
                out.push('\\');
            }
            out.push(ch);
        }
        out.push('%');
        out
    }

    /// True if `value` contains the token, ignoring case.
    pub fn matches(&self, value: &str) -> bool {
        value.to_lowercase().contains(&self.folded)
    }
}

impl std::fmt::Display for LikePattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_sql())
    }
}
