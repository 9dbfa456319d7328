// ---------------------------------------------------------------------------
// Query grammar
// ---------------------------------------------------------------------------
//
//   query      := comparison | substring
//   comparison := ident ws* op ws* value        (anchored, whole query)
//   ident      := [A-Za-z0-9_]+
//   op         := '>' | '<' | '='
//   value      := any non-empty text
//   substring  := anything that is not a comparison

/// Comparison operator of a [`FilterExpression::Comparison`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Greater,
    Less,
    Equal,
}

impl CompareOp {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '>' => Some(CompareOp::Greater),
            '<' => Some(CompareOp::Less),
            '=' => Some(CompareOp::Equal),
            _ => None,
        }
    }
}

/// A parsed query.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterExpression {
    /// Blank query: every row passes.
    All,
    /// Case-insensitive text search over every cell.
    Substring(String),
    /// `column op literal`.
    Comparison {
        column: String,
        op: CompareOp,
        literal: String,
    },
}

impl FilterExpression {
    /// Parse a raw query. Never fails: text that does not match the
    /// comparison production is a substring search.
    pub fn parse(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            return FilterExpression::All;
        }
        parse_comparison(query).unwrap_or_else(|| FilterExpression::Substring(query.to_string()))
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self, FilterExpression::Comparison { .. })
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn parse_comparison(query: &str) -> Option<FilterExpression> {
    let ident_end = query
        .char_indices()
        .find(|&(_, c)| !is_ident_char(c))
        .map(|(i, _)| i)?;
    if ident_end == 0 {
        return None;
    }
    let (column, rest) = query.split_at(ident_end);

    let rest = rest.trim_start();
    let mut chars = rest.chars();
    let op = chars.next().and_then(CompareOp::from_char)?;

    let literal = chars.as_str().trim();
    if literal.is_empty() {
        return None;
    }

    Some(FilterExpression::Comparison {
        column: column.to_string(),
        op,
        literal: literal.to_string(),
    })
}

/// Whether the raw text contains any comparison operator character.
pub fn contains_operator(query: &str) -> bool {
    query.contains(['>', '<', '='])
}
