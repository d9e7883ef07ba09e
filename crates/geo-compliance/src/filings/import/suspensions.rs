use crate::filings::domain::{SuspensionInterval, SuspensionKind};
use crate::tables::{is_absent, parse_date};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SuspensionParseError {
    #[error("suspension list must hold (kind, start, end) triples, found {0} values")]
    Arity(usize),
    #[error("unknown suspension kind '{0}'")]
    Kind(String),
    #[error("invalid suspension date '{0}'")]
    Date(String),
    #[error("suspension ends ({end}) before it starts ({start})")]
    Inverted { start: String, end: String },
}

/// Parse the literal triple list the SNL export writes, e.g.
/// `[('T', '2001-01-01', '2002-01-01'), ('P', '2002-01-01', 'n/a')]`.
pub(crate) fn parse_suspensions(raw: &str) -> Result<Vec<SuspensionInterval>, SuspensionParseError> {
    let tokens: Vec<&str> = raw
        .split(|c: char| matches!(c, '[' | ']' | '(' | ')' | ',' | '\'' | '"') || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();

    if tokens.len() % 3 != 0 {
        return Err(SuspensionParseError::Arity(tokens.len()));
    }

    tokens
        .chunks_exact(3)
        .map(|triple| parse_interval(triple[0], triple[1], triple[2]))
        .collect()
}

fn parse_interval(kind: &str, start: &str, end: &str) -> Result<SuspensionInterval, SuspensionParseError> {
    let kind = match kind.to_ascii_lowercase().as_str() {
        "t" | "total" | "totally" => SuspensionKind::Total,
        "p" | "partial" | "partially" => SuspensionKind::Partial,
        _ => return Err(SuspensionParseError::Kind(kind.to_string())),
    };

    let start_date =
        parse_date(start).map_err(|_| SuspensionParseError::Date(start.to_string()))?;
    let end_date = if is_absent(end) {
        None
    } else {
        Some(parse_date(end).map_err(|_| SuspensionParseError::Date(end.to_string()))?)
    };

    if end_date.is_some_and(|end_date| end_date < start_date) {
        return Err(SuspensionParseError::Inverted {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    Ok(SuspensionInterval {
        kind,
        start: start_date,
        end: end_date,
    })
}
