//! Commit message grammar validator.
//!
//! Hand-written descent over the conventional commit grammar:
//!
//! ```text
//! header := type ["(" scope ")"] ["!"] ":" " " subject
//! message := header [blank body] [blank footers]
//! footer := token (": " | " #") value
//! ```
//!
//! Parsing either yields a complete [`CommitRecord`] or a [`ParseError`]
//! naming the field that failed; no partial records are produced.

use crate::domain::commit::{CommitRecord, CommitType, Footer};
use thiserror::Error;

/// Message prefixes that bypass validation entirely. Matching messages are
/// excluded from bump computation and the changelog.
pub const BYPASS_PREFIXES: [&str; 3] = ["Merge", "Revert", "[skip ci]"];

/// Per-field reason a commit message failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    #[error("empty commit message")]
    EmptyMessage,

    #[error("missing commit type")]
    MissingType,

    #[error("unrecognized commit type '{0}'")]
    UnknownType(String),

    #[error("unclosed scope parenthesis")]
    UnclosedScope,

    #[error("invalid scope format")]
    InvalidScope,

    #[error("missing ':' separator after the commit type")]
    MissingColon,

    #[error("exactly one space must follow ':'")]
    InvalidSpacing,

    #[error("missing commit subject")]
    EmptySubject,

    #[error("missing blank line between header and body")]
    MissingBlankLine,

    #[error("malformed footer line: '{0}'")]
    MalformedFooter(String),
}

/// A rejected commit message: the reason plus the original text, so the
/// caller can report every offending commit in one pass.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub raw: String,
}

impl ParseError {
    fn new(kind: ParseErrorKind, raw: &str) -> Self {
        ParseError {
            kind,
            raw: raw.to_string(),
        }
    }
}

/// A message skipped because of a bypass prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredCommit {
    pub raw: String,
    pub prefix: &'static str,
}

/// Outcome of parsing one raw message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedMessage {
    Conventional(CommitRecord),
    Ignored(IgnoredCommit),
}

/// Parse a raw commit message into a structured record.
pub fn parse(raw: &str) -> Result<ParsedMessage, ParseError> {
    let trimmed = raw.trim_start();
    if trimmed.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptyMessage, raw));
    }
    for prefix in BYPASS_PREFIXES {
        if trimmed.starts_with(prefix) {
            return Ok(ParsedMessage::Ignored(IgnoredCommit {
                raw: raw.to_string(),
                prefix,
            }));
        }
    }

    let mut lines = raw.lines();
    let header = lines.next().unwrap_or("");
    let (commit_type, scope, bang, subject) =
        parse_header(header).map_err(|kind| ParseError::new(kind, raw))?;

    let rest: Vec<&str> = lines.collect();

    // The body (or footer block) must begin one blank line after the header.
    if let Some(first) = rest.first() {
        if !first.trim().is_empty() {
            return Err(ParseError::new(ParseErrorKind::MissingBlankLine, raw));
        }
    }

    let mut start = 0;
    while start < rest.len() && rest[start].trim().is_empty() {
        start += 1;
    }
    let mut end = rest.len();
    while end > start && rest[end - 1].trim().is_empty() {
        end -= 1;
    }
    let content = &rest[start..end];

    // The trailing contiguous non-blank lines are the footer candidate block.
    let mut footer_start = content.len();
    while footer_start > 0 && !content[footer_start - 1].trim().is_empty() {
        footer_start -= 1;
    }

    let (body_lines, footers) = match content.get(footer_start) {
        Some(first) if footer_line(first).is_some() => {
            let mut footers = Vec::new();
            for line in &content[footer_start..] {
                match footer_line(line) {
                    Some(footer) => footers.push(footer),
                    None => {
                        return Err(ParseError::new(
                            ParseErrorKind::MalformedFooter((*line).to_string()),
                            raw,
                        ))
                    }
                }
            }
            (&content[..footer_start], footers)
        }
        _ => (content, Vec::new()),
    };

    let mut body_end = body_lines.len();
    while body_end > 0 && body_lines[body_end - 1].trim().is_empty() {
        body_end -= 1;
    }
    let body = if body_end == 0 {
        None
    } else {
        Some(body_lines[..body_end].join("\n"))
    };

    // `!` in the header and a breaking footer are equivalent signals.
    let breaking = bang || footers.iter().any(Footer::is_breaking_marker);

    Ok(ParsedMessage::Conventional(CommitRecord {
        commit_type,
        scope,
        breaking,
        subject,
        body,
        footers,
        raw: raw.to_string(),
    }))
}

type Header = (CommitType, Option<String>, bool, String);

fn parse_header(header: &str) -> Result<Header, ParseErrorKind> {
    let type_len = header
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .count();
    if type_len == 0 {
        return Err(ParseErrorKind::MissingType);
    }
    let token = &header[..type_len];
    let commit_type = CommitType::from_token(token)
        .ok_or_else(|| ParseErrorKind::UnknownType(token.to_string()))?;
    let mut rest = &header[type_len..];

    let scope = if let Some(stripped) = rest.strip_prefix('(') {
        match stripped.find(')') {
            None => return Err(ParseErrorKind::UnclosedScope),
            Some(close) => {
                let scope = &stripped[..close];
                if scope.trim().is_empty() || scope.contains('(') {
                    return Err(ParseErrorKind::InvalidScope);
                }
                rest = &stripped[close + 1..];
                Some(scope.to_string())
            }
        }
    } else {
        None
    };

    let bang = match rest.strip_prefix('!') {
        Some(stripped) => {
            rest = stripped;
            true
        }
        None => false,
    };

    rest = rest.strip_prefix(':').ok_or(ParseErrorKind::MissingColon)?;

    if rest.trim().is_empty() {
        return Err(ParseErrorKind::EmptySubject);
    }
    let subject = rest
        .strip_prefix(' ')
        .ok_or(ParseErrorKind::InvalidSpacing)?;
    if subject.starts_with(' ') {
        return Err(ParseErrorKind::InvalidSpacing);
    }

    Ok((commit_type, scope, bang, subject.trim_end().to_string()))
}

// A footer line is `token ": " value` or `token " #" value`; the token may
// contain internal spaces (`BREAKING CHANGE: ...`). The earliest separator
// wins so values may themselves contain ':' or '#'.
fn footer_line(line: &str) -> Option<Footer> {
    let line = line.trim_end();
    let colon = line.find(':');
    let hash = line.find(" #");

    let (key_end, value_start) = match (colon, hash) {
        (Some(c), Some(h)) if h < c => (h, h + 2),
        (Some(c), _) => (c, c + 1),
        (None, Some(h)) => (h, h + 2),
        (None, None) => return None,
    };

    let key = &line[..key_end];
    let value = line[value_start..].trim();

    if key.is_empty() || value.is_empty() || key != key.trim() {
        return None;
    }
    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_' || c == ' ')
    {
        return None;
    }

    Some(Footer::new(key, value))
}
