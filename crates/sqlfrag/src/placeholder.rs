//! Placeholder formats and the final `?` rewrite.
//!
//! Fragments always render the neutral `?` marker. A statement rewrites the
//! markers exactly once, after assembly, so nested fragments never need to know
//! their position in the final argument list. `??` escapes a literal `?`.

use crate::error::{QbError, QbResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// How `?` markers are written in the final SQL.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PlaceholderFormat {
    /// Leave `?` markers as they are (MySQL, SQLite).
    #[default]
    Question,
    /// Sequentially numbered markers behind a prefix char: `$1, $2, ...`.
    Numbered(char),
    /// Named markers: `@p1, @p2, ...` (SQL Server).
    Named,
}

impl PlaceholderFormat {
    /// `$1, $2, ...` (PostgreSQL).
    pub const DOLLAR: Self = PlaceholderFormat::Numbered('$');

    /// `:1, :2, ...` (Oracle).
    pub const COLON: Self = PlaceholderFormat::Numbered(':');

    /// Rewrite every `?` marker in `sql`.
    ///
    /// The counter restarts at 1 on every call.
    pub fn replace_placeholders(self, sql: &str) -> String {
        let mut out = String::with_capacity(sql.len() + 8);
        let mut n = 0usize;
        let mut chars = sql.chars().peekable();
        while let Some(ch) = chars.next() {
            if ch != '?' {
                out.push(ch);
                continue;
            }
            if chars.peek() == Some(&'?') {
                chars.next();
                // `Question` output keeps the escape as written.
                match self {
                    PlaceholderFormat::Question => out.push_str("??"),
                    _ => out.push('?'),
                }
                continue;
            }
            n += 1;
            match self {
                PlaceholderFormat::Question => out.push('?'),
                PlaceholderFormat::Numbered(prefix) => {
                    out.push(prefix);
                    out.push_str(&n.to_string());
                }
                PlaceholderFormat::Named => {
                    out.push_str("@p");
                    out.push_str(&n.to_string());
                }
            }
        }
        out
    }

    fn name(self) -> String {
        match self {
            PlaceholderFormat::Question => "question".to_string(),
            PlaceholderFormat::Numbered('$') => "dollar".to_string(),
            PlaceholderFormat::Numbered(':') => "colon".to_string(),
            PlaceholderFormat::Numbered(prefix) => format!("numbered:{}", prefix),
            PlaceholderFormat::Named => "named".to_string(),
        }
    }
}

/// Count `?` markers in `sql`, not counting `??` escapes.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch != '?' {
            continue;
        }
        if chars.peek() == Some(&'?') {
            chars.next();
            continue;
        }
        count += 1;
    }
    count
}

/// Check marker/argument parity, then rewrite markers.
pub(crate) fn finish(sql: &str, args: usize, format: PlaceholderFormat) -> QbResult<String> {
    let placeholders = count_placeholders(sql);
    if placeholders != args {
        return Err(QbError::PlaceholderMismatch { placeholders, args });
    }
    Ok(format.replace_placeholders(sql))
}

impl fmt::Display for PlaceholderFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for PlaceholderFormat {
    type Err = QbError;

    /// Accepts `question`, `dollar`, `colon`, `named` and `numbered:<char>`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        const NUMBERED: &str = "numbered:";

        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "question" | "?" => return Ok(PlaceholderFormat::Question),
            "dollar" | "$" => return Ok(PlaceholderFormat::DOLLAR),
            "colon" | ":" => return Ok(PlaceholderFormat::COLON),
            "named" | "atp" => return Ok(PlaceholderFormat::Named),
            _ => {}
        }
        // Only the keyword is case-insensitive; the prefix char is kept as written.
        let prefix = trimmed
            .get(..NUMBERED.len())
            .filter(|keyword| keyword.eq_ignore_ascii_case(NUMBERED))
            .map(|_| &trimmed[NUMBERED.len()..]);
        let mut chars = prefix.unwrap_or_default().chars();
        match (chars.next(), chars.next()) {
            (Some(p), None) if p != '?' => Ok(PlaceholderFormat::Numbered(p)),
            _ => Err(QbError::UnknownPlaceholderFormat(s.to_string())),
        }
    }
}

impl Serialize for PlaceholderFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name())
    }
}

impl<'de> Deserialize<'de> for PlaceholderFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
