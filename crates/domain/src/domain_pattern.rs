use crate::errors::DomainError;
use fancy_regex::Regex;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Shell-style glob over a query name: `*`, `?`, `[seq]` and `[!seq]`.
///
/// Matching is anchored at both ends and case-sensitive. Query names are
/// compared exactly as received, so `*.corp.local` does not match
/// `DB.CORP.LOCAL`.
#[derive(Debug, Clone)]
pub struct DomainPattern {
    source: Arc<str>,
    regex: Regex,
}

impl DomainPattern {
    pub fn new(pattern: &str) -> Result<Self, DomainError> {
        if pattern.is_empty() {
            return Err(DomainError::InvalidDomainPattern {
                pattern: String::new(),
                reason: "pattern cannot be empty".to_string(),
            });
        }

        let regex = Regex::new(&translate(pattern)).map_err(|e| {
            DomainError::InvalidDomainPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self {
            source: Arc::from(pattern),
            regex,
        })
    }

    #[inline]
    pub fn matches(&self, name: &str) -> bool {
        self.regex.is_match(name).unwrap_or(false)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for DomainPattern {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl PartialEq for DomainPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for DomainPattern {}

impl fmt::Display for DomainPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

fn translate(pattern: &str) -> String {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2 + 2);
    out.push('^');

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        i += 1;

        match c {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => {
                let mut j = i;
                if j < chars.len() && chars[j] == '!' {
                    j += 1;
                }
                // A ']' right after the opening bracket is a literal member.
                if j < chars.len() && chars[j] == ']' {
                    j += 1;
                }
                while j < chars.len() && chars[j] != ']' {
                    j += 1;
                }

                if j >= chars.len() {
                    out.push_str("\\[");
                    continue;
                }

                push_class(&mut out, &chars[i..j]);
                i = j + 1;
            }
            _ => push_literal(&mut out, c),
        }
    }

    out.push('$');
    out
}

fn push_class(out: &mut String, body: &[char]) {
    out.push('[');

    let members = match body.first() {
        Some('!') => {
            out.push('^');
            &body[1..]
        }
        Some('^') => {
            out.push_str("\\^");
            &body[1..]
        }
        _ => body,
    };

    for &ch in members {
        if matches!(ch, '\\' | '[' | ']' | '&' | '~') {
            out.push('\\');
        }
        out.push(ch);
    }

    out.push(']');
}

fn push_literal(out: &mut String, c: char) {
    if matches!(
        c,
        '\\' | '.' | '+' | '*' | '?' | '(' | ')' | '|' | '[' | ']' | '{' | '}' | '^' | '$'
    ) {
        out.push('\\');
    }
    out.push(c);
}
