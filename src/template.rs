//! Template compilation.
//!
//! A template is a `/`-separated list of segments. Each segment compiles to
//! exactly one [`Token`]:
//!
//! - `Home`: a literal, compared ignoring case
//! - `{id}`: a parameter bound to one path segment
//! - `{action=Index}` or `{id?}`: a parameter with an inline default
//! - `X{controller}` or `{resource}.axd`: a parameter wrapped in literal text
//! - `{*pathInfo}`: a catch-all, only as the last segment

use crate::router::CompileError;

const SLASH: char = '/';
const TILDE: char = '~';
const OPEN: char = '{';
const CLOSE: char = '}';
const STAR: char = '*';
const EQUALS: char = '=';
const QUESTION: char = '?';

/// The value a parameter takes when the path does not supply one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefaultValue {
    Value(String),
    /// The parameter may be omitted and is then left unbound.
    Optional,
}

impl DefaultValue {
    pub fn as_value(&self) -> Option<&str> {
        match self {
            Self::Value(v) => Some(v.as_str()),
            Self::Optional => None,
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        Self::Value(s.to_owned())
    }
}

impl From<String> for DefaultValue {
    fn from(s: String) -> Self {
        Self::Value(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    Literal(Box<str>),
    Parameter {
        name: Box<str>,
        default: Option<DefaultValue>,
    },
    Hybrid {
        prefix: Box<str>,
        name: Box<str>,
        suffix: Box<str>,
    },
    CatchAll {
        name: Box<str>,
    },
}

impl Token {
    /// The parameter name bound by this token, if any.
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Literal(_) => None,
            Self::Parameter { name, .. } | Self::Hybrid { name, .. } | Self::CatchAll { name } => {
                Some(&**name)
            }
        }
    }

    /// Whether the path may omit the segment for this token.
    pub fn is_defaultable(&self) -> bool {
        match self {
            Self::Parameter { default, .. } => default.is_some(),
            _ => false,
        }
    }

    pub fn is_catch_all(&self) -> bool {
        matches!(self, Self::CatchAll { .. })
    }
}

pub fn compile(template: &str) -> Result<Vec<Token>, CompileError> {
    let trimmed = trim_root(template);
    if trimmed.is_empty() {
        return Err(CompileError::EmptyTemplate);
    }

    let mut tokens: Vec<Token> = Vec::new();
    for part in trimmed.split(SLASH) {
        if part.is_empty() {
            return Err(CompileError::EmptySegment);
        }
        if let Some(Token::CatchAll { name }) = tokens.last() {
            return Err(CompileError::CatchAllNotLast {
                name: name.to_string(),
            });
        }

        let token = parse_segment(part)?;
        if let Some(name) = token.name() {
            let duplicated = tokens
                .iter()
                .filter_map(Token::name)
                .any(|n| n.eq_ignore_ascii_case(name));
            if duplicated {
                return Err(CompileError::DuplicateParameter {
                    name: name.to_owned(),
                });
            }
        }
        tokens.push(token);
    }

    Ok(tokens)
}

/// Strips the app-root marker plus the leading and trailing separator.
pub(crate) fn trim_root(s: &str) -> &str {
    let s = s.strip_prefix(TILDE).unwrap_or(s);
    let s = s.strip_prefix(SLASH).unwrap_or(s);
    s.strip_suffix(SLASH).unwrap_or(s)
}

fn parse_segment(part: &str) -> Result<Token, CompileError> {
    let malformed = || CompileError::MalformedBraces {
        segment: part.to_owned(),
    };

    let open = match part.find(OPEN) {
        Some(i) => i,
        None if part.contains(CLOSE) => return Err(malformed()),
        None => return Ok(Token::Literal(part.into())),
    };
    let close = match part[open..].find(CLOSE) {
        Some(i) => open + i,
        None => return Err(malformed()),
    };

    let prefix = &part[..open];
    let inner = &part[open + 1..close];
    let suffix = &part[close + 1..];

    if prefix.contains(CLOSE) || inner.contains(OPEN) {
        return Err(malformed());
    }
    match (suffix.contains(OPEN), suffix.contains(CLOSE)) {
        (false, false) => {}
        (true, true) => {
            return Err(CompileError::MultipleParameters {
                segment: part.to_owned(),
            })
        }
        _ => return Err(malformed()),
    }

    if let Some(name) = inner.strip_prefix(STAR) {
        if name.contains(EQUALS) || name.ends_with(QUESTION) {
            return Err(CompileError::CatchAllDefault {
                name: name.to_owned(),
            });
        }
        check_name(name)?;
        if !prefix.is_empty() || !suffix.is_empty() {
            return Err(CompileError::CatchAllInComplexSegment {
                name: name.to_owned(),
            });
        }
        return Ok(Token::CatchAll { name: name.into() });
    }

    let (name, default) = match inner.find(EQUALS) {
        Some(i) => (&inner[..i], Some(DefaultValue::from(&inner[i + 1..]))),
        None => match inner.strip_suffix(QUESTION) {
            Some(name) => (name, Some(DefaultValue::Optional)),
            None => (inner, None),
        },
    };
    check_name(name)?;

    if prefix.is_empty() && suffix.is_empty() {
        return Ok(Token::Parameter {
            name: name.into(),
            default,
        });
    }
    if default.is_some() {
        return Err(CompileError::DefaultInComplexSegment {
            name: name.to_owned(),
        });
    }
    Ok(Token::Hybrid {
        prefix: prefix.into(),
        name: name.into(),
        suffix: suffix.into(),
    })
}

fn check_name(name: &str) -> Result<(), CompileError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) => {
            (c.is_ascii_alphabetic() || c == '_')
                && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CompileError::InvalidName {
            name: name.to_owned(),
        })
    }
}
