use super::{GenerateError, RouteDefinition, RouteTable, RouteValues};

use crate::template::{DefaultValue, Token};

use tracing::trace;
use url::form_urlencoded;

/// What to do with supplied values the chosen route does not consume.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtraValues {
    AppendQuery,
    Drop,
}

impl Default for ExtraValues {
    fn default() -> Self {
        Self::AppendQuery
    }
}

/// Produces paths from route values, the reverse of [`RouteTable::find`].
#[derive(Debug, Clone, Copy)]
pub struct UrlGenerator<'t> {
    table: &'t RouteTable,
    extra: ExtraValues,
}

struct Piece {
    /// `None` for an optional parameter with no value
    text: Option<String>,
    droppable: bool,
}

impl<'t> UrlGenerator<'t> {
    pub fn new(table: &'t RouteTable) -> Self {
        Self {
            table,
            extra: ExtraValues::default(),
        }
    }

    pub fn extra_values(mut self, extra: ExtraValues) -> Self {
        self.extra = extra;
        self
    }

    pub fn generate(
        &self,
        controller: &str,
        action: &str,
        params: &[(&str, &str)],
    ) -> Result<String, GenerateError> {
        let mut values: RouteValues = params.iter().copied().collect();
        values.insert("controller", controller);
        values.insert("action", action);
        self.generate_values(&values)
    }

    /// Uses the first non-ignore definition able to represent `values`.
    pub fn generate_values(&self, values: &RouteValues) -> Result<String, GenerateError> {
        self.table
            .iter()
            .filter(|d| !d.is_ignore())
            .find_map(|d| self.build_path(d, values))
            .ok_or(GenerateError::NoDefinitionFound)
    }

    pub fn generate_named(&self, name: &str, values: &RouteValues) -> Result<String, GenerateError> {
        let definition = match self.table.get_named(name) {
            Some(d) if !d.is_ignore() => d,
            _ => {
                return Err(GenerateError::UnknownRouteName {
                    name: name.to_owned(),
                })
            }
        };
        self.build_path(definition, values)
            .ok_or(GenerateError::NoDefinitionFound)
    }

    fn build_path(&self, definition: &RouteDefinition, values: &RouteValues) -> Option<String> {
        let defaults = definition.defaults();

        for (name, default) in defaults.iter() {
            if definition.has_token(name) {
                continue;
            }
            if let (Some(given), Some(expected)) = (values.get(name), default.as_value()) {
                if !given.eq_ignore_ascii_case(expected) {
                    trace!(template = definition.template(), name, "default mismatch");
                    return None;
                }
            }
        }

        for (name, constraint) in definition.constraints() {
            let effective = values
                .get(name)
                .or_else(|| defaults.get(name).and_then(DefaultValue::as_value));
            if let Some(value) = effective {
                if !constraint.is_match(value) {
                    trace!(template = definition.template(), name, value, "constraint failed");
                    return None;
                }
            }
        }

        let mut pieces: Vec<Piece> = Vec::with_capacity(definition.tokens().len());
        for token in definition.tokens() {
            pieces.push(build_piece(token, values)?);
        }

        while pieces.last().map_or(false, |p| p.droppable) {
            pieces.pop();
        }

        let mut path = String::from("/");
        for (i, piece) in pieces.iter().enumerate() {
            if i > 0 {
                path.push('/');
            }
            path.push_str(piece.text.as_deref()?);
        }

        if self.extra == ExtraValues::AppendQuery {
            let mut query = form_urlencoded::Serializer::new(String::new());
            let mut any = false;
            for (name, value) in values.iter() {
                if definition.has_token(name) || defaults.contains_key(name) {
                    continue;
                }
                query.append_pair(name, value);
                any = true;
            }
            if any {
                path.push('?');
                path.push_str(&query.finish());
            }
        }

        trace!(template = definition.template(), path = %path, "generated");
        Some(path)
    }
}

fn build_piece(token: &Token, values: &RouteValues) -> Option<Piece> {
    let piece = match token {
        Token::Literal(text) => Piece {
            text: Some(text.to_string()),
            droppable: false,
        },
        Token::Hybrid {
            prefix,
            name,
            suffix,
        } => {
            let value = supplied(values, name).filter(|v| !v.contains('/'))?;
            Piece {
                text: Some(format!("{}{}{}", prefix, value, suffix)),
                droppable: false,
            }
        }
        Token::Parameter { name, default } => {
            let value = supplied(values, name);
            if value.map_or(false, |v| v.contains('/')) {
                return None;
            }
            match (value, default) {
                (Some(v), Some(DefaultValue::Value(d))) => Piece {
                    text: Some(v.to_owned()),
                    droppable: v.eq_ignore_ascii_case(d),
                },
                (Some(v), _) => Piece {
                    text: Some(v.to_owned()),
                    droppable: false,
                },
                (None, Some(DefaultValue::Value(d))) => Piece {
                    text: Some(d.clone()),
                    droppable: true,
                },
                (None, Some(DefaultValue::Optional)) => Piece {
                    text: None,
                    droppable: true,
                },
                (None, None) => return None,
            }
        }
        Token::CatchAll { name } => match supplied(values, name) {
            // a trailing separator is trimmed again when the path is matched
            Some(v) if v.ends_with('/') => return None,
            Some(v) => Piece {
                text: Some(v.to_owned()),
                droppable: false,
            },
            None => Piece {
                text: None,
                droppable: true,
            },
        },
    };
    Some(piece)
}

fn supplied<'v>(values: &'v RouteValues, name: &str) -> Option<&'v str> {
    values.get(name).filter(|v| !v.is_empty())
}
