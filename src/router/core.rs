use super::{RouteDefinition, RouteTable, RouteValues};

use crate::template::{trim_root, DefaultValue, Token};

use http::Method;
use smallvec::SmallVec;
use tracing::trace;

const SLASH: char = '/';

/// A successful match: the definition that accepted the path and the values
/// it bound, with defaults merged in.
#[derive(Debug, Clone)]
pub struct RouteMatch<'r> {
    definition: &'r RouteDefinition,
    values: RouteValues,
}

impl<'r> RouteMatch<'r> {
    pub fn definition(&self) -> &'r RouteDefinition {
        self.definition
    }

    pub fn values(&self) -> &RouteValues {
        &self.values
    }

    pub fn into_values(self) -> RouteValues {
        self.values
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name)
    }

    pub fn controller(&self) -> Option<&str> {
        self.values.get("controller")
    }

    pub fn action(&self) -> Option<&str> {
        self.values.get("action")
    }
}

#[derive(Debug, Clone)]
pub enum Resolution<'r> {
    Matched(RouteMatch<'r>),
    /// An ignore route accepted the path; it must not be dispatched.
    Ignored(&'r RouteDefinition),
    NotFound,
}

impl<'r> Resolution<'r> {
    pub fn is_matched(&self) -> bool {
        matches!(self, Self::Matched(_))
    }

    pub fn is_ignored(&self) -> bool {
        matches!(self, Self::Ignored(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }

    pub fn as_match(&self) -> Option<&RouteMatch<'r>> {
        match self {
            Self::Matched(m) => Some(m),
            _ => None,
        }
    }

    pub fn into_match(self) -> Option<RouteMatch<'r>> {
        match self {
            Self::Matched(m) => Some(m),
            _ => None,
        }
    }
}

impl RouteTable {
    /// Walks the definitions in registration order and returns the first
    /// one that accepts `method` and `path`.
    pub fn find(&self, method: &Method, path: &str) -> Resolution<'_> {
        let path = trim_root(path);
        let parts: SmallVec<[&str; 8]> = if path.is_empty() {
            SmallVec::new()
        } else {
            path.split(SLASH).collect()
        };

        for (index, definition) in self.definitions.iter().enumerate() {
            if !definition.allows_method(method) {
                trace!(index, %method, "method not allowed");
                continue;
            }
            let values = match definition.match_parts(path, &parts) {
                Some(v) => v,
                None => continue,
            };
            if definition.is_ignore() {
                trace!(index, path, template = definition.template(), "ignored");
                return Resolution::Ignored(definition);
            }
            trace!(index, path, template = definition.template(), "matched");
            return Resolution::Matched(RouteMatch { definition, values });
        }

        trace!(path, "no route matched");
        Resolution::NotFound
    }
}

impl RouteDefinition {
    fn match_parts(&self, path: &str, parts: &[&str]) -> Option<RouteValues> {
        if !self.accepts_segments(parts.len()) {
            return None;
        }

        let mut values = RouteValues::new();

        for (i, token) in self.fixed_tokens().iter().enumerate() {
            match parts.get(i) {
                Some(part) => bind_segment(token, part, &mut values)?,
                None => {
                    // the segment range guarantees every missing token is defaultable
                    if let Token::Parameter {
                        name,
                        default: Some(DefaultValue::Value(v)),
                    } = token
                    {
                        values.insert(&**name, v.as_str());
                    }
                }
            }
        }

        if let Some(name) = self.catch_all_name() {
            let rest = match parts.get(self.fixed) {
                Some(first) => &path[calc_offset(path, first)..],
                None => self
                    .defaults
                    .get(name)
                    .and_then(DefaultValue::as_value)
                    .unwrap_or(""),
            };
            values.insert(name, rest);
        }

        for (name, default) in self.defaults.iter() {
            if let DefaultValue::Value(v) = default {
                if !values.contains_key(name) {
                    values.insert(name, v.as_str());
                }
            }
        }

        for (name, constraint) in self.constraints.iter() {
            if let Some(value) = values.get(name) {
                if !constraint.is_match(value) {
                    trace!(template = self.template(), name, value, "constraint failed");
                    return None;
                }
            }
        }

        Some(values)
    }
}

fn bind_segment(token: &Token, part: &str, values: &mut RouteValues) -> Option<()> {
    match token {
        Token::Literal(text) => {
            if !part.eq_ignore_ascii_case(text) {
                return None;
            }
        }
        Token::Parameter { name, .. } => {
            if part.is_empty() {
                return None;
            }
            values.insert(&**name, part);
        }
        Token::Hybrid {
            prefix,
            name,
            suffix,
        } => {
            let value = strip_hybrid(part, prefix, suffix)?;
            values.insert(&**name, value);
        }
        Token::CatchAll { .. } => return None,
    }
    Some(())
}

/// Strips the literal text around a hybrid parameter, leaving a non-empty value.
fn strip_hybrid<'p>(part: &'p str, prefix: &str, suffix: &str) -> Option<&'p str> {
    if part.len() <= prefix.len() + suffix.len() {
        return None;
    }
    let end = part.len() - suffix.len();
    let head = part.get(..prefix.len())?;
    let tail = part.get(end..)?;
    if !head.eq_ignore_ascii_case(prefix) || !tail.eq_ignore_ascii_case(suffix) {
        return None;
    }
    part.get(prefix.len()..end)
}

#[inline(always)]
fn calc_offset(src: &str, dst: &str) -> usize {
    (dst.as_ptr() as usize) - (src.as_ptr() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{defaults, Constraint, Defaults};
    use pretty_assertions::assert_eq;

    fn single(template: &str, defaults: Defaults) -> RouteTable {
        let mut table = RouteTable::new();
        table.register(template, defaults);
        table
    }

    #[test]
    fn strip_hybrid_prefix_and_suffix() {
        assert_eq!(strip_hybrid("XHome", "X", ""), Some("Home"));
        assert_eq!(strip_hybrid("xhome", "X", ""), Some("home"));
        assert_eq!(strip_hybrid("X", "X", ""), None);
        assert_eq!(strip_hybrid("Home", "X", ""), None);
        assert_eq!(strip_hybrid("WebResource.AXD", "", ".axd"), Some("WebResource"));
        assert_eq!(strip_hybrid("é", "X", ""), None);
    }

    #[test]
    fn missing_segments_take_defaults() {
        let table = single(
            "{controller}/{action}/{id}",
            defaults! { controller = "Home", action = "Index", id = optional },
        );

        let m = table.find(&Method::GET, "~/").into_match().unwrap();
        assert_eq!(m.controller(), Some("Home"));
        assert_eq!(m.action(), Some("Index"));
        assert!(m.get("id").is_none());

        let m = table.find(&Method::GET, "/Customer/List/7").into_match().unwrap();
        assert_eq!(m.get("ID"), Some("7"));
    }

    #[test]
    fn catch_all_binds_raw_rest() {
        let table = single("files/{*path}", Defaults::new());

        let m = table.find(&Method::GET, "/files/a/b/c.txt").into_match().unwrap();
        assert_eq!(m.get("path"), Some("a/b/c.txt"));

        let m = table.find(&Method::GET, "/files").into_match().unwrap();
        assert_eq!(m.get("path"), Some(""));

        let table = single("files/{*path}", defaults! { path = "index.html" });
        let m = table.find(&Method::GET, "/files").into_match().unwrap();
        assert_eq!(m.get("path"), Some("index.html"));
    }

    #[test]
    fn literals_ignore_case() {
        let table = single("admin/{action}", Defaults::new());
        assert!(table.find(&Method::GET, "/ADMIN/users").is_matched());
        assert!(table.find(&Method::GET, "/admins/users").is_not_found());
    }

    #[test]
    fn empty_segment_does_not_bind() {
        let table = single("{controller}/{action}", Defaults::new());
        assert!(table.find(&Method::GET, "//Index").is_not_found());
    }

    #[test]
    fn constraint_failure_falls_through() {
        let mut table = RouteTable::new();
        table
            .add(
                RouteDefinition::builder("{controller}/{action}/{id}")
                    .constraint("id", Constraint::Integer)
                    .name("numeric")
                    .build()
                    .unwrap(),
            )
            .register("{controller}/{action}/{slug}", Defaults::new());

        let m = table.find(&Method::GET, "/post/show/12").into_match().unwrap();
        assert_eq!(m.definition().name(), Some("numeric"));
        assert_eq!(m.get("id"), Some("12"));

        let m = table.find(&Method::GET, "/post/show/hello").into_match().unwrap();
        assert_eq!(m.definition().name(), None);
        assert_eq!(m.get("slug"), Some("hello"));
    }

    #[test]
    fn constraint_checks_default_values() {
        let mut table = RouteTable::new();
        table.add(
            RouteDefinition::builder("{controller}/{page=first}")
                .regex("page", r"\d+")
                .build()
                .unwrap(),
        );
        assert!(table.find(&Method::GET, "/blog/3").is_matched());
        assert!(table.find(&Method::GET, "/blog").is_not_found());
    }

    #[test]
    fn defaults_for_keys_without_tokens_are_merged() {
        let table = single("shop/{id}", defaults! { controller = "Product", action = "Details" });
        let m = table.find(&Method::GET, "/shop/9").into_match().unwrap();
        assert!(m
            .values()
            .matches_expected(&[("controller", "Product"), ("action", "Details"), ("id", "9")]));
    }

    #[test]
    fn constraint_checks_defaults_without_tokens() {
        let mut table = RouteTable::new();
        table.add(
            RouteDefinition::builder("shop/{id}")
                .defaults(defaults! { controller = "Product", action = "Details" })
                .regex("controller", "home")
                .build()
                .unwrap(),
        );
        assert!(table.find(&Method::GET, "/shop/9").is_not_found());

        let mut table = RouteTable::new();
        table.add(
            RouteDefinition::builder("shop/{id}")
                .defaults(defaults! { controller = "Product", action = "Details" })
                .regex("controller", "product")
                .build()
                .unwrap(),
        );
        let m = table.find(&Method::GET, "/shop/9").into_match().unwrap();
        assert_eq!(m.controller(), Some("Product"));
    }
}
