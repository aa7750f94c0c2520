use super::{CompileError, Constraint, RouteDefinition};

use crate::strmap::StrMap;
use crate::template::{self, DefaultValue, Token};

use std::iter::FromIterator;

use http::Method;
use smallvec::SmallVec;

/// Default values keyed by parameter name, ignoring case.
#[derive(Debug, Clone, Default)]
pub struct Defaults {
    map: StrMap<DefaultValue>,
}

impl Defaults {
    pub fn new() -> Self {
        Self { map: StrMap::new() }
    }

    pub fn set(&mut self, name: &str, value: DefaultValue) -> &mut Self {
        self.map.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: &str, value: impl Into<String>) -> &mut Self {
        self.set(name, DefaultValue::Value(value.into()))
    }

    pub fn insert_optional(&mut self, name: &str) -> &mut Self {
        self.set(name, DefaultValue::Optional)
    }

    pub fn get(&self, name: &str) -> Option<&DefaultValue> {
        self.map.find(name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.map.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DefaultValue)> + '_ {
        self.map.iter()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<'a, V: Into<DefaultValue>> FromIterator<(&'a str, V)> for Defaults {
    fn from_iter<I: IntoIterator<Item = (&'a str, V)>>(iter: I) -> Self {
        let mut defaults = Self::new();
        for (name, value) in iter {
            defaults.set(name, value.into());
        }
        defaults
    }
}

/// Builds a `Defaults` from `name = "value"` and `name = optional` pairs.
///
/// ```
/// let defaults = mvc_router::defaults! {
///     controller = "Home",
///     action = "Index",
///     id = optional,
/// };
/// assert_eq!(defaults.len(), 3);
/// ```
#[macro_export]
macro_rules! defaults {
    {@entry $defaults:ident;} => {};
    {@entry $defaults:ident; $name:ident = optional $(, $($rest:tt)*)?} => {
        $defaults.insert_optional(stringify!($name));
        $crate::defaults!(@entry $defaults; $($($rest)*)?);
    };
    {@entry $defaults:ident; $name:ident = $value:expr $(, $($rest:tt)*)?} => {
        $defaults.insert(stringify!($name), $value);
        $crate::defaults!(@entry $defaults; $($($rest)*)?);
    };

    {} => { $crate::Defaults::new() };
    {$($body:tt)+} => {{
        let mut __defaults = $crate::Defaults::new();
        $crate::defaults!(@entry __defaults; $($body)+);
        __defaults
    }};
}

#[derive(Debug)]
enum PendingConstraint {
    Ready(Constraint),
    Pattern(String),
}

#[derive(Debug)]
pub struct RouteBuilder {
    template: String,
    name: Option<String>,
    defaults: Defaults,
    constraints: Vec<(String, PendingConstraint)>,
    methods: SmallVec<[Method; 2]>,
    ignore: bool,
}

impl RouteBuilder {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn defaults(mut self, defaults: Defaults) -> Self {
        for (name, value) in defaults.iter() {
            self.defaults.set(name, value.clone());
        }
        self
    }

    pub fn default(mut self, name: &str, value: impl Into<String>) -> Self {
        self.defaults.insert(name, value);
        self
    }

    pub fn optional(mut self, name: &str) -> Self {
        self.defaults.insert_optional(name);
        self
    }

    pub fn constraint(mut self, name: impl Into<String>, constraint: Constraint) -> Self {
        self.constraints
            .push((name.into(), PendingConstraint::Ready(constraint)));
        self
    }

    /// Adds a regex constraint, compiled when the route is built.
    pub fn regex(mut self, name: impl Into<String>, pattern: impl Into<String>) -> Self {
        self.constraints
            .push((name.into(), PendingConstraint::Pattern(pattern.into())));
        self
    }

    pub fn method(mut self, method: Method) -> Self {
        if !self.methods.contains(&method) {
            self.methods.push(method);
        }
        self
    }

    pub fn methods(self, methods: impl IntoIterator<Item = Method>) -> Self {
        methods.into_iter().fold(self, RouteBuilder::method)
    }

    pub fn ignore(mut self, ignore: bool) -> Self {
        self.ignore = ignore;
        self
    }

    pub fn build(self) -> Result<RouteDefinition, CompileError> {
        let mut tokens = template::compile(&self.template)?;
        let mut defaults = self.defaults;

        for token in tokens.iter_mut() {
            if let Token::Parameter { name, default } = token {
                match (default.take(), defaults.get(name).cloned()) {
                    (Some(_), Some(_)) => {
                        return Err(CompileError::ConflictingDefault {
                            name: name.to_string(),
                        })
                    }
                    (Some(inline), None) => {
                        defaults.set(name, inline.clone());
                        *default = Some(inline);
                    }
                    (None, explicit) => *default = explicit,
                }
            }
        }

        let mut constraints = StrMap::new();
        for (name, pending) in self.constraints {
            let constraint = match pending {
                PendingConstraint::Ready(c) => c,
                PendingConstraint::Pattern(p) => {
                    Constraint::regex(&p).map_err(|e| CompileError::InvalidConstraint {
                        name: name.clone(),
                        reason: e.to_string(),
                    })?
                }
            };
            constraints.insert(&name, constraint);
        }

        let fixed = tokens.iter().take_while(|t| !t.is_catch_all()).count();
        let optional_tail = tokens[..fixed]
            .iter()
            .rev()
            .take_while(|t| t.is_defaultable())
            .count();

        Ok(RouteDefinition {
            name: self.name.map(Into::into),
            template: self.template.into(),
            tokens,
            defaults,
            constraints,
            methods: self.methods,
            ignore: self.ignore,
            fixed,
            required: fixed - optional_tail,
        })
    }
}

impl RouteDefinition {
    pub fn builder(template: impl Into<String>) -> RouteBuilder {
        RouteBuilder {
            template: template.into(),
            name: None,
            defaults: Defaults::new(),
            constraints: Vec::new(),
            methods: SmallVec::new(),
            ignore: false,
        }
    }

    pub fn new(template: &str, defaults: Defaults) -> Result<Self, CompileError> {
        Self::builder(template).defaults(defaults).build()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn defaults(&self) -> &Defaults {
        &self.defaults
    }

    pub fn constraint(&self, name: &str) -> Option<&Constraint> {
        self.constraints.find(name)
    }

    pub fn constraints(&self) -> impl Iterator<Item = (&str, &Constraint)> + '_ {
        self.constraints.iter()
    }

    pub fn methods(&self) -> &[Method] {
        &self.methods
    }

    pub fn is_ignore(&self) -> bool {
        self.ignore
    }

    /// An empty method set allows every method.
    pub fn allows_method(&self, method: &Method) -> bool {
        self.methods.is_empty() || self.methods.contains(method)
    }

    /// The inclusive range of path segment counts this definition accepts;
    /// `None` as upper bound when a catch-all is present.
    pub fn segment_range(&self) -> (usize, Option<usize>) {
        if self.has_catch_all() {
            (self.required, None)
        } else {
            (self.required, Some(self.fixed))
        }
    }

    pub fn accepts_segments(&self, count: usize) -> bool {
        match self.segment_range() {
            (min, _) if count < min => false,
            (_, Some(max)) => count <= max,
            (_, None) => true,
        }
    }

    pub(super) fn has_catch_all(&self) -> bool {
        self.tokens.len() > self.fixed
    }

    pub(super) fn fixed_tokens(&self) -> &[Token] {
        &self.tokens[..self.fixed]
    }

    pub(super) fn catch_all_name(&self) -> Option<&str> {
        self.tokens[self.fixed..].first().and_then(Token::name)
    }

    pub(super) fn has_token(&self, name: &str) -> bool {
        self.tokens
            .iter()
            .filter_map(Token::name)
            .any(|n| n.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn build_merges_defaults_into_tokens() {
        let def = RouteDefinition::builder("{controller}/{action}/{id}")
            .defaults(defaults! {
                controller = "Home",
                action = "Index",
                id = optional,
            })
            .build()
            .unwrap();

        assert_eq!(def.segment_range(), (0, Some(3)));
        assert!(def.tokens().iter().all(Token::is_defaultable));
        assert_eq!(
            def.defaults().get("ID"),
            Some(&DefaultValue::Optional)
        );
    }

    #[test]
    fn build_collects_inline_defaults() {
        let def = RouteDefinition::new("{controller=Home}/{action=Index}", Defaults::new()).unwrap();
        assert_eq!(
            def.defaults().get("action").and_then(DefaultValue::as_value),
            Some("Index")
        );
        assert_eq!(def.segment_range(), (0, Some(2)));
    }

    #[test]
    fn inline_and_explicit_default_conflict() {
        let err = RouteDefinition::builder("{controller=Home}")
            .default("controller", "Home")
            .build()
            .unwrap_err();
        assert_eq!(
            err,
            CompileError::ConflictingDefault {
                name: "controller".into()
            }
        );
    }

    #[test]
    fn segment_ranges() {
        let hybrid = RouteDefinition::builder("X{controller}/{action}")
            .default("controller", "Home")
            .build()
            .unwrap();
        assert_eq!(hybrid.segment_range(), (2, Some(2)));

        let mid_default = RouteDefinition::builder("{lang=en}/docs/{page?}")
            .build()
            .unwrap();
        assert_eq!(mid_default.segment_range(), (2, Some(3)));

        let catch_all = RouteDefinition::new("{resource}.axd/{*pathInfo}", Defaults::new()).unwrap();
        assert_eq!(catch_all.segment_range(), (1, None));
        assert_eq!(catch_all.catch_all_name(), Some("pathInfo"));
        assert!(catch_all.accepts_segments(7));
        assert!(!catch_all.accepts_segments(0));
    }

    #[test]
    fn invalid_regex_constraint() {
        let err = RouteDefinition::builder("{id}")
            .regex("id", "(")
            .build()
            .unwrap_err();
        match err {
            CompileError::InvalidConstraint { name, .. } => assert_eq!(name, "id"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn method_filter() {
        let def = RouteDefinition::builder("{controller}")
            .methods(vec![Method::GET, Method::HEAD, Method::GET])
            .build()
            .unwrap();
        assert_eq!(def.methods().len(), 2);
        assert!(def.allows_method(&Method::HEAD));
        assert!(!def.allows_method(&Method::POST));

        let any = RouteDefinition::new("{controller}", Defaults::new()).unwrap();
        assert!(any.allows_method(&Method::DELETE));
    }

    #[test]
    fn defaults_macro_accepts_expressions() {
        let home = "home";
        let defaults = defaults! {
            controller = home.to_ascii_uppercase(),
            action = format!("{}{}", "In", "dex"),
            id = optional
        };
        assert_eq!(defaults.len(), 3);
        assert_eq!(defaults.get("controller").and_then(DefaultValue::as_value), Some("HOME"));
        assert_eq!(defaults.get("action").and_then(DefaultValue::as_value), Some("Index"));
        assert_eq!(defaults.get("id"), Some(&DefaultValue::Optional));
        assert!(defaults! {}.is_empty());
    }
}
