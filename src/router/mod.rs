mod constraint;
mod core;
mod definition;
mod error;
mod generate;
mod imp;
mod values;

pub use self::constraint::Constraint;
pub use self::core::{Resolution, RouteMatch};
pub use self::definition::{Defaults, RouteBuilder};
pub use self::error::{CompileError, GenerateError};
pub use self::generate::{ExtraValues, UrlGenerator};
pub use self::values::RouteValues;

use crate::strmap::StrMap;
use crate::template::Token;

use http::Method;
use smallvec::SmallVec;

/// An ordered list of route definitions. The first definition that matches wins.
#[derive(Debug, Default, Clone)]
pub struct RouteTable {
    definitions: Vec<RouteDefinition>,
}

/// A compiled template with its defaults, constraints and method filter.
#[derive(Debug, Clone)]
pub struct RouteDefinition {
    name: Option<Box<str>>,
    template: Box<str>,
    tokens: Vec<Token>,
    defaults: Defaults,
    constraints: StrMap<Constraint>,
    methods: SmallVec<[Method; 2]>,
    ignore: bool,
    /// tokens before the catch-all
    fixed: usize,
    /// path segments that can not be omitted
    required: usize,
}
