//! An ordered URL template router.
//!
//! Templates such as `{controller}/{action}/{id}` are compiled once into a
//! [`RouteTable`]. Each request path is matched against the definitions in
//! registration order; the first one that accepts it wins.
//!
//! ```
//! use mvc_router::{defaults, Method, RouteTable};
//!
//! let mut routes = RouteTable::new();
//! routes
//!     .register_ignore("{resource}.axd/{*pathInfo}")
//!     .register_named(
//!         "Default",
//!         "{controller}/{action}/{id}",
//!         defaults! { controller = "Home", action = "Index", id = optional },
//!     );
//!
//! let m = routes.find(&Method::GET, "~/Customer/List").into_match().unwrap();
//! assert_eq!(m.controller(), Some("Customer"));
//! assert_eq!(m.action(), Some("List"));
//! ```

#![forbid(unsafe_code)]

mod router;
mod strmap;

pub mod template;

#[cfg(feature = "config")]
pub mod config;

pub use crate::router::{
    CompileError, Constraint, Defaults, ExtraValues, GenerateError, Resolution, RouteBuilder,
    RouteDefinition, RouteMatch, RouteTable, RouteValues, UrlGenerator,
};
pub use crate::template::{DefaultValue, Token};

pub use http::Method;
