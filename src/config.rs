//! Route tables declared in TOML.
//!
//! ```toml
//! [[routes]]
//! template = "{resource}.axd/{*pathInfo}"
//! ignore = true
//!
//! [[routes]]
//! name = "Default"
//! template = "{controller}/{action}/{id}"
//! defaults = { controller = "Home", action = "Index" }
//! optional = ["id"]
//! constraints = { id = "\\d+" }
//! methods = ["GET", "HEAD"]
//! ```
//!
//! Entries are registered in file order.

use crate::router::{CompileError, RouteDefinition, RouteTable};

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use http::Method;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("route {index}: invalid method {method:?}")]
    Method { index: usize, method: String },

    #[error("route {index} ({template:?}): {source}")]
    Route {
        index: usize,
        template: String,
        source: CompileError,
    },
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RouteConfig {
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    #[serde(default)]
    pub name: Option<String>,

    pub template: String,

    #[serde(default)]
    pub defaults: BTreeMap<String, String>,

    /// Parameters that may be left out of the path without a default value.
    #[serde(default)]
    pub optional: Vec<String>,

    /// Regex constraints, matched against the whole value.
    #[serde(default)]
    pub constraints: BTreeMap<String, String>,

    /// Empty allows every method.
    #[serde(default)]
    pub methods: Vec<String>,

    #[serde(default)]
    pub ignore: bool,
}

impl RouteConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

impl RouteEntry {
    fn to_definition(&self, index: usize) -> Result<RouteDefinition, ConfigError> {
        let mut builder = RouteDefinition::builder(self.template.as_str()).ignore(self.ignore);

        if let Some(ref name) = self.name {
            builder = builder.name(name.as_str());
        }
        for (name, value) in &self.defaults {
            builder = builder.default(name, value.as_str());
        }
        for name in &self.optional {
            builder = builder.optional(name);
        }
        for (name, pattern) in &self.constraints {
            builder = builder.regex(name.as_str(), pattern.as_str());
        }
        for method in &self.methods {
            let parsed = Method::from_bytes(method.to_ascii_uppercase().as_bytes()).map_err(|_| {
                ConfigError::Method {
                    index,
                    method: method.clone(),
                }
            })?;
            builder = builder.method(parsed);
        }

        builder.build().map_err(|source| ConfigError::Route {
            index,
            template: self.template.clone(),
            source,
        })
    }
}

impl RouteTable {
    pub fn from_config(config: &RouteConfig) -> Result<Self, ConfigError> {
        let mut table = Self::new();
        for (index, entry) in config.routes.iter().enumerate() {
            table.add(entry.to_definition(index)?);
        }
        debug!(routes = table.len(), "route table loaded");
        Ok(table)
    }
}
