use super::{CompileError, Defaults, RouteDefinition, RouteTable};

use tracing::debug;

impl RouteTable {
    pub fn new() -> Self {
        Self {
            definitions: Vec::new(),
        }
    }

    pub fn definitions(&self) -> &[RouteDefinition] {
        &self.definitions
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    pub fn get_named(&self, name: &str) -> Option<&RouteDefinition> {
        self.definitions
            .iter()
            .find(|d| d.name().map_or(false, |n| n.eq_ignore_ascii_case(name)))
    }

    pub fn add(&mut self, definition: RouteDefinition) -> &mut Self {
        debug!(
            template = definition.template(),
            name = ?definition.name(),
            ignore = definition.is_ignore(),
            index = self.definitions.len(),
            "route registered"
        );
        self.definitions.push(definition);
        self
    }

    pub fn register(&mut self, template: &str, defaults: Defaults) -> &mut Self {
        if let Err(e) = self.try_register(template, defaults) {
            panic!("{}: template = {:?}", e, template);
        }
        self
    }

    pub fn try_register(
        &mut self,
        template: &str,
        defaults: Defaults,
    ) -> Result<&mut Self, CompileError> {
        let definition = RouteDefinition::new(template, defaults)?;
        Ok(self.add(definition))
    }

    pub fn register_named(&mut self, name: &str, template: &str, defaults: Defaults) -> &mut Self {
        if let Err(e) = self.try_register_named(name, template, defaults) {
            panic!("{}: template = {:?}", e, template);
        }
        self
    }

    pub fn try_register_named(
        &mut self,
        name: &str,
        template: &str,
        defaults: Defaults,
    ) -> Result<&mut Self, CompileError> {
        let definition = RouteDefinition::builder(template)
            .name(name)
            .defaults(defaults)
            .build()?;
        Ok(self.add(definition))
    }

    /// Registers a template whose matches are excluded from dispatch.
    pub fn register_ignore(&mut self, template: &str) -> &mut Self {
        if let Err(e) = self.try_register_ignore(template) {
            panic!("{}: template = {:?}", e, template);
        }
        self
    }

    pub fn try_register_ignore(&mut self, template: &str) -> Result<&mut Self, CompileError> {
        let definition = RouteDefinition::builder(template).ignore(true).build()?;
        Ok(self.add(definition))
    }
}

impl<'a> IntoIterator for &'a RouteTable {
    type Item = &'a RouteDefinition;
    type IntoIter = std::slice::Iter<'a, RouteDefinition>;
    fn into_iter(self) -> Self::IntoIter {
        self.definitions.iter()
    }
}
