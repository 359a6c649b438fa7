use super::{Component, Diagnostic};
use indexmap::IndexMap;

/// Accumulator threaded through the graph walk
///
/// Components are keyed by identifier and keep first-insertion order.
#[derive(Debug, Clone, Default)]
pub struct ComponentInventory {
    components: IndexMap<String, Component>,
    diagnostics: Vec<Diagnostic>,
}

impl ComponentInventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.components.contains_key(identifier)
    }

    /// Inserts a component unless its identifier is already present.
    /// Returns whether the component was inserted.
    pub fn insert(&mut self, component: Component) -> bool {
        if self.contains(component.identifier()) {
            return false;
        }
        self.components
            .insert(component.identifier().to_string(), component);
        true
    }

    pub fn record(&mut self, diagnostics: impl IntoIterator<Item = Diagnostic>) {
        self.diagnostics.extend(diagnostics);
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn components(&self) -> impl Iterator<Item = &Component> {
        self.components.values()
    }

    pub fn identifiers(&self) -> Vec<&str> {
        self.components.keys().map(String::as_str).collect()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Components in first-discovery order, plus the collected diagnostics
    pub fn into_parts(self) -> (Vec<Component>, Vec<Diagnostic>) {
        (self.components.into_values().collect(), self.diagnostics)
    }
}
