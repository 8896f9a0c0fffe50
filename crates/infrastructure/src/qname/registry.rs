use super::component::LabelComponent;
use super::components::{
    HostnameComponent, IpComponent, KeywordComponent, MicrosecondsComponent, RandomAlphaComponent,
    RandomAlphanumericComponent, RandomBase32Component, RandomNumericComponent,
    TimestampComponent, UniqueComponent,
};
use super::errors::CodecError;
use super::sequence::{AtomicSequence, SequenceSource};
use std::collections::HashMap;
use std::sync::Arc;

/// Label components addressable by their `$` id.
#[derive(Default, Clone)]
pub struct ComponentRegistry {
    components: HashMap<&'static str, Arc<dyn LabelComponent>>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// All built-in components, with `$uniq` counting from a fresh sequence.
    pub fn with_defaults() -> Self {
        Self::with_default_components(Arc::new(AtomicSequence::new()))
    }

    pub fn with_default_components(sequence: Arc<dyn SequenceSource>) -> Self {
        let builtin: [Arc<dyn LabelComponent>; 10] = [
            Arc::new(KeywordComponent),
            Arc::new(IpComponent),
            Arc::new(TimestampComponent),
            Arc::new(MicrosecondsComponent),
            Arc::new(HostnameComponent),
            Arc::new(UniqueComponent::new(sequence)),
            Arc::new(RandomAlphaComponent),
            Arc::new(RandomNumericComponent),
            Arc::new(RandomAlphanumericComponent),
            Arc::new(RandomBase32Component),
        ];

        let mut registry = Self::new();
        for component in builtin {
            registry.components.insert(component.id(), component);
        }
        registry
    }

    pub fn register(&mut self, component: Arc<dyn LabelComponent>) -> Result<(), CodecError> {
        let id = component.id();
        if self.components.contains_key(id) {
            return Err(CodecError::DuplicateComponent(id.to_string()));
        }
        self.components.insert(id, component);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Result<&Arc<dyn LabelComponent>, CodecError> {
        self.components
            .get(id)
            .ok_or_else(|| CodecError::UnknownComponent(id.to_string()))
    }

    /// Registered ids, sorted.
    pub fn ids(&self) -> Vec<&'static str> {
        let mut ids: Vec<_> = self.components.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }
}
