use indexmap::IndexMap;
use std::any::Any;

/// Shared host state passed to every extension unit during dispatch.
///
/// Conventions may have ordering dependencies on properties mutated by
/// earlier units, which is why dispatch is always sequential.
#[derive(Default)]
pub struct ConventionContext {
    properties: IndexMap<String, Box<dyn Any + Send + Sync>>,
}

impl ConventionContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a typed property, replacing any previous value under the key.
    pub fn insert<T: Any + Send + Sync>(&mut self, key: impl Into<String>, value: T) {
        self.properties.insert(key.into(), Box::new(value));
    }

    /// Get a property, `None` if absent or of a different type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.properties.get(key).and_then(|v| v.downcast_ref())
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.properties.get_mut(key).and_then(|v| v.downcast_mut())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_properties() {
        let mut ctx = ConventionContext::new();
        ctx.insert("count", 3usize);
        assert_eq!(ctx.get::<usize>("count"), Some(&3));
        assert_eq!(ctx.get::<String>("count"), None);

        *ctx.get_mut::<usize>("count").unwrap() += 1;
        assert_eq!(ctx.get::<usize>("count"), Some(&4));
    }
}
