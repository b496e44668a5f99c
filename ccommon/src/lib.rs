//! Shared newtypes and utilities for the confab workspace crates.
//!
//! ```rust
//! use ccommon::{GenerationOptions, MetadataMap, SessionId, TraceId};
//!
//! let session = SessionId::from("session-1");
//! let trace = TraceId::new("trace-1");
//! let mut metadata = MetadataMap::new();
//! metadata.insert("tenant".to_string(), "acme".to_string());
//!
//! let options = GenerationOptions::default().with_temperature(0.3).enable_streaming();
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(trace.to_string(), "trace-1");
//! assert!(options.stream);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use ccommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Cross-crate identifier newtypes and the shared metadata map.

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    pub type MetadataMap = HashMap<String, String>;

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq, Hash)]
    pub struct TraceId(String);

    impl TraceId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for TraceId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for TraceId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for TraceId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub mod model {
    //! Shared generation settings used by provider request types.

    #[derive(Debug, Clone, Copy, PartialEq, Default)]
    pub struct GenerationOptions {
        pub temperature: Option<f32>,
        pub max_tokens: Option<u32>,
        pub stream: bool,
    }

    impl GenerationOptions {
        pub fn with_temperature(mut self, temperature: f32) -> Self {
            self.temperature = Some(temperature);
            self
        }

        pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
            self.max_tokens = Some(max_tokens);
            self
        }

        pub fn with_streaming(mut self, stream: bool) -> Self {
            self.stream = stream;
            self
        }

        pub fn enable_streaming(self) -> Self {
            self.with_streaming(true)
        }
    }
}

pub mod registry {
    //! Insertion-ordered registry map used by runtime registries.
    //!
    //! Iteration order is registration order, which matters to callers that
    //! surface registry contents as an ordered list (tool schemas sent to a
    //! model provider, for example).
    //!
    //! ```rust
    //! use ccommon::OrderedRegistry;
    //!
    //! let mut registry = OrderedRegistry::new();
    //! registry.insert("beta".to_string(), 2_u32);
    //! registry.insert("alpha".to_string(), 1_u32);
    //!
    //! let keys: Vec<_> = registry.keys().collect();
    //! assert_eq!(keys, vec!["beta", "alpha"]);
    //! ```

    use std::borrow::Borrow;
    use std::collections::HashMap;
    use std::hash::Hash;

    #[derive(Debug, Clone)]
    pub struct OrderedRegistry<K, V> {
        entries: Vec<(K, V)>,
        index: HashMap<K, usize>,
    }

    impl<K, V> Default for OrderedRegistry<K, V>
    where
        K: Eq + Hash,
    {
        fn default() -> Self {
            Self {
                entries: Vec::new(),
                index: HashMap::new(),
            }
        }
    }

    impl<K, V> OrderedRegistry<K, V>
    where
        K: Eq + Hash + Clone,
    {
        pub fn new() -> Self {
            Self::default()
        }

        /// Inserts a value, returning the previous value registered under the
        /// same key. Re-inserting keeps the key's original position.
        pub fn insert(&mut self, key: K, value: V) -> Option<V> {
            if let Some(&position) = self.index.get(&key) {
                let (_, slot) = &mut self.entries[position];
                return Some(std::mem::replace(slot, value));
            }

            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, value));
            None
        }

        pub fn get<Q>(&self, key: &Q) -> Option<&V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.index
                .get(key)
                .map(|&position| &self.entries[position].1)
        }

        pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            let position = self.index.remove(key)?;
            let (_, value) = self.entries.remove(position);
            for (_, slot) in self.index.iter_mut() {
                if *slot > position {
                    *slot -= 1;
                }
            }

            Some(value)
        }

        pub fn contains_key<Q>(&self, key: &Q) -> bool
        where
            K: Borrow<Q>,
            Q: Eq + Hash + ?Sized,
        {
            self.index.contains_key(key)
        }

        pub fn keys(&self) -> impl Iterator<Item = &K> {
            self.entries.iter().map(|(key, _)| key)
        }

        pub fn values(&self) -> impl Iterator<Item = &V> {
            self.entries.iter().map(|(_, value)| value)
        }

        pub fn len(&self) -> usize {
            self.entries.len()
        }

        pub fn is_empty(&self) -> bool {
            self.entries.is_empty()
        }
    }
}

pub use context::{MetadataMap, SessionId, TraceId};
pub use future::BoxFuture;
pub use model::GenerationOptions;
pub use registry::OrderedRegistry;

#[cfg(test)]
mod tests {
    use super::{GenerationOptions, OrderedRegistry, SessionId, TraceId};

    #[test]
    fn id_newtypes_round_trip_strings() {
        let session = SessionId::new("session-1");
        let trace = TraceId::from("trace-1");

        assert_eq!(session.as_str(), "session-1");
        assert_eq!(trace.as_str(), "trace-1");
        assert_eq!(session.to_string(), "session-1");
        assert_eq!(trace.to_string(), "trace-1");
    }

    #[test]
    fn generation_options_builder_helpers_set_values() {
        let options = GenerationOptions::default()
            .with_temperature(0.3)
            .with_max_tokens(123)
            .enable_streaming();

        assert_eq!(options.temperature, Some(0.3));
        assert_eq!(options.max_tokens, Some(123));
        assert!(options.stream);
    }

    #[test]
    fn ordered_registry_preserves_insertion_order() {
        let mut registry = OrderedRegistry::new();
        registry.insert("gamma".to_string(), 3_u32);
        registry.insert("alpha".to_string(), 1_u32);
        registry.insert("beta".to_string(), 2_u32);

        let keys: Vec<_> = registry.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["gamma", "alpha", "beta"]);

        let values: Vec<_> = registry.values().copied().collect();
        assert_eq!(values, vec![3, 1, 2]);
    }

    #[test]
    fn ordered_registry_reinsert_keeps_position_and_returns_previous() {
        let mut registry = OrderedRegistry::new();
        registry.insert("alpha".to_string(), 1_u32);
        registry.insert("beta".to_string(), 2_u32);

        let previous = registry.insert("alpha".to_string(), 10);
        assert_eq!(previous, Some(1));

        let keys: Vec<_> = registry.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "beta"]);
        assert_eq!(registry.get("alpha"), Some(&10));
    }

    #[test]
    fn ordered_registry_remove_shifts_later_entries() {
        let mut registry = OrderedRegistry::new();
        registry.insert("alpha".to_string(), 1_u32);
        registry.insert("beta".to_string(), 2_u32);
        registry.insert("gamma".to_string(), 3_u32);

        assert_eq!(registry.remove("beta"), Some(2));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.get("gamma"), Some(&3));

        let keys: Vec<_> = registry.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["alpha", "gamma"]);
    }
}
