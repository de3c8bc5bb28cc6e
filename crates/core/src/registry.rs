//! Registry of node types.
//!
//! Each registration ties a type name to the fetcher that loads entities
//! of that type and to the classifier that recognises them once loaded.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{RegistryError, RegistryResult, RelayError, RelayResult};
use crate::ports::NodeFetcher;

/// Predicate deciding whether a resolved entity belongs to a node type.
pub type Classifier<E> = Box<dyn Fn(&E) -> bool + Send + Sync>;

struct Registration<E> {
    type_name: String,
    fetcher: Arc<dyn NodeFetcher<E>>,
    classifier: Classifier<E>,
}

/// Registry of node types, populated once at start-up.
///
/// The registry is built with `&mut self` and then shared behind an `Arc`;
/// nothing mutates it afterwards.
///
/// # Example
///
/// ```ignore
/// let mut registry = TypeRegistry::new();
/// registry.register(
///     "Video",
///     Arc::new(VideoFetcher::new(store.clone())),
///     |entity: &Entity| matches!(entity, Entity::Video(_)),
/// )?;
///
/// let resolver = NodeResolver::new(Arc::new(registry));
/// ```
pub struct TypeRegistry<E> {
    by_name: HashMap<String, usize>,
    registrations: Vec<Registration<E>>,
}

impl<E> TypeRegistry<E> {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            by_name: HashMap::new(),
            registrations: Vec::new(),
        }
    }

    /// Register a node type.
    ///
    /// Classifiers are consulted in registration order.
    pub fn register<C>(
        &mut self,
        type_name: impl Into<String>,
        fetcher: Arc<dyn NodeFetcher<E>>,
        classifier: C,
    ) -> RegistryResult<()>
    where
        C: Fn(&E) -> bool + Send + Sync + 'static,
    {
        let type_name = type_name.into();
        if self.by_name.contains_key(&type_name) {
            return Err(RegistryError::DuplicateType(type_name));
        }

        info!(node_type = %type_name, "🧩 Registering node type");
        self.by_name
            .insert(type_name.clone(), self.registrations.len());
        self.registrations.push(Registration {
            type_name,
            fetcher,
            classifier: Box::new(classifier),
        });
        Ok(())
    }

    /// Fetch an entity of a registered type by local id.
    ///
    /// Returns `Ok(None)` when the fetcher finds nothing.
    pub async fn fetch(&self, type_name: &str, local_id: &str) -> RelayResult<Option<E>> {
        let index = self
            .by_name
            .get(type_name)
            .ok_or_else(|| RelayError::UnknownType(type_name.to_string()))?;

        let entity = self.registrations[*index].fetcher.fetch(local_id).await?;
        if entity.is_none() {
            debug!(node_type = type_name, local_id, "Node not found");
        }
        Ok(entity)
    }

    /// Determine the type name of a resolved entity.
    ///
    /// Returns the first registration (in registration order) whose
    /// classifier matches, or `None` if none does.
    pub fn classify(&self, entity: &E) -> Option<&str> {
        self.registrations
            .iter()
            .find(|r| (r.classifier)(entity))
            .map(|r| r.type_name.as_str())
    }

    /// Check if a type name is registered.
    pub fn contains(&self, type_name: &str) -> bool {
        self.by_name.contains_key(type_name)
    }

    /// Registered type names in registration order.
    pub fn type_names(&self) -> Vec<&str> {
        self.registrations
            .iter()
            .map(|r| r.type_name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }
}

impl<E> Default for TypeRegistry<E> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::error::{StoreError, StoreResult};

    /// Fetcher over a fixed set of JSON objects keyed by `id`.
    struct JsonFetcher(Vec<Value>);

    #[async_trait]
    impl NodeFetcher<Value> for JsonFetcher {
        async fn fetch(&self, local_id: &str) -> StoreResult<Option<Value>> {
            Ok(self.0.iter().find(|v| v["id"] == local_id).cloned())
        }
    }

    struct FailingFetcher;

    #[async_trait]
    impl NodeFetcher<Value> for FailingFetcher {
        async fn fetch(&self, _: &str) -> StoreResult<Option<Value>> {
            Err(StoreError::Unavailable("replica down".into()))
        }
    }

    fn registry() -> TypeRegistry<Value> {
        let mut registry: TypeRegistry<Value> = TypeRegistry::new();
        registry
            .register(
                "Video",
                Arc::new(JsonFetcher(vec![json!({"id": "a", "title": "Intro"})])),
                |v: &Value| v.get("title").is_some(),
            )
            .unwrap();
        registry
            .register(
                "Course",
                Arc::new(JsonFetcher(vec![json!({"id": "c1", "lessons": 3})])),
                |v: &Value| v.get("lessons").is_some(),
            )
            .unwrap();
        registry
    }

    // Test critique: un type enregistré deux fois est refusé
    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry();
        let result = registry.register("Video", Arc::new(JsonFetcher(vec![])), |_: &Value| false);

        assert!(matches!(result, Err(RegistryError::DuplicateType(ref t)) if t == "Video"));
        assert_eq!(registry.len(), 2);
    }

    #[tokio::test]
    async fn test_fetch_dispatches_by_type() {
        let registry = registry();

        let video = registry.fetch("Video", "a").await.unwrap().unwrap();
        assert_eq!(video["title"], "Intro");
        let course = registry.fetch("Course", "c1").await.unwrap().unwrap();
        assert_eq!(course["lessons"], 3);
    }

    // Test critique: "introuvable" n'est pas une erreur, un type inconnu si
    #[tokio::test]
    async fn test_fetch_missing_vs_unknown_type() {
        let registry = registry();

        assert!(registry.fetch("Video", "missing-id").await.unwrap().is_none());
        assert!(matches!(
            registry.fetch("Playlist", "a").await,
            Err(RelayError::UnknownType(ref t)) if t == "Playlist"
        ));
    }

    #[tokio::test]
    async fn test_fetch_propagates_store_failure() {
        let mut registry: TypeRegistry<Value> = TypeRegistry::new();
        registry
            .register("Video", Arc::new(FailingFetcher), |_: &Value| true)
            .unwrap();

        assert!(matches!(
            registry.fetch("Video", "a").await,
            Err(RelayError::Store(StoreError::Unavailable(_)))
        ));
    }

    // Test critique: le premier classificateur qui correspond gagne (ordre d'enregistrement)
    #[test]
    fn test_classify_uses_registration_order() {
        let registry = registry();

        assert_eq!(registry.classify(&json!({"title": "x"})), Some("Video"));
        assert_eq!(registry.classify(&json!({"lessons": 1})), Some("Course"));
        // Les deux correspondent: Video est enregistré en premier
        assert_eq!(
            registry.classify(&json!({"title": "x", "lessons": 1})),
            Some("Video")
        );
        assert_eq!(registry.classify(&json!({"name": "?"})), None);
        assert_eq!(registry.type_names(), vec!["Video", "Course"]);
    }
}
