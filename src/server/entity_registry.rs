//! Entity registry for managing entity descriptors and auto-generating CRUD
//! routes

use axum::{Router, routing::get};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::{self, EntityState};
use crate::core::entity::{Document, Entity};
use crate::core::service::{DataService, EntityFetcher, ServiceFetcher};
use crate::core::validation::ValidatableEntity;

/// Map of entity type name → fetcher, shared by all handlers for populate
pub type FetcherMap = HashMap<String, Arc<dyn EntityFetcher>>;

/// Trait that describes how to build routes for an entity
///
/// Each registered entity provides its CRUD routes and a fetcher used to
/// resolve references pointing at it. Routes are built once the full fetcher
/// map is known, so populate wiring happens at build time rather than
/// through a mutable global registry.
pub trait EntityDescriptor: Send + Sync {
    /// The entity type name (singular, e.g., "customer")
    fn entity_type(&self) -> &str;

    /// The plural form (e.g., "customers")
    fn plural(&self) -> &str;

    /// Build the CRUD routes for this entity
    fn build_routes(&self, fetchers: Arc<FetcherMap>) -> Router;

    /// Fetcher resolving this entity type for populate
    fn fetcher(&self) -> Arc<dyn EntityFetcher>;
}

/// The standard descriptor: full CRUD under `/api/{plural}`
pub struct CrudDescriptor<T: Document> {
    service: Arc<dyn DataService<T>>,
}

impl<T: Document> CrudDescriptor<T> {
    pub fn new(service: Arc<dyn DataService<T>>) -> Self {
        Self { service }
    }
}

impl<T> EntityDescriptor for CrudDescriptor<T>
where
    T: Document + ValidatableEntity + Serialize + DeserializeOwned,
{
    fn entity_type(&self) -> &str {
        T::resource_name_singular()
    }

    fn plural(&self) -> &str {
        T::resource_name()
    }

    fn build_routes(&self, fetchers: Arc<FetcherMap>) -> Router {
        let state = EntityState {
            service: self.service.clone(),
            fetchers,
        };

        Router::new()
            .route(
                &format!("/api/{}", T::resource_name()),
                get(api::list_entities::<T>).post(api::create_entity::<T>),
            )
            .route(
                &format!("/api/{}/{{id}}", T::resource_name()),
                get(api::get_entity::<T>)
                    .put(api::update_entity::<T>)
                    .patch(api::update_entity::<T>)
                    .delete(api::delete_entity::<T>),
            )
            .with_state(state)
    }

    fn fetcher(&self) -> Arc<dyn EntityFetcher> {
        Arc::new(ServiceFetcher::new(self.service.clone()))
    }
}

/// Registry for all entities in the application
///
/// Collects entity descriptors at startup and generates a router with all
/// CRUD routes plus the fetcher map used for populate.
#[derive(Default)]
pub struct EntityRegistry {
    descriptors: HashMap<String, Box<dyn EntityDescriptor>>,
}

impl EntityRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            descriptors: HashMap::new(),
        }
    }

    /// Register an entity descriptor
    ///
    /// The entity type name is the key; registering the same type twice
    /// replaces the earlier descriptor.
    pub fn register(&mut self, descriptor: Box<dyn EntityDescriptor>) {
        let entity_type = descriptor.entity_type().to_string();
        self.descriptors.insert(entity_type, descriptor);
    }

    /// Build the fetcher map over all registered entities
    pub fn build_fetchers(&self) -> FetcherMap {
        self.descriptors
            .iter()
            .map(|(name, descriptor)| (name.clone(), descriptor.fetcher()))
            .collect()
    }

    /// Build a router with all registered entity routes
    pub fn build_routes(&self, fetchers: Arc<FetcherMap>) -> Router {
        let mut router = Router::new();

        for descriptor in self.descriptors.values() {
            router = router.merge(descriptor.build_routes(fetchers.clone()));
        }

        router
    }

    /// Get all registered entity types
    pub fn entity_types(&self) -> Vec<&str> {
        self.descriptors.keys().map(|s| s.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Customer, Service};
    use crate::storage::InMemoryDataService;

    fn service_descriptor() -> Box<dyn EntityDescriptor> {
        Box::new(CrudDescriptor::<Service>::new(Arc::new(
            InMemoryDataService::new(),
        )))
    }

    #[test]
    fn test_new_registry_is_empty() {
        let registry = EntityRegistry::new();
        assert!(registry.entity_types().is_empty());
    }

    #[test]
    fn test_register_single_entity() {
        let mut registry = EntityRegistry::new();
        registry.register(service_descriptor());
        let types = registry.entity_types();
        assert_eq!(types.len(), 1);
        assert!(types.contains(&"service"));
    }

    #[test]
    fn test_register_duplicate_replaces() {
        let mut registry = EntityRegistry::new();
        registry.register(service_descriptor());
        registry.register(service_descriptor());
        assert_eq!(registry.entity_types().len(), 1);
    }

    #[test]
    fn test_fetcher_map_covers_registered_types() {
        let mut registry = EntityRegistry::new();
        registry.register(service_descriptor());
        registry.register(Box::new(CrudDescriptor::<Customer>::new(Arc::new(
            InMemoryDataService::new(),
        ))));

        let fetchers = registry.build_fetchers();
        assert_eq!(fetchers.len(), 2);
        assert!(fetchers.contains_key("service"));
        assert!(fetchers.contains_key("customer"));
    }

    #[test]
    fn test_build_routes_does_not_panic() {
        let mut registry = EntityRegistry::new();
        registry.register(service_descriptor());
        let fetchers = Arc::new(registry.build_fetchers());
        let _router = registry.build_routes(fetchers);
    }
}
