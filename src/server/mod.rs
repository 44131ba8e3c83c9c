//! HTTP server assembly: entity registry, builder, health routes

pub mod builder;
pub mod entity_registry;
pub mod rest;

pub use builder::ServerBuilder;
pub use entity_registry::{CrudDescriptor, EntityDescriptor, EntityRegistry};
pub use rest::RestExposure;
