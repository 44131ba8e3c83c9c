//! Entity traits defining the core abstraction for all document types

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all persisted documents.
///
/// This trait provides the fundamental metadata needed for any entity type.
/// All entities have:
/// - id: Unique identifier
/// - type: Entity type name (e.g., "customer", "project")
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - status: Current status of the entity
///
/// There is no soft deletion and no versioning: a DELETE removes the
/// document, and updates replace it in place.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "customers", "companies")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "customer", "company")
    fn resource_name_singular() -> &'static str;

    // === Core Entity Fields ===

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the entity type name
    fn entity_type(&self) -> &str;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the entity status
    fn status(&self) -> &str;

    // === Utility Methods ===

    /// Check if the entity is in the "active" status
    fn is_active(&self) -> bool {
        self.status() == "active"
    }
}

/// Trait for document entities that represent concrete business objects.
///
/// Documents extend the base Entity with:
/// - name: A human-readable name
/// - indexed_fields: Fields that can be searched
/// - field_value: Dynamic field access
/// - references: Reference fields resolved by populate
pub trait Document: Entity {
    /// Get the name of this document
    fn name(&self) -> &str;

    /// List of fields that should be indexed for searching
    fn indexed_fields() -> &'static [&'static str];

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<crate::core::field::FieldValue>;

    /// Reference fields as `(field_name, referenced_entity_type)` pairs.
    ///
    /// The populate mechanism resolves each listed field's UUID into the
    /// referenced document when `?populate=true` is requested.
    fn references() -> &'static [(&'static str, &'static str)] {
        &[]
    }

    /// The status assigned to newly created documents when the request
    /// body does not carry one.
    fn default_status() -> &'static str {
        "active"
    }
}
