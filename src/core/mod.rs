//! Core abstractions: entity traits, field values, errors, envelope,
//! service traits and the validation system.

pub mod entity;
pub mod envelope;
pub mod error;
pub mod field;
pub mod pluralize;
pub mod service;
pub mod validation;

pub use entity::{Document, Entity};
pub use envelope::ApiResponse;
pub use error::{Error, Result};
pub use field::{FieldFormat, FieldValue};
pub use service::{DataService, EntityFetcher};
