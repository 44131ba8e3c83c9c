//! Validation and filtering system
//!
//! This module provides a declarative approach to validating and filtering
//! entity data before it reaches the handlers. It integrates with the entity
//! macro system: each entity declares per-operation rules and the generic
//! CRUD handlers run them through [`EntityValidationConfig`].

pub mod config;
pub mod extractor;
pub mod filters;
pub mod validators;

pub use config::EntityValidationConfig;
pub use extractor::{Validated, ValidatableEntity};
