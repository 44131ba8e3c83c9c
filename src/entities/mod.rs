//! Business document entities
//!
//! Each entity is defined through `impl_document_entity_validated!`: base
//! fields + specific fields, per-operation validation rules, and the panel
//! configuration (form fields, table columns) its management pages use.

pub mod macros;

pub mod contract;
pub mod customer;
pub mod project;
pub mod service;
pub mod service_request;
pub mod task;
pub mod team;
pub mod transaction;
pub mod user;

pub use contract::Contract;
pub use customer::Customer;
pub use project::Project;
pub use service::Service;
pub use service_request::ServiceRequest;
pub use task::Task;
pub use team::Team;
pub use transaction::Transaction;
pub use user::User;
