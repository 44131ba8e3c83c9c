//! Configuration-driven panels: descriptors interpreted by generic headless
//! form, table and modal renderers.
//!
//! A page composes a renderer with a configuration naming an endpoint and a
//! list of field/column descriptors; the renderer validates, fetches and
//! submits JSON through a [`Transport`](crate::client::Transport) and keeps
//! its own recoverable state. Nothing here knows about concrete entities:
//! the per-entity configurations live next to the entity definitions.

pub mod descriptor;
pub mod error;
pub mod form;
pub mod modal;
pub mod options;
pub mod table;

pub use descriptor::{
    ColumnDescriptor, ColumnKind, FieldDescriptor, FieldKind, FieldOption, FieldRules, FormConfig,
    FormMethod, ModalConfig, ModalKind, TableConfig,
};
pub use error::PanelError;
pub use form::FormRenderer;
pub use modal::ModalView;
pub use table::TableView;
