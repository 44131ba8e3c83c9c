//! # Bureau
//!
//! A business-management API built around configuration-driven CRUD.
//!
//! ## Features
//!
//! - **Document Entities**: Customer, Contract, Project, Service, Task, Team,
//!   User, Transaction... defined through a declarative macro
//! - **Generic CRUD Routes**: one handler set instantiated per entity, all
//!   returning the uniform `{success, data|error}` envelope
//! - **Declarative Validation**: per-operation validators and filters attached
//!   to each entity
//! - **Populate**: reference fields (`customer_id`, `project_id`, ...) resolved
//!   into full documents on demand
//! - **JWT Authentication**: phone-number + password login for staff and
//!   customers, HS256 tokens with role/permission claims
//! - **Panels**: field/column descriptors interpreted by generic headless
//!   form, table and modal renderers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bureau::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .register::<Service>(Arc::new(InMemoryDataService::new()))
//!     .register::<Customer>(Arc::new(InMemoryDataService::new()))
//!     .build()?;
//! ```

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod core;
pub mod entities;
pub mod panels;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Document, Entity},
        envelope::ApiResponse,
        error::{AuthError, EntityError, Error, RequestError, ValidationError},
        field::{FieldFormat, FieldValue},
        service::{DataService, EntityFetcher},
    };

    // === Macros ===
    pub use crate::{document_fields, impl_document_entity, impl_document_entity_validated};

    // === Entities ===
    pub use crate::entities::{
        Contract, Customer, Project, Service, ServiceRequest, Task, Team, Transaction, User,
    };

    // === Auth ===
    pub use crate::auth::{
        context::{AuthContext, AuthPolicy},
        jwt::{Claims, JwtConfig, SubjectKind},
    };

    // === Storage ===
    pub use crate::storage::InMemoryDataService;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoDataService;

    // === Panels ===
    pub use crate::panels::{
        descriptor::{
            ColumnDescriptor, FieldDescriptor, FieldKind, FieldOption, FieldRules, FormConfig,
            FormMethod, ModalConfig, ModalKind, TableConfig,
        },
        form::FormRenderer,
        modal::ModalView,
        table::TableView,
    };

    // === Client ===
    pub use crate::client::{HttpTransport, RecordingTransport, Transport};

    // === Server ===
    pub use crate::server::{EntityDescriptor, EntityRegistry, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, State},
        routing::{delete, get, patch, post, put},
    };
}
