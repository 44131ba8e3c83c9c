//! Macros for reducing boilerplate when defining document entities
//!
//! These macros generate the repetitive trait implementations needed for
//! each business entity: base fields, Entity/Document impls, constructors,
//! and optionally the per-operation validation configuration.

/// Macro to inject the base document fields into a struct
///
/// Injects: id, type, created_at, updated_at, status, name
#[macro_export]
macro_rules! document_fields {
    () => {
        /// Unique identifier for this document
        pub id: ::uuid::Uuid,

        /// Type of the entity (e.g., "customer", "project")
        #[serde(rename = "type")]
        pub entity_type: String,

        /// When this document was created
        pub created_at: ::chrono::DateTime<::chrono::Utc>,

        /// When this document was last updated
        pub updated_at: ::chrono::DateTime<::chrono::Utc>,

        /// Current status of the document
        pub status: String,

        /// Name of this document
        pub name: String,
    };
}

/// Complete macro to create a document entity with automatic trait
/// implementations
///
/// # Example
///
/// ```rust,ignore
/// use bureau::prelude::*;
///
/// impl_document_entity!(
///     Service,
///     "service",
///     default_status: "active",
///     ["name", "category"],
///     refs: [],
///     {
///         base_price: f64,
///         category: String,
///     }
/// );
///
/// let service = Service::new(
///     "Logo Design".to_string(),
///     "active".to_string(),
///     100.0,
///     "design".to_string(),
/// );
/// ```
#[macro_export]
macro_rules! impl_document_entity {
    (
        $type:ident,
        $type_name:expr,
        default_status: $default_status:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        refs: [ $( ($ref_field:expr, $ref_type:expr) ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $specific_field:ident : $specific_type:ty ),* $(,)?
        }
    ) => {
        #[derive(Debug, Clone, ::serde::Serialize, ::serde::Deserialize)]
        pub struct $type {
            /// Unique identifier for this document
            pub id: ::uuid::Uuid,

            /// Type of the entity
            #[serde(rename = "type")]
            pub entity_type: String,

            /// When this document was created
            pub created_at: ::chrono::DateTime<::chrono::Utc>,

            /// When this document was last updated
            pub updated_at: ::chrono::DateTime<::chrono::Utc>,

            /// Current status of the document
            pub status: String,

            /// Name of this document
            pub name: String,
            $( $(#[$field_meta])* pub $specific_field : $specific_type ),*
        }

        // Implement Entity trait
        impl $crate::core::entity::Entity for $type {
            fn resource_name() -> &'static str {
                use std::sync::OnceLock;
                static PLURAL: OnceLock<String> = OnceLock::new();
                PLURAL.get_or_init(|| {
                    $crate::core::pluralize::Pluralizer::pluralize($type_name)
                }).as_str()
            }

            fn resource_name_singular() -> &'static str {
                $type_name
            }

            fn id(&self) -> ::uuid::Uuid {
                self.id
            }

            fn entity_type(&self) -> &str {
                &self.entity_type
            }

            fn created_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.created_at
            }

            fn updated_at(&self) -> ::chrono::DateTime<::chrono::Utc> {
                self.updated_at
            }

            fn status(&self) -> &str {
                &self.status
            }
        }

        // Implement Document trait
        impl $crate::core::entity::Document for $type {
            fn name(&self) -> &str {
                &self.name
            }

            fn indexed_fields() -> &'static [&'static str] {
                &[ $( $indexed_field ),* ]
            }

            fn field_value(&self, field: &str) -> Option<$crate::core::field::FieldValue> {
                match field {
                    "name" => Some($crate::core::field::FieldValue::String(self.name.clone())),
                    "status" => Some($crate::core::field::FieldValue::String(self.status.clone())),
                    _ => None,
                }
            }

            fn references() -> &'static [(&'static str, &'static str)] {
                &[ $( ($ref_field, $ref_type) ),* ]
            }

            fn default_status() -> &'static str {
                $default_status
            }
        }

        // Utility methods
        impl $type {
            /// Create a new instance of this entity
            pub fn new(
                name: String,
                status: String,
                $( $specific_field: $specific_type ),*
            ) -> Self {
                Self {
                    id: ::uuid::Uuid::new_v4(),
                    entity_type: $type_name.to_string(),
                    created_at: ::chrono::Utc::now(),
                    updated_at: ::chrono::Utc::now(),
                    status,
                    name,
                    $( $specific_field ),*
                }
            }

            /// Update the updated_at timestamp to now
            pub fn touch(&mut self) {
                self.updated_at = ::chrono::Utc::now();
            }

            /// Change the entity status
            pub fn set_status(&mut self, status: String) {
                self.status = status;
                self.touch();
            }
        }
    };
}

/// Extended macro to create a document entity with validation and filtering
///
/// This macro extends `impl_document_entity!` with declarative validation
/// and filtering support consumed by the generic CRUD handlers.
///
/// # Example
///
/// ```rust,ignore
/// impl_document_entity_validated!(
///     Service,
///     "service",
///     default_status: "active",
///     ["name", "category"],
///     refs: [],
///     {
///         base_price: f64,
///         category: String,
///     },
///     validate: {
///         create: {
///             name: [required, string_length(2, 100)],
///             base_price: [required, positive],
///         },
///         update: {
///             base_price: [optional, positive],
///         },
///     },
///     filters: {
///         create: {
///             name: [trim],
///         },
///     }
/// );
/// ```
#[macro_export]
macro_rules! impl_document_entity_validated {
    (
        $type:ident,
        $type_name:expr,
        default_status: $default_status:expr,
        [ $( $indexed_field:expr ),* $(,)? ],
        refs: [ $( ($ref_field:expr, $ref_type:expr) ),* $(,)? ],
        {
            $( $(#[$field_meta:meta])* $specific_field:ident : $specific_type:ty ),* $(,)?
        }
        $(,)?
        validate: {
            $(
                $op:ident: {
                    $(
                        $val_field:ident: [ $( $validator:tt )* ]
                    ),* $(,)?
                }
            ),* $(,)?
        }
        $(,)?
        filters: {
            $(
                $fop:ident: {
                    $(
                        $fil_field:ident: [ $( $filter:tt )* ]
                    ),* $(,)?
                }
            ),* $(,)?
        }
        $(,)?
    ) => {
        // 1. Generate the base entity (reuse existing macro)
        $crate::impl_document_entity!(
            $type,
            $type_name,
            default_status: $default_status,
            [ $( $indexed_field ),* ],
            refs: [ $( ($ref_field, $ref_type) ),* ],
            {
                $( $(#[$field_meta])* $specific_field : $specific_type ),*
            }
        );

        // 2. Implement ValidatableEntity trait for validation support
        impl $crate::core::validation::ValidatableEntity for $type {
            fn validation_config(operation: &str) -> $crate::core::validation::EntityValidationConfig {
                use $crate::core::validation::*;

                let mut config = EntityValidationConfig::new($type_name);

                // Generate filters per operation (filters run first)
                $(
                    if operation == stringify!($fop) {
                        $(
                            $crate::add_filters_for_field!(config, stringify!($fil_field), $( $filter )*);
                        )*
                    }
                )*

                // Generate validation rules per operation
                $(
                    if operation == stringify!($op) {
                        $(
                            $crate::add_validators_for_field!(config, stringify!($val_field), $( $validator )*);
                        )*
                    }
                )*

                config
            }
        }
    };
}

/// Helper macro to add validators to a field
#[macro_export]
macro_rules! add_validators_for_field {
    // Base case: empty
    ($config:expr, $field:expr,) => {};
    ($config:expr, $field:expr) => {};

    // Separator between validators
    ($config:expr, $field:expr, , $( $rest:tt )*) => {
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // required
    ($config:expr, $field:expr, required $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::required());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // optional
    ($config:expr, $field:expr, optional $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::optional());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // positive
    ($config:expr, $field:expr, positive $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::positive());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // email
    ($config:expr, $field:expr, email $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::email());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // phone
    ($config:expr, $field:expr, phone $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::phone());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // uuid_ref
    ($config:expr, $field:expr, uuid_ref $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::uuid_ref());
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // string_length with parameters
    ($config:expr, $field:expr, string_length($min:expr, $max:expr) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::string_length($min, $max));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // in_list with values
    ($config:expr, $field:expr, in_list($( $value:expr ),* $(,)?) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::in_list(vec![$( $value.to_string() ),*]));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };

    // date_format with format string
    ($config:expr, $field:expr, date_format($format:expr) $( $rest:tt )*) => {
        $config.add_validator($field, $crate::core::validation::validators::date_format($format));
        $crate::add_validators_for_field!($config, $field, $( $rest )*);
    };
}

/// Helper macro to add filters to a field
#[macro_export]
macro_rules! add_filters_for_field {
    // Base case: empty
    ($config:expr, $field:expr,) => {};
    ($config:expr, $field:expr) => {};

    // Separator between filters
    ($config:expr, $field:expr, , $( $rest:tt )*) => {
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };

    // trim
    ($config:expr, $field:expr, trim $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::trim());
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };

    // lowercase
    ($config:expr, $field:expr, lowercase $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::lowercase());
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };

    // round_decimals with parameter
    ($config:expr, $field:expr, round_decimals($decimals:expr) $( $rest:tt )*) => {
        $config.add_filter($field, $crate::core::validation::filters::round_decimals($decimals));
        $crate::add_filters_for_field!($config, $field, $( $rest )*);
    };
}
