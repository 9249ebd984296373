//! Declarative mapping configuration for grant registration.
//!
//! A configuration names every output field and the rule that produces it,
//! declares nested-collection extraction specs, and describes how secondary
//! sources (related works, co-applicants) join onto the primary dataset.
//! Everything is validated at load time; record processing only ever sees
//! the closed types in [`types`].

pub mod error;
mod loader;
mod raw;
pub mod types;

pub use error::ConfigError;
pub use types::{
    CoapplicantsConfig, ComplexFieldMap, ComplexFieldSpec, Config, CountrySource, EmbeddedConfig,
    EngineOptions, ExternalJoinConfig, FieldMapping, HeaderStatics, LeadPersonSpec, MappingRule,
    PersonAffiliationSpec, PersonNameSpec, RelatedWorksConfig, TransformSpec,
};
