//! Field-mapping and record-assembly engine.
//!
//! The engine turns raw records plus a validated mapping configuration into
//! schema-shaped grants:
//!
//! - **complex**: priority-role selection over nested candidate collections
//! - **related_works**: external-join and embedded-array related works
//! - **coapplicants**: one-to-one joined extra investigators
//! - **assembler**: per-record rule dispatch and grant construction
//! - **document**: header aggregation into the final document
//! - **pipeline**: the sequential batch loop with per-record isolation
//!
//! The engine performs no I/O; sources are loaded by `grantid-ingest` and
//! the document is serialized by `grantid-output`.

pub mod assembler;
pub mod coapplicants;
pub mod complex;
pub mod document;
pub mod pipeline;
pub mod related_works;

pub use assembler::{AssemblyOutput, JoinIndexes, RecordError, assemble_grant};
pub use coapplicants::{CoapplicantIndex, build_coapplicant_index, resolve_coapplicant};
pub use complex::{ComplexSelection, extract_investigators};
pub use document::build_document;
pub use pipeline::{PipelineInput, PipelineOutput, run_pipeline};
pub use related_works::{RelatedWorksIndex, build_related_works_index, resolve_related_works};
