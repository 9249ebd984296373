pub mod document;
pub mod ids;
pub mod record;
pub mod report;

pub use document::{
    Affiliation, Document, DocumentHead, FunderId, Funding, Grant, Namespaces, Person, PersonRole,
    RelatedWork, RelatedWorkId,
};
pub use ids::RecordId;
pub use record::{RawRecord, scalar_to_string};
pub use report::{FieldWarning, RunReport, SkippedRecord};
