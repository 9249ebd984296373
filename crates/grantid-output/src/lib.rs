//! Crossref Grant ID XML output generation.

mod grant_xml;

pub use grant_xml::{
    GRANT_ID_NS, RELATIONS_NS, SCHEMA_VERSION, XSI_NS, write_document, write_document_file,
};
