//! Grant ID XML rendering.
//!
//! Renders an assembled [`Document`] as a `doi_batch` conforming to the
//! Crossref Grant ID 0.2.0 schema. Absent values omit their elements; the
//! writer never emits an empty identifier or a placeholder.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use grantid_model::{Document, FunderId, Grant, Person, RelatedWork};

/// Grant ID schema namespace.
pub const GRANT_ID_NS: &str = "http://www.crossref.org/grant_id/0.2.0";

/// Relations namespace carrying related-item programs.
pub const RELATIONS_NS: &str = "http://www.crossref.org/relations.xsd";

/// XML Schema instance namespace.
pub const XSI_NS: &str = "http://www.w3.org/2001/XMLSchema-instance";

/// Grant ID schema version attribute.
pub const SCHEMA_VERSION: &str = "0.2.0";

/// Write a document to a file, creating parent directories as needed.
pub fn write_document_file(output_path: &Path, document: &Document) -> Result<()> {
    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
    }
    let file = File::create(output_path)
        .with_context(|| format!("create {}", output_path.display()))?;
    write_document(BufWriter::new(file), document)
}

/// Render a document as indented Grant ID XML.
pub fn write_document<W: Write>(writer: W, document: &Document) -> Result<()> {
    let mut xml = Writer::new_with_indent(writer, b' ', 2);

    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let mut root = BytesStart::new("doi_batch");
    root.push_attribute(("xmlns", document.namespaces.xmlns.as_str()));
    root.push_attribute(("xmlns:rel", RELATIONS_NS));
    root.push_attribute(("xmlns:xsi", XSI_NS));
    root.push_attribute((
        "xsi:schemaLocation",
        document.namespaces.schema_location.as_str(),
    ));
    root.push_attribute(("version", SCHEMA_VERSION));
    xml.write_event(Event::Start(root))?;

    write_head(&mut xml, document)?;

    xml.write_event(Event::Start(BytesStart::new("body")))?;
    for grant in &document.grants {
        write_grant(&mut xml, grant)?;
    }
    xml.write_event(Event::End(BytesEnd::new("body")))?;

    xml.write_event(Event::End(BytesEnd::new("doi_batch")))?;
    Ok(())
}

fn write_head<W: Write>(xml: &mut Writer<W>, document: &Document) -> Result<()> {
    let head = &document.head;
    xml.write_event(Event::Start(BytesStart::new("head")))?;
    write_text_element(xml, "doi_batch_id", &head.batch_id)?;
    write_text_element(xml, "timestamp", &head.timestamp)?;
    xml.write_event(Event::Start(BytesStart::new("depositor")))?;
    write_text_element(xml, "depositor_name", &head.depositor_name)?;
    write_text_element(xml, "email_address", &head.depositor_email)?;
    xml.write_event(Event::End(BytesEnd::new("depositor")))?;
    write_text_element(xml, "registrant", &head.registrant)?;
    xml.write_event(Event::End(BytesEnd::new("head")))?;
    Ok(())
}

fn write_grant<W: Write>(xml: &mut Writer<W>, grant: &Grant) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("grant")))?;
    write_project(xml, grant)?;
    if let Some(number) = &grant.award_number {
        write_text_element(xml, "award-number", number)?;
    }
    if let Some(date) = &grant.award_start_date {
        write_text_element(xml, "award-start-date", date)?;
    }
    if let Some(date) = &grant.award_end_date {
        write_text_element(xml, "award-end-date", date)?;
    }
    if !grant.related_works.is_empty() {
        write_related_works(xml, &grant.related_works)?;
    }
    write_doi_data(xml, grant)?;
    xml.write_event(Event::End(BytesEnd::new("grant")))?;
    Ok(())
}

fn write_project<W: Write>(xml: &mut Writer<W>, grant: &Grant) -> Result<()> {
    xml.write_event(Event::Start(BytesStart::new("project")))?;
    if let Some(title) = &grant.title {
        write_text_element(xml, "project-title", title)?;
    }
    if !grant.investigators.is_empty() {
        xml.write_event(Event::Start(BytesStart::new("investigators")))?;
        for person in &grant.investigators {
            write_person(xml, person)?;
        }
        xml.write_event(Event::End(BytesEnd::new("investigators")))?;
    }
    if let Some(description) = &grant.description {
        write_text_element(xml, "description", description)?;
    }
    if let Some(amount) = &grant.award_amount {
        let mut element = BytesStart::new("award_amount");
        if let Some(currency) = &grant.currency {
            element.push_attribute(("currency", currency.as_str()));
        }
        xml.write_event(Event::Start(element))?;
        xml.write_event(Event::Text(BytesText::new(amount)))?;
        xml.write_event(Event::End(BytesEnd::new("award_amount")))?;
    }
    write_funding(xml, grant)?;
    xml.write_event(Event::End(BytesEnd::new("project")))?;
    Ok(())
}

fn write_funding<W: Write>(xml: &mut Writer<W>, grant: &Grant) -> Result<()> {
    let mut funding = BytesStart::new("funding");
    funding.push_attribute(("funding-type", grant.funding.funding_type.as_str()));
    xml.write_event(Event::Start(funding))?;
    match &grant.funding.funder {
        Some(FunderId::Ror(ror)) => write_text_element(xml, "ROR", ror)?,
        Some(FunderId::Named { name, id }) => {
            if let Some(name) = name {
                write_text_element(xml, "funder-name", name)?;
            }
            if let Some(id) = id {
                write_text_element(xml, "funder-id", id)?;
            }
        }
        None => {}
    }
    if let Some(scheme) = &grant.funding.scheme {
        write_text_element(xml, "funding-scheme", scheme)?;
    }
    xml.write_event(Event::End(BytesEnd::new("funding")))?;
    Ok(())
}

fn write_person<W: Write>(xml: &mut Writer<W>, person: &Person) -> Result<()> {
    let mut element = BytesStart::new("person");
    element.push_attribute(("role", person.role.as_str()));
    xml.write_event(Event::Start(element))?;
    if let Some(given) = &person.given_name {
        write_text_element(xml, "givenName", given)?;
    }
    if let Some(family) = &person.family_name {
        write_text_element(xml, "familyName", family)?;
    }
    if let Some(affiliation) = &person.affiliation {
        xml.write_event(Event::Start(BytesStart::new("affiliation")))?;
        let mut institution = BytesStart::new("institution");
        if let Some(country) = &affiliation.country {
            institution.push_attribute(("country", country.as_str()));
        }
        xml.write_event(Event::Start(institution))?;
        xml.write_event(Event::Text(BytesText::new(&affiliation.institution)))?;
        xml.write_event(Event::End(BytesEnd::new("institution")))?;
        xml.write_event(Event::End(BytesEnd::new("affiliation")))?;
    }
    if let Some(orcid) = &person.orcid {
        write_text_element(xml, "ORCID", orcid)?;
    }
    xml.write_event(Event::End(BytesEnd::new("person")))?;
    Ok(())
}

fn write_related_works<W: Write>(xml: &mut Writer<W>, works: &[RelatedWork]) -> Result<()> {
    let mut program = BytesStart::new("rel:program");
    program.push_attribute(("name", "relations"));
    xml.write_event(Event::Start(program))?;
    for work in works {
        xml.write_event(Event::Start(BytesStart::new("rel:related_item")))?;
        let mut relation = BytesStart::new("rel:inter_work_relation");
        relation.push_attribute(("relationship-type", work.relationship_type.as_str()));
        relation.push_attribute(("identifier-type", work.identifier.identifier_type()));
        xml.write_event(Event::Start(relation))?;
        xml.write_event(Event::Text(BytesText::new(work.identifier.value())))?;
        xml.write_event(Event::End(BytesEnd::new("rel:inter_work_relation")))?;
        xml.write_event(Event::End(BytesEnd::new("rel:related_item")))?;
    }
    xml.write_event(Event::End(BytesEnd::new("rel:program")))?;
    Ok(())
}

fn write_doi_data<W: Write>(xml: &mut Writer<W>, grant: &Grant) -> Result<()> {
    if grant.doi.is_none() && grant.resource.is_none() {
        return Ok(());
    }
    xml.write_event(Event::Start(BytesStart::new("doi_data")))?;
    if let Some(doi) = &grant.doi {
        write_text_element(xml, "doi", doi)?;
    }
    if let Some(resource) = &grant.resource {
        write_text_element(xml, "resource", resource)?;
    }
    xml.write_event(Event::End(BytesEnd::new("doi_data")))?;
    Ok(())
}

/// Write a simple text element.
fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(name)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}
