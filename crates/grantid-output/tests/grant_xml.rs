//! XML rendering tests over in-memory buffers.

use grantid_model::{
    Affiliation, Document, DocumentHead, FunderId, Grant, Namespaces, Person, PersonRole,
    RelatedWork, RelatedWorkId,
};
use grantid_output::write_document;

fn render(document: &Document) -> String {
    let mut buffer = Vec::new();
    write_document(&mut buffer, document).expect("render document");
    String::from_utf8(buffer).expect("utf-8 output")
}

fn test_document(grants: Vec<Grant>) -> Document {
    Document {
        head: DocumentHead {
            batch_id: "test-batch".to_string(),
            timestamp: "20240601120000".to_string(),
            depositor_name: "Example Institute".to_string(),
            depositor_email: "deposits@example.org".to_string(),
            registrant: "Example Institute".to_string(),
        },
        namespaces: Namespaces::default(),
        grants,
    }
}

#[test]
fn renders_root_and_head() {
    let xml = render(&test_document(Vec::new()));

    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>"));
    assert!(xml.contains("<doi_batch xmlns=\"http://www.crossref.org/grant_id/0.2.0\""));
    assert!(xml.contains("version=\"0.2.0\""));
    assert!(xml.contains("<doi_batch_id>test-batch</doi_batch_id>"));
    assert!(xml.contains("<timestamp>20240601120000</timestamp>"));
    assert!(xml.contains("<depositor_name>Example Institute</depositor_name>"));
    assert!(xml.contains("<email_address>deposits@example.org</email_address>"));
    assert!(xml.contains("<registrant>Example Institute</registrant>"));
    assert!(xml.contains("<body>"));
    assert!(xml.contains("</body>"));
}

#[test]
fn renders_a_full_grant() {
    let grant = Grant {
        title: Some("Research Project".to_string()),
        description: Some("A study.".to_string()),
        investigators: vec![
            Person {
                role: PersonRole::LeadInvestigator,
                given_name: Some("John".to_string()),
                family_name: Some("Smith".to_string()),
                affiliation: Some(Affiliation {
                    institution: "McGill University".to_string(),
                    country: Some("CA".to_string()),
                }),
                orcid: Some("https://orcid.org/0000-0002-1825-0097".to_string()),
            },
            Person {
                role: PersonRole::Investigator,
                family_name: Some("Roy".to_string()),
                ..Default::default()
            },
        ],
        award_amount: Some("50000".to_string()),
        currency: Some("CAD".to_string()),
        award_number: Some("12345".to_string()),
        award_start_date: Some("2024-01-15".to_string()),
        doi: Some("10.13039/grant-12345".to_string()),
        resource: Some("https://grants.example.org/12345".to_string()),
        ..Default::default()
    };
    let xml = render(&test_document(vec![grant]));

    assert!(xml.contains("<project-title>Research Project</project-title>"));
    assert!(xml.contains("<person role=\"lead_investigator\">"));
    assert!(xml.contains("<givenName>John</givenName>"));
    assert!(xml.contains("<familyName>Smith</familyName>"));
    assert!(xml.contains("<institution country=\"CA\">McGill University</institution>"));
    assert!(xml.contains("<ORCID>https://orcid.org/0000-0002-1825-0097</ORCID>"));
    assert!(xml.contains("<person role=\"investigator\">"));
    assert!(xml.contains("<award_amount currency=\"CAD\">50000</award_amount>"));
    assert!(xml.contains("<funding funding-type=\"grant\">"));
    assert!(xml.contains("<award-number>12345</award-number>"));
    assert!(xml.contains("<award-start-date>2024-01-15</award-start-date>"));
    assert!(xml.contains("<doi>10.13039/grant-12345</doi>"));
    assert!(xml.contains("<resource>https://grants.example.org/12345</resource>"));
}

#[test]
fn renders_related_item_programs() {
    let grant = Grant {
        award_number: Some("A1".to_string()),
        related_works: vec![
            RelatedWork {
                relationship_type: "isFinancedBy".to_string(),
                identifier: RelatedWorkId::Doi("10.5555/x".to_string()),
            },
            RelatedWork {
                relationship_type: "isFinancedBy".to_string(),
                identifier: RelatedWorkId::Uri("https://openalex.org/W1".to_string()),
            },
        ],
        ..Default::default()
    };
    let xml = render(&test_document(vec![grant]));

    assert!(xml.contains("<rel:program name=\"relations\">"));
    assert!(xml.contains(
        "<rel:inter_work_relation relationship-type=\"isFinancedBy\" identifier-type=\"doi\">10.5555/x</rel:inter_work_relation>"
    ));
    assert!(xml.contains("identifier-type=\"uri\">https://openalex.org/W1"));
}

#[test]
fn absent_values_omit_their_elements() {
    let grant = Grant {
        title: Some("Spare".to_string()),
        ..Default::default()
    };
    let xml = render(&test_document(vec![grant]));

    assert!(!xml.contains("<investigators"));
    assert!(!xml.contains("<award_amount"));
    assert!(!xml.contains("<award-number"));
    assert!(!xml.contains("<doi_data"));
    assert!(!xml.contains("<rel:program"));
}

#[test]
fn ror_excludes_funder_name_and_id() {
    let mut grant = Grant::default();
    grant.funding.funder = Some(FunderId::Ror("https://ror.org/02e2c7k09".to_string()));
    let xml = render(&test_document(vec![grant]));

    assert!(xml.contains("<ROR>https://ror.org/02e2c7k09</ROR>"));
    assert!(!xml.contains("<funder-name>"));
    assert!(!xml.contains("<funder-id>"));
}

#[test]
fn text_content_is_escaped() {
    let grant = Grant {
        title: Some("Salt & Water <Phase 2>".to_string()),
        ..Default::default()
    };
    let xml = render(&test_document(vec![grant]));

    assert!(xml.contains("Salt &amp; Water &lt;Phase 2&gt;"));
}
