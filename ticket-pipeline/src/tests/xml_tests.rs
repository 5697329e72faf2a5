use serde_json::json;

use crate::xml::{child_by_local_name, value_to_xml, xml_to_value, XmlError};

#[test]
fn test_leaf_elements_become_strings() {
    let value = xml_to_value(super::SCENARIO_XML).unwrap();

    assert_eq!(
        value,
        json!({
            "request": {
                "userId": "u1",
                "ticketDetails": {"ticketId": "t1", "type": "incident", "price": "10"}
            }
        })
    );
}

#[test]
fn test_empty_elements_become_null() {
    let value = xml_to_value("<request><userId>u1</userId><note/><memo></memo></request>").unwrap();

    assert_eq!(value["request"]["note"], json!(null));
    assert_eq!(value["request"]["memo"], json!(null));
}

#[test]
fn test_repeated_siblings_collapse_into_array() {
    let value = xml_to_value("<tags><tag>a</tag><tag>b</tag><tag>c</tag></tags>").unwrap();

    assert_eq!(value, json!({"tags": {"tag": ["a", "b", "c"]}}));
}

#[test]
fn test_attributes_and_mixed_text() {
    let value = xml_to_value(r#"<price currency="EUR">10</price>"#).unwrap();

    assert_eq!(value, json!({"price": {"@currency": "EUR", "#text": "10"}}));
}

#[test]
fn test_entities_and_cdata_are_decoded() {
    let value =
        xml_to_value("<note><a>Tom &amp; Jerry</a><b><![CDATA[<raw> & text]]></b></note>").unwrap();

    assert_eq!(value["note"]["a"], json!("Tom & Jerry"));
    assert_eq!(value["note"]["b"], json!("<raw> & text"));
}

#[test]
fn test_declaration_and_comments_are_ignored() {
    let value =
        xml_to_value("<?xml version=\"1.0\"?>\n<!-- intake -->\n<request><userId>u1</userId></request>")
            .unwrap();

    assert_eq!(value, json!({"request": {"userId": "u1"}}));
}

#[test]
fn test_malformed_documents_are_rejected() {
    assert!(xml_to_value("<request><userId>u1</request>").is_err());
    assert!(xml_to_value("<request><userId>u1</userId>").is_err());
    assert!(matches!(xml_to_value(""), Err(XmlError::NoRoot)));
    assert!(matches!(
        xml_to_value("<a/><b/>"),
        Err(XmlError::MultipleRoots)
    ));
    assert!(matches!(
        xml_to_value("hello <a/>"),
        Err(XmlError::StrayText)
    ));
}

#[test]
fn test_child_lookup_ignores_namespace_prefix() {
    let value = xml_to_value(
        r#"<soapenv:Envelope xmlns:soapenv="urn:x"><soapenv:Body><request/></soapenv:Body></soapenv:Envelope>"#,
    )
    .unwrap();

    let envelope = child_by_local_name(&value, "Envelope").unwrap();
    let body = child_by_local_name(envelope, "Body").unwrap();
    assert_eq!(child_by_local_name(body, "request"), Some(&json!(null)));
    assert!(child_by_local_name(body, "response").is_none());
}

#[test]
fn test_writer_output_parses_back() {
    let document = json!({
        "order": {
            "@id": "42",
            "item": ["apple", "pear"],
            "note": "fish & chips",
            "count": 3,
            "paid": true,
            "gift": null
        }
    });

    let xml = value_to_xml(&document).unwrap();
    assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"utf-8\"?>"));
    assert!(xml.contains(r#"<order id="42">"#));
    assert!(xml.contains("<note>fish &amp; chips</note>"));
    assert!(xml.contains("<gift/>"));

    // Scalars come back as text
    let parsed = xml_to_value(&xml).unwrap();
    assert_eq!(
        parsed,
        json!({
            "order": {
                "@id": "42",
                "item": ["apple", "pear"],
                "note": "fish & chips",
                "count": "3",
                "paid": "true",
                "gift": null
            }
        })
    );
}

#[test]
fn test_writer_rejects_bad_documents() {
    assert!(matches!(
        value_to_xml(&json!({"a": 1, "b": 2})),
        Err(XmlError::InvalidRoot)
    ));
    assert!(matches!(value_to_xml(&json!("text")), Err(XmlError::InvalidRoot)));
    assert!(matches!(
        value_to_xml(&json!({"response": {"bad name": "x"}})),
        Err(XmlError::InvalidName(_))
    ));
    assert!(matches!(
        value_to_xml(&json!({"response": {"1st": "x"}})),
        Err(XmlError::InvalidName(_))
    ));
}
