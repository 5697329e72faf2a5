use chrono::NaiveDateTime;
use ticketing_shared::models::{Price, RequestType, TicketDetails, TicketType};

use super::create_test_stores;
use crate::errors::PipelineError;
use crate::handlers::ticket_writer::{build_record, process_ticket};
use crate::models::{TicketSubmission, STATUS_SUCCESS};

fn submission(ticket_id: Option<&str>, ticket_type: Option<&str>) -> TicketSubmission {
    TicketSubmission {
        user_id: Some("u1".to_string()),
        user_name: Some("Alice".to_string()),
        ticket_details: Some(TicketDetails {
            ticket_id: ticket_id.map(str::to_string),
            ticket_type: ticket_type.map(str::to_string),
            price: Some(Price::Text("10".to_string())),
        }),
        request_type: Some(RequestType::Xml),
    }
}

#[tokio::test]
async fn test_incident_ticket_is_written_to_incident_collection() {
    let stores = create_test_stores();

    let response = process_ticket(stores.tickets.as_ref(), submission(Some("t1"), Some("incident")))
        .await
        .unwrap();

    assert_eq!(response.status, STATUS_SUCCESS);
    assert_eq!(response.message, "Ticket processed in incident table");
    assert_eq!(response.ticket_id.as_deref(), Some("t1"));
    assert_eq!(response.request_type, Some(RequestType::Xml));
    assert_eq!(
        response.output_headers.get("Content-Type").map(String::as_str),
        Some("application/json")
    );

    let stored = stores.tickets.tickets_in(TicketType::Incident);
    assert_eq!(stored.len(), 1);
    assert!(stores.tickets.tickets_in(TicketType::Service).is_empty());

    let record = &stored[0];
    assert_eq!(record.ticket_id, "t1");
    assert_eq!(record.user_id.as_deref(), Some("u1"));
    assert_eq!(record.user_name.as_deref(), Some("Alice"));
    assert_eq!(record.ticket_type, TicketType::Incident);
    assert_eq!(record.price, Some(Price::Text("10".to_string())));
    assert!(NaiveDateTime::parse_from_str(&record.created_at, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    assert!(!record.created_at.ends_with('Z'));
}

#[tokio::test]
async fn test_service_ticket_is_written_to_service_collection() {
    let stores = create_test_stores();

    let response = process_ticket(stores.tickets.as_ref(), submission(Some("s1"), Some("service")))
        .await
        .unwrap();

    assert_eq!(response.message, "Ticket processed in service table");
    assert_eq!(stores.tickets.tickets_in(TicketType::Service).len(), 1);
    assert!(stores.tickets.tickets_in(TicketType::Incident).is_empty());
}

#[tokio::test]
async fn test_same_ticket_id_overwrites() {
    let stores = create_test_stores();

    process_ticket(stores.tickets.as_ref(), submission(Some("t1"), Some("incident")))
        .await
        .unwrap();
    let mut second = submission(Some("t1"), Some("incident"));
    second.user_name = None;
    process_ticket(stores.tickets.as_ref(), second).await.unwrap();

    let stored = stores.tickets.tickets_in(TicketType::Incident);
    assert_eq!(stored.len(), 1);
    assert!(stored[0].user_name.is_none());
    assert_eq!(stores.tickets.write_count(), 2);
}

#[tokio::test]
async fn test_incomplete_tickets_are_rejected_without_writing() {
    let stores = create_test_stores();

    let cases = vec![
        submission(None, Some("incident")),
        submission(Some(""), Some("incident")),
        submission(Some("t1"), None),
        submission(Some("t1"), Some("")),
        TicketSubmission {
            ticket_details: None,
            ..submission(Some("t1"), Some("incident"))
        },
    ];

    for case in cases {
        let result = process_ticket(stores.tickets.as_ref(), case).await;
        assert!(matches!(result, Err(PipelineError::InvalidTicket(_))));
    }
    assert_eq!(stores.tickets.write_count(), 0);
}

#[tokio::test]
async fn test_unknown_ticket_types_are_rejected_without_writing() {
    let stores = create_test_stores();

    for ticket_type in ["Incident", "hardware", " incident"] {
        let result =
            process_ticket(stores.tickets.as_ref(), submission(Some("t1"), Some(ticket_type))).await;
        match result {
            Err(PipelineError::UnknownTicketType(raw)) => assert_eq!(raw, ticket_type),
            other => panic!("expected UnknownTicketType, got {:?}", other),
        }
    }
    assert_eq!(stores.tickets.write_count(), 0);
}

#[tokio::test]
async fn test_store_failure_is_reported() {
    let stores = create_test_stores();
    stores.tickets.set_unavailable(true);

    let result =
        process_ticket(stores.tickets.as_ref(), submission(Some("t1"), Some("incident"))).await;

    assert!(matches!(result, Err(PipelineError::StoreUnavailable(_))));
}

#[test]
fn test_build_record_keeps_missing_user_fields_empty() {
    let anonymous = TicketSubmission {
        user_id: None,
        user_name: None,
        ..submission(Some("t9"), Some("service"))
    };

    let (collection, record) = build_record(anonymous).unwrap();

    assert_eq!(collection, TicketType::Service);
    assert!(record.user_id.is_none());
    assert!(record.user_name.is_none());
}

#[test]
fn test_submission_reads_lookup_output() {
    let lookup = serde_json::json!({
        "userFound": true,
        "userId": "u1",
        "userName": "Alice",
        "ticketDetails": {"ticketId": "t1", "type": "incident", "price": 10},
        "requestType": "application/json"
    });

    let submission: TicketSubmission = serde_json::from_value(lookup).unwrap();

    assert_eq!(submission.user_name.as_deref(), Some("Alice"));
    assert_eq!(submission.request_type, Some(RequestType::Json));
    let (_, record) = build_record(submission).unwrap();
    assert_eq!(record.price, Some(Price::Amount(serde_json::Number::from(10u64))));
}
