use crate::models::{now_naive_utc, Price, TicketRecord, TicketType};
use crate::store::dynamo::{DynamoTicketStore, DynamoUserStore, TICKET_KEY};
use crate::store::{TicketStore, UserStore};
use crate::test_utils::dynamo_test_utils::{
    clear_dynamo_table, create_dynamo_client, create_ticket_table, create_users_table, put_user,
    use_dynamodb,
};
use crate::test_utils::test_logging::init_test_logging;

// Constants for DynamoDB tests
const USERS_TEST_TABLE: &str = "users-store-test-table";
const INCIDENT_TEST_TABLE: &str = "incident-store-test-table";
const SERVICE_TEST_TABLE: &str = "service-store-test-table";

// These only run with USE_DYNAMODB=true and DynamoDB local on port 8000
#[tokio::test]
async fn test_dynamo_user_lookup() {
    init_test_logging();
    if !use_dynamodb() {
        log::debug!("Skipping DynamoDB user store test");
        return;
    }

    let client = create_dynamo_client().await;
    create_users_table(&client, USERS_TEST_TABLE).await.unwrap();
    put_user(&client, USERS_TEST_TABLE, "user_123", Some("Alice"))
        .await
        .unwrap();
    put_user(&client, USERS_TEST_TABLE, "user_456", None)
        .await
        .unwrap();

    let store = DynamoUserStore::with_client_and_table(client, USERS_TEST_TABLE.to_string());

    let alice = store.get_user("user_123").await.unwrap().unwrap();
    assert_eq!(alice.display_name(), "Alice");

    let nameless = store.get_user("user_456").await.unwrap().unwrap();
    assert_eq!(nameless.display_name(), "Unknown");

    assert!(store.get_user("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn test_dynamo_ticket_routing_and_overwrite() {
    init_test_logging();
    if !use_dynamodb() {
        log::debug!("Skipping DynamoDB ticket store test");
        return;
    }

    let client = create_dynamo_client().await;
    create_ticket_table(&client, INCIDENT_TEST_TABLE).await.unwrap();
    create_ticket_table(&client, SERVICE_TEST_TABLE).await.unwrap();
    clear_dynamo_table(&client, INCIDENT_TEST_TABLE, TICKET_KEY).await;
    clear_dynamo_table(&client, SERVICE_TEST_TABLE, TICKET_KEY).await;

    let store = DynamoTicketStore::with_client_and_tables(
        client,
        INCIDENT_TEST_TABLE.to_string(),
        SERVICE_TEST_TABLE.to_string(),
    );

    let ticket = TicketRecord {
        ticket_id: "t1".to_string(),
        user_id: Some("user_123".to_string()),
        user_name: None,
        ticket_type: TicketType::Incident,
        price: Some(Price::Text("10".to_string())),
        created_at: now_naive_utc(),
    };
    store.put_ticket(TicketType::Incident, ticket.clone()).await.unwrap();

    let stored = store
        .get_ticket(TicketType::Incident, "t1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored, ticket);
    assert!(store
        .get_ticket(TicketType::Service, "t1")
        .await
        .unwrap()
        .is_none());

    // Same key again replaces the earlier record
    let replacement = TicketRecord {
        user_name: Some("Alice".to_string()),
        ..ticket
    };
    store
        .put_ticket(TicketType::Incident, replacement)
        .await
        .unwrap();
    let stored = store
        .get_ticket(TicketType::Incident, "t1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.user_name.as_deref(), Some("Alice"));
}
