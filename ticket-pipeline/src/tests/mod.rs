use std::sync::Arc;

use ticketing_shared::models::UserRecord;
use ticketing_shared::test_utils::mock_ticket_store::MockTicketStore;
use ticketing_shared::test_utils::mock_user_store::MockUserStore;
use ticketing_shared::test_utils::test_logging;

use crate::config::Stage;
use crate::pipeline::PipelineContext;

mod writer_tests;
mod xml_tests;

pub const SCENARIO_XML: &str = "<request><userId>u1</userId><ticketDetails><ticketId>t1</ticketId><type>incident</type><price>10</price></ticketDetails></request>";

pub struct TestStores {
    pub users: Arc<MockUserStore>,
    pub tickets: Arc<MockTicketStore>,
}

// Helper for setting up mock stores with a couple of known users
pub fn create_test_stores() -> TestStores {
    test_logging::init_test_logging();

    TestStores {
        users: Arc::new(MockUserStore::with_users(vec![
            UserRecord::new("u1", Some("Alice")),
            UserRecord::new("u2", None),
        ])),
        tickets: Arc::new(MockTicketStore::new()),
    }
}

pub fn create_context(stores: &TestStores, stage: Stage, require_registered_user: bool) -> PipelineContext {
    PipelineContext {
        users: stores.users.clone(),
        tickets: stores.tickets.clone(),
        stage,
        require_registered_user,
    }
}
