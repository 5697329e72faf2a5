pub mod dynamo_test_utils;
pub mod mock_ticket_store;
pub mod mock_user_store;
pub mod test_logging;
