//! One module per pipeline stage, in data-flow order.

pub mod normalizer;
pub mod responder;
pub mod ticket_writer;
pub mod user_resolver;
