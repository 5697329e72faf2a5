use tracing::{error, info};
use ticketing_shared::models::{now_naive_utc, TicketRecord, TicketType};
use ticketing_shared::store::TicketStore;

use crate::errors::{PipelineError, Result};
use crate::models::{TicketResponse, TicketSubmission};

fn invalid(reason: &str) -> PipelineError {
    error!("Invalid ticket details provided: {}", reason);
    PipelineError::InvalidTicket(reason.to_string())
}

/// Checks required fields and picks the destination collection.
/// Nothing is written when this fails.
pub fn build_record(submission: TicketSubmission) -> Result<(TicketType, TicketRecord)> {
    let details = submission
        .ticket_details
        .ok_or_else(|| invalid("ticketDetails is missing"))?;

    let ticket_id = details
        .ticket_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| invalid("ticketId is missing"))?;

    let raw_type = details
        .ticket_type
        .filter(|ticket_type| !ticket_type.is_empty())
        .ok_or_else(|| invalid("type is missing"))?;

    let ticket_type = raw_type.parse::<TicketType>().map_err(|e| {
        error!("Rejecting ticket {}: {}", ticket_id, e);
        PipelineError::from(e)
    })?;

    let record = TicketRecord {
        ticket_id,
        user_id: submission.user_id,
        user_name: submission.user_name,
        ticket_type,
        price: details.price,
        created_at: now_naive_utc(),
    };

    Ok((ticket_type, record))
}

/// Validates the submission and writes it to the collection for its type.
pub async fn process_ticket(
    tickets: &dyn TicketStore,
    submission: TicketSubmission,
) -> Result<TicketResponse> {
    let request_type = submission.request_type;
    let (collection, record) = build_record(submission)?;
    let ticket_id = record.ticket_id.clone();

    tickets.put_ticket(collection, record).await.map_err(|e| {
        error!("Error processing ticket {}: {}", ticket_id, e);
        PipelineError::from(e)
    })?;

    info!("Ticket {} processed in {} table", ticket_id, collection);
    Ok(TicketResponse::success(ticket_id, collection, request_type))
}
