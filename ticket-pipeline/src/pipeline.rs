use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{error, info, warn};
use ticketing_shared::store::{TicketStore, UserStore};

use crate::config::{PipelineConfig, Stage};
use crate::errors::{PipelineError, Result};
use crate::handlers::{normalizer, responder, ticket_writer, user_resolver};
use crate::models::{PipelineOutput, TicketResponse, TicketSubmission};

/// Store clients and settings shared by every invocation of this process.
pub struct PipelineContext {
    pub users: Arc<dyn UserStore>,
    pub tickets: Arc<dyn TicketStore>,
    pub stage: Stage,
    pub require_registered_user: bool,
}

impl PipelineContext {
    pub fn new(
        users: Arc<dyn UserStore>,
        tickets: Arc<dyn TicketStore>,
        config: &PipelineConfig,
    ) -> Self {
        Self {
            users,
            tickets,
            stage: config.stage,
            require_registered_user: config.require_registered_user,
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| {
        error!("Error serializing stage output: {}", e);
        PipelineError::Serialization(e.to_string())
    })
}

/// Runs every stage in order: normalize, check the user, write the ticket,
/// shape the response.
pub async fn run_pipeline(context: &PipelineContext, event: &Value) -> Result<PipelineOutput> {
    let request = normalizer::normalize(event)?;
    let lookup = user_resolver::resolve_user(context.users.as_ref(), &request).await?;

    let response = if lookup.user_found {
        ticket_writer::process_ticket(context.tickets.as_ref(), lookup.into()).await?
    } else if context.require_registered_user {
        warn!("Not writing ticket for unknown user {}", request.user_id);
        TicketResponse::user_not_found(&request)
    } else {
        // Unknown users still get their ticket written, without a name
        info!("Writing ticket for unknown user {}", request.user_id);
        ticket_writer::process_ticket(
            context.tickets.as_ref(),
            TicketSubmission::unregistered(&request),
        )
        .await?
    };

    responder::respond(to_json(&response)?, request.request_type)
}

/// Runs the configured stage on one event.
pub async fn run_stage(context: &PipelineContext, event: Value) -> Result<Value> {
    match context.stage {
        Stage::Normalize => to_json(&normalizer::normalize(&event)?),
        Stage::CheckUser => {
            let request = normalizer::normalize(&event)?;
            to_json(&user_resolver::resolve_user(context.users.as_ref(), &request).await?)
        }
        Stage::ProcessTicket => {
            let submission: TicketSubmission = serde_json::from_value(event).map_err(|e| {
                error!("Error reading ticket submission: {}", e);
                PipelineError::Parse(e.to_string())
            })?;
            to_json(&ticket_writer::process_ticket(context.tickets.as_ref(), submission).await?)
        }
        Stage::Respond => Ok(responder::respond_in_kind(event)?.into_value()),
        Stage::Full => Ok(run_pipeline(context, &event).await?.into_value()),
    }
}
