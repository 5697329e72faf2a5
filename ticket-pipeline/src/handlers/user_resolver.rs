use tracing::{error, info, warn};
use ticketing_shared::store::UserStore;

use crate::errors::{PipelineError, Result};
use crate::models::{TicketRequest, UserLookupResult};

/// Looks the requesting user up with a single point read. A miss is not an
/// error; store failures are.
pub async fn resolve_user(users: &dyn UserStore, request: &TicketRequest) -> Result<UserLookupResult> {
    info!("Checking user: {}", request.user_id);

    let user = users.get_user(&request.user_id).await.map_err(|e| {
        error!("Error checking user {}: {}", request.user_id, e);
        PipelineError::from(e)
    })?;

    match user {
        Some(user) => Ok(UserLookupResult::found(request, &user)),
        None => {
            warn!("User {} not found", request.user_id);
            Ok(UserLookupResult::not_found(request.request_type))
        }
    }
}
