//! Healthcheck Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use crate::envelope::Reply;

/// Healthcheck payload
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct HealthPayload {
    /// Service status
    pub healthy: bool,
}

/// Healthcheck handler
#[endpoint(tags("health"), summary = "Health check endpoint")]
pub(crate) async fn handler() -> Reply<HealthPayload> {
    Reply::ok(HealthPayload { healthy: true })
}
