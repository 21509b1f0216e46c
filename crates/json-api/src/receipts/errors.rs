//! Receipt Errors

use salvo::http::StatusError;
use tracing::error;

use emporium_app::domain::receipts::ReceiptsServiceError;

pub(crate) fn into_status_error(error: ReceiptsServiceError) -> StatusError {
    match error {
        ReceiptsServiceError::NotFound => StatusError::not_found().brief("Receipt not found"),
        ReceiptsServiceError::Storage(source) => {
            error!(%source, "receipt storage failed");

            StatusError::internal_server_error()
        }
    }
}
