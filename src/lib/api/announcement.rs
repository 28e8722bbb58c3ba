use actix_web::{post, web, HttpResponse, Responder};
use log::{error, info};

use crate::api::text;
use crate::common::{on_announcement_created, AppState, NotifyError, MISSING_FIELDS};

/// Hook fired when a document is created under `announcements/{announcement_id}`.
///
/// Answers 204 once every batch has been attempted, whether or not some failed.
#[post("/announcements/{announcement_id}/created")]
pub async fn announcement_created(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> impl Responder {
    let announcement_id = path.into_inner();

    let announcement = match state.directory.get_announcement(&announcement_id).await {
        Ok(Some(a)) => a,
        Ok(None) => return text(HttpResponse::NotFound(), "Announcement not found"),
        Err(e) => {
            error!("Error reading announcement {}: {}", announcement_id, e);
            return text(
                HttpResponse::InternalServerError(),
                "Failed to read announcement",
            );
        }
    };

    info!("announcement {} created, notifying users", announcement_id);

    let res = on_announcement_created(
        state.gateway.as_ref(),
        state.directory.as_ref(),
        announcement,
    )
    .await;

    match res {
        Ok(_) => HttpResponse::NoContent().finish(),
        Err(NotifyError::Validation(e)) => {
            error!("announcement {} not sent: {}", announcement_id, e);
            text(HttpResponse::BadRequest(), MISSING_FIELDS)
        }
        Err(e) => {
            error!("Error notifying announcement {}: {}", announcement_id, e);
            text(
                HttpResponse::InternalServerError(),
                "Failed to send announcement",
            )
        }
    }
}
