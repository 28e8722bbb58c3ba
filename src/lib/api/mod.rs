use crate::common::MISSING_FIELDS;
use actix_web::http::header::ContentType;
use actix_web::{error, web, HttpResponse, HttpResponseBuilder};
use log::debug;

pub mod announcement;
pub mod notification;

/// Registers every route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .service(notification::send_notification)
        .service(notification::send_topic_notification)
        .service(notification::send_multicast_notification)
        .service(announcement::announcement_created);
}

// unreadable bodies are answered like bodies with missing fields
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        debug!("rejected request body: {}", err);
        let res = text(HttpResponse::BadRequest(), MISSING_FIELDS);
        error::InternalError::from_response(err, res).into()
    })
}

pub(crate) fn text(mut builder: HttpResponseBuilder, body: impl Into<String>) -> HttpResponse {
    builder.content_type(ContentType::plaintext()).body(body.into())
}
