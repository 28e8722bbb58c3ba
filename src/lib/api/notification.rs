// src/api/notification.rs

use actix_web::{post, web, HttpResponse, Responder};
use log::{debug, error};
use serde::Deserialize;

use crate::api::text;
use crate::common::{
    build_message, AppState, FcmMessage, NotificationPayload, NotifyError, Target, MISSING_FIELDS,
};

#[derive(Debug, Deserialize)]
pub struct SendNotificationBody {
    pub token: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendTopicNotificationBody {
    pub topic: Option<String>,
    pub title: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SendMulticastNotificationBody {
    pub tokens: Option<Vec<String>>,
    pub title: Option<String>,
    pub body: Option<String>,
}

fn prepare(
    target: Result<Target, NotifyError>,
    title: Option<String>,
    body: Option<String>,
) -> Result<FcmMessage, NotifyError> {
    let target = target?;
    let payload = NotificationPayload::new(title, body)?;
    build_message(target, payload)
}

fn rejected(e: NotifyError) -> HttpResponse {
    debug!("rejected request: {}", e);
    text(HttpResponse::BadRequest(), MISSING_FIELDS)
}

#[post("/sendNotification")]
pub async fn send_notification(
    state: web::Data<AppState>,
    req: web::Json<SendNotificationBody>,
) -> impl Responder {
    let req = req.into_inner();
    let message = match prepare(Target::token(req.token), req.title, req.body) {
        Ok(m) => m,
        Err(e) => return rejected(e),
    };

    match state.gateway.send_to_one(&message).await {
        Ok(_) => text(HttpResponse::Ok(), "Notification sent successfully"),
        Err(e) => {
            error!("Error sending notification: {}", e);
            text(
                HttpResponse::InternalServerError(),
                "Failed to send notification",
            )
        }
    }
}

#[post("/sendTopicNotification")]
pub async fn send_topic_notification(
    state: web::Data<AppState>,
    req: web::Json<SendTopicNotificationBody>,
) -> impl Responder {
    let req = req.into_inner();
    let message = match prepare(Target::topic(req.topic), req.title, req.body) {
        Ok(m) => m,
        Err(e) => return rejected(e),
    };

    match state.gateway.send_to_topic(&message).await {
        Ok(_) => text(HttpResponse::Ok(), "Topic notification sent successfully"),
        Err(e) => {
            error!("Error sending topic notification: {}", e);
            text(
                HttpResponse::InternalServerError(),
                "Failed to send topic notification",
            )
        }
    }
}

/// Caller-supplied token list, sent as one multicast without batching.
#[post("/sendMulticastNotification")]
pub async fn send_multicast_notification(
    state: web::Data<AppState>,
    req: web::Json<SendMulticastNotificationBody>,
) -> impl Responder {
    let req = req.into_inner();
    let total = req.tokens.as_ref().map(Vec::len).unwrap_or_default();
    let message = match prepare(Target::tokens(req.tokens), req.title, req.body) {
        Ok(m) => m,
        Err(e) => return rejected(e),
    };

    match state.gateway.send_multicast(&message).await {
        Ok(res) => text(
            HttpResponse::Ok(),
            format!("Sent messages successfully: {}/{}", res.success_count, total),
        ),
        Err(e) => {
            error!("Error sending multicast notification: {}", e);
            text(
                HttpResponse::InternalServerError(),
                "Failed to send multicast notification",
            )
        }
    }
}
