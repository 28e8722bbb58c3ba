use crate::common::{FcmMessage, NotificationPayload, NotifyError, Target};
use log::debug;

pub fn build_message(
    target: Target,
    payload: NotificationPayload,
) -> Result<FcmMessage, NotifyError> {
    payload.validate()?;

    let mut message = FcmMessage {
        token: None,
        topic: None,
        tokens: None,
        notification: payload,
    };

    match target {
        Target::SingleToken(token) if !token.is_empty() => message.token = Some(token),
        Target::SingleToken(_) => return Err(NotifyError::missing("token")),
        Target::Topic(topic) if !topic.is_empty() => message.topic = Some(topic),
        Target::Topic(_) => return Err(NotifyError::missing("topic")),
        Target::TokenList(tokens) if !tokens.is_empty() => message.tokens = Some(tokens),
        Target::TokenList(_) => return Err(NotifyError::missing("tokens")),
    }

    debug!("built message {:?}", message);
    Ok(message)
}
