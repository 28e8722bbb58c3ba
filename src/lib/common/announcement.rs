use crate::common::{
    build_message, chunk_tokens, Announcement, BatchOutcome, Directory, DispatchGateway,
    NotificationPayload, NotifyError, Target, MAX_MULTICAST_TOKENS,
};
use log::{error, info};

/// Sends `payload` to every token, one multicast per batch.
///
/// A failed batch is logged and recorded, then the next batch is attempted.
/// Nothing is retried.
pub async fn fan_out(
    gateway: &dyn DispatchGateway,
    tokens: &[String],
    payload: &NotificationPayload,
) -> Vec<BatchOutcome> {
    let mut outcomes = Vec::new();

    for (index, batch) in chunk_tokens(tokens, MAX_MULTICAST_TOKENS)
        .into_iter()
        .enumerate()
    {
        let result = match build_message(Target::TokenList(batch.to_vec()), payload.clone()) {
            Ok(message) => gateway.send_multicast(&message).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(_) => info!("Sent batch of {} messages", batch.len()),
            Err(e) => error!("Error sending batch {}: {}", index, e),
        }

        outcomes.push(BatchOutcome {
            index,
            size: batch.len(),
            result,
        });
    }

    outcomes
}

/// Runs the fan-out for a newly created announcement.
pub async fn on_announcement_created(
    gateway: &dyn DispatchGateway,
    directory: &dyn Directory,
    announcement: Announcement,
) -> Result<Vec<BatchOutcome>, NotifyError> {
    let payload = NotificationPayload::new(announcement.title, announcement.body)?;
    let tokens = directory.list_device_tokens().await?;

    let outcomes = fan_out(gateway, &tokens, &payload).await;

    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();
    let delivered: usize = outcomes
        .iter()
        .filter_map(|o| o.result.as_ref().ok())
        .map(|r| r.success_count)
        .sum();
    info!(
        "announcement fan-out: {} tokens, {} batches, {} failed batches, {} delivered",
        tokens.len(),
        outcomes.len(),
        failed,
        delivered
    );

    Ok(outcomes)
}

#[cfg(test)]
mod tests {
    use super::{fan_out, on_announcement_created};
    use crate::common::testing::{MockDirectory, MockGateway};
    use crate::common::{Announcement, NotificationPayload, NotifyError};

    fn tokens(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("device-{}", i)).collect()
    }

    fn payload() -> NotificationPayload {
        NotificationPayload {
            title: "Election".into(),
            body: "Polls open at 9".into(),
        }
    }

    #[tokio::test]
    async fn test_fan_out_batches_in_order() {
        let gateway = MockGateway::default();
        let input = tokens(1200);

        let outcomes = fan_out(&gateway, &input, &payload()).await;

        let sizes: Vec<usize> = outcomes.iter().map(|o| o.size).collect();
        assert_eq!(sizes, vec![500, 500, 200]);

        let sent = gateway.sent();
        assert_eq!(sent.len(), 3);
        let resent: Vec<String> = sent
            .into_iter()
            .flat_map(|m| m.tokens.unwrap_or_default())
            .collect();
        assert_eq!(resent, input);
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_stop_the_rest() {
        let gateway = MockGateway {
            fail_multicast_calls: [1].into_iter().collect(),
            ..Default::default()
        };

        let outcomes = fan_out(&gateway, &tokens(1200), &payload()).await;

        assert_eq!(outcomes.len(), 3);
        assert!(outcomes[0].result.is_ok());
        assert!(matches!(outcomes[1].result, Err(NotifyError::Dispatch(_))));
        assert_eq!(outcomes[2].result.as_ref().unwrap().success_count, 200);
        assert_eq!(gateway.sent().len(), 3);
    }

    #[tokio::test]
    async fn test_no_tokens_sends_nothing() {
        let gateway = MockGateway::default();
        let outcomes = fan_out(&gateway, &[], &payload()).await;
        assert!(outcomes.is_empty());
        assert!(gateway.sent().is_empty());
    }

    #[tokio::test]
    async fn test_announcement_reads_directory() {
        let gateway = MockGateway::default();
        let directory = MockDirectory {
            tokens: tokens(3),
            ..Default::default()
        };
        let announcement = Announcement {
            title: Some("Election".into()),
            body: Some("Polls open at 9".into()),
        };

        let outcomes = on_announcement_created(&gateway, &directory, announcement)
            .await
            .unwrap();

        assert_eq!(outcomes.len(), 1);
        let sent = gateway.sent();
        assert_eq!(sent[0].notification, payload());
        assert_eq!(sent[0].tokens, Some(tokens(3)));
    }

    #[tokio::test]
    async fn test_announcement_without_body_is_rejected() {
        let gateway = MockGateway::default();
        let directory = MockDirectory {
            tokens: tokens(3),
            ..Default::default()
        };
        let announcement = Announcement {
            title: Some("Election".into()),
            body: None,
        };

        let res = on_announcement_created(&gateway, &directory, announcement).await;
        assert!(matches!(res, Err(NotifyError::Validation(_))));
        assert!(gateway.sent().is_empty());
    }
}
