use crate::types::Notification;
use tokio::sync::broadcast;

#[derive(Clone)]
pub struct NotificationBus {
    sender: broadcast::Sender<Notification>,
}

impl NotificationBus {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    /// Fails only when nobody is subscribed; callers usually ignore that.
    pub fn publish(
        &self,
        notification: Notification,
    ) -> Result<(), broadcast::error::SendError<Notification>> {
        self.sender.send(notification).map(|_| ())
    }
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NotificationKind;

    #[tokio::test]
    async fn test_subscriber_receives_published_notification() {
        let bus = NotificationBus::new(8);
        let mut receiver = bus.subscribe();

        bus.publish(Notification::new(
            NotificationKind::PaymentConfirmed,
            "Payment Confirmed",
            "ticket issued",
        ))
        .unwrap();

        let received = receiver.recv().await.unwrap();
        assert_eq!(received.kind, NotificationKind::PaymentConfirmed);
        assert_eq!(received.title, "Payment Confirmed");
        assert!(received.id.starts_with("ntf_"));
    }

    #[test]
    fn test_publish_without_subscribers_errors() {
        let bus = NotificationBus::new(8);
        let result = bus.publish(Notification::new(NotificationKind::SignedOut, "Signed out", ""));
        assert!(result.is_err());
    }
}
