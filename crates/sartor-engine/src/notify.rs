//! Client notification side channel.
//!
//! Stage transitions into "First Fitting" and "Ready" notify the client.
//! Delivery is fire-and-forget: a sink failure is logged and never fails
//! or blocks the status mutation, and the notification is not part of the
//! returned snapshot.

use sartor_core::model::OrderStatus;
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A notification emitted by a stage transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub order_id: String,
    pub client_id: String,
    pub stage: OrderStatus,
    pub message: String,
}

/// Delivery backend for notifications.
pub trait NotificationSink: Send + Sync {
    fn deliver(&self, notification: &Notification);
}

/// Discards notifications.
pub struct NullSink;

impl NotificationSink for NullSink {
    fn deliver(&self, _notification: &Notification) {}
}

/// Logs notifications through `tracing`.
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, notification: &Notification) {
        tracing::info!(
            order_id = %notification.order_id,
            client_id = %notification.client_id,
            stage = %notification.stage,
            "{}",
            notification.message
        );
    }
}

/// Captures notifications in memory, for tests and embedding.
#[derive(Default)]
pub struct MemorySink {
    sent: Mutex<Vec<Notification>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every notification delivered so far.
    pub fn drain(&self) -> Vec<Notification> {
        match self.sent.lock() {
            Ok(mut sent) => std::mem::take(&mut *sent),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl NotificationSink for MemorySink {
    fn deliver(&self, notification: &Notification) {
        match self.sent.lock() {
            Ok(mut sent) => sent.push(notification.clone()),
            Err(poisoned) => poisoned.into_inner().push(notification.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_sink_captures_and_drains() {
        let sink = MemorySink::new();
        sink.deliver(&Notification {
            order_id: "o1".into(),
            client_id: "c1".into(),
            stage: OrderStatus::Ready,
            message: "Client notified: Garment ready for pickup!".into(),
        });
        let sent = sink.drain();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].stage, OrderStatus::Ready);
        assert!(sink.drain().is_empty());
    }
}
