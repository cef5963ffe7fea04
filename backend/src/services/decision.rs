//! Per-item conflict decisions for `ask_per_item` imports

use async_trait::async_trait;
use shared::{ImportDecision, ImportItem, InventoryRecord};
use tokio::sync::{mpsc, oneshot};

/// Answers a conflict between a snapshot item and an existing record.
///
/// Calls are made one at a time, in snapshot order, and the import waits for
/// each answer before moving on.
#[async_trait]
pub trait ImportDecisionPort: Send + Sync {
    async fn decide(&self, item: &ImportItem, existing: &InventoryRecord) -> ImportDecision;
}

/// Gives the same answer to every conflict
#[derive(Debug, Clone, Copy)]
pub struct FixedDecisionPort(pub ImportDecision);

#[async_trait]
impl ImportDecisionPort for FixedDecisionPort {
    async fn decide(&self, _item: &ImportItem, _existing: &InventoryRecord) -> ImportDecision {
        self.0
    }
}

/// A pending conflict waiting for an answer
#[derive(Debug)]
pub struct DecisionRequest {
    pub item: ImportItem,
    pub existing: InventoryRecord,
    reply: oneshot::Sender<ImportDecision>,
}

impl DecisionRequest {
    pub fn respond(self, decision: ImportDecision) {
        // The import may have been cancelled; nothing to do then.
        let _ = self.reply.send(decision);
    }
}

/// Forwards conflicts over a channel to whoever holds the receiver
#[derive(Debug, Clone)]
pub struct ChannelDecisionPort {
    requests: mpsc::Sender<DecisionRequest>,
}

impl ChannelDecisionPort {
    pub fn channel(buffer: usize) -> (Self, mpsc::Receiver<DecisionRequest>) {
        let (requests, receiver) = mpsc::channel(buffer.max(1));
        (Self { requests }, receiver)
    }
}

#[async_trait]
impl ImportDecisionPort for ChannelDecisionPort {
    async fn decide(&self, item: &ImportItem, existing: &InventoryRecord) -> ImportDecision {
        let (reply, answer) = oneshot::channel();
        let request = DecisionRequest {
            item: item.clone(),
            existing: existing.clone(),
            reply,
        };

        if self.requests.send(request).await.is_err() {
            tracing::warn!("Decision receiver closed, skipping {}", item.code);
            return ImportDecision::Skip;
        }

        match answer.await {
            Ok(decision) => decision,
            Err(_) => {
                tracing::warn!("Decision for {} was dropped, skipping", item.code);
                ImportDecision::Skip
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use shared::{CatalogKey, InventoryKind};

    fn conflict() -> (ImportItem, InventoryRecord) {
        let item = ImportItem {
            code: "EF-591".to_string(),
            name: "Pale Blue".to_string(),
            manufacturer: "EF".to_string(),
            kind: "on_hand".to_string(),
            quantity: Decimal::from(3),
            location: None,
        };
        let existing =
            InventoryRecord::new(CatalogKey::new("EF-591"), InventoryKind::OnHand, Decimal::from(5));
        (item, existing)
    }

    #[tokio::test]
    async fn test_fixed_port() {
        let (item, existing) = conflict();
        let port = FixedDecisionPort(ImportDecision::Replace);
        assert_eq!(port.decide(&item, &existing).await, ImportDecision::Replace);
    }

    #[tokio::test]
    async fn test_channel_port_round_trip() {
        let (port, mut requests) = ChannelDecisionPort::channel(1);
        let responder = tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            assert_eq!(request.existing.quantity, Decimal::from(5));
            request.respond(ImportDecision::Increase);
        });

        let (item, existing) = conflict();
        assert_eq!(port.decide(&item, &existing).await, ImportDecision::Increase);
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_closed_channel_skips() {
        let (port, requests) = ChannelDecisionPort::channel(1);
        drop(requests);

        let (item, existing) = conflict();
        assert_eq!(port.decide(&item, &existing).await, ImportDecision::Skip);
    }

    #[tokio::test]
    async fn test_dropped_request_skips() {
        let (port, mut requests) = ChannelDecisionPort::channel(1);
        tokio::spawn(async move {
            let request = requests.recv().await.unwrap();
            drop(request);
        });

        let (item, existing) = conflict();
        assert_eq!(port.decide(&item, &existing).await, ImportDecision::Skip);
    }
}
