//! Sequenced recomputation
//!
//! Quotes and approval checks are recomputed on every input change and may
//! complete out of order. Each run takes a [`Ticket`] when it starts; only the
//! run holding the most recently issued ticket may publish its result.

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

/// Sequence number handed out when a computation starts
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn seq(&self) -> u64 {
        self.0
    }
}

/// Latest published value of one computation kind
#[derive(Debug)]
pub struct Sequenced<T> {
    issued: AtomicU64,
    slot: RwLock<Option<(u64, T)>>,
}

impl<T: Clone> Sequenced<T> {
    pub fn new() -> Self {
        Self {
            issued: AtomicU64::new(0),
            slot: RwLock::new(None),
        }
    }

    /// Start a computation; any earlier ticket becomes stale.
    pub fn begin(&self) -> Ticket {
        Ticket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Store `value` if `ticket` is still the latest issued. Returns whether it was stored.
    pub async fn publish(&self, ticket: Ticket, value: T) -> bool {
        let mut slot = self.slot.write().await;
        // checked under the lock so two publishers cannot interleave
        if !self.is_current(ticket) {
            tracing::debug!(seq = ticket.0, "Discarding stale result");
            return false;
        }
        *slot = Some((ticket.0, value));
        true
    }

    /// Run `fut` under a fresh ticket and publish its output.
    ///
    /// Returns the output only if it was published.
    pub async fn run<F>(&self, fut: F) -> Option<T>
    where
        F: Future<Output = T>,
    {
        let ticket = self.begin();
        let value = fut.await;
        if self.publish(ticket, value.clone()).await {
            Some(value)
        } else {
            None
        }
    }

    pub async fn latest(&self) -> Option<T> {
        self.slot.read().await.as_ref().map(|(_, v)| v.clone())
    }

    /// Latest value with the sequence number it was computed under
    pub async fn latest_with_seq(&self) -> Option<(u64, T)> {
        self.slot.read().await.clone()
    }

    /// Invalidate in-flight runs and drop the published value
    pub async fn reset(&self) {
        let mut slot = self.slot.write().await;
        self.issued.fetch_add(1, Ordering::SeqCst);
        *slot = None;
    }
}

impl<T: Clone> Default for Sequenced<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::oneshot;

    #[tokio::test]
    async fn test_latest_ticket_wins() {
        let slot: Sequenced<&str> = Sequenced::new();
        let first = slot.begin();
        let second = slot.begin();

        assert!(slot.publish(second, "fresh").await);
        assert!(!slot.publish(first, "stale").await);
        assert_eq!(slot.latest().await, Some("fresh"));
        assert_eq!(slot.latest_with_seq().await, Some((second.seq(), "fresh")));
    }

    #[tokio::test]
    async fn test_stale_result_discarded_before_newer_finishes() {
        let slot: Sequenced<u32> = Sequenced::new();
        let old = slot.begin();
        let _new = slot.begin();

        assert!(!slot.publish(old, 1).await);
        assert_eq!(slot.latest().await, None);
    }

    #[tokio::test]
    async fn test_slow_run_cannot_overwrite_fast_run() {
        let slot = Arc::new(Sequenced::<&'static str>::new());
        let (release, wait) = oneshot::channel::<()>();

        let slow = {
            let slot = slot.clone();
            tokio::spawn(async move {
                slot.run(async move {
                    let _ = wait.await;
                    "slow"
                })
                .await
            })
        };
        // let the slow run take its ticket first
        tokio::time::sleep(Duration::from_millis(20)).await;

        let fast = slot.run(async { "fast" }).await;
        assert_eq!(fast, Some("fast"));

        let _ = release.send(());
        assert_eq!(slow.await.unwrap(), None);
        assert_eq!(slot.latest().await, Some("fast"));
    }

    #[tokio::test]
    async fn test_reset_invalidates_in_flight() {
        let slot: Sequenced<u32> = Sequenced::new();
        let ticket = slot.begin();
        assert!(slot.publish(ticket, 7).await);

        let in_flight = slot.begin();
        slot.reset().await;
        assert!(!slot.publish(in_flight, 8).await);
        assert_eq!(slot.latest().await, None);
    }
}
