use tokio::sync::watch;

use crate::models::DetectionBatch;

/// Single-slot hand-off between the frame loop and the reducer loop.
/// Posting never waits; an unread batch is overwritten by the next one.
pub fn batch_mailbox() -> (BatchPoster, BatchInbox) {
    let (tx, rx) = watch::channel(None);
    (
        BatchPoster { tx },
        BatchInbox {
            rx,
            last_post: 0,
            last_seq: None,
        },
    )
}

/// Slot contents: the batch plus its post number, counted from 1.
#[derive(Debug, Clone)]
struct Posted {
    post: u64,
    batch: DetectionBatch,
}

pub struct BatchPoster {
    tx: watch::Sender<Option<Posted>>,
}

impl BatchPoster {
    /// Returns `false` once the inbox has been dropped.
    pub fn post(&self, batch: DetectionBatch) -> bool {
        if self.tx.is_closed() {
            return false;
        }
        self.tx.send_modify(|slot| {
            let post = slot.as_ref().map_or(1, |previous| previous.post + 1);
            *slot = Some(Posted { post, batch });
        });
        true
    }
}

/// A batch taken from the mailbox, with how many posted batches were
/// overwritten unread since the previous delivery.
#[derive(Debug, Clone)]
pub struct Delivery {
    pub batch: DetectionBatch,
    pub superseded: u64,
}

pub struct BatchInbox {
    rx: watch::Receiver<Option<Posted>>,
    last_post: u64,
    last_seq: Option<u64>,
}

impl BatchInbox {
    /// Waits for the latest unread batch. Batches not newer than the last one
    /// delivered are skipped. `None` once the poster is gone and drained.
    pub async fn next(&mut self) -> Option<Delivery> {
        let mut superseded = 0;
        loop {
            self.rx.changed().await.ok()?;
            let Some(Posted { post, batch }) = self.rx.borrow_and_update().clone() else {
                continue;
            };

            superseded += post.saturating_sub(self.last_post + 1);
            self.last_post = post;

            if let Some(last) = self.last_seq.filter(|last| batch.frame_seq <= *last) {
                log::debug!(
                    "dropping stale batch for frame {} (last processed {})",
                    batch.frame_seq,
                    last
                );
                continue;
            }

            self.last_seq = Some(batch.frame_seq);
            return Some(Delivery { batch, superseded });
        }
    }

    pub fn last_seq(&self) -> Option<u64> {
        self.last_seq
    }
}
