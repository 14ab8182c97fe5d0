//! Operation lanes and the loading indicator.
//!
//! Chat, journal and settings operations each run in their own lane. Within
//! a lane, operations run one at a time in the order they were issued
//! (the lane lock is a fair FIFO queue); across lanes they run freely.
//!
//! Acquiring a lane marks it busy on the [`LoadingIndicator`]; dropping the
//! returned [`LaneGuard`] clears the mark and releases the lane, on every
//! exit path.

use std::collections::BTreeSet;
use std::sync::Arc;
use strum::{Display, EnumIter};
use tokio::sync::{Mutex, OwnedMutexGuard, watch};

/// An independent sequence of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Lane {
    Chat,
    Journal,
    Settings,
}

/// Publishes which lanes currently have an operation in flight.
#[derive(Debug, Clone)]
pub struct LoadingIndicator {
    busy: Arc<watch::Sender<BTreeSet<Lane>>>,
}

impl LoadingIndicator {
    pub fn new() -> Self {
        let (busy, _) = watch::channel(BTreeSet::new());
        Self {
            busy: Arc::new(busy),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<BTreeSet<Lane>> {
        self.busy.subscribe()
    }

    pub fn is_loading(&self, lane: Lane) -> bool {
        self.busy.borrow().contains(&lane)
    }

    /// True while any lane is busy.
    pub fn any(&self) -> bool {
        !self.busy.borrow().is_empty()
    }

    fn mark(&self, lane: Lane) {
        self.busy.send_modify(|busy| {
            busy.insert(lane);
        });
    }

    fn clear(&self, lane: Lane) {
        self.busy.send_modify(|busy| {
            busy.remove(&lane);
        });
    }
}

impl Default for LoadingIndicator {
    fn default() -> Self {
        Self::new()
    }
}

/// Exclusive hold on one lane. Dropping it releases the lane.
#[derive(Debug)]
pub struct LaneGuard {
    lane: Lane,
    loading: LoadingIndicator,
    // Released after `drop` has cleared the indicator, so the next holder
    // always observes a clean state before marking the lane again.
    _permit: OwnedMutexGuard<()>,
}

impl LaneGuard {
    pub fn lane(&self) -> Lane {
        self.lane
    }
}

impl Drop for LaneGuard {
    fn drop(&mut self) {
        self.loading.clear(self.lane);
        tracing::debug!("[LaneGate] Released {} lane", self.lane);
    }
}

/// One FIFO lock per lane.
#[derive(Debug, Clone)]
pub struct LaneGate {
    chat: Arc<Mutex<()>>,
    journal: Arc<Mutex<()>>,
    settings: Arc<Mutex<()>>,
    loading: LoadingIndicator,
}

impl LaneGate {
    pub fn new(loading: LoadingIndicator) -> Self {
        Self {
            chat: Arc::new(Mutex::new(())),
            journal: Arc::new(Mutex::new(())),
            settings: Arc::new(Mutex::new(())),
            loading,
        }
    }

    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    /// Waits for the lane to be free, then holds it.
    pub async fn acquire(&self, lane: Lane) -> LaneGuard {
        let lock = match lane {
            Lane::Chat => Arc::clone(&self.chat),
            Lane::Journal => Arc::clone(&self.journal),
            Lane::Settings => Arc::clone(&self.settings),
        };
        let permit = lock.lock_owned().await;
        self.loading.mark(lane);
        tracing::debug!("[LaneGate] Acquired {} lane", lane);

        LaneGuard {
            lane,
            loading: self.loading.clone(),
            _permit: permit,
        }
    }
}

impl Default for LaneGate {
    fn default() -> Self {
        Self::new(LoadingIndicator::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex as StdMutex;

    #[tokio::test]
    async fn test_guard_marks_and_clears_loading() {
        let gate = LaneGate::default();
        let loading = gate.loading().clone();

        {
            let guard = gate.acquire(Lane::Journal).await;
            assert_eq!(guard.lane(), Lane::Journal);
            assert!(loading.is_loading(Lane::Journal));
            assert!(!loading.is_loading(Lane::Chat));
        }

        assert!(!loading.any());
    }

    #[tokio::test]
    async fn test_guard_released_on_error_path() {
        let gate = LaneGate::default();

        async fn failing(gate: &LaneGate) -> Result<(), &'static str> {
            let _guard = gate.acquire(Lane::Settings).await;
            Err("remote failed")
        }

        assert!(failing(&gate).await.is_err());
        assert!(!gate.loading().is_loading(Lane::Settings));
    }

    #[tokio::test]
    async fn test_same_lane_runs_in_issue_order() {
        let gate = LaneGate::default();
        let log = StdMutex::new(Vec::new());

        let first = async {
            let _guard = gate.acquire(Lane::Chat).await;
            log.lock().unwrap().push("first:start");
            tokio::task::yield_now().await;
            tokio::task::yield_now().await;
            log.lock().unwrap().push("first:end");
        };
        let second = async {
            let _guard = gate.acquire(Lane::Chat).await;
            log.lock().unwrap().push("second:start");
            log.lock().unwrap().push("second:end");
        };

        tokio::join!(first, second);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["first:start", "first:end", "second:start", "second:end"]
        );
    }

    #[tokio::test]
    async fn test_different_lanes_do_not_block() {
        let gate = LaneGate::default();
        let _chat = gate.acquire(Lane::Chat).await;

        // Would hang if lanes shared a lock.
        let journal = gate.acquire(Lane::Journal).await;

        assert!(gate.loading().is_loading(Lane::Chat));
        assert_eq!(journal.lane(), Lane::Journal);
    }
}
