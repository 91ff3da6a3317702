//! Chain height snapshot for the scan loop
//!
//! The height is fetched once. In background mode the fetch runs on its own
//! task while the scan starts paging, and `current()` reports
//! [`PENDING_HEIGHT`] until the answer lands. The loop therefore may run a
//! few extra (often empty) iterations before it sees the real target; that
//! only changes how many pages are requested, never the ledger contents.

use {
    crate::source::{EventSource, SourceError},
    tokio::sync::oneshot,
};

/// Placeholder reported while the background fetch is still in flight
pub const PENDING_HEIGHT: u64 = 999_999_999;

#[derive(Debug)]
enum HeightState {
    Pending(oneshot::Receiver<Result<u64, SourceError>>),
    Resolved(u64),
    Failed(String),
}

#[derive(Debug)]
pub struct ChainHeight {
    state: HeightState,
}

impl ChainHeight {
    /// A height that is already known
    pub fn fixed(height: u64) -> Self {
        Self {
            state: HeightState::Resolved(height),
        }
    }

    /// Fetch the height before returning
    pub async fn fetch<S: EventSource + ?Sized>(source: &S) -> Result<Self, SourceError> {
        let height = source.get_height().await?;
        log::info!("📏 Chain height: {}", height);
        Ok(Self::fixed(height))
    }

    /// Start fetching the height on a background task and return immediately
    pub fn spawn<S>(source: S) -> Self
    where
        S: EventSource + Send + Sync + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::spawn(async move {
            let result = source.get_height().await;
            match &result {
                Ok(height) => log::info!("📏 Chain height resolved: {}", height),
                Err(e) => log::error!("❌ Chain height request failed: {}", e),
            }
            // Receiver gone means the scan already finished
            let _ = tx.send(result);
        });

        Self {
            state: HeightState::Pending(rx),
        }
    }

    pub fn is_resolved(&mut self) -> bool {
        self.poll();
        matches!(self.state, HeightState::Resolved(_))
    }

    /// Latest known target height, or [`PENDING_HEIGHT`] while unresolved
    pub fn current(&mut self) -> Result<u64, SourceError> {
        self.poll();
        match &self.state {
            HeightState::Pending(_) => Ok(PENDING_HEIGHT),
            HeightState::Resolved(height) => Ok(*height),
            HeightState::Failed(reason) => Err(SourceError::HeightUnavailable(reason.clone())),
        }
    }

    /// Wait until the height is known
    pub async fn wait(&mut self) -> Result<u64, SourceError> {
        if let HeightState::Pending(rx) = &mut self.state {
            self.state = match rx.await {
                Ok(Ok(height)) => HeightState::Resolved(height),
                Ok(Err(e)) => HeightState::Failed(e.to_string()),
                Err(_) => HeightState::Failed("height task ended without a result".to_string()),
            };
        }
        self.current()
    }

    fn poll(&mut self) {
        let HeightState::Pending(rx) = &mut self.state else {
            return;
        };
        self.state = match rx.try_recv() {
            Ok(Ok(height)) => HeightState::Resolved(height),
            Ok(Err(e)) => HeightState::Failed(e.to_string()),
            Err(oneshot::error::TryRecvError::Empty) => return,
            Err(oneshot::error::TryRecvError::Closed) => {
                HeightState::Failed("height task ended without a result".to_string())
            }
        };
    }
}
