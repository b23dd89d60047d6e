//! Fixed-interval auto-refresh of the case table.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::debug;

use crate::table::RefreshHandle;

/// Interval after which auto refresh is triggered.
pub const AUTO_REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Periodically re-fetches the committed page through a [`RefreshHandle`].
///
/// Consumers stop the timer while table rows are selected, so an
/// in-progress bulk action is not disturbed by rows moving underneath
/// it, and start it again once the selection clears.
#[derive(Debug, Default)]
pub struct AutoRefresh {
    timer: Option<JoinHandle<()>>,
}

impl AutoRefresh {
    /// Creates a stopped auto-refresh.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts refreshing `handle` every [`AUTO_REFRESH_INTERVAL`].
    pub fn start(&mut self, handle: RefreshHandle) {
        self.start_with_interval(handle, AUTO_REFRESH_INTERVAL);
    }

    /// Starts refreshing `handle` every `interval`, replacing any
    /// running timer.
    pub fn start_with_interval(&mut self, handle: RefreshHandle, interval: Duration) {
        self.stop();
        debug!(?interval, "starting auto refresh");
        self.timer = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // The first tick fires immediately; skip it so starting the
            // timer does not refresh a page that was just fetched.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                handle.refresh();
            }
        }));
    }

    /// Stops the timer. Idempotent: stopping a stopped timer is a no-op.
    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("stopping auto refresh");
            timer.abort();
        }
    }

    /// Whether the timer is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.timer.as_ref().is_some_and(|timer| !timer.is_finished())
    }
}

impl Drop for AutoRefresh {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::case::Case;
    use crate::navigator::CaseNavigator;
    use crate::table::{CasePage, CasePager, CaseTableSource, PageError, PageRequest};
    use std::sync::{Arc, Mutex};

    struct EmptyPager;

    impl CasePager for EmptyPager {
        async fn fetch_page(&self, _request: PageRequest) -> Result<CasePage, PageError> {
            Ok(CasePage::default())
        }
    }

    fn source() -> CaseTableSource<EmptyPager> {
        CaseTableSource::new(
            Arc::new(EmptyPager),
            Arc::new(Mutex::new(CaseNavigator::new())),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn ticks_trigger_refreshes() {
        let source = source();
        let mut auto = AutoRefresh::new();
        auto.start_with_interval(source.refresh_handle(), Duration::from_secs(5));
        assert!(auto.is_running());

        // Two intervals elapse, two refresh signals land in the queue.
        tokio::time::sleep(Duration::from_secs(11)).await;
        auto.stop();
        assert!(!auto.is_running());

        // The source was never connected, so the signals are still queued;
        // connecting drains them without panicking.
        let mut connected = source;
        let _cases: Vec<Case> = connected.connect().borrow().clone();
    }

    #[tokio::test]
    async fn stop_is_idempotent() {
        let source = source();
        let mut auto = AutoRefresh::new();
        auto.stop();
        auto.start_with_interval(source.refresh_handle(), Duration::from_secs(60));
        auto.stop();
        auto.stop();
        assert!(!auto.is_running());
    }

    #[tokio::test]
    async fn restart_replaces_the_timer() {
        let source = source();
        let mut auto = AutoRefresh::new();
        auto.start_with_interval(source.refresh_handle(), Duration::from_secs(60));
        auto.start_with_interval(source.refresh_handle(), Duration::from_secs(30));
        assert!(auto.is_running());
        auto.stop();
    }
}
