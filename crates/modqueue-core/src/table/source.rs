//! The paged table source: bridges pagination/sort controls to the
//! injected fetch operation and publishes the current page.
//!
//! Replaces a reactive-merge design with an explicit state machine: all
//! triggers (pagination, sort, refresh) land in one queue, a driver task
//! processes them sequentially, and fetches are single-flight with
//! replace — a newer page-selection request drops the in-flight fetch
//! and its eventual result is discarded, tracked by a monotonic
//! generation counter. The newest request always wins.

use std::pin::Pin;
use std::sync::{Arc, Mutex};

use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use super::controls::{Paginator, Signal, SortControl};
use super::lock;
use super::pager::{CasePage, CasePager, PageError, PageRequest};
use super::sort::order_cases;
use crate::case::Case;
use crate::navigator::{CaseNavigator, CursorTokens};

/// Shared handle to the navigator, mutated only by the table source.
pub type SharedNavigator = Arc<Mutex<CaseNavigator>>;

/// A cheap handle for requesting a refresh of the committed page.
///
/// Held by auto-refresh timers and post-upload triggers.
#[derive(Debug, Clone)]
pub struct RefreshHandle {
    signals: mpsc::UnboundedSender<Signal>,
}

impl RefreshHandle {
    /// Requests a re-fetch of the last committed page.
    ///
    /// A no-op once the source is disconnected.
    pub fn refresh(&self) {
        let _ = self.signals.send(Signal::Refresh);
    }
}

/// Fetch phase of the driver's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Fetching,
    Error,
}

/// What to commit to the navigator if the planned fetch succeeds.
#[derive(Debug, Clone)]
enum Commit {
    /// First page after a reset or with no paginator; nothing beyond the
    /// ordinary post-fetch bookkeeping.
    None,
    /// A forward step: advance to `page_index` and promote the token the
    /// fetch was made with.
    Forward {
        page_index: usize,
        token_used: Option<String>,
    },
    /// A backward step, symmetric to `Forward`.
    Backward {
        page_index: usize,
        token_used: Option<String>,
    },
}

type FetchFuture = Pin<Box<dyn Future<Output = Result<CasePage, PageError>> + Send>>;

struct InFlight {
    generation: u64,
    commit: Commit,
    future: FetchFuture,
}

/// Controls shared between the source handle and its driver task.
#[derive(Debug, Default)]
struct Controls {
    paginator: Option<Paginator>,
    sort: Option<SortControl>,
}

/// Data source that loads cases through a [`CasePager`], with support
/// for cursor pagination (via an attached [`Paginator`]) and client-side
/// sorting (via an attached [`SortControl`]).
///
/// Observable state is published on `tokio::sync::watch` channels:
/// the current page of cases, a loading flag, and the latest error
/// message. [`Self::connect`] starts the driver; [`Self::disconnect`]
/// stops it and closes all three channels for good — a fresh source is
/// required to reconnect.
pub struct CaseTableSource<P: CasePager> {
    pager: Arc<P>,
    navigator: SharedNavigator,
    controls: Arc<Mutex<Controls>>,
    signals: mpsc::UnboundedSender<Signal>,
    data_rx: watch::Receiver<Vec<Case>>,
    loading_rx: watch::Receiver<bool>,
    error_rx: watch::Receiver<Option<String>>,
    driver_parts: Option<DriverParts>,
    driver: Option<JoinHandle<()>>,
}

/// Receiver and publisher ends handed to the driver task on connect.
struct DriverParts {
    signal_rx: mpsc::UnboundedReceiver<Signal>,
    data_tx: watch::Sender<Vec<Case>>,
    loading_tx: watch::Sender<bool>,
    error_tx: watch::Sender<Option<String>>,
}

impl<P: CasePager> CaseTableSource<P> {
    /// Creates a source over `pager`, updating the explicitly owned
    /// `navigator`.
    #[must_use]
    pub fn new(pager: Arc<P>, navigator: SharedNavigator) -> Self {
        let (signals, signal_rx) = mpsc::unbounded_channel();
        let (data_tx, data_rx) = watch::channel(Vec::new());
        let (loading_tx, loading_rx) = watch::channel(false);
        let (error_tx, error_rx) = watch::channel(None);
        Self {
            pager,
            navigator,
            controls: Arc::new(Mutex::new(Controls::default())),
            signals,
            data_rx,
            loading_rx,
            error_rx,
            driver_parts: Some(DriverParts {
                signal_rx,
                data_tx,
                loading_tx,
                error_tx,
            }),
            driver: None,
        }
    }

    /// Attaches the pagination control whose changes drive re-fetching.
    ///
    /// The control's initialization signal triggers a fetch once the
    /// source is connected.
    pub fn set_paginator(&self, paginator: Paginator) {
        paginator.bind(self.signals.clone());
        lock(&self.controls).paginator = Some(paginator);
    }

    /// Attaches the sort control whose changes re-order the current page.
    pub fn set_sort(&self, sort: SortControl) {
        sort.bind(self.signals.clone());
        lock(&self.controls).sort = Some(sort);
    }

    /// The navigator this source keeps in sync.
    #[must_use]
    pub fn navigator(&self) -> SharedNavigator {
        Arc::clone(&self.navigator)
    }

    /// A handle for requesting refreshes of the committed page.
    #[must_use]
    pub fn refresh_handle(&self) -> RefreshHandle {
        RefreshHandle {
            signals: self.signals.clone(),
        }
    }

    /// Re-fetches the last committed page without changing the page
    /// index. Used by auto-refresh and post-upload triggers.
    pub fn refresh(&self) {
        let _ = self.signals.send(Signal::Refresh);
    }

    /// Observable current page.
    #[must_use]
    pub fn data(&self) -> watch::Receiver<Vec<Case>> {
        self.data_rx.clone()
    }

    /// Observable loading flag: true while a fetch is in flight.
    #[must_use]
    pub fn loading(&self) -> watch::Receiver<bool> {
        self.loading_rx.clone()
    }

    /// Observable error channel: the latest fetch failure's message.
    #[must_use]
    pub fn error(&self) -> watch::Receiver<Option<String>> {
        self.error_rx.clone()
    }

    /// Starts the driver if it is not already running and returns the
    /// data channel.
    ///
    /// With no paginator attached the source produces exactly one page;
    /// with one attached, the control's signals decide what is fetched.
    pub fn connect(&mut self) -> watch::Receiver<Vec<Case>> {
        if self.driver.is_none()
            && let Some(parts) = self.driver_parts.take()
        {
            let driver = Driver {
                pager: Arc::clone(&self.pager),
                navigator: Arc::clone(&self.navigator),
                controls: Arc::clone(&self.controls),
                signal_rx: parts.signal_rx,
                data_tx: parts.data_tx,
                loading_tx: parts.loading_tx,
                error_tx: parts.error_tx,
                last_page: None,
                total_count: 0,
                generation: 0,
                phase: Phase::Idle,
            };
            self.driver = Some(tokio::spawn(driver.run()));
        }
        self.data_rx.clone()
    }

    /// Stops the driver and closes the data, loading, and error channels.
    ///
    /// No further values are emitted afterwards; the channels cannot be
    /// reused, so reconnecting requires a fresh instance.
    pub fn disconnect(&mut self) {
        if let Some(driver) = self.driver.take() {
            driver.abort();
        }
        // Channels created but never connected still need closing.
        self.driver_parts = None;
    }
}

impl<P: CasePager> Drop for CaseTableSource<P> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// The driver task behind a [`CaseTableSource`].
struct Driver<P: CasePager> {
    pager: Arc<P>,
    navigator: SharedNavigator,
    controls: Arc<Mutex<Controls>>,
    signal_rx: mpsc::UnboundedReceiver<Signal>,
    data_tx: watch::Sender<Vec<Case>>,
    loading_tx: watch::Sender<bool>,
    error_tx: watch::Sender<Option<String>>,
    /// The last fetched page, in fetch order, for sort-only re-renders.
    last_page: Option<CasePage>,
    total_count: u64,
    generation: u64,
    phase: Phase,
}

impl<P: CasePager> Driver<P> {
    async fn run(mut self) {
        let mut inflight: Option<InFlight> = None;

        // No pagination control attached means no initialization signal
        // will ever arrive; produce the single implicit page.
        if lock(&self.controls).paginator.is_none() {
            self.start_fetch(&mut inflight);
        }

        loop {
            tokio::select! {
                maybe_signal = self.signal_rx.recv() => {
                    let Some(signal) = maybe_signal else { break };
                    self.on_signal(signal, &mut inflight);
                }
                result = Self::await_fetch(&mut inflight) => {
                    let Some(flight) = inflight.take() else { continue };
                    self.on_fetch_settled(flight.generation, flight.commit, result);
                }
            }
        }
    }

    /// Awaits the in-flight fetch; pends forever when there is none, so
    /// the select loop only wakes for signals.
    async fn await_fetch(inflight: &mut Option<InFlight>) -> Result<CasePage, PageError> {
        match inflight.as_mut() {
            Some(flight) => flight.future.as_mut().await,
            None => std::future::pending().await,
        }
    }

    fn on_signal(&mut self, signal: Signal, inflight: &mut Option<InFlight>) {
        match signal {
            Signal::Page | Signal::Refresh => self.start_fetch_for(signal, inflight),
            Signal::Sort => self.reorder(),
        }
    }

    /// Re-publishes the last fetched page under the current sort.
    ///
    /// Does nothing before the first fetch completes; the initial sort
    /// signal only matters once there is data to order.
    fn reorder(&mut self) {
        let Some(page) = self.last_page.clone() else {
            return;
        };
        self.publish(page);
    }

    fn start_fetch(&mut self, inflight: &mut Option<InFlight>) {
        self.start_fetch_for(Signal::Page, inflight);
    }

    /// Plans the next fetch per the page-selection algorithm and starts
    /// it, replacing any in-flight fetch.
    fn start_fetch_for(&mut self, signal: Signal, inflight: &mut Option<InFlight>) {
        let (request, commit) = match signal {
            Signal::Refresh => (self.refresh_request(), Commit::None),
            _ => self.plan_page(),
        };

        if inflight.is_some() {
            debug!(
                superseded = self.generation,
                "replacing in-flight page fetch"
            );
        }
        self.generation += 1;
        self.set_phase(Phase::Fetching);
        let reloading = self.last_page.is_some();
        info!(
            generation = self.generation,
            "{} table data...",
            if reloading { "Reloading" } else { "Loading" }
        );

        let pager = Arc::clone(&self.pager);
        *inflight = Some(InFlight {
            generation: self.generation,
            commit,
            future: Box::pin(async move { pager.fetch_page(request).await }),
        });
    }

    /// The page-selection algorithm: decides which cursors to fetch with
    /// based on the paginator's requested state versus the navigator's
    /// committed state.
    fn plan_page(&self) -> (PageRequest, Commit) {
        let controls = lock(&self.controls);
        let mut navigator = lock(&self.navigator);

        let Some(paginator) = controls.paginator.as_ref() else {
            // Single implicit page.
            return (
                PageRequest {
                    page_size: navigator.current_page_size,
                    ..PageRequest::default()
                },
                Commit::None,
            );
        };

        let requested_index = paginator.page_index();
        let requested_size = paginator.page_size();

        if requested_size != navigator.current_page_size {
            // Page-size change: return to the first page and forget all
            // cursor state.
            navigator.current_page_index = 0;
            paginator.commit_page_index(0);
            navigator.last_tokens.clear();
            navigator.current_tokens.clear();
            navigator.current_page_size = requested_size;
            return (
                PageRequest {
                    page_size: requested_size,
                    ..PageRequest::default()
                },
                Commit::None,
            );
        }

        if requested_index > navigator.current_page_index {
            let token = navigator.current_tokens.next.clone();
            return (
                PageRequest {
                    page_size: requested_size,
                    previous_cursor: None,
                    next_cursor: token.clone(),
                },
                Commit::Forward {
                    page_index: requested_index,
                    token_used: token,
                },
            );
        }

        if requested_index < navigator.current_page_index {
            let token = navigator.current_tokens.previous.clone();
            return (
                PageRequest {
                    page_size: requested_size,
                    previous_cursor: token.clone(),
                    next_cursor: None,
                },
                Commit::Backward {
                    page_index: requested_index,
                    token_used: token,
                },
            );
        }

        // Index unchanged: reproduce the committed page.
        drop(navigator);
        drop(controls);
        (self.refresh_request(), Commit::None)
    }

    /// A request that reproduces the last committed page.
    fn refresh_request(&self) -> PageRequest {
        let navigator = lock(&self.navigator);
        PageRequest {
            page_size: navigator.current_page_size,
            previous_cursor: navigator.last_tokens.previous.clone(),
            next_cursor: navigator.last_tokens.next.clone(),
        }
    }

    fn on_fetch_settled(
        &mut self,
        generation: u64,
        commit: Commit,
        result: Result<CasePage, PageError>,
    ) {
        if generation != self.generation {
            // Superseded fetch; its replacement is already in flight.
            debug!(generation, "discarding stale fetch result");
            return;
        }

        match result {
            Ok(page) => {
                self.set_phase(Phase::Idle);
                self.apply_commit(&commit);
                self.last_page = Some(page.clone());
                self.total_count = page.total_count;
                self.publish(page);
            }
            Err(err) => {
                self.set_phase(Phase::Error);
                error!("fetching cases failed: {err}");
                let _ = self.error_tx.send(Some(err.message()));
                // The last good page stays visible.
            }
        }
    }

    /// Transitions the state machine and mirrors it on the loading flag.
    fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
        let _ = self.loading_tx.send(self.phase == Phase::Fetching);
    }

    /// Commits a successful forward/backward step: the requested index
    /// becomes current and the token the fetch was made with is promoted
    /// into `last_tokens` for refreshes.
    fn apply_commit(&self, commit: &Commit) {
        let mut navigator = lock(&self.navigator);
        match commit {
            Commit::None => {}
            Commit::Forward {
                page_index,
                token_used,
            } => {
                navigator.current_page_index = *page_index;
                navigator.last_tokens.next = token_used.clone();
                navigator.last_tokens.previous = None;
            }
            Commit::Backward {
                page_index,
                token_used,
            } => {
                navigator.current_page_index = *page_index;
                navigator.last_tokens.previous = token_used.clone();
                navigator.last_tokens.next = None;
            }
        }
    }

    /// Orders the page, publishes it, and syncs the navigator and the
    /// paginator's length.
    fn publish(&mut self, page: CasePage) {
        let CasePage {
            mut cases,
            previous_cursor,
            next_cursor,
            ..
        } = page;

        let active_sort = lock(&self.controls).sort.as_ref().and_then(SortControl::active);
        order_cases(&mut cases, active_sort);

        {
            let mut navigator = lock(&self.navigator);
            navigator.reset();
            for case in &cases {
                navigator.add(&case.id);
            }
            navigator.current_tokens = CursorTokens {
                previous: previous_cursor,
                next: next_cursor,
            };
        }

        // Runs on the driver task, never inside a control mutation.
        if let Some(paginator) = lock(&self.controls).paginator.as_ref() {
            paginator.set_length(self.total_count);
        }

        let _ = self.data_tx.send(cases);
    }
}
