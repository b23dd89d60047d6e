//! Pagination and sort control handles.
//!
//! These are the explicit, injected equivalents of the externally owned
//! UI pagination/sort primitives: shared state the table source reads,
//! plus a change signal it reacts to. Handles are cheap clones over the
//! same state, so a UI layer and the table source can hold the same
//! control.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use super::lock;
use super::sort::{CaseColumn, Sort, SortDirection};
use crate::navigator::{DEFAULT_PAGE_SIZE, PAGE_SIZE_OPTIONS};

/// A change notification consumed by the table source.
///
/// Signals carry no payload; the source reads the control state when it
/// processes them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    /// Pagination state changed (or a pagination control was attached).
    Page,
    /// Sort state changed (or a sort control was attached).
    Sort,
    /// An explicit re-fetch of the committed page was requested.
    Refresh,
}

pub(crate) type SignalSender = mpsc::UnboundedSender<Signal>;

#[derive(Debug)]
struct PaginatorState {
    page_index: usize,
    page_size: usize,
    length: u64,
    signals: Option<SignalSender>,
}

/// Pagination control: current page index, page size, and the total item
/// count the table source writes back after each fetch.
#[derive(Debug, Clone)]
pub struct Paginator {
    state: Arc<Mutex<PaginatorState>>,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new()
    }
}

impl Paginator {
    /// Creates a paginator on page 0 with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(PaginatorState {
                page_index: 0,
                page_size: DEFAULT_PAGE_SIZE,
                length: 0,
                signals: None,
            })),
        }
    }

    /// The current page index.
    #[must_use]
    pub fn page_index(&self) -> usize {
        lock(&self.state).page_index
    }

    /// Navigates to `page_index` and notifies the table source.
    pub fn set_page_index(&self, page_index: usize) {
        let tx = {
            let mut state = lock(&self.state);
            state.page_index = page_index;
            state.signals.clone()
        };
        Self::emit(tx.as_ref(), Signal::Page);
    }

    /// The current page size.
    #[must_use]
    pub fn page_size(&self) -> usize {
        lock(&self.state).page_size
    }

    /// The page sizes a size selector should offer.
    #[must_use]
    pub const fn page_size_options() -> [usize; 5] {
        PAGE_SIZE_OPTIONS
    }

    /// Changes the page size and notifies the table source.
    pub fn set_page_size(&self, page_size: usize) {
        let tx = {
            let mut state = lock(&self.state);
            state.page_size = page_size;
            state.signals.clone()
        };
        Self::emit(tx.as_ref(), Signal::Page);
    }

    /// Total number of items, for rendering page affordances.
    #[must_use]
    pub fn length(&self) -> u64 {
        lock(&self.state).length
    }

    /// Moves to `page_index` without emitting a change signal.
    ///
    /// Used by the table source when it resets the control itself (a
    /// page-size change zeroes the index); emitting here would re-enter
    /// the fetch pipeline.
    pub(crate) fn commit_page_index(&self, page_index: usize) {
        lock(&self.state).page_index = page_index;
    }

    /// Writes the total count back into the control.
    pub(crate) fn set_length(&self, length: u64) {
        lock(&self.state).length = length;
    }

    /// Connects this control to a table source's signal queue and emits
    /// the initialization signal.
    pub(crate) fn bind(&self, signals: SignalSender) {
        lock(&self.state).signals = Some(signals.clone());
        Self::emit(Some(&signals), Signal::Page);
    }

    fn emit(tx: Option<&SignalSender>, signal: Signal) {
        if let Some(tx) = tx {
            // A closed queue means the source was disconnected; the
            // control keeps working as plain state.
            let _ = tx.send(signal);
        }
    }
}

#[derive(Debug, Default)]
struct SortState {
    active: Option<Sort>,
    signals: Option<SignalSender>,
}

/// Sort control: the active column and direction, if any.
#[derive(Debug, Clone, Default)]
pub struct SortControl {
    state: Arc<Mutex<SortState>>,
}

impl SortControl {
    /// Creates a sort control with no active sort.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The active sort, if one is set.
    #[must_use]
    pub fn active(&self) -> Option<Sort> {
        lock(&self.state).active
    }

    /// Activates a sort and notifies the table source.
    pub fn sort(&self, column: CaseColumn, direction: SortDirection) {
        let tx = {
            let mut state = lock(&self.state);
            state.active = Some(Sort { column, direction });
            state.signals.clone()
        };
        Self::emit(tx.as_ref());
    }

    /// Clears the active sort and notifies the table source.
    pub fn clear(&self) {
        let tx = {
            let mut state = lock(&self.state);
            state.active = None;
            state.signals.clone()
        };
        Self::emit(tx.as_ref());
    }

    /// Connects this control to a table source's signal queue and emits
    /// the initialization signal.
    pub(crate) fn bind(&self, signals: SignalSender) {
        lock(&self.state).signals = Some(signals.clone());
        let _ = signals.send(Signal::Sort);
    }

    fn emit(tx: Option<&SignalSender>) {
        if let Some(tx) = tx {
            let _ = tx.send(Signal::Sort);
        }
    }
}
