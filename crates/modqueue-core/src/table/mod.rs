//! Cursor-paged case table: fetch orchestration, controls, and sorting.
//!
//! [`CaseTableSource`] bridges a [`Paginator`] and [`SortControl`] to an
//! injected [`CasePager`], publishes the current page on watch channels,
//! and keeps the shared [`crate::navigator::CaseNavigator`] in sync so
//! detail views can step between the loaded page's cases.

mod controls;
mod pager;
mod sort;
mod source;

pub use controls::{Paginator, SortControl};
pub use pager::{CasePage, CasePager, DEFAULT_ERROR_MSG, PageError, PageRequest};
pub use sort::{CaseColumn, Sort, SortDirection, order_cases};
pub use source::{CaseTableSource, RefreshHandle, SharedNavigator};

use std::sync::{Mutex, MutexGuard, PoisonError};

/// Locks a mutex, recovering the guard from a poisoned lock.
///
/// State behind these locks stays consistent across panics (plain field
/// writes), so propagating poison would only turn one panic into many.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
