//! End-to-end paging behavior of the case table source against a
//! scripted in-memory pager.

#![allow(clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::sync::watch;
use tokio::time::timeout;

use modqueue_core::{
    Analysis, Case, CaseColumn, CaseNavigator, CasePage, CasePager, CaseState, CaseTableSource,
    PageError, PageRequest, Paginator, Priority, SortControl, SortDirection,
};

/// Pager that replays scripted responses and records every request.
#[derive(Default)]
struct ScriptedPager {
    responses: Mutex<VecDeque<Result<CasePage, PageError>>>,
    requests: Mutex<Vec<PageRequest>>,
}

impl ScriptedPager {
    fn push(&self, response: Result<CasePage, PageError>) {
        self.responses.lock().unwrap().push_back(response);
    }

    fn requests(&self) -> Vec<PageRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl CasePager for ScriptedPager {
    async fn fetch_page(&self, request: PageRequest) -> Result<CasePage, PageError> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(CasePage::default()));
        // Yield once so in-flight replacement and loading-flag
        // transitions are observable.
        tokio::task::yield_now().await;
        response
    }
}

fn case(id: &str, upload_secs: i64) -> Case {
    Case {
        id: id.to_string(),
        create_time: None,
        state: CaseState::Active,
        priority: Priority::default(),
        review_history: Vec::new(),
        signal_content: Vec::new(),
        flags: Vec::new(),
        associated_entities: Vec::new(),
        image_bytes: None,
        analysis: Analysis::default(),
        title: None,
        description: None,
        views: None,
        upload_time: Utc.timestamp_opt(upload_secs, 0).single(),
        ip_address: None,
        ip_region: None,
        similar_case_ids: Vec::new(),
        notes: None,
    }
}

fn page(
    ids: &[&str],
    previous_cursor: Option<&str>,
    next_cursor: Option<&str>,
    total_count: u64,
) -> CasePage {
    CasePage {
        cases: ids
            .iter()
            .enumerate()
            .map(|(i, id)| case(id, 1_000 + i as i64))
            .collect(),
        previous_cursor: previous_cursor.map(str::to_string),
        next_cursor: next_cursor.map(str::to_string),
        total_count,
    }
}

fn setup() -> (
    Arc<ScriptedPager>,
    CaseTableSource<ScriptedPager>,
    Paginator,
) {
    let pager = Arc::new(ScriptedPager::default());
    let navigator = Arc::new(Mutex::new(CaseNavigator::new()));
    let source = CaseTableSource::new(Arc::clone(&pager), navigator);
    let paginator = Paginator::new();
    source.set_paginator(paginator.clone());
    (pager, source, paginator)
}

fn ids(cases: &[Case]) -> Vec<String> {
    cases.iter().map(|c| c.id.clone()).collect()
}

/// Waits until the data channel shows exactly `expected` identifiers.
async fn wait_for_ids(data: &mut watch::Receiver<Vec<Case>>, expected: &[&str]) {
    timeout(Duration::from_secs(5), async {
        loop {
            if ids(&data.borrow()) == expected {
                return;
            }
            data.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
}

#[tokio::test]
async fn initial_page_populates_navigator_and_tokens() {
    let (pager, mut source, paginator) = setup();
    pager.push(Ok(page(&["A", "B"], None, Some("n1"), 2)));

    let navigator = source.navigator();
    let mut data = source.connect();
    wait_for_ids(&mut data, &["A", "B"]).await;

    let first_request = &pager.requests()[0];
    assert_eq!(first_request.previous_cursor, None);
    assert_eq!(first_request.next_cursor, None);

    let mut nav = navigator.lock().unwrap();
    assert_eq!(nav.next("A").as_deref(), Some("B"));
    assert_eq!(nav.previous("B").as_deref(), Some("A"));
    assert_eq!(nav.next("B"), None);
    assert_eq!(nav.current_tokens.next.as_deref(), Some("n1"));
    assert_eq!(nav.current_tokens.previous, None);
    drop(nav);

    assert_eq!(paginator.length(), 2);
}

#[tokio::test]
async fn forward_then_backward_reuses_captured_tokens() {
    let (pager, mut source, paginator) = setup();
    pager.push(Ok(page(&["A", "B"], None, Some("n1"), 6)));
    pager.push(Ok(page(&["C", "D"], Some("p1"), Some("n2"), 6)));
    pager.push(Ok(page(&["A", "B"], None, Some("n1"), 6)));

    let navigator = source.navigator();
    let mut data = source.connect();
    wait_for_ids(&mut data, &["A", "B"]).await;

    // Forward: fetches with the next token captured from page one.
    paginator.set_page_index(1);
    wait_for_ids(&mut data, &["C", "D"]).await;
    {
        let requests = pager.requests();
        assert_eq!(requests[1].next_cursor.as_deref(), Some("n1"));
        assert_eq!(requests[1].previous_cursor, None);
        let nav = navigator.lock().unwrap();
        assert_eq!(nav.current_page_index, 1);
        assert_eq!(nav.last_tokens.next.as_deref(), Some("n1"));
        assert_eq!(nav.last_tokens.previous, None);
    }

    // Backward: fetches with exactly the previous token page two returned.
    paginator.set_page_index(0);
    wait_for_ids(&mut data, &["A", "B"]).await;
    {
        let requests = pager.requests();
        assert_eq!(requests[2].previous_cursor.as_deref(), Some("p1"));
        assert_eq!(requests[2].next_cursor, None);
        let nav = navigator.lock().unwrap();
        assert_eq!(nav.current_page_index, 0);
        assert_eq!(nav.last_tokens.previous.as_deref(), Some("p1"));
        assert_eq!(nav.last_tokens.next, None);
    }
}

#[tokio::test]
async fn page_size_change_resets_to_first_page() {
    let (pager, mut source, paginator) = setup();
    pager.push(Ok(page(&["A"], None, Some("n1"), 30)));
    pager.push(Ok(page(&["B"], Some("p1"), Some("n2"), 30)));
    pager.push(Ok(page(&["C"], Some("p2"), Some("n3"), 30)));
    pager.push(Ok(page(&["X"], None, Some("n9"), 30)));

    let navigator = source.navigator();
    let mut data = source.connect();
    wait_for_ids(&mut data, &["A"]).await;
    paginator.set_page_index(1);
    wait_for_ids(&mut data, &["B"]).await;
    paginator.set_page_index(2);
    wait_for_ids(&mut data, &["C"]).await;

    // Changing the page size from 10 to 25 while on page index 2.
    paginator.set_page_size(25);
    wait_for_ids(&mut data, &["X"]).await;

    let requests = pager.requests();
    let resize_request = &requests[3];
    assert_eq!(resize_request.page_size, 25);
    assert_eq!(resize_request.previous_cursor, None);
    assert_eq!(resize_request.next_cursor, None);

    assert_eq!(paginator.page_index(), 0);
    let nav = navigator.lock().unwrap();
    assert_eq!(nav.current_page_index, 0);
    assert_eq!(nav.current_page_size, 25);
    assert_eq!(nav.last_tokens.previous, None);
    assert_eq!(nav.last_tokens.next, None);
}

#[tokio::test]
async fn refresh_reproduces_the_committed_page() {
    let (pager, mut source, paginator) = setup();
    pager.push(Ok(page(&["A"], None, Some("n1"), 20)));
    pager.push(Ok(page(&["B"], Some("p1"), Some("n2"), 20)));
    pager.push(Ok(page(&["B2"], Some("p1"), Some("n2"), 20)));

    let navigator = source.navigator();
    let mut data = source.connect();
    wait_for_ids(&mut data, &["A"]).await;
    paginator.set_page_index(1);
    wait_for_ids(&mut data, &["B"]).await;

    source.refresh();
    wait_for_ids(&mut data, &["B2"]).await;

    // The refresh re-used the committed forward token and did not move
    // the page index.
    let requests = pager.requests();
    assert_eq!(requests[2].next_cursor.as_deref(), Some("n1"));
    assert_eq!(requests[2].previous_cursor, None);
    assert_eq!(navigator.lock().unwrap().current_page_index, 1);
}

#[tokio::test]
async fn fetch_failure_surfaces_error_and_keeps_data() {
    let (pager, mut source, _paginator) = setup();
    pager.push(Ok(page(&["A", "B"], None, Some("n1"), 2)));
    pager.push(Err(PageError { description: None }));

    let mut data = source.connect();
    let mut loading = source.loading();
    let mut error = source.error();
    wait_for_ids(&mut data, &["A", "B"]).await;

    source.refresh();
    timeout(Duration::from_secs(5), async {
        loop {
            error.changed().await.unwrap();
            if error.borrow().is_some() {
                return;
            }
        }
    })
    .await
    .unwrap();

    assert_eq!(
        error.borrow().as_deref(),
        Some("An unknown error occurred.")
    );
    // The loading flag has settled back to false and the last good page
    // is still visible.
    timeout(Duration::from_secs(5), async {
        while *loading.borrow() {
            loading.changed().await.unwrap();
        }
    })
    .await
    .unwrap();
    assert_eq!(ids(&data.borrow()), ["A", "B"]);
}

#[tokio::test]
async fn rapid_page_changes_publish_only_newest() {
    let (pager, mut source, paginator) = setup();
    pager.push(Ok(page(&["A"], None, Some("n1"), 30)));
    pager.push(Ok(page(&["B"], Some("p1"), Some("n2"), 30)));
    pager.push(Ok(page(&["C"], Some("p2"), Some("n3"), 30)));

    let navigator = source.navigator();
    let mut data = source.connect();
    wait_for_ids(&mut data, &["A"]).await;

    // Two pagination signals before the first fetch resolves: the second
    // replaces the first in flight, so only the newest request's page is
    // published and committed.
    paginator.set_page_index(1);
    paginator.set_page_index(2);
    timeout(Duration::from_secs(5), data.changed()).await.unwrap().unwrap();
    assert_eq!(navigator.lock().unwrap().current_page_index, 2);

    // The superseded fetch must not produce a second publish.
    assert!(
        timeout(Duration::from_millis(100), data.changed())
            .await
            .is_err()
    );
}

#[tokio::test]
async fn no_paginator_fetches_a_single_implicit_page() {
    let pager = Arc::new(ScriptedPager::default());
    pager.push(Ok(page(&["A"], None, None, 1)));
    let navigator = Arc::new(Mutex::new(CaseNavigator::new()));
    let mut source = CaseTableSource::new(Arc::clone(&pager), navigator);

    let mut data = source.connect();
    wait_for_ids(&mut data, &["A"]).await;

    let requests = pager.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].previous_cursor, None);
    assert_eq!(requests[0].next_cursor, None);
}

#[tokio::test]
async fn sort_change_reorders_without_refetching() {
    let (pager, mut source, _paginator) = setup();
    // Served newest-first, so ascending upload time reverses the page.
    pager.push(Ok(CasePage {
        cases: vec![case("new", 300), case("mid", 200), case("old", 100)],
        previous_cursor: None,
        next_cursor: None,
        total_count: 3,
    }));
    let sort = SortControl::new();
    source.set_sort(sort.clone());

    let navigator = source.navigator();
    let mut data = source.connect();
    wait_for_ids(&mut data, &["new", "mid", "old"]).await;

    sort.sort(CaseColumn::UploadTime, SortDirection::Ascending);
    wait_for_ids(&mut data, &["old", "mid", "new"]).await;

    // Re-ordered client-side from the already-fetched page.
    assert_eq!(pager.requests().len(), 1);
    // The navigator follows the displayed order.
    let mut nav = navigator.lock().unwrap();
    assert_eq!(nav.next("old").as_deref(), Some("mid"));
    assert_eq!(nav.previous("new").as_deref(), Some("mid"));
}

#[tokio::test]
async fn disconnect_closes_the_channels() {
    let (pager, mut source, _paginator) = setup();
    pager.push(Ok(page(&["A"], None, None, 1)));

    let mut data = source.connect();
    wait_for_ids(&mut data, &["A"]).await;

    source.disconnect();
    timeout(Duration::from_secs(5), async {
        // The sender side is gone; waiting for a change now errors out.
        while data.changed().await.is_ok() {}
    })
    .await
    .unwrap();
}
