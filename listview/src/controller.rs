//! Per-page list state machine.
//!
//! A controller owns the state of one mounted list page. Every trigger
//! (mount, pagination, server sort, search, selector, domain parameter, scope)
//! issues a [`FetchTicket`] with a fresh sequence number; only the completion
//! carrying the latest sequence is applied, so a slow response can never
//! overwrite a newer one.

use std::collections::BTreeMap;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::columns::TableBinding;
use crate::error::{ConsoleError, Result};
use crate::notify::{Notice, Notifier};
use crate::query::{FixedFilter, Filter, ListQuery, SearchSpec, SortSpec};
use crate::resource::Resource;
use crate::rest::ConsoleHttpClient;
use crate::types::{Page, Pagination, SortOrder};

/// Where a list page is in its fetch cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Loaded,
    /// The server denied access; render an access-denied view instead of the table.
    Unauthorized,
    TornDown,
}

/// A user or page interaction that requires a new page from the server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    Mount,
    Refresh,
    Paginate { current: u32, page_size: u32 },
    Sort(SortSpec),
    Search { column: String, text: String },
    ClearSearch,
    Select(Option<FixedFilter>),
    /// Set (or remove, with `None`) a domain parameter such as session status.
    Domain { key: String, value: Option<String> },
    /// The organization selector changed.
    Scope(String),
}

/// An issued fetch. Hand it back to [`ListController::complete`] with the result.
#[derive(Debug, Clone)]
pub struct FetchTicket {
    pub seq: u64,
    pub scope: String,
    pub query: ListQuery,
}

/// What happened to a completed fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Committed,
    Denied,
    Failed,
    /// A newer fetch was issued after this one.
    Stale,
    /// The page was torn down before the fetch completed.
    Discarded,
}

/// A delete in flight: the row as it was displayed when the user confirmed.
#[derive(Debug, Clone)]
pub struct DeleteTicket<R> {
    pub index: usize,
    pub row: R,
}

/// Everything the rendering layer reads from a list page.
#[derive(Debug, Clone)]
pub struct ListState<R> {
    pub rows: Vec<R>,
    pub pagination: Pagination,
    pub sort: SortSpec,
    pub search: SearchSpec,
    /// Search that produced the rows on screen, for highlighting.
    pub applied_search: SearchSpec,
    pub selector: Option<FixedFilter>,
    pub domain: BTreeMap<String, String>,
    pub loading: bool,
    pub authorized: bool,
}

impl<R> ListState<R> {
    fn new(page_size: u32, domain: BTreeMap<String, String>) -> Self {
        Self {
            rows: Vec::new(),
            pagination: Pagination::new(1, page_size),
            sort: SortSpec::default(),
            search: SearchSpec::default(),
            applied_search: SearchSpec::default(),
            selector: None,
            domain,
            loading: false,
            authorized: true,
        }
    }
}

/// Generic controller for one remote-collection list page.
pub struct ListController<R: Resource> {
    client: ConsoleHttpClient,
    binding: TableBinding<R>,
    scope: String,
    state: ListState<R>,
    /// Page and size the next fetch asks for; `state.pagination` only moves on commit.
    requested: Pagination,
    phase: Phase,
    issued: u64,
    notifier: Arc<dyn Notifier>,
    cancel: CancellationToken,
}

impl<R: Resource> ListController<R> {
    pub fn new(
        client: ConsoleHttpClient,
        binding: TableBinding<R>,
        scope: impl Into<String>,
        page_size: u32,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let state = ListState::new(page_size, binding.domain_defaults.clone());
        Self {
            client,
            binding,
            scope: scope.into(),
            requested: state.pagination,
            state,
            phase: Phase::Idle,
            issued: 0,
            notifier,
            cancel: CancellationToken::new(),
        }
    }

    // --- Accessors ---

    pub fn state(&self) -> &ListState<R> {
        &self.state
    }

    pub fn rows(&self) -> &[R] {
        &self.state.rows
    }

    pub fn pagination(&self) -> Pagination {
        self.state.pagination
    }

    pub fn phase(&self) -> Phase {
        if self.cancel.is_cancelled() {
            Phase::TornDown
        } else {
            self.phase
        }
    }

    pub fn is_loading(&self) -> bool {
        self.state.loading
    }

    pub fn is_authorized(&self) -> bool {
        self.state.authorized
    }

    pub fn binding(&self) -> &TableBinding<R> {
        &self.binding
    }

    pub fn scope(&self) -> &str {
        &self.scope
    }

    pub fn client(&self) -> &ConsoleHttpClient {
        &self.client
    }

    pub fn notifier(&self) -> Arc<dyn Notifier> {
        Arc::clone(&self.notifier)
    }

    /// Token that tears the page down when cancelled, from any task.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    fn is_torn_down(&self) -> bool {
        self.phase() == Phase::TornDown
    }

    // --- Fetch cycle ---

    /// Issue the initial fetch with default parameters.
    pub fn mount(&mut self) -> Result<FetchTicket> {
        self.begin(Trigger::Mount)
    }

    /// Merge a trigger into the page state and issue a fetch for it.
    ///
    /// Invalid triggers (unknown column, client-sorted column, unsearchable
    /// column) are rejected before any state changes.
    pub fn begin(&mut self, trigger: Trigger) -> Result<FetchTicket> {
        if self.is_torn_down() {
            return Err(ConsoleError::TornDown);
        }
        self.apply_trigger(trigger)?;

        self.issued += 1;
        let query = ListQuery::build(
            &self.requested,
            &self.state.sort,
            &self.state.search,
            self.state.selector.as_ref(),
            &self.state.domain,
            self.binding.precedence,
        );
        self.state.loading = true;
        self.phase = Phase::Loading;

        debug!(
            kind = %R::KIND,
            seq = self.issued,
            page = query.page,
            page_size = query.page_size,
            "fetch issued"
        );

        Ok(FetchTicket {
            seq: self.issued,
            scope: self.scope.clone(),
            query,
        })
    }

    fn apply_trigger(&mut self, trigger: Trigger) -> Result<()> {
        match trigger {
            Trigger::Mount | Trigger::Refresh => {}
            Trigger::Paginate { current, page_size } => {
                self.requested.current = current.max(1);
                self.requested.page_size = page_size.max(1);
            }
            Trigger::Sort(sort) => {
                if let Some(field) = &sort.field {
                    self.binding.server_sort_column(field)?;
                }
                self.state.sort = sort;
            }
            Trigger::Search { column, text } => {
                self.binding.search_column(&column)?;
                self.state.search = SearchSpec::new(column, text);
            }
            Trigger::ClearSearch => self.state.search = SearchSpec::default(),
            Trigger::Select(selector) => {
                if let Some(filter) = &selector {
                    self.binding.select_column(&filter.field, &filter.value)?;
                }
                self.state.selector = selector;
            }
            Trigger::Domain { key, value } => match value {
                Some(value) => {
                    self.state.domain.insert(key, value);
                }
                None => {
                    self.state.domain.remove(&key);
                }
            },
            Trigger::Scope(scope) => {
                self.scope = scope;
                self.requested.current = 1;
            }
        }
        Ok(())
    }

    /// Apply the result of a fetch issued by [`begin`](Self::begin).
    pub fn complete(&mut self, ticket: FetchTicket, result: Result<Page<R>>) -> Completion {
        if self.is_torn_down() {
            debug!(kind = %R::KIND, seq = ticket.seq, "page torn down, result discarded");
            return Completion::Discarded;
        }
        if ticket.seq != self.issued {
            debug!(
                kind = %R::KIND,
                seq = ticket.seq,
                latest = self.issued,
                "stale page dropped"
            );
            return Completion::Stale;
        }

        self.state.loading = false;
        match result {
            Ok(page) => {
                self.commit(ticket, page);
                Completion::Committed
            }
            Err(e) if e.is_denied() => {
                warn!(kind = %R::KIND, error = %e, "list access denied");
                self.requested = self.state.pagination;
                self.state.authorized = false;
                self.phase = Phase::Unauthorized;
                Completion::Denied
            }
            Err(e) => {
                warn!(kind = %R::KIND, error = %e, "list fetch failed");
                self.notifier.notify(Notice::error(e.user_message()));
                self.requested = self.state.pagination;
                self.phase = if self.state.authorized {
                    Phase::Loaded
                } else {
                    Phase::Unauthorized
                };
                Completion::Failed
            }
        }
    }

    fn commit(&mut self, ticket: FetchTicket, page: Page<R>) {
        let Page { mut rows, total } = page;
        let page_size = ticket.query.page_size as usize;
        if rows.len() > page_size {
            warn!(
                kind = %R::KIND,
                received = rows.len(),
                page_size,
                "server returned more rows than the page size, truncating"
            );
            rows.truncate(page_size);
        }

        self.state.applied_search = match &ticket.query.filter {
            Filter::FreeText { column, text } => SearchSpec::new(column.clone(), text.clone()),
            _ => SearchSpec::default(),
        };
        self.state.pagination = Pagination {
            current: ticket.query.page,
            page_size: ticket.query.page_size,
            total,
        };
        self.requested = self.state.pagination;
        self.state.rows = rows;
        self.state.authorized = true;
        self.phase = Phase::Loaded;

        info!(
            kind = %R::KIND,
            page = ticket.query.page,
            rows = self.state.rows.len(),
            total,
            "page loaded"
        );
    }

    /// Issue a fetch for `trigger`, await it, and apply the result.
    ///
    /// Returns [`Completion::Discarded`] if the page is torn down while the
    /// request is in flight.
    pub async fn fetch(&mut self, trigger: Trigger) -> Result<Completion> {
        let ticket = self.begin(trigger)?;
        let cancel = self.cancel.clone();
        let result = tokio::select! {
            _ = cancel.cancelled() => return Ok(Completion::Discarded),
            result = self.client.list::<R>(&ticket.scope, &ticket.query) => result,
        };
        Ok(self.complete(ticket, result))
    }

    /// Tear the page down. Later completions are no-ops.
    pub fn teardown(&mut self) {
        self.phase = Phase::TornDown;
        self.cancel.cancel();
        debug!(kind = %R::KIND, "page torn down");
    }

    // --- Local row changes ---

    /// Reorder the rows on screen with a client-sorted column's comparator.
    ///
    /// Nothing is fetched; the next committed page replaces this order.
    pub fn sort_visible(&mut self, field: &str, order: SortOrder) -> Result<()> {
        let cmp = self.binding.comparator(field)?;
        match order {
            SortOrder::Ascend => self.state.rows.sort_by(cmp),
            SortOrder::Descend => self.state.rows.sort_by(|a, b| cmp(b, a)),
            SortOrder::None => {}
        }
        Ok(())
    }

    /// Snapshot the row at `index` for a delete request.
    ///
    /// Refused while the page is unauthorized: rows stay frozen until a
    /// fetch succeeds again.
    pub fn begin_delete(&self, index: usize) -> Result<DeleteTicket<R>> {
        if self.is_torn_down() {
            return Err(ConsoleError::TornDown);
        }
        if !self.state.authorized {
            return Err(ConsoleError::Denied(format!(
                "{} page is unauthorized",
                R::KIND
            )));
        }
        let row = self
            .state
            .rows
            .get(index)
            .cloned()
            .ok_or(ConsoleError::RowIndex {
                index,
                len: self.state.rows.len(),
            })?;
        Ok(DeleteTicket { index, row })
    }

    /// Remove a successfully deleted row and decrement the total.
    ///
    /// The row is removed at its original index when it is still there,
    /// otherwise wherever it now sits. If a page committed in the meantime no
    /// longer contains it, that page already reflects the delete and nothing
    /// changes.
    pub fn complete_delete(&mut self, ticket: &DeleteTicket<R>) -> Option<R> {
        if self.is_torn_down() || !self.state.authorized {
            return None;
        }
        let id = ticket.row.identity();
        let at_index = self
            .state
            .rows
            .get(ticket.index)
            .is_some_and(|r| r.identity() == id);
        let position = if at_index {
            Some(ticket.index)
        } else {
            self.state.rows.iter().position(|r| r.identity() == id)
        };

        let Some(index) = position else {
            debug!(kind = %R::KIND, %id, "deleted row already gone from page");
            return None;
        };
        let removed = self.state.rows.remove(index);
        self.state.pagination.total = self.state.pagination.total.saturating_sub(1);
        Some(removed)
    }
}

impl<R: Resource> Drop for ListController<R> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::{NoticeLevel, NoticeLog};
    use crate::types::Machine;

    fn machine(n: usize) -> Machine {
        Machine {
            owner: "acme".into(),
            name: format!("m{n:02}"),
            created_time: String::new(),
            updated_time: String::new(),
            expire_time: String::new(),
            display_name: format!("Machine {}", 99 - n),
            region: String::new(),
            zone: String::new(),
            category: String::new(),
            kind: String::new(),
            size: String::new(),
            tag: String::new(),
            state: String::new(),
            image: String::new(),
            public_ip: String::new(),
            private_ip: String::new(),
            extra: Default::default(),
        }
    }

    fn page(range: std::ops::Range<usize>, total: u64) -> Page<Machine> {
        Page {
            rows: range.map(machine).collect(),
            total,
        }
    }

    fn controller() -> (ListController<Machine>, Arc<NoticeLog>) {
        let log = Arc::new(NoticeLog::new());
        let c = ListController::new(
            ConsoleHttpClient::with_base_url("http://127.0.0.1:9"),
            Machine::binding().unwrap(),
            "",
            10,
            log.clone(),
        );
        (c, log)
    }

    fn loaded() -> (ListController<Machine>, Arc<NoticeLog>) {
        let (mut c, log) = controller();
        let t = c.mount().unwrap();
        assert_eq!(c.complete(t, Ok(page(0..10, 25))), Completion::Committed);
        (c, log)
    }

    fn names(c: &ListController<Machine>) -> Vec<String> {
        c.rows().iter().map(|m| m.name.clone()).collect()
    }

    #[test]
    fn test_mount_enters_loading_with_defaults() {
        let (mut c, _) = controller();
        assert_eq!(c.phase(), Phase::Idle);
        let t = c.mount().unwrap();
        assert_eq!(c.phase(), Phase::Loading);
        assert!(c.is_loading());
        assert_eq!(t.seq, 1);
        assert_eq!(t.query.page, 1);
        assert_eq!(t.query.page_size, 10);
        assert_eq!(t.query.filter, Filter::None);
    }

    #[test]
    fn test_success_replaces_rows_and_total() {
        let (c, _) = loaded();
        assert_eq!(c.phase(), Phase::Loaded);
        assert!(!c.is_loading());
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.pagination().total, 25);
    }

    #[test]
    fn test_oversized_page_is_truncated() {
        let (mut c, _) = controller();
        let t = c.mount().unwrap();
        c.complete(t, Ok(page(0..15, 15)));
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.pagination().total, 15);
    }

    #[test]
    fn test_stale_response_does_not_overwrite_newer() {
        let (mut c, _) = controller();
        let first = c.mount().unwrap();
        let second = c
            .begin(Trigger::Paginate {
                current: 3,
                page_size: 10,
            })
            .unwrap();

        assert_eq!(c.complete(second, Ok(page(20..25, 25))), Completion::Committed);
        assert_eq!(c.complete(first, Ok(page(0..10, 25))), Completion::Stale);
        assert_eq!(c.rows().len(), 5);
        assert_eq!(c.pagination().current, 3);
    }

    #[test]
    fn test_stale_completion_keeps_loading() {
        let (mut c, _) = controller();
        let first = c.mount().unwrap();
        let _second = c.begin(Trigger::Refresh).unwrap();
        assert_eq!(c.complete(first, Ok(page(0..10, 25))), Completion::Stale);
        assert!(c.is_loading());
        assert!(c.rows().is_empty());
    }

    #[test]
    fn test_denied_switches_to_unauthorized_and_keeps_rows() {
        let (mut c, log) = loaded();
        let t = c.begin(Trigger::Refresh).unwrap();
        let outcome = c.complete(t, Err(ConsoleError::Denied("Unauthorized operation".into())));
        assert_eq!(outcome, Completion::Denied);
        assert_eq!(c.phase(), Phase::Unauthorized);
        assert!(!c.is_authorized());
        assert!(!c.is_loading());
        assert_eq!(c.rows().len(), 10);
        assert!(log.notices().is_empty(), "denial is not a toast");
    }

    #[test]
    fn test_success_after_denial_restores_authorized() {
        let (mut c, _) = controller();
        let t = c.mount().unwrap();
        c.complete(t, Err(ConsoleError::Denied(String::new())));
        assert!(!c.is_authorized());

        let t = c.begin(Trigger::Refresh).unwrap();
        assert!(!c.is_authorized(), "still denied while loading");
        c.complete(t, Ok(page(0..3, 3)));
        assert!(c.is_authorized());
        assert_eq!(c.phase(), Phase::Loaded);
        assert_eq!(c.rows().len(), 3);
    }

    #[test]
    fn test_other_failure_notifies_and_retains_rows() {
        let (mut c, log) = loaded();
        let t = c
            .begin(Trigger::Paginate {
                current: 2,
                page_size: 10,
            })
            .unwrap();
        let outcome = c.complete(t, Err(ConsoleError::Server("database is locked".into())));
        assert_eq!(outcome, Completion::Failed);
        assert_eq!(c.phase(), Phase::Loaded);
        assert!(!c.is_loading());
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.pagination().total, 25);
        let notice = log.last().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert_eq!(notice.text, "database is locked");
    }

    #[test]
    fn test_failed_paginate_keeps_committed_pagination() {
        let (mut c, _) = loaded();
        let t = c
            .begin(Trigger::Paginate {
                current: 2,
                page_size: 5,
            })
            .unwrap();
        assert_eq!((t.query.page, t.query.page_size), (2, 5));
        assert_eq!(c.pagination(), Pagination { current: 1, page_size: 10, total: 25 });

        c.complete(t, Err(ConsoleError::Server("database is locked".into())));
        assert_eq!(c.pagination(), Pagination { current: 1, page_size: 10, total: 25 });
        assert!(c.rows().len() <= c.pagination().page_size as usize);

        // the failed request is not carried into the next fetch
        let t = c.begin(Trigger::Refresh).unwrap();
        assert_eq!((t.query.page, t.query.page_size), (1, 10));
    }

    #[test]
    fn test_denied_paginate_keeps_committed_pagination() {
        let (mut c, _) = loaded();
        let t = c
            .begin(Trigger::Paginate {
                current: 3,
                page_size: 10,
            })
            .unwrap();
        c.complete(t, Err(ConsoleError::Denied(String::new())));
        assert_eq!(c.pagination().current, 1);
        assert_eq!(c.pagination().total, 25);
    }

    #[test]
    fn test_delete_refused_while_unauthorized() {
        let (mut c, _) = loaded();
        let ticket = c.begin_delete(2).unwrap();
        let t = c.begin(Trigger::Refresh).unwrap();
        c.complete(t, Err(ConsoleError::Denied("Unauthorized operation".into())));

        assert!(matches!(c.begin_delete(2), Err(ConsoleError::Denied(_))));
        assert!(c.complete_delete(&ticket).is_none());
        assert_eq!(c.phase(), Phase::Unauthorized);
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.pagination().total, 25);
    }

    #[test]
    fn test_drop_cancels_page_token() {
        let (c, _) = loaded();
        let token = c.cancel_token();
        drop(c);
        assert!(token.is_cancelled());
    }

    #[test]
    fn test_selector_must_name_a_column() {
        let (mut c, _) = loaded();
        let err = c
            .begin(Trigger::Select(Some(FixedFilter::new("color", "red"))))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::UnknownColumn(_)));
        assert_eq!(c.state().selector, None);
    }

    #[test]
    fn test_search_slot_holds_only_latest_column() {
        let (mut c, _) = loaded();
        c.begin(Trigger::Search {
            column: "owner".into(),
            text: "acme".into(),
        })
        .unwrap();
        let t = c
            .begin(Trigger::Search {
                column: "name".into(),
                text: "web".into(),
            })
            .unwrap();
        assert_eq!(
            t.query.filter,
            Filter::FreeText {
                column: "name".into(),
                text: "web".into()
            }
        );
        let pairs = t.query.to_pairs("");
        assert_eq!(pairs.iter().filter(|(k, _)| k == "field").count(), 1);

        c.complete(t, Ok(page(0..2, 2)));
        assert_eq!(c.state().applied_search, SearchSpec::new("name", "web"));
    }

    #[test]
    fn test_search_on_unsearchable_column_is_rejected() {
        let (mut c, _) = loaded();
        let err = c
            .begin(Trigger::Search {
                column: "region".into(),
                text: "west".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ConsoleError::NotSearchable(_)));
        assert_eq!(c.phase(), Phase::Loaded, "rejected trigger changes nothing");
        assert_eq!(c.state().search, SearchSpec::default());
    }

    #[test]
    fn test_selector_applies_only_while_set() {
        let (mut c, _) = loaded();
        c.begin(Trigger::Search {
            column: "name".into(),
            text: "web".into(),
        })
        .unwrap();
        let t = c
            .begin(Trigger::Select(Some(FixedFilter::new("type", "Standard"))))
            .unwrap();
        assert!(matches!(t.query.filter, Filter::Fixed { .. }));

        let t = c.begin(Trigger::Select(None)).unwrap();
        assert!(matches!(t.query.filter, Filter::FreeText { .. }));
    }

    #[test]
    fn test_server_sort_and_client_sort_are_separate() {
        let (mut c, _) = loaded();
        let t = c
            .begin(Trigger::Sort(SortSpec::new("name", SortOrder::Descend)))
            .unwrap();
        assert_eq!(t.query.sort_field.as_deref(), Some("name"));
        assert_eq!(t.query.sort_order, SortOrder::Descend);

        let err = c
            .begin(Trigger::Sort(SortSpec::new("displayName", SortOrder::Ascend)))
            .unwrap_err();
        assert!(matches!(err, ConsoleError::NotSortable(_)));
        assert!(c.sort_visible("name", SortOrder::Ascend).is_err());
    }

    #[test]
    fn test_sort_visible_does_not_survive_next_fetch() {
        let (mut c, _) = loaded();
        c.sort_visible("displayName", SortOrder::Ascend).unwrap();
        // display names count down, so ascending reverses the page
        assert_eq!(c.rows()[0].name, "m09");
        assert!(!c.is_loading());

        let t = c.begin(Trigger::Refresh).unwrap();
        c.complete(t, Ok(page(0..10, 25)));
        assert_eq!(c.rows()[0].name, "m00");
    }

    #[test]
    fn test_teardown_discards_late_completion() {
        let (mut c, _) = loaded();
        let t = c.begin(Trigger::Refresh).unwrap();
        c.teardown();
        assert_eq!(c.complete(t, Ok(page(0..1, 1))), Completion::Discarded);
        assert_eq!(c.rows().len(), 10);
        assert!(matches!(c.begin(Trigger::Refresh), Err(ConsoleError::TornDown)));
    }

    #[test]
    fn test_cancelled_token_tears_down() {
        let (mut c, _) = loaded();
        let t = c.begin(Trigger::Refresh).unwrap();
        c.cancel_token().cancel();
        assert_eq!(c.phase(), Phase::TornDown);
        assert_eq!(c.complete(t, Ok(page(0..1, 1))), Completion::Discarded);
    }

    #[test]
    fn test_delete_removes_index_and_decrements_total() {
        let (mut c, _) = loaded();
        let before = names(&c);
        let ticket = c.begin_delete(2).unwrap();
        let removed = c.complete_delete(&ticket).unwrap();
        assert_eq!(removed.name, "m02");
        assert_eq!(c.rows().len(), 9);
        assert_eq!(c.pagination().total, 24);

        let mut expected = before;
        expected.remove(2);
        assert_eq!(names(&c), expected);
    }

    #[test]
    fn test_delete_out_of_range() {
        let (c, _) = loaded();
        assert!(matches!(
            c.begin_delete(10),
            Err(ConsoleError::RowIndex { index: 10, len: 10 })
        ));
    }

    #[test]
    fn test_two_deletes_in_flight_remove_both_rows() {
        let (mut c, _) = loaded();
        let first = c.begin_delete(2).unwrap();
        let second = c.begin_delete(5).unwrap();
        c.complete_delete(&first).unwrap();
        let removed = c.complete_delete(&second).unwrap();
        assert_eq!(removed.name, "m05");
        assert_eq!(c.rows().len(), 8);
        assert_eq!(c.pagination().total, 23);
    }

    #[test]
    fn test_delete_reconciles_with_page_committed_meanwhile() {
        let (mut c, _) = loaded();
        let ticket = c.begin_delete(2).unwrap();

        // The refreshed page was read before the delete landed and still has m02.
        let t = c.begin(Trigger::Refresh).unwrap();
        c.complete(t, Ok(page(1..11, 25)));
        let removed = c.complete_delete(&ticket).unwrap();
        assert_eq!(removed.name, "m02");
        assert_eq!(c.pagination().total, 24);
        assert_eq!(c.rows()[1].name, "m03");
    }

    #[test]
    fn test_delete_after_page_without_row_changes_nothing() {
        let (mut c, _) = loaded();
        let ticket = c.begin_delete(2).unwrap();

        let t = c.begin(Trigger::Refresh).unwrap();
        c.complete(t, Ok(page(3..13, 24)));
        assert!(c.complete_delete(&ticket).is_none());
        assert_eq!(c.rows().len(), 10);
        assert_eq!(c.pagination().total, 24);
    }

    #[test]
    fn test_domain_and_scope_triggers() {
        let (mut c, _) = loaded();
        let t = c
            .begin(Trigger::Domain {
                key: "status".into(),
                value: Some("disconnected".into()),
            })
            .unwrap();
        assert_eq!(t.query.domain.get("status").map(String::as_str), Some("disconnected"));

        c.begin(Trigger::Paginate {
            current: 3,
            page_size: 10,
        })
        .unwrap();
        let t = c.begin(Trigger::Scope("acme".into())).unwrap();
        assert_eq!(t.scope, "acme");
        assert_eq!(t.query.page, 1);
        assert_eq!(c.scope(), "acme");
    }
}
