//! The single aggregate behind the grid.
//!
//! [`Session`] owns the filters, the pagination tracker, the cached rows and
//! the durable store. Filters change only through [`Action`]s; fetches are
//! split into [`Session::begin`] (build the request, take the busy gate) and
//! [`Session::finish`] (apply or discard the response), so the I/O in between
//! can be driven by any async runtime.
//!
//! Every fetch carries a generation number. A response whose generation is
//! no longer current (the session was reset meanwhile) is dropped.

use sauti_client::{TransportError, TransportResponse, Url, decode_page};
use sauti_model::{Currency, DateRange, Dimension, FilterState, FilterValues, RowRecord};
use sauti_persistence::{
    DurableStore, load_session, store_cursor, store_dates, store_page, wipe_session,
};
use sauti_query::{ApiEndpoints, QueryVariant, restore_query};

use crate::busy::BusyReason;
use crate::error::{Result, SessionError};
use crate::tracker::{BackAction, PaginationTracker};

/// Named filter mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    SetDimension(Dimension, FilterValues),
    SetCurrency(Currency),
    /// `None` clears the range and its persisted record.
    SetDateRange(Option<DateRange>),
}

/// What started a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The one-off count query issued when no page count is known.
    Bootstrap,
    /// First page for the current filters.
    Update,
    Next,
    Prev,
}

/// A request handed out by [`Session::begin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFetch {
    pub generation: u64,
    pub trigger: Trigger,
    pub url: Url,
}

/// What [`Session::finish`] did with a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Rows and cursor were replaced.
    Applied { rows: usize },
    /// The count query set the page count.
    PageCountLearned(Option<u64>),
    /// The response belonged to a superseded generation.
    Discarded,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    generation: u64,
}

#[derive(Debug)]
pub struct Session<S> {
    store: S,
    endpoints: ApiEndpoints,
    filters: FilterState,
    tracker: PaginationTracker,
    rows: Vec<RowRecord>,
    last_query: Option<String>,
    error: Option<String>,
    generation: u64,
    in_flight: Option<InFlight>,
}

impl<S: DurableStore> Session<S> {
    /// A fresh session with default filters. The store is left untouched.
    pub fn new(store: S, endpoints: ApiEndpoints) -> Self {
        Self {
            store,
            endpoints,
            filters: FilterState::new(),
            tracker: PaginationTracker::new(),
            rows: Vec::new(),
            last_query: None,
            error: None,
            generation: 0,
            in_flight: None,
        }
    }

    /// Rebuild a session from whatever the store holds.
    ///
    /// Filters come from the persisted request URL; the `dates` record fills
    /// in the range when the URL has none. Cached rows are restored for
    /// immediate display.
    pub fn restore(store: S, endpoints: ApiEndpoints) -> Result<Self> {
        let persisted = load_session(&store)?;
        let mut session = Self::new(store, endpoints);

        if let Some(query) = &persisted.query {
            let restored = restore_query(query)?;
            session.filters = restored.filters;
            if let Some(err) = restored.rejected_range {
                session.error = Some(err.user_message());
            }
        }
        if session.filters.date_range().is_none()
            && let Some(range) = persisted.dates
            && let Err(err) = session.filters.set_date_range(Some(range))
        {
            tracing::warn!(%err, "persisted date range rejected");
            session.error = Some(err.user_message());
        }

        let cursor = persisted.cursor.unwrap_or_default();
        // `q` is only written with a displayed page; tokens only come from one.
        let shown = persisted.query.is_some() || cursor.next.is_some() || cursor.prev.is_some();
        session.tracker = if shown {
            PaginationTracker::with_cursor(cursor)
        } else {
            PaginationTracker::counted(cursor.page_count)
        };
        session.rows = persisted.rows;
        session.last_query = persisted.query;

        tracing::info!(
            rows = session.rows.len(),
            page = ?session.tracker.current_page(),
            "restored session"
        );
        Ok(session)
    }

    /// Apply a filter mutation. Takes effect on the next fetch only.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        match action {
            Action::SetDimension(dimension, values) => {
                self.filters.set_dimension(dimension, values);
            }
            Action::SetCurrency(currency) => self.filters.set_currency(currency),
            Action::SetDateRange(range) => {
                self.filters.set_date_range(range)?;
                store_dates(&mut self.store, self.filters.date_range())?;
            }
        }
        Ok(())
    }

    /// Build the request for a pagination trigger and take the busy gate.
    pub fn begin(&mut self, trigger: Trigger) -> Result<PendingFetch> {
        if self.in_flight.is_some() {
            return Err(SessionError::Busy(BusyReason::GettingData));
        }

        let variant = match trigger {
            Trigger::Bootstrap => QueryVariant::Count,
            Trigger::Update => QueryVariant::Paged { cursor: None },
            Trigger::Next => {
                let token = self.tracker.next_token().ok_or(SessionError::Disabled("next"))?;
                QueryVariant::Paged {
                    cursor: Some(token),
                }
            }
            Trigger::Prev => match self.tracker.back_action() {
                BackAction::Disabled => return Err(SessionError::Disabled("previous")),
                BackAction::Requery => QueryVariant::Paged { cursor: None },
                BackAction::CursorPrev(token) => QueryVariant::Paged {
                    cursor: Some(token),
                },
            },
        };
        let url = self.endpoints.request_url(&self.filters, variant)?;

        self.generation += 1;
        self.in_flight = Some(InFlight {
            generation: self.generation,
        });
        self.tracker.begin();
        self.error = None;

        tracing::debug!(generation = self.generation, ?trigger, %url, "fetch started");
        Ok(PendingFetch {
            generation: self.generation,
            trigger,
            url,
        })
    }

    /// Apply the result of a fetch started by [`Session::begin`].
    ///
    /// On failure nothing but the error message and the busy gate changes.
    pub fn finish(
        &mut self,
        pending: PendingFetch,
        outcome: std::result::Result<TransportResponse, TransportError>,
    ) -> Result<FetchOutcome> {
        if self.in_flight.map(|f| f.generation) != Some(pending.generation) {
            tracing::warn!(
                generation = pending.generation,
                current = self.generation,
                "discarding stale response"
            );
            return Ok(FetchOutcome::Discarded);
        }
        self.in_flight = None;
        self.tracker.settle();

        match self.apply(&pending, outcome) {
            Ok(outcome) => Ok(outcome),
            Err(err) => {
                tracing::warn!(trigger = ?pending.trigger, %err, "fetch failed");
                self.error = Some(err.user_message());
                Err(err)
            }
        }
    }

    fn apply(
        &mut self,
        pending: &PendingFetch,
        outcome: std::result::Result<TransportResponse, TransportError>,
    ) -> Result<FetchOutcome> {
        let response = outcome?;
        let page = decode_page(&response.data)?;

        if pending.trigger == Trigger::Bootstrap {
            let mut cursor = *self.tracker.cursor();
            cursor.page_count = page.page_count;
            store_cursor(&mut self.store, &cursor)?;
            self.tracker.learn_page_count(page.page_count);
            tracing::info!(page_count = ?page.page_count, "learned page count");
            return Ok(FetchOutcome::PageCountLearned(page.page_count));
        }

        let cursor = page.cursor();
        let request_url = pending.url.to_string();
        store_page(
            &mut self.store,
            &request_url,
            &cursor,
            &response.data,
            &page.records,
        )?;

        let rows = page.records.len();
        self.rows = page.records;
        self.tracker.apply(cursor);
        self.last_query = Some(request_url);
        tracing::info!(rows, page = ?self.tracker.current_page(), "applied page");
        Ok(FetchOutcome::Applied { rows })
    }

    /// Wipe every durable key and return to defaults.
    ///
    /// Any fetch still in flight becomes stale.
    pub fn reset(&mut self) -> Result<()> {
        self.generation += 1;
        self.in_flight = None;
        self.filters.reset();
        self.tracker.clear();
        self.rows.clear();
        self.last_query = None;
        self.error = None;
        wipe_session(&mut self.store)?;
        Ok(())
    }

    /// Export-variant request URL for the current filters.
    pub fn export_url(&self) -> Result<Url> {
        Ok(self.endpoints.request_url(&self.filters, QueryVariant::Export)?)
    }

    /// True when no page count is known and the count query should run.
    #[must_use]
    pub fn needs_page_count(&self) -> bool {
        self.tracker.cursor().page_count.is_none()
    }

    pub(crate) fn record_error(&mut self, err: &SessionError) {
        self.error = Some(err.user_message());
    }

    pub(crate) fn clear_error(&mut self) {
        self.error = None;
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn tracker(&self) -> &PaginationTracker {
        &self.tracker
    }

    #[must_use]
    pub fn rows(&self) -> &[RowRecord] {
        &self.rows
    }

    /// Request URL of the last applied page.
    #[must_use]
    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Message from the most recent failure, cleared when a new fetch starts.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Busy reason while a pagination fetch is in flight.
    #[must_use]
    pub const fn busy(&self) -> Option<BusyReason> {
        match self.in_flight {
            Some(_) => Some(BusyReason::GettingData),
            None => None,
        }
    }

    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub const fn endpoints(&self) -> &ApiEndpoints {
        &self.endpoints
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sauti_persistence::{MemoryStore, StoreKey};
    use serde_json::json;

    fn session() -> Session<MemoryStore> {
        let endpoints = ApiEndpoints::new("https://api.example.org/sauti/").unwrap();
        Session::new(MemoryStore::new(), endpoints)
    }

    fn ok(url: &Url, data: serde_json::Value) -> std::result::Result<TransportResponse, TransportError> {
        Ok(TransportResponse {
            url: url.clone(),
            data,
        })
    }

    #[test]
    fn busy_gate_rejects_second_trigger() {
        let mut session = session();
        let _pending = session.begin(Trigger::Update).unwrap();
        assert!(matches!(
            session.begin(Trigger::Update),
            Err(SessionError::Busy(BusyReason::GettingData))
        ));
        assert_eq!(session.busy(), Some(BusyReason::GettingData));
    }

    #[test]
    fn edits_during_flight_do_not_touch_the_pending_request() {
        let mut session = session();
        let pending = session.begin(Trigger::Update).unwrap();
        session
            .dispatch(Action::SetDimension(Dimension::Countries, "UGA".into()))
            .unwrap();

        let data = json!({"records": [{"market": "Busia"}], "next": 2, "pageCount": 5});
        let url = pending.url.clone();
        session.finish(pending, ok(&url, data)).unwrap();

        assert_eq!(
            session.last_query(),
            Some("https://api.example.org/sauti/client/?currency=USD")
        );
        assert_eq!(session.filters().values(Dimension::Countries), ["UGA"]);
    }

    #[test]
    fn stale_generation_is_discarded() {
        let mut session = session();
        let pending = session.begin(Trigger::Update).unwrap();
        session.reset().unwrap();

        let url = pending.url.clone();
        let outcome = session
            .finish(pending, ok(&url, json!({"records": [{"a": 1}], "next": 2, "pageCount": 3})))
            .unwrap();
        assert_eq!(outcome, FetchOutcome::Discarded);
        assert!(session.rows().is_empty());
        assert!(session.tracker().cursor().is_empty());
        assert_eq!(session.store().get(StoreKey::Query).unwrap(), None);
    }

    #[test]
    fn failure_keeps_rows_and_clears_busy() {
        let mut session = session();
        let pending = session.begin(Trigger::Update).unwrap();
        let url = pending.url.clone();
        session
            .finish(pending, ok(&url, json!({"records": [{"a": 1}], "next": 2, "pageCount": 3})))
            .unwrap();

        let pending = session.begin(Trigger::Next).unwrap();
        let err = session
            .finish(pending, Err(TransportError::Network("reset by peer".into())))
            .unwrap_err();

        assert!(matches!(err, SessionError::Network(_)));
        assert_eq!(session.busy(), None);
        assert_eq!(session.rows().len(), 1);
        assert_eq!(session.tracker().cursor().next, Some(2));
        assert!(session.error().unwrap().contains("connection"));
    }

    #[test]
    fn bootstrap_only_learns_page_count() {
        let mut session = session();
        assert!(session.needs_page_count());
        let pending = session.begin(Trigger::Bootstrap).unwrap();
        assert_eq!(
            pending.url.as_str(),
            "https://api.example.org/sauti/client/?currency=USD"
        );
        let url = pending.url.clone();
        let outcome = session
            .finish(pending, ok(&url, json!({"records": [{"a": 1}], "next": 2, "pageCount": 9})))
            .unwrap();

        assert_eq!(outcome, FetchOutcome::PageCountLearned(Some(9)));
        assert!(session.rows().is_empty());
        assert_eq!(session.tracker().cursor().page_count, Some(9));
        assert!(!session.needs_page_count());
        assert_eq!(session.store().get(StoreKey::Query).unwrap(), None);
        assert_eq!(session.tracker().current_page(), None);
        assert_eq!(session.tracker().page_label(), None);
    }

    #[test]
    fn restored_page_count_without_a_page_stays_unset() {
        let mut store = MemoryStore::new();
        store
            .set(StoreKey::Page, r#"{"next":null,"prev":null,"pageCount":9}"#)
            .unwrap();
        let endpoints = ApiEndpoints::new("https://api.example.org/sauti/").unwrap();
        let session = Session::restore(store, endpoints).unwrap();

        assert!(!session.needs_page_count());
        assert_eq!(session.tracker().current_page(), None);
        assert_eq!(session.tracker().page_label(), None);
    }

    #[test]
    fn clearing_the_date_range_removes_its_record() {
        let mut session = session();
        let day = chrono::Utc::now().date_naive();
        let range = DateRange::new(day, day).unwrap();
        session.dispatch(Action::SetDateRange(Some(range))).unwrap();
        assert!(session.store().get(StoreKey::Dates).unwrap().is_some());

        session.dispatch(Action::SetDateRange(None)).unwrap();
        assert_eq!(session.store().get(StoreKey::Dates).unwrap(), None);
    }
}
