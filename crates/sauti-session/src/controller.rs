//! Async driver that pairs a [`Session`] with a [`Transport`].

use sauti_client::{CacheMode, Transport, Url, decode_superlist};
use sauti_model::Superlist;
use sauti_persistence::DurableStore;
use sauti_query::{ApiEndpoints, Endpoint};

use crate::error::{Result, SessionError};
use crate::session::{Action, FetchOutcome, Session, Trigger};

/// Download location resolved by the export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLink {
    /// URL the export request resolved to.
    pub url: Url,
}

/// Runs the grid's operations against the remote API.
///
/// There is no automatic retry. A failed operation returns its error and
/// leaves the message in [`Session::error`].
#[derive(Debug)]
pub struct SessionController<S, T> {
    session: Session<S>,
    transport: T,
}

impl<S: DurableStore, T: Transport> SessionController<S, T> {
    /// Restore from the store and, when no page count is known, run the
    /// count query once.
    ///
    /// A failed count query is recorded on the session but does not fail
    /// initialisation; the cached rows stay usable.
    pub async fn init(store: S, endpoints: ApiEndpoints, transport: T) -> Result<Self> {
        let session = Session::restore(store, endpoints)?;
        let mut controller = Self { session, transport };

        if controller.session.needs_page_count()
            && let Err(err) = controller.fetch(Trigger::Bootstrap).await
        {
            tracing::warn!(%err, "page count bootstrap failed");
        }
        Ok(controller)
    }

    /// Wrap an existing session without touching the network.
    pub const fn from_parts(session: Session<S>, transport: T) -> Self {
        Self { session, transport }
    }

    /// Apply a filter mutation. It takes effect on the next fetch.
    pub fn dispatch(&mut self, action: Action) -> Result<()> {
        self.session.dispatch(action).inspect_err(|err| {
            self.session.record_error(err);
        })
    }

    /// Fetch the first page for the current filters.
    pub async fn update(&mut self) -> Result<FetchOutcome> {
        self.fetch(Trigger::Update).await
    }

    pub async fn go_next(&mut self) -> Result<FetchOutcome> {
        self.fetch(Trigger::Next).await
    }

    pub async fn go_prev(&mut self) -> Result<FetchOutcome> {
        self.fetch(Trigger::Prev).await
    }

    /// Wipe the store and return to default filters.
    pub fn reset(&mut self) -> Result<()> {
        self.session.reset()
    }

    /// Resolve the export download for the current filters.
    ///
    /// Always bypasses the response cache. Nothing is cached or persisted.
    pub async fn export_all(&mut self) -> Result<ExportLink> {
        self.session.clear_error();
        let result = self.export().await;
        if let Err(err) = &result {
            tracing::warn!(%err, "export failed");
            self.session.record_error(err);
        }
        result
    }

    /// Fetch the filter option catalogue.
    pub async fn load_options(&mut self) -> Result<Superlist> {
        let result = self.options().await;
        if let Err(err) = &result {
            tracing::warn!(%err, "loading filter options failed");
            self.session.record_error(err);
        }
        result
    }

    #[must_use]
    pub const fn session(&self) -> &Session<S> {
        &self.session
    }

    pub fn into_session(self) -> Session<S> {
        self.session
    }

    async fn fetch(&mut self, trigger: Trigger) -> Result<FetchOutcome> {
        let pending = match self.session.begin(trigger) {
            Ok(pending) => pending,
            Err(err) => {
                self.session.record_error(&err);
                return Err(err);
            }
        };
        let outcome = self.transport.get(&pending.url, CacheMode::Default).await;
        self.session.finish(pending, outcome)
    }

    async fn export(&self) -> Result<ExportLink> {
        let url = self.session.export_url()?;
        tracing::debug!(%url, "requesting export");
        let response = self.transport.get(&url, CacheMode::NoCache).await?;
        Ok(ExportLink { url: response.url })
    }

    async fn options(&self) -> Result<Superlist> {
        let url = self.session.endpoints().endpoint_url(Endpoint::Superlist)?;
        let response = self.transport.get(&url, CacheMode::Default).await?;
        decode_superlist(&response.data).map_err(SessionError::from)
    }
}
