//! Cursor-driven pagination state machine.
//!
//! The tracker holds the server-issued [`Cursor`] and answers the two
//! questions the grid asks before a navigation fetch: may "next" run, and
//! what does "back" do at the current page.

use std::fmt;

use sauti_model::Cursor;

/// Observable pagination state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationState {
    /// No page has been displayed yet. The page count may be known.
    Idle,
    Loading,
    /// Both directions are available.
    Ready,
    /// `next - 1 >= pageCount`, or no next token. Takes precedence when a
    /// single page is also the first page.
    ExhaustedForward,
    /// At the first page.
    ExhaustedBackward,
}

/// What the "back" trigger does at the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Page unset or 1.
    Disabled,
    /// Page 2: fetch the first page from scratch, without a cursor.
    Requery,
    /// Page 3 and up: fetch with the `prev` token.
    CursorPrev(u64),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationTracker {
    cursor: Cursor,
    /// Set once a page of rows has been applied. The count query alone
    /// leaves the current page unset.
    shown: bool,
    loading: bool,
}

impl PaginationTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from the cursor of a persisted, displayed page.
    #[must_use]
    pub const fn with_cursor(cursor: Cursor) -> Self {
        Self {
            cursor,
            shown: true,
            loading: false,
        }
    }

    /// Start with only a page count, as left by the count query.
    #[must_use]
    pub const fn counted(page_count: Option<u64>) -> Self {
        Self {
            cursor: Cursor::new(None, None, page_count),
            shown: false,
            loading: false,
        }
    }

    #[must_use]
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    #[must_use]
    pub fn state(&self) -> PaginationState {
        if self.loading {
            PaginationState::Loading
        } else if !self.shown || self.cursor.is_empty() {
            PaginationState::Idle
        } else if !self.can_go_next() {
            PaginationState::ExhaustedForward
        } else if self.back_action() == BackAction::Disabled {
            PaginationState::ExhaustedBackward
        } else {
            PaginationState::Ready
        }
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    /// The page currently displayed.
    ///
    /// Unset until a page has been applied. Then `next - 1` while a next
    /// token exists; on the last page (no next token) the page count stands in.
    #[must_use]
    pub fn current_page(&self) -> Option<u64> {
        if !self.shown {
            return None;
        }
        match self.cursor.next {
            Some(next) => Some(next.saturating_sub(1)).filter(|page| *page > 0),
            None => self.cursor.page_count.filter(|count| *count > 0),
        }
    }

    /// Whether the "next" trigger may fetch.
    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.next_token().is_some()
    }

    /// The token a "next" fetch sends, or `None` when exhausted.
    #[must_use]
    pub fn next_token(&self) -> Option<u64> {
        let next = self.cursor.next?;
        let page_count = self.cursor.page_count?;
        (next.saturating_sub(1) < page_count).then_some(next)
    }

    /// Back-button policy by current page.
    #[must_use]
    pub fn back_action(&self) -> BackAction {
        match self.current_page() {
            None | Some(0 | 1) => BackAction::Disabled,
            Some(2) => BackAction::Requery,
            Some(_) => self
                .cursor
                .prev
                .map_or(BackAction::Disabled, BackAction::CursorPrev),
        }
    }

    /// `"<page> of <pageCount>"`, when both are known.
    #[must_use]
    pub fn page_label(&self) -> Option<String> {
        let page = self.current_page()?;
        let count = self.cursor.page_count.filter(|count| *count > 0)?;
        Some(format!("{page} of {count}"))
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
    }

    pub(crate) fn settle(&mut self) {
        self.loading = false;
    }

    /// Replace the cursor with what the server returned.
    pub(crate) fn apply(&mut self, cursor: Cursor) {
        self.cursor = cursor;
        self.shown = true;
        self.loading = false;
    }

    /// Record the page count from the count query, keeping the tokens.
    pub(crate) fn learn_page_count(&mut self, page_count: Option<u64>) {
        self.cursor.page_count = page_count;
        self.loading = false;
    }

    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for PaginationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Ready => "ready",
            Self::ExhaustedForward => "last page",
            Self::ExhaustedBackward => "first page",
        };
        f.write_str(text)
    }
}
