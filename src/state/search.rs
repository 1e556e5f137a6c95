use crate::api::client::PAGE_SIZE;

/// Lifecycle of the current search session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing to show (startup, or a search that failed before any page landed)
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// Results on screen and more pages exist
    HasMore,
    /// Results on screen and the last page has been reached
    End,
}

/// Identifies one fetch.
///
/// The token is matched against the state on completion so a superseded
/// request can never touch the screen; the page is the page number the
/// fetch asked for, recorded only once it succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub token: u64,
    pub page: u32,
}

/// Pagination bookkeeping for the current query.
///
/// `page` is the last page that actually landed (0 before the first
/// success). It advances only in `apply_success`, so a failed fetch can
/// never push the session past results it does not have.
///
/// Two counters guard against late responses:
/// - `token` increments on every fetch; a completion carrying an older
///   token is stale and gets dropped.
/// - `session` increments on every new submit; thumbnail and full-size
///   image tasks outlive individual fetches, so they carry the session
///   instead and are dropped wholesale when a new query takes over.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    page: u32,
    total_hits: u64,
    phase: Phase,
    token: u64,
    session: u64,
}

impl SearchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn total_hits(&self) -> u64 {
        self.total_hits
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == Phase::Loading
    }

    /// True while the load-more control should be clickable
    pub fn has_more(&self) -> bool {
        self.phase == Phase::HasMore
    }

    /// Identifier of the query session currently on screen
    pub fn session(&self) -> u64 {
        self.session
    }

    /// Start a fresh search. Prior pagination is discarded and every task
    /// still in flight for the old query is orphaned.
    pub fn begin_search(&mut self, query: &str) -> RequestTicket {
        self.query = query.trim().to_string();
        self.page = 0;
        self.total_hits = 0;
        self.phase = Phase::Loading;
        let ticket = self.next_ticket(1);
        self.session = ticket.token;
        ticket
    }

    /// Start fetching the next page. Refused unless more pages exist, which
    /// also rules out a second fetch while one is already in flight.
    pub fn begin_load_more(&mut self) -> Option<RequestTicket> {
        if self.phase != Phase::HasMore {
            return None;
        }
        self.phase = Phase::Loading;
        Some(self.next_ticket(self.page + 1))
    }

    fn next_ticket(&mut self, page: u32) -> RequestTicket {
        self.token += 1;
        RequestTicket {
            token: self.token,
            page,
        }
    }

    /// True if `token` identifies the most recent fetch
    pub fn is_current(&self, token: u64) -> bool {
        self.token == token
    }

    /// True if `session` identifies the query session currently on screen
    pub fn is_current_session(&self, session: u64) -> bool {
        self.session == session
    }

    /// Record a successful fetch. Returns false (and changes nothing) for a
    /// stale ticket.
    pub fn apply_success(&mut self, ticket: RequestTicket, item_count: usize, total_hits: u64) -> bool {
        if !self.is_current(ticket.token) {
            return false;
        }
        self.page = ticket.page;
        self.total_hits = total_hits;
        self.phase = if item_count == 0 || u64::from(self.page) >= last_page(total_hits) {
            Phase::End
        } else {
            Phase::HasMore
        };
        true
    }

    /// Record a failed fetch. The page counter is left untouched and the
    /// session returns to a state where a retry (submit or click) works.
    pub fn apply_failure(&mut self, token: u64) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.phase = if self.page == 0 { Phase::Idle } else { Phase::HasMore };
        true
    }
}

/// Canonical last-page formula: ceil(total_hits / page_size)
fn last_page(total_hits: u64) -> u64 {
    total_hits.div_ceil(u64::from(PAGE_SIZE))
}
