use iced::keyboard::{self, key};
use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, scrollable, text, text_input, Stack};
use iced::{Alignment, Element, Length, Subscription, Task, Theme};

// Declare the application modules
mod api;
mod media;
mod state;
mod ui;

use api::client::{ApiError, SearchClient};
use api::types::SearchResponse;
use state::gallery::{Gallery, ThumbState};
use state::search::{Phase, RequestTicket, SearchState};
use ui::lightbox::Lightbox;
use ui::toast::{Severity, Toasts};

/// Shown when a query matches nothing at all
const NO_RESULTS_MESSAGE: &str =
    "Sorry, there are no images matching your search query. Please try again!";

/// Shown once when the last page of a query has been fetched
const END_OF_RESULTS_MESSAGE: &str =
    "We're sorry, but you've reached the end of search results.";

/// Completion of one search or load-more fetch
#[derive(Debug, Clone)]
struct FetchOutcome {
    ticket: RequestTicket,
    result: Result<SearchResponse, ApiError>,
}

/// Main application state
struct Pixelfind {
    /// Search API client, cloned into every fetch task
    api: SearchClient,
    /// HTTP client for image downloads, shared with the API client
    http: reqwest::Client,
    /// Text currently in the search field
    input: String,
    /// Pagination bookkeeping for the current query
    search: SearchState,
    /// Rendered results for the current query
    gallery: Gallery,
    /// Transient notification banners
    toasts: Toasts,
    /// Full-screen viewer; `None` while closed
    lightbox: Option<Lightbox>,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// Text edited in the search field
    QueryChanged(String),
    /// Search submitted (Enter in the field or the Search button)
    SearchSubmitted,
    /// Load-more button pressed
    LoadMorePressed,
    /// A search or load-more fetch finished, success or failure
    FetchFinished(FetchOutcome),
    /// A thumbnail download finished
    ThumbnailLoaded {
        session: u64,
        index: usize,
        result: Result<Handle, String>,
    },
    /// A full-size download for the lightbox finished
    FullImageLoaded {
        session: u64,
        index: usize,
        result: Result<Handle, String>,
    },
    /// A gallery card was clicked
    LightboxOpened(usize),
    LightboxClosed,
    LightboxNext,
    LightboxPrev,
    /// A banner was clicked away
    ToastDismissed(u64),
    /// A banner's auto-dismiss timer fired
    ToastExpired(u64),
}

impl Pixelfind {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let http = reqwest::Client::new();
        let api = SearchClient::new(http.clone());

        println!("🔍 Pixelfind ready");

        (
            Pixelfind {
                api,
                http,
                input: String::new(),
                search: SearchState::new(),
                gallery: Gallery::new(),
                toasts: Toasts::new(),
                lightbox: None,
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::QueryChanged(value) => {
                self.input = value;
                Task::none()
            }
            Message::SearchSubmitted => {
                let query = self.input.trim().to_string();
                if query.is_empty() {
                    // Whitespace submit: no fetch, no state change
                    return Task::none();
                }

                self.gallery.clear();
                self.lightbox = None;
                let ticket = self.search.begin_search(&query);
                self.fetch(ticket)
            }
            Message::LoadMorePressed => match self.search.begin_load_more() {
                Some(ticket) => self.fetch(ticket),
                // Already loading or at the end; rapid clicks land here
                None => Task::none(),
            },
            Message::FetchFinished(outcome) => self.finish_fetch(outcome),
            Message::ThumbnailLoaded {
                session,
                index,
                result,
            } => {
                if !self.search.is_current_session(session) {
                    // Belongs to a query that has since been replaced
                    return Task::none();
                }
                match result {
                    Ok(handle) => self.gallery.set_thumbnail(index, ThumbState::Ready(handle)),
                    Err(error) => {
                        eprintln!("⚠️  Thumbnail {} failed: {}", index, error);
                        self.gallery.set_thumbnail(index, ThumbState::Failed);
                    }
                }
                Task::none()
            }
            Message::FullImageLoaded {
                session,
                index,
                result,
            } => {
                if !self.search.is_current_session(session) {
                    return Task::none();
                }
                match result {
                    Ok(handle) => self.gallery.set_full_image(index, handle),
                    Err(error) => {
                        eprintln!("⚠️  Full image {} failed: {}", index, error);
                        if let Some(lightbox) = &mut self.lightbox {
                            if lightbox.index() == index {
                                lightbox.set_error(error);
                            }
                        }
                    }
                }
                Task::none()
            }
            Message::LightboxOpened(index) => {
                if self.gallery.get(index).is_none() {
                    return Task::none();
                }
                self.lightbox = Some(Lightbox::open(index));
                self.fetch_full_image(index)
            }
            Message::LightboxClosed => {
                self.lightbox = None;
                Task::none()
            }
            Message::LightboxNext => {
                let len = self.gallery.len();
                let target = match &mut self.lightbox {
                    Some(lightbox) if len > 0 => {
                        lightbox.next(len);
                        Some(lightbox.index())
                    }
                    _ => None,
                };
                match target {
                    Some(index) => self.fetch_full_image(index),
                    None => Task::none(),
                }
            }
            Message::LightboxPrev => {
                let len = self.gallery.len();
                let target = match &mut self.lightbox {
                    Some(lightbox) if len > 0 => {
                        lightbox.prev(len);
                        Some(lightbox.index())
                    }
                    _ => None,
                };
                match target {
                    Some(index) => self.fetch_full_image(index),
                    None => Task::none(),
                }
            }
            Message::ToastDismissed(id) | Message::ToastExpired(id) => {
                self.toasts.dismiss(id);
                Task::none()
            }
        }
    }

    /// Spawn the single fetch for `ticket`. Exactly one `FetchFinished`
    /// comes back per ticket, success or failure, so the loading indicator
    /// always clears.
    fn fetch(&self, ticket: RequestTicket) -> Task<Message> {
        let api = self.api.clone();
        let query = self.search.query().to_string();

        println!("🔍 Fetching page {} for '{}'", ticket.page, query);

        Task::perform(
            async move {
                let result = api.search(&query, ticket.page).await;
                FetchOutcome { ticket, result }
            },
            Message::FetchFinished,
        )
    }

    /// Apply a fetch completion: advance pagination, mount the new page,
    /// re-clamp the lightbox and queue thumbnail downloads.
    fn finish_fetch(&mut self, outcome: FetchOutcome) -> Task<Message> {
        let FetchOutcome { ticket, result } = outcome;

        match result {
            Ok(response) => {
                let SearchResponse { hits, total_hits } = response;
                let count = hits.len();

                if !self.search.apply_success(ticket, count, total_hits) {
                    // Stale response: a newer submit owns the view now
                    return Task::none();
                }

                println!("📷 Page {}: {} hits ({} total)", ticket.page, count, total_hits);

                if count == 0 && ticket.page == 1 {
                    return self.notify(Severity::Error, NO_RESULTS_MESSAGE);
                }

                let range = if ticket.page == 1 {
                    self.gallery.replace(hits)
                } else {
                    self.gallery.append(hits)
                };

                // Keep the viewer on a live entry now that the gallery moved
                if let Some(lightbox) = &mut self.lightbox {
                    if !lightbox.clamp(self.gallery.len()) {
                        self.lightbox = None;
                    }
                }

                let session = self.search.session();
                let mut tasks: Vec<Task<Message>> = range
                    .map(|index| self.fetch_thumbnail(session, index))
                    .collect();

                if ticket.page == 1 {
                    tasks.push(self.notify(
                        Severity::Success,
                        format!("Found {} images", total_hits),
                    ));
                }
                if self.search.phase() == Phase::End {
                    tasks.push(self.notify(Severity::Success, END_OF_RESULTS_MESSAGE));
                }

                Task::batch(tasks)
            }
            Err(error) => {
                if !self.search.apply_failure(ticket.token) {
                    return Task::none();
                }
                eprintln!("❌ Fetch failed: {}", error);
                self.notify(Severity::Error, format!("Error fetching images: {}", error))
            }
        }
    }

    /// Queue the thumbnail download for one gallery entry.
    fn fetch_thumbnail(&self, session: u64, index: usize) -> Task<Message> {
        let Some(entry) = self.gallery.get(index) else {
            return Task::none();
        };
        let http = self.http.clone();
        let url = entry.hit.webformat_url.clone();

        Task::perform(media::fetch_thumbnail(http, url), move |result| {
            Message::ThumbnailLoaded {
                session,
                index,
                result,
            }
        })
    }

    /// Queue the full-size download for the lightbox, unless a previous
    /// view already cached it.
    fn fetch_full_image(&self, index: usize) -> Task<Message> {
        let Some(entry) = self.gallery.get(index) else {
            return Task::none();
        };
        if entry.full_image.is_some() {
            return Task::none();
        }
        let session = self.search.session();
        let http = self.http.clone();
        let url = entry.hit.large_image_url.clone();

        Task::perform(media::fetch_full(http, url), move |result| {
            Message::FullImageLoaded {
                session,
                index,
                result,
            }
        })
    }

    /// Show a banner and schedule its auto-dismissal.
    fn notify(&mut self, severity: Severity, message: impl Into<String>) -> Task<Message> {
        let id = self.toasts.push(severity, message);

        Task::perform(
            async move {
                tokio::time::sleep(ui::toast::DISMISS_AFTER).await;
                id
            },
            Message::ToastExpired,
        )
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        let search_bar = row![
            text_input("Search images...", &self.input)
                .on_input(Message::QueryChanged)
                .on_submit(Message::SearchSubmitted)
                .padding(10)
                .width(Length::Fixed(360.0)),
            button("Search").on_press(Message::SearchSubmitted).padding(10),
        ]
        .spacing(10);

        let loading = self.search.is_loading();

        let mut results = column![ui::gallery::view(&self.gallery)]
            .spacing(20)
            .align_x(Alignment::Center);

        if self.gallery.is_empty() && self.search.phase() == Phase::Idle {
            results = results.push(text("Type a query and press Enter to search for images.").size(16));
        }

        // Loading indicator for the initial round trip; load-more shows its
        // own disabled button below instead
        if loading && self.gallery.is_empty() {
            results = results.push(text("Loading images...").size(16));
        }

        if self.search.has_more() || (loading && self.search.page() > 0) {
            let label = if loading { "Loading..." } else { "Load more" };
            results = results.push(
                button(text(label).size(16))
                    .on_press_maybe((!loading).then_some(Message::LoadMorePressed))
                    .padding(10),
            );
        }

        let base: Element<Message> = container(
            column![
                search_bar,
                scrollable(container(results).center_x(Length::Fill).padding(10))
                    .height(Length::Fill)
                    .width(Length::Fill),
            ]
            .spacing(20)
            .padding(24)
            .align_x(Alignment::Center),
        )
        .width(Length::Fill)
        .height(Length::Fill)
        .into();

        let mut layers = vec![base];
        if let Some(lightbox) = &self.lightbox {
            layers.push(ui::lightbox::view(lightbox, &self.gallery));
        }
        if !self.toasts.is_empty() {
            layers.push(ui::toast::view(&self.toasts));
        }

        Stack::with_children(layers).into()
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Keyboard shortcuts for the lightbox
    fn subscription(&self) -> Subscription<Message> {
        keyboard::on_key_press(|pressed, _modifiers| match pressed {
            keyboard::Key::Named(key::Named::Escape) => Some(Message::LightboxClosed),
            keyboard::Key::Named(key::Named::ArrowRight) => Some(Message::LightboxNext),
            keyboard::Key::Named(key::Named::ArrowLeft) => Some(Message::LightboxPrev),
            _ => None,
        })
    }
}

fn main() -> iced::Result {
    iced::application("Pixelfind", Pixelfind::update, Pixelfind::view)
        .theme(Pixelfind::theme)
        .subscription(Pixelfind::subscription)
        .window_size(iced::Size::new(1280.0, 860.0))
        .centered()
        .run_with(Pixelfind::new)
}
