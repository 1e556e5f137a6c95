/// State management module
///
/// This module handles all application state, including:
/// - Pagination bookkeeping and the request token guard (search.rs)
/// - The rendered result collection for the current query (gallery.rs)

pub mod gallery;
pub mod search;
