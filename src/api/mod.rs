/// Image-search API module
///
/// This module handles:
/// - Building requests against the Pixabay endpoint (client.rs)
/// - Deserializing the response payload (types.rs)

pub mod client;
pub mod types;
