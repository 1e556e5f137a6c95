use serde::Deserialize;

/// One image record from the search payload.
///
/// Only the fields the gallery actually shows are kept; the endpoint
/// returns a dozen more (page URL, uploader, dimensions) which serde
/// skips over.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageHit {
    /// Medium-resolution URL, used for gallery thumbnails
    #[serde(rename = "webformatURL")]
    pub webformat_url: String,
    /// Full-resolution URL, shown in the lightbox
    #[serde(rename = "largeImageURL")]
    pub large_image_url: String,
    /// Comma-separated tag list, doubles as the caption
    pub tags: String,
    pub likes: u64,
    pub views: u64,
    pub comments: u64,
    pub downloads: u64,
}

/// Payload returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SearchResponse {
    /// Matches for this page (at most one page worth)
    pub hits: Vec<ImageHit>,
    /// Total matches accessible through the API for this query
    #[serde(rename = "totalHits")]
    pub total_hits: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trimmed-down copy of a real payload, extra fields included on the
    // first hit to make sure they are ignored.
    const SAMPLE: &str = r#"{
        "total": 4692,
        "totalHits": 500,
        "hits": [
            {
                "id": 195893,
                "pageURL": "https://pixabay.com/en/blossom-bloom-flower-195893/",
                "type": "photo",
                "tags": "blossom, bloom, flower",
                "previewURL": "https://cdn.pixabay.com/photo/flower-195893_150.jpg",
                "webformatURL": "https://pixabay.com/get/35bbf209e1_640.jpg",
                "largeImageURL": "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg",
                "imageWidth": 4000,
                "imageHeight": 2250,
                "views": 7671,
                "downloads": 6439,
                "likes": 5,
                "comments": 2,
                "user": "Josch13"
            },
            {
                "tags": "sunflower",
                "webformatURL": "https://pixabay.com/get/sun_640.jpg",
                "largeImageURL": "https://pixabay.com/get/sun_1280.jpg",
                "views": 10,
                "downloads": 3,
                "likes": 1,
                "comments": 0
            }
        ]
    }"#;

    #[test]
    fn test_parse_sample_payload() {
        let response: SearchResponse = serde_json::from_str(SAMPLE).unwrap();

        assert_eq!(response.total_hits, 500);
        assert_eq!(response.hits.len(), 2);

        let first = &response.hits[0];
        assert_eq!(first.tags, "blossom, bloom, flower");
        assert_eq!(first.webformat_url, "https://pixabay.com/get/35bbf209e1_640.jpg");
        assert_eq!(first.large_image_url, "https://pixabay.com/get/ed6a99fd0a76647_1280.jpg");
        assert_eq!(first.likes, 5);
        assert_eq!(first.views, 7671);
        assert_eq!(first.comments, 2);
        assert_eq!(first.downloads, 6439);
    }

    #[test]
    fn test_missing_counter_is_an_error() {
        let broken = r#"{"totalHits": 1, "hits": [{"tags": "x",
            "webformatURL": "u", "largeImageURL": "u",
            "views": 1, "downloads": 1, "likes": 1}]}"#;

        assert!(serde_json::from_str::<SearchResponse>(broken).is_err());
    }
}
