//! Shared constants for rentswipe.

/// Storage key under which the durable dislike set is written.
pub const DISLIKED_LISTINGS_KEY: &str = "rentswipe.disliked_listings";

/// Image extensions accepted for absolute URLs (compared lowercase).
pub const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp"];

/// Substrings that mark a broken serialization of a missing image.
pub const IMAGE_PLACEHOLDER_MARKERS: &[&str] = &["undefined", "null"];

/// Thumbnail and placeholder hosts whose images are never worth a card.
pub const BLOCKED_IMAGE_HOSTS: &[&str] =
    &["via.placeholder.com", "placehold.it", "placehold.co", "dummyimage.com"];

/// Env var adding comma-separated hosts to [`BLOCKED_IMAGE_HOSTS`].
pub const BLOCKED_IMAGE_HOSTS_ENV: &str = "RENTSWIPE_BLOCKED_IMAGE_HOSTS";

/// Host relative image paths are resolved against when nothing is configured.
pub const DEFAULT_IMAGE_BASE_URL: &str = "https://images.rentswipe.app";

/// Capacity of the notification broadcast channel.
pub const DEFAULT_NOTIFICATION_CAPACITY: usize = 64;

/// Request timeout for the remote like authority.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

/// Base delay between retries of transient remote failures.
pub const DEFAULT_RETRY_BASE_DELAY_MS: u64 = 1000;
