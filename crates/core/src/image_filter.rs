//! Image-validity predicate deciding whether a listing can be shown as a card.
//!
//! A listing's raw image field is a comma-delimited list. The listing qualifies
//! when at least one piece survives [`is_valid_image_piece`].

use std::sync::LazyLock;

use url::Url;

use crate::constants::{
    BLOCKED_IMAGE_HOSTS, BLOCKED_IMAGE_HOSTS_ENV, IMAGE_EXTENSIONS, IMAGE_PLACEHOLDER_MARKERS,
};
use crate::env_config::env_list;

struct ImageFilter {
    blocked_hosts: Vec<Box<str>>,
}

static IMAGE_FILTER: LazyLock<ImageFilter> = LazyLock::new(ImageFilter::from_env);

impl ImageFilter {
    fn from_env() -> Self {
        Self::with_extra_hosts(env_list(BLOCKED_IMAGE_HOSTS_ENV))
    }

    fn with_extra_hosts(extra: Vec<String>) -> Self {
        let mut blocked_hosts: Vec<Box<str>> =
            BLOCKED_IMAGE_HOSTS.iter().map(|h| (*h).into()).collect();
        blocked_hosts.extend(extra.into_iter().map(String::into_boxed_str));
        blocked_hosts.sort_unstable();
        blocked_hosts.dedup();
        Self { blocked_hosts }
    }

    fn is_blocked_host(&self, host: &str) -> bool {
        let host = host.to_lowercase();
        self.blocked_hosts.iter().any(|blocked| {
            host == blocked.as_ref()
                || host.strip_suffix(blocked.as_ref()).is_some_and(|rest| rest.ends_with('.'))
        })
    }

    fn is_valid_piece(&self, piece: &str) -> bool {
        let piece = piece.trim();
        if piece.is_empty() {
            return false;
        }
        let lower = piece.to_lowercase();
        if IMAGE_PLACEHOLDER_MARKERS.iter().any(|marker| lower.contains(marker)) {
            return false;
        }
        if let Some(rest) = piece.strip_prefix("//") {
            return Url::parse(&format!("https://{rest}"))
                .is_ok_and(|url| self.is_valid_absolute(&url));
        }
        if piece.starts_with('/') {
            return true;
        }
        match Url::parse(piece) {
            Ok(url) => self.is_valid_absolute(&url),
            Err(url::ParseError::RelativeUrlWithoutBase) => is_bare_image_path(piece),
            Err(_) => false,
        }
    }

    fn is_valid_absolute(&self, url: &Url) -> bool {
        if !matches!(url.scheme(), "http" | "https") {
            return false;
        }
        let Some(host) = url.host_str() else {
            return false;
        };
        !self.is_blocked_host(host) && has_image_extension(url.path())
    }
}

fn has_image_extension(path: &str) -> bool {
    let path = path.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// `photos/unit.jpg` style paths: no scheme, no whitespace, image extension.
fn is_bare_image_path(piece: &str) -> bool {
    if piece.chars().any(char::is_whitespace) {
        return false;
    }
    let path = piece.split(['?', '#']).next().unwrap_or("");
    has_image_extension(path)
}

/// Whether a single, already split piece of an image field is renderable.
#[must_use]
pub fn is_valid_image_piece(piece: &str) -> bool {
    IMAGE_FILTER.is_valid_piece(piece)
}

/// First renderable piece of a raw comma-delimited image field, trimmed.
#[must_use]
pub fn first_valid_image(raw: &str) -> Option<&str> {
    if raw.trim().is_empty() {
        return None;
    }
    raw.split(',').map(str::trim).find(|piece| is_valid_image_piece(piece))
}

/// Whether a raw image field contains at least one renderable piece.
#[must_use]
pub fn has_valid_image(raw: &str) -> bool {
    first_valid_image(raw).is_some()
}

/// Turn a valid piece into an absolute URL, resolving relative paths against
/// `base`. Returns `None` when `base` is not a URL or the join fails.
#[must_use]
pub fn resolve_image_url(piece: &str, base: &str) -> Option<String> {
    let piece = piece.trim();
    if let Some(rest) = piece.strip_prefix("//") {
        return Some(format!("https://{rest}"));
    }
    if let Ok(url) = Url::parse(piece) {
        return Some(url.into());
    }
    let base = Url::parse(base).ok()?;
    base.join(piece).ok().map(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_segment_qualifies() {
        assert!(has_valid_image("https://x.com/a.jpg, https://x.com/bad, "));
        assert_eq!(
            first_valid_image("https://x.com/a.jpg, https://x.com/bad, "),
            Some("https://x.com/a.jpg")
        );
    }

    #[test]
    fn wrong_extension_and_placeholder_rejected() {
        assert!(!has_valid_image("https://x.com/a.pdf,undefined"));
        assert!(!has_valid_image("null"));
        assert!(!has_valid_image("https://x.com/undefined.jpg"));
    }

    #[test]
    fn rooted_path_is_valid_without_extension() {
        assert!(has_valid_image("/local/path"));
    }

    #[test]
    fn bare_relative_image_path_is_valid() {
        assert!(has_valid_image("img.jpg"));
        assert!(!has_valid_image("photos/unit 4.png"));
        assert!(!has_valid_image("img"));
    }

    #[test]
    fn empty_and_blank_fields_rejected() {
        assert!(!has_valid_image(""));
        assert!(!has_valid_image("   "));
        assert!(!has_valid_image(" , ,"));
    }

    #[test]
    fn extension_check_is_case_insensitive_and_ignores_query() {
        assert!(has_valid_image("https://cdn.example.com/a/B.JPEG?w=400"));
        assert!(has_valid_image("https://cdn.example.com/a.webp#frag"));
        assert!(!has_valid_image("https://cdn.example.com/a.svg"));
    }

    #[test]
    fn blocked_thumbnail_hosts_rejected() {
        assert!(!has_valid_image("https://via.placeholder.com/300.png"));
        assert!(!has_valid_image("https://img.dummyimage.com/a.jpg"));
        assert!(has_valid_image("https://notdummyimage.com/a.jpg"));
    }

    #[test]
    fn non_http_schemes_rejected() {
        assert!(!has_valid_image("ftp://x.com/a.jpg"));
        assert!(!has_valid_image("data:image/png;base64,AAAA"));
    }

    #[test]
    fn later_piece_can_qualify() {
        assert_eq!(
            first_valid_image("undefined, https://x.com/a.pdf ,/uploads/7.png"),
            Some("/uploads/7.png")
        );
    }

    #[test]
    fn extra_hosts_extend_the_blocklist() {
        let filter = ImageFilter::with_extra_hosts(vec!["thumbs.example.com".to_owned()]);
        assert!(!filter.is_valid_piece("https://thumbs.example.com/a.jpg"));
        assert!(filter.is_valid_piece("https://photos.example.com/a.jpg"));
    }

    #[test]
    fn resolves_relative_pieces_against_base() {
        let base = "https://images.rentswipe.app";
        assert_eq!(
            resolve_image_url("/local/path", base).as_deref(),
            Some("https://images.rentswipe.app/local/path")
        );
        assert_eq!(
            resolve_image_url("img.jpg", base).as_deref(),
            Some("https://images.rentswipe.app/img.jpg")
        );
        assert_eq!(
            resolve_image_url("https://x.com/a.jpg", base).as_deref(),
            Some("https://x.com/a.jpg")
        );
        assert_eq!(resolve_image_url("/a.jpg", "not a url"), None);
    }
}
