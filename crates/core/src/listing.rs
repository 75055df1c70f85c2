use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Id as it appears on the wire; catalogs and backends disagree on numeric vs string ids.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(i64),
}

impl RawId {
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Text(s) => s,
            Self::Number(n) => n.to_string(),
        }
    }
}

/// Stable identifier of a listing in the catalog.
///
/// Deserializes from a string or an integer; always serializes as a string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawId", into = "String")]
pub struct ListingId(String);

impl ListingId {
    /// Builds an id from raw input, trimming surrounding whitespace.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidListingId`] for empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidListingId(raw));
        }
        if trimmed.len() == raw.len() {
            Ok(Self(raw))
        } else {
            Ok(Self(trimmed.to_owned()))
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ListingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ListingId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ListingId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<RawId> for ListingId {
    type Error = CoreError;

    fn try_from(value: RawId) -> Result<Self, Self::Error> {
        Self::new(value.into_string())
    }
}

impl From<ListingId> for String {
    fn from(id: ListingId) -> Self {
        id.0
    }
}

/// Opaque identifier handed out by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UserId(String);

impl UserId {
    /// # Errors
    /// Returns [`CoreError::InvalidUserId`] for empty or whitespace-only input.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::InvalidUserId(raw));
        }
        Ok(Self(trimmed.to_owned()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for UserId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for UserId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<UserId> for String {
    fn from(id: UserId) -> Self {
        id.0
    }
}

/// A rental unit as delivered by the catalog source.
///
/// Only `id`, `images` and `liked_by_current_user` matter to the judgment
/// core. Display attributes ride along untouched; anything the catalog sends
/// that is not modelled here is kept in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingRecord {
    pub id: ListingId,
    /// Comma-delimited, unordered image URLs exactly as the backend stores them.
    #[serde(default)]
    pub images: String,
    #[serde(default)]
    pub liked_by_current_user: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ListingRecord {
    #[must_use]
    pub fn new(id: ListingId, images: impl Into<String>) -> Self {
        Self {
            id,
            images: images.into(),
            liked_by_current_user: false,
            price: None,
            description: None,
            location: None,
            extra: serde_json::Map::new(),
        }
    }

    #[must_use]
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub const fn liked(mut self, liked: bool) -> Self {
        self.liked_by_current_user = liked;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_id_trims_and_rejects_blank() {
        assert_eq!(ListingId::new("  abc ").unwrap().as_str(), "abc");
        assert!(ListingId::new("   ").is_err());
        assert!(ListingId::new("").is_err());
    }

    #[test]
    fn listing_record_deserializes_camel_case_and_keeps_extra() {
        let json = r#"{
            "id": "L-1",
            "images": "/a.jpg,/b.png",
            "likedByCurrentUser": true,
            "price": 1250.0,
            "bedrooms": 2
        }"#;
        let record: ListingRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_str(), "L-1");
        assert!(record.liked_by_current_user);
        assert_eq!(record.price, Some(1250.0));
        assert_eq!(record.extra.get("bedrooms"), Some(&serde_json::json!(2)));
    }

    #[test]
    fn numeric_listing_id_reads_as_its_decimal_string() {
        let record: ListingRecord =
            serde_json::from_str(r#"{"id": 12, "images": "/a.jpg"}"#).unwrap();
        assert_eq!(record.id, ListingId::new("12").unwrap());
        assert_eq!(serde_json::to_value(&record.id).unwrap(), serde_json::json!("12"));

        let ids: Vec<ListingId> = serde_json::from_str(r#"[7, "7", -3]"#).unwrap();
        assert_eq!(ids[0], ids[1]);
        assert_eq!(ids[2].as_str(), "-3");
        assert!(serde_json::from_str::<ListingId>("1.5").is_err());
    }

    #[test]
    fn listing_record_rejects_blank_id() {
        let err = serde_json::from_str::<ListingRecord>(r#"{"id": " "}"#);
        assert!(err.is_err());
    }

    #[test]
    fn missing_images_default_to_empty() {
        let record: ListingRecord = serde_json::from_str(r#"{"id": "x"}"#).unwrap();
        assert!(record.images.is_empty());
        assert!(!record.liked_by_current_user);
    }
}
