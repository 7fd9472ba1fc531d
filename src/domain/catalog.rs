//! Catalog normalization and merge.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fallback thumbnail used whenever a record carries no image at all.
pub const PLACEHOLDER_IMAGE: &str = "images/placeholder.png";

/// A purchasable product in the merged catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub title: String,
    pub category: String,
    pub price: Decimal,
    pub description: String,
    pub images: Vec<String>,
    /// First image, kept denormalized for the stored wire format.
    pub image: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// A product record as it arrives from the static feed or the local list,
/// before normalization. Every field is optional; the default policy per
/// field is documented on [`RawProduct::normalize`].
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawProduct {
    pub id: Option<String>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub price: Option<serde_json::Value>,
    pub description: Option<String>,
    /// Legacy field name accepted alongside `description`.
    pub desc: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl RawProduct {
    /// Normalizes a raw record into a [`Product`].
    ///
    /// Defaults: title "Untitled", category "Uncategorized", price 0 (negative
    /// or unparsable values included), a fresh id when missing, the image list
    /// from the plural `images` field or the singular `image` field with the
    /// placeholder as last resort, and a creation time of "now".
    pub fn normalize(self, id_prefix: &str) -> Product {
        let images = match (self.images, self.image) {
            (Some(list), _) if !list.is_empty() => list,
            (_, Some(single)) if !single.is_empty() => vec![single],
            _ => vec![PLACEHOLDER_IMAGE.to_string()],
        };
        let image = images
            .first()
            .cloned()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());
        Product {
            id: match self.id {
                Some(id) if !id.trim().is_empty() => id,
                _ => fresh_id(id_prefix),
            },
            title: non_blank(self.title, "Untitled"),
            category: non_blank(self.category, "Uncategorized"),
            price: coerce_price(self.price),
            description: self.description.or(self.desc).unwrap_or_default(),
            images,
            image,
            created_at: self.created_at.unwrap_or_else(Utc::now),
        }
    }
}

pub(crate) fn non_blank(value: Option<String>, default: &str) -> String {
    match value {
        Some(s) if !s.trim().is_empty() => s,
        _ => default.to_string(),
    }
}

/// Price policy: JSON numbers and numeric strings are accepted; anything
/// else, and any negative value, coerces to zero.
fn coerce_price(raw: Option<serde_json::Value>) -> Decimal {
    let parsed = match raw {
        Some(serde_json::Value::Number(n)) => n.to_string().parse::<Decimal>().ok(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<Decimal>().ok(),
        _ => None,
    };
    match parsed {
        Some(p) if p >= Decimal::ZERO => p,
        _ => Decimal::ZERO,
    }
}

/// Generates a `{prefix}_{millis}_{suffix}` identifier with a UUID-derived
/// suffix.
pub fn fresh_id(prefix: &str) -> String {
    let suffix = Uuid::new_v4().simple().to_string();
    format!(
        "{prefix}_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.get(..5).unwrap_or(&suffix)
    )
}

/// Merges locally stored products with the static feed.
///
/// Local products keep their stored order (newest first) and win id
/// conflicts; static products whose id is not already taken follow in feed
/// order. The merged list is the sole source of truth for "current catalog"
/// and is rebuilt wholesale, never patched.
pub fn merge(local: Vec<Product>, feed: Vec<Product>) -> Vec<Product> {
    let seen: HashSet<String> = local.iter().map(|p| p.id.clone()).collect();
    let mut merged = local;
    merged.extend(feed.into_iter().filter(|p| !seen.contains(&p.id)));
    merged
}
