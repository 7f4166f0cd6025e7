// src/api.rs
// YGOPRODeck card-info endpoint: one GET per race, JSON back.

use std::time::Duration;

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

use crate::core::net::HttpFetcher;
use crate::error::{Result, ScrapeError};

#[derive(Debug, Default, Deserialize)]
pub struct CardInfoResponse {
    /// Absent when the race matched nothing (the API answers with `error` instead).
    /// Kept raw so one malformed card cannot sink the whole listing.
    #[serde(default)]
    pub data: Option<Vec<Value>>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Card {
    /// The API sends a number; some dumps carry it as a string.
    #[serde(default, deserialize_with = "lenient_id")]
    pub id: Option<u64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub race: String,
    #[serde(default)]
    pub card_images: Vec<CardImage>,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct CardImage {
    #[serde(default)]
    pub image_url_cropped: Option<String>,
}

impl Card {
    /// Cropped art of the first printing, if the card has any art at all.
    pub fn cropped_url(&self) -> Option<&str> {
        self.card_images.first()?.image_url_cropped.as_deref()
    }
}

/// Where card listings come from.
pub trait MetadataSource {
    /// All cards listed under `race`.
    ///
    /// `Ok(vec![])` and `Err(EmptySource)` both mean "nothing to do"; any
    /// other error means the source could not be read.
    fn cards_for(&self, race: &str) -> Result<Vec<Card>>;
}

pub struct CardApi<'a> {
    http: &'a HttpFetcher,
    base: String,
    timeout: Duration,
}

impl<'a> CardApi<'a> {
    pub fn new(http: &'a HttpFetcher, base: impl Into<String>, timeout: Duration) -> Self {
        Self { http, base: base.into(), timeout }
    }
}

impl MetadataSource for CardApi<'_> {
    fn cards_for(&self, race: &str) -> Result<Vec<Card>> {
        let body = self.http.get_text(&self.base, &[("race", race)], self.timeout)?;
        parse_listing(race, &body)
    }
}

/// Decode a card-info body. A body without a `data` list is `EmptySource`.
///
/// Cards are decoded one by one; an element that does not decode is logged
/// and skipped, the same as a card without an id or art.
pub fn parse_listing(race: &str, body: &str) -> Result<Vec<Card>> {
    let resp: CardInfoResponse = serde_json::from_str(body)?;
    let raw = match resp.data {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Err(ScrapeError::EmptySource(race.to_string())),
    };

    let mut cards = Vec::with_capacity(raw.len());
    for (pos, value) in raw.into_iter().enumerate() {
        match serde_json::from_value::<Card>(value) {
            Ok(card) => cards.push(card),
            Err(e) => warn!(race, pos, error = %e, "skipping undecodable card"),
        }
    }
    Ok(cards)
}

/* ---------------- lenient fields ---------------- */

fn lenient_id<'de, D: Deserializer<'de>>(de: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Num(u64),
        Text(String),
    }

    Ok(match Option::<RawId>::deserialize(de)? {
        Some(RawId::Num(n)) => Some(n),
        Some(RawId::Text(s)) => s.trim().parse().ok(),
        None => None,
    })
}

fn null_as_empty<'de, D: Deserializer<'de>>(de: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(de)?.unwrap_or_default())
}
