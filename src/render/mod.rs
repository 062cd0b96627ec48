//! Presentation of recommendations as result cards.
//!
//! Rendering only formats; it never changes the ranked rows.

use serde::Serialize;

use crate::config::RecommenderConfig;
use crate::metrics::DistanceMethod;
use crate::recommend::{Recommendation, Recommendations};

/// Message shown when a cluster has no matching restaurant.
pub const NO_RESULTS: &str = "No similar restaurants found.";

/// Label of the map search link.
pub const MAPS_LABEL: &str = "View Location on Google Maps";

/// Label of the ordering link.
pub const ORDER_LABEL: &str = "Order Online";

/// Heading above the result list.
///
/// ```
/// use dinerec::metrics::DistanceMethod;
/// use dinerec::render::heading;
///
/// assert_eq!(
///     heading(10, DistanceMethod::Cosine),
///     "Top 10 Recommended Restaurants (Using Cosine Distance)"
/// );
/// ```
#[must_use]
pub fn heading(top_k: usize, method: DistanceMethod) -> String {
    format!("Top {top_k} Recommended Restaurants (Using {method} Distance)")
}

/// Map search link for an address: spaces become `+`.
///
/// ```
/// use dinerec::render::maps_url;
///
/// assert_eq!(
///     maps_url("https://www.google.com/maps/search/", "12 MG Road, Bangalore"),
///     "https://www.google.com/maps/search/12+MG+Road,+Bangalore"
/// );
/// ```
#[must_use]
pub fn maps_url(base: &str, address: &str) -> String {
    format!("{base}{}", address.replace(' ', "+"))
}

/// Card text for a stored number: always carries a fractional part, so
/// `400.0` stays `400.0` and `4.2` stays `4.2`.
///
/// ```
/// use dinerec::render::float_text;
///
/// assert_eq!(float_text(400.0), "400.0");
/// assert_eq!(float_text(4.2), "4.2");
/// ```
#[must_use]
pub fn float_text(value: f64) -> String {
    format!("{value:?}")
}

/// One formatted recommendation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultCard {
    /// 1-based position in the ranking.
    pub rank: usize,
    /// Restaurant name.
    pub name: String,
    /// City.
    pub city: String,
    /// Cuisine.
    pub cuisine: String,
    /// Rating.
    pub rating: f64,
    /// Number of ratings, shown as reviews.
    pub reviews: f64,
    /// Cost label, `Cost of <cuisine>`.
    pub cost_label: String,
    /// Currency-prefixed cost.
    pub cost: String,
    /// Distance to the selection.
    pub distance: f32,
    /// Map search link, when the address is known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    /// Ordering link, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_url: Option<String>,
}

impl ResultCard {
    /// Formats one ranked recommendation.
    #[must_use]
    pub fn new(rank: usize, rec: &Recommendation<'_>, config: &RecommenderConfig) -> Self {
        let r = rec.record;
        Self {
            rank,
            name: r.name.clone(),
            city: r.city.clone(),
            cuisine: r.cuisine.clone(),
            rating: r.rating,
            reviews: r.rating_count,
            cost_label: format!("Cost of {}", r.cuisine),
            cost: format!("{}{}", config.currency_symbol, float_text(r.cost)),
            distance: rec.distance,
            maps_url: r
                .address
                .as_deref()
                .map(|a| maps_url(&config.maps_base_url, a)),
            order_url: r.link.clone(),
        }
    }

    /// Labelled plain-text fields, in display order.
    #[must_use]
    pub fn fields(&self) -> Vec<(String, String)> {
        let mut fields = vec![
            ("City".to_string(), self.city.clone()),
            ("Cuisine".to_string(), self.cuisine.clone()),
            ("Rating".to_string(), float_text(self.rating)),
            ("Reviews".to_string(), float_text(self.reviews)),
            (self.cost_label.clone(), self.cost.clone()),
            ("Distance".to_string(), format!("{:.4}", self.distance)),
        ];
        if let Some(url) = &self.maps_url {
            fields.push((MAPS_LABEL.to_string(), url.clone()));
        }
        if let Some(url) = &self.order_url {
            fields.push((ORDER_LABEL.to_string(), url.clone()));
        }
        fields
    }
}

/// Formats every recommendation, rank 1 first.
#[must_use]
pub fn cards(recs: &Recommendations<'_>, config: &RecommenderConfig) -> Vec<ResultCard> {
    recs.items()
        .iter()
        .enumerate()
        .map(|(i, rec)| ResultCard::new(i + 1, rec, config))
        .collect()
}
