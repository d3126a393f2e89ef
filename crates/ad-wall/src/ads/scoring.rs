//! Engagement-weighted ranking for the ad wall.
//!
//! Every click amplifies the effective bid by a fixed fraction of the bid itself, so a cheap ad
//! needs proportionally more engagement to overtake an expensive one.

use serde::Serialize;

use super::domain::Ad;

/// Fraction of the bid added per recorded click.
pub const ENGAGEMENT_WEIGHT: f64 = 0.42;

/// `price + price * clicked * ENGAGEMENT_WEIGHT`. Callers pass an already-coerced price.
pub fn score(price: f64, clicked: u64) -> f64 {
    price + price * clicked as f64 * ENGAGEMENT_WEIGHT
}

/// Stored prices are validated on write, but ranking never trusts them blindly.
pub fn ranking_price(price: f64) -> f64 {
    if price.is_finite() && price > 0.0 {
        price
    } else {
        0.0
    }
}

/// Presentation-time truncation of a score.
pub fn display_score(score: f64) -> u64 {
    if score.is_finite() && score > 0.0 {
        score.floor() as u64
    } else {
        0
    }
}

/// An ad paired with its ranking score.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedAd {
    #[serde(flatten)]
    pub ad: Ad,
    pub score: f64,
    pub display_score: u64,
}

impl RankedAd {
    pub fn from_ad(ad: &Ad) -> Self {
        let score = score(ranking_price(ad.price), ad.clicked);
        Self {
            ad: ad.clone(),
            score,
            display_score: display_score(score),
        }
    }
}

/// Orders a snapshot of the wall by descending score without touching the source slice.
/// Equal scores keep their storage order.
pub fn rank(ads: &[Ad]) -> Vec<RankedAd> {
    let mut ranked: Vec<RankedAd> = ads.iter().map(RankedAd::from_ad).collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}
