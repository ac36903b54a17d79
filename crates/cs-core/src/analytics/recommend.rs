//! Items worth surfacing again: frequent and recent.

use serde::{Deserialize, Serialize};

use crate::clip::ClipItem;

const HOUR_MS: f64 = 60.0 * 60.0 * 1000.0;
/// Hours for the recency factor to fall to 1/e.
const DECAY_HOURS: f64 = 24.0;

pub const DEFAULT_RECOMMENDATIONS: usize = 10;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: ClipItem,
    pub score: f64,
}

/// `frequency * exp(-age_hours / 24)`. Timestamps ahead of `now_ms` count
/// as age zero.
pub fn recommendation_score(item: &ClipItem, now_ms: i64) -> f64 {
    let age_hours = (now_ms - item.timestamp).max(0) as f64 / HOUR_MS;
    f64::from(item.frequency) * (-age_hours / DECAY_HOURS).exp()
}

/// Top `limit` items by [`recommendation_score`], highest first. Equal
/// scores keep history order.
pub fn recommend(items: &[ClipItem], now_ms: i64, limit: usize) -> Vec<Recommendation> {
    let mut scored: Vec<Recommendation> = items
        .iter()
        .map(|item| Recommendation {
            score: recommendation_score(item, now_ms),
            item: item.clone(),
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(limit);
    scored
}
