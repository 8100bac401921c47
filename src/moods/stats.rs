use std::collections::BTreeMap;

use serde::Serialize;
use time::{Duration, OffsetDateTime};

use super::repo_types::Mood;

#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoodStats {
    pub total_moods: usize,
    pub average_rating: f64,
    pub recent_moods_count: usize,
    pub daily_averages: Vec<DailyAverage>,
}

#[derive(Debug, PartialEq, Serialize)]
pub struct DailyAverage {
    pub date: String,
    pub average: f64,
    pub count: usize,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean_of_ratings<'a>(moods: impl Iterator<Item = &'a Mood>) -> f64 {
    let ratings: Vec<f64> = moods.filter_map(|m| m.rating).collect();
    if ratings.is_empty() {
        return 0.0;
    }
    ratings.iter().sum::<f64>() / ratings.len() as f64
}

/// Overall and last-7-day statistics for one user's moods. The daily
/// breakdown covers only the recent window, keyed by the entry's
/// calendar date and sorted ascending.
pub fn compute(moods: &[Mood], now: OffsetDateTime) -> MoodStats {
    let average_rating = round1(mean_of_ratings(moods.iter()));

    let window_start = now - Duration::days(7);
    let recent: Vec<&Mood> = moods
        .iter()
        .filter(|m| m.created_at >= window_start)
        .collect();

    let mut by_date: BTreeMap<&str, Vec<&Mood>> = BTreeMap::new();
    for mood in &recent {
        by_date.entry(mood.date.as_str()).or_default().push(*mood);
    }

    let daily_averages = by_date
        .into_iter()
        .map(|(date, day_moods)| DailyAverage {
            date: date.to_string(),
            average: round1(mean_of_ratings(day_moods.iter().copied())),
            count: day_moods.len(),
        })
        .collect();

    MoodStats {
        total_moods: moods.len(),
        average_rating,
        recent_moods_count: recent.len(),
        daily_averages,
    }
}
