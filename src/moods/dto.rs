use serde::{Deserialize, Serialize};

use super::repo_types::Mood;
use super::stats::MoodStats;

#[derive(Debug, Deserialize)]
pub struct CreateMoodRequest {
    pub emoji: Option<String>,
    pub rating: Option<f64>,
    pub note: Option<String>,
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MoodListResponse {
    pub moods: Vec<Mood>,
}

#[derive(Debug, Serialize)]
pub struct MoodResponse {
    pub message: String,
    pub mood: Mood,
}

#[derive(Debug, Serialize)]
pub struct MoodStatsResponse {
    pub stats: MoodStats,
}
