use std::path::Path;

use chrono::{Datelike, NaiveDate, Utc};

use crate::foundation::error::{PosterError, PosterResult};
use crate::random::seed::Seed;

/// Maximum number of stories placed on one poster.
pub const MAX_STORIES: usize = 3;

/// Geographic anchor of a story.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MainLocation {
    pub name: String,
    pub lat: f64,
    pub lng: f64,
}

/// One news item as delivered in the daily JSON payload.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoryRecord {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub description: String,
    /// Expected in `40..=100`; out-of-range values are clamped where used.
    #[serde(default = "default_intensity")]
    pub intensity: f64,
    /// CSS color string (`#rrggbb`, `rgb(...)`, ...).
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_location: Option<MainLocation>,
}

fn default_intensity() -> f64 {
    40.0
}

/// Daily poster payload. Immutable once loaded.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PosterDataset {
    pub date: String,
    #[serde(default)]
    pub display_date: String,
    #[serde(default)]
    pub bottom_word: String,
    #[serde(default)]
    pub stories: Vec<StoryRecord>,
}

impl PosterDataset {
    /// A dataset with no stories; renders as background and grid only.
    pub fn empty(date: impl Into<String>) -> Self {
        let date = date.into();
        Self {
            display_date: display_date(&date),
            date,
            bottom_word: String::new(),
            stories: Vec::new(),
        }
    }

    pub fn from_json_str(s: &str) -> PosterResult<Self> {
        let ds: Self = serde_json::from_str(s).map_err(|e| PosterError::serde(e.to_string()))?;
        ds.validate()?;
        Ok(ds)
    }

    pub fn from_path(path: &Path) -> PosterResult<Self> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| PosterError::io(format!("read {}: {e}", path.display())))?;
        Self::from_json_str(&s)
    }

    pub fn to_json_pretty(&self) -> PosterResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| PosterError::serde(e.to_string()))
    }

    pub fn validate(&self) -> PosterResult<()> {
        if self.date.trim().is_empty() {
            return Err(PosterError::validation("dataset date must be non-empty"));
        }
        for (i, s) in self.stories.iter().enumerate() {
            if !s.intensity.is_finite() {
                return Err(PosterError::validation(format!(
                    "stories[{i}].intensity must be finite"
                )));
            }
            if let Some(loc) = &s.main_location
                && !(loc.lat.is_finite() && loc.lng.is_finite())
            {
                return Err(PosterError::validation(format!(
                    "stories[{i}].mainLocation must have finite coordinates"
                )));
            }
        }
        Ok(())
    }

    pub fn seed(&self) -> Seed {
        Seed::from_date(&self.date)
    }

    /// Stories that occupy a slot on the poster (at most [`MAX_STORIES`]).
    pub fn active_stories(&self) -> &[StoryRecord] {
        &self.stories[..self.stories.len().min(MAX_STORIES)]
    }

    /// Sidebar text: `TODAY` for the current date, `D MON YYYY` otherwise.
    pub fn sidebar_label(&self, today: &str) -> String {
        match (parse_ymd(&self.date), parse_ymd(today)) {
            (Some(d), Some(t)) if d == t => "TODAY".to_string(),
            (Some(_), _) => display_date(&self.date).to_uppercase(),
            (None, _) => self.date.trim().to_uppercase(),
        }
    }
}

/// `YYYY-MM-DD` -> `D MON YYYY`; unparseable input is returned trimmed.
pub fn display_date(date: &str) -> String {
    match parse_ymd(date) {
        Some(d) => format!("{} {} {}", d.day(), month_label(d), d.year()),
        None => date.trim().to_string(),
    }
}

/// Current UTC date as `YYYY-MM-DD`.
pub fn today_utc() -> String {
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Leading `YYYY-MM-DD` of `date`; a time suffix such as `T10:00Z` is ignored.
pub(crate) fn parse_ymd(date: &str) -> Option<NaiveDate> {
    let (d, rest) = NaiveDate::parse_and_remainder(date.trim(), "%Y-%m-%d").ok()?;
    if rest.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }
    Some(d)
}

fn month_label(d: NaiveDate) -> String {
    if d.month() == 9 {
        return "SEPT".to_string();
    }
    d.format("%b").to_string().to_uppercase()
}

#[cfg(test)]
#[path = "../../tests/unit/dataset/model.rs"]
mod tests;
