//! Keyword sentiment used to pick the poster's bottom word.

use crate::dataset::model::StoryRecord;
use crate::random::prng::Lcg;

/// Word used when a dataset has neither a bottom word nor stories.
pub const DEFAULT_BOTTOM_WORD: &str = "PULSE";

const TENSION_WORDS: &[&str] = &[
    "WAR", "CONFLICT", "CRISIS", "DEAD", "ATTACK", "PROTEST", "TENSION", "FIGHT",
];
const POWER_WORDS: &[&str] = &[
    "ELECTION",
    "TRUMP",
    "BIDEN",
    "GOVERNMENT",
    "POLICY",
    "POWER",
    "LEADER",
];
const ECONOMY_WORDS: &[&str] = &[
    "ECONOMY",
    "MARKET",
    "FINANCIAL",
    "PRICE",
    "BANK",
    "TRADE",
    "OIL",
];
const TECH_WORDS: &[&str] = &["AI", "TECH", "DIGITAL", "SILICON", "FUTURE", "INNOVATION"];

/// Candidate words in tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SentimentWord {
    Tension,
    Power,
    Volume,
    Impact,
    Voice,
}

impl SentimentWord {
    pub const ALL: [SentimentWord; 5] = [
        Self::Tension,
        Self::Power,
        Self::Volume,
        Self::Impact,
        Self::Voice,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tension => "TENSION",
            Self::Power => "POWER",
            Self::Volume => "VOLUME",
            Self::Impact => "IMPACT",
            Self::Voice => "VOICE",
        }
    }
}

/// Per-word scores, indexed like [`SentimentWord::ALL`].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SentimentScores(pub [f64; 5]);

impl SentimentScores {
    /// Keyword hits only, before jitter. Each keyword counts at most once (substring match).
    pub fn from_stories(stories: &[StoryRecord]) -> Self {
        let text = stories
            .iter()
            .map(|s| format!("{} {}", s.headline, s.description).to_uppercase())
            .collect::<Vec<_>>()
            .join(" ");
        let hits = |words: &[&str]| words.iter().filter(|w| text.contains(**w)).count() as f64;

        let mut scores = [0.0; 5];
        scores[0] = hits(TENSION_WORDS) * 2.0;
        scores[1] = hits(POWER_WORDS) * 1.5;
        scores[3] = hits(ECONOMY_WORDS) * 1.2;
        scores[4] = hits(TECH_WORDS);
        Self(scores)
    }

    /// Add `[0, 1)` jitter to VOLUME, IMPACT and VOICE, in that order.
    pub fn jitter(mut self, rng: &mut Lcg) -> Self {
        for i in [2, 3, 4] {
            self.0[i] += rng.next_f64();
        }
        self
    }

    /// First strict maximum wins.
    pub fn winner(&self) -> SentimentWord {
        let mut best = SentimentWord::Tension;
        let mut max = -1.0;
        for (word, &score) in SentimentWord::ALL.iter().zip(self.0.iter()) {
            if score > max {
                max = score;
                best = *word;
            }
        }
        best
    }
}

/// Pick the sentiment word for a non-empty story list.
pub fn sentiment_word(stories: &[StoryRecord], rng: &mut Lcg) -> SentimentWord {
    SentimentScores::from_stories(stories).jitter(rng).winner()
}

/// `bottom_word` if set, else the sentiment word (when stories exist), else [`DEFAULT_BOTTOM_WORD`].
pub fn resolve_bottom_word(bottom_word: &str, stories: &[StoryRecord], rng: &mut Lcg) -> String {
    let explicit = bottom_word.trim();
    if !explicit.is_empty() {
        return explicit.to_uppercase();
    }
    if stories.is_empty() {
        return DEFAULT_BOTTOM_WORD.to_string();
    }
    sentiment_word(stories, rng).as_str().to_string()
}
