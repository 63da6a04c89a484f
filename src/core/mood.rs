//! # Mood Trend Model
//!
//! A fixed window of the seven most recent mood samples, oldest first.
//! Samples come from two places:
//!
//! - the emotion label returned by the analysis service ([`label_to_sample`])
//! - the emoji quick-reaction keys ([`direct_mood_to_sample`] / [`MoodTag`])
//!
//! The chart view reads [`MoodTrend::samples`] on every frame; the y range is
//! fixed at 1..=5 and samples are plotted unscaled.

use std::fmt;
use std::str::FromStr;

/// Number of samples held in the trend window.
pub const TREND_LEN: usize = 7;

/// Values the chart starts with before any real samples arrive.
pub const SEED_SAMPLES: [u8; TREND_LEN] = [3, 4, 2, 5, 3, 4, 5];

/// X-axis labels, one per slot.
pub const DAY_LABELS: [&str; TREND_LEN] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A mood score in `1..=5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MoodSample(u8);

impl MoodSample {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;
    pub const NEUTRAL: MoodSample = MoodSample(3);

    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX).contains(&value).then_some(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for MoodSample {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        MoodSample::new(value).ok_or_else(|| format!("mood sample {value} outside 1..=5"))
    }
}

impl From<MoodSample> for u8 {
    fn from(sample: MoodSample) -> u8 {
        sample.0
    }
}

/// Emotion label → sample. Anything not listed maps to [`MoodSample::NEUTRAL`].
const LABEL_MAP: &[(&str, u8)] = &[
    ("sadness", 2),
    ("anger", 1),
    ("fear", 2),
    ("joy", 5),
    ("love", 4),
    ("surprise", 3),
];

/// Maps an emotion label from the analysis service to a mood sample.
pub fn label_to_sample(label: &str) -> MoodSample {
    LABEL_MAP
        .iter()
        .find(|(name, _)| *name == label)
        .and_then(|(_, value)| MoodSample::new(*value))
        .unwrap_or(MoodSample::NEUTRAL)
}

/// Emoji quick-reaction tag → sample.
const DIRECT_MAP: &[(&str, u8)] = &[
    ("happy", 5),
    ("neutral", 3),
    ("sad", 2),
    ("angry", 1),
    ("anxious", 2),
];

/// Maps an emoji quick-reaction tag (`"happy"`, `"sad"`, ...) to a mood sample.
/// Unknown tags map to [`MoodSample::NEUTRAL`].
pub fn direct_mood_to_sample(tag: &str) -> MoodSample {
    DIRECT_MAP
        .iter()
        .find(|(name, _)| *name == tag)
        .and_then(|(_, value)| MoodSample::new(*value))
        .unwrap_or(MoodSample::NEUTRAL)
}

/// The emoji quick-reactions offered next to the chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoodTag {
    Happy,
    Neutral,
    Sad,
    Angry,
    Anxious,
}

impl MoodTag {
    pub const ALL: [MoodTag; 5] = [
        MoodTag::Happy,
        MoodTag::Neutral,
        MoodTag::Sad,
        MoodTag::Angry,
        MoodTag::Anxious,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MoodTag::Happy => "happy",
            MoodTag::Neutral => "neutral",
            MoodTag::Sad => "sad",
            MoodTag::Angry => "angry",
            MoodTag::Anxious => "anxious",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            MoodTag::Happy => "😊",
            MoodTag::Neutral => "😐",
            MoodTag::Sad => "😢",
            MoodTag::Angry => "😠",
            MoodTag::Anxious => "😰",
        }
    }

    /// The bot's reply when the user taps this reaction.
    pub fn reply(self) -> &'static str {
        match self {
            MoodTag::Happy => "I'm glad you're feeling happy! 😊",
            MoodTag::Neutral => "Thanks for sharing how you're feeling. 😊",
            MoodTag::Sad => "I'm sorry you're feeling sad. Would you like to talk about it?",
            MoodTag::Angry => "Anger is a natural emotion. Would you like some strategies to cope?",
            MoodTag::Anxious => {
                "Anxiety can be challenging. Let me help you find some calming techniques."
            }
        }
    }
}

impl fmt::Display for MoodTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MoodTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MoodTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| format!("unknown mood tag '{s}'"))
    }
}

/// Rolling window of the last [`TREND_LEN`] samples. Length never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoodTrend {
    samples: [MoodSample; TREND_LEN],
}

impl Default for MoodTrend {
    fn default() -> Self {
        Self::seeded()
    }
}

impl MoodTrend {
    /// Starts from [`SEED_SAMPLES`].
    pub fn seeded() -> Self {
        Self {
            samples: SEED_SAMPLES.map(MoodSample),
        }
    }

    /// Evicts the oldest sample and appends `sample` as the newest.
    pub fn push(&mut self, sample: MoodSample) {
        self.samples.rotate_left(1);
        self.samples[TREND_LEN - 1] = sample;
    }

    pub fn samples(&self) -> &[MoodSample; TREND_LEN] {
        &self.samples
    }

    pub fn latest(&self) -> MoodSample {
        self.samples[TREND_LEN - 1]
    }

    /// `(x, y)` points for the line chart, x being the slot index.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.samples
            .iter()
            .enumerate()
            .map(|(i, s)| (i as f64, f64::from(s.value())))
            .collect()
    }
}
