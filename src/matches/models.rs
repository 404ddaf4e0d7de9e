use chrono::{Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::shared::unique_id_millis;

/// Date formats the stored documents contain. New records use the first
/// one, older imports carry the locale forms.
const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parses a stored match date. Comparison always happens on parsed
/// dates, never on the raw strings.
pub fn parse_match_date(raw: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw.trim(), fmt).ok())
}

/// Kind of a logged match event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Goal,
    OpponentGoal,
}

/// Time label recorded on events added to an already finished match
pub const EDIT_TIME_LABEL: &str = "Edit";

/// One entry in a match's event log
///
/// `time` is the elapsed-clock label ("MM:SS") or "Edit" for post-hoc
/// additions. Events are immutable once created and deleted by index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    #[serde(rename = "type")]
    pub kind: EventType,
    pub time: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assist_id: Option<String>,
}

/// Result of a match, derived from the score counters on read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display)]
pub enum MatchOutcome {
    Win,
    Lose,
    Draw,
}

impl MatchOutcome {
    pub fn from_scores(myself: u32, opponent: u32) -> Self {
        if myself > opponent {
            MatchOutcome::Win
        } else if myself < opponent {
            MatchOutcome::Lose
        } else {
            MatchOutcome::Draw
        }
    }

    /// Single-character label used in text reports
    pub fn glyph(&self) -> &'static str {
        match self {
            MatchOutcome::Win => "勝",
            MatchOutcome::Lose => "負",
            MatchOutcome::Draw => "分",
        }
    }
}

/// A match document, current or historical
///
/// The wire shape matches the legacy document layout so old exports
/// import unchanged. Score counters are maintained incrementally and
/// must equal the event counts per kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    pub id: String, // "m_" + start time in unix millis
    pub date: String,
    pub opponent: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub duration_minutes: u32,
    #[serde(default)]
    pub players: Vec<String>,
    pub score_myself: u32,
    pub score_opponent: u32,
    #[serde(default)]
    pub events: Vec<MatchEvent>,

    // Clock state
    #[serde(default)]
    pub accumulated_ms: i64,
    #[serde(
        rename = "lastResumeTime",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub last_resume_ms: Option<i64>,
    #[serde(default)]
    pub is_running: bool,
    #[serde(default)]
    pub is_finished: bool,
}

impl MatchRecord {
    /// Creates a new live match with the clock running
    pub fn new(
        opponent: String,
        label: Option<String>,
        duration_minutes: u32,
        players: Vec<String>,
        date: String,
    ) -> Self {
        let now = Utc::now().timestamp_millis();
        Self {
            id: format!("m_{}", unique_id_millis()),
            date,
            opponent,
            label,
            duration_minutes,
            players,
            score_myself: 0,
            score_opponent: 0,
            events: Vec::new(),
            accumulated_ms: 0,
            last_resume_ms: Some(now),
            is_running: true,
            is_finished: false,
        }
    }

    /// Today's date in the stored "%Y-%m-%d" format
    pub fn today() -> String {
        Local::now().date_naive().format("%Y-%m-%d").to_string()
    }

    /// Appends a goal for our side and bumps the score counter
    pub fn record_goal(&mut self, time: String, scorer_id: String, assist_id: Option<String>) {
        self.score_myself += 1;
        self.events.push(MatchEvent {
            kind: EventType::Goal,
            time,
            player_id: Some(scorer_id),
            assist_id,
        });
    }

    /// Appends an opponent goal and bumps the score counter
    pub fn record_opponent_goal(&mut self, time: String) {
        self.score_opponent += 1;
        self.events.push(MatchEvent {
            kind: EventType::OpponentGoal,
            time,
            player_id: None,
            assist_id: None,
        });
    }

    /// Removes the event at `index`, decrementing the matching score
    /// counter (floored at zero). Returns None when the index is out of
    /// range; remaining events keep their relative order.
    pub fn delete_event(&mut self, index: usize) -> Option<MatchEvent> {
        if index >= self.events.len() {
            return None;
        }
        let event = self.events.remove(index);
        match event.kind {
            EventType::Goal => self.score_myself = self.score_myself.saturating_sub(1),
            EventType::OpponentGoal => {
                self.score_opponent = self.score_opponent.saturating_sub(1)
            }
        }
        Some(event)
    }

    /// Win/lose/draw by direct score comparison
    pub fn outcome(&self) -> MatchOutcome {
        MatchOutcome::from_scores(self.score_myself, self.score_opponent)
    }
}
