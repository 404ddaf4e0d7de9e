//! Text and CSV rendering of a day's match records
//!
//! Output is consumed by people pasting into group chats, so the exact
//! byte layout is load-bearing. Changes here break diff-based checks
//! downstream users run on their archived reports.

use chrono::{Datelike, NaiveDate};

use crate::matches::models::{EventType, MatchOutcome, MatchRecord};
use crate::roster::models::{display_name, Player};

/// Returned by every report kind when the day has no matches
pub const EMPTY_DAY_MESSAGE: &str = "該当する試合記録はありません。";

/// Compact per-match summary with a combined 前半/後半 view
///
/// A 前半 match pairs with the next unconsumed 後半 match against the
/// same opponent. The pair renders one combined score line and one
/// indented line per half.
pub fn simple_report(date: NaiveDate, matches: &[MatchRecord], roster: &[Player]) -> String {
    let mut text = format!(
        "【{}/{}/{} 試合結果】\n\n",
        date.year(),
        date.month(),
        date.day()
    );

    let mut consumed = vec![false; matches.len()];
    let mut total_scored = 0;
    let mut total_conceded = 0;

    for i in 0..matches.len() {
        if consumed[i] {
            continue;
        }
        consumed[i] = true;
        let record = &matches[i];

        if record.label.as_deref() == Some("前半") {
            let pair = (i + 1..matches.len()).find(|&j| {
                !consumed[j]
                    && matches[j].opponent == record.opponent
                    && matches[j].label.as_deref() == Some("後半")
            });
            if let Some(j) = pair {
                consumed[j] = true;
                let second = &matches[j];
                let combined_scored = record.score_myself + second.score_myself;
                let combined_conceded = record.score_opponent + second.score_opponent;
                total_scored += combined_scored;
                total_conceded += combined_conceded;

                let outcome = MatchOutcome::from_scores(combined_scored, combined_conceded);
                text.push_str(&format!(
                    "vs {} {}-{} ({})\n",
                    record.opponent,
                    combined_scored,
                    combined_conceded,
                    outcome.glyph()
                ));
                text.push_str(&format!(
                    "  前半: {}-{} {}\n",
                    record.score_myself,
                    record.score_opponent,
                    parenthesized_scorers(record, roster)
                ));
                text.push_str(&format!(
                    "  後半: {}-{} {}\n",
                    second.score_myself,
                    second.score_opponent,
                    parenthesized_scorers(second, roster)
                ));
                text.push('\n');
                continue;
            }
        }

        total_scored += record.score_myself;
        total_conceded += record.score_opponent;

        text.push_str(&format!(
            "{} vs {} {}-{} ({})\n",
            record.label.as_deref().unwrap_or("試合"),
            record.opponent,
            record.score_myself,
            record.score_opponent,
            record.outcome().glyph()
        ));
        let scorers = scorer_names(record, roster);
        if !scorers.is_empty() {
            text.push_str(&format!("  得点: {}\n", scorers));
        }
        text.push('\n');
    }

    text.push_str(&format!(
        "----------------\nTotal: {}得点 {}失点",
        total_scored, total_conceded
    ));
    text
}

/// Event-by-event rendition of each match
pub fn detail_report(matches: &[MatchRecord], roster: &[Player]) -> String {
    let mut text = String::new();
    for record in matches {
        text.push_str(&format!(
            "■ {} vs {} ({}-{})\n",
            record.label.as_deref().unwrap_or("試合"),
            record.opponent,
            record.score_myself,
            record.score_opponent
        ));
        if record.events.is_empty() {
            text.push_str("  (イベントなし)\n");
        } else {
            for event in &record.events {
                match event.kind {
                    EventType::Goal => {
                        let scorer =
                            display_name(roster, event.player_id.as_deref().unwrap_or(""));
                        let assist = event
                            .assist_id
                            .as_deref()
                            .map(|id| format!("(As: {})", display_name(roster, id)))
                            .unwrap_or_default();
                        text.push_str(&format!("  {} GOAL: {} {}\n", event.time, scorer, assist));
                    }
                    EventType::OpponentGoal => {
                        text.push_str(&format!("  {} 失点\n", event.time));
                    }
                }
            }
        }
        text.push('\n');
    }
    text
}

/// Spreadsheet-friendly rows, one per match
///
/// Fields are joined naively. The stored values never contain commas in
/// practice, and the legacy exports were produced the same way.
pub fn csv_report(matches: &[MatchRecord]) -> String {
    let mut csv = String::from("MatchID,Date,Label,Opponent,MyScore,OppScore,Result\n");
    for record in matches {
        csv.push_str(&format!(
            "{},{},{},{},{},{},{}\n",
            record.id,
            record.date,
            record.label.as_deref().unwrap_or(""),
            record.opponent,
            record.score_myself,
            record.score_opponent,
            record.outcome()
        ));
    }
    csv
}

fn scorer_names(record: &MatchRecord, roster: &[Player]) -> String {
    record
        .events
        .iter()
        .filter(|e| e.kind == EventType::Goal)
        .map(|e| display_name(roster, e.player_id.as_deref().unwrap_or("")))
        .collect::<Vec<_>>()
        .join(", ")
}

fn parenthesized_scorers(record: &MatchRecord, roster: &[Player]) -> String {
    let names = scorer_names(record, roster);
    if names.is_empty() {
        String::new()
    } else {
        format!("({})", names)
    }
}
