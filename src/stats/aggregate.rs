//! Pure aggregation of match history into per-player stat lines

use chrono::NaiveDate;
use std::collections::HashMap;

use super::models::{PlayerStatLine, StatsSummary};
use crate::matches::models::{parse_match_date, EventType, MatchRecord};
use crate::roster::models::Player;

/// Aggregates goals and assists over matches within the optional bounds
///
/// Scorer and assist are resolved independently against the roster, so a
/// goal credited to "OG" still counts its assist. Team totals come from
/// the score counters, which also cover goals whose events were edited
/// away. Players with nothing to show are filtered out, ties keep roster
/// order.
pub fn aggregate(
    roster: &[Player],
    matches: &[MatchRecord],
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> StatsSummary {
    let mut lines: Vec<PlayerStatLine> = roster
        .iter()
        .map(|p| PlayerStatLine {
            player_id: p.id.clone(),
            name: p.name.clone(),
            number: p.number.clone(),
            goals: 0,
            assists: 0,
        })
        .collect();
    let index: HashMap<&str, usize> = roster
        .iter()
        .enumerate()
        .map(|(i, p)| (p.id.as_str(), i))
        .collect();

    let mut match_count = 0;
    let mut total_goals = 0;
    for record in matches {
        if !in_range(record, start, end) {
            continue;
        }
        match_count += 1;
        total_goals += record.score_myself;

        for event in &record.events {
            if event.kind != EventType::Goal {
                continue;
            }
            if let Some(i) = event
                .player_id
                .as_deref()
                .and_then(|id| index.get(id).copied())
            {
                lines[i].goals += 1;
            }
            if let Some(i) = event
                .assist_id
                .as_deref()
                .and_then(|id| index.get(id).copied())
            {
                lines[i].assists += 1;
            }
        }
    }

    lines.retain(|line| line.goals > 0 || line.assists > 0);
    lines.sort_by(|a, b| b.goals.cmp(&a.goals).then(b.assists.cmp(&a.assists)));

    StatsSummary {
        match_count,
        total_goals,
        players: lines,
    }
}

fn in_range(record: &MatchRecord, start: Option<NaiveDate>, end: Option<NaiveDate>) -> bool {
    if start.is_none() && end.is_none() {
        return true;
    }
    let Some(date) = parse_match_date(&record.date) else {
        return false;
    };
    if let Some(start) = start {
        if date < start {
            return false;
        }
    }
    if let Some(end) = end {
        if date > end {
            return false;
        }
    }
    true
}
