//! Pure pause-aware clock arithmetic over match records
//!
//! The clock stores accumulated play time plus the wall-clock instant of
//! the last resume. Elapsed time is derived on read, so no background
//! tick is needed and a process restart loses nothing.

use crate::matches::models::MatchRecord;

/// Starts the clock if paused, pauses it if running
///
/// Finished matches are immutable, so toggling them is a no-op.
pub fn toggle(record: &mut MatchRecord, now_ms: i64) {
    if record.is_finished {
        return;
    }
    if record.is_running {
        pause(record, now_ms);
    } else {
        record.last_resume_ms = Some(now_ms);
        record.is_running = true;
    }
}

/// Pauses the clock, folding the running segment into the accumulator
pub fn pause(record: &mut MatchRecord, now_ms: i64) {
    if !record.is_running {
        return;
    }
    if let Some(resumed_at) = record.last_resume_ms {
        record.accumulated_ms += (now_ms - resumed_at).max(0);
    }
    record.last_resume_ms = None;
    record.is_running = false;
}

/// Total elapsed play time in milliseconds, including any running segment
pub fn elapsed_ms(record: &MatchRecord, now_ms: i64) -> i64 {
    let mut total = record.accumulated_ms;
    if record.is_running {
        if let Some(resumed_at) = record.last_resume_ms {
            total += (now_ms - resumed_at).max(0);
        }
    }
    total.max(0)
}

/// Elapsed time as an MM:SS label, floored to whole seconds
pub fn elapsed_label(record: &MatchRecord, now_ms: i64) -> String {
    let seconds = elapsed_ms(record, now_ms) / 1000;
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
