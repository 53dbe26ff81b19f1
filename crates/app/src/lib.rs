pub mod app_loop;
pub mod seed;

use tower_core::TickOutcome;

pub const APP_NAME: &str = "The Cursed Tower";

/// Format a seed as an exact decimal string with no prefix or suffix.
pub fn format_seed(seed: u64) -> String {
    seed.to_string()
}

/// Format a snapshot hash as `0x` followed by exactly 16 lowercase hex digits.
pub fn format_snapshot_hash(hash: u64) -> String {
    format!("0x{hash:016x}")
}

/// Short label for a finished run, used in logs.
pub fn outcome_label(outcome: TickOutcome) -> &'static str {
    match outcome {
        TickOutcome::Continue => "in progress",
        TickOutcome::GameOver => "game over",
        TickOutcome::Victory => "victory",
    }
}
