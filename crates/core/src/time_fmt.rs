// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Duration formatting for progress and status lines.

use std::time::Duration;

/// Format a duration as `{h}h{m}m{s}s`, always showing all three fields.
///
/// Sub-second precision is truncated: `59.9s` renders as `0h0m59s`.
pub fn format_hms(duration: Duration) -> String {
    let secs = duration.as_secs();
    format!("{}h{}m{}s", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Format seconds compactly with the largest fitting unit (`45s`, `20m`, `2h`, `3d`).
pub fn format_elapsed(secs: u64) -> String {
    if secs < 60 {
        format!("{secs}s")
    } else if secs < 3600 {
        format!("{}m", secs / 60)
    } else if secs < 86_400 {
        format!("{}h", secs / 3600)
    } else {
        format!("{}d", secs / 86_400)
    }
}

#[cfg(test)]
#[path = "time_fmt_tests.rs"]
mod tests;
