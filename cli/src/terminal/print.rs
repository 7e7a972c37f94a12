use colored::*;
use tracing::info;

pub const TOTAL_WIDTH: usize = 64;

pub fn header(msg: &str, quiet: bool) {
    if quiet {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = formatted.chars().count();

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    info!("{}", line);
}

/// Writes the report to stdout exactly once, newline terminated.
pub fn report(report: &str) {
    println!("{}", report.trim_end_matches('\n'));
}
