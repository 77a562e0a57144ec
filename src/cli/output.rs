//! Output formatting for CLI

use crate::{
    engine::{DiagnosticsSnapshot, SelectionResult},
    pipeline::{BacktestResult, MetricsSummary},
};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a subsection header
pub fn print_subsection(title: &str) {
    println!("\n{title}");
    println!("{}", "-".repeat(40));
}

/// Format a number with thousands separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

/// Format a ratio in [0, 1] as a percentage
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn print_selection(selection: &SelectionResult) {
    print_section("Suggested Cell");
    print_kv("Cell", &selection.cell.to_string());
    print_kv("Strategy", &selection.strategy.to_string());
    print_kv("Zone", &selection.zone.to_string());
    print_kv("Confidence", &format!("{}%", selection.confidence));
    print_kv("Epsilon", &format!("{:.4}", selection.epsilon_at_selection));
    print_kv(
        "Value estimate",
        &format!("{:.3}", selection.value_estimate_at_selection),
    );
    print_kv("Candidate tier", &selection.tier.to_string());
}

pub fn print_snapshot(snapshot: &DiagnosticsSnapshot) {
    print_section("Advisor Diagnostics");
    print_kv("Games processed", &format_number(snapshot.games_processed));
    print_kv("Epsilon", &format!("{:.4}", snapshot.epsilon));
    print_kv(
        "Explore / exploit",
        &format!("{} / {}", snapshot.explore_count, snapshot.exploit_count),
    );
    print_kv("Last zone", &snapshot.last_zone.to_string());

    let memory: Vec<String> = snapshot.memory.iter().map(ToString::to_string).collect();
    print_kv(
        "Recent safe",
        &format!(
            "[{}] ({}/{})",
            memory.join(", "),
            snapshot.memory.len(),
            snapshot.memory_capacity
        ),
    );

    print_subsection("Top cells");
    println!("  {:>4}  {:>7}  {:>9}  {:>8}", "cell", "value", "record", "win rate");
    for report in &snapshot.top_cells {
        println!(
            "  {:>4}  {:>7.3}  {:>9}  {:>8}",
            report.cell,
            report.value_estimate,
            format!("{}/{}", report.success, report.total),
            report.win_rate
        );
    }
}

pub fn print_backtest(result: &BacktestResult, metrics: &MetricsSummary) {
    print_section("Backtest Results");
    print_kv("Games replayed", &format_number(result.total_games as u64));
    print_kv(
        "Safe picks",
        &format!("{} ({})", result.safe_picks, format_percent(result.hit_rate)),
    );
    print_kv("Bone picks", &result.bone_picks.to_string());
    print_kv(
        "Explore picks",
        &format!(
            "{} (hit {})",
            result.explore_picks,
            format_percent(metrics.explore_hit_rate)
        ),
    );
    print_kv(
        "Exploit picks",
        &format!(
            "{} (hit {})",
            result.exploit_picks,
            format_percent(metrics.exploit_hit_rate)
        ),
    );
    print_kv("Widened selections", &metrics.widened_selections.to_string());
    print_kv("Final epsilon", &format!("{:.4}", result.final_epsilon));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1_000), "1,000");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(0.5), "50.0%");
        assert_eq!(format_percent(2.0 / 3.0), "66.7%");
    }
}
