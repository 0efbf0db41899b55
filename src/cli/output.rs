//! Output formatting for CLI

use crate::pipeline::{TournamentReport, TrainingSummary};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
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

/// Format a fraction as a percentage with one decimal
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

pub fn print_training_summary(label: &str, summary: &TrainingSummary) {
    print_kv(
        label,
        &format!(
            "{} games, W {} / D {} / L {}",
            format_number(summary.total_games()),
            format_percent(summary.win_rate()),
            format_percent(summary.draw_rate()),
            format_percent(summary.loss_rate()),
        ),
    );
}

/// Render the standings table, best agent first.
pub fn standings_table(report: &TournamentReport) -> String {
    let mut out = format!(
        "{:<6}{:<15}{:<12}{:<8}{:<8}{:<8}{:<8}{:>8}\n",
        "Rank", "Agent", "Points", "W", "D", "L", "Games", "Win%"
    );
    out.push_str(&"-".repeat(73));
    out.push('\n');
    for (rank, standing) in report.standings.iter().enumerate() {
        out.push_str(&format!(
            "{:<6}{:<15}{:<12}{:<8}{:<8}{:<8}{:<8}{:>8}\n",
            rank + 1,
            standing.name,
            format!("{}/{}", standing.points, standing.max_points()),
            standing.wins,
            standing.draws,
            standing.losses,
            standing.games,
            format_percent(standing.win_rate()),
        ));
    }
    out
}

/// Render the head-to-head matrix: row agent's win rate as agent 1 against
/// the column agent.
pub fn head_to_head_table(report: &TournamentReport, names: &[String]) -> String {
    let mut out = format!("{:15}", "");
    for name in names {
        let short: String = name.chars().take(10).collect();
        out.push_str(&format!("{short:>12}"));
    }
    out.push('\n');

    for row in names {
        out.push_str(&format!("{row:<15}"));
        for column in names {
            let cell = match report.head_to_head(row, column) {
                Some(rate) => format_percent(rate),
                None => "---".to_string(),
            };
            out.push_str(&format!("{cell:>12}"));
        }
        out.push('\n');
    }
    out
}
