//! Output formatting and progress bars for CLI

use indicatif::{ProgressBar, ProgressStyle};

use crate::{
    rps::{Move, Outcome},
    session::{MoveCounts, RoundResult, StatsSnapshot},
    simulation::SimulationSummary,
};

/// Create a progress bar for simulated rounds
pub fn create_round_progress(total_rounds: u64) -> ProgressBar {
    let pb = ProgressBar::new(total_rounds);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} rounds ({msg})")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    pb
}

/// Create a spinner for training tasks
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .expect("Invalid spinner template"),
    );
    pb.set_message(message.to_string());
    pb
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Format a key-value pair
pub fn format_kv(key: &str, value: &str) -> String {
    format!("  {:20} {}", format!("{}:", key), value)
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("{}", format_kv(key, value));
}

fn format_counts(counts: &MoveCounts) -> String {
    Move::ALL
        .iter()
        .map(|&mv| format!("{mv}={}", counts.get(mv)))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_moves(moves: &[Move]) -> String {
    if moves.is_empty() {
        return "-".to_string();
    }
    moves
        .iter()
        .map(|mv| mv.as_str())
        .collect::<Vec<_>>()
        .join(" ")
}

/// One-line summary of a round for the interactive loop
pub fn format_round(result: &RoundResult) -> String {
    let verdict = match result.outcome {
        Outcome::PlayerWin => "you win",
        Outcome::BotWin => "bot wins",
        Outcome::Tie => "tie",
    };
    let mut line = format!(
        "round {}: you {} / bot {} -> {} (W{} L{} T{}, streak {})",
        result.round,
        result.player_move,
        result.bot_move,
        verdict,
        result.stats.wins,
        result.stats.losses,
        result.stats.ties,
        result.stats.current_streak,
    );
    if result.retrained {
        line.push_str(" [model retrained]");
    }
    line
}

/// Statistics query result, one key-value pair per line
pub fn format_stats(stats: &StatsSnapshot) -> String {
    [
        format_kv("Games played", &stats.games_played.to_string()),
        format_kv(
            "W / L / T",
            &format!("{} / {} / {}", stats.wins, stats.losses, stats.ties),
        ),
        format_kv(
            "Streak (max)",
            &format!("{} ({})", stats.current_streak, stats.max_streak),
        ),
        format_kv("Player win rate", &format!("{:.1}%", stats.player_win_rate)),
        format_kv("Bot win rate", &format!("{:.1}%", stats.bot_win_rate)),
        format_kv("Player moves", &format_counts(&stats.player_moves)),
        format_kv("Bot moves", &format_counts(&stats.bot_moves)),
        format_kv("Last moves", &format_moves(&stats.last_moves)),
        format_kv("Retrains", &stats.retrain_count.to_string()),
    ]
    .join("\n")
}

/// Print the statistics query result
pub fn print_stats(stats: &StatsSnapshot) {
    println!("{}", format_stats(stats));
}

/// Print a simulation summary
pub fn print_summary(summary: &SimulationSummary) {
    print_kv("Player", &summary.player);
    print_kv("Predictor", &summary.predictor);
    print_kv("Rounds", &summary.rounds.to_string());
    print_kv("Retrains", &summary.retrains.to_string());
    print_kv(
        "Bot wins (1st half)",
        &format!("{:.1}%", summary.early_bot_win_share * 100.0),
    );
    print_kv(
        "Bot wins (2nd half)",
        &format!("{:.1}%", summary.late_bot_win_share * 100.0),
    );
    print_stats(&summary.final_stats);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_empty_move_list() {
        assert_eq!(format_moves(&[]), "-");
        assert_eq!(format_moves(&[Move::Rock, Move::Paper]), "rock paper");
    }

    #[test]
    fn formats_counts_in_move_order() {
        let counts = MoveCounts {
            rock: 2,
            paper: 0,
            scissors: 1,
        };
        assert_eq!(format_counts(&counts), "rock=2 paper=0 scissors=1");
    }
}
