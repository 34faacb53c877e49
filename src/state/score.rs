use crate::types::ScoreEntry;

/// Render a sorted scoreboard as announcement lines
pub fn format_scoreboard(board: &[ScoreEntry]) -> String {
    if board.is_empty() {
        return "No one scored.".to_string();
    }

    board
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("**{}.** {}: {} pts", i + 1, entry.player.name, entry.points))
        .collect::<Vec<_>>()
        .join("\n")
}
