use std::path::Path;

use crate::error::Result;
use crate::model::Board;

/// Save a board to a JSON file.
pub fn save_board(board: &Board, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(board)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), activities = board.activities.len(), "board saved");
    Ok(())
}

/// Load a board from a JSON file.
pub fn load_board(path: &Path) -> Result<Board> {
    let json = std::fs::read_to_string(path)?;
    let board: Board = serde_json::from_str(&json)?;
    tracing::info!(path = %path.display(), activities = board.activities.len(), "board loaded");
    Ok(board)
}
