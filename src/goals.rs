use crate::errors::AppError;
use crate::models::{GoalCell, GoalsBoard};

pub const GRID_SIZES: std::ops::RangeInclusive<usize> = 3..=5;

pub fn resize(board: &mut GoalsBoard, size: usize) -> Result<(), AppError> {
    if !GRID_SIZES.contains(&size) {
        return Err(AppError::bad_request("grid size must be 3, 4 or 5"));
    }

    let filled = board.goals.iter().filter(|goal| goal.is_filled()).count();
    let capacity = size * size;
    if filled > capacity {
        return Err(AppError::bad_request(format!(
            "Cannot resize to {size}x{size} ({capacity} slots). You have {filled} filled goals. Please delete some goals first."
        )));
    }

    board.goals.resize(capacity, GoalCell::default());
    board.grid_size = size;
    Ok(())
}

fn cell_mut(board: &mut GoalsBoard, index: usize) -> Result<&mut GoalCell, AppError> {
    board
        .goals
        .get_mut(index)
        .ok_or_else(|| AppError::not_found(format!("no goal at index {index}")))
}

pub fn edit(
    board: &mut GoalsBoard,
    index: usize,
    text: Option<String>,
    details: Option<String>,
) -> Result<GoalCell, AppError> {
    let cell = cell_mut(board, index)?;
    if let Some(text) = text {
        cell.text = text;
    }
    if let Some(details) = details {
        cell.details = details;
    }
    Ok(cell.clone())
}

pub fn toggle(board: &mut GoalsBoard, index: usize) -> Result<bool, AppError> {
    cell_mut(board, index)?;
    let checked = board.checked.entry(index).or_default();
    *checked = !*checked;
    Ok(*checked)
}

/// Clears a cell's text, details and checked flag.
pub fn clear(board: &mut GoalsBoard, index: usize) -> Result<(), AppError> {
    *cell_mut(board, index)? = GoalCell::default();
    board.checked.remove(&index);
    Ok(())
}
