//! Interactive stdin prompts.
//!
//! This is intentionally kept separate from clap parsing:
//! - clap handles structured flags/subcommands
//! - the prompts provide the "run `caudit` and type instrument codes" UX

use std::io::{self, Write};

use crate::error::AppError;

/// Prompt for an instrument code.
///
/// Returns `None` when the user wants to stop: empty input or EOF.
pub fn read_instrument() -> Result<Option<String>, AppError> {
    print!("Enter instrument code: ");
    io::stdout()
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Ok(None);
    }

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Ok(Some(input.to_string()))
}

/// Require the literal confirmation `DELETE` before destructive operations.
pub fn confirm_deletion() -> Result<bool, AppError> {
    println!("\nType DELETE to confirm deletion (anything else cancels):");
    print!("> ");
    io::stdout()
        .flush()
        .map_err(|e| AppError::usage(format!("Failed to write prompt: {e}")))?;

    let mut input = String::new();
    let bytes = io::stdin()
        .read_line(&mut input)
        .map_err(|e| AppError::usage(format!("Failed to read input: {e}")))?;

    if bytes == 0 {
        return Ok(false);
    }
    Ok(input.trim() == "DELETE")
}
