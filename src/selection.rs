use crate::error::{HospitalError, Result};

/// Parse a 1-based menu selection typed at a prompt.
///
/// Non-numeric input is a reported error, never a panic; the shell
/// re-prompts or returns to the menu.
pub fn parse_choice(input: &str) -> Result<usize> {
    let trimmed = input.trim();
    trimmed
        .parse::<usize>()
        .map_err(|_| HospitalError::MalformedInput(trimmed.to_string()))
}

/// Bounds-checked 1-based pick from a listed sequence.
pub fn pick<T>(items: &[T], position: usize) -> Result<&T> {
    if position == 0 || position > items.len() {
        return Err(HospitalError::InvalidSelection {
            position,
            available: items.len(),
        });
    }
    Ok(&items[position - 1])
}

/// Like `pick`, but returns the 0-based index for callers that mutate the
/// underlying sequence.
pub fn pick_index(len: usize, position: usize) -> Result<usize> {
    if position == 0 || position > len {
        return Err(HospitalError::InvalidSelection {
            position,
            available: len,
        });
    }
    Ok(position - 1)
}
