//! Utility helpers for building puzzle states from compact text fixtures.

use crate::engine::{Color, PuzzleState, Tube};
use crate::error::{Result, SolverError};

/// Parses an array of strings into a `PuzzleState`.
///
/// Each string describes one tube, read top to bottom: the first
/// character is the unit that would be poured out next, the last is the
/// unit at the bottom. An empty string is an empty tube. Uppercase
/// letters map to colors through [`Color::from_char`] ('A' is color 0).
///
/// No capacity or tube-count check happens here; the fixture is handed
/// to the rules layer which validates against its own configuration.
///
/// # Errors
/// Returns [`SolverError::InvalidParameter`] when any character is not
/// an uppercase ASCII letter.
///
/// # Examples
/// ```
/// use watersort_solver::utils::state_from_str_array;
/// use watersort_solver::engine::Color;
///
/// let state = state_from_str_array(&["AB", "BA", ""]).unwrap();
/// assert_eq!(state.num_tubes(), 3);
/// assert_eq!(state.tube(0).top(), Some(Color(0)));
/// assert!(state.tube(2).is_empty());
///
/// assert!(state_from_str_array(&["A.B"]).is_err());
/// ```
pub fn state_from_str_array(tubes: &[&str]) -> Result<PuzzleState> {
    let mut parsed = Vec::with_capacity(tubes.len());

    for (tube_idx, tube_str) in tubes.iter().enumerate() {
        let mut units = Vec::with_capacity(tube_str.len());
        for (unit_idx, ch) in tube_str.chars().enumerate() {
            match Color::from_char(ch) {
                Some(color) => units.push(color),
                None => {
                    return Err(SolverError::InvalidParameter(format!(
                        "unrecognized color character '{}' in tube {} position {}",
                        ch, tube_idx, unit_idx
                    )))
                }
            }
        }
        parsed.push(Tube::from_units(units));
    }

    Ok(PuzzleState::new(parsed))
}
