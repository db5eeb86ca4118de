//! Heuristic cost estimators for informed search.
//!
//! Each function maps a state to a non-negative estimate of the work
//! remaining to sort it. None of them is proven admissible, so the
//! optimality of A* or IDA* under these estimators is conditional, not
//! guaranteed. At the default tube capacity all three return 0 on a
//! goal state.

use std::collections::HashMap;

use crate::engine::{Color, PuzzleState, DEFAULT_TUBE_CAPACITY};

/// A pure scoring function usable by the informed search strategies.
pub type Heuristic = fn(&PuzzleState) -> u32;

/// Penalizes colors spread over several tubes.
///
/// For each color held by more than one tube the penalty is
/// `(holding_tubes - 1) * (total_units - units_in_largest_holding_tube)`,
/// summed over all colors. A color consolidated in a single tube
/// contributes nothing.
pub fn color_dispersion(state: &PuzzleState) -> u32 {
    // Per color: how many units sit in each tube that holds it.
    let mut distribution: HashMap<Color, HashMap<usize, u32>> = HashMap::new();

    for (tube_idx, tube) in state.tubes().iter().enumerate() {
        for &color in tube.units() {
            *distribution
                .entry(color)
                .or_default()
                .entry(tube_idx)
                .or_insert(0) += 1;
        }
    }

    let mut penalty = 0u32;
    for tube_counts in distribution.values() {
        let holding_tubes = tube_counts.len() as u32;
        if holding_tubes > 1 {
            let total: u32 = tube_counts.values().sum();
            let largest = tube_counts.values().copied().max().unwrap_or(0);
            penalty += (holding_tubes - 1) * (total - largest);
        }
    }

    penalty
}

/// Scores distance from completion tube by tube.
///
/// A tube counts as incomplete unless it is empty or uniformly full.
/// Each incomplete tube contributes the capacity minus its well-placed
/// units, the contiguous run of the bottom color measured upward from
/// the bottom. Defined against the default capacity of 4.
pub fn completed_tubes(state: &PuzzleState) -> u32 {
    let capacity = DEFAULT_TUBE_CAPACITY as u32;
    let mut incomplete_tubes = 0u32;
    let mut well_placed_units = 0u32;

    for tube in state.tubes() {
        if tube.is_empty() {
            continue;
        }
        if tube.len() == DEFAULT_TUBE_CAPACITY && tube.is_uniform() {
            continue;
        }
        incomplete_tubes += 1;
        well_placed_units += tube.bottom_run_len() as u32;
    }

    // Every incomplete tube has a bottom run strictly shorter than the
    // capacity, so the subtraction cannot underflow.
    incomplete_tubes * capacity - well_placed_units
}

/// Penalizes mixed tubes and buried units.
///
/// Every tube holding more than one distinct color adds its full length
/// to the mixed count, and each of its units below the top adds the
/// number of differently-colored units strictly above it to the blocked
/// count. The result is `mixed_units + 2 * blocked_units`. Uniform tubes
/// contribute to neither term.
pub fn blocking_pressure(state: &PuzzleState) -> u32 {
    let mut mixed_units = 0u32;
    let mut blocked_units = 0u32;

    for tube in state.tubes() {
        if tube.is_uniform() {
            continue;
        }
        let units = tube.units();
        mixed_units += units.len() as u32;

        // Index 0 is the top; it is never blocked.
        for (idx, &color) in units.iter().enumerate().skip(1) {
            blocked_units += units[..idx].iter().filter(|&&above| above != color).count() as u32;
        }
    }

    mixed_units + 2 * blocked_units
}
