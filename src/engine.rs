//! Core game model for the water-sort puzzle.
//!
//! This module defines the puzzle's fundamental components:
//! - `Color`: an opaque label for a single liquid unit.
//! - `Tube`: an ordered stack of color units with the top at index 0.
//! - `PuzzleState`: an immutable snapshot of every tube, usable directly
//!   as a visited-set key.
//! - `Move`: a pour between two tube indices.
//! - `Game`: the rule set deciding move legality, state transitions and
//!   goal detection.
// TODO: bit-pack tube contents into a u64 key if profiling ever shows
// state hashing dominating BFS on large instances.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SolverError};

/// Number of units a tube holds when full. Fixed for every puzzle
/// instance created through [`Game::new`].
pub const DEFAULT_TUBE_CAPACITY: usize = 4;

/// An opaque color label. Equality is the only operation the rules need;
/// the numeric payload exists so a palette of `num_colors` labels can be
/// produced without a fixed enum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Color(pub u8);

impl Color {
    /// Converts the color to its character representation ('A' onwards).
    ///
    /// Used by text fixtures; palettes larger than 26 colors have no
    /// character form and are not expected in fixtures.
    pub fn to_char(self) -> char {
        (b'A' + self.0) as char
    }

    /// Parses a fixture character back into a color.
    pub fn from_char(c: char) -> Option<Color> {
        if c.is_ascii_uppercase() {
            Some(Color(c as u8 - b'A'))
        } else {
            None
        }
    }
}

/// An ordered stack of color units. Index 0 is the top (the next unit
/// poured out), the last index is the bottom (the first unit poured in).
///
/// A `Tube` does not know the puzzle capacity; length constraints are
/// enforced by [`Game::is_valid_state`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tube {
    units: Vec<Color>,
}

impl Tube {
    /// Creates an empty tube.
    pub fn empty() -> Self {
        Tube { units: Vec::new() }
    }

    /// Creates a tube from top-to-bottom unit order.
    pub fn from_units(units: Vec<Color>) -> Self {
        Tube { units }
    }

    /// Number of units currently in the tube.
    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// The color at the top of the tube, if any.
    pub fn top(&self) -> Option<Color> {
        self.units.first().copied()
    }

    /// Length of the contiguous run of the top color, 0 for an empty tube.
    ///
    /// This is the single source of truth for how much liquid one pour
    /// transfers; both move enumeration and move application use it.
    pub fn top_run_len(&self) -> usize {
        match self.units.first() {
            None => 0,
            Some(&top) => self.units.iter().take_while(|&&c| c == top).count(),
        }
    }

    /// Length of the contiguous run of the bottom color, 0 for an empty
    /// tube. Measured from the end opposite the pour-out top.
    pub fn bottom_run_len(&self) -> usize {
        match self.units.last() {
            None => 0,
            Some(&bottom) => self.units.iter().rev().take_while(|&&c| c == bottom).count(),
        }
    }

    /// True when the tube holds at most one distinct color. Empty tubes
    /// are trivially uniform.
    pub fn is_uniform(&self) -> bool {
        match self.units.first() {
            None => true,
            Some(&first) => self.units.iter().all(|&c| c == first),
        }
    }

    /// Top-to-bottom view of the units.
    pub fn units(&self) -> &[Color] {
        &self.units
    }
}

/// An immutable snapshot of the whole puzzle. Two states with identical
/// tube contents in identical order compare equal and hash identically,
/// so a state can serve directly as a visited-set key.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PuzzleState {
    tubes: Vec<Tube>,
}

impl PuzzleState {
    pub fn new(tubes: Vec<Tube>) -> Self {
        PuzzleState { tubes }
    }

    pub fn tubes(&self) -> &[Tube] {
        &self.tubes
    }

    /// The tube at `index`.
    ///
    /// # Panics
    /// Panics if `index` is outside the tube list.
    pub fn tube(&self, index: usize) -> &Tube {
        &self.tubes[index]
    }

    pub fn num_tubes(&self) -> usize {
        self.tubes.len()
    }

    /// Lazily yields every color unit across all tubes in tube-major
    /// order (tube 0 top-to-bottom, then tube 1, and so on). The iterator
    /// borrows the state and can be recreated for as many traversals as
    /// needed.
    pub fn iter_colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.tubes.iter().flat_map(|tube| tube.units.iter().copied())
    }
}

/// A pour from one tube index to another. Carries no cached legality or
/// run length; both are recomputed from the state when the move is
/// applied.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub source: usize,
    pub target: usize,
}

impl Move {
    pub fn new(source: usize, target: usize) -> Self {
        Move { source, target }
    }
}

/// Rule carrier for one puzzle configuration.
///
/// `Game` holds no state of its own; every operation takes a
/// [`PuzzleState`] and either inspects it or produces a fresh one.
///
/// # Examples
/// ```
/// use watersort_solver::engine::Game;
/// use watersort_solver::utils::state_from_str_array;
///
/// let game = Game::new(3, 1);
/// let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
/// assert!(!game.is_goal_state(&state));
/// assert_eq!(game.valid_moves(&state).len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    num_tubes: usize,
    num_colors: usize,
    tube_capacity: usize,
}

impl Game {
    /// Creates a configuration with the default tube capacity.
    pub fn new(num_tubes: usize, num_colors: usize) -> Self {
        Self::with_capacity(num_tubes, num_colors, DEFAULT_TUBE_CAPACITY)
    }

    /// Creates a configuration with an explicit tube capacity.
    pub fn with_capacity(num_tubes: usize, num_colors: usize, tube_capacity: usize) -> Self {
        Game {
            num_tubes,
            num_colors,
            tube_capacity,
        }
    }

    pub fn num_tubes(&self) -> usize {
        self.num_tubes
    }

    pub fn num_colors(&self) -> usize {
        self.num_colors
    }

    pub fn tube_capacity(&self) -> usize {
        self.tube_capacity
    }

    /// True when the state has the configured tube count and no tube
    /// exceeds the capacity. Emptiness and partial fills are always
    /// legal; the only structural violation is overfilling.
    pub fn is_valid_state(&self, state: &PuzzleState) -> bool {
        state.num_tubes() == self.num_tubes
            && state.tubes().iter().all(|tube| tube.len() <= self.tube_capacity)
    }

    /// True when the state is valid and every tube is either empty or
    /// full of a single color.
    pub fn is_goal_state(&self, state: &PuzzleState) -> bool {
        self.is_valid_state(state)
            && state.tubes().iter().all(|tube| {
                tube.is_empty() || (tube.len() == self.tube_capacity && tube.is_uniform())
            })
    }

    /// Enumerates every legal move in a deterministic order: source tubes
    /// ascending by index, and for each source all legal targets
    /// ascending by index.
    ///
    /// A source must be non-empty; a target must be a different tube that
    /// is empty or shows the same top color, with enough free capacity
    /// for the source's whole top run. Returns an empty list for a
    /// structurally invalid state, signalling misuse upstream instead of
    /// failing silently mid-search.
    pub fn valid_moves(&self, state: &PuzzleState) -> Vec<Move> {
        let mut moves = Vec::new();

        if !self.is_valid_state(state) {
            return moves;
        }

        for (source, source_tube) in state.tubes().iter().enumerate() {
            let Some(top) = source_tube.top() else {
                continue;
            };
            let run = source_tube.top_run_len();

            for (target, target_tube) in state.tubes().iter().enumerate() {
                if target == source {
                    continue;
                }
                let color_compatible = target_tube.top().map_or(true, |t| t == top);
                let fits_capacity = target_tube.len() + run <= self.tube_capacity;
                if color_compatible && fits_capacity {
                    moves.push(Move::new(source, target));
                }
            }
        }

        moves
    }

    /// Applies a move to a state and returns the resulting state, leaving
    /// the input untouched.
    ///
    /// The whole top run of the source tube is transferred onto the top
    /// of the target tube; the run length is recomputed here with the
    /// same [`Tube::top_run_len`] rule that `valid_moves` uses.
    ///
    /// # Errors
    /// Returns [`SolverError::InvalidMove`] when the state is
    /// structurally invalid, an index is out of range, source equals
    /// target, the source is empty, the target is full, the top colors
    /// differ, or the run does not fit the target's remaining capacity.
    pub fn apply_move(&self, state: &PuzzleState, mv: Move) -> Result<PuzzleState> {
        let reject = |reason: &str| SolverError::InvalidMove {
            src: mv.source,
            target: mv.target,
            reason: reason.to_string(),
        };

        if !self.is_valid_state(state) {
            return Err(reject("state is not structurally valid"));
        }
        if mv.source >= state.num_tubes() || mv.target >= state.num_tubes() {
            return Err(reject("tube index out of range"));
        }
        if mv.source == mv.target {
            return Err(reject("source and target are the same tube"));
        }

        let source_tube = state.tube(mv.source);
        let target_tube = state.tube(mv.target);

        let Some(top) = source_tube.top() else {
            return Err(reject("source tube is empty"));
        };
        if target_tube.len() == self.tube_capacity {
            return Err(reject("target tube is full"));
        }
        if target_tube.top().map_or(false, |t| t != top) {
            return Err(reject("target top color does not match"));
        }
        let run = source_tube.top_run_len();
        if target_tube.len() + run > self.tube_capacity {
            return Err(reject("top run does not fit the target tube"));
        }

        let mut tubes = state.tubes().to_vec();
        let mut new_target: Vec<Color> = source_tube.units()[..run].to_vec();
        new_target.extend_from_slice(target_tube.units());
        tubes[mv.source] = Tube::from_units(source_tube.units()[run..].to_vec());
        tubes[mv.target] = Tube::from_units(new_target);

        Ok(PuzzleState::new(tubes))
    }
}
