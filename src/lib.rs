//! # Water Sort Solver Library
//!
//! Core state model and search engine for the water-sort puzzle: a fixed
//! number of tubes hold stacked color units, and a legal pour transfers
//! the contiguous top run of one tube onto a compatible tube. The crate
//! finds move sequences that leave every tube empty or uniformly full.
//!
//! Rendering, argument parsing and any interactive front end are left to
//! consumers; the types here are the complete contract a presentation
//! layer needs.
//!
//! ## Modules
//! - `engine`: tube and state representation (`Color`, `Tube`,
//!   `PuzzleState`, `Move`) plus the rule set (`Game`) for move
//!   legality, transitions and goal detection.
//! - `heuristics`: three cost estimators for the informed strategies.
//! - `solver`: `SearchSolver` with BFS, DFS, depth-limited search, A*,
//!   IDA* and bounded backtracking, all reporting `SearchResult`.
//! - `generator`: `PuzzleGenerator`, which builds solvable initial
//!   states and verifies them through the solver's BFS.
//! - `error`: the crate-wide `SolverError` and `Result` alias.
//! - `utils`: compact text fixtures for states, used mostly by tests.

pub mod engine;
pub mod error;
pub mod generator;
pub mod heuristics;
pub mod solver;
pub mod utils;

// Items from sub-modules, if public, are accessed via their full path,
// e.g. `watersort_solver::solver::SearchSolver`. This keeps the
// top-level library namespace clean.
