//! Search algorithms over the water-sort state space.
//!
//! The [`SearchSolver`] explores the transition graph defined by
//! [`Game`] with six strategies: breadth-first, depth-first, depth
//! limited, A*, IDA* and bounded backtracking. Every strategy reports
//! the same [`SearchResult`] shape so callers can compare them on equal
//! terms.
//!
//! Metrics semantics: `expanded_nodes` counts states whose successors
//! were actually generated, not merely discovered. `max_frontier_size`
//! is the peak of the queue or heap for the frontier-based strategies
//! and the peak stack or recursion depth for the depth-first ones.
//!
//! Exhausting the space without a solution is a normal outcome reported
//! with `solution_depth` of -1, never an error. Only malformed input
//! (unknown method ids, a missing heuristic, a negative depth limit)
//! makes the entry points fail.

use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet, VecDeque};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::engine::{Game, Move, PuzzleState};
use crate::error::{Result, SolverError};
use crate::heuristics::Heuristic;

/// Everything a search run reports back.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Moves from the initial state to a goal; empty when nothing was
    /// found or the initial state was already solved.
    pub path: Vec<Move>,
    /// States whose successors were generated during the run.
    pub expanded_nodes: usize,
    /// Peak number of concurrently held frontier nodes, or peak
    /// stack/recursion depth for the depth-first strategies.
    pub max_frontier_size: usize,
    /// -1 when no solution was found within the strategy's constraints,
    /// 0 when the initial state was already a goal, otherwise the number
    /// of moves in `path`.
    pub solution_depth: i32,
    /// Wall-clock duration of the run.
    pub execution_time: Duration,
}

impl SearchResult {
    /// True when the run produced a solution (including the trivial
    /// zero-move one).
    pub fn is_solved(&self) -> bool {
        self.solution_depth >= 0
    }

    fn solved_at_root(start: Instant) -> Self {
        SearchResult {
            path: Vec::new(),
            expanded_nodes: 0,
            max_frontier_size: 1,
            solution_depth: 0,
            execution_time: start.elapsed(),
        }
    }

    fn found(path: Vec<Move>, expanded_nodes: usize, max_frontier_size: usize, start: Instant) -> Self {
        let solution_depth = path.len() as i32;
        SearchResult {
            path,
            expanded_nodes,
            max_frontier_size,
            solution_depth,
            execution_time: start.elapsed(),
        }
    }

    fn not_found(expanded_nodes: usize, max_frontier_size: usize, start: Instant) -> Self {
        SearchResult {
            path: Vec::new(),
            expanded_nodes,
            max_frontier_size,
            solution_depth: -1,
            execution_time: start.elapsed(),
        }
    }
}

/// One node of the search tree kept in the arena.
struct SearchNode {
    state: PuzzleState,
    parent: Option<usize>,
    mv: Option<Move>,
    depth: usize,
}

/// Arena holding every discovered node. Parent links are plain indices,
/// which keeps path reconstruction an O(depth) walk without any pointer
/// cycles or reference counting.
struct NodeArena {
    nodes: Vec<SearchNode>,
}

impl NodeArena {
    fn new() -> Self {
        NodeArena { nodes: Vec::new() }
    }

    fn push(&mut self, state: PuzzleState, parent: Option<usize>, mv: Option<Move>, depth: usize) -> usize {
        self.nodes.push(SearchNode {
            state,
            parent,
            mv,
            depth,
        });
        self.nodes.len() - 1
    }

    /// Walks parent indices back to the root and returns the move
    /// sequence in root-to-node order.
    fn reconstruct_path(&self, index: usize) -> Vec<Move> {
        let mut path = Vec::new();
        let mut current = index;
        loop {
            let node = &self.nodes[current];
            match (node.mv, node.parent) {
                (Some(mv), Some(parent)) => {
                    path.push(mv);
                    current = parent;
                }
                _ => break,
            }
        }
        path.reverse();
        path
    }
}

/// Mutable bookkeeping threaded through the backtracking recursion.
struct BacktrackContext {
    /// Current exclusive depth bound; tightens whenever a strictly
    /// shorter solution is found.
    bound: usize,
    best: Option<Vec<Move>>,
    expanded: usize,
    max_depth: usize,
}

/// Explorer for one puzzle configuration.
///
/// The solver is stateless between calls; each run owns its frontier and
/// visited structures, so independent runs over the same `Game` never
/// interfere with each other.
pub struct SearchSolver {
    game: Game,
}

impl SearchSolver {
    pub fn new(game: Game) -> Self {
        SearchSolver { game }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Generous termination ceiling used by plain DFS and as the initial
    /// backtracking bound.
    fn depth_ceiling(&self) -> usize {
        self.game.num_tubes() * self.game.tube_capacity() * 2
    }

    /// Solves the puzzle with the strategy named by `method`.
    ///
    /// Accepted identifiers (case-insensitive, surrounding whitespace
    /// ignored): `bfs`, `dfs`, `astar`/`a_star`/`a*`,
    /// `idastar`/`ida_star`/`ida*`, `backtracking`/`backtrack`. The
    /// informed methods require `heuristic`; backtracking uses it as an
    /// optional pruning aid; the uninformed methods ignore it.
    ///
    /// # Errors
    /// [`SolverError::UnknownAlgorithm`] for unrecognized identifiers
    /// and [`SolverError::MissingHeuristic`] when an informed method is
    /// called without a heuristic.
    pub fn solve(
        &self,
        initial: &PuzzleState,
        method: &str,
        heuristic: Option<Heuristic>,
    ) -> Result<SearchResult> {
        let normalized = method.trim().to_ascii_lowercase();
        let require_heuristic = || {
            heuristic.ok_or_else(|| SolverError::MissingHeuristic {
                method: normalized.clone(),
            })
        };

        match normalized.as_str() {
            "bfs" => Ok(self.bfs(initial)),
            "dfs" => Ok(self.dfs(initial)),
            "astar" | "a_star" | "a*" => {
                let h = require_heuristic()?;
                Ok(self.a_star(initial, h))
            }
            "idastar" | "ida_star" | "ida*" => {
                let h = require_heuristic()?;
                Ok(self.ida_star(initial, h))
            }
            "backtracking" | "backtrack" => Ok(self.backtracking_with_bound(initial, heuristic)),
            _ => Err(SolverError::UnknownAlgorithm(method.trim().to_string())),
        }
    }

    /// Breadth-first search. Optimal in move count under unit move cost.
    ///
    /// The frontier is FIFO, the visited set is global and seeded with
    /// the initial state, and the goal test runs on generation so the
    /// first goal discovered ends the search at the shallowest depth.
    pub fn bfs(&self, initial: &PuzzleState) -> SearchResult {
        let start = Instant::now();
        if self.game.is_goal_state(initial) {
            return SearchResult::solved_at_root(start);
        }

        let mut arena = NodeArena::new();
        let root = arena.push(initial.clone(), None, None, 0);

        let mut frontier: VecDeque<usize> = VecDeque::new();
        frontier.push_back(root);
        let mut visited: HashSet<PuzzleState> = HashSet::new();
        visited.insert(initial.clone());

        let mut expanded = 0usize;
        let mut max_frontier = frontier.len();

        while let Some(index) = frontier.pop_front() {
            let state = arena.nodes[index].state.clone();
            let depth = arena.nodes[index].depth;
            expanded += 1;

            for mv in self.game.valid_moves(&state) {
                let next_state = self
                    .game
                    .apply_move(&state, mv)
                    .expect("moves from valid_moves must apply");
                if visited.contains(&next_state) {
                    continue;
                }

                let child = arena.push(next_state.clone(), Some(index), Some(mv), depth + 1);
                if self.game.is_goal_state(&next_state) {
                    debug!("bfs: goal at depth {} after {} expansions", depth + 1, expanded);
                    return SearchResult::found(
                        arena.reconstruct_path(child),
                        expanded,
                        max_frontier,
                        start,
                    );
                }

                visited.insert(next_state);
                frontier.push_back(child);
                max_frontier = max_frontier.max(frontier.len());
            }
        }

        SearchResult::not_found(expanded, max_frontier, start)
    }

    /// Depth-first search, bounded by a generous internal ceiling purely
    /// to guarantee termination. Neither complete within the ceiling nor
    /// optimal.
    pub fn dfs(&self, initial: &PuzzleState) -> SearchResult {
        self.bounded_dfs(initial, self.depth_ceiling())
    }

    /// Depth-first search with a caller-supplied ceiling. States at
    /// `limit` or deeper are not expanded further; a -1 result means no
    /// solution exists within the limit, not that none exists at all.
    ///
    /// # Errors
    /// [`SolverError::InvalidParameter`] when `limit` is negative.
    pub fn depth_limited_search(&self, initial: &PuzzleState, limit: i32) -> Result<SearchResult> {
        if limit < 0 {
            return Err(SolverError::InvalidParameter(format!(
                "depth limit must be non-negative, got {}",
                limit
            )));
        }
        Ok(self.bounded_dfs(initial, limit as usize))
    }

    fn bounded_dfs(&self, initial: &PuzzleState, limit: usize) -> SearchResult {
        let start = Instant::now();
        if self.game.is_goal_state(initial) {
            return SearchResult::solved_at_root(start);
        }

        let mut arena = NodeArena::new();
        let root = arena.push(initial.clone(), None, None, 0);

        let mut stack: Vec<usize> = vec![root];
        let mut visited: HashSet<PuzzleState> = HashSet::new();
        visited.insert(initial.clone());

        let mut expanded = 0usize;
        let mut max_frontier = stack.len();

        while let Some(index) = stack.pop() {
            let state = arena.nodes[index].state.clone();
            let depth = arena.nodes[index].depth;
            if depth >= limit {
                continue;
            }
            expanded += 1;

            for mv in self.game.valid_moves(&state) {
                let next_state = self
                    .game
                    .apply_move(&state, mv)
                    .expect("moves from valid_moves must apply");
                if visited.contains(&next_state) {
                    continue;
                }

                let child = arena.push(next_state.clone(), Some(index), Some(mv), depth + 1);
                if self.game.is_goal_state(&next_state) {
                    return SearchResult::found(
                        arena.reconstruct_path(child),
                        expanded,
                        max_frontier,
                        start,
                    );
                }

                visited.insert(next_state);
                stack.push(child);
                max_frontier = max_frontier.max(stack.len());
            }
        }

        SearchResult::not_found(expanded, max_frontier, start)
    }

    /// A* search ordered by `f = g + h`, with ties broken by insertion
    /// order (FIFO among equal f).
    ///
    /// The best known g per state is tracked; a state is requeued only
    /// when a strictly better g is found, and stale heap entries are
    /// skipped on pop. The result is optimal in move count only if the
    /// heuristic never overestimates, which is not verified here.
    pub fn a_star(&self, initial: &PuzzleState, heuristic: Heuristic) -> SearchResult {
        let start = Instant::now();
        if self.game.is_goal_state(initial) {
            return SearchResult::solved_at_root(start);
        }

        let mut arena = NodeArena::new();
        let root = arena.push(initial.clone(), None, None, 0);

        // Min-heap entries are (f, insertion sequence, node index); the
        // monotonically increasing sequence reproduces FIFO ordering
        // among nodes with equal f.
        let mut open: BinaryHeap<Reverse<(u32, u64, usize)>> = BinaryHeap::new();
        let mut seq = 0u64;
        open.push(Reverse((heuristic(initial), seq, root)));

        let mut best_g: HashMap<PuzzleState, u32> = HashMap::new();
        best_g.insert(initial.clone(), 0);

        let mut expanded = 0usize;
        let mut max_frontier = open.len();

        while let Some(Reverse((_f, _seq, index))) = open.pop() {
            let state = arena.nodes[index].state.clone();
            let depth = arena.nodes[index].depth;
            let g = depth as u32;

            // A better path to this state was queued after this entry.
            if best_g.get(&state).map_or(false, |&known| known < g) {
                continue;
            }
            if self.game.is_goal_state(&state) {
                debug!("a*: goal at depth {} after {} expansions", depth, expanded);
                return SearchResult::found(
                    arena.reconstruct_path(index),
                    expanded,
                    max_frontier,
                    start,
                );
            }
            expanded += 1;

            for mv in self.game.valid_moves(&state) {
                let next_state = self
                    .game
                    .apply_move(&state, mv)
                    .expect("moves from valid_moves must apply");
                let next_g = g + 1;
                if best_g.get(&next_state).map_or(false, |&known| known <= next_g) {
                    continue;
                }
                best_g.insert(next_state.clone(), next_g);

                seq += 1;
                let f = next_g + heuristic(&next_state);
                let child = arena.push(next_state, Some(index), Some(mv), depth + 1);
                open.push(Reverse((f, seq, child)));
                max_frontier = max_frontier.max(open.len());
            }
        }

        SearchResult::not_found(expanded, max_frontier, start)
    }

    /// IDA*: iterative deepening over an f threshold.
    ///
    /// Each iteration is a depth-first contour search on an explicit
    /// stack (no native recursion), pruning nodes whose f exceeds the
    /// threshold and remembering the smallest exceeding f as the next
    /// threshold. Cycle avoidance covers only the current path, so
    /// memory stays proportional to the depth at the price of
    /// re-expansion across iterations. The search fails once an
    /// iteration explores everything reachable without any node
    /// exceeding the threshold.
    pub fn ida_star(&self, initial: &PuzzleState, heuristic: Heuristic) -> SearchResult {
        let start = Instant::now();
        if self.game.is_goal_state(initial) {
            return SearchResult::solved_at_root(start);
        }

        struct Frame {
            state: PuzzleState,
            moves: Vec<Move>,
            next: usize,
        }

        let mut expanded = 0usize;
        let mut max_depth = 0usize;
        let mut threshold = heuristic(initial);

        loop {
            debug!("ida*: starting iteration with threshold {}", threshold);
            let mut next_threshold: Option<u32> = None;

            let mut stack: Vec<Frame> = Vec::new();
            let mut on_path: HashSet<PuzzleState> = HashSet::new();
            let mut path: Vec<Move> = Vec::new();

            on_path.insert(initial.clone());
            stack.push(Frame {
                state: initial.clone(),
                moves: self.game.valid_moves(initial),
                next: 0,
            });
            expanded += 1;
            max_depth = max_depth.max(stack.len());

            while !stack.is_empty() {
                let top = stack.len() - 1;
                if stack[top].next >= stack[top].moves.len() {
                    if let Some(frame) = stack.pop() {
                        on_path.remove(&frame.state);
                        path.pop();
                    }
                    continue;
                }

                let mv = stack[top].moves[stack[top].next];
                stack[top].next += 1;

                let next_state = self
                    .game
                    .apply_move(&stack[top].state, mv)
                    .expect("moves from valid_moves must apply");
                if on_path.contains(&next_state) {
                    continue;
                }

                let g = stack.len() as u32;
                let f = g + heuristic(&next_state);
                if f > threshold {
                    next_threshold = Some(next_threshold.map_or(f, |t| t.min(f)));
                    continue;
                }

                if self.game.is_goal_state(&next_state) {
                    path.push(mv);
                    debug!("ida*: goal at depth {} after {} expansions", path.len(), expanded);
                    return SearchResult::found(path, expanded, max_depth, start);
                }

                let moves = self.game.valid_moves(&next_state);
                on_path.insert(next_state.clone());
                path.push(mv);
                stack.push(Frame {
                    state: next_state,
                    moves,
                    next: 0,
                });
                expanded += 1;
                max_depth = max_depth.max(stack.len());
            }

            match next_threshold {
                Some(t) => threshold = t,
                // Nothing exceeded the threshold: the reachable space is
                // exhausted and no solution exists.
                None => return SearchResult::not_found(expanded, max_depth, start),
            }
        }
    }

    /// Backtracking against a shrinking depth bound.
    ///
    /// The bound starts at a generous heuristic-free cap and tightens to
    /// the depth of every strictly shorter solution found. All branches
    /// under the current bound are explored rather than stopping at the
    /// first success, so the reported path is the shortest one
    /// discoverable under successive tightening. When a heuristic is
    /// supplied it sharpens the pruning test to `depth + h(state)`.
    /// Cycle avoidance covers only the current path, and the recursion
    /// depth is capped by the initial bound.
    pub fn backtracking_with_bound(
        &self,
        initial: &PuzzleState,
        heuristic: Option<Heuristic>,
    ) -> SearchResult {
        let start = Instant::now();
        if self.game.is_goal_state(initial) {
            return SearchResult::solved_at_root(start);
        }

        let mut ctx = BacktrackContext {
            bound: self.depth_ceiling(),
            best: None,
            expanded: 0,
            max_depth: 0,
        };
        let mut path: Vec<Move> = Vec::new();
        let mut on_path: HashSet<PuzzleState> = HashSet::new();
        on_path.insert(initial.clone());

        self.backtrack(initial, 0, heuristic, &mut path, &mut on_path, &mut ctx);

        let expanded = ctx.expanded;
        let max_depth = ctx.max_depth;
        match ctx.best {
            Some(best) => SearchResult::found(best, expanded, max_depth, start),
            None => SearchResult::not_found(expanded, max_depth, start),
        }
    }

    fn backtrack(
        &self,
        state: &PuzzleState,
        depth: usize,
        heuristic: Option<Heuristic>,
        path: &mut Vec<Move>,
        on_path: &mut HashSet<PuzzleState>,
        ctx: &mut BacktrackContext,
    ) {
        ctx.max_depth = ctx.max_depth.max(depth + 1);

        let estimate = depth + heuristic.map_or(0, |h| h(state) as usize);
        if estimate >= ctx.bound {
            return;
        }
        ctx.expanded += 1;

        for mv in self.game.valid_moves(state) {
            let next_state = self
                .game
                .apply_move(state, mv)
                .expect("moves from valid_moves must apply");
            if on_path.contains(&next_state) {
                continue;
            }

            path.push(mv);
            if self.game.is_goal_state(&next_state) {
                let solution_depth = depth + 1;
                if solution_depth < ctx.bound {
                    ctx.bound = solution_depth;
                    ctx.best = Some(path.clone());
                    debug!("backtracking: bound tightened to {}", solution_depth);
                }
                path.pop();
                continue;
            }

            on_path.insert(next_state.clone());
            self.backtrack(&next_state, depth + 1, heuristic, path, on_path, ctx);
            on_path.remove(&next_state);
            path.pop();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::heuristics::{blocking_pressure, color_dispersion, completed_tubes};
    use crate::utils::state_from_str_array;

    fn zero(_: &PuzzleState) -> u32 {
        0
    }

    fn replay(game: &Game, initial: &PuzzleState, path: &[Move]) -> PuzzleState {
        let mut state = initial.clone();
        for &mv in path {
            state = game.apply_move(&state, mv).unwrap();
        }
        state
    }

    /// Smallest non-trivial instance: capacity 2, two colors crossed
    /// over two tubes with two spares. The optimum is three moves.
    fn crossed_pair() -> (Game, PuzzleState) {
        let game = Game::with_capacity(4, 2, 2);
        let state = state_from_str_array(&["AB", "BA", "", ""]).unwrap();
        (game, state)
    }

    #[test]
    fn test_solve_dispatch_unknown_method() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let err = solver.solve(&state, "simulated annealing", None).unwrap_err();
        assert!(matches!(err, SolverError::UnknownAlgorithm(_)));
    }

    #[test]
    fn test_solve_requires_heuristic_for_informed_methods() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        for method in ["astar", "idastar"] {
            let err = solver.solve(&state, method, None).unwrap_err();
            assert!(matches!(err, SolverError::MissingHeuristic { .. }));
        }
        // Backtracking treats the heuristic as optional.
        assert!(solver.solve(&state, "backtracking", None).is_ok());
    }

    #[test]
    fn test_solve_normalizes_method_ids() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        assert_eq!(solver.solve(&state, "  BFS ", None).unwrap().solution_depth, 1);
        assert_eq!(
            solver.solve(&state, "A*", Some(zero)).unwrap().solution_depth,
            1
        );
    }

    #[test]
    fn test_bfs_single_move_puzzle() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let result = solver.bfs(&state);
        assert_eq!(result.solution_depth, 1);
        assert_eq!(result.path.len(), 1);
        assert!(result.expanded_nodes >= 1);
        assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
    }

    #[test]
    fn test_already_solved_short_circuits_every_strategy() {
        let game = Game::new(3, 1);
        let solved = state_from_str_array(&["AAAA", "", ""]).unwrap();
        let solver = SearchSolver::new(game);

        let results = vec![
            solver.bfs(&solved),
            solver.dfs(&solved),
            solver.depth_limited_search(&solved, 0).unwrap(),
            solver.a_star(&solved, zero),
            solver.ida_star(&solved, zero),
            solver.backtracking_with_bound(&solved, None),
        ];
        for result in results {
            assert_eq!(result.solution_depth, 0);
            assert!(result.path.is_empty());
            assert_eq!(result.expanded_nodes, 0);
        }
    }

    #[test]
    fn test_depth_limited_zero_on_unsolved_state() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let result = solver.depth_limited_search(&state, 0).unwrap();
        assert_eq!(result.solution_depth, -1);
        assert!(result.path.is_empty());
    }

    #[test]
    fn test_depth_limited_negative_limit_is_error() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let err = solver.depth_limited_search(&state, -1).unwrap_err();
        assert!(matches!(err, SolverError::InvalidParameter(_)));
    }

    #[test]
    fn test_depth_limited_finds_within_limit() {
        let game = Game::new(3, 1);
        let state = state_from_str_array(&["AA", "AA", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let result = solver.depth_limited_search(&state, 1).unwrap();
        assert_eq!(result.solution_depth, 1);
    }

    #[test]
    fn test_bfs_finds_three_move_optimum() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let result = solver.bfs(&state);
        assert_eq!(result.solution_depth, 3);
        assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
    }

    #[test]
    fn test_astar_with_admissible_heuristic_matches_bfs() {
        // h == 0 never overestimates, so A* must return the BFS depth.
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let bfs_depth = solver.bfs(&state).solution_depth;
        let astar = solver.a_star(&state, zero);
        assert_eq!(astar.solution_depth, bfs_depth);
        assert!(game.is_goal_state(&replay(&game, &state, &astar.path)));
    }

    #[test]
    fn test_astar_solves_with_each_provided_heuristic() {
        let game = Game::new(4, 2);
        let state = state_from_str_array(&["BBAA", "AABB", "", ""]).unwrap();
        let solver = SearchSolver::new(game);
        for h in [color_dispersion, completed_tubes, blocking_pressure] {
            let result = solver.a_star(&state, h);
            assert!(result.is_solved());
            assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
        }
    }

    #[test]
    fn test_ida_star_with_admissible_heuristic_is_optimal() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let result = solver.ida_star(&state, zero);
        assert_eq!(result.solution_depth, 3);
        assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
    }

    #[test]
    fn test_ida_star_solves_with_blocking_pressure() {
        let game = Game::new(4, 2);
        let state = state_from_str_array(&["BBAA", "AABB", "", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let result = solver.ida_star(&state, blocking_pressure);
        assert!(result.is_solved());
        assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
    }

    #[test]
    fn test_backtracking_finds_shortest_solution() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let plain = solver.backtracking_with_bound(&state, None);
        assert_eq!(plain.solution_depth, 3);
        assert!(game.is_goal_state(&replay(&game, &state, &plain.path)));

        // The zero heuristic never prunes a viable branch, so the
        // optimum is unchanged.
        let pruned = solver.backtracking_with_bound(&state, Some(zero));
        assert_eq!(pruned.solution_depth, 3);
    }

    #[test]
    fn test_backtracking_with_heuristic_on_larger_puzzle() {
        let game = Game::new(4, 2);
        let state = state_from_str_array(&["BBAA", "AABB", "", ""]).unwrap();
        let solver = SearchSolver::new(game);
        let result = solver.backtracking_with_bound(&state, Some(completed_tubes));
        assert!(result.is_solved());
        assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
    }

    #[test]
    fn test_dfs_finds_a_solution_not_necessarily_optimal() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let result = solver.dfs(&state);
        assert!(result.is_solved());
        assert!(result.solution_depth >= 3);
        assert!(game.is_goal_state(&replay(&game, &state, &result.path)));
    }

    #[test]
    fn test_bfs_depth_is_lower_bound_across_strategies() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let bfs_depth = solver.bfs(&state).solution_depth;

        let others = vec![
            solver.dfs(&state),
            solver.a_star(&state, blocking_pressure),
            solver.ida_star(&state, zero),
            solver.backtracking_with_bound(&state, None),
        ];
        for result in others {
            assert!(result.is_solved());
            assert!(result.solution_depth >= bfs_depth);
        }
    }

    #[test]
    fn test_unsolvable_instance_reports_minus_one() {
        // No spare tube and incompatible tops: no move is ever legal.
        let game = Game::with_capacity(2, 2, 2);
        let state = state_from_str_array(&["AB", "BA"]).unwrap();
        let solver = SearchSolver::new(game);

        assert_eq!(solver.bfs(&state).solution_depth, -1);
        assert_eq!(solver.dfs(&state).solution_depth, -1);
        assert_eq!(solver.a_star(&state, zero).solution_depth, -1);
        assert_eq!(solver.ida_star(&state, zero).solution_depth, -1);
        assert_eq!(
            solver.backtracking_with_bound(&state, None).solution_depth,
            -1
        );
    }

    #[test]
    fn test_metrics_are_coherent() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let result = solver.bfs(&state);
        assert!(result.expanded_nodes > 0);
        assert!(result.max_frontier_size >= 1);
        assert_eq!(result.solution_depth, result.path.len() as i32);
    }

    #[test]
    fn test_search_result_serde_round_trip() {
        let (game, state) = crossed_pair();
        let solver = SearchSolver::new(game);
        let result = solver.bfs(&state);
        let json = serde_json::to_string(&result).unwrap();
        let back: SearchResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
