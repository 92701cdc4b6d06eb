//! State-space search over boards.
//!
//! Two engines share the move generator: a breadth-first `Explorer` that
//! streams the whole reachable component, and a bidirectional `solve`
//! that grows frontiers from both ends until they meet.

use std::collections::VecDeque;

use log::{debug, info};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::board::Board;
use crate::error::SearchError;
use crate::moves::{neighbors, Move};
use crate::puzzle::{Mode, Rules};

/// Configuration for a search run
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub rules: Rules,
    /// Deepest search round (per side for the solver, BFS depth for the explorer)
    pub max_depth: Option<usize>,
    /// Most boards held in the seen-sets
    pub max_states: Option<usize>,
}

impl SearchConfig {
    pub fn new(rules: Rules) -> Self {
        Self {
            rules,
            max_depth: None,
            max_states: None,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    pub fn with_max_states(mut self, max_states: usize) -> Self {
        self.max_states = Some(max_states);
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new(Rules::new(Mode::BASIC, Mode::BASIC))
    }
}

/// One board reached by the explorer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Discovery {
    pub board: Board,
    pub path: Vec<Move>,
    pub depth: usize,
    /// Number of cells differing from the start board
    pub distance: usize,
}

/// Breadth-first enumeration of every board reachable from a start board.
///
/// Boards are yielded in order of increasing depth, each exactly once.
pub struct Explorer {
    start: Board,
    config: SearchConfig,
    frontier: VecDeque<(Board, Vec<Move>)>,
    seen: FxHashSet<Board>,
    truncated: bool,
}

impl Explorer {
    pub fn new(start: Board, config: SearchConfig) -> Self {
        let mut seen = FxHashSet::default();
        seen.insert(start.clone());
        let mut frontier = VecDeque::new();
        frontier.push_back((start.clone(), Vec::new()));
        Self {
            start,
            config,
            frontier,
            seen,
            truncated: false,
        }
    }

    /// True if a ceiling cut the enumeration short
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// Boards discovered so far, including ones not yet yielded
    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    fn truncate(&mut self, reason: &str) {
        if !self.truncated {
            debug!("explorer truncated at {} states: {}", self.seen.len(), reason);
            self.truncated = true;
        }
    }
}

impl Iterator for Explorer {
    type Item = Discovery;

    fn next(&mut self) -> Option<Discovery> {
        let (board, path) = self.frontier.pop_front()?;
        let depth = path.len();

        if self.config.max_depth.map_or(false, |max| depth >= max) {
            // Children would sit past the ceiling; report only if any are new.
            if neighbors(&board, &self.config.rules).any(|(_, next)| !self.seen.contains(&next)) {
                self.truncate("depth ceiling");
            }
        } else {
            let rules = self.config.rules;
            for (mv, next) in neighbors(&board, &rules) {
                if self.seen.contains(&next) {
                    continue;
                }
                if self.config.max_states.map_or(false, |max| self.seen.len() >= max) {
                    self.truncate("state ceiling");
                    break;
                }
                let mut next_path = path.clone();
                next_path.push(mv);
                self.seen.insert(next.clone());
                self.frontier.push_back((next, next_path));
            }
        }

        let distance = board.diff(&self.start);
        Some(Discovery {
            board,
            path,
            depth,
            distance,
        })
    }
}

/// A shortest move sequence from start to goal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    pub path: Vec<Move>,
    /// Rounds run before the frontiers met
    pub depth: usize,
    pub forward_explored: usize,
    pub backward_explored: usize,
}

impl Solution {
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }
}

/// One side of the bidirectional search
struct Frontier {
    queue: VecDeque<(Board, usize)>,
    /// Path from this side's root to each seen board, in the order the
    /// moves were generated from the root
    seen: FxHashMap<Board, Vec<Move>>,
}

impl Frontier {
    fn new(root: &Board) -> Self {
        let mut seen = FxHashMap::default();
        seen.insert(root.clone(), Vec::new());
        let mut queue = VecDeque::new();
        queue.push_back((root.clone(), 0));
        Self { queue, seen }
    }

    /// Expand every queued board shallower than `round`.
    ///
    /// Returns this side's path and the other side's path for the first
    /// board found in `other`. Fails before an insertion would push the two
    /// seen-maps together past `max_states`.
    fn expand(
        &mut self,
        round: usize,
        other: &Frontier,
        rules: &Rules,
        max_states: Option<usize>,
    ) -> Result<Option<(Vec<Move>, Vec<Move>)>, SearchError> {
        while self.queue.front().map_or(false, |(_, depth)| *depth < round) {
            let Some((board, depth)) = self.queue.pop_front() else {
                break;
            };
            let Some(path) = self.seen.get(&board).cloned() else {
                continue;
            };
            for (mv, next) in neighbors(&board, rules) {
                if self.seen.contains_key(&next) {
                    continue;
                }
                let mut next_path = path.clone();
                next_path.push(mv);
                if let Some(other_path) = other.seen.get(&next) {
                    return Ok(Some((next_path, other_path.clone())));
                }
                if let Some(max) = max_states {
                    if self.seen.len() + other.seen.len() >= max {
                        return Err(SearchError::LimitExceeded {
                            metric: "states",
                            limit: max,
                        });
                    }
                }
                self.seen.insert(next.clone(), next_path);
                self.queue.push_back((next, depth + 1));
            }
        }
        Ok(None)
    }
}

/// Join a forward path with a goal-outward backward path
fn join(forward: Vec<Move>, backward: Vec<Move>) -> Vec<Move> {
    forward
        .into_iter()
        .chain(backward.into_iter().rev().map(Move::inverse))
        .collect()
}

/// Find a shortest path from `start` to `goal` by meet-in-the-middle search.
///
/// The backward frontier applies moves to the goal directly, so it relies
/// on every move being undone by its inverse.
pub fn solve(start: &Board, goal: &Board, config: &SearchConfig) -> Result<Solution, SearchError> {
    info!(
        "solving {}x{} board under {}",
        start.rows(),
        start.cols(),
        config.rules
    );

    if start == goal {
        info!("start already matches goal");
        return Ok(Solution {
            path: Vec::new(),
            depth: 0,
            forward_explored: 1,
            backward_explored: 1,
        });
    }

    let rules = &config.rules;
    let mut forward = Frontier::new(start);
    let mut backward = Frontier::new(goal);
    let mut round = 0;

    loop {
        round += 1;
        if let Some(max) = config.max_depth {
            if round > max {
                return Err(SearchError::LimitExceeded {
                    metric: "depth",
                    limit: max,
                });
            }
        }
        debug!(
            "round {}: forward frontier {} ({} seen), backward frontier {} ({} seen)",
            round,
            forward.queue.len(),
            forward.seen.len(),
            backward.queue.len(),
            backward.seen.len()
        );

        let max_states = config.max_states;
        let meeting = match forward.expand(round, &backward, rules, max_states)? {
            Some((fwd, bwd)) => Some(join(fwd, bwd)),
            None => backward
                .expand(round, &forward, rules, max_states)?
                .map(|(bwd, fwd)| join(fwd, bwd)),
        };

        if let Some(path) = meeting {
            let solution = Solution {
                path,
                depth: round,
                forward_explored: forward.seen.len(),
                backward_explored: backward.seen.len(),
            };
            info!(
                "found path of length {} at depth {} after exploring {} states",
                solution.len(),
                round,
                solution.forward_explored + solution.backward_explored
            );
            return Ok(solution);
        }

        let explored = forward.seen.len() + backward.seen.len();
        // An exhausted side has enumerated its whole component without
        // touching the other.
        if forward.queue.is_empty() || backward.queue.is_empty() {
            info!("goal unreachable after exploring {} states", explored);
            return Err(SearchError::Unreachable { explored });
        }
    }
}
