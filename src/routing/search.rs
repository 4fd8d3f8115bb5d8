//! Direction-aware A* over the visibility graph.
//!
//! A state is a node together with the direction the path arrived in, because
//! the turn count of a continuation depends on it. States are ordered by
//! (cost + heuristic, turns); equal keys fall back to creation order.
//!
//! Every finalized state commits the segment from its parent into a working
//! copy of the obstacle index, so later candidates that would cross the
//! emerging path tree are rejected.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use tracing::{debug, trace};

use crate::error::{Result, RouteError};
use crate::geometry::{Direction, Point, Segment};

use super::graph::{NodeId, VisibilityGraph};
use super::spatial::SegmentIndex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StateKey {
    pub node: NodeId,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchState {
    pub key: StateKey,
    pub cost: u64,
    pub heuristic: u64,
    pub total: u64,
    /// Arena slot of the state this one was reached from.
    pub parent: Option<usize>,
    pub visited: bool,
    pub turns: u32,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct OpenEntry {
    total: u64,
    turns: u32,
    cost: u64,
    slot: usize,
}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed for a min-heap.
        other
            .total
            .cmp(&self.total)
            .then_with(|| other.turns.cmp(&self.turns))
            .then_with(|| other.slot.cmp(&self.slot))
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    /// Node points from entry to exit, inclusive.
    pub points: Vec<Point>,
    pub cost: u64,
    pub turns: u32,
    /// Number of states finalized before the exit was reached.
    pub expanded: usize,
}

fn distance(graph: &VisibilityGraph, a: NodeId, b: NodeId) -> u64 {
    graph.node(a).point.id().manhattan(graph.node(b).point.id())
}

/// States for one search invocation, addressed by arena slot.
#[derive(Debug, Default)]
struct StateArena {
    states: Vec<SearchState>,
    slots: HashMap<StateKey, usize>,
}

impl StateArena {
    fn slot(&self, key: &StateKey) -> Option<usize> {
        self.slots.get(key).copied()
    }

    /// Stores `state` in its key's slot, creating the slot on first sight.
    fn record(&mut self, state: SearchState) -> usize {
        match self.slots.get(&state.key) {
            Some(&slot) => {
                self.states[slot] = state;
                slot
            }
            None => {
                let slot = self.states.len();
                self.slots.insert(state.key, slot);
                self.states.push(state);
                slot
            }
        }
    }

    /// Best recorded state at `node` under any arrival direction.
    fn best_at(&self, node: NodeId) -> Option<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, state)| state.key.node == node)
            .min_by(|(_, a), (_, b)| a.total.cmp(&b.total).then(a.turns.cmp(&b.turns)))
            .map(|(slot, _)| slot)
    }

    fn walk_back(&self, graph: &VisibilityGraph, mut slot: usize) -> Vec<Point> {
        let mut points = Vec::new();
        loop {
            let state = &self.states[slot];
            points.push(graph.node(state.key.node).point);
            match state.parent {
                Some(parent) => slot = parent,
                None => break,
            }
        }
        points.reverse();
        points
    }
}

/// Finds the cheapest path from `start` to `goal`, ranking equal-length
/// paths by their number of turns.
///
/// `obstacles` is cloned into a private working index; the caller's index is
/// never modified.
pub fn find_path(
    graph: &VisibilityGraph,
    start: NodeId,
    goal: NodeId,
    obstacles: &SegmentIndex,
    entry_direction: Direction,
) -> Result<SearchOutcome> {
    let mut index = obstacles.clone();
    let mut arena = StateArena::default();
    let mut open = BinaryHeap::new();

    let heuristic = distance(graph, start, goal);
    let slot = arena.record(SearchState {
        key: StateKey {
            node: start,
            direction: entry_direction,
        },
        cost: 0,
        heuristic,
        total: heuristic,
        parent: None,
        visited: false,
        turns: 0,
    });
    open.push(OpenEntry {
        total: heuristic,
        turns: 0,
        cost: 0,
        slot,
    });

    let mut expanded = 0usize;
    while let Some(entry) = open.pop() {
        let current = arena.states[entry.slot];
        if current.visited || current.cost != entry.cost || current.turns != entry.turns {
            continue;
        }

        if current.key.node == goal {
            let best = arena.best_at(goal).unwrap_or(entry.slot);
            let state = arena.states[best];
            debug!(
                expanded,
                cost = state.cost,
                turns = state.turns,
                states = arena.states.len(),
                "search reached exit"
            );
            return Ok(SearchOutcome {
                points: arena.walk_back(graph, best),
                cost: state.cost,
                turns: state.turns,
                expanded,
            });
        }

        let from = graph.node(current.key.node);
        for &neighbor in &from.neighbors {
            let to = graph.node(neighbor);
            let Some(direction) = Direction::between(from.point, to.point) else {
                continue;
            };
            let key = StateKey {
                node: neighbor,
                direction,
            };
            let existing = arena.slot(&key).map(|slot| arena.states[slot]);
            if existing.is_some_and(|state| state.visited) {
                continue;
            }
            if !index.is_clear(&Segment::new(from.point, to.point)) {
                continue;
            }

            let cost = current
                .cost
                .saturating_add(distance(graph, current.key.node, neighbor));
            let turns = current.turns + u32::from(current.key.direction != direction);
            let improves = match existing {
                None => true,
                Some(state) => cost < state.cost || (cost == state.cost && turns < state.turns),
            };
            if !improves {
                continue;
            }

            let heuristic = distance(graph, neighbor, goal);
            let total = cost.saturating_add(heuristic);
            let slot = arena.record(SearchState {
                key,
                cost,
                heuristic,
                total,
                parent: Some(entry.slot),
                visited: false,
                turns,
            });
            open.push(OpenEntry {
                total,
                turns,
                cost,
                slot,
            });
        }

        arena.states[entry.slot].visited = true;
        expanded += 1;
        if let Some(parent) = current.parent {
            let parent_point = graph.node(arena.states[parent].key.node).point;
            index.insert(Segment::new(parent_point, from.point));
            trace!(
                from = ?parent_point,
                to = ?from.point,
                "committed path segment"
            );
        }
    }

    debug!(expanded, states = arena.states.len(), "open set exhausted");
    Err(RouteError::NoPathFound)
}
