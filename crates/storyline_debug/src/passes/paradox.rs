//! Dependency cycles and temporal paradoxes.
//!
//! Two acts depend on each other when they touch a common entity. The
//! relation has no direction, so a single shared entity is an edge, not a
//! cycle. A cycle needs three or more acts chained through shared entities
//! back to where it started.

use std::collections::BTreeSet;

use storyline_engine::Act;
use storyline_foundation::{ActId, EntityId, Result};

use super::{PassContext, ValidationPass};
use crate::issue::{IssueType, Severity, ValidationIssue};

/// Reports dependency cycles, then temporal paradoxes between neighbouring
/// acts.
#[derive(Clone, Copy, Debug, Default)]
pub struct ParadoxPass;

impl ValidationPass for ParadoxPass {
    fn name(&self) -> &str {
        "paradox"
    }

    fn run(&self, ctx: &PassContext<'_>) -> Result<Vec<ValidationIssue>> {
        let timeline = ctx.timeline();
        let mut issues: Vec<_> = find_dependency_cycles(&timeline)
            .into_iter()
            .map(|cycle| cycle_issue(&timeline, &cycle))
            .collect();

        issues.extend(
            timeline
                .windows(2)
                .filter(|pair| shares_entities(pair[0], pair[1]))
                .filter_map(|pair| temporal_paradox_between(pair[0], pair[1])),
        );
        Ok(issues)
    }
}

/// Decides whether two neighbouring acts that touch a common entity
/// contradict each other in time.
///
/// No paradox rule is implemented yet, so this always returns `None`.
#[must_use]
pub fn temporal_paradox_between(_earlier: &Act, _later: &Act) -> Option<ValidationIssue> {
    None
}

fn shares_entities(a: &Act, b: &Act) -> bool {
    !a.affected_entities().is_disjoint(&b.affected_entities())
}

// =============================================================================
// Cycle Detection
// =============================================================================

struct CycleSearch {
    adjacency: Vec<Vec<usize>>,
    visited: Vec<bool>,
    on_stack: Vec<bool>,
    depth: Vec<usize>,
    stack: Vec<usize>,
    seen: BTreeSet<Vec<usize>>,
    cycles: Vec<Vec<usize>>,
}

impl CycleSearch {
    fn visit(&mut self, node: usize, parent: Option<usize>) {
        self.visited[node] = true;
        self.on_stack[node] = true;
        self.depth[node] = self.stack.len();
        self.stack.push(node);

        // Deepest ancestor reachable through a back edge.
        let mut closest: Option<usize> = None;
        for i in 0..self.adjacency[node].len() {
            let next = self.adjacency[node][i];
            if Some(next) == parent {
                continue;
            }
            if self.on_stack[next] {
                let depth = self.depth[next];
                closest = Some(closest.map_or(depth, |c| c.max(depth)));
            } else if !self.visited[next] {
                self.visit(next, Some(node));
            }
        }
        if let Some(from) = closest {
            self.close_cycle(from);
        }

        self.stack.pop();
        self.on_stack[node] = false;
    }

    fn close_cycle(&mut self, from: usize) {
        let mut members = self.stack[from..].to_vec();
        members.sort_unstable();
        if self.seen.insert(members.clone()) {
            self.cycles.push(members);
        }
    }
}

/// Finds the dependency cycles in `timeline`.
///
/// Each act closes at most one cycle: the shortest one through its deepest
/// back edge in the search tree. The result therefore grows linearly with
/// the timeline, even when one entity ties every act to every other.
///
/// Each cycle is returned as indices into `timeline`, sorted ascending.
/// Cycles with the same members are reported once.
#[must_use]
pub fn find_dependency_cycles(timeline: &[&Act]) -> Vec<Vec<usize>> {
    let entities: Vec<BTreeSet<EntityId>> =
        timeline.iter().map(|act| act.affected_entities()).collect();
    let adjacency = (0..timeline.len())
        .map(|i| {
            (0..timeline.len())
                .filter(|&j| j != i && !entities[i].is_disjoint(&entities[j]))
                .collect()
        })
        .collect();

    let mut search = CycleSearch {
        adjacency,
        visited: vec![false; timeline.len()],
        on_stack: vec![false; timeline.len()],
        depth: vec![0; timeline.len()],
        stack: Vec::new(),
        seen: BTreeSet::new(),
        cycles: Vec::new(),
    };
    for node in 0..timeline.len() {
        if !search.visited[node] {
            search.visit(node, None);
        }
    }
    search.cycles
}

fn cycle_issue(timeline: &[&Act], cycle: &[usize]) -> ValidationIssue {
    let acts: Vec<ActId> = cycle.iter().map(|&i| timeline[i].id().clone()).collect();
    let entities: BTreeSet<EntityId> = cycle
        .iter()
        .flat_map(|&i| timeline[i].affected_entities())
        .collect();
    let names: Vec<_> = acts.iter().map(ActId::as_str).collect();

    let issue = ValidationIssue::new(
        IssueType::CircularDependency,
        Severity::Error,
        format!("acts {} depend on each other in a cycle", names.join(" -> ")),
        acts,
    )
    .with_entities(entities);
    match cycle.first() {
        Some(&first) => issue.at(timeline[first].timestamp()),
        None => issue,
    }
}
