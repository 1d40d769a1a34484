//! Grid pathfinding recorders: Dijkstra and A*.
//!
//! Both share one uniform-cost search core; A* is the same search with a
//! Manhattan-distance heuristic added to the priority. The frontier is a
//! binary heap with lazy decrease-key: a strictly shorter tentative distance
//! re-pushes the cell, and stale entries are skipped when popped.
//!
//! After the search, predecessor back-pointers are walked from the end cell
//! to the start cell to produce the shortest-path list replayed as the second
//! animation phase. An unreachable end is not an error: the trace simply has
//! an empty path.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use algoscope_dataset::{Grid, GridPos};

use crate::event::{NodeRef, StepEvent, Trace};

/// Uniform-cost relaxation; settles the frontier cell with minimum tentative
/// distance first.
pub fn dijkstra(grid: &Grid) -> Trace {
    search(grid, |_| 0)
}

/// Best-first search with priority `g + h`, `h` = Manhattan distance to the
/// end cell.
pub fn a_star(grid: &Grid) -> Trace {
    let end = grid.end();
    search(grid, move |pos: GridPos| pos.manhattan(&end))
}

fn search(grid: &Grid, heuristic: impl Fn(GridPos) -> usize) -> Trace {
    if grid.cell_count() == 0 {
        return Trace::default();
    }

    let start = grid.start();
    let end = grid.end();
    let n = grid.cell_count();

    let mut dist = vec![usize::MAX; n];
    let mut prev: Vec<Option<GridPos>> = vec![None; n];
    let mut settled = vec![false; n];
    let mut events = Vec::new();

    // Priority, then row/col for a deterministic tie-break.
    let mut frontier: BinaryHeap<Reverse<(usize, usize, usize)>> = BinaryHeap::new();

    dist[grid.index(start)] = 0;
    frontier.push(Reverse((heuristic(start), start.row, start.col)));
    events.push(StepEvent::Enqueue {
        node: NodeRef::Cell(start),
    });

    let mut reached = false;
    while let Some(Reverse((_, row, col))) = frontier.pop() {
        let pos = GridPos::new(row, col);
        let idx = grid.index(pos);
        if settled[idx] {
            // Stale heap entry from a later relaxation.
            continue;
        }
        settled[idx] = true;
        events.push(StepEvent::Visit {
            node: NodeRef::Cell(pos),
        });
        if pos == end {
            reached = true;
            break;
        }

        for next in grid.neighbors(pos) {
            if grid.is_wall(next) {
                continue;
            }
            let next_idx = grid.index(next);
            if settled[next_idx] {
                continue;
            }
            let g = dist[idx] + 1;
            if g < dist[next_idx] {
                dist[next_idx] = g;
                prev[next_idx] = Some(pos);
                frontier.push(Reverse((g + heuristic(next), next.row, next.col)));
                events.push(StepEvent::Enqueue {
                    node: NodeRef::Cell(next),
                });
            }
        }
    }

    let mut path = Vec::new();
    if reached {
        let mut cursor = Some(end);
        while let Some(pos) = cursor {
            path.push(NodeRef::Cell(pos));
            if pos == start {
                break;
            }
            cursor = prev[grid.index(pos)];
        }
        path.reverse();
    }

    Trace { events, path }
}
