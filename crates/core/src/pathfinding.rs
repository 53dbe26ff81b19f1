//! Deterministic shortest-path search over the wall grid.
//! This module exists so enemy chase logic can ask for a tile route without knowing about A*.
//! It does not own path caching or refresh throttling; agents keep their own cached routes.

use std::collections::{BTreeMap, BTreeSet};

use crate::mapgen::Grid;
use crate::mapgen::grid::{manhattan, neighbors};
use crate::types::Pos;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct OpenNode {
    f: u32,
    h: u32,
    y: i32,
    x: i32,
}

/// 4-directional A* with a Manhattan heuristic.
///
/// The returned route excludes `start` and ends on `goal`. Equal f-scores are broken by the
/// lower heuristic, then by row-major coordinate, so identical inputs always yield the same route.
pub fn find_path(start: Pos, goal: Pos, grid: &Grid) -> Option<Vec<Pos>> {
    if !grid.is_walkable(start) || !grid.is_walkable(goal) {
        return None;
    }
    if start == goal {
        return Some(vec![]);
    }

    let mut open_set = BTreeSet::new();
    let mut g_score = BTreeMap::new();
    let mut came_from = BTreeMap::new();
    let h = manhattan(start, goal);
    open_set.insert(OpenNode { f: h, h, y: start.y, x: start.x });
    g_score.insert(start, 0_u32);

    while let Some(curr) = open_set.pop_first() {
        let p = Pos { y: curr.y, x: curr.x };
        if p == goal {
            return Some(reconstruct_path(&came_from, start, goal));
        }
        let cur_g = *g_score.get(&p).expect("open node must have g-score");
        for n in neighbors(p) {
            if !grid.is_walkable(n) {
                continue;
            }
            let tg = cur_g + 1;
            if tg < *g_score.get(&n).unwrap_or(&u32::MAX) {
                came_from.insert(n, p);
                g_score.insert(n, tg);
                let h = manhattan(n, goal);
                open_set.insert(OpenNode { f: tg + h, h, y: n.y, x: n.x });
            }
        }
    }
    None
}

fn reconstruct_path(came: &BTreeMap<Pos, Pos>, start: Pos, goal: Pos) -> Vec<Pos> {
    let mut p = goal;
    let mut result = vec![p];
    while p != start {
        p = *came.get(&p).expect("path must be reconstructible");
        result.push(p);
    }
    result.reverse();
    result.remove(0);
    result
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use proptest::prelude::*;

    use super::*;
    use crate::types::TileKind;

    fn bfs_distance(grid: &Grid, start: Pos, goal: Pos) -> Option<usize> {
        let mut dist = BTreeMap::from([(start, 0_usize)]);
        let mut queue = VecDeque::from([start]);
        while let Some(current) = queue.pop_front() {
            if current == goal {
                return dist.get(&current).copied();
            }
            let d = dist[&current];
            for next in neighbors(current) {
                if grid.is_walkable(next) && !dist.contains_key(&next) {
                    dist.insert(next, d + 1);
                    queue.push_back(next);
                }
            }
        }
        None
    }

    fn assert_contiguous(start: Pos, path: &[Pos]) {
        let mut prev = start;
        for &step in path {
            assert_eq!(manhattan(prev, step), 1, "{prev:?} -> {step:?} is not a unit step");
            prev = step;
        }
    }

    #[test]
    fn start_equal_to_goal_is_an_empty_route() {
        let grid = Grid::from_ascii(&["###", "#.#", "###"]);
        let p = Pos { y: 1, x: 1 };
        assert_eq!(find_path(p, p, &grid), Some(vec![]));
    }

    #[test]
    fn route_excludes_start_and_ends_on_goal() {
        let grid = Grid::from_ascii(&["#####", "#...#", "#####"]);
        let path = find_path(Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 }, &grid).expect("open corridor");
        assert_eq!(path, vec![Pos { y: 1, x: 2 }, Pos { y: 1, x: 3 }]);
    }

    #[test]
    fn detour_around_wall_matches_known_optimum() {
        let grid = Grid::from_ascii(&[
            "#######",
            "#.....#",
            "#.###.#",
            "#.#.#.#",
            "#.#...#",
            "#######",
        ]);
        let start = Pos { y: 3, x: 1 };
        let goal = Pos { y: 3, x: 3 };
        let path = find_path(start, goal, &grid).expect("goal reachable via the right column");
        assert_eq!(path.len(), 12);
        assert_eq!(path.last(), Some(&goal));
        assert_contiguous(start, &path);
    }

    #[test]
    fn sealed_goal_has_no_route() {
        let grid = Grid::from_ascii(&["#####", "#.#.#", "#####"]);
        assert_eq!(find_path(Pos { y: 1, x: 1 }, Pos { y: 1, x: 3 }, &grid), None);
    }

    #[test]
    fn wall_or_off_grid_endpoints_are_rejected() {
        let grid = Grid::from_ascii(&["####", "#..#", "####"]);
        assert_eq!(find_path(Pos { y: 0, x: 0 }, Pos { y: 1, x: 1 }, &grid), None);
        assert_eq!(find_path(Pos { y: 1, x: 1 }, Pos { y: 9, x: 9 }, &grid), None);
    }

    #[test]
    fn identical_queries_return_identical_routes() {
        let grid = Grid::filled(8, 8, TileKind::Floor);
        let a = find_path(Pos { y: 0, x: 0 }, Pos { y: 7, x: 7 }, &grid);
        let b = find_path(Pos { y: 0, x: 0 }, Pos { y: 7, x: 7 }, &grid);
        assert_eq!(a, b);
    }

    fn grid_strategy() -> impl Strategy<Value = Grid> {
        proptest::collection::vec(proptest::bool::weighted(0.7), 64).prop_map(|cells| {
            let mut grid = Grid::filled(8, 8, TileKind::Wall);
            for (i, open) in cells.into_iter().enumerate() {
                if open {
                    grid.set_tile(Pos { y: (i / 8) as i32, x: (i % 8) as i32 }, TileKind::Floor);
                }
            }
            grid
        })
    }

    proptest! {
        #[test]
        fn route_length_matches_breadth_first_optimum(
            grid in grid_strategy(),
            start_idx in 0_usize..64,
            goal_idx in 0_usize..64,
        ) {
            let start = Pos { y: (start_idx / 8) as i32, x: (start_idx % 8) as i32 };
            let goal = Pos { y: (goal_idx / 8) as i32, x: (goal_idx % 8) as i32 };
            prop_assume!(grid.is_walkable(start) && grid.is_walkable(goal));

            let expected = bfs_distance(&grid, start, goal);
            let path = find_path(start, goal, &grid);
            prop_assert_eq!(path.as_ref().map(Vec::len), expected);
        }

        #[test]
        fn routes_never_touch_walls(
            grid in grid_strategy(),
            start_idx in 0_usize..64,
            goal_idx in 0_usize..64,
        ) {
            let start = Pos { y: (start_idx / 8) as i32, x: (start_idx % 8) as i32 };
            let goal = Pos { y: (goal_idx / 8) as i32, x: (goal_idx % 8) as i32 };
            if let Some(path) = find_path(start, goal, &grid) {
                prop_assert!(path.iter().all(|&p| grid.tile_at(p) == Some(TileKind::Floor)));
                assert_contiguous(start, &path);
            }
        }
    }
}
