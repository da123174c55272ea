use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{NavPath, Navigator, Vec3};

/// Step costs in tenths of a cell, so open-set keys stay integral and totally ordered.
const STRAIGHT: u32 = 10;
const DIAGONAL: u32 = 14;

/// Neighbour offsets `(dx, dz, cost)` in expansion order. Straight steps come first.
const STEPS: [(i32, i32, u32); 8] = [
    (0, -1, STRAIGHT),
    (1, 0, STRAIGHT),
    (0, 1, STRAIGHT),
    (-1, 0, STRAIGHT),
    (1, -1, DIAGONAL),
    (1, 1, DIAGONAL),
    (-1, 1, DIAGONAL),
    (-1, -1, DIAGONAL),
];

const NO_REGION: u32 = u32::MAX;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    #[error("grid must be at least one cell wide and deep (got {width}x{depth})")]
    Empty { width: u32, depth: u32 },

    #[error("cell size must be finite and > 0 (got {0})")]
    InvalidCellSize(f32),
}

/// Walkability grid over the XZ plane, anchored at the origin.
///
/// Cell `(x, z)` covers `[x, x + 1) × [z, z + 1)` in units of `cell_size`. Agents move in eight
/// directions but never cut the corner of a blocked cell. Every walkable cell carries a region
/// label; two points are mutually reachable iff they share one, which makes
/// [`can_reach`](Navigator::can_reach) a lookup instead of a search.
#[derive(Debug, Clone)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "GridLayout", into = "GridLayout")
)]
pub struct NavGrid {
    width: i32,
    depth: i32,
    cell_size: f32,
    blocked: Vec<bool>,
    regions: Vec<u32>,
}

/// Serialized form: dimensions plus the blocked cells. Regions are rebuilt on load.
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct GridLayout {
    width: u32,
    depth: u32,
    cell_size: f32,
    #[serde(default)]
    blocked: Vec<[i32; 2]>,
}

#[cfg(feature = "serde")]
impl TryFrom<GridLayout> for NavGrid {
    type Error = GridError;

    fn try_from(layout: GridLayout) -> Result<Self, GridError> {
        Ok(NavGrid::new(layout.width, layout.depth, layout.cell_size)?.with_blocked(layout.blocked))
    }
}

#[cfg(feature = "serde")]
impl From<NavGrid> for GridLayout {
    fn from(grid: NavGrid) -> Self {
        let blocked = (0..grid.blocked.len())
            .filter(|&idx| grid.blocked[idx])
            .map(|idx| {
                let (x, z) = grid.coords(idx);
                [x, z]
            })
            .collect();
        Self {
            width: grid.width as u32,
            depth: grid.depth as u32,
            cell_size: grid.cell_size,
            blocked,
        }
    }
}

impl NavGrid {
    /// An all-walkable grid of `width × depth` cells.
    pub fn new(width: u32, depth: u32, cell_size: f32) -> Result<Self, GridError> {
        if width == 0 || depth == 0 || width > i32::MAX as u32 || depth > i32::MAX as u32 {
            return Err(GridError::Empty { width, depth });
        }
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(GridError::InvalidCellSize(cell_size));
        }
        let len = width as usize * depth as usize;
        Ok(Self {
            width: width as i32,
            depth: depth as i32,
            cell_size,
            blocked: vec![false; len],
            // One open field: every cell in region 0.
            regions: vec![0; len],
        })
    }

    /// Blocks every listed `[x, z]` cell, relabelling regions once. Out-of-range cells are ignored.
    pub fn with_blocked(mut self, cells: impl IntoIterator<Item = [i32; 2]>) -> Self {
        for [x, z] in cells {
            if let Some(idx) = self.index(x, z) {
                self.blocked[idx] = true;
            }
        }
        self.relabel();
        self
    }

    pub fn set_blocked(&mut self, x: i32, z: i32, blocked: bool) {
        let Some(idx) = self.index(x, z) else {
            return;
        };
        if self.blocked[idx] != blocked {
            self.blocked[idx] = blocked;
            self.relabel();
        }
    }

    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Out-of-range cells count as blocked.
    pub fn is_blocked(&self, x: i32, z: i32) -> bool {
        self.index(x, z).is_none_or(|idx| self.blocked[idx])
    }

    /// `true` if `p` lies inside the grid on a walkable cell.
    pub fn is_walkable(&self, p: Vec3) -> bool {
        self.cell_at(p).is_some_and(|idx| !self.blocked[idx])
    }

    /// Closest walkable point to `near` no farther than `max_distance`.
    ///
    /// `near` itself when it is walkable, otherwise the nearest walkable cell center. Only the
    /// cells overlapping the search square are scanned, row by row, so ties resolve the same way
    /// on every run.
    pub fn sample_near(&self, near: Vec3, max_distance: f32) -> Option<Vec3> {
        if self.is_walkable(near) {
            return Some(near);
        }
        let reach = max_distance.max(0.0);
        let span = |lo: f32, hi: f32, cells: i32| {
            let first = ((lo / self.cell_size).floor() as i32).max(0);
            let last = ((hi / self.cell_size).floor() as i32).min(cells - 1);
            first..=last
        };
        let xs = span(near.x - reach, near.x + reach, self.width);

        let mut best: Option<(f32, Vec3)> = None;
        for z in span(near.z - reach, near.z + reach, self.depth) {
            for x in xs.clone() {
                let Some(idx) = self.open_cell(x, z) else {
                    continue;
                };
                let center = self.center_of(idx, near.y);
                let d = center.distance(near);
                if d <= reach && best.is_none_or(|(best_d, _)| d < best_d) {
                    best = Some((d, center));
                }
            }
        }
        best.map(|(_, p)| p)
    }

    fn region_at(&self, p: Vec3) -> Option<u32> {
        self.cell_at(p)
            .map(|idx| self.regions[idx])
            .filter(|&region| region != NO_REGION)
    }

    fn index(&self, x: i32, z: i32) -> Option<usize> {
        if x < 0 || z < 0 || x >= self.width || z >= self.depth {
            return None;
        }
        Some(z as usize * self.width as usize + x as usize)
    }

    fn open_cell(&self, x: i32, z: i32) -> Option<usize> {
        self.index(x, z).filter(|&idx| !self.blocked[idx])
    }

    fn coords(&self, idx: usize) -> (i32, i32) {
        let width = self.width as usize;
        ((idx % width) as i32, (idx / width) as i32)
    }

    fn cell_at(&self, p: Vec3) -> Option<usize> {
        if !(p.x.is_finite() && p.z.is_finite()) {
            return None;
        }
        let x = (p.x / self.cell_size).floor() as i32;
        let z = (p.z / self.cell_size).floor() as i32;
        self.index(x, z)
    }

    fn center_of(&self, idx: usize, y: f32) -> Vec3 {
        let (x, z) = self.coords(idx);
        Vec3::new(
            (x as f32 + 0.5) * self.cell_size,
            y,
            (z as f32 + 0.5) * self.cell_size,
        )
    }

    /// Walkable neighbours of a walkable cell and the cost of stepping there.
    fn neighbours(&self, idx: usize) -> impl Iterator<Item = (usize, u32)> + '_ {
        let (x, z) = self.coords(idx);
        STEPS.iter().filter_map(move |&(dx, dz, cost)| {
            let next = self.open_cell(x + dx, z + dz)?;
            if dx != 0 && dz != 0 {
                // No squeezing diagonally past a blocked corner.
                self.open_cell(x + dx, z)?;
                self.open_cell(x, z + dz)?;
            }
            Some((next, cost))
        })
    }

    /// Octile distance, exact for this move set on an open grid.
    fn estimate(&self, from: usize, to: usize) -> u32 {
        let (ax, az) = self.coords(from);
        let (bx, bz) = self.coords(to);
        let dx = ax.abs_diff(bx);
        let dz = az.abs_diff(bz);
        STRAIGHT * dx.max(dz) + (DIAGONAL - STRAIGHT) * dx.min(dz)
    }

    /// Flood-fills connected walkable cells with region labels.
    fn relabel(&mut self) {
        let mut regions = vec![NO_REGION; self.blocked.len()];
        let mut queue = VecDeque::new();
        let mut next = 0;

        for seed in 0..self.blocked.len() {
            if self.blocked[seed] || regions[seed] != NO_REGION {
                continue;
            }
            regions[seed] = next;
            queue.push_back(seed);
            while let Some(idx) = queue.pop_front() {
                for (n, _) in self.neighbours(idx) {
                    if regions[n] == NO_REGION {
                        regions[n] = next;
                        queue.push_back(n);
                    }
                }
            }
            next += 1;
        }
        self.regions = regions;
    }

    /// A* over cell indices. Both ends must be walkable and share a region.
    fn search(&self, start: usize, goal: usize) -> Option<Vec<usize>> {
        let mut cost = vec![u32::MAX; self.blocked.len()];
        let mut came_from: Vec<Option<usize>> = vec![None; self.blocked.len()];
        // Sequence numbers break f/g ties in push order.
        let mut open = BinaryHeap::new();
        let mut seq: u64 = 0;

        cost[start] = 0;
        open.push(Reverse((self.estimate(start, goal), 0u32, seq, start)));

        while let Some(Reverse((_, g, _, idx))) = open.pop() {
            if idx == goal {
                let mut cells = vec![goal];
                let mut at = goal;
                while let Some(prev) = came_from[at] {
                    cells.push(prev);
                    at = prev;
                }
                cells.reverse();
                return Some(cells);
            }
            if g > cost[idx] {
                continue;
            }
            for (next, step) in self.neighbours(idx) {
                let tentative = g.saturating_add(step);
                if tentative >= cost[next] {
                    continue;
                }
                cost[next] = tentative;
                came_from[next] = Some(idx);
                seq += 1;
                open.push(Reverse((
                    tentative.saturating_add(self.estimate(next, goal)),
                    tentative,
                    seq,
                    next,
                )));
            }
        }
        None
    }

    /// Exact endpoints plus the centers of cells where the path turns.
    fn waypoints(&self, cells: &[usize], start: Vec3, goal: Vec3) -> NavPath {
        let mut points = vec![start];
        for w in cells.windows(3) {
            let (ax, az) = self.coords(w[0]);
            let (bx, bz) = self.coords(w[1]);
            let (cx, cz) = self.coords(w[2]);
            if (bx - ax, bz - az) != (cx - bx, cz - bz) {
                points.push(self.center_of(w[1], start.y));
            }
        }
        points.push(goal);
        NavPath::new(points)
    }
}

impl Navigator for NavGrid {
    fn find_path(&self, start: Vec3, goal: Vec3) -> Option<NavPath> {
        let from = self.cell_at(start)?;
        let to = self.cell_at(goal)?;
        if self.blocked[from] || self.regions[from] != self.regions[to] {
            return None;
        }
        let cells = self.search(from, to)?;
        Some(self.waypoints(&cells, start, goal))
    }

    fn nearest_point(&self, point: Vec3) -> Option<Vec3> {
        self.sample_near(point, f32::INFINITY)
    }

    fn can_reach(&self, start: Vec3, goal: Vec3) -> bool {
        match (self.region_at(start), self.region_at(goal)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        }
    }
}
