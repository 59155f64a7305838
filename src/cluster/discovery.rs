use super::data::*;
use super::unionfind::*;
use crate::map::*;
use log::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryOptions {
    pub connectivity: Connectivity,
}

/// Connectivity labels for every cell of the grid, as unioned during discovery.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CellLabels {
    grid: GridIndex,
    sets: UnionFind,
}

impl CellLabels {
    fn new(grid: GridIndex) -> CellLabels {
        CellLabels {
            grid,
            sets: UnionFind::new(grid.len()),
        }
    }

    pub fn find(&mut self, pos: Position) -> usize {
        self.sets.find(self.grid.index_of(pos))
    }

    pub fn same_cluster(&mut self, a: Position, b: Position) -> bool {
        self.find(a) == self.find(b)
    }

    fn union(&mut self, a: Position, b: Position) -> usize {
        let index_a = self.grid.index_of(a);
        let index_b = self.grid.index_of(b);

        self.sets.union(index_a, index_b)
    }
}

pub struct Discovery {
    pub labels: CellLabels,
    pub clusters: Vec<Cluster>,
}

/// Labels the connected resource components of the grid. Seeds are taken in row-major order
/// and each component is walked with an explicit stack.
pub fn discover_clusters(grid: &GridSnapshot, options: DiscoveryOptions) -> Discovery {
    let index = *grid.grid();
    let mut labels = CellLabels::new(index);
    let mut visited = vec![false; index.len()];
    let mut clusters = Vec::new();

    for seed in index.positions() {
        let seed_kind = match grid.cell(seed).resource() {
            Some(kind) if !visited[index.index_of(seed)] => kind,
            _ => continue,
        };

        visited[index.index_of(seed)] = true;

        let mut cells = BTreeSet::new();
        let mut stack = vec![seed];

        while let Some(pos) = stack.pop() {
            cells.insert(pos);

            labels.union(seed, pos);

            for neighbour in index.neighbours(pos, options.connectivity) {
                let neighbour_index = index.index_of(neighbour);

                if visited[neighbour_index] {
                    continue;
                }

                if grid.cell(neighbour).resource() == Some(seed_kind) {
                    visited[neighbour_index] = true;
                    stack.push(neighbour);
                }
            }
        }

        let id = ClusterId(labels.find(seed));

        debug!("Discovered {} cluster {} with {} cells", seed_kind, id, cells.len());

        clusters.push(Cluster::new(id, seed_kind, cells, grid));
    }

    info!("Discovered {} clusters on {}x{} grid", clusters.len(), grid.width(), grid.height());

    Discovery { labels, clusters }
}
