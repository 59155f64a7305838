use super::data::*;
use super::discovery::*;
use crate::map::*;
use crate::turn::*;
use log::*;
use std::collections::{BTreeMap, HashSet};

/// Owns every cluster for the whole game. Cluster identity survives turn boundaries; clusters
/// leave the registry only once exhausted.
#[derive(Default)]
pub struct ClusterRegistry {
    labels: Option<CellLabels>,
    clusters: BTreeMap<ClusterId, Cluster>,
    cell_owner: BTreeMap<Position, ClusterId>,
}

impl ClusterRegistry {
    pub fn is_discovered(&self) -> bool {
        self.labels.is_some()
    }

    /// Labels the grid's resource components. Only the first call has any effect.
    pub fn discover(&mut self, grid: &GridSnapshot, options: DiscoveryOptions) {
        if self.is_discovered() {
            return;
        }

        let Discovery { labels, clusters } = discover_clusters(grid, options);

        for cluster in clusters {
            for pos in cluster.cells() {
                self.cell_owner.insert(*pos, cluster.id());
            }

            self.clusters.insert(cluster.id(), cluster);
        }

        self.labels = Some(labels);
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: ClusterId) -> Option<&Cluster> {
        self.clusters.get(&id)
    }

    pub fn get_mut(&mut self, id: ClusterId) -> Option<&mut Cluster> {
        self.clusters.get_mut(&id)
    }

    /// Clusters ordered by id.
    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.values()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Cluster> {
        self.clusters.values_mut()
    }

    pub fn ids(&self) -> Vec<ClusterId> {
        self.clusters.keys().copied().collect()
    }

    /// Cluster still holding resource at `pos`.
    pub fn cluster_id_at(&self, pos: Position) -> Option<ClusterId> {
        let id = self.cell_owner.get(&pos)?;

        self.clusters
            .get(id)
            .filter(|cluster| cluster.cells().contains(&pos))
            .map(|cluster| cluster.id())
    }

    pub fn cluster_of_unit(&self, unit: &UnitId) -> Option<ClusterId> {
        self.clusters.values().find(|cluster| cluster.has_unit(unit)).map(|cluster| cluster.id())
    }

    /// Live units that belong to no cluster, ordered by id.
    pub fn units_without_cluster<'a>(&self, context: &'a TurnContext) -> Vec<&'a UnitData> {
        let owned: HashSet<&UnitId> = self.clusters.values().flat_map(|cluster| cluster.assigned_units()).collect();

        context.units().filter(|unit| !owned.contains(&unit.id)).collect()
    }

    /// Refreshes every cluster and removes the ones that ran out of resource. Returns the ids
    /// removed this turn.
    pub fn update(&mut self, context: &TurnContext) -> Vec<ClusterId> {
        for cluster in self.clusters.values_mut() {
            cluster.update(context);
        }

        let exhausted: Vec<ClusterId> = self
            .clusters
            .values()
            .filter(|cluster| cluster.is_exhausted())
            .map(|cluster| cluster.id())
            .collect();

        for id in exhausted.iter() {
            self.remove(*id);
        }

        exhausted
    }

    /// Tears the cluster down and drops it from the registry.
    pub fn remove(&mut self, id: ClusterId) -> Option<Cluster> {
        let mut cluster = self.clusters.remove(&id)?;

        let released = cluster.teardown();

        info!("Removing cluster {} - Released units: {}", id, released.len());

        self.cell_owner.retain(|_, owner| *owner != id);

        Some(cluster)
    }

    /// Every live resource position owned by more than one cluster. Always empty unless the
    /// registry was corrupted.
    pub fn overlapping_cells(&self) -> Vec<Position> {
        let mut seen = HashSet::new();

        self.clusters
            .values()
            .flat_map(|cluster| cluster.cells().iter().copied())
            .filter(|pos| !seen.insert(*pos))
            .collect()
    }
}
