use crate::findnearest::*;
use crate::map::*;
use crate::missions::data::*;
use crate::turn::*;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Display;

/// Representative cell index of the cluster at discovery time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClusterId(pub usize);

impl Display for ClusterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A connected component of same-kind resource cells, the units working it and their missions.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Cluster {
    id: ClusterId,
    resource_kind: ResourceKind,
    footprint: BTreeSet<Position>,
    cells: BTreeSet<Position>,
    perimeter: BTreeSet<Position>,
    exposed_perimeter: BTreeSet<Position>,
    assigned_units: BTreeSet<UnitId>,
    missions: BTreeMap<UnitId, Mission>,
}

impl Cluster {
    pub fn new(id: ClusterId, resource_kind: ResourceKind, cells: BTreeSet<Position>, grid: &GridSnapshot) -> Cluster {
        let mut cluster = Cluster {
            id,
            resource_kind,
            footprint: cells.clone(),
            cells,
            perimeter: BTreeSet::new(),
            exposed_perimeter: BTreeSet::new(),
            assigned_units: BTreeSet::new(),
            missions: BTreeMap::new(),
        };

        cluster.update_perimeter(grid);

        cluster
    }

    pub fn id(&self) -> ClusterId {
        self.id
    }

    pub fn resource_kind(&self) -> ResourceKind {
        self.resource_kind
    }

    pub fn footprint(&self) -> &BTreeSet<Position> {
        &self.footprint
    }

    pub fn cells(&self) -> &BTreeSet<Position> {
        &self.cells
    }

    pub fn perimeter(&self) -> &BTreeSet<Position> {
        &self.perimeter
    }

    pub fn exposed_perimeter(&self) -> &BTreeSet<Position> {
        &self.exposed_perimeter
    }

    pub fn assigned_units(&self) -> &BTreeSet<UnitId> {
        &self.assigned_units
    }

    pub fn missions(&self) -> &BTreeMap<UnitId, Mission> {
        &self.missions
    }

    pub fn missions_mut(&mut self) -> &mut BTreeMap<UnitId, Mission> {
        &mut self.missions
    }

    pub fn mission(&self, unit: &UnitId) -> Option<&Mission> {
        self.missions.get(unit)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn has_unit(&self, unit: &UnitId) -> bool {
        self.assigned_units.contains(unit)
    }

    pub fn add_unit(&mut self, unit: UnitId) -> bool {
        self.assigned_units.insert(unit)
    }

    /// Drops the unit and any mission it holds.
    pub fn release_unit(&mut self, unit: &UnitId) -> bool {
        self.missions.remove(unit);
        self.assigned_units.remove(unit)
    }

    /// Assigns a unit together with its mission.
    pub fn add_mission(&mut self, mission: Mission) -> Result<(), String> {
        let unit = mission.responsible_unit().cloned().ok_or("Mission has no responsible unit")?;

        if self.missions.contains_key(&unit) {
            return Err(format!("Unit {} already has a mission in cluster {}", unit, self.id));
        }

        self.assigned_units.insert(unit.clone());
        self.missions.insert(unit, mission);

        Ok(())
    }

    /// Build slots plus resource cells.
    pub fn capacity(&self) -> usize {
        self.exposed_perimeter.len() + self.cells.len()
    }

    pub fn spare_capacity(&self) -> usize {
        self.capacity().saturating_sub(self.assigned_units.len())
    }

    pub fn mission_count(&self, mission_type: MissionType) -> usize {
        self.missions.values().filter(|mission| mission.mission_type() == mission_type).count()
    }

    /// Refresh from this turn's observation. Only ever shrinks `cells`; an exhausted cluster is
    /// torn down.
    pub fn update(&mut self, context: &TurnContext) {
        let grid = context.grid();

        self.cells.retain(|pos| grid.has_resource(*pos));

        self.assigned_units.retain(|unit| context.is_live(unit));

        self.update_perimeter(grid);

        if self.is_exhausted() {
            self.teardown();
        }
    }

    fn update_perimeter(&mut self, grid: &GridSnapshot) {
        self.perimeter = self
            .cells
            .iter()
            .flat_map(|pos| grid.grid().neighbours_four(*pos))
            .filter(|pos| !grid.has_resource(*pos))
            .collect();

        self.exposed_perimeter = self
            .perimeter
            .iter()
            .filter(|pos| !grid.has_structure(**pos) && !grid.has_resource(**pos))
            .copied()
            .collect();
    }

    /// Releases every unit and clears every mission.
    pub fn teardown(&mut self) -> Vec<UnitId> {
        self.missions.clear();

        std::mem::take(&mut self.assigned_units).into_iter().collect()
    }

    pub fn check_invariants(&self) -> Result<(), String> {
        if let Some(unit) = self.missions.keys().find(|unit| !self.assigned_units.contains(*unit)) {
            return Err(format!("Cluster {} has a mission for unassigned unit {}", self.id, unit));
        }

        if let Some((unit, _)) = self
            .missions
            .iter()
            .find(|(unit, mission)| mission.responsible_unit() != Some(*unit))
        {
            return Err(format!("Cluster {} has a mission keyed by {} held by another unit", self.id, unit));
        }

        if !self.cells.is_subset(&self.footprint) {
            return Err(format!("Cluster {} gained cells outside its footprint", self.id));
        }

        if self.is_exhausted() && !(self.missions.is_empty() && self.assigned_units.is_empty()) {
            return Err(format!("Cluster {} is exhausted but still holds units", self.id));
        }

        Ok(())
    }

    /// Mean position of the remaining cells.
    pub fn centroid(&self) -> Option<(f32, f32)> {
        if self.cells.is_empty() {
            return None;
        }

        let count = self.cells.len() as f32;
        let (sum_x, sum_y) = self
            .cells
            .iter()
            .fold((0.0, 0.0), |(x, y), pos| (x + pos.x as f32, y + pos.y as f32));

        Some((sum_x / count, sum_y / count))
    }

    pub fn total_fuel(&self, grid: &GridSnapshot) -> u32 {
        self.cells
            .iter()
            .map(|pos| grid.cell(*pos).resource_amount * self.resource_kind.fuel_rate())
            .sum()
    }

    pub fn distance_to(&self, pos: Position) -> Option<u32> {
        self.perimeter
            .iter()
            .chain(self.cells.iter())
            .find_nearest_linear_distance(pos)
    }

    pub fn describe(&self) -> String {
        let missions = self.missions.values().map(|mission| mission.describe()).join(", ");

        format!(
            "Cluster {} ({}) - Cells: {} - Exposed: {} - Units: {} - Missions: [{}]",
            self.id,
            self.resource_kind,
            self.cells.len(),
            self.exposed_perimeter.len(),
            self.assigned_units.len(),
            missions
        )
    }
}
