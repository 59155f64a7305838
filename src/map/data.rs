use super::grid::*;
use super::position::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Wood,
    Coal,
    Uranium,
}

impl ResourceKind {
    /// Fuel produced per unit of resource.
    pub fn fuel_rate(&self) -> u32 {
        match self {
            ResourceKind::Wood => 1,
            ResourceKind::Coal => 10,
            ResourceKind::Uranium => 40,
        }
    }
}

impl Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResourceKind::Wood => write!(f, "wood"),
            ResourceKind::Coal => write!(f, "coal"),
            ResourceKind::Uranium => write!(f, "uranium"),
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StructureOwner {
    #[default]
    None,
    Player,
    Opponent,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellData {
    #[serde(default)]
    pub resource_kind: Option<ResourceKind>,
    #[serde(default)]
    pub resource_amount: u32,
    #[serde(default)]
    pub structure_owner: StructureOwner,
}

impl CellData {
    pub fn has_resource(&self) -> bool {
        self.resource_kind.is_some() && self.resource_amount > 0
    }

    /// Kind of a resource still present on the cell.
    pub fn resource(&self) -> Option<ResourceKind> {
        self.resource_kind.filter(|_| self.resource_amount > 0)
    }

    pub fn has_structure(&self) -> bool {
        self.structure_owner != StructureOwner::None
    }
}

/// One turn's observation of the map.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GridSnapshot {
    grid: GridIndex,
    cells: Vec<CellData>,
}

impl GridSnapshot {
    pub fn new(width: u32, height: u32) -> GridSnapshot {
        let grid = GridIndex::new(width, height);

        GridSnapshot {
            grid,
            cells: vec![CellData::default(); grid.len()],
        }
    }

    pub fn from_cells(width: u32, height: u32, cells: Vec<CellData>) -> Result<GridSnapshot, String> {
        let grid = GridIndex::new(width, height);

        if cells.len() != grid.len() {
            return Err(format!("Expected {} cells for a {}x{} grid, got {}", grid.len(), width, height, cells.len()));
        }

        Ok(GridSnapshot { grid, cells })
    }

    pub fn grid(&self) -> &GridIndex {
        &self.grid
    }

    pub fn width(&self) -> u32 {
        self.grid.width()
    }

    pub fn height(&self) -> u32 {
        self.grid.height()
    }

    pub fn in_bounds(&self, pos: Position) -> bool {
        self.grid.in_bounds(pos)
    }

    pub fn cell(&self, pos: Position) -> &CellData {
        &self.cells[self.grid.index_of(pos)]
    }

    pub fn cell_mut(&mut self, pos: Position) -> &mut CellData {
        let index = self.grid.index_of(pos);

        &mut self.cells[index]
    }

    pub fn has_resource(&self, pos: Position) -> bool {
        self.cell(pos).has_resource()
    }

    pub fn has_structure(&self, pos: Position) -> bool {
        self.cell(pos).has_structure()
    }

    pub fn set_resource(&mut self, pos: Position, kind: ResourceKind, amount: u32) {
        let cell = self.cell_mut(pos);

        cell.resource_kind = Some(kind);
        cell.resource_amount = amount;
    }

    pub fn clear_resource(&mut self, pos: Position) {
        let cell = self.cell_mut(pos);

        cell.resource_kind = None;
        cell.resource_amount = 0;
    }

    pub fn set_structure(&mut self, pos: Position, owner: StructureOwner) {
        self.cell_mut(pos).structure_owner = owner;
    }

    /// Positions holding resource, row-major.
    pub fn resource_positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.grid.positions().filter(move |pos| self.has_resource(*pos))
    }

    pub fn structure_positions(&self, owner: StructureOwner) -> impl Iterator<Item = Position> + '_ {
        self.grid
            .positions()
            .filter(move |pos| self.cell(*pos).structure_owner == owner && owner != StructureOwner::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depleted_cell_has_no_resource() {
        let mut snapshot = GridSnapshot::new(2, 1);

        snapshot.set_resource(Position::new(0, 0), ResourceKind::Coal, 0);
        snapshot.set_resource(Position::new(1, 0), ResourceKind::Coal, 5);

        assert!(!snapshot.has_resource(Position::new(0, 0)));
        assert_eq!(snapshot.cell(Position::new(0, 0)).resource(), None);
        assert_eq!(snapshot.resource_positions().collect::<Vec<_>>(), vec![Position::new(1, 0)]);
    }

    #[test]
    fn from_cells_rejects_wrong_length() {
        assert!(GridSnapshot::from_cells(2, 2, vec![CellData::default(); 3]).is_err());
        assert!(GridSnapshot::from_cells(2, 2, vec![CellData::default(); 4]).is_ok());
    }

    #[test]
    fn cell_deserializes_with_defaults() {
        let cell: CellData = serde_json::from_str(r#"{ "resource_kind": "uranium", "resource_amount": 3 }"#).unwrap();

        assert_eq!(cell.resource(), Some(ResourceKind::Uranium));
        assert!(!cell.has_structure());
    }
}
