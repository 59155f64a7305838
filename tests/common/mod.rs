#![allow(dead_code)]

use lux_clusters::*;

pub const RESOURCE_AMOUNT: u32 = 100;

/// Builds a grid from rows of characters: `.` empty, `w`/`c`/`u` wood/coal/uranium,
/// `P` a player structure and `O` an opponent structure.
pub fn grid_from_ascii(rows: &[&str]) -> GridSnapshot {
    let height = rows.len() as u32;
    let width = rows.first().map(|row| row.len()).unwrap_or(0) as u32;

    let mut grid = GridSnapshot::new(width, height);

    for (y, row) in rows.iter().enumerate() {
        assert_eq!(row.len() as u32, width, "ragged map row {}", y);

        for (x, tile) in row.chars().enumerate() {
            let pos = Position::new(x as i32, y as i32);

            match tile {
                '.' => {}
                'w' => grid.set_resource(pos, ResourceKind::Wood, RESOURCE_AMOUNT),
                'c' => grid.set_resource(pos, ResourceKind::Coal, RESOURCE_AMOUNT),
                'u' => grid.set_resource(pos, ResourceKind::Uranium, RESOURCE_AMOUNT),
                'P' => grid.set_structure(pos, StructureOwner::Player),
                'O' => grid.set_structure(pos, StructureOwner::Opponent),
                other => panic!("unknown map tile {:?}", other),
            }
        }
    }

    grid
}

pub fn unit(id: &str, x: i32, y: i32, cargo: u32) -> UnitData {
    UnitData::new(id, Position::new(x, y), cargo)
}

pub fn id(id: &str) -> UnitId {
    UnitId::from(id)
}
