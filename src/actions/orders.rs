use super::movement::*;
use crate::cluster::registry::*;
use crate::map::*;
use crate::missions::data::*;
use crate::turn::*;
use std::collections::HashSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OrderKind {
    Build,
    Move(DirectionSet),
    Hold,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnitOrder {
    pub unit: UnitId,
    pub pos: Position,
    pub kind: OrderKind,
}

/// Everything the pipeline produced for one turn.
#[derive(Clone, Debug, Default)]
pub struct TurnOutput {
    pub orders: Vec<UnitOrder>,
    pub actions: Vec<UnitAction>,
}

fn order_kind(unit: &UnitData, mission: Option<&Mission>, grid: &GridSnapshot, build_cargo: u32) -> OrderKind {
    if !unit.can_act {
        return OrderKind::Hold;
    }

    let (mission, target_pos) = match mission.and_then(|mission| mission.target_pos().map(|pos| (mission, pos))) {
        Some(found) => found,
        None => return OrderKind::Hold,
    };

    if unit.pos != target_pos {
        return OrderKind::Move(unit.pos.directions_to(target_pos));
    }

    let can_build = mission.mission_type() == MissionType::BuildTile
        && unit.cargo_used >= build_cargo
        && !grid.has_structure(target_pos)
        && !grid.has_resource(target_pos);

    if can_build {
        OrderKind::Build
    } else {
        OrderKind::Hold
    }
}

/// One order per live unit, ordered by unit id. Units outside every cluster hold.
pub fn extract_orders(registry: &ClusterRegistry, context: &TurnContext, build_cargo: u32) -> Vec<UnitOrder> {
    context
        .units()
        .map(|unit| {
            let mission = registry
                .cluster_of_unit(&unit.id)
                .and_then(|id| registry.get(id))
                .and_then(|cluster| cluster.mission(&unit.id));

            UnitOrder {
                unit: unit.id.clone(),
                pos: unit.pos,
                kind: order_kind(unit, mission, context.grid(), build_cargo),
            }
        })
        .collect()
}

/// Tiles no unit may move into this turn: opponent structures and the tiles of units that are
/// not moving. Own structures stack and are never blocked.
pub fn occupied_positions(orders: &[UnitOrder], context: &TurnContext) -> HashSet<Position> {
    let grid = context.grid();

    let mut occupied: HashSet<Position> = grid.structure_positions(StructureOwner::Opponent).collect();

    occupied.extend(
        orders
            .iter()
            .filter(|order| !matches!(order.kind, OrderKind::Move(_)))
            .map(|order| order.pos),
    );

    occupied.retain(|pos| grid.cell(*pos).structure_owner != StructureOwner::Player);

    occupied
}

/// Build actions followed by the moves that survived collision resolution.
pub fn resolve_orders(orders: &[UnitOrder], context: &TurnContext) -> Vec<UnitAction> {
    let mut occupied = occupied_positions(orders, context);

    let mut actions: Vec<UnitAction> = orders
        .iter()
        .filter(|order| order.kind == OrderKind::Build)
        .map(|order| UnitAction::Build { unit: order.unit.clone() })
        .collect();

    let requests: Vec<MoveRequest> = orders
        .iter()
        .filter_map(|order| match order.kind {
            OrderKind::Move(directions) => Some(MoveRequest {
                unit: order.unit.clone(),
                pos: order.pos,
                directions,
            }),
            _ => None,
        })
        .collect();

    actions.extend(resolve_moves(&mut occupied, &requests));

    actions
}
