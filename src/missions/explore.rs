use super::data::*;
use crate::cluster::data::*;
use crate::findnearest::*;
use crate::map::*;
use crate::turn::*;
use log::*;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FuelSafetySummary {
    pub pinned: Vec<UnitId>,
    pub released: usize,
}

/// Whether the unit's cargo covers the remaining night turns.
pub fn has_fuel_for_night(unit: &UnitData, night_turns_left: u32, night_upkeep: u32) -> bool {
    unit.cargo_used >= night_turns_left.saturating_mul(night_upkeep)
}

/// Nearest cell still holding a resource this player is able to mine.
pub fn nearest_minable_resource(context: &TurnContext, pos: Position) -> Option<Position> {
    let grid = context.grid();
    let research = context.research();

    grid.resource_positions()
        .filter(|resource_pos| {
            grid.cell(*resource_pos)
                .resource()
                .map(|kind| research.can_mine(kind))
                .unwrap_or(false)
        })
        .find_nearest_linear(pos)
}

/// Re-evaluates every Explore mission of the cluster. Units short on fuel are pinned to the
/// nearest minable resource cell so negotiation leaves them alone; the rest are unpinned and
/// given the nearest exposed perimeter cell as a fallback target.
pub fn apply_fuel_safety(cluster: &mut Cluster, context: &TurnContext, night_upkeep: u32) -> FuelSafetySummary {
    let mut summary = FuelSafetySummary::default();

    let fallback_targets: Vec<Position> = cluster.exposed_perimeter().iter().copied().collect();
    let cluster_id = cluster.id();

    for (unit, mission) in cluster.missions_mut().iter_mut() {
        if mission.mission_type() != MissionType::Explore {
            continue;
        }

        let unit_data = match context.unit(unit) {
            Some(unit_data) => unit_data,
            None => continue,
        };

        if !has_fuel_for_night(unit_data, context.night_turns_left(), night_upkeep) {
            if let Some(resource_pos) = nearest_minable_resource(context, unit_data.pos) {
                debug!(
                    "Cluster {} - Unit {} low on fuel ({}), pinning to resource at {}",
                    cluster_id, unit, unit_data.cargo_used, resource_pos
                );

                mission.pin_target(resource_pos);

                summary.pinned.push(unit.clone());

                continue;
            }
        }

        mission.release_target();

        if let Some(target) = fallback_targets.iter().find_nearest_linear(unit_data.pos) {
            mission.change_target_pos(*target);
        }

        summary.released += 1;
    }

    summary
}
