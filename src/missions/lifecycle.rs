use super::data::*;
use crate::cluster::data::*;
use crate::turn::*;
use log::*;

/// Why a mission was dropped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PruneReason {
    UnitLost,
    TileBuilt,
    TargetReached,
}

fn prune_reason(unit: &UnitId, mission: &Mission, cluster: &Cluster, context: &TurnContext) -> Option<PruneReason> {
    let unit_data = match context.unit(unit) {
        Some(unit_data) if cluster.has_unit(unit) => unit_data,
        _ => return Some(PruneReason::UnitLost),
    };

    let target_pos = mission.target_pos()?;

    match mission.mission_type() {
        MissionType::BuildTile => {
            if context.grid().has_structure(target_pos) {
                return Some(PruneReason::TileBuilt);
            }
        }
        MissionType::GuardCluster | MissionType::Explore => {
            if unit_data.pos == target_pos {
                return Some(PruneReason::TargetReached);
            }
        }
    }

    None
}

/// Drops missions whose unit is gone or whose objective is met. Running it twice without a state
/// change in between removes nothing the second time.
pub fn prune_missions(cluster: &mut Cluster, context: &TurnContext) -> Vec<(UnitId, PruneReason)> {
    let pruned: Vec<(UnitId, PruneReason)> = cluster
        .missions()
        .iter()
        .filter_map(|(unit, mission)| prune_reason(unit, mission, cluster, context).map(|reason| (unit.clone(), reason)))
        .collect();

    for (unit, reason) in pruned.iter() {
        debug!("Cluster {} - Removing mission for unit {}: {:?}", cluster.id(), unit, reason);

        cluster.missions_mut().remove(unit);
    }

    pruned
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct IssueSummary {
    pub build_tile: usize,
    pub guard_cluster: usize,
    pub released: Vec<UnitId>,
}

/// Hands missions to assigned units that have none: build slots first (one per exposed perimeter
/// cell), then guard slots (one per resource cell). Units that fit neither are released.
pub fn issue_missions(cluster: &mut Cluster) -> IssueSummary {
    let mut summary = IssueSummary::default();

    if cluster.is_exhausted() {
        summary.released = cluster.teardown();

        return summary;
    }

    let mut build_slots = cluster
        .exposed_perimeter()
        .len()
        .saturating_sub(cluster.mission_count(MissionType::BuildTile));

    let mut guard_slots = cluster.cells().len().saturating_sub(cluster.mission_count(MissionType::GuardCluster));

    let idle_units: Vec<UnitId> = cluster
        .assigned_units()
        .iter()
        .filter(|unit| cluster.mission(unit).is_none())
        .cloned()
        .collect();

    for unit in idle_units {
        let mission_type = if build_slots > 0 {
            build_slots -= 1;

            MissionType::BuildTile
        } else if guard_slots > 0 {
            guard_slots -= 1;

            MissionType::GuardCluster
        } else {
            cluster.release_unit(&unit);

            summary.released.push(unit);

            continue;
        };

        if let Err(err) = cluster.add_mission(Mission::new(mission_type, unit)) {
            warn!("Failed to issue mission. Error: {}", err);

            continue;
        }

        match mission_type {
            MissionType::BuildTile => summary.build_tile += 1,
            _ => summary.guard_cluster += 1,
        }
    }

    if !summary.released.is_empty() {
        debug!("Cluster {} over capacity - Released units: {}", cluster.id(), summary.released.len());
    }

    summary
}
