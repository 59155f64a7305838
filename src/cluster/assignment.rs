use super::data::*;
use super::registry::*;
use crate::missions::data::*;
use crate::turn::*;
use log::*;

/// Nearest cluster, by distance to its cells or perimeter, that still has room for a unit.
pub fn select_cluster_for_unit(registry: &ClusterRegistry, unit: &UnitData) -> Option<ClusterId> {
    registry
        .iter()
        .filter(|cluster| !cluster.is_exhausted() && cluster.spare_capacity() > 0)
        .filter_map(|cluster| cluster.distance_to(unit.pos).map(|distance| (distance, cluster.id())))
        .min()
        .map(|(_, id)| id)
}

/// Gives every unit without a home cluster an Explore mission in the closest cluster with room.
/// Units that fit nowhere stay free.
pub fn assign_free_units(registry: &mut ClusterRegistry, context: &TurnContext) -> Vec<(UnitId, ClusterId)> {
    let free_units: Vec<UnitData> = registry.units_without_cluster(context).into_iter().cloned().collect();

    let mut assignments = Vec::new();

    for unit in free_units {
        let cluster_id = match select_cluster_for_unit(registry, &unit) {
            Some(id) => id,
            None => continue,
        };

        if let Some(cluster) = registry.get_mut(cluster_id) {
            match cluster.add_mission(Mission::new(MissionType::Explore, unit.id.clone())) {
                Ok(()) => {
                    debug!("Assigned unit {} to cluster {}", unit.id, cluster_id);

                    assignments.push((unit.id, cluster_id));
                }
                Err(err) => warn!("Failed to assign unit {} to cluster {}. Error: {}", unit.id, cluster_id, err),
            }
        }
    }

    if !assignments.is_empty() {
        info!("Assigned {} free units to clusters", assignments.len());
    }

    assignments
}
