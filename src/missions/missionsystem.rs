use super::data::*;
use super::explore::*;
use super::lifecycle::*;
use super::negotiator::*;
use super::scoring::*;
use crate::cluster::registry::*;
use crate::features::*;
use crate::turn::*;
use log::*;
use specs::prelude::*;

pub struct MissionPruneSystem;

impl<'a> System<'a> for MissionPruneSystem {
    type SystemData = (ReadExpect<'a, TurnContext>, Write<'a, ClusterRegistry>);

    fn run(&mut self, (context, mut registry): Self::SystemData) {
        for cluster in registry.iter_mut() {
            let pruned = prune_missions(cluster, &context);

            if !pruned.is_empty() {
                debug!("Cluster {} - Pruned {} missions", cluster.id(), pruned.len());
            }

            if let Err(err) = cluster.check_invariants() {
                warn!("Cluster failed consistency check, tearing down. Error: {}", err);

                cluster.teardown();
            }
        }
    }
}

pub struct MissionIssueSystem;

impl<'a> System<'a> for MissionIssueSystem {
    type SystemData = Write<'a, ClusterRegistry>;

    fn run(&mut self, mut registry: Self::SystemData) {
        for cluster in registry.iter_mut() {
            let summary = issue_missions(cluster);

            if summary.build_tile > 0 || summary.guard_cluster > 0 {
                debug!(
                    "Cluster {} - Issued missions - Build: {} - Guard: {}",
                    cluster.id(),
                    summary.build_tile,
                    summary.guard_cluster
                );
            }
        }
    }
}

pub struct MissionNegotiationSystem;

impl<'a> System<'a> for MissionNegotiationSystem {
    type SystemData = (
        ReadExpect<'a, TurnContext>,
        Read<'a, TargetScoring>,
        Read<'a, Features>,
        Write<'a, ClusterRegistry>,
    );

    fn run(&mut self, (context, scoring, features, mut registry): Self::SystemData) {
        for cluster in registry.iter_mut() {
            for mission_type in MissionType::NEGOTIATION_ORDER.iter() {
                if *mission_type == MissionType::Explore && features.explore.fuel_safety {
                    let summary = apply_fuel_safety(cluster, &context, features.explore.night_upkeep);

                    if !summary.pinned.is_empty() {
                        info!("Cluster {} - Pinned {} units to resource for the night", cluster.id(), summary.pinned.len());
                    }
                }

                if let Err(err) = negotiate_cluster_missions(cluster, *mission_type, &context, scoring.as_scorer()) {
                    warn!(
                        "Failed to negotiate {} missions for cluster {}. Error: {}",
                        mission_type,
                        cluster.id(),
                        err
                    );
                }
            }
        }
    }
}
