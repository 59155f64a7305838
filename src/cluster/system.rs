use super::assignment::*;
use super::registry::*;
use crate::features::*;
use crate::turn::*;
use log::*;
use specs::prelude::*;

pub struct ClusterDiscoverySystem;

impl<'a> System<'a> for ClusterDiscoverySystem {
    type SystemData = (ReadExpect<'a, TurnContext>, Read<'a, Features>, Write<'a, ClusterRegistry>);

    fn run(&mut self, (context, features, mut registry): Self::SystemData) {
        if !registry.is_discovered() {
            registry.discover(context.grid(), features.clusters.discovery_options());
        }
    }
}

pub struct ClusterUpdateSystem;

impl<'a> System<'a> for ClusterUpdateSystem {
    type SystemData = (ReadExpect<'a, TurnContext>, Write<'a, ClusterRegistry>);

    fn run(&mut self, (context, mut registry): Self::SystemData) {
        let removed = registry.update(&context);

        if !removed.is_empty() {
            info!("Turn {} - Exhausted clusters: {}", context.turn(), removed.len());
        }

        let overlapping = registry.overlapping_cells();

        if !overlapping.is_empty() {
            warn!("Resource cells owned by more than one cluster: {}", overlapping.len());
        }
    }
}

pub struct WorkerAssignmentSystem;

impl<'a> System<'a> for WorkerAssignmentSystem {
    type SystemData = (ReadExpect<'a, TurnContext>, Read<'a, Features>, Write<'a, ClusterRegistry>);

    fn run(&mut self, (context, features, mut registry): Self::SystemData) {
        if features.missions.assign_free_units {
            assign_free_units(&mut registry, &context);
        }
    }
}
