use crate::actions::orders::*;
use crate::actions::system::*;
use crate::cluster::registry::*;
use crate::cluster::system::*;
use crate::features::*;
use crate::missions::missionsystem::*;
use crate::missions::scoring::*;
use crate::turn::*;
use log::*;
use specs::prelude::*;

/// Persistent agent state plus the per-turn system pipeline.
pub struct Agent {
    world: World,
    dispatcher: Dispatcher<'static, 'static>,
}

impl Agent {
    pub fn new(features: Features, scorer: Box<dyn TargetScorer>) -> Agent {
        info!("Initializing agent");

        let mut world = World::new();

        world.insert(features);
        world.insert(TargetScoring::new(scorer));
        world.insert(ClusterRegistry::default());
        world.insert(TurnOutput::default());

        //
        // Every system touches the registry, so the pipeline is strictly ordered.
        //

        let mut dispatcher = DispatcherBuilder::new()
            .with(ClusterDiscoverySystem, "cluster_discovery", &[])
            .with(ClusterUpdateSystem, "cluster_update", &["cluster_discovery"])
            .with_barrier()
            .with(MissionPruneSystem, "mission_prune", &[])
            .with(MissionIssueSystem, "mission_issue", &["mission_prune"])
            .with(WorkerAssignmentSystem, "worker_assignment", &["mission_issue"])
            .with(MissionNegotiationSystem, "mission_negotiation", &["worker_assignment"])
            .with_barrier()
            .with(UnitOrderSystem, "unit_orders", &[])
            .build();

        dispatcher.setup(&mut world);

        Agent { world, dispatcher }
    }

    pub fn with_default_scorer(features: Features) -> Agent {
        Agent::new(features, Box::new(BuildPositionScorer))
    }

    /// Runs one turn over the given observation.
    pub fn tick(&mut self, context: TurnContext) -> TurnOutput {
        let turn = context.turn();

        self.world.insert(context);

        self.dispatcher.dispatch(&self.world);
        self.world.maintain();

        let output = std::mem::take(&mut *self.world.write_resource::<TurnOutput>());

        debug!("Finished turn {} - Actions: {}", turn, output.actions.len());

        output
    }

    pub fn with_registry<R, F>(&self, f: F) -> R
    where
        F: FnOnce(&ClusterRegistry) -> R,
    {
        f(&self.world.read_resource::<ClusterRegistry>())
    }
}
