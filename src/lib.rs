#![warn(clippy::all)]

pub mod actions;
pub mod cluster;
pub mod features;
pub mod findnearest;
pub mod game_loop;
pub mod logging;
pub mod map;
pub mod missions;
pub mod turn;

pub use actions::movement::UnitAction;
pub use actions::orders::{OrderKind, TurnOutput, UnitOrder};
pub use cluster::data::{Cluster, ClusterId};
pub use cluster::registry::ClusterRegistry;
pub use features::Features;
pub use game_loop::Agent;
pub use map::{CellData, Connectivity, GridIndex, GridSnapshot, Position, ResourceKind, StructureOwner};
pub use missions::data::{Mission, MissionType};
pub use missions::scoring::{BuildPositionScorer, TargetScorer};
pub use turn::{Research, TurnContext, UnitData, UnitId};

pub fn setup(features: &Features) -> Result<(), String> {
    logging::setup_from_features(&features.logging)?;

    log::info!("Logging set up at {}", features.logging.level);

    Ok(())
}
