use crate::map::*;
use crate::turn::*;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MissionType {
    BuildTile,
    GuardCluster,
    Explore,
}

impl MissionType {
    /// Order in which batches are negotiated each turn.
    pub const NEGOTIATION_ORDER: [MissionType; 3] = [MissionType::BuildTile, MissionType::GuardCluster, MissionType::Explore];
}

impl Display for MissionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MissionType::BuildTile => write!(f, "Build Tile"),
            MissionType::GuardCluster => write!(f, "Guard Cluster"),
            MissionType::Explore => write!(f, "Explore"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    mission_type: MissionType,
    responsible_unit: Option<UnitId>,
    target_pos: Option<Position>,
    allow_target_change: bool,
}

impl Mission {
    pub fn new(mission_type: MissionType, responsible_unit: UnitId) -> Mission {
        Mission {
            mission_type,
            responsible_unit: Some(responsible_unit),
            target_pos: None,
            allow_target_change: true,
        }
    }

    pub fn mission_type(&self) -> MissionType {
        self.mission_type
    }

    pub fn responsible_unit(&self) -> Option<&UnitId> {
        self.responsible_unit.as_ref()
    }

    pub fn target_pos(&self) -> Option<Position> {
        self.target_pos
    }

    pub fn allow_target_change(&self) -> bool {
        self.allow_target_change
    }

    /// Target written by negotiation. Ignored while the target is pinned.
    pub fn change_target_pos(&mut self, target_pos: Position) -> bool {
        if self.allow_target_change {
            self.target_pos = Some(target_pos);

            true
        } else {
            false
        }
    }

    /// Forces a target and stops negotiation from moving it.
    pub fn pin_target(&mut self, target_pos: Position) {
        self.target_pos = Some(target_pos);
        self.allow_target_change = false;
    }

    pub fn release_target(&mut self) {
        self.allow_target_change = true;
    }

    pub fn describe(&self) -> String {
        let unit = self.responsible_unit.as_ref().map(|id| id.to_string()).unwrap_or_else(|| "-".to_string());
        let target = self.target_pos.map(|pos| pos.to_string()).unwrap_or_else(|| "-".to_string());
        let pinned = if self.allow_target_change { "" } else { " (pinned)" };

        format!("{} - Unit: {} - Target: {}{}", self.mission_type, unit, target, pinned)
    }
}
