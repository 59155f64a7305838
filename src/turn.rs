use crate::map::*;
use serde::{Deserialize, Serialize};
use shrinkwraprs::*;
use std::collections::BTreeMap;
use std::fmt::Display;

#[derive(Shrinkwrap, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitId(pub String);

impl From<&str> for UnitId {
    fn from(id: &str) -> UnitId {
        UnitId(id.to_string())
    }
}

impl Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn default_true() -> bool {
    true
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitData {
    pub id: UnitId,
    pub pos: Position,
    /// Carried resource, 0..=100 for a worker.
    #[serde(default)]
    pub cargo_used: u32,
    #[serde(default = "default_true")]
    pub can_act: bool,
    #[serde(default = "default_true")]
    pub alive: bool,
}

impl UnitData {
    pub fn new(id: &str, pos: Position, cargo_used: u32) -> UnitData {
        UnitData {
            id: UnitId::from(id),
            pos,
            cargo_used,
            can_act: true,
            alive: true,
        }
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Research {
    pub coal: bool,
    pub uranium: bool,
}

impl Research {
    pub fn can_mine(&self, kind: ResourceKind) -> bool {
        match kind {
            ResourceKind::Wood => true,
            ResourceKind::Coal => self.coal,
            ResourceKind::Uranium => self.uranium,
        }
    }
}

/// Everything the cluster pipeline reads about the current turn. Built fresh from each
/// observation and never mutated by the pipeline.
#[derive(Clone, Debug)]
pub struct TurnContext {
    turn: u32,
    grid: GridSnapshot,
    units: BTreeMap<UnitId, UnitData>,
    opponent_units: Vec<Position>,
    night_turns_left: u32,
    research: Research,
}

impl TurnContext {
    /// Dead units are dropped from the roster.
    pub fn new(turn: u32, grid: GridSnapshot, units: Vec<UnitData>) -> TurnContext {
        let units = units
            .into_iter()
            .filter(|unit| unit.alive)
            .map(|unit| (unit.id.clone(), unit))
            .collect();

        TurnContext {
            turn,
            grid,
            units,
            opponent_units: Vec::new(),
            night_turns_left: 0,
            research: Research::default(),
        }
    }

    pub fn with_opponent_units(mut self, opponent_units: Vec<Position>) -> TurnContext {
        self.opponent_units = opponent_units;
        self
    }

    pub fn with_night_turns_left(mut self, night_turns_left: u32) -> TurnContext {
        self.night_turns_left = night_turns_left;
        self
    }

    pub fn with_research(mut self, research: Research) -> TurnContext {
        self.research = research;
        self
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn grid(&self) -> &GridSnapshot {
        &self.grid
    }

    /// Live units ordered by id.
    pub fn units(&self) -> impl Iterator<Item = &UnitData> {
        self.units.values()
    }

    pub fn unit(&self, id: &UnitId) -> Option<&UnitData> {
        self.units.get(id)
    }

    pub fn is_live(&self, id: &UnitId) -> bool {
        self.units.contains_key(id)
    }

    pub fn opponent_units(&self) -> &[Position] {
        &self.opponent_units
    }

    pub fn night_turns_left(&self) -> u32 {
        self.night_turns_left
    }

    pub fn research(&self) -> Research {
        self.research
    }
}
