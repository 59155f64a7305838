use crate::cluster::discovery::*;
use crate::map::*;
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Runtime switches for the agent. Every field has a default so partial documents load.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub clusters: ClusterFeatures,
    pub missions: MissionFeatures,
    pub explore: ExploreFeatures,
    pub actions: ActionFeatures,
    pub logging: LoggingFeatures,
}

impl Features {
    pub fn from_json(data: &str) -> Result<Features, String> {
        serde_json::from_str(data).map_err(|err| format!("Failed to parse features: {}", err))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterFeatures {
    pub connectivity: Connectivity,
}

impl ClusterFeatures {
    pub fn discovery_options(&self) -> DiscoveryOptions {
        DiscoveryOptions {
            connectivity: self.connectivity,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MissionFeatures {
    pub assign_free_units: bool,
}

impl Default for MissionFeatures {
    fn default() -> MissionFeatures {
        MissionFeatures { assign_free_units: true }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExploreFeatures {
    pub fuel_safety: bool,
    /// Fuel a worker burns per night turn.
    pub night_upkeep: u32,
}

impl Default for ExploreFeatures {
    fn default() -> ExploreFeatures {
        ExploreFeatures {
            fuel_safety: true,
            night_upkeep: 4,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionFeatures {
    /// Cargo a worker must carry before it can build.
    pub build_cargo: u32,
}

impl Default for ActionFeatures {
    fn default() -> ActionFeatures {
        ActionFeatures { build_cargo: 100 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingFeatures {
    pub level: String,
    pub file: Option<String>,
}

impl Default for LoggingFeatures {
    fn default() -> LoggingFeatures {
        LoggingFeatures {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl LoggingFeatures {
    pub fn level_filter(&self) -> Result<LevelFilter, String> {
        LevelFilter::from_str(&self.level).map_err(|_| format!("Unknown log level: {}", self.level))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_document_keeps_defaults() {
        let features = Features::from_json(r#"{ "clusters": { "connectivity": "eight" }, "explore": { "night_upkeep": 6 } }"#).unwrap();

        assert_eq!(features.clusters.connectivity, Connectivity::Eight);
        assert_eq!(features.explore.night_upkeep, 6);
        assert!(features.explore.fuel_safety);
        assert!(features.missions.assign_free_units);
        assert_eq!(features.actions.build_cargo, 100);
        assert_eq!(features.logging.level_filter(), Ok(LevelFilter::Info));
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(Features::from_json("{}").unwrap(), Features::default());
    }

    #[test]
    fn invalid_documents_are_errors() {
        assert!(Features::from_json("{ clusters: ").is_err());
        assert!(Features::from_json(r#"{ "clusters": { "connectivity": "six" } }"#).is_err());

        let logging = LoggingFeatures {
            level: "loud".to_string(),
            file: None,
        };

        assert!(logging.level_filter().is_err());
    }
}
