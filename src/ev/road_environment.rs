//! Road environment attribute, the physical setting a way runs through.

use serde::{Deserialize, Serialize};

/// Closed set of road environments attached to every edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadEnvironment {
    #[default]
    Road,
    Ferry,
    Tunnel,
    Bridge,
    Ford,
    Shore,
}

impl RoadEnvironment {
    /// Attribute key under which this value is encoded on edges.
    pub const KEY: &'static str = "road_environment";

    pub const ALL: &'static [RoadEnvironment] = &[
        RoadEnvironment::Road,
        RoadEnvironment::Ferry,
        RoadEnvironment::Tunnel,
        RoadEnvironment::Bridge,
        RoadEnvironment::Ford,
        RoadEnvironment::Shore,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RoadEnvironment::Road => "road",
            RoadEnvironment::Ferry => "ferry",
            RoadEnvironment::Tunnel => "tunnel",
            RoadEnvironment::Bridge => "bridge",
            RoadEnvironment::Ford => "ford",
            RoadEnvironment::Shore => "shore",
        }
    }

    /// Case-insensitive label lookup.
    pub fn from_label(label: &str) -> Option<RoadEnvironment> {
        RoadEnvironment::ALL
            .iter()
            .copied()
            .find(|re| re.label().eq_ignore_ascii_case(label))
    }
}
