//! Road class attribute, the functional classification of a way.

use serde::{Deserialize, Serialize};

/// Closed set of road classes attached to every edge.
///
/// `Other` is the catch-all for ways the import pipeline could not classify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadClass {
    #[default]
    Other,
    Motorway,
    MotorwayLink,
    Trunk,
    TrunkLink,
    Primary,
    PrimaryLink,
    Secondary,
    SecondaryLink,
    Tertiary,
    TertiaryLink,
    Unclassified,
    Residential,
    Service,
    LivingStreet,
    Track,
    Footway,
    Cycleway,
    Path,
    Pedestrian,
    Steps,
}

impl RoadClass {
    /// Attribute key under which this value is encoded on edges.
    pub const KEY: &'static str = "road_class";

    /// Every member of the enumeration, in declaration order.
    pub const ALL: &'static [RoadClass] = &[
        RoadClass::Other,
        RoadClass::Motorway,
        RoadClass::MotorwayLink,
        RoadClass::Trunk,
        RoadClass::TrunkLink,
        RoadClass::Primary,
        RoadClass::PrimaryLink,
        RoadClass::Secondary,
        RoadClass::SecondaryLink,
        RoadClass::Tertiary,
        RoadClass::TertiaryLink,
        RoadClass::Unclassified,
        RoadClass::Residential,
        RoadClass::Service,
        RoadClass::LivingStreet,
        RoadClass::Track,
        RoadClass::Footway,
        RoadClass::Cycleway,
        RoadClass::Path,
        RoadClass::Pedestrian,
        RoadClass::Steps,
    ];

    /// Wire label for this value.
    pub fn label(self) -> &'static str {
        match self {
            RoadClass::Other => "other",
            RoadClass::Motorway => "motorway",
            RoadClass::MotorwayLink => "motorway_link",
            RoadClass::Trunk => "trunk",
            RoadClass::TrunkLink => "trunk_link",
            RoadClass::Primary => "primary",
            RoadClass::PrimaryLink => "primary_link",
            RoadClass::Secondary => "secondary",
            RoadClass::SecondaryLink => "secondary_link",
            RoadClass::Tertiary => "tertiary",
            RoadClass::TertiaryLink => "tertiary_link",
            RoadClass::Unclassified => "unclassified",
            RoadClass::Residential => "residential",
            RoadClass::Service => "service",
            RoadClass::LivingStreet => "living_street",
            RoadClass::Track => "track",
            RoadClass::Footway => "footway",
            RoadClass::Cycleway => "cycleway",
            RoadClass::Path => "path",
            RoadClass::Pedestrian => "pedestrian",
            RoadClass::Steps => "steps",
        }
    }

    /// Case-insensitive label lookup.
    pub fn from_label(label: &str) -> Option<RoadClass> {
        RoadClass::ALL
            .iter()
            .copied()
            .find(|rc| rc.label().eq_ignore_ascii_case(label))
    }
}
