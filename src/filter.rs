//! Edge eligibility filters for snapping and traversal.
//!
//! Filters are composable boolean predicates over directed edges. Snapping
//! and search consult the filter stack before an edge is considered at all,
//! which keeps implausible matches (a GPS point on a ferry line, a motorway
//! shoulder next to a side street) out of the query entirely.

use std::sync::Arc;

use crate::edge::Edge;
use crate::error::NavError;
use crate::ev::{EncodedValue, EncodingManager, RoadClass, RoadEnvironment};
use crate::params;

/// Boolean predicate over a directed edge.
pub trait EdgeFilter: Send + Sync {
    fn accept(&self, edge: &Edge) -> bool;
}

impl<F> EdgeFilter for F
where
    F: Fn(&Edge) -> bool + Send + Sync,
{
    fn accept(&self, edge: &Edge) -> bool {
        self(edge)
    }
}

/// Base predicate: the edge is traversable at all.
pub struct AccessFilter;

impl EdgeFilter for AccessFilter {
    fn accept(&self, edge: &Edge) -> bool {
        edge.speed_kmh > 0.0
    }
}

/// Decorator that rejects edges whose road class or road environment is in
/// a configured block-list, delegating every other decision.
///
/// The exclusion list is validated against the attribute registry when the
/// filter is built, so traversal never encounters an unknown label.
pub struct SnapPreventionEdgeFilter {
    delegate: Arc<dyn EdgeFilter>,
    excluded_classes: Vec<RoadClass>,
    excluded_environments: Vec<RoadEnvironment>,
}

impl std::fmt::Debug for SnapPreventionEdgeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapPreventionEdgeFilter")
            .field("excluded_classes", &self.excluded_classes)
            .field("excluded_environments", &self.excluded_environments)
            .finish_non_exhaustive()
    }
}

impl SnapPreventionEdgeFilter {
    /// Build the filter from `excluded` labels.
    ///
    /// Each label is resolved against the road class enumeration first and
    /// the road environment enumeration second. A label found in neither is
    /// a configuration error naming the `snap_prevention` key. Duplicate
    /// labels are harmless.
    pub fn new<S: AsRef<str>>(
        delegate: Arc<dyn EdgeFilter>,
        em: &EncodingManager,
        excluded: &[S],
    ) -> Result<Self, NavError> {
        let mut excluded_classes = Vec::new();
        let mut excluded_environments = Vec::new();

        for label in excluded {
            let label = label.as_ref();
            let resolved = em
                .value_of(RoadClass::KEY, label)
                .or_else(|_| em.value_of(RoadEnvironment::KEY, label));
            match resolved {
                Ok(EncodedValue::RoadClass(rc)) => {
                    if !excluded_classes.contains(&rc) {
                        excluded_classes.push(rc);
                    }
                }
                Ok(EncodedValue::RoadEnvironment(re)) => {
                    if !excluded_environments.contains(&re) {
                        excluded_environments.push(re);
                    }
                }
                Err(_) => {
                    return Err(NavError::Configuration {
                        key: params::SNAP_PREVENTION.to_string(),
                        value: label.to_string(),
                    })
                }
            }
        }

        Ok(Self {
            delegate,
            excluded_classes,
            excluded_environments,
        })
    }
}

impl EdgeFilter for SnapPreventionEdgeFilter {
    /// An exclusion match wins outright; the delegate is only consulted for
    /// edges that pass both attribute checks.
    fn accept(&self, edge: &Edge) -> bool {
        if self.excluded_classes.contains(&edge.road_class)
            || self.excluded_environments.contains(&edge.road_environment)
        {
            return false;
        }
        self.delegate.accept(edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingFilter {
        calls: AtomicUsize,
        verdict: bool,
    }

    impl CountingFilter {
        fn accepting() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                verdict: true,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl EdgeFilter for CountingFilter {
        fn accept(&self, _edge: &Edge) -> bool {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.verdict
        }
    }

    fn filter(excluded: &[&str]) -> SnapPreventionEdgeFilter {
        let em = EncodingManager::new();
        SnapPreventionEdgeFilter::new(Arc::new(|_: &Edge| true), &em, excluded).unwrap()
    }

    #[test]
    fn accept_flips_on_either_excluded_attribute() {
        let filter = filter(&["motorway", "ferry"]);
        let mut edge = Edge::new(0, 1, 1.0);

        assert!(filter.accept(&edge));
        edge.road_environment = RoadEnvironment::Ferry;
        assert!(!filter.accept(&edge));
        edge.road_environment = RoadEnvironment::Ford;
        assert!(filter.accept(&edge));

        edge.road_class = RoadClass::Residential;
        assert!(filter.accept(&edge));
        edge.road_class = RoadClass::Motorway;
        assert!(!filter.accept(&edge));
    }

    #[test]
    fn exclusion_is_independent_of_the_other_attribute() {
        let filter = filter(&["motorway", "ferry"]);
        for &rc in RoadClass::ALL {
            for &re in RoadEnvironment::ALL {
                let edge = Edge::new(0, 1, 1.0)
                    .with_road_class(rc)
                    .with_road_environment(re);
                let expect =
                    rc != RoadClass::Motorway && re != RoadEnvironment::Ferry;
                assert_eq!(filter.accept(&edge), expect, "rc={rc:?} re={re:?}");
            }
        }
    }

    #[test]
    fn constructor_fails_for_unknown_snap_prevention_value() {
        let em = EncodingManager::new();
        let err = SnapPreventionEdgeFilter::new(
            Arc::new(AccessFilter),
            &em,
            &["motorway", "not_a_valid_snap_flag"],
        )
        .unwrap_err();
        let msg = err.to_string().to_lowercase();
        assert!(msg.contains("snap_prevention"), "{msg}");
        assert!(msg.contains("not_a_valid_snap_flag"), "{msg}");
    }

    #[test]
    fn labels_resolve_case_insensitively_and_duplicates_are_idempotent() {
        let filter = filter(&["Motorway", "MOTORWAY", "Tunnel"]);
        let edge = Edge::new(0, 1, 1.0).with_road_class(RoadClass::Motorway);
        assert!(!filter.accept(&edge));
        let edge = Edge::new(0, 1, 1.0).with_road_environment(RoadEnvironment::Tunnel);
        assert!(!filter.accept(&edge));
    }

    #[test]
    fn delegate_is_consulted_only_for_non_excluded_edges() {
        let delegate = CountingFilter::accepting();
        let em = EncodingManager::new();
        let filter = SnapPreventionEdgeFilter::new(
            delegate.clone(),
            &em,
            &["motorway", "trunk", "tunnel"],
        )
        .unwrap();

        let cases = [
            (RoadClass::Motorway, RoadEnvironment::Road, false),
            (RoadClass::Trunk, RoadEnvironment::Road, false),
            (RoadClass::Residential, RoadEnvironment::Tunnel, false),
            (RoadClass::Residential, RoadEnvironment::Road, true),
        ];
        for (rc, re, expect) in cases {
            let edge = Edge::new(0, 1, 1.0)
                .with_road_class(rc)
                .with_road_environment(re);
            assert_eq!(filter.accept(&edge), expect);
        }

        // One delegate call for the single non-excluded case.
        assert_eq!(delegate.calls(), 1);
    }

    #[test]
    fn delegate_rejection_sticks() {
        let em = EncodingManager::new();
        let filter =
            SnapPreventionEdgeFilter::new(Arc::new(|_: &Edge| false), &em, &["ferry"]).unwrap();
        assert!(!filter.accept(&Edge::new(0, 1, 1.0)));
    }
}
