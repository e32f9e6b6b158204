//! Bearing constraint parsing for path-style requests.

use serde::{Deserialize, Serialize};

use crate::error::NavError;

/// Required travel direction at a waypoint, with an allowed deviation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bearing {
    /// Direction in degrees clockwise from true north.
    pub direction: f64,
    /// Allowed deviation in degrees on either side of the direction.
    pub tolerance: f64,
}

/// Parse a semicolon-delimited, per-point bearing string.
///
/// The empty string means no constraints at all. Otherwise every `;`
/// separated segment belongs to one waypoint: an empty segment leaves that
/// waypoint unconstrained, a `direction,tolerance` segment pins it. Leading,
/// trailing and consecutive separators therefore produce unset entries, so
/// `";100,1;;"` yields four entries with only the second one set.
pub fn parse_bearings(raw: &str) -> Result<Vec<Option<Bearing>>, NavError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }

    raw.split(';').map(parse_segment).collect()
}

fn parse_segment(segment: &str) -> Result<Option<Bearing>, NavError> {
    if segment.is_empty() {
        return Ok(None);
    }

    let malformed = || {
        NavError::Format(format!(
            "Bearing '{segment}' must be 'direction,tolerance'"
        ))
    };

    let (direction, tolerance) = segment.split_once(',').ok_or_else(malformed)?;
    let direction: f64 = direction.trim().parse().map_err(|_| malformed())?;
    let tolerance: f64 = tolerance.trim().parse().map_err(|_| malformed())?;

    Ok(Some(Bearing {
        direction,
        tolerance,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_string_means_no_constraints() {
        assert_eq!(parse_bearings("").unwrap(), Vec::new());
    }

    #[test]
    fn single_segment() {
        let bearings = parse_bearings("100,1").unwrap();
        assert_eq!(bearings.len(), 1);
        let bearing = bearings[0].unwrap();
        assert!((bearing.direction - 100.0).abs() < 0.1);
        assert!((bearing.tolerance - 1.0).abs() < 0.1);
    }

    #[test]
    fn empty_segments_become_unset_entries() {
        let bearings = parse_bearings(";100,1;;").unwrap();
        assert_eq!(bearings.len(), 4);
        assert_eq!(bearings[0], None);
        assert!((bearings[1].unwrap().direction - 100.0).abs() < 0.1);
        assert_eq!(bearings[2], None);
        assert_eq!(bearings[3], None);
    }

    #[test]
    fn malformed_segments_are_format_errors() {
        assert!(matches!(
            parse_bearings("100"),
            Err(NavError::Format(_))
        ));
        assert!(matches!(
            parse_bearings("north,10"),
            Err(NavError::Format(_))
        ));
        assert!(matches!(
            parse_bearings("10,1;20,oops"),
            Err(NavError::Format(_))
        ));
    }
}
