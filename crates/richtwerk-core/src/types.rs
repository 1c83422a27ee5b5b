// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Richtwerk scan bridge.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RichtwerkError};

/// A 2D point in pixel coordinates.
pub type Point = (f32, f32);

/// The logical corners of a document, each denoted by a reserved marker ID
/// printed on the corresponding corner of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CornerRole {
    /// All four roles, in a fixed iteration order.
    pub const ALL: [CornerRole; 4] = [
        CornerRole::TopLeft,
        CornerRole::TopRight,
        CornerRole::BottomLeft,
        CornerRole::BottomRight,
    ];

    /// The reserved marker ID denoting this corner.
    pub fn marker_id(self) -> u32 {
        match self {
            CornerRole::TopLeft => 20,
            CornerRole::TopRight => 21,
            CornerRole::BottomLeft => 22,
            CornerRole::BottomRight => 23,
        }
    }

    /// Classify a marker ID against the reserved corner IDs.
    ///
    /// Returns `None` for IDs outside the reserved range — such markers are
    /// ignored by the rectification pipeline.
    pub fn from_marker_id(id: u32) -> Option<Self> {
        match id {
            20 => Some(CornerRole::TopLeft),
            21 => Some(CornerRole::TopRight),
            22 => Some(CornerRole::BottomLeft),
            23 => Some(CornerRole::BottomRight),
            _ => None,
        }
    }

    fn index(self) -> usize {
        match self {
            CornerRole::TopLeft => 0,
            CornerRole::TopRight => 1,
            CornerRole::BottomLeft => 2,
            CornerRole::BottomRight => 3,
        }
    }
}

/// A single detected fiducial marker: its decoded ID and the four corner
/// points of its outline, in the detector's winding order.
///
/// Observations are immutable and scoped to a single detection pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerObservation {
    /// Decoded marker ID.
    pub id: u32,
    /// The 4 corners bounding the marker in image coordinates.
    pub corners: [Point; 4],
}

impl MarkerObservation {
    pub fn new(id: u32, corners: [Point; 4]) -> Self {
        Self { id, corners }
    }

    /// Centroid of the marker: the arithmetic mean of its four corner
    /// points, each axis averaged independently.
    pub fn centroid(&self) -> Point {
        let (mut sx, mut sy) = (0.0f32, 0.0f32);
        for &(x, y) in &self.corners {
            sx += x;
            sy += y;
        }
        (sx / 4.0, sy / 4.0)
    }
}

/// Accumulated mapping from corner role to detected centroid.
///
/// Which roles are still missing is a first-class queryable value rather
/// than an implicit side effect of uninitialised variables. Observing the
/// same role twice overwrites the previous centroid — the last observation
/// wins, with no averaging.
#[derive(Debug, Clone, Default)]
pub struct CornerAssignment {
    corners: [Option<Point>; 4],
}

impl CornerAssignment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an assignment from a full detection pass.
    pub fn from_observations(observations: &[MarkerObservation]) -> Self {
        let mut assignment = Self::new();
        for obs in observations {
            assignment.observe(obs);
        }
        assignment
    }

    /// Record an observation. Returns the role it was classified as, or
    /// `None` if the marker ID is not one of the reserved corner IDs.
    pub fn observe(&mut self, obs: &MarkerObservation) -> Option<CornerRole> {
        let role = CornerRole::from_marker_id(obs.id)?;
        self.corners[role.index()] = Some(obs.centroid());
        Some(role)
    }

    /// The centroid recorded for a role, if that role has been observed.
    pub fn get(&self, role: CornerRole) -> Option<Point> {
        self.corners[role.index()]
    }

    /// Roles that have not yet been observed.
    pub fn missing(&self) -> Vec<CornerRole> {
        CornerRole::ALL
            .into_iter()
            .filter(|role| self.corners[role.index()].is_none())
            .collect()
    }

    /// Number of roles observed so far.
    pub fn found_count(&self) -> usize {
        self.corners.iter().filter(|c| c.is_some()).count()
    }

    /// True once all four roles have been observed.
    pub fn is_complete(&self) -> bool {
        self.corners.iter().all(|c| c.is_some())
    }

    /// The detected corner centroids in the fixed cyclic order top-left,
    /// top-right, bottom-right, bottom-left.
    ///
    /// This order matches the destination rectangle's winding and must be
    /// preserved exactly: homography point correspondence is positional,
    /// not labelled. Fails with `IncompleteCorners` if any role is missing.
    pub fn source_quad(&self) -> Result<[Point; 4]> {
        let missing = self.missing();
        if !missing.is_empty() {
            return Err(RichtwerkError::IncompleteCorners(missing));
        }
        Ok([
            self.corners[CornerRole::TopLeft.index()].unwrap(),
            self.corners[CornerRole::TopRight.index()].unwrap(),
            self.corners[CornerRole::BottomRight.index()].unwrap(),
            self.corners[CornerRole::BottomLeft.index()].unwrap(),
        ])
    }
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn square_marker(id: u32, cx: f32, cy: f32, half: f32) -> MarkerObservation {
        MarkerObservation::new(
            id,
            [
                (cx - half, cy - half),
                (cx + half, cy - half),
                (cx + half, cy + half),
                (cx - half, cy + half),
            ],
        )
    }

    /// Centroid of corners (0,0), (10,0), (10,10), (0,10) is (5,5).
    #[test]
    fn centroid_of_axis_aligned_square() {
        let obs = MarkerObservation::new(7, [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)]);
        assert_eq!(obs.centroid(), (5.0, 5.0));
    }

    /// Centroid is the plain mean even for a skewed quadrilateral.
    #[test]
    fn centroid_of_skewed_quad() {
        let obs = MarkerObservation::new(7, [(0.0, 0.0), (8.0, 2.0), (10.0, 10.0), (2.0, 8.0)]);
        assert_eq!(obs.centroid(), (5.0, 5.0));
    }

    #[test]
    fn role_mapping_round_trips() {
        for role in CornerRole::ALL {
            assert_eq!(CornerRole::from_marker_id(role.marker_id()), Some(role));
        }
        assert_eq!(CornerRole::from_marker_id(0), None);
        assert_eq!(CornerRole::from_marker_id(19), None);
        assert_eq!(CornerRole::from_marker_id(24), None);
    }

    #[test]
    fn unreserved_ids_are_ignored() {
        let mut assignment = CornerAssignment::new();
        assert_eq!(assignment.observe(&square_marker(5, 10.0, 10.0, 2.0)), None);
        assert_eq!(assignment.found_count(), 0);
        assert_eq!(assignment.missing().len(), 4);
    }

    #[test]
    fn duplicate_role_overwrites_previous_centroid() {
        let mut assignment = CornerAssignment::new();
        assignment.observe(&square_marker(20, 10.0, 10.0, 2.0));
        assignment.observe(&square_marker(20, 30.0, 40.0, 2.0));
        assert_eq!(assignment.get(CornerRole::TopLeft), Some((30.0, 40.0)));
        assert_eq!(assignment.found_count(), 1);
    }

    /// Permuting the detection order of the same four markers yields the
    /// same final assignment.
    #[test]
    fn assignment_is_order_independent() {
        let markers = [
            square_marker(20, 50.0, 50.0, 5.0),
            square_marker(21, 950.0, 50.0, 5.0),
            square_marker(22, 50.0, 950.0, 5.0),
            square_marker(23, 950.0, 950.0, 5.0),
        ];

        let forward = CornerAssignment::from_observations(&markers);
        let mut reversed_markers = markers.clone();
        reversed_markers.reverse();
        let reversed = CornerAssignment::from_observations(&reversed_markers);

        assert_eq!(forward.source_quad().unwrap(), reversed.source_quad().unwrap());
    }

    #[test]
    fn source_quad_orders_corners_cyclically() {
        let assignment = CornerAssignment::from_observations(&[
            square_marker(23, 900.0, 900.0, 5.0),
            square_marker(20, 100.0, 100.0, 5.0),
            square_marker(22, 100.0, 900.0, 5.0),
            square_marker(21, 900.0, 100.0, 5.0),
        ]);

        // TL, TR, BR, BL — not detection order.
        assert_eq!(
            assignment.source_quad().unwrap(),
            [(100.0, 100.0), (900.0, 100.0), (900.0, 900.0), (100.0, 900.0)]
        );
    }

    #[test]
    fn incomplete_assignment_reports_missing_roles() {
        let mut assignment = CornerAssignment::new();
        assignment.observe(&square_marker(20, 10.0, 10.0, 2.0));
        assignment.observe(&square_marker(23, 90.0, 90.0, 2.0));

        assert!(!assignment.is_complete());
        assert_eq!(
            assignment.missing(),
            vec![CornerRole::TopRight, CornerRole::BottomLeft]
        );

        match assignment.source_quad() {
            Err(RichtwerkError::IncompleteCorners(missing)) => {
                assert_eq!(missing, vec![CornerRole::TopRight, CornerRole::BottomLeft]);
            }
            other => panic!("expected IncompleteCorners, got {other:?}"),
        }
    }
}
