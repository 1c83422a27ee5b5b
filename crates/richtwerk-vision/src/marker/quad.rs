// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral extraction from traced contours: convex hull plus vertex
// decimation down to the four dominant corners.

use richtwerk_core::types::Point;

/// Signed area of a polygon via the shoelace formula. Positive for vertices
/// listed clockwise in image coordinates (y pointing down).
pub(crate) fn signed_area(polygon: &[Point]) -> f32 {
    let n = polygon.len();
    let mut area = 0.0f32;
    for i in 0..n {
        let j = (i + 1) % n;
        area += polygon[i].0 * polygon[j].1;
        area -= polygon[j].0 * polygon[i].1;
    }
    area / 2.0
}

fn cross(o: Point, a: Point, b: Point) -> f32 {
    (a.0 - o.0) * (b.1 - o.1) - (a.1 - o.1) * (b.0 - o.0)
}

fn triangle_area(a: Point, b: Point, c: Point) -> f32 {
    cross(a, b, c).abs() / 2.0
}

/// Convex hull of a point set (monotone chain). Collinear points along hull
/// edges are dropped.
pub(crate) fn convex_hull(points: &[Point]) -> Vec<Point> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| {
        a.0.partial_cmp(&b.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    });
    sorted.dedup();

    // Monotone chain: lower hull left-to-right, upper hull right-to-left.
    let mut lower: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in &sorted {
        while lower.len() >= 2 && cross(lower[lower.len() - 2], lower[lower.len() - 1], p) <= 0.0 {
            lower.pop();
        }
        lower.push(p);
    }

    let mut upper: Vec<Point> = Vec::with_capacity(sorted.len());
    for &p in sorted.iter().rev() {
        while upper.len() >= 2 && cross(upper[upper.len() - 2], upper[upper.len() - 1], p) <= 0.0 {
            upper.pop();
        }
        upper.push(p);
    }

    // Chain endpoints repeat.
    lower.pop();
    upper.pop();
    lower.extend(upper);
    lower
}

/// Reduce a convex polygon to its four dominant corners by repeatedly
/// removing the vertex whose removal loses the least area.
///
/// Rasterised quad outlines come back from the hull with a handful of
/// near-collinear vertices hugging each true corner; those contribute tiny
/// triangles and get decimated first. Returns the corners ordered clockwise
/// in image coordinates. `None` if the input has fewer than four vertices.
pub(crate) fn reduce_to_quad(hull: &[Point]) -> Option<[Point; 4]> {
    if hull.len() < 4 {
        return None;
    }

    let mut polygon = hull.to_vec();
    while polygon.len() > 4 {
        let n = polygon.len();
        let mut smallest = f32::MAX;
        let mut victim = 0usize;
        for i in 0..n {
            let prev = polygon[(i + n - 1) % n];
            let next = polygon[(i + 1) % n];
            let lost = triangle_area(prev, polygon[i], next);
            if lost < smallest {
                smallest = lost;
                victim = i;
            }
        }
        polygon.remove(victim);
    }

    if signed_area(&polygon) < 0.0 {
        polygon.reverse();
    }
    Some([polygon[0], polygon[1], polygon[2], polygon[3]])
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_area_is_positive_for_clockwise_screen_winding() {
        // Right, down, left, up — clockwise on screen (y down).
        let quad = [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)];
        assert!(signed_area(&quad) > 0.0);
        let mut reversed = quad;
        reversed.reverse();
        assert!(signed_area(&reversed) < 0.0);
    }

    #[test]
    fn hull_of_square_with_interior_points() {
        let mut points = vec![
            (0.0, 0.0),
            (10.0, 0.0),
            (10.0, 10.0),
            (0.0, 10.0),
            (5.0, 5.0),
            (2.0, 7.0),
        ];
        points.push((5.0, 0.0)); // Collinear edge point.
        let hull = convex_hull(&points);
        assert_eq!(hull.len(), 4);
        for corner in [(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0)] {
            assert!(hull.contains(&corner), "missing {corner:?}");
        }
    }

    #[test]
    fn reduce_keeps_the_dominant_corners() {
        // A square outline with rasterisation-style nubs near two corners.
        let noisy = vec![
            (0.0, 0.0),
            (1.0, 0.0), // nub
            (20.0, 0.0),
            (20.0, 19.0), // nub
            (20.0, 20.0),
            (0.0, 20.0),
        ];
        let quad = reduce_to_quad(&noisy).unwrap();
        let mut got: Vec<_> = quad.to_vec();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            got,
            vec![(0.0, 0.0), (0.0, 20.0), (20.0, 0.0), (20.0, 20.0)]
        );
    }

    #[test]
    fn reduce_normalises_to_clockwise() {
        let counter_clockwise = vec![(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0)];
        let quad = reduce_to_quad(&counter_clockwise).unwrap();
        assert!(signed_area(&quad) > 0.0);
    }

    #[test]
    fn reduce_rejects_degenerate_input() {
        assert!(reduce_to_quad(&[(0.0, 0.0), (5.0, 5.0), (9.0, 0.0)]).is_none());
    }

    #[test]
    fn reduce_handles_rotated_squares() {
        // A diamond (square rotated 45 degrees) with midpoint noise.
        let points = vec![
            (10.0, 0.0),
            (20.0, 10.0),
            (15.5, 15.0), // near-edge noise
            (10.0, 20.0),
            (0.0, 10.0),
        ];
        let hull = convex_hull(&points);
        let quad = reduce_to_quad(&hull).unwrap();
        let mut got: Vec<_> = quad.to_vec();
        got.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            got,
            vec![(0.0, 10.0), (10.0, 0.0), (10.0, 20.0), (20.0, 10.0)]
        );
    }
}
