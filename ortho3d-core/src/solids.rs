//! Polygon fans and ready-made solids built from triangles
use crate::error::{Error, Result};
use crate::geometry::{Point3, Triangle3};
use crate::vector::Vector3;

/// Cut a polygon into triangular slices that meet at its average point.
///
/// `points` must trace the boundary in order. One triangle is produced per
/// boundary edge, wrapping from the last point back to the first. The
/// result only tiles the polygon when the points are coplanar and the
/// polygon is convex or star-shaped around the average point; this is not
/// checked.
pub fn fan_triangulate(points: &[Point3]) -> Result<Vec<Triangle3>> {
    if points.len() < 3 {
        return Err(Error::InsufficientPoints {
            given: points.len(),
        });
    }

    let hub = Vector3::mean(points.iter().map(Point3::to_vector))
        .map(Point3::from)
        .ok_or(Error::InsufficientPoints { given: 0 })?;

    Ok(points
        .iter()
        .zip(points.iter().cycle().skip(1))
        .map(|(a, b)| Triangle3::new(a, b, &hub))
        .collect())
}

/// Axis-aligned cube with corners at `(±half, ±half, ±half)`.
///
/// Each face is fanned into four triangles, giving 24 in face order.
pub fn cube(half: f64) -> Vec<Triangle3> {
    let s = half;
    let corner = |x: f64, y: f64, z: f64| Point3::new(x * s, y * s, z * s);
    let p1 = corner(1.0, 1.0, 1.0);
    let p2 = corner(-1.0, 1.0, 1.0);
    let p3 = corner(1.0, -1.0, 1.0);
    let p4 = corner(-1.0, -1.0, 1.0);
    let p5 = corner(1.0, 1.0, -1.0);
    let p6 = corner(-1.0, 1.0, -1.0);
    let p7 = corner(1.0, -1.0, -1.0);
    let p8 = corner(-1.0, -1.0, -1.0);

    let faces = [
        [&p1, &p2, &p4, &p3],
        [&p5, &p6, &p8, &p7],
        [&p1, &p5, &p7, &p3],
        [&p1, &p5, &p6, &p2],
        [&p6, &p2, &p4, &p8],
        [&p3, &p4, &p8, &p7],
    ];

    faces
        .into_iter()
        .flat_map(|face| fan_triangulate(&face.map(Point3::clone)).into_iter().flatten())
        .collect()
}

/// Regular icosahedron with edge length `2 * half`, centered on the origin.
///
/// Faces are found as the vertex triples whose sides all have the edge
/// length, giving 20 triangles.
pub fn icosahedron(half: f64) -> Vec<Triangle3> {
    let s = half;
    let phi = 0.5 * (1.0 + 5f64.sqrt());
    let vertices = [
        Point3::new(0.0, s, s * phi),
        Point3::new(0.0, -s, s * phi),
        Point3::new(0.0, s, -s * phi),
        Point3::new(0.0, -s, -s * phi),
        Point3::new(s, s * phi, 0.0),
        Point3::new(-s, s * phi, 0.0),
        Point3::new(s, -s * phi, 0.0),
        Point3::new(-s, -s * phi, 0.0),
        Point3::new(s * phi, 0.0, s),
        Point3::new(-s * phi, 0.0, s),
        Point3::new(s * phi, 0.0, -s),
        Point3::new(-s * phi, 0.0, -s),
    ];

    let is_edge = |a: &Point3, b: &Point3| {
        let d = (a.to_vector() - b.to_vector()).magnitude();
        1.99 * s < d && d < 2.01 * s
    };

    let n = vertices.len();
    let mut triangles = Vec::with_capacity(20);
    for i in 0..n {
        for j in i + 1..n {
            for k in j + 1..n {
                let (a, b, c) = (&vertices[i], &vertices[j], &vertices[k]);
                if is_edge(a, b) && is_edge(a, c) && is_edge(b, c) {
                    triangles.push(Triangle3::new(a, b, c));
                }
            }
        }
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Drawable;

    const EPS: f64 = 1e-9;

    fn unit_square() -> Vec<Point3> {
        vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(2.0, 0.0, 0.0),
            Point3::new(2.0, 2.0, 0.0),
            Point3::new(0.0, 2.0, 0.0),
        ]
    }

    #[test]
    fn test_fan_square() {
        let triangles = fan_triangulate(&unit_square()).unwrap();
        assert_eq!(triangles.len(), 4);

        let hub = Vector3::new(1.0, 1.0, 0.0);
        for tri in &triangles {
            assert!(tri.vertices().contains(&hub));
        }

        let area: f64 = triangles.iter().map(Triangle3::area).sum();
        assert!((area - 4.0).abs() < EPS);
    }

    #[test]
    fn test_fan_wraps_last_edge() {
        let square = unit_square();
        let triangles = fan_triangulate(&square).unwrap();
        let last = triangles.last().unwrap();
        assert_eq!(last.p1(), square[3]);
        assert_eq!(last.p2(), square[0]);
    }

    #[test]
    fn test_fan_needs_three_points() {
        let two = &unit_square()[..2];
        assert_eq!(
            fan_triangulate(two).unwrap_err(),
            Error::InsufficientPoints { given: 2 }
        );
        assert!(fan_triangulate(&[]).is_err());
    }

    #[test]
    fn test_fan_pentagon_makes_five() {
        let pentagon: Vec<Point3> = (0..5)
            .map(|i| {
                let a = i as f64 * std::f64::consts::TAU / 5.0;
                Point3::new(a.cos(), a.sin(), 1.0)
            })
            .collect();
        assert_eq!(fan_triangulate(&pentagon).unwrap().len(), 5);
    }

    #[test]
    fn test_cube() {
        let triangles = cube(1.0);
        assert_eq!(triangles.len(), 24);
        let area: f64 = triangles.iter().map(Triangle3::area).sum();
        assert!((area - 24.0).abs() < EPS);
        for tri in &triangles {
            let c = tri.centroid().unwrap();
            assert!(c.magnitude() <= 3f64.sqrt() + EPS);
        }
    }

    #[test]
    fn test_icosahedron() {
        let triangles = icosahedron(1.0);
        assert_eq!(triangles.len(), 20);
        let expected = 3f64.sqrt(); // equilateral with side 2
        for tri in &triangles {
            assert!((tri.area() - expected).abs() < 1e-6);
        }
    }
}
