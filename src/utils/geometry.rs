// src/utils/geometry.rs

use super::linalg::Vec3;

/// Distance between two points (Angstroms)
pub fn calculate_distance(p1: Vec3, p2: Vec3) -> f64 {
    distance_sq(p1, p2).sqrt()
}

pub fn distance_sq(p1: Vec3, p2: Vec3) -> f64 {
    let d = sub(p1, p2);
    dot(d, d)
}

/// Axis-aligned bounds of a point set, `None` when empty
pub fn bounding_box<'a, I>(points: I) -> Option<(Vec3, Vec3)>
where
    I: IntoIterator<Item = &'a Vec3>,
{
    let mut iter = points.into_iter();
    let first = *iter.next()?;
    let (mut min, mut max) = (first, first);
    for p in iter {
        for k in 0..3 {
            min[k] = min[k].min(p[k]);
            max[k] = max[k].max(p[k]);
        }
    }
    Some((min, max))
}

// --- Internal Math Helpers for [f64; 3] ---

fn sub(a: Vec3, b: Vec3) -> Vec3 {
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

fn dot(a: Vec3, b: Vec3) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
