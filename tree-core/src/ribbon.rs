//! Tapered outline of a branch.
//!
//! The ribbon is two copies of the path pushed apart along the stored
//! normals. The offset shrinks towards the tip, so the base of a branch is
//! its thickest part.

use glam::Vec2;

/// Half-width of the ribbon at path index `i` for a path of `n` points.
/// Zero for indices past the end.
#[inline]
pub fn thickness(i: usize, n: usize) -> f32 {
    (n.saturating_sub(i) as f32).sqrt()
}

/// Builds the closed outline of a branch.
///
/// The result holds the left boundary from base to tip followed by the
/// right boundary from tip back to base, `2 * n` points in total. If the
/// two inputs differ in length, the longer one is truncated.
pub fn ribbon_polygon(path: &[Vec2], normals: &[Vec2]) -> Vec<Vec2> {
    let n = path.len().min(normals.len());
    let mut left = Vec::with_capacity(2 * n);
    let mut right = Vec::with_capacity(n);

    for (i, (&p, &normal)) in path.iter().zip(normals).enumerate() {
        let offset = normal * thickness(i, n);
        left.push(p + offset);
        right.push(p - offset);
    }

    left.extend(right.into_iter().rev());
    left
}

/// Splits a ribbon outline into triangles.
///
/// Fill backends that only rasterize convex shapes cannot draw the outline
/// directly once a branch curls. Each path segment becomes a quad between
/// the two boundaries, emitted as two triangles of indices into `polygon`.
pub fn ribbon_triangles(polygon: &[Vec2]) -> Vec<[u32; 3]> {
    let n = polygon.len() / 2;
    if n < 2 {
        return Vec::new();
    }

    let last = (2 * n - 1) as u32;
    let mut triangles = Vec::with_capacity(2 * (n - 1));
    for i in 0..(n - 1) as u32 {
        let (l0, l1) = (i, i + 1);
        let (r0, r1) = (last - i, last - i - 1);
        triangles.push([l0, l1, r1]);
        triangles.push([l0, r1, r0]);
    }
    triangles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thickness_is_strictly_decreasing() {
        for n in 2..20 {
            assert_eq!(thickness(0, n), (n as f32).sqrt());
            for i in 1..n {
                assert!(thickness(i, n) < thickness(i - 1, n));
            }
            assert_eq!(thickness(n - 1, n), 1.0);
        }
    }

    #[test]
    fn thickness_is_zero_past_the_end() {
        assert_eq!(thickness(3, 3), 0.0);
        assert_eq!(thickness(5, 3), 0.0);
        assert_eq!(thickness(0, 0), 0.0);
    }

    #[test]
    fn polygon_of_straight_path() {
        // Path going right along +x with normals pointing down-screen (+y).
        let path = [Vec2::new(0.0, 0.0), Vec2::new(10.0, 0.0)];
        let normals = [Vec2::Y, Vec2::Y];

        let poly = ribbon_polygon(&path, &normals);
        let s2 = 2.0f32.sqrt();

        assert_eq!(
            poly,
            vec![
                Vec2::new(0.0, s2),
                Vec2::new(10.0, 1.0),
                Vec2::new(10.0, -1.0),
                Vec2::new(0.0, -s2),
            ]
        );
    }

    #[test]
    fn single_point_gives_two_point_loop() {
        let poly = ribbon_polygon(&[Vec2::new(3.0, 4.0)], &[Vec2::X]);
        assert_eq!(poly, vec![Vec2::new(4.0, 4.0), Vec2::new(2.0, 4.0)]);
    }

    #[test]
    fn empty_path_gives_empty_polygon() {
        assert!(ribbon_polygon(&[], &[]).is_empty());
    }

    #[test]
    fn mismatched_inputs_are_truncated() {
        let path = [Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)];
        let poly = ribbon_polygon(&path, &[Vec2::Y, Vec2::Y]);
        assert_eq!(poly.len(), 4);
    }

    #[test]
    fn triangles_cover_each_segment_twice() {
        let path = [Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0)];
        let normals = [Vec2::Y; 3];
        let poly = ribbon_polygon(&path, &normals);

        let tris = ribbon_triangles(&poly);
        assert_eq!(tris, vec![[0, 1, 4], [0, 4, 5], [1, 2, 3], [1, 3, 4]]);
        assert!(tris.iter().flatten().all(|&i| (i as usize) < poly.len()));
    }

    #[test]
    fn triangles_need_at_least_one_segment() {
        assert!(ribbon_triangles(&[Vec2::ZERO, Vec2::X]).is_empty());
    }
}
