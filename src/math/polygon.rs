use super::Point2;

/// Computes the signed area of a closed ring (shoelace formula).
///
/// Positive for counter-clockwise, negative for clockwise.
#[must_use]
pub fn signed_area(points: &[Point2]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut sum = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        sum += points[i].x * points[j].y - points[j].x * points[i].y;
    }
    sum * 0.5
}

/// Point-in-polygon test using the winding number.
///
/// Returns `true` if the point is inside the ring.
#[must_use]
pub fn point_in_ring(point: &Point2, ring: &[Point2]) -> bool {
    ring.len() >= 3 && winding_number(point, ring) != 0
}

/// Winding number of `point` with respect to the ring.
///
/// Non-zero => inside, zero => outside.
fn winding_number(point: &Point2, ring: &[Point2]) -> i32 {
    let n = ring.len();
    let mut winding = 0i32;
    for i in 0..n {
        let a = ring[i];
        let b = ring[(i + 1) % n];
        let side = cross_2d(b.x - a.x, b.y - a.y, point.x - a.x, point.y - a.y);
        if a.y <= point.y {
            if b.y > point.y && side > 0.0 {
                winding += 1;
            }
        } else if b.y <= point.y && side < 0.0 {
            winding -= 1;
        }
    }
    winding
}

/// 2D cross product: `(ax * by - ay * bx)`.
#[inline]
fn cross_2d(ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    ax * by - ay * bx
}
