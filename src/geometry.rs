// src/geometry.rs
//
// Cartesian/Frenet coordinate types and the Frenet -> Cartesian map projection.
// Units: meters for all distances, radians for all angles.

use std::fmt;

/// Planar Cartesian coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GlobalCoordinates {
    /// x axis value (m)
    pub x: f64,

    /// y axis value (m)
    pub y: f64,
}

impl GlobalCoordinates {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for GlobalCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GlobalCoordinates{{x: {:.3}, y: {:.3}}}", self.x, self.y)
    }
}

/// Road-relative curvilinear coordinates.
///
/// `dx`, `dy` form the unit normal at this point and are only meaningful on
/// map waypoints; on vehicle/object samples they are left at zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrenetCoordinates {
    /// Longitudinal position along the centerline (m)
    pub s: f64,

    /// Lateral offset from the centerline; positive grows right (m)
    pub d: f64,

    /// Unit normal x component (map waypoints only)
    pub dx: f64,

    /// Unit normal y component (map waypoints only)
    pub dy: f64,
}

impl FrenetCoordinates {
    pub fn new(s: f64, d: f64) -> Self {
        Self { s, d, dx: 0.0, dy: 0.0 }
    }

    pub fn with_normal(s: f64, d: f64, dx: f64, dy: f64) -> Self {
        Self { s, d, dx, dy }
    }
}

impl fmt::Display for FrenetCoordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FrenetCoordinates{{s: {:.3}, d: {:.3}, dx: {:.3}, dy: {:.3}}}",
            self.s, self.d, self.dx, self.dy
        )
    }
}

/// One centerline sample, paired in both frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapCoordinates {
    pub global: GlobalCoordinates,
    pub frenet: FrenetCoordinates,
}

/// Project a Frenet coordinate onto the map centerline to obtain its
/// Cartesian equivalent.
///
/// The map is assumed ordered and monotone in `s`, describing a closed loop.
/// Mirrors `TrajectoryPlanner::GetGlobalCoordinates` in the original
/// implementation: scan forward for the waypoint segment that contains `s`,
/// then offset along the segment heading and its perpendicular by `d`.
///
/// Wraps when `s` exceeds the last waypoint's `s` (closed track).
pub fn frenet_to_cartesian(frenet: &FrenetCoordinates, map: &[MapCoordinates]) -> GlobalCoordinates {
    assert!(!map.is_empty(), "frenet_to_cartesian requires a non-empty map");

    let n = map.len();
    // Largest index i such that map[i].s <= s; map is monotone non-decreasing.
    // s past the last sample leaves i at n - 1, which wraps j to 0 below.
    let mut i = 0usize;
    for (k, wp) in map.iter().enumerate() {
        if wp.frenet.s <= frenet.s {
            i = k;
        } else {
            break;
        }
    }
    let j = (i + 1) % n;

    let heading = (map[j].global.y - map[i].global.y).atan2(map[j].global.x - map[i].global.x);
    let seg_s = frenet.s - map[i].frenet.s;

    let seg_x = map[i].global.x + seg_s * heading.cos();
    let seg_y = map[i].global.y + seg_s * heading.sin();

    let perp_heading = heading - std::f64::consts::FRAC_PI_2;

    GlobalCoordinates::new(
        seg_x + frenet.d * perp_heading.cos(),
        seg_y + frenet.d * perp_heading.sin(),
    )
}

/// Rotate and translate a global point into a local frame with the given
/// origin and heading: `p' = R(-yaw) * (p - origin)`.
pub fn to_local_frame(point: GlobalCoordinates, origin: GlobalCoordinates, yaw: f64) -> GlobalCoordinates {
    let shifted = GlobalCoordinates::new(point.x - origin.x, point.y - origin.y);
    let cos_yaw = (-yaw).cos();
    let sin_yaw = (-yaw).sin();
    GlobalCoordinates::new(
        shifted.x * cos_yaw - shifted.y * sin_yaw,
        shifted.x * sin_yaw + shifted.y * cos_yaw,
    )
}

/// Inverse of [`to_local_frame`]: `p = R(yaw) * p' + origin`.
pub fn to_global_frame(point: GlobalCoordinates, origin: GlobalCoordinates, yaw: f64) -> GlobalCoordinates {
    let cos_yaw = yaw.cos();
    let sin_yaw = yaw.sin();
    GlobalCoordinates::new(
        point.x * cos_yaw - point.y * sin_yaw + origin.x,
        point.x * sin_yaw + point.y * cos_yaw + origin.y,
    )
}
