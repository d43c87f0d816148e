// src/lanes.rs
//
// Lane identifiers, local to ego (LaneId) and absolute (GlobalLaneId), plus
// the d-range classification shared by DataSource and LaneEvaluator.

use std::fmt;

use crate::geometry::FrenetCoordinates;

/// Lane width (m). Lanes are Left [0,4), Center [4,8), Right [8,12).
pub const LANE_WIDTH: f64 = 4.0;

/// Lane identifier local to the ego vehicle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaneId {
    Left,
    Ego,
    Right,
    Invalid,
}

impl fmt::Display for LaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LaneId::Left => "Left",
            LaneId::Ego => "Ego",
            LaneId::Right => "Right",
            LaneId::Invalid => "Invalid",
        };
        write!(f, "{name}")
    }
}

/// Lane identifier absolute to the road (0 = leftmost).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalLaneId {
    Left,
    Center,
    Right,
    Invalid,
}

impl GlobalLaneId {
    fn as_index(self) -> Option<i32> {
        match self {
            GlobalLaneId::Left => Some(0),
            GlobalLaneId::Center => Some(1),
            GlobalLaneId::Right => Some(2),
            GlobalLaneId::Invalid => None,
        }
    }

    fn from_index(index: i32) -> Self {
        match index {
            0 => GlobalLaneId::Left,
            1 => GlobalLaneId::Center,
            2 => GlobalLaneId::Right,
            _ => GlobalLaneId::Invalid,
        }
    }

    /// Offset this lane by `delta`, saturating to `Invalid` when stepping
    /// outside {0, 1, 2}. `Invalid + anything` stays `Invalid`.
    pub fn offset(self, delta: i32) -> Self {
        match self.as_index() {
            Some(idx) => Self::from_index(idx + delta),
            None => GlobalLaneId::Invalid,
        }
    }
}

impl fmt::Display for GlobalLaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GlobalLaneId::Left => "Left",
            GlobalLaneId::Center => "Center",
            GlobalLaneId::Right => "Right",
            GlobalLaneId::Invalid => "Invalid",
        };
        write!(f, "{name}")
    }
}

/// Classify a Frenet `d` value into a global lane. Bounds are strict: a point
/// exactly on a lane boundary (0, 4, 8, 12) is Invalid.
pub fn classify_lane(frenet: &FrenetCoordinates) -> GlobalLaneId {
    let d = frenet.d;
    if d > 0.0 && d < LANE_WIDTH {
        GlobalLaneId::Left
    } else if d > LANE_WIDTH && d < 2.0 * LANE_WIDTH {
        GlobalLaneId::Center
    } else if d > 2.0 * LANE_WIDTH && d < 3.0 * LANE_WIDTH {
        GlobalLaneId::Right
    } else {
        GlobalLaneId::Invalid
    }
}

/// Map a maneuver's ego-relative `LaneId` to an absolute `GlobalLaneId`,
/// given ego's current global lane.
pub fn local_to_global(ego_global: GlobalLaneId, lane_id: LaneId) -> GlobalLaneId {
    match lane_id {
        LaneId::Ego => ego_global,
        LaneId::Left => ego_global.offset(-1),
        LaneId::Right => ego_global.offset(1),
        LaneId::Invalid => GlobalLaneId::Invalid,
    }
}

/// Inverse of [`local_to_global`]: classify an absolute lane relative to ego.
pub fn global_to_local(ego_global: GlobalLaneId, global_lane_id: GlobalLaneId) -> LaneId {
    if global_lane_id == ego_global {
        LaneId::Ego
    } else if global_lane_id == ego_global.offset(-1) {
        LaneId::Left
    } else if global_lane_id == ego_global.offset(1) {
        LaneId::Right
    } else {
        LaneId::Invalid
    }
}
