// src/velocity_planner.rs
//
// Regulates target speed against a leader vehicle with bounded jerk-free
// acceleration/deceleration, mirroring `VelocityPlanner` in the original
// implementation. Held state (`target_velocity`) persists across ticks;
// `calculate_target_velocity` must be called once per tick before reading it.

use crate::data_source::DataSource;
use crate::lanes::{classify_lane, LaneId};

/// Tick rate the whole pipeline is driven at (Hz).
pub const FREQUENCY_HZ: f64 = 50.0;

/// Jerk-free acceleration rate (m/s^2).
pub const ACCELERATION: f64 = 5.0;

/// Jerk-free deceleration rate (m/s^2), applied as a negative step.
pub const DECELERATION: f64 = -5.0;

/// Actuator step period the previous path was sampled at (s).
pub const ACTUATOR_DT: f64 = 0.02;

/// Distance within which a leader is considered "near" (m).
pub const FAR_DISTANCE_THRESHOLD: f64 = 30.0;

pub struct VelocityPlanner {
    target_velocity: f64,
}

impl VelocityPlanner {
    /// Construct with `target_velocity = 0`.
    pub fn new() -> Self {
        Self { target_velocity: 0.0 }
    }

    /// Construct with a caller-supplied seed (e.g. resuming from the previous
    /// tick's value).
    pub fn with_seed(target_velocity: f64) -> Self {
        Self { target_velocity }
    }

    pub fn target_velocity(&self) -> f64 {
        self.target_velocity
    }

    /// Step `target_velocity` by one tick's worth of acceleration or
    /// deceleration, depending on whether a closest-in-path leader exists
    /// within `FAR_DISTANCE_THRESHOLD`, then clamp to `[0, speed_limit]`.
    pub fn calculate_target_velocity(&mut self, data_source: &DataSource) {
        let speed_limit = data_source.speed_limit();
        let step = if self.has_closest_in_path_leader(data_source) {
            DECELERATION / FREQUENCY_HZ
        } else {
            ACCELERATION / FREQUENCY_HZ
        };

        self.target_velocity = (self.target_velocity + step).clamp(0.0, speed_limit);
    }

    /// An object is a "closest-in-path leader" if, under constant-velocity
    /// prediction to the end of the previous path, it ends up ahead of ego
    /// and within `FAR_DISTANCE_THRESHOLD`, in ego's current lane.
    fn has_closest_in_path_leader(&self, data_source: &DataSource) -> bool {
        let vehicle = data_source.vehicle_dynamics();
        let previous_path_len = data_source.previous_path_global().len();
        let ego_global_lane = data_source.global_lane_id();

        let ego_s_predicted = vehicle.frenet.s + (previous_path_len as f64) * ACTUATOR_DT * vehicle.velocity;

        data_source.sensor_fusion().objs.iter().any(|obj| {
            let obj_global_lane = classify_lane(&obj.frenet);
            if crate::lanes::global_to_local(ego_global_lane, obj_global_lane) != LaneId::Ego {
                return false;
            }
            let obj_s_predicted = obj.frenet.s + (previous_path_len as f64) * ACTUATOR_DT * obj.velocity;
            obj_s_predicted > ego_s_predicted && (obj_s_predicted - ego_s_predicted) < FAR_DISTANCE_THRESHOLD
        })
    }
}

impl Default for VelocityPlanner {
    fn default() -> Self {
        Self::new()
    }
}
