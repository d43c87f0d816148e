// src/data_source.rs
//
// Mutable world-state snapshot, re-populated once per tick and lent by
// reference to each pipeline stage for the duration of that tick. The
// scheduling model is single-threaded with no concurrent access, so a plain
// owned struct is enough here — no `Arc<RwLock<..>>` sharing needed.

use crate::geometry::{FrenetCoordinates, GlobalCoordinates, MapCoordinates};
use crate::lanes::{classify_lane, GlobalLaneId};
use crate::vehicle::{SensorFusion, VehicleDynamics};

/// 48.5 mph expressed in m/s, the project's default speed limit.
pub const DEFAULT_SPEED_LIMIT_MPS: f64 = 48.5 * MPH_TO_MPS;

/// Exact mph -> m/s conversion factor.
pub const MPH_TO_MPS: f64 = 0.44704;

/// The world-state container queried by every pipeline stage.
///
/// All queries are total: absent data yields empty sequences and `Invalid`
/// identifiers rather than an error.
#[derive(Debug, Clone)]
pub struct DataSource {
    vehicle_dynamics: VehicleDynamics,
    map_coordinates: Vec<MapCoordinates>,
    previous_path_global: Vec<GlobalCoordinates>,
    previous_path_end: FrenetCoordinates,
    sensor_fusion: SensorFusion,
    speed_limit: f64,
}

impl Default for DataSource {
    fn default() -> Self {
        Self {
            vehicle_dynamics: VehicleDynamics::default(),
            map_coordinates: Vec::new(),
            previous_path_global: Vec::new(),
            previous_path_end: FrenetCoordinates::default(),
            sensor_fusion: SensorFusion::default(),
            speed_limit: DEFAULT_SPEED_LIMIT_MPS,
        }
    }
}

impl DataSource {
    pub fn new() -> Self {
        Self::default()
    }

    // --- setters, only ever called between ticks ---

    pub fn set_vehicle_dynamics(&mut self, vehicle_dynamics: VehicleDynamics) {
        self.vehicle_dynamics = vehicle_dynamics;
    }

    pub fn set_map_coordinates(&mut self, map_coordinates: Vec<MapCoordinates>) {
        self.map_coordinates = map_coordinates;
    }

    pub fn set_previous_path(&mut self, previous_path_global: Vec<GlobalCoordinates>) {
        self.previous_path_global = previous_path_global;
    }

    pub fn set_previous_path_end(&mut self, frenet: FrenetCoordinates) {
        self.previous_path_end = frenet;
    }

    pub fn set_sensor_fusion(&mut self, sensor_fusion: SensorFusion) {
        self.sensor_fusion = sensor_fusion;
    }

    pub fn set_speed_limit(&mut self, speed_limit: f64) {
        self.speed_limit = speed_limit;
    }

    // --- read-only queries ---

    pub fn vehicle_dynamics(&self) -> VehicleDynamics {
        self.vehicle_dynamics
    }

    pub fn map_coordinates(&self) -> &[MapCoordinates] {
        &self.map_coordinates
    }

    pub fn previous_path_global(&self) -> &[GlobalCoordinates] {
        &self.previous_path_global
    }

    pub fn previous_path_end(&self) -> FrenetCoordinates {
        self.previous_path_end
    }

    pub fn sensor_fusion(&self) -> &SensorFusion {
        &self.sensor_fusion
    }

    pub fn speed_limit(&self) -> f64 {
        self.speed_limit
    }

    /// Ego's current global lane, classified from its live Frenet position.
    pub fn global_lane_id(&self) -> GlobalLaneId {
        self.global_lane_id_of(&self.vehicle_dynamics.frenet)
    }

    /// Classify an arbitrary Frenet position's global lane.
    pub fn global_lane_id_of(&self, frenet: &FrenetCoordinates) -> GlobalLaneId {
        classify_lane(frenet)
    }
}
