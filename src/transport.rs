// src/transport.rs
//
// The telemetry/plan transport: an axum WebSocket route speaking the
// Socket.IO-style `"42[...]"` envelope the host simulator uses. One inbound
// `telemetry` event drives exactly one pipeline tick; the reply is a
// `control`-tagged plan message carrying the newly selected trajectory's
// waypoints.
//
// Unit conversions happen exactly once, here, at the boundary: `yaw`
// degrees -> radians, `speed` mph -> m/s.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::data_source::{DataSource, MPH_TO_MPS};
use crate::geometry::{FrenetCoordinates, GlobalCoordinates};
use crate::pipeline::MotionPlanner;
use crate::scheduler::TickTimer;
use crate::vehicle::{ObjectFusion, SensorFusion, VehicleDynamics};

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("message carried no Socket.IO-style JSON envelope")]
    MissingEnvelope,
    #[error("envelope was not a [event, payload] array")]
    MalformedEnvelope,
    #[error("envelope event was not a string")]
    MissingEvent,
    #[error("failed to parse telemetry payload: {0}")]
    Payload(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("websocket error: {0}")]
    WebSocket(#[from] axum::Error),
}

/// Degrees-in; angles and speed are converted at the call site below.
#[derive(Debug, Deserialize)]
struct TelemetryPayload {
    x: f64,
    y: f64,
    s: f64,
    d: f64,
    yaw: f64,
    speed: f64,
    previous_path_x: Vec<f64>,
    previous_path_y: Vec<f64>,
    end_path_s: f64,
    end_path_d: f64,
    #[serde(default)]
    sensor_fusion: Vec<[f64; 7]>,
}

#[derive(Debug, Serialize)]
struct PlanPayload {
    next_x: Vec<f64>,
    next_y: Vec<f64>,
}

/// Decode a `"42[\"event\",{...}]"`-style frame into `(event, payload)`.
/// The numeric Socket.IO packet-type prefix (`"42"`) is honored when present
/// and otherwise ignored — only the bracketed array matters.
fn decode_envelope(text: &str) -> Result<(String, Value), TelemetryError> {
    let start = text.find('[').ok_or(TelemetryError::MissingEnvelope)?;
    let array: Value = serde_json::from_str(&text[start..])?;
    let array = array.as_array().ok_or(TelemetryError::MalformedEnvelope)?;
    let event = array.first().and_then(Value::as_str).ok_or(TelemetryError::MissingEvent)?.to_string();
    let payload = array.get(1).cloned().unwrap_or(Value::Null);
    Ok((event, payload))
}

fn encode_envelope(event: &str, payload: &impl Serialize) -> String {
    let payload = serde_json::to_value(payload).expect("plan payload is always representable as JSON");
    format!("42{}", Value::Array(vec![Value::String(event.to_string()), payload]))
}

/// Apply one telemetry payload onto `data_source`, converting units exactly
/// once at this boundary.
fn apply_telemetry(data_source: &mut DataSource, telemetry: TelemetryPayload) {
    let yaw_radians = telemetry.yaw.to_radians();
    let speed_mps = telemetry.speed * MPH_TO_MPS;

    data_source.set_vehicle_dynamics(VehicleDynamics {
        velocity: speed_mps,
        global: GlobalCoordinates::new(telemetry.x, telemetry.y),
        frenet: FrenetCoordinates::new(telemetry.s, telemetry.d),
        yaw: yaw_radians,
    });

    let previous_path: Vec<GlobalCoordinates> = telemetry
        .previous_path_x
        .iter()
        .zip(telemetry.previous_path_y.iter())
        .map(|(&x, &y)| GlobalCoordinates::new(x, y))
        .collect();
    data_source.set_previous_path(previous_path);
    data_source.set_previous_path_end(FrenetCoordinates::new(telemetry.end_path_s, telemetry.end_path_d));

    let objs = telemetry
        .sensor_fusion
        .iter()
        .map(|[id, x, y, vx, vy, s, d]| {
            ObjectFusion::new(*id as i32, GlobalCoordinates::new(*x, *y), (*vx, *vy), FrenetCoordinates::new(*s, *d))
        })
        .collect();
    data_source.set_sensor_fusion(SensorFusion::new(objs));
}

#[derive(Clone)]
pub struct AppState {
    pub map_waypoints: std::sync::Arc<Vec<crate::geometry::MapCoordinates>>,
    pub speed_limit_mps: f64,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/", get(ws_handler)).with_state(state)
}

async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_connection(socket, state))
}

/// One simulator session: its own `DataSource`/`MotionPlanner`, ticking once
/// per inbound `telemetry` event, single-threaded and synchronous per tick;
/// nothing here is shared across connections.
async fn handle_connection(mut socket: WebSocket, state: AppState) {
    tracing::info!("simulator connected");

    let mut data_source = DataSource::new();
    data_source.set_map_coordinates((*state.map_waypoints).clone());
    data_source.set_speed_limit(state.speed_limit_mps);
    let mut planner = MotionPlanner::new();

    while let Some(message) = socket.recv().await {
        let message = match message {
            Ok(message) => message,
            Err(error) => {
                tracing::warn!(%error, "websocket read failed, dropping tick");
                continue;
            }
        };

        let Message::Text(text) = message else { continue };

        if let Err(error) = handle_text_message(&text, &mut data_source, &mut planner, &mut socket).await {
            // Transient telemetry errors are logged and dropped: DataSource
            // keeps its previous values, the actuator continues on the
            // previous plan.
            tracing::warn!(%error, "dropping malformed telemetry message");
        }
    }

    tracing::info!("simulator disconnected");
}

async fn handle_text_message(
    text: &str,
    data_source: &mut DataSource,
    planner: &mut MotionPlanner,
    socket: &mut WebSocket,
) -> Result<(), TelemetryError> {
    let (event, payload) = decode_envelope(text)?;
    if event != "telemetry" {
        return Ok(());
    }

    let telemetry: TelemetryPayload = serde_json::from_value(payload)?;
    apply_telemetry(data_source, telemetry);

    let timer = TickTimer::start();
    let selected = planner.generate_trajectory(data_source);
    timer.stop();

    let plan = PlanPayload {
        next_x: selected.waypoints.iter().map(|p| p.x).collect(),
        next_y: selected.waypoints.iter().map(|p| p.y).collect(),
    };
    let frame = encode_envelope("control", &plan);
    if let Err(error) = socket.send(Message::Text(frame.into())).await {
        tracing::warn!(%error, "failed to send plan message");
    }

    Ok(())
}
