#![allow(dead_code)]

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, put},
};
use govee_lights_bot::config::GoveeSettings;
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

pub const API_KEY: &str = "test-key";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub api_key: Option<String>,
    pub content_type: Option<String>,
    pub body: Value,
}

/// In-process stand-in for the vendor API. Each device answers with its
/// scripted statuses in order, repeating the last one; unscripted devices
/// answer 200.
#[derive(Default)]
pub struct FakeVendor {
    requests: Mutex<Vec<Recorded>>,
    scripts: HashMap<String, Vec<u16>>,
    latency: Duration,
}

impl FakeVendor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn script(mut self, device: &str, statuses: &[u16]) -> Self {
        self.scripts.insert(device.to_string(), statuses.to_vec());
        self
    }

    pub fn latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_for(&self, device: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.body["device"] == device)
            .collect()
    }
}

async fn control(
    State(vendor): State<Arc<FakeVendor>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> StatusCode {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    let device = body["device"].as_str().unwrap_or_default().to_string();

    let seen = {
        let mut requests = vendor.requests.lock().unwrap();
        let seen = requests.iter().filter(|r| r.body["device"] == device.as_str()).count();
        requests.push(Recorded {
            api_key: header("Govee-API-Key"),
            content_type: header("content-type"),
            body,
        });
        seen
    };

    if !vendor.latency.is_zero() {
        tokio::time::sleep(vendor.latency).await;
    }

    let status = vendor
        .scripts
        .get(&device)
        .and_then(|statuses| statuses.get(seen).or(statuses.last()))
        .copied()
        .unwrap_or(200);
    StatusCode::from_u16(status).unwrap()
}

async fn list(headers: HeaderMap) -> (StatusCode, Json<Value>) {
    if headers.get("Govee-API-Key").and_then(|v| v.to_str().ok()) != Some(API_KEY) {
        return (StatusCode::UNAUTHORIZED, Json(json!({"message": "Invalid API Key"})));
    }
    (
        StatusCode::OK,
        Json(json!({
            "code": 200,
            "message": "Success",
            "data": {
                "devices": [
                    {
                        "device": "0F:3F:D0:C9:07:30:0D:18",
                        "model": "H6008",
                        "deviceName": "Desk Light",
                        "controllable": true,
                        "retrievable": true,
                        "supportCmds": ["turn", "brightness", "color", "colorTem"]
                    },
                    {
                        "device": "63:53:D0:C9:07:3B:30:B2",
                        "model": "H6008",
                        "deviceName": "Lamp 1",
                        "controllable": true,
                        "retrievable": true,
                        "supportCmds": ["turn", "color"]
                    }
                ]
            }
        })),
    )
}

pub async fn serve(vendor: Arc<FakeVendor>) -> SocketAddr {
    let app = Router::new()
        .route("/v1/devices/control", put(control))
        .route("/v1/devices", get(list))
        .with_state(vendor);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

pub fn settings(addr: SocketAddr, retry_delay_ms: u64) -> GoveeSettings {
    GoveeSettings {
        api_key: API_KEY.to_string(),
        control_url: format!("http://{addr}/v1/devices/control"),
        devices_url: format!("http://{addr}/v1/devices"),
        model: "H6008".to_string(),
        request_timeout_secs: 5,
        max_attempts: 3,
        retry_delay_ms,
    }
}
