mod common;

use common::{API_KEY, FakeVendor};
use govee_lights_bot::{
    devices::{DeviceDirectory, GoveeClient, LightControl},
    error::AppError,
    models::{Command, Device, PowerState, Rgb},
};
use serde_json::json;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

const LAMP: &str = "63:53:D0:C9:07:3B:30:B2";

fn lamp() -> Device {
    Device::new("Lamp 1", LAMP)
}

#[tokio::test]
async fn first_success_sends_exactly_one_request() {
    let vendor = Arc::new(FakeVendor::new());
    let addr = common::serve(vendor.clone()).await;
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    assert!(client.send(&lamp(), "H6008", &Command::Turn(PowerState::On)).await);

    let requests = vendor.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].api_key.as_deref(), Some(API_KEY));
    assert_eq!(requests[0].content_type.as_deref(), Some("application/json"));
    assert_eq!(
        requests[0].body,
        json!({
            "device": LAMP,
            "model": "H6008",
            "cmd": {"name": "turn", "value": "on"}
        })
    );
}

#[tokio::test]
async fn stops_retrying_after_second_attempt_succeeds() {
    let vendor = Arc::new(FakeVendor::new().script(LAMP, &[500, 200]));
    let addr = common::serve(vendor.clone()).await;
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    assert!(client.send(&lamp(), "H6008", &Command::Color(Rgb::new(255, 0, 0))).await);
    assert_eq!(vendor.requests().len(), 2);
}

#[tokio::test]
async fn third_attempt_can_still_succeed() {
    let vendor = Arc::new(FakeVendor::new().script(LAMP, &[500, 502, 200]));
    let addr = common::serve(vendor.clone()).await;
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    assert!(client.send(&lamp(), "H6008", &Command::Turn(PowerState::Off)).await);
    assert_eq!(vendor.requests().len(), 3);
}

#[tokio::test]
async fn gives_up_after_three_attempts_with_pauses_between() {
    let vendor = Arc::new(FakeVendor::new().script(LAMP, &[500]));
    let addr = common::serve(vendor.clone()).await;
    let client = GoveeClient::new(&common::settings(addr, 500)).unwrap();

    let started = Instant::now();
    let success = client.send(&lamp(), "H6008", &Command::Turn(PowerState::On)).await;
    let elapsed = started.elapsed();

    assert!(!success);
    assert_eq!(vendor.requests().len(), 3);
    // Two pauses, none after the last attempt.
    assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
    assert!(elapsed < Duration::from_millis(1500), "{elapsed:?}");
}

#[tokio::test]
async fn non_200_success_codes_are_failures() {
    let vendor = Arc::new(FakeVendor::new().script(LAMP, &[204]));
    let addr = common::serve(vendor.clone()).await;
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    assert!(!client.send(&lamp(), "H6008", &Command::Turn(PowerState::On)).await);
    assert_eq!(vendor.requests().len(), 3);
}

#[tokio::test]
async fn unauthorized_is_not_retried() {
    let vendor = Arc::new(FakeVendor::new().script(LAMP, &[401]));
    let addr = common::serve(vendor.clone()).await;
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    assert!(!client.send(&lamp(), "H6008", &Command::Turn(PowerState::On)).await);
    assert_eq!(vendor.requests().len(), 1);
}

#[tokio::test]
async fn transport_errors_collapse_to_false() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    assert!(!client.send(&lamp(), "H6008", &Command::Turn(PowerState::On)).await);
}

#[tokio::test]
async fn lists_vendor_devices() {
    let vendor = Arc::new(FakeVendor::new());
    let addr = common::serve(vendor).await;
    let client = GoveeClient::new(&common::settings(addr, 10)).unwrap();

    let devices = client.list_devices().await.unwrap();
    let names: Vec<&str> = devices.iter().map(|d| d.device_name.as_str()).collect();
    assert_eq!(names, ["Desk Light", "Lamp 1"]);
    assert!(devices.iter().all(|d| d.controllable));
}

#[tokio::test]
async fn listing_with_bad_key_reports_rejection() {
    let vendor = Arc::new(FakeVendor::new());
    let addr = common::serve(vendor).await;
    let mut settings = common::settings(addr, 10);
    settings.api_key = "wrong".to_string();
    let client = GoveeClient::new(&settings).unwrap();

    let err = client.list_devices().await.unwrap_err();
    assert!(matches!(err, AppError::VendorRejected { status: 401, .. }));
}
