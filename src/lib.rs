// lib.rs
pub mod commands;
pub mod config;
pub mod devices;
pub mod error;
pub mod interaction;
pub mod metrics;
pub mod models;
pub mod telemetry;
