//! MQTT topic the aircon controller subscribes to.
//!
//! The device listens on a single topic; every command code goes there.

/// Control topic for the ESP32 aircon controller.
pub const AIRCON_CONTROL: &str = "esp32/aircon";
