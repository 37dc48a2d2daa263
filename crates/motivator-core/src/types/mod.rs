//! Core type definitions used across the Motivator workspace.

pub mod device;
pub mod id;

pub use device::{DeviceInfo, Platform};
pub use id::*;
