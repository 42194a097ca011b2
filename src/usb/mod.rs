//! USB device subsystem - HID keyboard endpoint and report plumbing.

pub mod hid_device;
