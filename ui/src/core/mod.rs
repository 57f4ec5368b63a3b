//! Platform-agnostic plumbing shared by the views: configuration, content
//! notifications, the event-bus bridge and request sequencing.

pub mod bridge;
pub mod config;
pub mod events;
pub mod format;
pub mod sequence;
