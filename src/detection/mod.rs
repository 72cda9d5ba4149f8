//! Detection module - rising-edge trigger over the sample stream

mod edge;

pub use edge::{EdgeDetector, TriggerEvent, THRESHOLD};
