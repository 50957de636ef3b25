//! Controller layer: backend events and command orchestration around the conversion workflow.

pub mod events;
pub mod orchestration;
