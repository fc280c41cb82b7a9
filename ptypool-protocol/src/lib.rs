//! ptypool-protocol: Shared definitions for the ptypool dispatch surface
//!
//! This crate defines the request and completion types exchanged between an
//! IO-dispatch framework and the endpoint pool, plus the control codes
//! accepted by master endpoints.

pub mod messages;
pub mod types;

// Re-export main types at crate root
pub use messages::{Completion, Request, Status};
pub use types::{ControlCode, EndpointKind};
