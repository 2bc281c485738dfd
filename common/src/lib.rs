//! Shared domain model for the PDF tools client.
//!
//! Everything in this crate is DOM-free and host-testable: the workflow
//! state machine, the staged file list, tool options, upload telemetry,
//! wire payloads for the remote processing service, and the PDF metadata
//! helpers backing thumbnail generation. The `frontend` crate instantiates
//! these types with browser handles where needed.

pub mod jobs;
pub mod model;
pub mod pdf;
pub mod requests;
