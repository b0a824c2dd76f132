//! screenflow-interchange: Shared interface/flow records and deserialization.
//!
//! Provides the typed records every screenflow consumer agrees on
//! (`InterfaceNode`, `FlowRecord`, `Connection`, `ScreenSpec`) and a
//! single `from_interchange()` entry point that turns an already-parsed
//! `serde_json::Value` into a `ScreenSpec`.
//!
//! The validator (screenflow-analyze) and the navigation state machine
//! (screenflow-navigate) both build their graphs from these shapes, so
//! a specification loaded once can feed both.

pub mod deserialize;
pub mod types;

pub use deserialize::{from_interchange, InterchangeError};
pub use types::*;
