//! screenflow navigation -- a time-ordered screen transition state machine.
//!
//! The `Navigator` consumes the same interface/flow records as the
//! validator, builds its own screen network, and drives each
//! `navigate_to_screen` call through start, commit and highlight-clear
//! phases on a virtual clock. Business-logic steps narrating the
//! transition arrive one at a time at staggered offsets.
//!
//! Observation is explicit: read-only accessors, owned snapshots, and
//! per-navigator event subscriptions. Nothing is global.

pub mod bounded;
pub mod business_logic;
pub mod classify;
pub mod config;
#[cfg(feature = "realtime")]
pub mod driver;
pub mod events;
pub mod navigator;
pub mod scheduler;
pub mod state;

pub use bounded::BoundedHistory;
pub use business_logic::{
    BusinessLogicStep, BusinessLogicTable, StepTemplate, TransitionRef, GENERIC_STEP_NAME,
};
pub use classify::{classify_screen, ScreenCategory};
pub use config::{ConfigError, NavigatorConfig};
#[cfg(feature = "realtime")]
pub use driver::drive_until_idle;
pub use events::NavigationEvent;
pub use navigator::{Navigator, SubscriptionId};
pub use scheduler::Scheduler;
pub use state::{
    ActionDescriptor, ActionKind, ActiveEffect, LitPath, NavigationSnapshot, NavigationState,
    PathEffect,
};
