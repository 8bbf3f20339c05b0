//! Background context of the extension.
//!
//! This crate owns the long-lived, UI-less side: it receives commands from
//! UI surfaces, and turns events into platform notifications that are also
//! relayed to every open surface.

mod app;
pub mod gateway;
pub mod platform;
mod runtime;
mod services;

pub use crate::app::AppContext;
pub use crate::runtime::run;
