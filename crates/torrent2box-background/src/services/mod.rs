//! Handlers for commands sent by UI surfaces.

pub mod notify_service;
pub mod options_service;
