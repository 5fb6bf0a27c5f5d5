//! Core form-state normalization for the barhop dashboard.
//!
//! The backend exposes event, instance, and tag payloads under several
//! competing naming and envelope conventions. This crate turns those loose
//! payloads into canonical typed records, keeps the event editor's
//! recurrence and time fields consistent, and builds the outgoing wire
//! payloads. Everything here is pure and synchronous; network calls and
//! rendering live with the callers.

pub mod calendar;
pub mod coerce;
pub mod errors;
pub mod extract;
pub mod form;
pub mod mappers;
pub mod models;
