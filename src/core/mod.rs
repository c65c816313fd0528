//! Core module - session model, filters and the lifecycle service

mod filter;
mod service;
mod types;

pub(crate) use filter::SessionFilter;
pub(crate) use service::{SessionService, Started, StopOutcome, parse_session_id};
pub(crate) use types::{ExportRow, Session, SessionView};
