//! Domain types and shared session state for the GPSR rehearsal tools.

pub mod command;
pub mod config;
pub mod error;
pub mod service;
pub mod session;

pub use command::{Category, CommandRecord};
pub use error::{GpsrError, Result};
pub use service::{CommandGenerator, Rephraser};
pub use session::{OperationGuard, SessionStore};
