//! Application layer: the user-triggered operations over the session store.

pub mod controller;

pub use controller::{BatchReport, ItemFailure, OperationController};
