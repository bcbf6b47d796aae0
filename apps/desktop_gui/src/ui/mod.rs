//! UI layer for the reimbursement desk: the single form screen.

pub mod app;

pub use app::{FormApp, StartupConfig};
