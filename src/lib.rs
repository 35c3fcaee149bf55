//! Simple to use cli that keeps you honest about coding every day.
//! Every day without GitHub activity leaves a marker in a ledger directory, and a README
//! summarizes how bad things are.
//!

pub mod activity;
pub mod cli;
pub mod config;
pub mod ledger;
pub mod report;
pub mod stats;
pub mod utils;
pub mod workflow;
