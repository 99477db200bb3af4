//! Monthly on-call roster generation.
//!
//! Reads a per-person availability table, staffs each day of the month with a
//! fixed sequence of greedy passes that trade preference against a fair share
//! of points, and renders the result as a day-by-person CSV grid.

pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod parser;
pub mod schedule;
pub mod web;

pub use error::{Result, ScheduleError};
