//! Excelpoint Admin
//!
//! Operator commands for managing Excelpoint user accounts.

pub mod accounts;
pub mod cli;
pub mod config;
pub mod db;
pub mod logging;
pub mod storage;
