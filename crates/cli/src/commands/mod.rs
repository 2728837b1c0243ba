//! CLI Commands

pub mod cleanup;
pub mod entity;
pub mod node;
pub mod site;
pub mod watchdog;
