//! Command-line front end: loads rules and a metrics dataset from disk,
//! evaluates the rules and prints alerts as JSON.

pub mod commands;
pub mod config;
pub mod dataset;
pub mod rule_seed;
