//! Senda - patterned event-path synthesis and path analytics
//!
//! This library generates corpora of multi-step event paths that follow
//! latent structural patterns, and recovers descriptive statistics from
//! such corpora: which full symbol sequences recur, and how long each
//! adjacent transition takes.

pub mod alphabet;
pub mod cli;
pub mod config;
pub mod csv_input;
pub mod csv_output;
pub mod error;
pub mod generator;
pub mod json_output;
pub mod model;
pub mod segment;
pub mod sequence;
