// LRU trace generation and replay library

pub mod capacity;
pub mod cli;
pub mod discovery;
pub mod error;
pub mod generator;
pub mod logging;
pub mod models;
pub mod runner;
pub mod stats;
pub mod trace;
pub mod workload;
