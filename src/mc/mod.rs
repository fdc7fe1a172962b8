pub mod barrier;
pub mod config;
pub mod mc_engine;
pub mod payoffs;
pub mod stats;
