// Cache Simulator Library

pub mod analysis;
pub mod controller;
pub mod models;
pub mod runner;
pub mod stats;
