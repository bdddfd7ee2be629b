pub mod config;
pub mod logging;
pub mod navigator;
pub mod replay;
pub mod runner;
pub mod scheduler;
pub mod selector;
pub mod transport;

#[cfg(test)]
mod testkit;
