//! Simulated biometric payments: a fake scanner, a payment flow and a
//! single-writer transaction recorder over session storage.

pub mod actors;
pub mod client;
pub mod config;
pub mod engine;
pub mod models;
pub mod scanner;
pub mod session;
pub mod storage;
pub mod types;
