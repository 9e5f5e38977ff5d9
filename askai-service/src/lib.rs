//! askai-service: HTTP facade over Google's Generative Language API.
pub mod config;
pub mod handlers;
pub mod services;
pub mod startup;
