//! HTTP handlers for the askai service.

pub mod ask;
pub mod health;
pub mod models;
pub mod root;

pub use ask::ask_ai;
pub use health::health_check;
pub use models::list_models;
pub use root::{favicon, index};
