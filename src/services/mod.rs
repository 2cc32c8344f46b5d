pub mod auth_service;
pub mod saved_items_service;
pub mod search_service;

pub use saved_items_service::*;
pub use search_service::*;
