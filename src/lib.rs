pub mod models;
pub mod services;
pub mod storage;
pub mod store;
pub mod utils;

pub use store::AppStore;
pub use utils::AppError;
