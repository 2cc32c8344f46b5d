pub mod blog;
pub mod dictionary;
pub mod saved_item;
pub mod user;

pub use blog::*;
pub use dictionary::*;
pub use saved_item::*;
pub use user::*;
