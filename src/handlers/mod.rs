pub mod health;
pub mod redirect;
pub mod register;

pub use health::health_handler;
pub use redirect::redirect_handler;
pub use register::{create_handler, delete_handler, list_handler};
