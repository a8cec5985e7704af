pub mod extract;
pub mod files;
pub(crate) mod health;

pub use health::health_check;
