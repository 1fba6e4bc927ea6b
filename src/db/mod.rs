pub mod core;
mod recipient;
mod schema;

pub use self::core::Database;
