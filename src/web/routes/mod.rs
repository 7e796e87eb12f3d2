pub mod target_routes;

pub use target_routes::*;
