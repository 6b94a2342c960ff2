pub mod cors;
pub mod error_details;
pub mod request_id;

pub use cors::{cors_middleware, CorsConfig};
pub use error_details::error_details_middleware;
pub use request_id::request_id_middleware;
