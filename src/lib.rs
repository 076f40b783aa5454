pub mod api;
pub mod config;
pub mod image;
pub mod request;
pub mod search;
pub mod server;
#[doc(hidden)]
pub mod test_support;
pub use dotenv::dotenv;
