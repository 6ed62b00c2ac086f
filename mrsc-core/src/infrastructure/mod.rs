pub mod model;
#[cfg(feature = "server")]
pub mod server;
