//! Completion service client
//!
//! - `types` - Request, Response, Error types
//! - `traits` - `ModelClient` trait
//! - `credentials` - bearer credential resolution
//! - `clients` - HTTP client implementations

pub mod clients;
pub mod credentials;
pub mod traits;
pub mod types;

pub use clients::{HttpClientBase, OpenAIClient, SamplingOptions};
pub use credentials::ApiKeySource;
pub use traits::ModelClient;
pub use types::{ModelError, ModelRequest, ModelResponse};
