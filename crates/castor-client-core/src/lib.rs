pub mod config;
pub mod error;
pub mod row;
pub mod token;
pub mod transport;

pub use config::ClientConfig;
pub use error::{codes, ApiError, ApiResult};
pub use row::Row;
pub use token::{NoToken, TokenProvider};
pub use transport::{HttpTransport, RequestSpec};
