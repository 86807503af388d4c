pub mod http;
pub mod traits;
pub mod types;

pub use http::HttpEstateApi;
pub use traits::EstateApi;
pub use types::LoginReply;
