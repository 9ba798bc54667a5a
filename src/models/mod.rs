pub mod response;
pub mod user;

pub use response::{ApiResponse, ResponseMeta};
pub use user::{SearchResult, User};
