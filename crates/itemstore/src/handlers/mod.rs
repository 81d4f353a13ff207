pub mod dispatch;
pub mod error;
pub mod items;

pub use dispatch::handle;
pub use error::ApiError;
