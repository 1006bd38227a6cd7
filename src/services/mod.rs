pub mod content;
pub mod errors;
pub mod machines;
pub mod migration;
pub mod storage;

pub use errors::{ServiceError, ServiceResult};
