pub mod facade;
pub mod id;

pub use facade::{Logger, create_logger, create_logger_with};
pub use id::{CORRELATION_ID_LENGTH, IdGenerator, RandomIdGenerator};
