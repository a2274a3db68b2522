pub mod retry;
pub mod store;

pub use retry::RetryPolicy;
pub use store::JsonFileStore;
