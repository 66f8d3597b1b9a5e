// Adapters layer: concrete implementations of the domain ports.

pub mod http;
pub mod input;
pub mod notify;
pub mod page;
pub mod storage;
