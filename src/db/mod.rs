//! Persistence layer (in-process document store).

pub mod store;

pub use store::Store;
