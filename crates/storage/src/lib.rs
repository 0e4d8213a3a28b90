#![forbid(unsafe_code)]

mod store;

pub use store::{CartStore, StoreError};
