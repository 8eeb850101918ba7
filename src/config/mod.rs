pub mod consts;
pub mod options;

pub use options::{AppConfig, Credentials, StoreConfig, Targets};
