pub mod executor;
pub mod normalizer;
pub mod oracle;

pub use normalizer::{DriverConfig, normalize};
pub use oracle::OracleClient;
