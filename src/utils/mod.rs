pub mod checksum;
pub mod logger;
pub mod time;

pub use checksum::chain_checksum;
pub use time::elapsed_ms;
