pub mod logger;
pub mod workload;

pub use logger::init_logging;
pub use workload::spin;
