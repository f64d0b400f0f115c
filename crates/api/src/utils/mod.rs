pub mod logging;

pub use logging::{error_label, init_logging};
