pub mod environment;
pub mod logging;
pub mod paths;
pub mod terminal;

pub use environment::get_scribe_dir;
pub use logging::init_logging;
pub use paths::{LATEST_SEGMENT, StorageLayout};
