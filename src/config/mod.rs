mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{APP_NAME, FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{AuditConfig, DEFAULT_MAX_REPOS, OutputConfig, ScanConfig, SearchConfig};
pub use validation::validate_config_semantics;
