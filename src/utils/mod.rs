pub mod model_utils;

pub use model_utils::{find_config_file, get_model_cache_dir, hub_cache_root, list_model_snapshots};
