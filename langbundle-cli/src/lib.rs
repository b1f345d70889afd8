//! CLI library for testing purposes

pub mod generate;
pub mod settings;

pub use generate::{GenerateCommand, parse_lang_files, resolve_format, run_generate, split_mode};
pub use settings::{DEFAULT_CONFIG_FILE, load_config, parse_config, resolve};
