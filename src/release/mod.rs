pub mod config_file;
pub mod pipeline;
pub mod settings_file;
pub mod summary;
