pub mod environment;
pub mod env_file;
