pub mod data_url;
pub mod envelope;
pub mod errors;
pub mod file_name;
