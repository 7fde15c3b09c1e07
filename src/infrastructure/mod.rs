pub mod relay_client;
pub mod upstream;
