pub mod http_relay_client;
pub mod traits;
