pub mod gc2_upstream_service;
pub mod traits;
