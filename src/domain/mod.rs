pub mod attachment;
pub mod upload;
