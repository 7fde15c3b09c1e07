pub mod attachment_panel;
pub mod proxy_process;
pub mod upload_form;
pub mod upload_photo;
