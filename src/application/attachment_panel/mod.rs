pub mod host;
pub mod state;
pub mod use_case;
pub mod view;
