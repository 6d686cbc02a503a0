pub mod api_utils;
pub mod config;
pub mod confirm;
pub mod date_utils;
pub mod error;
pub mod list_utils;
pub mod locale;
pub mod number_format;
pub mod request;
pub mod task;
