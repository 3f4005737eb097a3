pub mod api_utils;
pub mod date_utils;
pub mod list_utils;
pub mod session;
pub mod telemetry;
