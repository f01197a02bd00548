pub mod config_service;
pub mod http;
pub mod paths;

pub use crate::config_service::ConfigService;
pub use crate::http::HttpPortalClient;
pub use crate::paths::PortalPaths;
