pub mod classification_service;
pub mod forecast_service;
pub mod metrics_service;
pub mod projection_service;
