pub mod cashflow;
pub mod forecast;
pub mod investment;
pub mod metrics;
pub mod platform;
pub mod portfolio;
pub mod scenario;
pub mod transaction;
