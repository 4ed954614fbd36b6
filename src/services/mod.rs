pub mod calendar_service;
pub mod pricing_service;
