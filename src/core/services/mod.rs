pub mod batch_converter;
pub mod discovery_service;
