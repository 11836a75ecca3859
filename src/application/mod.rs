// Application layer - Use cases over the domain
pub mod dashboard_composer;
pub mod dashboard_service;
pub mod sales_repository;
