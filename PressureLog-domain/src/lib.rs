// PressureLog Domain
// This crate contains the business logic for the PressureLog application

// Services that implement business logic
pub mod services;

// Authentication and session handling
pub mod auth;

// Domain entities
pub mod entities;

// Re-export the store module from pressure_log_data for convenience
pub use pressure_log_data::store;

// Testing utilities - available to unit tests and with the mock feature
#[cfg(any(test, feature = "mock"))]
pub mod testing;
