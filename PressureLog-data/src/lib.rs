// PressureLog Data
// This crate handles persistence: the key-value store and the snapshots kept in it

// Key-value store trait, backends and configuration
pub mod store;

// Typed snapshot repositories over the store
pub mod repository;

// Data storage models
pub mod models;
