// Domain entities and value objects
pub mod account;
pub mod analytics;
pub mod blood_pressure;
pub mod conversions;
pub mod dependent;

// Re-export common types for easier imports
pub use account::{LoginRequest, ProfileUpdate, RegisterRequest, User};
pub use analytics::{CategoryShare, StatsSnapshot, TimeOfDay, WeekWindow, WindowAverage};
pub use blood_pressure::{BloodPressureCategory, CategoryColor, NewReading, Reading, SubjectKind};
pub use dependent::{Dependent, DependentUpdate, NewDependent};
