// Storage models, serialized as JSON snapshots
pub mod account;
pub mod blood_pressure;
pub mod dependent;

pub use account::{StoredAccount, StoredUser};
pub use blood_pressure::StoredReading;
pub use dependent::StoredDependent;
