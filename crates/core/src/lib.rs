//! Pure calendar logic for Homefront: recurrence expansion, view windows and
//! per-day lookups, plus the storage seam the CLI builds on.

pub mod calendar;
pub mod serde;
pub mod storage;
