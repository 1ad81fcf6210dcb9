//! Study operations, with the caller passed explicitly.

mod studies;

pub use studies::StudyService;
