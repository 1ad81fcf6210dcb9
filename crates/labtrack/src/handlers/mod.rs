pub mod error;
pub mod health;
pub mod patients;
pub mod studies;
