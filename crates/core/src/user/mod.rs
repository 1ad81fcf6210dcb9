mod types;

pub use types::{ParseRoleError, Profile, Role, User};
