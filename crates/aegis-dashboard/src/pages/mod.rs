//! Page components, one per resolved path.

pub mod dashboard;
pub mod home;
pub mod login;
pub mod signup;
