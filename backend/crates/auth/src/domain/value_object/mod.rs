//! Value Object Module

pub mod display_name;
pub mod user_handle;
pub mod user_id;
pub mod user_password;
pub mod user_role;
