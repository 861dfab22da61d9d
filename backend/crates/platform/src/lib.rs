//! Platform - Shared infrastructure utilities
//!
//! Security-sensitive building blocks used by the domain crates:
//! - `password`: Argon2id hashing with policy validation and zeroization
//! - `crypto`: random bytes and URL-safe base64 encoding

pub mod crypto;
pub mod password;
