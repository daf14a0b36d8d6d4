//! Row models and input DTOs.

pub mod slot;
