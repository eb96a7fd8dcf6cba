//! Row types and their conversions to domain types.

pub mod lesson;
pub mod profile;
