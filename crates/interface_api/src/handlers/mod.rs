//! Request handlers

pub mod claims;
pub mod health;
pub mod model;
pub mod training;
