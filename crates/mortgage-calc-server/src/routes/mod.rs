//! Route handlers.

pub mod calc;
pub mod health;
