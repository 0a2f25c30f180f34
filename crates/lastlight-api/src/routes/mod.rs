//! Route modules.

pub mod games;
pub mod gateway;
pub mod health;

#[cfg(test)]
mod testing;
