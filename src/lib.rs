//! Wellcheck library exports for testing

pub mod analysis;
pub mod core;
pub mod dispatch;
pub mod scheduler;
pub mod tui;

#[cfg(test)]
pub mod test_support;
