//! Test utilities: the headless [`Harness`] driver.

mod harness;

pub use harness::Harness;
