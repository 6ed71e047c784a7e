//! Clock Adapters
//!
//! `SystemClock` lives beside the port; this module holds the test clock.

mod fixed_clock;

pub use fixed_clock::FixedClock;
