//! Platform abstraction layer
//!
//! Handles the parts of the frame loop that are the same in the browser and natively:
//! - Frame-rate limiting against the display clock

pub mod time;

pub use time::FrameLimiter;
