//! Type definitions for cds55xx

pub mod error;
pub mod range;
pub mod servo;

pub use error::{Error, Result};
pub use range::{Clamped, Position, SignedSpeed, Speed};
pub use servo::{ServoId, ServoMode};
