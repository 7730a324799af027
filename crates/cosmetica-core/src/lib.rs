//! Cosmetica Core - Basic data structures for cosmetic image correction
//!
//! This crate provides the fundamental data structures used throughout
//! the cosmetica engine:
//!
//! - [`Pix`] / [`PixView`] / [`PixViewMut`] - Single-channel images (owned /
//!   borrowed read-only / borrowed mutable)
//! - [`Sample`] - Unsigned integer sample types (`u8`, `u16`, `u32`)
//! - [`Box`] - Rectangle regions
//! - [`ImageStats`] / [`StatsRequest`] - Global image statistics
//! - [`scratch`] - Fallible allocation of temporary buffers

pub mod box_;
pub mod error;
pub mod pix;
pub mod sample;
pub mod scratch;

pub use box_::Box;
pub use error::{Error, Result};
pub use pix::{ImageStats, Pix, PixView, PixViewMut, StatsRequest};
pub use sample::Sample;
