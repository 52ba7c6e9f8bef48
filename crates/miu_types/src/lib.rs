//! This crate provides core data types and file format support for the `miu-rs` project.
//!
//! # File Formats
//!
//! - **MSF**: the Miu Sprite Format (v2) — a compact container for palette-indexed
//!   2D sprite animations with per-pixel alpha and a zstd-compressed payload blob
//!
//! # Examples
//!
//! Using the prelude (recommended):
//!
//! ```no_run
//! use miu_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load an animation set
//! let msf = MsfFile::open("HERO_WALK.msf")?;
//!
//! // Render every frame onto a transparent canvas
//! for rgba in msf.render_frames() {
//!     // hand the RGBA buffer to a renderer or image encoder
//!     let _ = rgba;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Or use explicit paths:
//!
//! ```no_run
//! use miu_types::file::msf::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let msf = File::open("HERO_WALK.msf")?;
//! println!("{} frames", msf.frame_count());
//! # Ok(())
//! # }
//! ```

pub mod file;

/// `use miu_types::prelude::*;` to import commonly used items.
pub mod prelude;
