//! Prelude module for `miu_types`.
//!
//! This module provides a convenient way to import commonly used types, traits, and constants.
//!
//! # Examples
//!
//! ```no_run
//! use miu_types::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let msf = MsfFile::open("CURSOR.msf")?;
//! println!("{}", msf);
//! # Ok(())
//! # }
//! ```

// File module types
#[doc(inline)]
pub use crate::file::{
	Color,

	// MSF types
	MsfError,
	MsfFile,
	MsfFileBuilder,
	MsfFrame,
	MsfFrameEntry,
	MsfHeader,
	MsfPalette,
};

// Re-export the file module for advanced usage
#[doc(inline)]
pub use crate::file;
