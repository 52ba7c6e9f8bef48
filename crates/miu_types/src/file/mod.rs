//! File type support for `miu-rs` project.

mod error;

pub mod msf;

// Re-export unified error type
pub use error::MsfError;

// Re-export main file types
pub use msf::{
	File as MsfFile, FileBuilder as MsfFileBuilder, Frame as MsfFrame,
	FrameEntry as MsfFrameEntry, Header as MsfHeader, palette::Color, palette::Palette as MsfPalette,
};
