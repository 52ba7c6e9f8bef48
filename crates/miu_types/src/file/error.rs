//! Error types for file format parsing and manipulation.

use thiserror::Error;

/// Errors that can occur when parsing or building MSF files
#[derive(Debug, Error)]
pub enum MsfError {
	/// Not enough data to parse
	#[error("Insufficient data: expected {expected} bytes, got {actual} bytes")]
	InsufficientData {
		/// Expected number of bytes
		expected: usize,
		/// Actual number of bytes
		actual: usize,
	},

	/// Invalid magic number
	#[error("Invalid magic number: expected {expected:02X?}, got {actual:02X?}")]
	InvalidMagic {
		/// Expected magic bytes
		expected: [u8; 4],
		/// Magic bytes found in the file
		actual: [u8; 4],
	},

	/// The compressed payload blob could not be decompressed, or its
	/// decompressed size would exceed the output cap
	#[error("Decompression failed: {message}")]
	DecompressionFailure {
		/// Reason reported by the compression codec
		message: String,
	},

	/// A frame payload is shorter than its dimensions require
	#[error(
		"Frame {frame} payload too short: {width}x{height} pixels require {expected} bytes, got {actual}"
	)]
	PayloadSizeMismatch {
		/// Frame index (0-based)
		frame: usize,
		/// Frame width in pixels
		width: u16,
		/// Frame height in pixels
		height: u16,
		/// Number of bytes required
		expected: usize,
		/// Number of bytes available
		actual: usize,
	},

	/// More frames than the u16 frame table can describe
	#[error("Frame count {0} exceeds the frame table limit of 65535")]
	TooManyFrames(usize),

	/// IO error
	#[error(transparent)]
	IOError(#[from] std::io::Error),
}
