//! `.msf` file format support for `miu-rs` project.
//!
//! This module provides support for loading, rendering, and creating MSF (Miu
//! Sprite Format) v2 files: compact containers for multi-frame, multi-direction,
//! palette-indexed sprite animations with a per-pixel alpha side channel and one
//! zstd-compressed payload blob. One animation set is stored per `.msf` file.
//!
//! # File Structure
//!
//! All integers are little-endian, field order is fixed:
//!
//! ```text
//! [Magic "MSF2" (4)] [Version u16] [Flags u16]            = 8 bytes
//! [Header: canvas W/H, frameCount, dirs, fps, anchor,
//!  reserved u32]                                          = 16 bytes
//! [PixelFormat u8] [PaletteCount u16] [Reserved u8]       = 4 bytes
//! [Palette: RGBA x paletteCount]                          = paletteCount * 4 bytes
//! [Frame Table: frameCount x FrameEntry]                  = frameCount * 16 bytes
//! [Sentinel "END\0" (4) + 0u32 (4)]                       = 8 bytes
//! [Compressed Frame Data Blob]                            = remainder
//! ```
//!
//! The palette is padded with opaque black up to 256 entries on read, so any
//! index byte is always resolvable. The blob decompresses to the concatenation
//! of all frame payloads; each frame table entry carries its payload's offset
//! and length within the blob. Per-frame tight bounding boxes keep
//! fully-transparent borders out of the payload entirely.
//!
//! # Corruption Policy
//!
//! A bad magic tag or an undecompressable blob fails the whole decode. A single
//! bad frame does not: degenerate dimensions, zero length, or a payload shorter
//! than the rectangle requires degrade that frame to a fully transparent canvas
//! while the rest of the file decodes normally.
//!
//! # Usage Examples
//!
//! ## Loading and rendering an MSF file
//!
//! ```no_run
//! use miu_types::file::msf::File;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let msf = File::open("HERO_WALK.msf")?;
//!
//! println!("Total frames: {}", msf.frame_count());
//!
//! // Render frame 0 onto a fresh transparent canvas
//! if let Some(rgba) = msf.render_frame(0) {
//!     assert_eq!(
//!         rgba.len(),
//!         msf.header().canvas_width as usize * msf.header().canvas_height as usize * 4
//!     );
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Creating an MSF file from RGBA images
//!
//! ```no_run
//! use miu_types::file::msf::FileBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut builder = FileBuilder::new(64, 80);
//! builder.direction_count(8).fps(16).anchor(32, 70);
//!
//! // Canvas-sized RGBA buffers, 4 bytes per pixel
//! for rgba in load_frames() {
//!     builder.add_frame_rgba(&rgba)?;
//! }
//!
//! // Quantizes a shared palette, crops and indexes every frame
//! let msf = builder.build()?;
//! msf.save("output.msf")?;
//! # Ok(())
//! # }
//! # fn load_frames() -> Vec<Vec<u8>> { Vec::new() }
//! ```

use serde::{Deserialize, Serialize};

use crate::file::MsfError;

mod decode;
mod encode;
pub mod frame;
pub mod indexer;
pub mod palette;
pub mod quantize;

pub use frame::{Frame, FrameEntry};
pub use palette::{Color, Palette};

/// MSF file format constants.
pub mod constants {
	/// Magic bytes for `.msf` files
	pub const MAGIC: [u8; 4] = *b"MSF2";

	/// Format version written by the encoder
	pub const VERSION: u16 = 2;

	/// Flags bit 0: payload blob is zstd-compressed
	pub const FLAG_COMPRESSED: u16 = 0x0001;

	/// Structural sentinel between the frame table and the payload blob
	pub const SENTINEL: [u8; 4] = *b"END\0";

	/// Size of the fixed region before the palette
	/// (preamble 8 + header 16 + pixel-format block 4)
	pub const HEADER_SIZE: usize = 28;

	/// Size of the sentinel region (4-byte marker + reserved u32)
	pub const SENTINEL_SIZE: usize = 8;

	/// Pixel format byte: indexed color with per-pixel alpha, 2 bytes per pixel
	pub const PIXEL_FORMAT_INDEXED_ALPHA: u8 = 2;

	/// Hard cap on the decompressed blob size.
	///
	/// Large enough for any legitimate sprite sheet, small enough to bound
	/// allocation against a corrupt or adversarial length field.
	pub const MAX_DECOMPRESSED_SIZE: usize = 100_000_000;

	/// zstd compression level used by the encoder.
	///
	/// Per-asset payloads are small, so wall-clock time dominates over ratio.
	pub const ZSTD_LEVEL: i32 = 3;
}

/// Parsed MSF header metadata.
///
/// The anchor point is a signed offset consumed by renderers; the codec stores
/// it without interpretation. `version` and `flags` record what was read from
/// the preamble; the encoder always writes the current constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
	/// Format version from the preamble
	pub version: u16,
	/// Format flags from the preamble
	pub flags: u16,
	/// Canvas width in pixels, shared by every frame
	pub canvas_width: u16,
	/// Canvas height in pixels, shared by every frame
	pub canvas_height: u16,
	/// Number of facing/rotation variants sharing the frame sequence
	pub direction_count: u8,
	/// Playback rate in frames per second
	pub fps: u8,
	/// Anchor point X (signed, renderer-defined meaning)
	pub anchor_x: i16,
	/// Anchor point Y (signed, renderer-defined meaning)
	pub anchor_y: i16,
}

impl Default for Header {
	fn default() -> Self {
		Self {
			version: constants::VERSION,
			flags: constants::FLAG_COMPRESSED,
			canvas_width: 0,
			canvas_height: 0,
			direction_count: 1,
			fps: 15,
			anchor_x: 0,
			anchor_y: 0,
		}
	}
}

/// MSF file structure, representing a complete sprite animation set.
///
/// Holds the parsed header, the always-256-entry palette, and the ordered frame
/// sequence with owned payloads. Constructed wholesale by [`File::from_bytes`]
/// or assembled by [`FileBuilder`]; never mutated incrementally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
	/// Parsed header metadata
	header: Header,
	/// Shared color table, always exactly 256 entries
	palette: Palette,
	/// Ordered frame sequence
	frames: Vec<Frame>,
}

impl File {
	/// Creates an animation set from already-assembled parts.
	///
	/// Frame payloads must be pre-indexed (2 bytes per pixel); dimensions and
	/// payload lengths are validated when the file is serialized.
	pub fn new(header: Header, palette: Palette, frames: Vec<Frame>) -> Self {
		Self {
			header,
			palette,
			frames,
		}
	}

	/// Opens an MSF file from the specified path.
	///
	/// # Errors
	///
	/// Returns an error if:
	/// - The file cannot be opened or read
	/// - The magic tag does not match
	/// - The structure is truncated
	/// - The payload blob cannot be decompressed within the output cap
	pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self, MsfError> {
		let data = std::fs::read(path)?;
		Self::from_bytes(&data)
	}

	/// Loads an MSF file from a byte slice.
	///
	/// Individual corrupt frames degrade to fully transparent rather than
	/// failing the decode; see the module documentation for the policy.
	///
	/// # Errors
	///
	/// Returns an error on a bad magic tag, structural truncation, or
	/// decompression failure.
	pub fn from_bytes(data: &[u8]) -> Result<Self, MsfError> {
		decode::parse(data)
	}

	/// Loads an MSF file from any reader.
	///
	/// # Errors
	///
	/// Returns an error if the data cannot be read or the file structure is
	/// invalid.
	pub fn from_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, MsfError> {
		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;
		Self::from_bytes(&data)
	}

	/// Serializes the animation set to MSF bytes.
	///
	/// # Errors
	///
	/// Returns an error if a frame payload is shorter than its dimensions
	/// require, if the frame count exceeds the table limit, or if compression
	/// fails.
	pub fn to_bytes(&self) -> Result<Vec<u8>, MsfError> {
		encode::serialize(self)
	}

	/// Saves the MSF file to disk.
	///
	/// # Errors
	///
	/// Returns an error if serialization fails or the file cannot be written.
	pub fn save(&self, path: impl AsRef<std::path::Path>) -> Result<(), MsfError> {
		let data = self.to_bytes()?;
		std::fs::write(path, data)?;
		Ok(())
	}

	/// Returns the header metadata.
	#[inline]
	pub fn header(&self) -> &Header {
		&self.header
	}

	/// Returns the shared palette.
	#[inline]
	pub fn palette(&self) -> &Palette {
		&self.palette
	}

	/// Returns the number of frames in the set.
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.frames.len()
	}

	/// Returns a reference to a specific frame.
	#[inline]
	pub fn frame(&self, index: usize) -> Option<&Frame> {
		self.frames.get(index)
	}

	/// Returns a slice of all frames.
	#[inline]
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Returns an iterator over all frames.
	pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
		self.frames.iter()
	}

	/// Renders a frame onto a fresh, fully transparent canvas-sized RGBA buffer.
	///
	/// Frames are independent: nothing accumulates from previous frames. The
	/// frame's rectangle is pasted at its signed offset and clipped at the
	/// canvas bounds. Pixels with alpha 0 stay transparent regardless of their
	/// index byte; opaque pixels resolve through the 256-entry palette, so
	/// padded indices produce opaque black rather than transparency. Corrupt
	/// frames render as a fully transparent canvas.
	///
	/// Returns `None` if the index is out of range.
	pub fn render_frame(&self, index: usize) -> Option<Vec<u8>> {
		let frame = self.frames.get(index)?;
		Some(decode::composite(
			frame,
			&self.palette,
			self.header.canvas_width,
			self.header.canvas_height,
		))
	}

	/// Renders every frame in order; see [`File::render_frame`].
	pub fn render_frames(&self) -> Vec<Vec<u8>> {
		self.frames
			.iter()
			.map(|frame| {
				decode::composite(frame, &self.palette, self.header.canvas_width, self.header.canvas_height)
			})
			.collect()
	}
}

impl std::fmt::Display for File {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"MSF File: {}x{} canvas, {} frames, {} direction(s), {} fps",
			self.header.canvas_width,
			self.header.canvas_height,
			self.frames.len(),
			self.header.direction_count,
			self.header.fps
		)
	}
}

impl<'a> IntoIterator for &'a File {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}

/// Builder for creating MSF files from canvas-sized RGBA images.
///
/// The builder collects source frames, quantizes a shared palette (unless one
/// is supplied), crops each frame to the tight bounding box of its
/// non-transparent pixels, and indexes the cropped rectangles against the
/// palette.
///
/// # Example
///
/// ```no_run
/// use miu_types::file::msf::FileBuilder;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut builder = FileBuilder::new(32, 40);
/// builder.fps(12);
/// builder.add_frame_rgba(&vec![0u8; 32 * 40 * 4])?;
/// let msf = builder.build()?;
/// msf.save("blank.msf")?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileBuilder {
	canvas_width: u16,
	canvas_height: u16,
	direction_count: u8,
	fps: u8,
	anchor_x: i16,
	anchor_y: i16,
	max_colors: usize,
	palette: Option<Palette>,
	source_frames: Vec<Vec<u8>>,
}

impl FileBuilder {
	/// Creates a builder for an animation set with the given canvas size.
	pub fn new(canvas_width: u16, canvas_height: u16) -> Self {
		Self {
			canvas_width,
			canvas_height,
			direction_count: 1,
			fps: 15,
			anchor_x: 0,
			anchor_y: 0,
			max_colors: quantize::MAX_QUANTIZED_COLORS,
			palette: None,
			source_frames: Vec::new(),
		}
	}

	/// Sets the number of facing/rotation variants.
	pub fn direction_count(&mut self, direction_count: u8) -> &mut Self {
		self.direction_count = direction_count;
		self
	}

	/// Sets the playback rate in frames per second.
	pub fn fps(&mut self, fps: u8) -> &mut Self {
		self.fps = fps;
		self
	}

	/// Sets the anchor point.
	pub fn anchor(&mut self, anchor_x: i16, anchor_y: i16) -> &mut Self {
		self.anchor_x = anchor_x;
		self.anchor_y = anchor_y;
		self
	}

	/// Supplies a palette instead of quantizing one from the source frames.
	pub fn palette(&mut self, palette: Palette) -> &mut Self {
		self.palette = Some(palette);
		self
	}

	/// Bounds the number of quantized palette colors (clamped to 255).
	pub fn max_colors(&mut self, max_colors: usize) -> &mut Self {
		self.max_colors = max_colors;
		self
	}

	/// Adds a source frame as a canvas-sized RGBA buffer (4 bytes per pixel).
	///
	/// # Errors
	///
	/// Returns an error if the buffer length does not match the canvas
	/// dimensions.
	pub fn add_frame_rgba(&mut self, rgba: &[u8]) -> Result<&mut Self, MsfError> {
		let expected = self.canvas_width as usize * self.canvas_height as usize * 4;
		if rgba.len() != expected {
			return Err(MsfError::PayloadSizeMismatch {
				frame: self.source_frames.len(),
				width: self.canvas_width,
				height: self.canvas_height,
				expected,
				actual: rgba.len(),
			});
		}

		self.source_frames.push(rgba.to_vec());
		Ok(self)
	}

	/// Returns the number of source frames currently in the builder.
	#[inline]
	pub fn frame_count(&self) -> usize {
		self.source_frames.len()
	}

	/// Builds the animation set.
	///
	/// Quantizes the shared palette from all source frames unless one was
	/// supplied, then crops and indexes every frame.
	///
	/// # Errors
	///
	/// Returns an error if the frame count exceeds the frame table limit.
	pub fn build(self) -> Result<File, MsfError> {
		if self.source_frames.len() > u16::MAX as usize {
			return Err(MsfError::TooManyFrames(self.source_frames.len()));
		}

		let palette = match self.palette {
			Some(palette) => palette,
			None => {
				let images: Vec<&[u8]> = self.source_frames.iter().map(Vec::as_slice).collect();
				Palette::quantize(&images, self.max_colors)
			}
		};

		let frames = self
			.source_frames
			.iter()
			.map(|rgba| Frame::from_rgba(rgba, self.canvas_width, self.canvas_height, &palette))
			.collect();

		let header = Header {
			canvas_width: self.canvas_width,
			canvas_height: self.canvas_height,
			direction_count: self.direction_count,
			fps: self.fps,
			anchor_x: self.anchor_x,
			anchor_y: self.anchor_y,
			..Header::default()
		};

		Ok(File::new(header, palette, frames))
	}
}
