//! Frame structures for MSF animation files.
//!
//! A frame is an offset rectangle within the animation canvas plus a pixel payload
//! of 2 bytes per pixel, row-major: (palette index, alpha). The rectangle is
//! usually smaller than the canvas — encoders crop each source image to the tight
//! bounding box of its non-transparent pixels so fully-transparent borders are
//! never stored. A fully-transparent source frame becomes a width=0/height=0
//! entry with no payload at all.

use std::fmt::Display;

use super::indexer;
use super::palette::Palette;

/// Frame entry structure from the frame table.
///
/// # Structure (16 bytes, little-endian)
/// - `+0x00`: `offset_x` (i16) - rectangle X offset within the canvas (signed)
/// - `+0x02`: `offset_y` (i16) - rectangle Y offset within the canvas (signed)
/// - `+0x04`: `width` (u16) - rectangle width in pixels
/// - `+0x06`: `height` (u16) - rectangle height in pixels
/// - `+0x08`: `data_offset` (u32) - payload offset within the decompressed blob
/// - `+0x0C`: `data_length` (u32) - payload length in bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FrameEntry {
	/// Rectangle X offset within the canvas (signed)
	pub offset_x: i16,
	/// Rectangle Y offset within the canvas (signed)
	pub offset_y: i16,
	/// Rectangle width in pixels
	pub width: u16,
	/// Rectangle height in pixels
	pub height: u16,
	/// Payload offset within the decompressed blob
	pub data_offset: u32,
	/// Payload length in bytes
	pub data_length: u32,
}

impl FrameEntry {
	/// Size of a frame table entry in bytes
	pub const SIZE: usize = 16;

	/// Creates a new `FrameEntry`.
	pub fn new(
		offset_x: i16,
		offset_y: i16,
		width: u16,
		height: u16,
		data_offset: u32,
		data_length: u32,
	) -> Self {
		Self {
			offset_x,
			offset_y,
			width,
			height,
			data_offset,
			data_length,
		}
	}

	/// Returns the total number of pixels in this frame's rectangle.
	pub fn pixel_count(&self) -> usize {
		self.width as usize * self.height as usize
	}

	/// Returns the number of payload bytes the rectangle requires (2 bytes per pixel).
	pub fn payload_size(&self) -> usize {
		self.pixel_count() * 2
	}

	/// Returns true if the entry describes an empty (fully transparent) frame.
	pub fn is_empty(&self) -> bool {
		self.width == 0 || self.height == 0 || self.data_length == 0
	}
}

impl Display for FrameEntry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Frame: {}x{} at ({},{}) payload {} bytes @ 0x{:08X}",
			self.width, self.height, self.offset_x, self.offset_y, self.data_length, self.data_offset
		)
	}
}

/// A complete frame: table entry plus its owned indexed-alpha pixel payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Frame {
	/// Frame metadata
	entry: FrameEntry,
	/// Pixel payload, 2 bytes per pixel row-major: (palette index, alpha)
	payload: Vec<u8>,
}

impl Frame {
	/// Creates a new frame from a rectangle and its payload.
	///
	/// `data_offset`/`data_length` in the entry are recomputed when the file is
	/// serialized, so callers only supply the rectangle.
	pub fn new(offset_x: i16, offset_y: i16, width: u16, height: u16, payload: Vec<u8>) -> Self {
		let entry = FrameEntry::new(offset_x, offset_y, width, height, 0, payload.len() as u32);
		Self {
			entry,
			payload,
		}
	}

	/// Creates an empty (fully transparent) frame.
	pub fn empty() -> Self {
		Self::new(0, 0, 0, 0, Vec::new())
	}

	/// Creates a frame from a parsed table entry and a payload slice.
	pub(super) fn from_entry(entry: FrameEntry, payload: Vec<u8>) -> Self {
		Self {
			entry,
			payload,
		}
	}

	/// Converts a canvas-sized RGBA image into a frame.
	///
	/// The image is cropped to the tight bounding box of its non-transparent
	/// pixels, the crop offset becomes the frame offset, and the cropped pixels
	/// are indexed against the palette. A fully-transparent image produces an
	/// empty frame.
	///
	/// # Panics
	///
	/// Panics if `rgba.len()` differs from `canvas_width * canvas_height * 4`.
	pub fn from_rgba(rgba: &[u8], canvas_width: u16, canvas_height: u16, palette: &Palette) -> Self {
		let cw = canvas_width as usize;
		let ch = canvas_height as usize;
		assert_eq!(rgba.len(), cw * ch * 4, "RGBA buffer must match canvas dimensions");

		let Some((x, y, w, h)) = tight_bbox(rgba, cw, ch) else {
			return Self::empty();
		};

		let cropped = crop_rgba(rgba, cw, x, y, w, h);
		let payload = indexer::indexify(&cropped, palette);

		Self::new(x as i16, y as i16, w as u16, h as u16, payload)
	}

	/// Returns the frame entry metadata.
	pub fn entry(&self) -> &FrameEntry {
		&self.entry
	}

	/// Returns the rectangle X offset within the canvas.
	pub fn offset_x(&self) -> i16 {
		self.entry.offset_x
	}

	/// Returns the rectangle Y offset within the canvas.
	pub fn offset_y(&self) -> i16 {
		self.entry.offset_y
	}

	/// Returns the frame width in pixels.
	pub fn width(&self) -> u16 {
		self.entry.width
	}

	/// Returns the frame height in pixels.
	pub fn height(&self) -> u16 {
		self.entry.height
	}

	/// Returns a reference to the pixel payload.
	pub fn payload(&self) -> &[u8] {
		&self.payload
	}

	/// Returns true if the frame carries enough payload for its rectangle.
	///
	/// Degenerate dimensions or a payload shorter than `width * height * 2`
	/// mark the frame as non-renderable; such frames render as a fully
	/// transparent canvas.
	pub fn is_renderable(&self) -> bool {
		self.entry.width > 0
			&& self.entry.height > 0
			&& self.payload.len() >= self.entry.payload_size()
	}
}

impl Display for Frame {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.entry)
	}
}

/// Computes the tight bounding box of the non-transparent pixels of an RGBA image.
///
/// Returns `None` if every pixel is fully transparent.
fn tight_bbox(rgba: &[u8], width: usize, height: usize) -> Option<(usize, usize, usize, usize)> {
	let mut min_x = width;
	let mut min_y = height;
	let mut max_x = 0usize;
	let mut max_y = 0usize;
	let mut has_content = false;

	for y in 0..height {
		for x in 0..width {
			let alpha = rgba[(y * width + x) * 4 + 3];
			if alpha > 0 {
				has_content = true;
				min_x = min_x.min(x);
				max_x = max_x.max(x);
				min_y = min_y.min(y);
				max_y = max_y.max(y);
			}
		}
	}

	if !has_content {
		return None;
	}

	Some((min_x, min_y, max_x - min_x + 1, max_y - min_y + 1))
}

/// Extracts a rectangle from a canvas-sized RGBA buffer.
fn crop_rgba(rgba: &[u8], full_width: usize, x: usize, y: usize, w: usize, h: usize) -> Vec<u8> {
	let mut out = Vec::with_capacity(w * h * 4);
	for row in y..y + h {
		let start = (row * full_width + x) * 4;
		out.extend_from_slice(&rgba[start..start + w * 4]);
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::msf::palette::Color;

	#[test]
	fn test_tight_bbox_empty() {
		let rgba = vec![0u8; 4 * 4 * 4];
		assert_eq!(tight_bbox(&rgba, 4, 4), None);
	}

	#[test]
	fn test_tight_bbox_single_pixel() {
		let mut rgba = vec![0u8; 4 * 4 * 4];
		// Opaque red pixel at (1, 2)
		let idx = (2 * 4 + 1) * 4;
		rgba[idx] = 255;
		rgba[idx + 3] = 255;
		assert_eq!(tight_bbox(&rgba, 4, 4), Some((1, 2, 1, 1)));
	}

	#[test]
	fn test_from_rgba_crops_transparent_border() {
		let palette = Palette::from_colors(&[Color::opaque_black(), Color::rgb(255, 255, 255)]);
		let mut rgba = vec![0u8; 4 * 4 * 4];
		// Opaque white 2x2 block at (1, 1)
		for y in 1..3usize {
			for x in 1..3usize {
				let idx = (y * 4 + x) * 4;
				rgba[idx..idx + 4].copy_from_slice(&[255, 255, 255, 255]);
			}
		}

		let frame = Frame::from_rgba(&rgba, 4, 4, &palette);
		assert_eq!((frame.offset_x(), frame.offset_y()), (1, 1));
		assert_eq!((frame.width(), frame.height()), (2, 2));
		assert_eq!(frame.payload(), &[1, 255, 1, 255, 1, 255, 1, 255]);
	}

	#[test]
	fn test_from_rgba_fully_transparent() {
		let palette = Palette::new();
		let rgba = vec![0u8; 8 * 8 * 4];
		let frame = Frame::from_rgba(&rgba, 8, 8, &palette);
		assert!(frame.entry().is_empty());
		assert!(frame.payload().is_empty());
		assert!(!frame.is_renderable());
	}

	#[test]
	fn test_renderable_requires_full_payload() {
		let frame = Frame::new(0, 0, 2, 2, vec![0; 8]);
		assert!(frame.is_renderable());

		let short = Frame::new(0, 0, 2, 2, vec![0; 7]);
		assert!(!short.is_renderable());
	}
}
