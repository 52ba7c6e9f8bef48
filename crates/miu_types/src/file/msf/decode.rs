//! MSF parsing, decompression, and frame composition.
//!
//! Decoding is all-or-nothing at the structural level: the header, palette,
//! frame table, and blob decompression must all succeed, or the decode fails
//! with an error. Frame payload slicing, by contrast, is best-effort — a
//! single frame with a degenerate entry or an out-of-range payload degrades to
//! fully transparent without affecting its neighbors.

use log::{debug, warn};

use crate::file::MsfError;

use super::constants;
use super::frame::{Frame, FrameEntry};
use super::palette::{Color, Palette};
use super::{File, Header};

/// Parses a complete MSF file from raw bytes.
pub(super) fn parse(data: &[u8]) -> Result<File, MsfError> {
	if data.len() < constants::HEADER_SIZE {
		return Err(MsfError::InsufficientData {
			expected: constants::HEADER_SIZE,
			actual: data.len(),
		});
	}

	// Preamble
	let magic = [data[0], data[1], data[2], data[3]];
	if magic != constants::MAGIC {
		return Err(MsfError::InvalidMagic {
			expected: constants::MAGIC,
			actual: magic,
		});
	}
	let version = u16::from_le_bytes([data[4], data[5]]);
	let flags = u16::from_le_bytes([data[6], data[7]]);

	// Header (16 bytes at offset 8)
	let canvas_width = u16::from_le_bytes([data[8], data[9]]);
	let canvas_height = u16::from_le_bytes([data[10], data[11]]);
	let frame_count = u16::from_le_bytes([data[12], data[13]]) as usize;
	let direction_count = data[14];
	let fps = data[15];
	let anchor_x = i16::from_le_bytes([data[16], data[17]]);
	let anchor_y = i16::from_le_bytes([data[18], data[19]]);
	// data[20..24]: reserved u32, skipped without validation

	// Pixel format block (4 bytes at offset 24); the bpp byte and trailing
	// reserved byte are carried for layout compatibility only
	let _pixel_format = data[24];
	let palette_count = u16::from_le_bytes([data[25], data[26]]) as usize;

	debug!(
		"MSF v{version}: {canvas_width}x{canvas_height}, {frame_count} frames, \
		 {direction_count} direction(s), {palette_count} palette entries"
	);

	// Palette: `palette_count` RGBA quadruplets, padded to 256 with opaque black
	let palette_start = constants::HEADER_SIZE;
	let frame_table_start = palette_start + palette_count * 4;
	if data.len() < frame_table_start {
		return Err(MsfError::InsufficientData {
			expected: frame_table_start,
			actual: data.len(),
		});
	}

	let mut palette = Palette::new();
	for i in 0..palette_count.min(Palette::PALETTE_SIZE) {
		let offset = palette_start + i * 4;
		palette.set(
			i as u8,
			Color::new(data[offset], data[offset + 1], data[offset + 2], data[offset + 3]),
		);
	}

	// Frame table
	let sentinel_start = frame_table_start + frame_count * FrameEntry::SIZE;
	let blob_start = sentinel_start + constants::SENTINEL_SIZE;
	if data.len() < blob_start {
		return Err(MsfError::InsufficientData {
			expected: blob_start,
			actual: data.len(),
		});
	}

	let mut entries = Vec::with_capacity(frame_count);
	for i in 0..frame_count {
		let offset = frame_table_start + i * FrameEntry::SIZE;
		entries.push(FrameEntry::new(
			i16::from_le_bytes([data[offset], data[offset + 1]]),
			i16::from_le_bytes([data[offset + 2], data[offset + 3]]),
			u16::from_le_bytes([data[offset + 4], data[offset + 5]]),
			u16::from_le_bytes([data[offset + 6], data[offset + 7]]),
			u32::from_le_bytes([
				data[offset + 8],
				data[offset + 9],
				data[offset + 10],
				data[offset + 11],
			]),
			u32::from_le_bytes([
				data[offset + 12],
				data[offset + 13],
				data[offset + 14],
				data[offset + 15],
			]),
		));
	}

	// Sentinel marker and reserved u32: read and discarded, not validated

	let blob = decompress(&data[blob_start..])?;

	// Best-effort payload slicing: a bad entry degrades, it never aborts
	let mut frames = Vec::with_capacity(frame_count);
	for (i, entry) in entries.into_iter().enumerate() {
		if entry.is_empty() {
			// Normal encoder output for a fully transparent source frame
			frames.push(Frame::from_entry(entry, Vec::new()));
			continue;
		}

		let start = entry.data_offset as usize;
		let payload = match start.checked_add(entry.data_length as usize) {
			Some(end) if end <= blob.len() => blob[start..end].to_vec(),
			_ => {
				warn!(
					"frame {i}: payload range {}+{} outside blob of {} bytes, rendering transparent",
					entry.data_offset,
					entry.data_length,
					blob.len()
				);
				Vec::new()
			}
		};

		if !payload.is_empty() && payload.len() < entry.payload_size() {
			warn!(
				"frame {i}: payload {} bytes short of the {} required for {}x{}, rendering transparent",
				payload.len(),
				entry.payload_size(),
				entry.width,
				entry.height
			);
		}

		frames.push(Frame::from_entry(entry, payload));
	}

	let header = Header {
		version,
		flags,
		canvas_width,
		canvas_height,
		direction_count,
		fps,
		anchor_x,
		anchor_y,
	};

	Ok(File {
		header,
		palette,
		frames,
	})
}

/// Decompresses the payload blob with a hard output-size cap.
fn decompress(blob: &[u8]) -> Result<Vec<u8>, MsfError> {
	zstd::bulk::decompress(blob, constants::MAX_DECOMPRESSED_SIZE).map_err(|e| {
		MsfError::DecompressionFailure {
			message: e.to_string(),
		}
	})
}

/// Renders a frame onto a fresh, fully transparent canvas-sized RGBA buffer.
///
/// The frame rectangle is pasted at its signed offset; any portion falling
/// outside the canvas is clipped. Pixels with alpha 0 stay transparent
/// regardless of their index byte. Opaque pixels always resolve: the palette
/// is fixed at 256 entries, so a padded index yields its padding color
/// (opaque black by convention), not transparency.
pub(super) fn composite(
	frame: &Frame,
	palette: &Palette,
	canvas_width: u16,
	canvas_height: u16,
) -> Vec<u8> {
	let cw = canvas_width as usize;
	let ch = canvas_height as usize;
	let mut canvas = vec![0u8; cw * ch * 4];

	if !frame.is_renderable() {
		return canvas;
	}

	let fw = frame.width() as usize;
	let fh = frame.height() as usize;
	let ox = i32::from(frame.offset_x());
	let oy = i32::from(frame.offset_y());
	let payload = frame.payload();

	for y in 0..fh {
		let cy = oy + y as i32;
		if cy < 0 || cy >= ch as i32 {
			continue;
		}

		for x in 0..fw {
			let cx = ox + x as i32;
			if cx < 0 || cx >= cw as i32 {
				continue;
			}

			let src = (y * fw + x) * 2;
			let index = payload[src];
			let alpha = payload[src + 1];
			if alpha == 0 {
				continue;
			}

			let color = palette.get(index);
			let dst = (cy as usize * cw + cx as usize) * 4;
			canvas[dst] = color.r;
			canvas[dst + 1] = color.g;
			canvas[dst + 2] = color.b;
			canvas[dst + 3] = alpha;
		}
	}

	canvas
}
