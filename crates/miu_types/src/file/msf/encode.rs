//! MSF serialization and payload compression.
//!
//! The writer emits fields in exactly the order and width the reader parses —
//! this symmetry is the round-trip contract. Caller preconditions are checked
//! up front (payload length vs. dimensions, frame table capacity) so a bad
//! input fails fast instead of producing a silently corrupt file.

use crate::file::MsfError;

use super::constants;
use super::frame::FrameEntry;
use super::palette::Palette;
use super::File;

/// Serializes an animation set to MSF bytes.
pub(super) fn serialize(file: &File) -> Result<Vec<u8>, MsfError> {
	let frames = file.frames();

	if frames.len() > u16::MAX as usize {
		return Err(MsfError::TooManyFrames(frames.len()));
	}

	for (i, frame) in frames.iter().enumerate() {
		let required = frame.entry().payload_size();
		if frame.payload().len() < required {
			return Err(MsfError::PayloadSizeMismatch {
				frame: i,
				width: frame.width(),
				height: frame.height(),
				expected: required,
				actual: frame.payload().len(),
			});
		}
	}

	// Concatenate payloads; each entry's data_offset is the running sum of
	// all prior payload lengths
	let raw_size: usize = frames.iter().map(|f| f.payload().len()).sum();
	let mut raw_blob = Vec::with_capacity(raw_size);
	let mut entries: Vec<FrameEntry> = Vec::with_capacity(frames.len());
	for frame in frames {
		let mut entry = *frame.entry();
		entry.data_offset = raw_blob.len() as u32;
		entry.data_length = frame.payload().len() as u32;
		raw_blob.extend_from_slice(frame.payload());
		entries.push(entry);
	}

	let compressed_blob = zstd::bulk::compress(&raw_blob, constants::ZSTD_LEVEL)?;

	let header = file.header();
	let total_size = constants::HEADER_SIZE
		+ Palette::PALETTE_SIZE * 4
		+ entries.len() * FrameEntry::SIZE
		+ constants::SENTINEL_SIZE
		+ compressed_blob.len();
	let mut out = Vec::with_capacity(total_size);

	// Preamble
	out.extend_from_slice(&constants::MAGIC);
	out.extend_from_slice(&constants::VERSION.to_le_bytes());
	out.extend_from_slice(&constants::FLAG_COMPRESSED.to_le_bytes());

	// Header
	out.extend_from_slice(&header.canvas_width.to_le_bytes());
	out.extend_from_slice(&header.canvas_height.to_le_bytes());
	out.extend_from_slice(&(entries.len() as u16).to_le_bytes());
	out.push(header.direction_count);
	out.push(header.fps);
	out.extend_from_slice(&header.anchor_x.to_le_bytes());
	out.extend_from_slice(&header.anchor_y.to_le_bytes());
	out.extend_from_slice(&0u32.to_le_bytes()); // reserved

	// Pixel format block
	out.push(constants::PIXEL_FORMAT_INDEXED_ALPHA);
	out.extend_from_slice(&(Palette::PALETTE_SIZE as u16).to_le_bytes());
	out.push(0); // reserved

	// Palette: all 256 entries, written as supplied
	for color in file.palette().iter() {
		out.extend_from_slice(&color.to_bytes());
	}

	// Frame table
	for entry in &entries {
		out.extend_from_slice(&entry.offset_x.to_le_bytes());
		out.extend_from_slice(&entry.offset_y.to_le_bytes());
		out.extend_from_slice(&entry.width.to_le_bytes());
		out.extend_from_slice(&entry.height.to_le_bytes());
		out.extend_from_slice(&entry.data_offset.to_le_bytes());
		out.extend_from_slice(&entry.data_length.to_le_bytes());
	}

	// Sentinel
	out.extend_from_slice(&constants::SENTINEL);
	out.extend_from_slice(&0u32.to_le_bytes());

	// Compressed payload blob
	out.extend_from_slice(&compressed_blob);

	Ok(out)
}
