//! Benchmark helper utilities for miu-rs
//!
//! This module provides utilities for generating synthetic MSF animation sets so the
//! benchmarks do not depend on game assets being present on disk.

use miu_types::file::msf::{File, FileBuilder};

/// Generates a synthetic MSF file with the specified canvas size and frame count.
///
/// Each frame carries a moving opaque block over a transparent background plus a
/// translucent gradient band, which exercises tight-bbox cropping, palette
/// quantization, and the alpha side channel. The pattern is deterministic, so
/// repeated calls produce identical bytes.
pub fn generate_test_msf_data(width: u16, height: u16, frame_count: u16) -> Vec<u8> {
	build_test_animation(width, height, frame_count)
		.to_bytes()
		.expect("synthetic animation must serialize")
}

/// Builds the synthetic animation set used by [`generate_test_msf_data`].
pub fn build_test_animation(width: u16, height: u16, frame_count: u16) -> File {
	let w = width as usize;
	let h = height as usize;

	let mut builder = FileBuilder::new(width, height);
	builder.direction_count(1).fps(16);

	for frame_index in 0..frame_count as usize {
		let mut rgba = vec![0u8; w * h * 4];

		// Opaque block sweeping across the canvas
		let block = (w / 4).max(1);
		let block_x = (frame_index * 3) % w.saturating_sub(block).max(1);
		let block_y = h / 4;
		for y in block_y..(block_y + block).min(h) {
			for x in block_x..(block_x + block).min(w) {
				let idx = (y * w + x) * 4;
				rgba[idx] = (x * 7 % 256) as u8;
				rgba[idx + 1] = (y * 11 % 256) as u8;
				rgba[idx + 2] = (frame_index * 31 % 256) as u8;
				rgba[idx + 3] = 255;
			}
		}

		// Translucent gradient band near the bottom
		let band_y = h * 3 / 4;
		for y in band_y..(band_y + 2).min(h) {
			for x in 0..w {
				let idx = (y * w + x) * 4;
				rgba[idx] = (x % 256) as u8;
				rgba[idx + 1] = 64;
				rgba[idx + 2] = 192;
				rgba[idx + 3] = (1 + x % 255) as u8;
			}
		}

		builder.add_frame_rgba(&rgba).expect("canvas-sized buffer");
	}

	builder.build().expect("synthetic animation must build")
}

/// Common benchmark sizes for synthetic test data
pub mod sizes {
	/// Small character sprite: 32x40, 16 frames
	pub const SMALL: (u16, u16, u16) = (32, 40, 16);
	/// Typical character sprite: 64x80, 64 frames (8 directions x 8 frames)
	pub const MEDIUM: (u16, u16, u16) = (64, 80, 64);
	/// Large effect sheet: 280x160, 16 frames
	pub const LARGE: (u16, u16, u16) = (280, 160, 16);
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_generate_test_msf_data() {
		let data = generate_test_msf_data(32, 40, 4);

		// Check magic bytes
		assert_eq!(&data[0..4], b"MSF2");

		// The synthetic file must decode back to the same shape
		let msf = File::from_bytes(&data).unwrap();
		assert_eq!(msf.frame_count(), 4);
		assert_eq!(msf.header().canvas_width, 32);
		assert_eq!(msf.header().canvas_height, 40);
	}

	#[test]
	fn test_deterministic_output() {
		assert_eq!(generate_test_msf_data(32, 40, 2), generate_test_msf_data(32, 40, 2));
	}
}
