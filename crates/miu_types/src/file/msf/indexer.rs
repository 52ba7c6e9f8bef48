//! RGBA to indexed-alpha pixel conversion.
//!
//! Every pixel of a source image maps to 2 output bytes: the nearest palette
//! index by squared Euclidean distance in RGB space, and the pixel's original
//! alpha. Fully-transparent pixels canonicalize to (0, 0) regardless of their
//! stored color, so identical sprites always produce byte-identical payloads.

use super::palette::Palette;

/// Number of pixels matched against the palette per batch.
///
/// Bounds the transient distance workspace independently of image size; the
/// total cost stays proportional to pixel count × 256 either way.
pub const BATCH_SIZE: usize = 10_000;

/// Converts an RGBA image to indexed-alpha payload bytes.
///
/// Input is 4 bytes per pixel row-major, output 2 bytes per pixel row-major:
/// (palette index, alpha). Pixels with alpha 0 emit (0, 0) unconditionally.
/// Opaque pixels select the palette entry with the minimum squared RGB
/// distance; ties go to the lowest index, which keeps the mapping
/// deterministic for identical inputs.
///
/// # Panics
///
/// Panics if `rgba.len()` is not a multiple of 4.
pub fn indexify(rgba: &[u8], palette: &Palette) -> Vec<u8> {
	assert!(rgba.len() % 4 == 0, "RGBA buffer length must be a multiple of 4");

	let mut payload = Vec::with_capacity(rgba.len() / 2);

	for batch in rgba.chunks(BATCH_SIZE * 4) {
		for pixel in batch.chunks_exact(4) {
			let (r, g, b, a) = (pixel[0], pixel[1], pixel[2], pixel[3]);

			if a == 0 {
				// Transparent pixels always target the reserved index
				payload.push(Palette::TRANSPARENT_INDEX);
				payload.push(0);
				continue;
			}

			payload.push(nearest_index(r, g, b, palette));
			payload.push(a);
		}
	}

	payload
}

/// Finds the palette index with the minimum squared RGB distance to the color.
///
/// Scans indices ascending with a strict comparison so the lowest index wins
/// on ties.
fn nearest_index(r: u8, g: u8, b: u8, palette: &Palette) -> u8 {
	let mut best_index = 0u8;
	let mut best_dist = u32::MAX;

	for (index, entry) in palette.iter_indexed() {
		let dr = i32::from(r) - i32::from(entry.r);
		let dg = i32::from(g) - i32::from(entry.g);
		let db = i32::from(b) - i32::from(entry.b);
		let dist = (dr * dr + dg * dg + db * db) as u32;

		if dist < best_dist {
			best_dist = dist;
			best_index = index;
			if dist == 0 {
				break;
			}
		}
	}

	best_index
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::file::msf::palette::Color;

	fn test_palette() -> Palette {
		Palette::from_colors(&[
			Color::opaque_black(),
			Color::rgb(255, 0, 0),
			Color::rgb(0, 255, 0),
			Color::rgb(0, 0, 255),
		])
	}

	#[test]
	fn test_transparent_canonicalizes_to_zero() {
		let palette = test_palette();
		// A transparent pixel with garbage RGB must still emit (0, 0)
		let rgba = [200, 123, 45, 0];
		assert_eq!(indexify(&rgba, &palette), vec![0, 0]);
	}

	#[test]
	fn test_nearest_match() {
		let palette = test_palette();
		let rgba = [250, 10, 10, 255, 5, 240, 5, 128];
		assert_eq!(indexify(&rgba, &palette), vec![1, 255, 2, 128]);
	}

	#[test]
	fn test_alpha_preserved() {
		let palette = test_palette();
		let rgba = [255, 0, 0, 42];
		assert_eq!(indexify(&rgba, &palette), vec![1, 42]);
	}

	#[test]
	fn test_tie_breaks_to_lowest_index() {
		// Two identical entries: the scan order must pick the first
		let palette = Palette::from_colors(&[
			Color::opaque_black(),
			Color::rgb(100, 100, 100),
			Color::rgb(100, 100, 100),
		]);
		let rgba = [100, 100, 100, 255];
		assert_eq!(indexify(&rgba, &palette), vec![1, 255]);
	}

	#[test]
	fn test_deterministic() {
		let palette = test_palette();
		let rgba: Vec<u8> = (0..64u32)
			.flat_map(|i| [(i * 7 % 256) as u8, (i * 13 % 256) as u8, (i * 29 % 256) as u8, 255])
			.collect();
		assert_eq!(indexify(&rgba, &palette), indexify(&rgba, &palette));
	}

	#[test]
	fn test_batching_does_not_change_output() {
		// An image larger than one batch must produce the same bytes as
		// pixel-by-pixel conversion of its pieces
		let palette = test_palette();
		let pixel = [250u8, 10, 10, 255];
		let rgba: Vec<u8> = pixel.iter().copied().cycle().take((BATCH_SIZE + 17) * 4).collect();

		let payload = indexify(&rgba, &palette);
		assert_eq!(payload.len(), (BATCH_SIZE + 17) * 2);
		assert!(payload.chunks_exact(2).all(|p| p == [1, 255]));
	}
}
