//! Shared palette construction by median-cut quantization.
//!
//! All input images contribute to one joint pixel population; alpha is discarded
//! for clustering. The population is recursively split along the channel with the
//! largest spread until the requested color count is reached, and each bucket is
//! represented by its mean color. Index 0 of the result is the reserved sentinel
//! (0, 0, 0, fully opaque), the stable target for transparent pixels; the
//! remaining entries are padded with opaque black up to 256.

use super::palette::{Color, Palette};

/// Largest number of quantized colors a palette can hold next to the reserved
/// sentinel entry.
pub const MAX_QUANTIZED_COLORS: usize = 255;

impl Palette {
	/// Builds a shared palette from a batch of RGBA images.
	///
	/// `images` are raw RGBA buffers (4 bytes per pixel); every pixel of every
	/// image participates in clustering. `max_colors` bounds the quantized
	/// colors and is clamped to 255 so the sentinel always fits. Empty input
	/// and fully-transparent images degrade to an all-black palette.
	///
	/// The returned palette always holds exactly 256 entries with
	/// (0, 0, 0, 255) at index 0.
	pub fn quantize(images: &[&[u8]], max_colors: usize) -> Self {
		let max_colors = max_colors.clamp(1, MAX_QUANTIZED_COLORS);

		let mut pixels: Vec<[u8; 3]> = Vec::new();
		for image in images {
			pixels.reserve(image.len() / 4);
			for pixel in image.chunks_exact(4) {
				pixels.push([pixel[0], pixel[1], pixel[2]]);
			}
		}

		let mut colors = Vec::with_capacity(max_colors + 1);
		colors.push(Color::opaque_black());
		colors.extend(median_cut(pixels, max_colors));
		colors.truncate(Self::PALETTE_SIZE);

		Self::from_colors(&colors)
	}
}

/// Recursively splits the pixel population into at most `max_colors` buckets
/// and returns the mean color of each bucket.
fn median_cut(pixels: Vec<[u8; 3]>, max_colors: usize) -> Vec<Color> {
	if pixels.is_empty() {
		return Vec::new();
	}

	let mut buckets = vec![pixels];

	while buckets.len() < max_colors {
		// Pick the bucket with the widest channel spread
		let Some((bucket_index, channel)) = widest_bucket(&buckets) else {
			break;
		};

		let mut bucket = buckets.swap_remove(bucket_index);
		bucket.sort_unstable_by_key(|p| p[channel]);
		let upper = bucket.split_off(bucket.len() / 2);
		buckets.push(bucket);
		buckets.push(upper);
	}

	buckets.iter().map(|bucket| mean_color(bucket)).collect()
}

/// Finds the bucket and channel with the largest value range.
///
/// Returns `None` when no bucket can be split further (all buckets are
/// single-color or single-pixel).
fn widest_bucket(buckets: &[Vec<[u8; 3]>]) -> Option<(usize, usize)> {
	let mut best: Option<(usize, usize)> = None;
	let mut best_range = 0u8;

	for (bucket_index, bucket) in buckets.iter().enumerate() {
		if bucket.len() < 2 {
			continue;
		}

		for channel in 0..3 {
			let mut min = u8::MAX;
			let mut max = u8::MIN;
			for pixel in bucket {
				min = min.min(pixel[channel]);
				max = max.max(pixel[channel]);
			}
			let range = max - min;
			if range > best_range {
				best_range = range;
				best = Some((bucket_index, channel));
			}
		}
	}

	best
}

/// Returns the mean color of a bucket, fully opaque.
fn mean_color(bucket: &[[u8; 3]]) -> Color {
	if bucket.is_empty() {
		return Color::opaque_black();
	}

	let mut sums = [0u64; 3];
	for pixel in bucket {
		for channel in 0..3 {
			sums[channel] += u64::from(pixel[channel]);
		}
	}

	let count = bucket.len() as u64;
	Color::rgb(
		((sums[0] + count / 2) / count) as u8,
		((sums[1] + count / 2) / count) as u8,
		((sums[2] + count / 2) / count) as u8,
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_shape_and_sentinel() {
		let image = vec![128u8; 8 * 8 * 4];
		let palette = Palette::quantize(&[&image], 255);
		assert_eq!(palette.colors().len(), 256);
		assert_eq!(palette.get(0), Color::rgb(0, 0, 0));
		assert_eq!(palette.get(0).a, 255);
	}

	#[test]
	fn test_empty_input_degrades_to_black() {
		let palette = Palette::quantize(&[], 255);
		assert!(palette.iter().all(|c| *c == Color::opaque_black()));
	}

	#[test]
	fn test_single_color_population() {
		let image: Vec<u8> = [10u8, 20, 30, 255].iter().copied().cycle().take(16 * 4).collect();
		let palette = Palette::quantize(&[&image], 255);
		assert_eq!(palette.get(1), Color::rgb(10, 20, 30));
		// Only one bucket can form, so the rest is padding
		assert_eq!(palette.get(2), Color::opaque_black());
	}

	#[test]
	fn test_two_color_population_splits() {
		let red: Vec<u8> = [255u8, 0, 0, 255].iter().copied().cycle().take(8 * 4).collect();
		let blue: Vec<u8> = [0u8, 0, 255, 255].iter().copied().cycle().take(8 * 4).collect();
		let palette = Palette::quantize(&[&red, &blue], 255);

		let quantized = [palette.get(1), palette.get(2)];
		assert!(quantized.contains(&Color::rgb(255, 0, 0)));
		assert!(quantized.contains(&Color::rgb(0, 0, 255)));
	}

	#[test]
	fn test_max_colors_bound() {
		// A gradient with more distinct colors than allowed
		let image: Vec<u8> = (0..=255u16).flat_map(|v| [v as u8, 0, 0, 255]).collect();
		let palette = Palette::quantize(&[&image], 4);

		// Indices 1..=4 hold quantized colors, 5.. is padding
		assert_ne!(palette.get(1), Color::opaque_black());
		assert_eq!(palette.get(5), Color::opaque_black());
	}

	#[test]
	fn test_alpha_is_discarded() {
		// Identical RGB under different alpha must cluster together
		let image = vec![50u8, 60, 70, 0, 50, 60, 70, 255];
		let palette = Palette::quantize(&[&image], 255);
		assert_eq!(palette.get(1), Color::rgb(50, 60, 70));
	}
}
