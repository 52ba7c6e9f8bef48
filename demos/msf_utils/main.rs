//! MSF (Miu Sprite Format) CLI Utility
//!
//! A command-line tool for inspecting, extracting, and building MSF animation files.
//!
//! # Features
//!
//! - **unpack**: Extract all frames from an MSF file to PNG images with JSON metadata
//! - **pack**: Combine PNG images and JSON metadata into an MSF file
//! - **verify**: Validate MSF encoder/decoder round-trip accuracy
//! - **info**: Display information about an MSF file
//!
//! # Metadata Format
//!
//! Animation metadata is stored in a JSON file with the following structure:
//! ```json
//! {
//!   "canvas_width": 64,
//!   "canvas_height": 80,
//!   "direction_count": 8,
//!   "fps": 16,
//!   "anchor_x": 32,
//!   "anchor_y": 70,
//!   "frames": [
//!     { "index": 0, "filename": "frame_000.png" }
//!   ]
//! }
//! ```
//!
//! Frame PNGs are full canvas-sized RGBA images; the encoder crops each one to
//! the tight bounding box of its non-transparent pixels and quantizes a shared
//! palette across the whole set.
//!
//! # Usage
//!
//! ```bash
//! # Unpack an MSF file to PNG frames
//! cargo run --example msf_utils -- unpack HERO_WALK.msf
//!
//! # Unpack to a specific directory
//! cargo run --example msf_utils -- unpack HERO_WALK.msf -o frames/
//!
//! # Pack PNG frames back into an MSF file
//! cargo run --example msf_utils -- pack frames/ output.msf
//!
//! # Verify encoder/decoder round-trip accuracy
//! cargo run --example msf_utils -- verify HERO_WALK.msf
//!
//! # Show MSF file information
//! cargo run --example msf_utils -- info HERO_WALK.msf --detailed
//! ```

use clap::{Parser, Subcommand};
use image::RgbaImage;
use miu_rs::prelude::{MsfFile, MsfFileBuilder};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "msf_utils")]
#[command(author = "miu-rs project")]
#[command(version = "1.0")]
#[command(about = "MSF sprite utility - pack, unpack, verify, and inspect MSF files", long_about = None)]
struct Cli {
	#[command(subcommand)]
	command: Commands,
}

#[derive(Subcommand)]
enum Commands {
	/// Unpack an MSF file to individual PNG images
	Unpack {
		/// Input MSF file path
		#[arg(value_name = "INPUT_MSF")]
		input: PathBuf,

		/// Output directory path (optional, defaults to `<input>_frames/`)
		#[arg(short, long, value_name = "OUTPUT_DIR")]
		output: Option<PathBuf>,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Pack PNG images from a directory into an MSF file
	Pack {
		/// Input directory containing PNG files and metadata.json
		#[arg(value_name = "INPUT_DIR")]
		input: PathBuf,

		/// Output MSF file path
		#[arg(value_name = "OUTPUT_MSF")]
		output: PathBuf,

		/// Maximum number of quantized palette colors (1-255)
		#[arg(short, long, default_value_t = 255)]
		max_colors: usize,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Verify MSF encoder/decoder round-trip accuracy
	Verify {
		/// Input MSF file path to verify
		#[arg(value_name = "INPUT_MSF")]
		input: PathBuf,

		/// Show verbose output
		#[arg(short, long)]
		verbose: bool,
	},

	/// Display information about an MSF file
	Info {
		/// Input MSF file path
		#[arg(value_name = "INPUT_MSF")]
		input: PathBuf,

		/// Show detailed frame information
		#[arg(short, long)]
		detailed: bool,
	},
}

/// Frame metadata for JSON serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FrameMetadata {
	/// Frame index
	index: usize,
	/// Frame PNG filename
	filename: String,
}

/// Complete animation metadata structure
#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnimationMetadata {
	/// Canvas width in pixels
	canvas_width: u16,
	/// Canvas height in pixels
	canvas_height: u16,
	/// Number of facing directions
	direction_count: u8,
	/// Playback rate in frames per second
	fps: u8,
	/// Anchor point X
	anchor_x: i16,
	/// Anchor point Y
	anchor_y: i16,
	/// List of frame metadata
	frames: Vec<FrameMetadata>,
}

/// Save metadata to JSON file
fn save_metadata(
	path: &PathBuf,
	metadata: &AnimationMetadata,
) -> Result<(), Box<dyn std::error::Error>> {
	let json = serde_json::to_string_pretty(metadata)?;
	fs::write(path, json)?;
	Ok(())
}

/// Load metadata from JSON file
fn load_metadata(path: &PathBuf) -> Result<AnimationMetadata, Box<dyn std::error::Error>> {
	let json = fs::read_to_string(path)?;
	let metadata = serde_json::from_str(&json)?;
	Ok(metadata)
}

/// Handle unpack command
fn handle_unpack(
	input: PathBuf,
	output: Option<PathBuf>,
	verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	// Generate output directory if not specified
	let output_dir = output.unwrap_or_else(|| {
		let mut dir = input.clone();
		dir.set_extension("");
		let name = format!("{}_frames", dir.file_name().unwrap().to_string_lossy());
		dir.with_file_name(name)
	});

	if verbose {
		println!("🔓 Unpacking MSF file");
		println!("   Input:  {}", input.display());
		println!("   Output: {}", output_dir.display());
	}

	let msf = MsfFile::open(&input)?;
	let header = msf.header();

	if verbose {
		println!("   ✓ {}", msf);
	}

	fs::create_dir_all(&output_dir)?;

	let mut metadata = AnimationMetadata {
		canvas_width: header.canvas_width,
		canvas_height: header.canvas_height,
		direction_count: header.direction_count,
		fps: header.fps,
		anchor_x: header.anchor_x,
		anchor_y: header.anchor_y,
		frames: Vec::new(),
	};

	for (index, rgba) in msf.render_frames().into_iter().enumerate() {
		let filename = format!("frame_{:03}.png", index);
		let path = output_dir.join(&filename);

		let img: RgbaImage = RgbaImage::from_raw(
			u32::from(header.canvas_width),
			u32::from(header.canvas_height),
			rgba,
		)
		.ok_or("Failed to create frame image")?;
		img.save(&path)?;

		metadata.frames.push(FrameMetadata {
			index,
			filename,
		});

		if verbose {
			println!("   ✓ Frame {:3} -> frame_{:03}.png", index, index);
		}
	}

	let metadata_path = output_dir.join("metadata.json");
	save_metadata(&metadata_path, &metadata)?;

	println!(
		"✅ Unpacked {} frames to {}",
		metadata.frames.len(),
		output_dir.display()
	);
	Ok(())
}

/// Handle pack command
fn handle_pack(
	input: PathBuf,
	output: PathBuf,
	max_colors: usize,
	verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let metadata_path = input.join("metadata.json");
	let metadata = load_metadata(&metadata_path)?;

	if verbose {
		println!("📦 Packing MSF file");
		println!("   Input:    {}", input.display());
		println!("   Output:   {}", output.display());
		println!(
			"   Canvas:   {}x{}",
			metadata.canvas_width, metadata.canvas_height
		);
		println!("   Frames:   {}", metadata.frames.len());
	}

	let mut builder = MsfFileBuilder::new(metadata.canvas_width, metadata.canvas_height);
	builder
		.direction_count(metadata.direction_count)
		.fps(metadata.fps)
		.anchor(metadata.anchor_x, metadata.anchor_y)
		.max_colors(max_colors);

	for frame_meta in &metadata.frames {
		let path = input.join(&frame_meta.filename);
		let img = image::open(&path)?.to_rgba8();

		if img.width() != u32::from(metadata.canvas_width)
			|| img.height() != u32::from(metadata.canvas_height)
		{
			return Err(format!(
				"{}: expected {}x{} canvas, got {}x{}",
				frame_meta.filename,
				metadata.canvas_width,
				metadata.canvas_height,
				img.width(),
				img.height()
			)
			.into());
		}

		builder.add_frame_rgba(img.as_raw())?;

		if verbose {
			println!("   ✓ Frame {:3} <- {}", frame_meta.index, frame_meta.filename);
		}
	}

	let msf = builder.build()?;
	msf.save(&output)?;

	let size = fs::metadata(&output)?.len();
	println!(
		"✅ Packed {} frames into {} ({} bytes)",
		metadata.frames.len(),
		output.display(),
		size
	);
	Ok(())
}

/// Handle verify command
fn handle_verify(input: PathBuf, verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
	println!("🔍 Verifying {}", input.display());

	let original_size = fs::metadata(&input)?.len();
	let msf = MsfFile::open(&input)?;

	if verbose {
		println!("   ✓ {}", msf);
	}

	// Re-encode and decode again
	let reencoded = msf.to_bytes()?;
	let decoded = MsfFile::from_bytes(&reencoded)?;

	if decoded.frame_count() != msf.frame_count() {
		log::warn!(
			"frame count changed: {} -> {}",
			msf.frame_count(),
			decoded.frame_count()
		);
		return Err("Verification FAILED: frame count mismatch".into());
	}

	// Compare rendered output pixel for pixel
	let mut mismatched_frames = 0;
	for index in 0..msf.frame_count() {
		let before = msf.render_frame(index);
		let after = decoded.render_frame(index);
		if before != after {
			log::warn!("frame {index} renders differently after re-encode");
			mismatched_frames += 1;
		} else if verbose {
			println!("   ✓ Frame {:3} matches", index);
		}
	}

	if mismatched_frames > 0 {
		return Err(format!("Verification FAILED: {mismatched_frames} frame(s) mismatch").into());
	}

	println!(
		"✅ Verification passed: {} frames, {} bytes -> {} bytes re-encoded",
		msf.frame_count(),
		original_size,
		reencoded.len()
	);
	Ok(())
}

/// Handle info command
fn handle_info(input: PathBuf, detailed: bool) -> Result<(), Box<dyn std::error::Error>> {
	let size = fs::metadata(&input)?.len();
	let msf = MsfFile::open(&input)?;
	let header = msf.header();

	println!("{}", msf);
	println!("  File size:   {} bytes", size);
	println!("  Version:     {}", header.version);
	println!("  Flags:       0x{:04X}", header.flags);
	println!("  Anchor:      ({}, {})", header.anchor_x, header.anchor_y);

	if detailed {
		println!("  Frames:");
		for (index, frame) in msf.iter().enumerate() {
			println!("    [{:3}] {}", index, frame);
		}
	}

	Ok(())
}

fn main() {
	// Initialize logger with default level set to info if RUST_LOG is not set
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let cli = Cli::parse();

	let result = match cli.command {
		Commands::Unpack {
			input,
			output,
			verbose,
		} => handle_unpack(input, output, verbose),
		Commands::Pack {
			input,
			output,
			max_colors,
			verbose,
		} => handle_pack(input, output, max_colors, verbose),
		Commands::Verify {
			input,
			verbose,
		} => handle_verify(input, verbose),
		Commands::Info {
			input,
			detailed,
		} => handle_info(input, detailed),
	};

	if let Err(e) = result {
		eprintln!("❌ Error: {}", e);
		std::process::exit(1);
	}
}
