//! `miu-rs` is a project that revives the sprite assets of an old game engine by giving
//! them a modern, compact container: the Miu Sprite Format (MSF2).
//!
//! The format support lives in the [`miu_types`] crate; this crate re-exports it and
//! hosts the command-line utilities (see `demos/`).

pub use miu_types::*;
