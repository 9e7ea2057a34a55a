//! Glint scene descriptions.
//!
//! Scenes are JSON documents listing a camera, named materials, objects
//! and lights. Loading resolves material names, composes transforms and
//! produces a [`glint_renderer::Scene`] ready to render.
//!
//! # Example
//!
//! ```ignore
//! use glint_scene::load_scene;
//!
//! let loaded = load_scene("scenes/showcase.json", 0)?;
//! let camera = loaded.camera.build(16.0 / 9.0);
//! ```

pub mod description;
mod loader;

pub use description::{RenderSettings, SceneDescription};
pub use loader::{build_scene, build_transform, load_scene, parse_scene, LoadResult, LoadedScene, SceneError};

/// The built-in showcase scene.
pub const SHOWCASE: &str = include_str!("../../../scenes/showcase.json");
