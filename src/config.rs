//! Fixed program settings.
//!
//! There are no config files or flags; [`Config::default`] is the only source of values and
//! `main` passes it down to whatever needs it.

use std::path::PathBuf;

use glam::Vec4;

/// Every hard-coded value the demo needs in one place.
#[derive(Debug, Clone)]
pub struct Config {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub vertex_shader: PathBuf,
    pub fragment_shader: PathBuf,
    pub texture: PathBuf,
    pub clear_color: Vec4,
    /// Size of the vertex buffer in floats. Only 24 are written per frame.
    pub buffer_floats: usize,
    pub vsync: bool,
    /// Space the vertices with `3.14` instead of full-precision π, as the demo first did.
    pub legacy_pi: bool,
    pub log_level: log::LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            title: "Rainbow Brick Triangle".to_string(),
            width: 640,
            height: 480,
            vertex_shader: PathBuf::from("resources/shaders/shader.vs"),
            fragment_shader: PathBuf::from("resources/shaders/shader.fs"),
            texture: PathBuf::from("resources/wall.jpg"),
            clear_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            buffer_floats: 100,
            vsync: true,
            legacy_pi: false,
            log_level: if cfg!(debug_assertions) {
                log::LevelFilter::Debug
            } else {
                log::LevelFilter::Info
            },
        }
    }
}

impl Config {
    /// Vertex buffer capacity in bytes.
    pub fn buffer_bytes(&self) -> usize {
        self.buffer_floats * size_of::<f32>()
    }
}
