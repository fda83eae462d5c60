//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::{fmt, sync::Arc, time::Instant};

use crate::config::Config;

/// Errors raised while bringing up the window and its OpenGL context.
#[derive(Debug)]
pub enum AppError {
    /// SDL itself or one of its subsystems failed to initialize.
    Sdl(String),
    /// The window could not be created.
    Window(sdl2::video::WindowBuildError),
    /// The OpenGL context could not be created or made current.
    Context(String),
    /// An OpenGL object the demo cannot run without could not be created.
    Gl(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Sdl(e) => write!(f, "SDL initialization failed: {e}"),
            AppError::Window(e) => write!(f, "window creation failed: {e}"),
            AppError::Context(e) => write!(f, "OpenGL context creation failed: {e}"),
            AppError::Gl(e) => write!(f, "OpenGL object creation failed: {e}"),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Window(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sdl2::video::WindowBuildError> for AppError {
    fn from(e: sdl2::video::WindowBuildError) -> Self {
        AppError::Window(e)
    }
}

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
///
/// Field order matters: the GL context must go before the window, and both before SDL.
pub struct App {
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
    _gl_context: sdl2::video::GLContext,
    pub window: sdl2::video::Window,
    _video_subsystem: sdl2::VideoSubsystem,
    _sdl: sdl2::Sdl,
    started: Instant,
}

impl App {
    /// Opens a resizable window with an OpenGL 3.3 core context as described by `config`.
    pub fn new(config: &Config) -> Result<Self, AppError> {
        let sdl = sdl2::init().map_err(AppError::Sdl)?;
        let video_subsystem = sdl.video().map_err(AppError::Sdl)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);

        let window = video_subsystem
            .window(&config.title, config.width, config.height)
            .opengl()
            .resizable()
            .position_centered()
            .build()?;
        let gl_context = window.gl_create_context().map_err(AppError::Context)?;
        window
            .gl_make_current(&gl_context)
            .map_err(AppError::Context)?;

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };

        let interval = if config.vsync {
            sdl2::video::SwapInterval::VSync
        } else {
            sdl2::video::SwapInterval::Immediate
        };
        if let Err(e) = video_subsystem.gl_set_swap_interval(interval) {
            log::warn!("could not set swap interval: {e}");
        }

        let event_pump = sdl.event_pump().map_err(AppError::Sdl)?;

        log::info!(
            "created {}x{} window \"{}\"",
            config.width,
            config.height,
            config.title
        );

        Ok(Self {
            gl: Arc::new(gl),
            event_pump,
            _gl_context: gl_context,
            window,
            _video_subsystem: video_subsystem,
            _sdl: sdl,
            started: Instant::now(),
        })
    }

    /// Seconds since the window was opened.
    pub fn elapsed(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let sdl = AppError::Sdl("No available video device".to_string());
        assert_eq!(sdl.to_string(), "SDL initialization failed: No available video device");
        assert!(std::error::Error::source(&sdl).is_none());

        let gl = AppError::Gl("out of memory".to_string());
        assert_eq!(gl.to_string(), "OpenGL object creation failed: out of memory");
    }

    #[test]
    fn test_window_error_has_source() {
        let err = AppError::from(sdl2::video::WindowBuildError::HeightOverflows(u32::MAX));
        assert!(err.to_string().starts_with("window creation failed"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
