use std::process::ExitCode;

use glow::HasContext;
use sdl2::{event::Event, event::WindowEvent, keyboard::Scancode};

use crate::abs::*;
use crate::config::Config;
use crate::triangle::TriangleVertex;

mod abs;
mod config;
mod logging;
mod triangle;

fn main() -> ExitCode {
    let config = Config::default();

    if let Err(e) = logging::init(config.log_level) {
        eprintln!("could not install logger: {e}");
    }

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Sets everything up and renders until the window is closed or Escape is pressed.
///
/// Only window and context creation are fatal. A shader or texture that fails to load is
/// logged and the loop runs without it.
fn run(config: &Config) -> Result<(), AppError> {
    let mut app = App::new(config)?;

    unsafe {
        log::debug!(
            "OpenGL {} on {}",
            app.gl.get_parameter_string(glow::VERSION),
            app.gl.get_parameter_string(glow::RENDERER)
        );
    }

    let mut mesh = TriangleMesh::new::<TriangleVertex>(&app.gl, config.buffer_bytes())
        .map_err(AppError::Gl)?;

    let _program =
        match ShaderProgram::from_files(&app.gl, &config.vertex_shader, &config.fragment_shader) {
            Ok(program) => {
                program.set_sampler("u_texture", 0);
                Some(program)
            }
            Err(e) => {
                log::error!("{e}");
                None
            }
        };

    let _texture = match Texture::open(&app.gl, &config.texture) {
        Ok(texture) => {
            log::info!(
                "loaded {}x{} texture from {}",
                texture.width(),
                texture.height(),
                config.texture.display()
            );
            texture.bind(0);
            Some(texture)
        }
        Err(e) => {
            log::warn!("texture not loaded, drawing without it: {e}");
            None
        }
    };

    let mut frames: u64 = 0;
    let mut should_close = false;

    while !should_close {
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => should_close = true,
                Event::Window {
                    win_event: WindowEvent::SizeChanged(width, height),
                    ..
                } => unsafe {
                    app.gl.viewport(0, 0, width, height);
                },
                _ => {}
            }
        }

        if app
            .event_pump
            .keyboard_state()
            .is_scancode_pressed(Scancode::Escape)
        {
            should_close = true;
        }

        unsafe {
            let c = config.clear_color;
            app.gl.clear_color(c.x, c.y, c.z, c.w);
            app.gl.clear(glow::COLOR_BUFFER_BIT);
        }

        let time = app.elapsed();
        let vertices = if config.legacy_pi {
            triangle::rotating_triangle_with_pi(time, triangle::LEGACY_PI)
        } else {
            triangle::rotating_triangle(time)
        };
        log::trace!("t = {time:.3}: {:?}", triangle::payload(&vertices));
        mesh.update(&vertices);
        mesh.draw();

        app.window.gl_swap_window();
        frames += 1;
    }

    log::info!(
        "closing after {frames} frames in {:.1}s ({} vertices per frame)",
        app.elapsed(),
        mesh.vertex_count()
    );

    Ok(())
}
