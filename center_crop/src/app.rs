use std::path::PathBuf;

use glutin::context::PossiblyCurrentContext;

use thiserror::Error;

use winit::event::{ElementState, Event, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;

use aspect_crop::quad::{textured_quad, QUAD_INDICES};
use aspect_crop::{AspectRatio, CropError, CropRect};

use examples_common::config::{ConfigError, ExampleConfig};
use examples_common::window::{create_gl_window, GlWindow, WindowError, WindowSettings};

use gl_wrapper::geometry::{BufferUsage, Geometry, GeometryBuilder, GeometryError, VertexAttribute};
use gl_wrapper::program::{Program, ProgramBuilder, ProgramError};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureError, TextureFilter, TextureFormat};

use crate::image::{DecodedImage, ImageError};

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    clear_color: [f32; 3],
    pinned_aspect: Option<AspectRatio>,
}

impl App {
    pub fn new(config: &ExampleConfig, pinned_aspect: Option<AspectRatio>) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let settings = WindowSettings::from_config(config, "CenterCrop Example");

        let (gl_window, gl_context) = create_gl_window(&event_loop, &settings)?;

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            clear_color: config.clear_color,
            pinned_aspect,
        })
    }

    /// Window aspect unless one was pinned on the command line.
    fn display_aspect(&self, width: u32, height: u32) -> Result<AspectRatio, CropError> {
        match self.pinned_aspect {
            Some(aspect) => Ok(aspect),
            None => AspectRatio::from_dimensions(width, height),
        }
    }

    pub fn run(mut self, image: &DecodedImage) -> Result<(), AppError> {
        let (width, height) = self.gl_window.size();
        let display_aspect = self.display_aspect(width, height)?;
        let mut quad = CroppedQuad::new(image, display_aspect)?;

        let mut gl_renderer = GlRenderer::new();
        gl_renderer.resize(width, height);

        let mut loop_error = None;

        self.event_loop
            .run_return(|event, _window_target, control_flow| match event {
                Event::NewEvents(StartCause::Init) => {
                    control_flow.set_poll();
                }
                Event::MainEventsCleared => {
                    self.gl_window.window.request_redraw();
                }
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::Resized(size) => {
                        if !self.gl_window.resize(&self.gl_context, size.width, size.height) {
                            return;
                        }

                        gl_renderer.resize(size.width, size.height);

                        if self.pinned_aspect.is_none() {
                            let res = AspectRatio::from_dimensions(size.width, size.height)
                                .map_err(AppError::from)
                                .and_then(|display_aspect| quad.refit(display_aspect));

                            if let Err(e) = res {
                                loop_error = Some(e);
                                control_flow.set_exit();
                            }
                        }
                    }
                    WindowEvent::KeyboardInput {
                        input:
                            KeyboardInput {
                                virtual_keycode: Some(VirtualKeyCode::Escape),
                                state: ElementState::Pressed,
                                ..
                            },
                        ..
                    }
                    | WindowEvent::CloseRequested => {
                        control_flow.set_exit();
                    }
                    _ => (),
                },
                Event::RedrawRequested(_) => {
                    gl_renderer.clear(self.clear_color, false);
                    quad.draw(&mut gl_renderer);

                    if let Err(e) = self.gl_window.swap_buffers(&self.gl_context) {
                        loop_error = Some(e.into());
                        control_flow.set_exit();
                    }
                }
                Event::LoopDestroyed => {
                    tracing::info!("closing");
                }
                _ => (),
            });

        // GL objects go before the context
        drop(quad);

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Full window quad showing the centered crop of one image.
struct CroppedQuad {
    geometry: Geometry,
    texture: Texture2D,
    program: Program,
    image_aspect: AspectRatio,
    crop: CropRect,
}

impl CroppedQuad {
    fn new(image: &DecodedImage, display_aspect: AspectRatio) -> Result<Self, AppError> {
        let image_aspect = AspectRatio::from_dimensions(image.width, image.height)?;
        let crop = CropRect::fit(display_aspect, image_aspect);

        tracing::info!(
            display = %display_aspect,
            image = %image_aspect,
            ?crop,
            "computed crop"
        );

        let vertices = textured_quad(&crop);

        let geometry = GeometryBuilder::new(&vertices)
            .with_attribute(VertexAttribute::Vec3)
            .with_attribute(VertexAttribute::Vec2)
            .with_indices(&QUAD_INDICES)
            .with_usage(BufferUsage::Dynamic)
            .build()?;

        let texture = Texture2D::new(
            image.width,
            image.height,
            &image.pixels,
            TextureFormat::from_channels(image.channels),
            TextureFilter::LinearMipmap,
        )?;

        let program = ProgramBuilder::new(
            include_str!("gl_shaders/quad.glsl"),
            include_str!("gl_shaders/texture.glsl"),
        )
        .build()?;
        program.set_i32("tex", 0)?;

        Ok(Self {
            geometry,
            texture,
            program,
            image_aspect,
            crop,
        })
    }

    fn refit(&mut self, display_aspect: AspectRatio) -> Result<(), AppError> {
        if let Some(crop) = refit_crop(self.crop, display_aspect, self.image_aspect) {
            tracing::debug!(display = %display_aspect, ?crop, "crop changed");
            self.geometry.update_vertices(&textured_quad(&crop))?;
            self.crop = crop;
        }

        Ok(())
    }

    fn draw(&self, renderer: &mut GlRenderer) {
        self.texture.bind(0);
        renderer.draw(&self.geometry, &self.program);
    }
}

/// New crop for `display_aspect`, or `None` when `current` already fits it.
fn refit_crop(
    current: CropRect,
    display_aspect: AspectRatio,
    image_aspect: AspectRatio,
) -> Option<CropRect> {
    let crop = CropRect::fit(display_aspect, image_aspect);
    (crop != current).then_some(crop)
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Window(#[from] WindowError),
    #[error(transparent)]
    Program(#[from] ProgramError),
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Crop(#[from] CropError),
    #[error("failed to load image {path:?}: {source}")]
    Image { path: PathBuf, source: ImageError },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resize_refits_crop() {
        let image_aspect = AspectRatio::from_dimensions(640, 480).unwrap();

        let start = AspectRatio::from_dimensions(800, 600).unwrap();
        let crop = CropRect::fit(start, image_aspect);
        assert_eq!(crop, CropRect::FULL);
        assert_eq!(refit_crop(crop, start, image_aspect), None);

        let wide = AspectRatio::from_dimensions(1280, 720).unwrap();
        let crop = refit_crop(crop, wide, image_aspect).unwrap();
        assert!((crop.width - 1.0).abs() < 1e-6);
        assert!((crop.height - 0.75).abs() < 1e-6);
        assert!((crop.y - 0.125).abs() < 1e-6);

        assert_eq!(refit_crop(crop, wide, image_aspect), None);
    }

    #[test]
    fn refit_back_to_matching_window() {
        let image_aspect = AspectRatio::from_dimensions(640, 480).unwrap();
        let wide = AspectRatio::from_dimensions(1280, 720).unwrap();
        let crop = CropRect::fit(wide, image_aspect);

        let back = AspectRatio::from_dimensions(1024, 768).unwrap();
        assert_eq!(refit_crop(crop, back, image_aspect), Some(CropRect::FULL));
    }
}
