use glutin::context::PossiblyCurrentContext;

use thiserror::Error;

use winit::event::{ElementState, Event, KeyboardInput, StartCause, VirtualKeyCode, WindowEvent};
use winit::event_loop::EventLoop;
use winit::platform::run_return::EventLoopExtRunReturn;

use examples_common::config::{ConfigError, ExampleConfig};
use examples_common::window::{create_gl_window, GlWindow, WindowError, WindowSettings};

use gl_wrapper::framebuffer::{FrameBuffer, FramebufferError};
use gl_wrapper::geometry::{GeometryBuilder, GeometryError, VertexAttribute};
use gl_wrapper::program::{ProgramBuilder, ProgramError};
use gl_wrapper::renderer::GlRenderer;
use gl_wrapper::texture::{Texture2D, TextureFilter, TextureFormat};

pub struct App {
    event_loop: EventLoop<()>,
    gl_context: PossiblyCurrentContext,
    gl_window: GlWindow,
    clear_color: [f32; 3],
}

impl App {
    pub fn new(config: &ExampleConfig) -> Result<Self, AppError> {
        let event_loop = EventLoop::new();
        let settings = WindowSettings::from_config(config, "FBO Triangle");

        let (gl_window, gl_context) = create_gl_window(&event_loop, &settings)?;

        Ok(Self {
            event_loop,
            gl_context,
            gl_window,
            clear_color: config.clear_color,
        })
    }

    pub fn run(mut self, color: [f32; 3]) -> Result<(), AppError> {
        #[rustfmt::skip]
        let vertices: [f32; 9] = [
            -0.5, -0.5, 0.0,
            0.5, -0.5, 0.0,
            0.0, 0.5, 0.0,
        ];

        let triangle = GeometryBuilder::new(&vertices)
            .with_attribute(VertexAttribute::Vec3)
            .build()?;

        let program = ProgramBuilder::new(
            include_str!("gl_shaders/position.glsl"),
            include_str!("gl_shaders/solid.glsl"),
        )
        .build()?;
        program.set_vec3("color", color)?;

        let (width, height) = self.gl_window.size();
        let mut target = OffscreenTarget::new(width, height)?;

        let mut gl_renderer = GlRenderer::new();
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

                        // release the old attachments before allocating new ones
                        target.release();

                        match OffscreenTarget::new(size.width, size.height) {
                            Ok(t) => target = t,
                            Err(e) => {
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
                    let Some(size) = target.size() else {
                        return;
                    };

                    target.bind();
                    gl_renderer.resize(size.0, size.1);
                    gl_renderer.clear(self.clear_color, true);
                    gl_renderer.draw(&triangle, &program);

                    target.blit(self.gl_window.size());

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
        drop(target);
        drop(program);
        drop(triangle);

        match loop_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

/// Colour texture and depth renderbuffer the triangle is drawn into.
struct OffscreenTarget {
    // framebuffer is deleted before the texture it references
    attachments: Option<(FrameBuffer, Texture2D)>,
}

impl OffscreenTarget {
    fn new(width: u32, height: u32) -> Result<Self, AppError> {
        let texture = Texture2D::empty(width, height, TextureFormat::Rgb8, TextureFilter::Linear);
        let framebuffer = FrameBuffer::with_depth(&texture)?;

        Ok(Self {
            attachments: Some((framebuffer, texture)),
        })
    }

    fn release(&mut self) {
        self.attachments = None;
    }

    fn size(&self) -> Option<(u32, u32)> {
        self.attachments
            .as_ref()
            .map(|(_, texture)| (texture.width(), texture.height()))
    }

    fn bind(&self) {
        if let Some((framebuffer, _)) = &self.attachments {
            framebuffer.bind();
        }
    }

    fn blit(&self, window_size: (u32, u32)) {
        if let Some((framebuffer, texture)) = &self.attachments {
            framebuffer.blit_to_default((texture.width(), texture.height()), window_size);
        }
    }
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
    Framebuffer(#[from] FramebufferError),
    #[error("triangle color components must be in [0, 1]")]
    InvalidColor,
}
