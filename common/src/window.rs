use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, PossiblyCurrentContext, Version,
};
use glutin::display::{Display, DisplayApiPreference, GetGlDisplay};
use glutin::prelude::*;
use glutin::surface::{Surface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};

use raw_window_handle::{HasRawDisplayHandle, HasRawWindowHandle};

use thiserror::Error;

use winit::dpi::{PhysicalSize, Size};
use winit::event_loop::EventLoop;
use winit::window::{Window, WindowBuilder};

use crate::config::ExampleConfig;

pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub vsync: bool,
    pub gl_version: (u8, u8),
}

impl WindowSettings {
    pub fn from_config(config: &ExampleConfig, default_title: &str) -> Self {
        Self {
            width: config.width,
            height: config.height,
            title: config
                .title
                .clone()
                .unwrap_or_else(|| default_title.to_owned()),
            vsync: config.vsync,
            gl_version: (config.gl_version[0], config.gl_version[1]),
        }
    }
}

pub struct GlWindow {
    // XXX the surface must be dropped before the window.
    pub surface: Surface<WindowSurface>,
    pub window: Window,
}

impl GlWindow {
    fn new(window: Window, config: &Config) -> Result<Self, WindowError> {
        let (width, height): (u32, u32) = window.inner_size().into();
        let raw_window_handle = window.raw_window_handle();
        let attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
            raw_window_handle,
            non_zero(width)?,
            non_zero(height)?,
        );

        let surface = unsafe {
            config
                .display()
                .create_window_surface(config, &attrs)
                .map_err(|e| WindowError::Surface(e.to_string()))?
        };

        Ok(Self { window, surface })
    }

    /// Current framebuffer size in physical pixels.
    pub fn size(&self) -> (u32, u32) {
        self.window.inner_size().into()
    }

    /// Zero sized (minimized) windows are ignored.
    pub fn resize(&self, context: &PossiblyCurrentContext, width: u32, height: u32) -> bool {
        match (NonZeroU32::new(width), NonZeroU32::new(height)) {
            (Some(w), Some(h)) => {
                self.surface.resize(context, w, h);
                true
            }
            _ => false,
        }
    }

    pub fn swap_buffers(&self, context: &PossiblyCurrentContext) -> Result<(), WindowError> {
        self.surface
            .swap_buffers(context)
            .map_err(|e| WindowError::Swap(e.to_string()))
    }
}

/// Opens a window, makes a GL context current on it and loads GL functions.
pub fn create_gl_window<T>(
    event_loop: &EventLoop<T>,
    settings: &WindowSettings,
) -> Result<(GlWindow, PossiblyCurrentContext), WindowError> {
    let window_builder = WindowBuilder::new()
        .with_inner_size(Size::Physical(PhysicalSize::new(
            settings.width,
            settings.height,
        )))
        .with_min_inner_size(Size::Physical(PhysicalSize::new(32, 32)))
        .with_title(&settings.title);

    // WGL needs the native window before the display, X11 needs the config's visual first
    let early_window = if cfg!(windows) {
        let window = window_builder
            .clone()
            .build(event_loop)
            .map_err(|e| WindowError::Window(e.to_string()))?;
        Some(window)
    } else {
        None
    };

    let preference = display_preference(early_window.as_ref());
    let gl_display = unsafe { Display::new(event_loop.raw_display_handle(), preference) }
        .map_err(|e| WindowError::Display(e.to_string()))?;

    let mut template = ConfigTemplateBuilder::new();
    if let Some(window) = &early_window {
        template = template.compatible_with_native_window(window.raw_window_handle());
    }

    let configs = unsafe { gl_display.find_configs(template.build()) }
        .map_err(|e| WindowError::Display(e.to_string()))?;
    let gl_config = most_samples(configs, |c| c.num_samples())?;

    let window = match early_window {
        Some(window) => window,
        None => glutin_winit::finalize_window(event_loop, window_builder, &gl_config)
            .map_err(|e| WindowError::Window(e.to_string()))?,
    };

    let handle = Some(window.raw_window_handle());

    let (major, minor) = settings.gl_version;
    let context_attr = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(Version::new(major, minor))))
        .with_profile(GlProfile::Core)
        .build(handle);

    let gl_window = GlWindow::new(window, &gl_config)?;

    let gl_context = unsafe { gl_display.create_context(&gl_config, &context_attr) }
        .map_err(|e| WindowError::Context(e.to_string()))?
        .make_current(&gl_window.surface)
        .map_err(|e| WindowError::Context(e.to_string()))?;

    gl::load_with(|s| match CString::new(s) {
        Ok(symbol) => gl_display.get_proc_address(symbol.as_c_str()).cast(),
        Err(_) => std::ptr::null(),
    });

    if !gl::Viewport::is_loaded() || !gl::BlitFramebuffer::is_loaded() {
        return Err(WindowError::GlLoad);
    }

    if settings.vsync {
        let interval = SwapInterval::Wait(non_zero(1)?);

        if let Err(e) = gl_window.surface.set_swap_interval(&gl_context, interval) {
            tracing::warn!("could not enable vsync: {e}");
        }
    }

    tracing::info!(
        title = %settings.title,
        width = settings.width,
        height = settings.height,
        gl = %format!("{major}.{minor}"),
        "created window"
    );

    Ok((gl_window, gl_context))
}

/// Config with the most MSAA samples, the first one on ties.
fn most_samples<C>(
    configs: impl Iterator<Item = C>,
    samples: impl Fn(&C) -> u8,
) -> Result<C, WindowError> {
    configs
        .reduce(|best, c| if samples(&c) > samples(&best) { c } else { best })
        .ok_or(WindowError::NoConfig)
}

#[cfg(all(unix, not(target_os = "macos"), not(target_os = "android")))]
fn display_preference(_window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::GlxThenEgl(Box::new(winit::platform::unix::register_xlib_error_hook))
}

#[cfg(windows)]
fn display_preference(window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::WglThenEgl(window.map(|w| w.raw_window_handle()))
}

#[cfg(target_os = "macos")]
fn display_preference(_window: Option<&Window>) -> DisplayApiPreference {
    DisplayApiPreference::Cgl
}

fn non_zero(v: u32) -> Result<NonZeroU32, WindowError> {
    NonZeroU32::new(v).ok_or(WindowError::ZeroSize)
}

#[derive(Debug, Error)]
pub enum WindowError {
    #[error("failed to create display: {0}")]
    Display(String),
    #[error("failed to create window: {0}")]
    Window(String),
    #[error("display offered no matching GL configs")]
    NoConfig,
    #[error("window has zero size")]
    ZeroSize,
    #[error("failed to create window surface: {0}")]
    Surface(String),
    #[error("failed to create GL context: {0}")]
    Context(String),
    #[error("failed to load OpenGL functions")]
    GlLoad,
    #[error("failed to swap buffers: {0}")]
    Swap(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_config_with_most_samples() {
        let configs = [(0, 'a'), (4, 'b'), (2, 'c'), (4, 'd')];
        let best = most_samples(configs.into_iter(), |c| c.0).unwrap();

        assert_eq!(best, (4, 'b'));
    }

    #[test]
    fn no_configs_is_an_error() {
        let res = most_samples(std::iter::empty::<(u8, char)>(), |c| c.0);

        assert!(matches!(res, Err(WindowError::NoConfig)));
    }
}
