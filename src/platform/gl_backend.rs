//=========================================================================
// GL Backend
//=========================================================================
//
// Window + OpenGL context, created through glutin on a Winit window.
//
// Architecture:
// ```text
//   DisplayBuilder ─► (Window, Config) ─► NotCurrentContext
//                                             │ make_current
//   Window ─► SurfaceAttributes ─► Surface ◄──┘
//                                     │
//                              GlutinBackend (GlBackend)
// ```
//
// A desktop GL core-profile context of the configured version is
// requested first, GLES second. Failing both is fatal for the caller.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ffi::CString;
use std::num::NonZeroU32;

use glutin::config::{Config, ConfigTemplateBuilder};
use glutin::context::{
    ContextApi, ContextAttributesBuilder, GlProfile, NotCurrentContext, PossiblyCurrentContext,
    Version,
};
use glutin::display::GetGlDisplay;
use glutin::prelude::*;
use glutin::surface::{Surface, SwapInterval, WindowSurface};
use glutin_winit::{DisplayBuilder, GlWindow};
use log::{debug, info, warn};
use raw_window_handle::HasWindowHandle;
use winit::dpi::PhysicalSize;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes};

//=== Internal Dependencies ===============================================

use crate::core::surface::{BackendError, GlBackend, Viewport};
use crate::engine::HostConfig;

//=== GlutinBackend =======================================================

/// The live window with its current GL context.
///
/// Field order matters: the surface and context are dropped before the
/// window they render into.
pub(crate) struct GlutinBackend {
    gl_surface: Surface<WindowSurface>,
    gl_context: PossiblyCurrentContext,
    window: Window,
}

impl GlutinBackend {
    /// Creates the window, picks a config, makes a context current on a
    /// window surface and loads GL function pointers.
    pub(crate) fn create(
        event_loop: &ActiveEventLoop,
        config: &HostConfig,
        viewport: Viewport,
    ) -> Result<Self, BackendError> {
        let attrs = WindowAttributes::default()
            .with_title(config.title().to_owned())
            .with_inner_size(PhysicalSize::new(viewport.width(), viewport.height()));

        let template = ConfigTemplateBuilder::new().with_alpha_size(8);
        let (window, gl_config) = DisplayBuilder::new()
            .with_window_attributes(Some(attrs))
            .build(event_loop, template, pick_config)
            .map_err(|e| BackendError::from(e.to_string()))?;

        let window = window.ok_or("display builder returned no window")?;
        debug!(
            target: "platform::gl",
            "Picked GL config: {} samples, alpha {}",
            gl_config.num_samples(),
            gl_config.alpha_size()
        );

        let not_current = create_context(&window, &gl_config, config.gl_version())?;

        let surface_attrs = window.build_surface_attributes(Default::default())?;
        // SAFETY: the window outlives the surface (dropped after it, see the
        // field order) and the attributes were built from that window.
        let gl_surface =
            unsafe { gl_config.display().create_window_surface(&gl_config, &surface_attrs)? };
        let gl_context = not_current.make_current(&gl_surface)?;

        let interval = if config.vsync() {
            SwapInterval::Wait(NonZeroU32::MIN)
        } else {
            SwapInterval::DontWait
        };
        if let Err(e) = gl_surface.set_swap_interval(&gl_context, interval) {
            warn!(target: "platform::gl", "Could not set swap interval: {}", e);
        }

        let display = gl_config.display();
        gl::load_with(|symbol| match CString::new(symbol) {
            Ok(symbol) => display.get_proc_address(symbol.as_c_str()).cast(),
            Err(_) => std::ptr::null(),
        });

        window.set_ime_allowed(true);

        info!(
            target: "platform::gl",
            "GL context ready ({:?}) on {}x{} window",
            gl_context.context_api(),
            viewport.width(),
            viewport.height()
        );

        Ok(Self { gl_surface, gl_context, window })
    }

    pub(crate) fn window(&self) -> &Window {
        &self.window
    }
}

impl GlBackend for GlutinBackend {
    fn set_viewport(&mut self, viewport: Viewport) {
        self.gl_surface
            .resize(&self.gl_context, viewport.width_nonzero(), viewport.height_nonzero());

        let width = i32::try_from(viewport.width()).unwrap_or(i32::MAX);
        let height = i32::try_from(viewport.height()).unwrap_or(i32::MAX);
        // SAFETY: the context is current on this thread and GL is loaded.
        unsafe {
            gl::Viewport(0, 0, width, height);
        }
    }

    fn present(&mut self) -> Result<(), BackendError> {
        self.gl_surface.swap_buffers(&self.gl_context)?;
        Ok(())
    }
}

//=== Internal Helpers ====================================================

/// Prefers multisampled configs; glutin only calls this with at least one.
fn pick_config(configs: Box<dyn Iterator<Item = Config> + '_>) -> Config {
    configs
        .reduce(|best, c| if c.num_samples() > best.num_samples() { c } else { best })
        .expect("glutin offers at least one GL config")
}

/// Context flavours in the order they are tried.
fn context_requests((major, minor): (u8, u8)) -> [(ContextApi, Option<GlProfile>); 2] {
    [
        (ContextApi::OpenGl(Some(Version::new(major, minor))), Some(GlProfile::Core)),
        (ContextApi::Gles(None), None),
    ]
}

fn create_context(
    window: &Window,
    gl_config: &Config,
    version: (u8, u8),
) -> Result<NotCurrentContext, BackendError> {
    let raw_handle = window.window_handle().ok().map(|handle| handle.as_raw());
    let display = gl_config.display();

    let [desktop, gles] = context_requests(version).map(|(api, profile)| {
        let builder = ContextAttributesBuilder::new().with_context_api(api);
        let builder = match profile {
            Some(profile) => builder.with_profile(profile),
            None => builder,
        };
        builder.build(raw_handle)
    });

    // SAFETY: `raw_handle` comes from a live window that outlives the
    // context.
    unsafe {
        display.create_context(gl_config, &desktop).or_else(|e| {
            warn!(
                target: "platform::gl",
                "OpenGL {}.{} core unavailable ({}), trying GLES",
                version.0,
                version.1,
                e
            );
            display.create_context(gl_config, &gles)
        })
    }
    .map_err(BackendError::from)
}

//=========================================================================
// Unit Tests
//=========================================================================
