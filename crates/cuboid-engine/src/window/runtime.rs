use anyhow::{anyhow, Context, Result};
use ouroboros::self_referencing;

use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

use crate::core::{App as CoreApp, AppControl, FrameCtx, Lifecycle, SetupCtx, WindowCtx};
use crate::device::{Gpu, GpuInit};
use crate::time::{FrameClock, FrameTime};

/// Window/runtime configuration.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub title: String,
    pub initial_size: LogicalSize<f64>,
    pub resizable: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            title: "Cube Renderer".to_string(),
            initial_size: LogicalSize::new(800.0, 600.0),
            resizable: false,
        }
    }
}

/// Entry point for the runtime.
pub struct Runtime;

impl Runtime {
    /// Opens the window, runs `app` until the window closes, then tears down.
    ///
    /// Returns the setup error (or an abort reason) if the loop did not end
    /// through a normal close.
    pub fn run<A>(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Result<()>
    where
        A: 'static + CoreApp,
    {
        let event_loop = EventLoop::new().context("failed to create winit EventLoop")?;
        let mut state = AppState::new(config, gpu_init, app);

        event_loop
            .run_app(&mut state)
            .context("winit event loop terminated with error")?;

        match state.failure.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[self_referencing]
struct WindowEntry {
    window: Window,

    #[borrows(window)]
    #[covariant]
    gpu: Gpu<'this>,
}

struct AppState<A>
where
    A: CoreApp + 'static,
{
    config: RuntimeConfig,
    gpu_init: GpuInit,
    app: A,

    entry: Option<WindowEntry>,
    clock: FrameClock,
    lifecycle: Lifecycle,
    failure: Option<anyhow::Error>,
}

impl<A> AppState<A>
where
    A: CoreApp + 'static,
{
    fn new(config: RuntimeConfig, gpu_init: GpuInit, app: A) -> Self {
        Self {
            config,
            gpu_init,
            app,
            entry: None,
            clock: FrameClock::new(),
            lifecycle: Lifecycle::Uninitialized,
            failure: None,
        }
    }

    fn terminate(&mut self, event_loop: &ActiveEventLoop, failure: Option<anyhow::Error>) {
        if let Some(err) = failure {
            log::error!("{err:#}");
            self.failure.get_or_insert(err);
        }
        self.lifecycle.transition(Lifecycle::Terminated);
        event_loop.exit();
    }

    fn create_window_entry(&mut self, event_loop: &ActiveEventLoop) -> Result<WindowEntry> {
        let attrs = Window::default_attributes()
            .with_title(self.config.title.clone())
            .with_inner_size(self.config.initial_size)
            .with_resizable(self.config.resizable);

        let window = event_loop
            .create_window(attrs)
            .context("failed to create window")?;

        let gpu_init = self.gpu_init.clone();

        WindowEntryTryBuilder {
            window,
            gpu_builder: |w: &Window| {
                pollster::block_on(Gpu::new(w, gpu_init)).context("GPU initialization failed")
            },
        }
        .try_build()
    }

    fn setup(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let entry = self.create_window_entry(event_loop)?;

        let app = &mut self.app;
        entry.with(|fields| {
            let mut ctx = SetupCtx {
                window: WindowCtx {
                    id: fields.window.id(),
                    window: fields.window,
                },
                gpu: fields.gpu,
            };
            app.on_setup(&mut ctx)
        })?;

        entry.with_window(|w| w.request_redraw());
        self.entry = Some(entry);

        // Animation time starts once the context is ready.
        self.clock = FrameClock::new();
        self.lifecycle.transition(Lifecycle::Initialized);
        Ok(())
    }

    fn draw_frame(&mut self, window_id: WindowId) -> AppControl {
        let Some(entry) = self.entry.as_mut() else {
            return AppControl::Continue;
        };

        let ft: FrameTime = self.clock.tick();
        let app = &mut self.app;

        entry.with_mut(|fields| {
            let mut ctx = FrameCtx {
                window: WindowCtx {
                    id: window_id,
                    window: fields.window,
                },
                gpu: fields.gpu,
                time: ft,
            };
            app.on_frame(&mut ctx)
        })
    }
}

impl<A> ApplicationHandler for AppState<A>
where
    A: CoreApp + 'static,
{
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.entry.is_some() || self.lifecycle.is_terminated() {
            return;
        }

        if let Err(e) = self.setup(event_loop) {
            self.terminate(event_loop, Some(e.context("setup failed")));
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if self.lifecycle.is_terminated() {
            event_loop.exit();
            return;
        }

        event_loop.set_control_flow(ControlFlow::Wait);

        // Continuous redraw; presentation (FIFO) paces the loop.
        if let Some(entry) = &self.entry {
            entry.with_window(|w| w.request_redraw());
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        if self.lifecycle.is_terminated() {
            event_loop.exit();
            return;
        }

        match self.app.on_window_event(window_id, &event) {
            AppControl::Continue => {}
            AppControl::Exit => return self.terminate(event_loop, None),
            AppControl::Abort => {
                return self.terminate(event_loop, Some(anyhow!("aborted by application")));
            }
        }

        match &event {
            WindowEvent::CloseRequested => {
                log::info!("window close requested");
                self.terminate(event_loop, None);
            }

            WindowEvent::Resized(new_size) => {
                if let Some(entry) = self.entry.as_mut() {
                    entry.with_gpu_mut(|gpu| gpu.resize(*new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::ScaleFactorChanged { .. } => {
                if let Some(entry) = self.entry.as_mut() {
                    let new_size = entry.with_window(|w| w.inner_size());
                    entry.with_gpu_mut(|gpu| gpu.resize(new_size));
                    entry.with_window(|w| w.request_redraw());
                }
            }

            WindowEvent::RedrawRequested => {
                self.lifecycle.transition(Lifecycle::Rendering);
                match self.draw_frame(window_id) {
                    AppControl::Continue => {}
                    AppControl::Exit => self.terminate(event_loop, None),
                    AppControl::Abort => {
                        self.terminate(event_loop, Some(anyhow!("rendering aborted")));
                    }
                }
            }

            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Teardown: GPU objects go before the window they borrow.
        self.entry = None;
        log::debug!("window and GPU context released");
    }
}
