//! Radial Arcs entry point
//!
//! Handles platform-specific initialization and runs the frame loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, WheelEvent};

    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use radial_arcs::camera::OrbitCamera;
    use radial_arcs::platform::FrameLimiter;
    use radial_arcs::renderer::{MarkerRenderState, RenderInitError};
    use radial_arcs::scene::{MarkerId, MarkerStore, Pattern};
    use radial_arcs::settings::Settings;

    /// App instance holding all state
    struct App {
        settings: Settings,
        pattern: Pattern<MarkerId>,
        markers: MarkerStore,
        camera: OrbitCamera,
        limiter: FrameLimiter,
        render_state: Option<MarkerRenderState>,
        /// Last pointer position while dragging
        drag_from: Option<(i32, i32)>,
    }

    impl App {
        /// One display-clock callback
        fn frame(&mut self, time: f64) {
            if !self.limiter.accept(time) {
                return;
            }

            self.camera.update();
            self.pattern.update(&mut self.markers);
            self.render();

            let every = self.settings.log_every_ticks;
            let ticks = self.pattern.state().ticks();
            if every > 0 && ticks % every == 0 {
                log::debug!(
                    "tick {} ({} frames skipped by the cap)",
                    ticks,
                    self.limiter.skipped()
                );
            }
        }

        fn render(&mut self) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.markers, &self.camera) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        fn drag_to(&mut self, x: i32, y: i32) {
            if let Some((last_x, last_y)) = self.drag_from {
                let speed = self.settings.camera.rotate_speed;
                let dx = (x - last_x) as f32;
                let dy = (y - last_y) as f32;
                self.camera.rotate(-dx * speed, dy * speed);
                self.drag_from = Some((x, y));
            }
        }

        fn wheel(&mut self, delta_y: f64) {
            let step = self.settings.camera.zoom_step;
            if delta_y > 0.0 {
                self.camera.zoom(1.0 / step);
            } else if delta_y < 0.0 {
                self.camera.zoom(step);
            }
        }
    }

    async fn init_renderer(
        canvas: &HtmlCanvasElement,
        width: u32,
        height: u32,
    ) -> Result<MarkerRenderState, RenderInitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(RenderInitError::Surface)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(RenderInitError::Adapter)?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        MarkerRenderState::new(surface, &adapter, width, height).await
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Radial Arcs starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Match the drawing buffer to the displayed size (pixel ratio capped at 2)
        let dpr = window.device_pixel_ratio().min(2.0);
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();

        let seed = js_sys::Date::now() as u64;
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut markers = MarkerStore::with_capacity(
            settings.pattern.arc_count * (settings.pattern.orbit_markers_per_arc + 1),
        );
        let pattern = Pattern::generate(&settings.pattern, &mut rng, &mut markers);
        log::info!("Pattern generated with seed: {}", seed);

        // Without a GPU the pattern keeps running against the marker store
        let render_state = match init_renderer(&canvas, width, height).await {
            Ok(render_state) => Some(render_state),
            Err(e) => {
                log::error!("Renderer unavailable: {}", e);
                None
            }
        };

        let app = Rc::new(RefCell::new(App {
            camera: OrbitCamera::new(&settings.camera),
            limiter: FrameLimiter::new(settings.max_fps),
            settings,
            pattern,
            markers,
            render_state,
            drag_from: None,
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_resize_handler(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Radial Arcs running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Drag to orbit
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().drag_from = Some((event.client_x(), event.client_y()));
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut().drag_to(event.client_x(), event.client_y());
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(window) = web_sys::window() {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                app.borrow_mut().drag_from = None;
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Wheel to zoom
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                app.borrow_mut().wheel(event.delta_y());
            });
            let _ = canvas
                .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize_handler(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let canvas = canvas.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::UiEvent| {
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0)
                .min(2.0);
            let width = (canvas.client_width() as f64 * dpr) as u32;
            let height = (canvas.client_height() as f64 * dpr) as u32;
            canvas.set_width(width);
            canvas.set_height(height);
            if let Some(ref mut render_state) = app.borrow_mut().render_state {
                render_state.resize(width, height);
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            frame_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame_loop(app: Rc<RefCell<App>>, time: f64) {
        app.borrow_mut().frame(time);
        // Rescheduled whether or not the limiter accepted this frame
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Radial Arcs (native) starting...");
    log::info!("Native mode runs headless - run with `trunk serve` for the rendered version");

    run_headless(10.0);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Drive the pattern from a simulated 60 Hz display clock for `seconds`
#[cfg(not(target_arch = "wasm32"))]
fn run_headless(seconds: f64) {
    use radial_arcs::OrbitCamera;
    use radial_arcs::platform::FrameLimiter;
    use radial_arcs::scene::{MarkerStore, Pattern};
    use radial_arcs::settings::Settings;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    const DISPLAY_HZ: f64 = 60.0;

    let settings = Settings::load();
    let seed: u64 = rand::random();
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut markers = MarkerStore::new();
    let mut pattern = Pattern::generate(&settings.pattern, &mut rng, &mut markers);
    let mut camera = OrbitCamera::new(&settings.camera);
    let mut limiter = FrameLimiter::new(settings.max_fps);
    log::info!("Pattern generated with seed: {}", seed);

    let frames = (seconds * DISPLAY_HZ) as u64;
    for frame in 0..frames {
        let now_ms = frame as f64 * 1000.0 / DISPLAY_HZ;
        if limiter.accept(now_ms) {
            camera.update();
            pattern.update(&mut markers);
        }
    }

    log::info!(
        "{} display frames, {} ticks, {} skipped by the {} fps cap",
        frames,
        pattern.state().ticks(),
        limiter.skipped(),
        settings.max_fps
    );
    for (i, arc) in pattern.state().arcs().iter().take(3).enumerate() {
        log::info!(
            "arc {}: radius {:.1}, speed {:.4}, phase {:.3}, lead at {:?}",
            i,
            arc.radius(),
            arc.speed(),
            arc.phase(),
            arc.lead_position()
        );
    }
    if let Some((lo, hi)) = markers.bounds() {
        log::info!("{} markers within {:?} .. {:?}", markers.len(), lo, hi);
    }
}
