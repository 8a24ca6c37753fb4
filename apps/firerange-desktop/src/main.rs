use anyhow::{Context, Result};
use clap::Parser;
use firerange_assets::AssetStore;
use firerange_common::{EntityId, MeshHandle, Transform};
use firerange_control::{MotionController, bullet_transform};
use firerange_input::{FIRE_KEY, InputState};
use firerange_render_wgpu::WgpuRenderer;
use firerange_scene::{EntityKind, Scene};
use glam::{Quat, Vec3};
use std::f32::consts::FRAC_PI_2;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "firerange-desktop", about = "First-person shooting gallery demo")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Directory containing the demo models
    #[arg(long, default_value = "./assets")]
    assets_dir: PathBuf,
}

/// Fixed simulation step; the movement constants are per tick at this rate.
const TICK_RATE: f64 = 1.0 / 60.0;

/// Application state.
struct AppState {
    scene: Scene,
    controller: MotionController,
    input: InputState,
    assets: AssetStore,
    blaster: EntityId,
    blaster_half_depth: f32,
    bullet_mesh: MeshHandle,
    last_frame: Instant,
    tick_accumulator: f64,
}

impl AppState {
    fn new(assets_dir: &Path) -> Result<Self> {
        // One-shot sequential loads; a failure here is fatal to setup.
        let mut assets = AssetStore::new();
        let target_asset = assets
            .import_gltf(assets_dir.join("target-small.glb"))
            .context("load target model")?;
        let blaster_asset = assets
            .import_gltf(assets_dir.join("blaster-a.glb"))
            .context("load blaster model")?;
        let bullet_asset = assets
            .import_gltf(assets_dir.join("bullet-foam.glb"))
            .context("load bullet model")?;

        let target_mesh = MeshHandle(target_asset.0);
        let blaster_mesh = MeshHandle(blaster_asset.0);
        let bullet_mesh = MeshHandle(bullet_asset.0);

        let blaster_half_depth = assets.mesh(blaster_asset)?.bounds.half_depth();

        let mut scene = Scene::new();

        // The four targets line up across the back of the range, turned to
        // face down it.
        for x in [0.0, 1.0, 2.0, -2.0] {
            scene.spawn(
                EntityKind::Target,
                target_mesh,
                Transform {
                    position: Vec3::new(x, 0.0, -3.0),
                    rotation: Quat::from_rotation_y(FRAC_PI_2),
                    ..Transform::default()
                },
            );
        }

        let blaster = scene.spawn(
            EntityKind::Blaster,
            blaster_mesh,
            Transform {
                position: Vec3::new(0.0, 0.0, -1.0),
                ..Transform::default()
            },
        );

        // Camera rides the blaster, slightly up and behind.
        scene.camera.attach(
            blaster,
            Transform {
                position: Vec3::new(0.0, 0.5, 1.0),
                ..Transform::default()
            },
        );

        tracing::info!(entities = scene.entity_count(), "scene assembled");

        Ok(Self {
            scene,
            controller: MotionController::new(blaster),
            input: InputState::new(),
            assets,
            blaster,
            blaster_half_depth,
            bullet_mesh,
            last_frame: Instant::now(),
            tick_accumulator: 0.0,
        })
    }

    fn update(&mut self, dt: f32) {
        self.tick_accumulator += dt as f64;
        while self.tick_accumulator >= TICK_RATE {
            self.tick_accumulator -= TICK_RATE;
            self.controller.update(&mut self.scene, &self.input);
            self.scene.step();
        }
    }

    fn handle_key(&mut self, key: KeyCode, pressed: bool) {
        let Some(name) = key_name(key) else {
            return;
        };
        if pressed {
            self.input.press(name);
            return;
        }
        let was_held = self.input.release(name);
        if name == FIRE_KEY && was_held {
            self.fire();
        }
    }

    /// Spawn one bullet at the blaster's muzzle. One release, one bullet.
    fn fire(&mut self) {
        let Some(blaster) = self.scene.get(self.blaster).copied() else {
            return;
        };
        let facing = self.scene.camera_forward();
        let pose = bullet_transform(&blaster.transform, facing, self.blaster_half_depth);
        let id = self
            .scene
            .spawn(EntityKind::Bullet, self.bullet_mesh, pose);
        tracing::info!(bullet = ?id, "fired");
    }
}

/// Map a physical key to the lowercase key name the input layer tracks.
fn key_name(key: KeyCode) -> Option<&'static str> {
    match key {
        KeyCode::KeyW => Some("w"),
        KeyCode::KeyA => Some("a"),
        KeyCode::KeyS => Some("s"),
        KeyCode::KeyD => Some("d"),
        KeyCode::ArrowUp => Some("arrowup"),
        KeyCode::ArrowLeft => Some("arrowleft"),
        KeyCode::ArrowDown => Some("arrowdown"),
        KeyCode::ArrowRight => Some("arrowright"),
        KeyCode::ShiftLeft | KeyCode::ShiftRight => Some("shift"),
        KeyCode::Space => Some(FIRE_KEY),
        _ => None,
    }
}

struct GpuApp {
    state: AppState,
    window: Option<Arc<Window>>,
    surface: Option<wgpu::Surface<'static>>,
    device: Option<wgpu::Device>,
    queue: Option<wgpu::Queue>,
    config: Option<wgpu::SurfaceConfiguration>,
    renderer: Option<WgpuRenderer>,
}

impl GpuApp {
    fn new(state: AppState) -> Self {
        Self {
            state,
            window: None,
            surface: None,
            device: None,
            queue: None,
            config: None,
            renderer: None,
        }
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Fire Range")
            .with_inner_size(PhysicalSize::new(1280u32, 720));
        let window = Arc::new(event_loop.create_window(attrs).expect("create window"));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .expect("create surface");

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .expect("find adapter");

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("firerange_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .expect("create device");

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        self.state.scene.camera.aspect = size.width as f32 / size.height.max(1) as f32;

        let mut renderer = WgpuRenderer::new(&device, surface_format, size.width, size.height);
        for (asset_id, mesh) in self.state.assets.meshes() {
            renderer.upload_mesh(&device, MeshHandle(asset_id.0), mesh);
        }

        self.window = Some(window);
        self.surface = Some(surface);
        self.device = Some(device);
        self.queue = Some(queue);
        self.config = Some(config);
        self.renderer = Some(renderer);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let (Some(surface), Some(device), Some(config)) =
                    (&self.surface, &self.device, &mut self.config)
                {
                    config.width = new_size.width.max(1);
                    config.height = new_size.height.max(1);
                    surface.configure(device, config);
                    self.state.scene.camera.aspect =
                        config.width as f32 / config.height.max(1) as f32;
                    if let Some(renderer) = &mut self.renderer {
                        renderer.resize(device, config.width, config.height);
                    }
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: key_state,
                        ..
                    },
                ..
            } => {
                self.state
                    .handle_key(key, key_state == ElementState::Pressed);
            }
            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt = (now - self.state.last_frame).as_secs_f32().min(0.1);
                self.state.last_frame = now;
                self.state.update(dt);

                let (Some(surface), Some(device), Some(queue)) =
                    (&self.surface, &self.device, &self.queue)
                else {
                    return;
                };

                let output = match surface.get_current_texture() {
                    Ok(t) => t,
                    Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                        if let Some(config) = &self.config {
                            surface.configure(device, config);
                        }
                        return;
                    }
                    Err(e) => {
                        tracing::error!("surface error: {e}");
                        return;
                    }
                };

                let view = output
                    .texture
                    .create_view(&wgpu::TextureViewDescriptor::default());

                if let Some(renderer) = &self.renderer {
                    renderer.render(device, queue, &view, &self.state.scene);
                }

                output.present();
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("firerange-desktop starting");

    // Asset-load failures propagate out of here and abort startup.
    let state = AppState::new(&cli.assets_dir)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state);
    event_loop.run_app(&mut app)?;

    Ok(())
}
