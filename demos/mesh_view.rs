//! Textured OBJ mesh above a textured ground quad.
//!
//! Usage: `mesh_view [mesh.obj] [mesh-texture] [ground-texture]`
//!
//! Every asset degrades gracefully: a missing or malformed mesh leaves a
//! ground-only scene, a missing texture falls back to a checkerboard.
//! Left-drag orbits the camera (shift pans); dragging the yellow disk moves
//! the light and the white disk moves the mesh; with the mesh picked the
//! wheel spins it, otherwise the wheel dollies the camera.

use plume::prelude::*;
use tracing::warn;

/// Widget markers stay visible this long after the cursor last moved.
const MARKER_LINGER_SECS: f32 = 1.0;

struct MeshViewDemo {
    camera: Camera,
    light: Vec3,
    picked: Picked,
    mover: Mover,
    framer: Framer,
    mesh_base: Vec3,
    mesh: Option<MeshRenderer>,
    ground: MeshRenderer,
    markers: DiskRenderer,
    now: f32,
    last_mouse_move: f32,
}

impl Demo for MeshViewDemo {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        let input = ctx.input;
        self.now = ctx.time.elapsed();

        if input.mouse_delta() != Vec2::ZERO {
            self.last_mouse_move = self.now;
        }

        if input.mouse_pressed(MouseButton::Left) {
            let cursor = input.mouse_position_y_up(ctx.viewport.y);
            let fullview = self.camera.fullview();
            if mouse_over(cursor, self.light, fullview, ctx.viewport) {
                self.picked = Picked::Mover;
                self.mover.down(self.light, self.camera.modelview());
            } else if self.mesh.is_some()
                && mouse_over(cursor, self.mesh_base, fullview, ctx.viewport)
            {
                self.picked = Picked::Framer;
                self.framer.down(self.mesh_base, self.camera.modelview());
            } else {
                self.picked = Picked::Camera;
            }
        }
        if input.mouse_held(MouseButton::Left) {
            let cursor = input.mouse_position_y_up(ctx.viewport.y);
            match self.picked {
                Picked::Mover => {
                    self.light = self.mover.drag(
                        cursor,
                        self.camera.modelview(),
                        self.camera.persp(),
                        ctx.viewport,
                    );
                }
                Picked::Framer => {
                    self.mesh_base = self.framer.drag(
                        cursor,
                        self.camera.modelview(),
                        self.camera.persp(),
                        ctx.viewport,
                    );
                }
                Picked::Camera => {
                    self.camera
                        .mouse_drag(input.mouse_delta(), input.key_held(KeyCode::Shift));
                }
                Picked::None => {}
            }
        }
        if input.mouse_released(MouseButton::Left) {
            self.picked = Picked::None;
        }

        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            if self.picked == Picked::Framer {
                self.framer.wheel(scroll > 0.0);
            } else {
                self.camera.mouse_wheel(scroll);
            }
        }
    }

    fn render(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError> {
        let modelview = self.camera.modelview();
        let persp = self.camera.persp();
        let light_cam = modelview.transform_point3(self.light);

        self.ground.set_view(&gpu.queue, modelview, persp, light_cam);
        if let Some(mesh) = &self.mesh {
            let mesh_modelview = modelview * self.framer.transform(self.mesh_base);
            mesh.set_view(&gpu.queue, mesh_modelview, persp, light_cam);
        }

        let show_markers = self.now - self.last_mouse_move < MARKER_LINGER_SECS;
        let mut marker_instances = Vec::new();
        if show_markers {
            marker_instances.push(DiskInstance::new(
                self.light,
                9.0,
                Vec3::new(1.0, 1.0, 0.0),
            ));
            if self.mesh.is_some() {
                marker_instances.push(DiskInstance::new(self.mesh_base, 9.0, Vec3::ONE));
            }
        }
        self.markers.upload(&gpu.queue, &marker_instances);
        self.markers
            .set_view(&gpu.queue, self.camera.fullview(), gpu.viewport());

        let mut frame = gpu.begin_frame()?;
        {
            let mut pass = frame.scene_pass(gpu.depth_view());
            if let Some(mesh) = &self.mesh {
                mesh.draw(&mut pass);
            }
            self.ground.draw(&mut pass);
            self.markers.draw(&mut pass);
        }
        gpu.finish_frame(frame);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}

/// Load a texture, falling back to the checkerboard when the path is
/// missing or the file will not decode.
fn texture_or_fallback(gpu: &GpuState, path: Option<String>) -> Texture {
    match path {
        Some(path) => match Texture::from_file(&gpu.device, &gpu.queue, &path) {
            Ok(texture) => texture,
            Err(e) => {
                warn!(path = %path, error = %e, "texture load failed, using checkerboard");
                Texture::checkerboard(&gpu.device, &gpu.queue)
            }
        },
        None => Texture::checkerboard(&gpu.device, &gpu.queue),
    }
}

fn main() -> Result<(), plume::ShellError> {
    tracing_subscriber::fmt::init();

    let mesh_path = std::env::args().nth(1);
    let mesh_texture_path = std::env::args().nth(2);
    let ground_texture_path = std::env::args().nth(3);

    plume::run("Mesh Viewer", (600, 600), |gpu| {
        let mesh = match &mesh_path {
            Some(path) => match MeshData::read(path) {
                Ok(mut data) => {
                    data.normalize(0.8);
                    let texture = texture_or_fallback(gpu, mesh_texture_path.clone());
                    Some(MeshRenderer::new(gpu, &data, &texture))
                }
                Err(e) => {
                    warn!(path = %path, error = %e, "mesh load failed, rendering ground only");
                    None
                }
            },
            None => {
                warn!("no mesh argument given, rendering ground only");
                None
            }
        };

        let ground_texture = texture_or_fallback(gpu, ground_texture_path.clone());
        let ground = MeshRenderer::new(gpu, &MeshData::ground_quad(5.0, -0.55), &ground_texture);

        let mut camera = Camera::new(0.0, 0.0, 5.0);
        camera.resize(gpu.config.width, gpu.config.height);

        Ok(MeshViewDemo {
            camera,
            light: Vec3::new(-0.2, 0.4, 0.3),
            picked: Picked::None,
            mover: Mover::new(),
            framer: Framer::new(),
            mesh_base: Vec3::ZERO,
            mesh,
            ground,
            markers: DiskRenderer::new(gpu, 4, false),
            now: 0.0,
            last_mouse_move: 0.0,
        })
    })
}
