//! Ballistic particles bouncing off cylinders.
//!
//! Root particles launch upward from a point above the scene, fall under
//! gravity, bounce off three cylinders, and on grounding emit recursive
//! child generations until their lifetimes expire. Left-drag orbits the
//! camera (shift pans), dragging the red disk moves the light, and the
//! wheel dollies.

use plume::prelude::*;

struct ParticlesDemo {
    camera: Camera,
    light: Vec3,
    picked: Picked,
    mover: Mover,
    env: Environment,
    cylinders: Vec<Cylinder>,
    emitter: Emitter,
    cylinder_renderer: CylinderRenderer,
    particle_disks: DiskRenderer,
    markers: DiskRenderer,
}

impl Demo for ParticlesDemo {
    fn update(&mut self, ctx: &mut FrameCtx<'_>) {
        let input = ctx.input;

        if input.mouse_pressed(MouseButton::Left) {
            let cursor = input.mouse_position_y_up(ctx.viewport.y);
            if mouse_over(cursor, self.light, self.camera.fullview(), ctx.viewport) {
                self.picked = Picked::Mover;
                self.mover.down(self.light, self.camera.modelview());
            } else {
                self.picked = Picked::Camera;
            }
        }
        if input.mouse_held(MouseButton::Left) {
            match self.picked {
                Picked::Mover => {
                    let cursor = input.mouse_position_y_up(ctx.viewport.y);
                    self.light = self.mover.drag(
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
                _ => {}
            }
        }
        if input.mouse_released(MouseButton::Left) {
            self.picked = Picked::None;
        }
        let scroll = input.scroll_delta();
        if scroll != 0.0 {
            self.camera.mouse_wheel(scroll);
        }

        self.emitter
            .update(ctx.time.elapsed(), &self.env, &self.cylinders);
    }

    fn render(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError> {
        let modelview = self.camera.modelview();
        let fullview = self.camera.fullview();
        self.cylinder_renderer
            .set_view(&gpu.queue, modelview, self.camera.persp(), self.light);

        let instances: Vec<DiskInstance> = self
            .emitter
            .particles()
            .iter()
            .map(|p| DiskInstance::new(p.position, p.size, p.color))
            .collect();
        self.particle_disks.upload(&gpu.queue, &instances);
        self.particle_disks
            .set_view(&gpu.queue, fullview, gpu.viewport());

        self.markers.upload(
            &gpu.queue,
            &[DiskInstance::new(self.light, 12.0, Vec3::new(1.0, 0.0, 0.0))],
        );
        self.markers.set_view(&gpu.queue, fullview, gpu.viewport());

        let mut frame = gpu.begin_frame()?;
        {
            let mut pass = frame.scene_pass(gpu.depth_view());
            self.cylinder_renderer.draw(&mut pass);
            self.particle_disks.draw(&mut pass);
            self.markers.draw(&mut pass);
        }
        gpu.finish_frame(frame);
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.resize(width, height);
    }
}

fn main() -> Result<(), plume::ShellError> {
    tracing_subscriber::fmt::init();

    plume::run("Particles", (800, 800), |gpu| {
        let env = Environment::default();
        let cylinders = vec![
            Cylinder::new(
                0.5,
                0.25,
                Vec3::new(1.0, 0.7, 0.0),
                Vec3::new(-0.3, env.ground, 0.6),
            ),
            Cylinder::new(
                0.35,
                0.5,
                Vec3::new(0.0, 0.0, 0.7),
                Vec3::new(0.3, env.ground, -0.2),
            ),
            Cylinder::new(
                0.25,
                0.35,
                Vec3::new(0.0, 0.7, 0.0),
                Vec3::new(0.2, env.ground, -0.7),
            ),
        ];

        let mut camera = Camera::new(90.0_f32.to_radians(), 20.0_f32.to_radians(), 5.0);
        camera.resize(gpu.config.width, gpu.config.height);

        let cylinder_renderer = CylinderRenderer::new(gpu, &cylinders);
        let particle_disks = DiskRenderer::new(gpu, plume::DEFAULT_CAPACITY as u32, true);
        let markers = DiskRenderer::new(gpu, 4, false);

        Ok(ParticlesDemo {
            camera,
            light: Vec3::new(1.0, 1.0, -0.6),
            picked: Picked::None,
            mover: Mover::new(),
            env,
            cylinders,
            emitter: Emitter::new(0.0),
            cylinder_renderer,
            particle_disks,
            markers,
        })
    })
}
