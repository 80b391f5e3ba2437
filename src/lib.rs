//! # Plume
//!
//! Two small real-time 3D demos over a shared core: a ballistic particle
//! simulation with cylinder collision and recursive emission, and a
//! textured OBJ mesh viewer with camera, light, and mesh manipulation.
//!
//! The interesting part is the simulation core ([`Emitter`] / [`Particle`]
//! / [`Cylinder`]): particle lifecycle, damped cylinder bounces, grounding,
//! and generation-blended child emission, all on an injected clock so the
//! physics is deterministic under test. The rest is adapters — wgpu
//! renderers that turn simulation state into draw calls, and a winit shell
//! that drives update-then-draw each frame.
//!
//! ## Quick start
//!
//! ```ignore
//! use plume::prelude::*;
//!
//! struct Fountain {
//!     camera: Camera,
//!     emitter: Emitter,
//!     env: Environment,
//!     disks: DiskRenderer,
//! }
//!
//! impl Demo for Fountain {
//!     fn update(&mut self, ctx: &mut FrameCtx) {
//!         self.emitter.update(ctx.time.elapsed(), &self.env, &[]);
//!     }
//!
//!     fn render(&mut self, gpu: &mut GpuState) -> Result<(), wgpu::SurfaceError> {
//!         let instances: Vec<DiskInstance> = self
//!             .emitter
//!             .particles()
//!             .iter()
//!             .map(|p| DiskInstance::new(p.position, p.size, p.color))
//!             .collect();
//!         self.disks.upload(&gpu.queue, &instances);
//!         self.disks.set_view(&gpu.queue, self.camera.fullview(), gpu.viewport());
//!         let mut frame = gpu.begin_frame()?;
//!         self.disks.draw(&mut frame.scene_pass(gpu.depth_view()));
//!         gpu.finish_frame(frame);
//!         Ok(())
//!     }
//! }
//!
//! fn main() -> Result<(), plume::ShellError> {
//!     plume::run("Fountain", (800, 800), |gpu| {
//!         Ok(Fountain {
//!             camera: Camera::new(0.0, 0.3, 5.0),
//!             emitter: Emitter::new(0.0),
//!             env: Environment::default(),
//!             disks: DiskRenderer::new(gpu, 5000, true),
//!         })
//!     })
//! }
//! ```
//!
//! Simulation state is owned by one update loop and only read at draw
//! time; nothing here is thread-safe by design. The particle collection
//! additionally recycles slots by swap-remove, so its order changes from
//! frame to frame.

pub mod camera;
pub mod cylinder;
pub mod emitter;
pub mod error;
pub mod gpu;
pub mod input;
pub mod mesh;
pub mod particle;
pub mod shell;
pub mod time;
pub mod widgets;

pub use glam::{Mat4, Vec2, Vec3, Vec4};

pub use camera::Camera;
pub use cylinder::Cylinder;
pub use emitter::{blend, Emitter, DEFAULT_CAPACITY, MAX_LEVEL};
pub use error::{GpuError, MeshError, ShellError, TextureError};
pub use gpu::{CylinderRenderer, DiskInstance, DiskRenderer, GpuState, MeshRenderer, Texture};
pub use mesh::MeshData;
pub use particle::{Environment, Particle};
pub use shell::{run, Demo, FrameCtx};
pub use time::Time;
pub use widgets::{mouse_over, Framer, Mover, Picked};

/// Convenient re-exports for demo programs.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::cylinder::Cylinder;
    pub use crate::emitter::Emitter;
    pub use crate::gpu::{
        CylinderRenderer, DiskInstance, DiskRenderer, GpuState, MeshRenderer, Texture,
    };
    pub use crate::input::{KeyCode, MouseButton};
    pub use crate::mesh::MeshData;
    pub use crate::particle::{Environment, Particle};
    pub use crate::shell::{run, Demo, FrameCtx};
    pub use crate::time::Time;
    pub use crate::widgets::{mouse_over, Framer, Mover, Picked};
    pub use crate::{Mat4, Vec2, Vec3, Vec4};
}
