//! Error types for plume.
//!
//! Setup paths (GPU, textures, meshes, the window shell) return structured
//! errors so callers can degrade instead of crashing; the simulation core
//! itself has no failure modes.

use std::fmt;

/// Errors that can occur during GPU initialization.
#[derive(Debug)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    NoAdapter,
    /// Failed to create GPU device.
    DeviceCreation(wgpu::RequestDeviceError),
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => write!(f, "Failed to create GPU surface: {}", e),
            GpuError::NoAdapter => write!(f, "No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support."),
            GpuError::DeviceCreation(e) => write!(f, "Failed to create GPU device: {}", e),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            GpuError::NoAdapter => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// Errors that can occur during texture loading.
#[derive(Debug)]
pub enum TextureError {
    /// Failed to decode image data.
    ImageLoad(image::ImageError),
    /// Failed to read file from disk.
    Io(std::io::Error),
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::ImageLoad(e) => write!(f, "Failed to load image: {}", e),
            TextureError::Io(e) => write!(f, "Failed to read texture file: {}", e),
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::ImageLoad(e) => Some(e),
            TextureError::Io(e) => Some(e),
        }
    }
}

impl From<image::ImageError> for TextureError {
    fn from(e: image::ImageError) -> Self {
        TextureError::ImageLoad(e)
    }
}

impl From<std::io::Error> for TextureError {
    fn from(e: std::io::Error) -> Self {
        TextureError::Io(e)
    }
}

/// Errors that can occur while loading mesh geometry.
#[derive(Debug)]
pub enum MeshError {
    /// Failed to read or parse the OBJ file.
    Load(obj::ObjError),
    /// Point, normal, and uv counts disagree; the buffer is left unbuilt.
    Inconsistent {
        points: usize,
        normals: usize,
        uvs: usize,
    },
}

impl fmt::Display for MeshError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeshError::Load(e) => write!(f, "Failed to load mesh: {}", e),
            MeshError::Inconsistent {
                points,
                normals,
                uvs,
            } => write!(
                f,
                "Mesh missing points, normals, or uvs ({} points, {} normals, {} uvs)",
                points, normals, uvs
            ),
        }
    }
}

impl std::error::Error for MeshError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MeshError::Load(e) => Some(e),
            MeshError::Inconsistent { .. } => None,
        }
    }
}

impl From<obj::ObjError> for MeshError {
    fn from(e: obj::ObjError) -> Self {
        MeshError::Load(e)
    }
}

/// Errors that can occur when running the window shell.
#[derive(Debug)]
pub enum ShellError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
}

impl fmt::Display for ShellError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShellError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            ShellError::Window(e) => write!(f, "Failed to create window: {}", e),
            ShellError::Gpu(e) => write!(f, "GPU error: {}", e),
        }
    }
}

impl std::error::Error for ShellError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ShellError::EventLoop(e) => Some(e),
            ShellError::Window(e) => Some(e),
            ShellError::Gpu(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for ShellError {
    fn from(e: winit::error::EventLoopError) -> Self {
        ShellError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for ShellError {
    fn from(e: winit::error::OsError) -> Self {
        ShellError::Window(e)
    }
}

impl From<GpuError> for ShellError {
    fn from(e: GpuError) -> Self {
        ShellError::Gpu(e)
    }
}
