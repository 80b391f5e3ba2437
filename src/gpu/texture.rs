//! Texture decode and upload.
//!
//! Images decode to RGBA8 via the `image` crate. When an asset is missing
//! or malformed the demos fall back to [`Texture::checkerboard`], so a
//! failed load degrades the scene instead of aborting it.

use std::path::Path;

use crate::error::TextureError;

/// A sampled 2D texture: GPU resource, view, and sampler.
pub struct Texture {
    pub texture: wgpu::Texture,
    pub view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl Texture {
    /// Decode an image file and upload it.
    pub fn from_file<P: AsRef<Path>>(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        path: P,
    ) -> Result<Self, TextureError> {
        let bytes = std::fs::read(path.as_ref())?;
        let img = image::load_from_memory(&bytes)?.into_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self::from_rgba(
            device,
            queue,
            &img.into_raw(),
            width,
            height,
            path.as_ref().to_str(),
        ))
    }

    /// Upload raw RGBA8 pixels.
    pub fn from_rgba(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        data: &[u8],
        width: u32,
        height: u32,
        label: Option<&str>,
    ) -> Self {
        let size = wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        };
        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label,
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            data,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            size,
        );
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label,
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        Self {
            texture,
            view,
            sampler,
        }
    }

    /// Procedural fallback: a grey/white checkerboard.
    pub fn checkerboard(device: &wgpu::Device, queue: &wgpu::Queue) -> Self {
        let pixels = checkerboard_rgba(64, 8, [220, 220, 220, 255], [120, 120, 120, 255]);
        Self::from_rgba(device, queue, &pixels, 64, 64, Some("Checkerboard"))
    }
}

/// Generate a size x size RGBA checkerboard with `cell` pixel squares.
pub fn checkerboard_rgba(size: u32, cell: u32, color1: [u8; 4], color2: [u8; 4]) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let color = if ((x / cell) + (y / cell)) % 2 == 0 {
                color1
            } else {
                color2
            };
            data.extend_from_slice(&color);
        }
    }
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkerboard_pixels_alternate_per_cell() {
        let data = checkerboard_rgba(4, 2, [255, 0, 0, 255], [0, 0, 255, 255]);
        assert_eq!(data.len(), 4 * 4 * 4);
        // (0,0) and (2,0) land in different cells
        assert_eq!(&data[0..4], &[255, 0, 0, 255]);
        assert_eq!(&data[2 * 4..2 * 4 + 4], &[0, 0, 255, 255]);
        // (0,0) and (2,2) are both "even" cells
        let idx = (2 * 4 + 2) * 4;
        assert_eq!(&data[idx..idx + 4], &[255, 0, 0, 255]);
    }
}
