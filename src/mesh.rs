//! OBJ mesh loading and canonical normalization.
//!
//! Produces CPU-side geometry the GPU layer uploads as one interleaved
//! vertex buffer. OBJ corners may index position, uv, and normal
//! independently; loading dedupes each unique index triple into a single
//! vertex and fan-triangulates larger polygons.

use std::collections::HashMap;
use std::path::Path;

use glam::{Vec2, Vec3};
use obj::Obj;

use crate::error::MeshError;

/// Geometry ready for upload: parallel per-vertex arrays plus triangles.
///
/// The three arrays are always the same length once `read` succeeds.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub points: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub triangles: Vec<[u32; 3]>,
}

impl MeshData {
    /// Load an ASCII OBJ file.
    ///
    /// Requires normals and uvs on every corner; a file without them fails
    /// with [`MeshError::Inconsistent`] before any buffer is built, so the
    /// caller can degrade to rendering without the mesh.
    pub fn read<P: AsRef<Path>>(path: P) -> Result<Self, MeshError> {
        let obj = Obj::load(path.as_ref())?;
        let data = obj.data;

        let inconsistent = MeshError::Inconsistent {
            points: data.position.len(),
            normals: data.normal.len(),
            uvs: data.texture.len(),
        };
        if data.position.is_empty() || data.normal.is_empty() || data.texture.is_empty() {
            return Err(inconsistent);
        }

        let mut mesh = MeshData::default();
        let mut vertex_ids: HashMap<(usize, usize, usize), u32> = HashMap::new();

        for object in &data.objects {
            for group in &object.groups {
                for poly in &group.polys {
                    let mut corners = Vec::with_capacity(poly.0.len());
                    for tuple in &poly.0 {
                        let (uv, normal) = match (tuple.1, tuple.2) {
                            (Some(uv), Some(normal)) => (uv, normal),
                            _ => return Err(inconsistent),
                        };
                        let key = (tuple.0, uv, normal);
                        let id = *vertex_ids.entry(key).or_insert_with(|| {
                            mesh.points.push(Vec3::from(data.position[tuple.0]));
                            mesh.normals.push(Vec3::from(data.normal[normal]));
                            mesh.uvs.push(Vec2::from(data.texture[uv]));
                            mesh.points.len() as u32 - 1
                        });
                        corners.push(id);
                    }
                    // fan-triangulate quads and larger polygons
                    for i in 1..corners.len().saturating_sub(1) {
                        mesh.triangles
                            .push([corners[0], corners[i], corners[i + 1]]);
                    }
                }
            }
        }

        Ok(mesh)
    }

    /// Center the point cloud on the origin and scale it so its largest
    /// half-extent becomes `scale`.
    pub fn normalize(&mut self, scale: f32) {
        if self.points.is_empty() {
            return;
        }
        let mut min = self.points[0];
        let mut max = self.points[0];
        for p in &self.points {
            min = min.min(*p);
            max = max.max(*p);
        }
        let center = (min + max) * 0.5;
        let half_extent = ((max - min) * 0.5).max_element();
        if half_extent <= 0.0 {
            return;
        }
        let factor = scale / half_extent;
        for p in &mut self.points {
            *p = (*p - center) * factor;
        }
    }

    /// A square horizontal quad at `height`, uv-mapped corner to corner.
    pub fn ground_quad(size: f32, height: f32) -> Self {
        let points = vec![
            Vec3::new(-size, height, -size),
            Vec3::new(size, height, -size),
            Vec3::new(size, height, size),
            Vec3::new(-size, height, size),
        ];
        let normals = vec![Vec3::Y; 4];
        let uvs = vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];
        let triangles = vec![[0, 1, 2], [0, 2, 3]];
        Self {
            points,
            normals,
            uvs,
            triangles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_obj(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn reads_a_textured_triangle() {
        let path = write_temp_obj(
            "plume_tri.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1\n",
        );
        let mesh = MeshData::read(&path).unwrap();
        assert_eq!(mesh.points.len(), 3);
        assert_eq!(mesh.normals.len(), 3);
        assert_eq!(mesh.uvs.len(), 3);
        assert_eq!(mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn quads_fan_into_two_triangles() {
        let path = write_temp_obj(
            "plume_quad.obj",
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\n\
             vn 0 0 1\n\
             f 1/1/1 2/2/1 3/3/1 4/4/1\n",
        );
        let mesh = MeshData::read(&path).unwrap();
        assert_eq!(mesh.triangles.len(), 2);
    }

    #[test]
    fn missing_normals_report_inconsistent_counts() {
        let path = write_temp_obj(
            "plume_no_normals.obj",
            "v 0 0 0\nv 1 0 0\nv 0 1 0\n\
             vt 0 0\nvt 1 0\nvt 0 1\n\
             f 1/1 2/2 3/3\n",
        );
        match MeshData::read(&path) {
            Err(MeshError::Inconsistent { normals: 0, .. }) => {}
            other => panic!("expected inconsistent mesh, got {:?}", other.map(|m| m.points)),
        }
    }

    #[test]
    fn normalize_centers_and_bounds_the_cloud() {
        let mut mesh = MeshData {
            points: vec![Vec3::new(2.0, 0.0, 0.0), Vec3::new(6.0, 2.0, 0.0)],
            normals: vec![Vec3::Y; 2],
            uvs: vec![Vec2::ZERO; 2],
            triangles: vec![],
        };
        mesh.normalize(0.8);
        for p in &mesh.points {
            assert!(p.abs().max_element() <= 0.8 + 1e-5);
        }
        let center = (mesh.points[0] + mesh.points[1]) * 0.5;
        assert!(center.length() < 1e-5);
    }

    #[test]
    fn ground_quad_shape() {
        let quad = MeshData::ground_quad(5.0, -0.55);
        assert_eq!(quad.points.len(), 4);
        assert_eq!(quad.triangles.len(), 2);
        assert!(quad.points.iter().all(|p| p.y == -0.55));
    }
}
