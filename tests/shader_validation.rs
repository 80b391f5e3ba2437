//! Validate every embedded WGSL shader with naga.
//!
//! Catches shader syntax and type errors in `cargo test` instead of at
//! first window open.

use naga::front::wgsl;
use naga::valid::{Capabilities, ValidationFlags, Validator};

use plume::gpu::{CYLINDER_WGSL, DISK_WGSL, MESH_WGSL};

fn validate(name: &str, source: &str) {
    let module = match wgsl::parse_str(source) {
        Ok(module) => module,
        Err(e) => panic!("{name} shader failed to parse: {}", e.emit_to_string(source)),
    };
    let mut validator = Validator::new(ValidationFlags::all(), Capabilities::all());
    if let Err(e) = validator.validate(&module) {
        panic!("{name} shader failed validation: {e:?}");
    }
}

#[test]
fn disk_shader_is_valid() {
    validate("disk", DISK_WGSL);
}

#[test]
fn cylinder_shader_is_valid() {
    validate("cylinder", CYLINDER_WGSL);
}

#[test]
fn mesh_shader_is_valid() {
    validate("mesh", MESH_WGSL);
}
