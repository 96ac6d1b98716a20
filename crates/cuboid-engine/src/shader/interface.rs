//! Stage interface reflection and link checks.

use std::collections::BTreeMap;

use naga::{AddressSpace, Binding, Module, ShaderStage, TypeInner};

use super::error::ShaderError;

/// Name of the per-draw transform uniform in the vertex stage.
pub const TRANSFORM_UNIFORM: &str = "transform";
/// Bind group / binding index of [`TRANSFORM_UNIFORM`].
pub const TRANSFORM_GROUP: u32 = 0;
pub const TRANSFORM_BINDING: u32 = 0;
/// Vertex attribute location of the object-space position.
pub const POSITION_LOCATION: u32 = 0;

/// Reflected, link-checked interface of a vertex + fragment pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramInterface {
    /// Locations passed from the vertex to the fragment stage.
    pub varyings: Vec<u32>,
    /// Fragment color target locations.
    pub color_targets: Vec<u32>,
}

/// User-defined (`@location`) inputs and outputs of one entry point.
#[derive(Debug, Default)]
struct StageIo {
    inputs: BTreeMap<u32, TypeInner>,
    outputs: BTreeMap<u32, TypeInner>,
}

pub(super) fn link(
    vertex: &Module,
    vertex_entry: &str,
    fragment: &Module,
    fragment_entry: &str,
) -> Result<ProgramInterface, ShaderError> {
    let vs = stage_io(vertex, vertex_entry, ShaderStage::Vertex)?;
    let fs = stage_io(fragment, fragment_entry, ShaderStage::Fragment)?;

    check_vertex_inputs(&vs)?;
    check_transform_uniform(vertex)?;

    for (location, ty) in &fs.inputs {
        match vs.outputs.get(location) {
            None => {
                return Err(ShaderError::link(format!(
                    "fragment input at location {location} is not written by the vertex stage"
                )));
            }
            Some(out_ty) if out_ty != ty => {
                return Err(ShaderError::link(format!(
                    "varying at location {location} is {out_ty:?} in the vertex stage \
                     but {ty:?} in the fragment stage"
                )));
            }
            Some(_) => {}
        }
    }

    if !fs.outputs.contains_key(&0) {
        return Err(ShaderError::link("fragment stage does not write color target 0"));
    }

    Ok(ProgramInterface {
        varyings: fs.inputs.keys().copied().collect(),
        color_targets: fs.outputs.keys().copied().collect(),
    })
}

fn stage_io(module: &Module, entry: &str, stage: ShaderStage) -> Result<StageIo, ShaderError> {
    let ep = module
        .entry_points
        .iter()
        .find(|ep| ep.name == entry && ep.stage == stage)
        .ok_or_else(|| {
            ShaderError::link(format!("no {stage:?} entry point named `{entry}`"))
        })?;

    let mut io = StageIo::default();

    for arg in &ep.function.arguments {
        collect(module, arg.ty, arg.binding.as_ref(), &mut io.inputs);
    }
    if let Some(result) = &ep.function.result {
        collect(module, result.ty, result.binding.as_ref(), &mut io.outputs);
    }

    Ok(io)
}

// Bound values are recorded directly; unbound structs contribute their bound members.
fn collect(
    module: &Module,
    ty: naga::Handle<naga::Type>,
    binding: Option<&Binding>,
    into: &mut BTreeMap<u32, TypeInner>,
) {
    let inner = &module.types[ty].inner;
    match (binding, inner) {
        (Some(Binding::Location { location, .. }), _) => {
            into.insert(*location, inner.clone());
        }
        (Some(Binding::BuiltIn(_)), _) => {}
        (None, TypeInner::Struct { members, .. }) => {
            for m in members {
                collect(module, m.ty, m.binding.as_ref(), into);
            }
        }
        (None, _) => {}
    }
}

fn check_vertex_inputs(vs: &StageIo) -> Result<(), ShaderError> {
    let expected = TypeInner::Vector {
        size: naga::VectorSize::Tri,
        scalar: naga::Scalar::F32,
    };

    match vs.inputs.get(&POSITION_LOCATION) {
        Some(ty) if *ty == expected => {}
        Some(ty) => {
            return Err(ShaderError::link(format!(
                "vertex input at location {POSITION_LOCATION} is {ty:?}, expected vec3<f32>"
            )));
        }
        None => {
            return Err(ShaderError::link(format!(
                "vertex stage has no input at location {POSITION_LOCATION}"
            )));
        }
    }

    if let Some(extra) = vs.inputs.keys().find(|&&l| l != POSITION_LOCATION) {
        return Err(ShaderError::link(format!(
            "vertex input at location {extra} has no matching vertex attribute"
        )));
    }

    Ok(())
}

fn check_transform_uniform(vertex: &Module) -> Result<(), ShaderError> {
    let Some((_, var)) = vertex
        .global_variables
        .iter()
        .find(|(_, v)| v.name.as_deref() == Some(TRANSFORM_UNIFORM))
    else {
        return Err(ShaderError::link(format!(
            "vertex stage declares no `{TRANSFORM_UNIFORM}` uniform"
        )));
    };

    if var.space != AddressSpace::Uniform {
        return Err(ShaderError::link(format!(
            "`{TRANSFORM_UNIFORM}` must be declared `var<uniform>`"
        )));
    }

    let bound_at_expected_slot = var
        .binding
        .as_ref()
        .is_some_and(|b| b.group == TRANSFORM_GROUP && b.binding == TRANSFORM_BINDING);
    if !bound_at_expected_slot {
        return Err(ShaderError::link(format!(
            "`{TRANSFORM_UNIFORM}` must be bound at @group({TRANSFORM_GROUP}) @binding({TRANSFORM_BINDING})"
        )));
    }

    let is_mat4 = matches!(
        vertex.types[var.ty].inner,
        TypeInner::Matrix {
            columns: naga::VectorSize::Quad,
            rows: naga::VectorSize::Quad,
            scalar: naga::Scalar::F32,
        }
    );
    if !is_mat4 {
        return Err(ShaderError::link(format!("`{TRANSFORM_UNIFORM}` must be mat4x4<f32>")));
    }

    Ok(())
}
