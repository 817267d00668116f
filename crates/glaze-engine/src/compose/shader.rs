use std::fmt::Write as _;

use crate::error::LinkError;

use super::plan::CompositionPlan;

/// Highest number of textures one composition can bind.
pub const MAX_MATERIAL_TEXTURES: u32 = 12;

/// First binding of `material_texture_N` in group 1.
pub const FIRST_TEXTURE_BINDING: u32 = 3;

/// WGSL module for one composition, validated before pipeline creation.
#[derive(Debug, Clone)]
pub struct ComposedShader {
    pub source: String,
    pub texture_count: u32,
}

/// Generates the composition's WGSL and validates it with naga.
///
/// Validation stands in for linking: a snippet that does not fit the shared
/// entry points fails here, before the device sees it.
pub fn link(plan: &CompositionPlan, texture_count: u32) -> Result<ComposedShader, LinkError> {
    let link_error = |reason: String| LinkError {
        functions: plan.function_names(),
        reason,
    };

    if texture_count > MAX_MATERIAL_TEXTURES {
        return Err(link_error(format!(
            "{texture_count} textures exceed the limit of {MAX_MATERIAL_TEXTURES}"
        )));
    }

    let source = generate(plan, texture_count);

    let module = naga::front::wgsl::parse_str(&source)
        .map_err(|e| link_error(e.emit_to_string(&source)))?;

    naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    )
    .validate(&module)
    .map_err(|e| link_error(e.emit_to_string(&source)))?;

    log::debug!(
        "linked composition [{}] ({} textures)",
        plan.function_names().join(", "),
        texture_count
    );

    Ok(ComposedShader {
        source,
        texture_count,
    })
}

/// Full WGSL module: vertex stage, material stage, generated dispatch.
pub fn generate(plan: &CompositionPlan, texture_count: u32) -> String {
    let mut out = String::new();
    out.push_str(include_str!("../render/shaders/mesh.wgsl"));
    out.push('\n');
    out.push_str(include_str!("shaders/material_common.wgsl"));
    out.push('\n');

    let _ = writeln!(out, "const MATERIAL_COUNT: u32 = {}u;", plan.material_count());
    let _ = writeln!(out, "const ARGUMENT_STRIDE: u32 = {}u;", plan.argument_stride());
    out.push('\n');

    write_texture_sampling(&mut out, texture_count);

    for function in plan.linked_functions() {
        out.push_str(function.wgsl);
        out.push('\n');
    }

    out.push_str(
        "fn dispatch_material(function_index: i32, input: MaterialInput, args: u32) -> vec4<f32> {\n",
    );
    out.push_str("    var out = vec4<f32>(0.0, 0.0, 0.0, 0.0);\n");
    out.push_str("    switch function_index {\n");
    for (index, function) in plan.linked_functions().iter().enumerate() {
        let _ = writeln!(
            out,
            "        case {index}: {{ out = {}(input, args); }}",
            function.name
        );
    }
    out.push_str("        default: {}\n");
    out.push_str("    }\n");
    out.push_str("    return out;\n");
    out.push_str("}\n");

    out
}

fn write_texture_sampling(out: &mut String, texture_count: u32) {
    for slot in 0..texture_count {
        let _ = writeln!(
            out,
            "@group(1) @binding({}) var material_texture_{slot}: texture_2d<f32>;",
            FIRST_TEXTURE_BINDING + slot
        );
    }

    out.push_str("fn sample_material_texture(slot: u32, uv: vec2<f32>) -> vec4<f32> {\n");
    out.push_str("    var out = vec4<f32>(0.0, 0.0, 0.0, 0.0);\n");
    if texture_count > 0 {
        out.push_str("    switch slot {\n");
        for slot in 0..texture_count {
            let _ = writeln!(
                out,
                "        case {slot}u: {{ out = textureSampleLevel(material_texture_{slot}, material_sampler, uv, 0.0); }}"
            );
        }
        out.push_str("        default: {}\n");
        out.push_str("    }\n");
    }
    out.push_str("    return out;\n");
    out.push_str("}\n\n");
}
