use bytemuck::{Pod, Zeroable};

use crate::error::{ResourceError, SetupError};
use crate::material::{Material, MaterialFunction, TextureSource, default_materials};

/// Per-material entry of the descriptor buffer (16 bytes).
///
/// Matches `MaterialDescriptor` in `material_common.wgsl`.
#[repr(C)]
#[derive(Debug, Copy, Clone, Default, PartialEq, Pod, Zeroable)]
pub struct MaterialDescriptor {
    /// Index into the linked (deduplicated) function list.
    pub function_index: i32,
    /// Argument block index; the block starts at `argument_slot * stride`.
    pub argument_slot: i32,
    pub blend: i32,
    pub opacity: f32,
}

pub const MATERIAL_DESCRIPTOR_SIZE: usize = std::mem::size_of::<MaterialDescriptor>();

/// A shading function linked into a composition.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LinkedFunction {
    pub name: &'static str,
    pub wgsl: &'static str,
}

/// CPU side of a composition: linked functions plus packed argument and
/// descriptor bytes, ready for upload.
///
/// Every material keeps its own function instance and argument block. Functions
/// are linked once per distinct name.
#[derive(Debug)]
pub struct CompositionPlan {
    instances: Vec<Box<dyn MaterialFunction>>,
    linked: Vec<LinkedFunction>,
    function_indices: Vec<usize>,
    stride: usize,
    arguments: Vec<u8>,
    descriptors: Vec<MaterialDescriptor>,
}

impl CompositionPlan {
    /// Builds the plan for `materials`, loading external resources through `textures`.
    ///
    /// An empty list composes as a single black color material.
    pub fn compose(
        materials: &[Material],
        textures: &mut dyn TextureSource,
    ) -> Result<Self, ResourceError> {
        let fallback;
        let materials = if materials.is_empty() {
            fallback = default_materials();
            fallback.as_slice()
        } else {
            materials
        };

        let mut instances = Vec::with_capacity(materials.len());
        let mut linked: Vec<LinkedFunction> = Vec::new();
        let mut function_indices = Vec::with_capacity(materials.len());

        for material in materials {
            let mut function = material.make_function();
            function.load_resources(textures)?;

            let index = match linked.iter().position(|f| f.name == function.name()) {
                Some(index) => index,
                None => {
                    linked.push(LinkedFunction {
                        name: function.name(),
                        wgsl: function.wgsl(),
                    });
                    linked.len() - 1
                }
            };

            debug_assert_eq!(function.argument_size() % 4, 0);
            function_indices.push(index);
            instances.push(function);
        }

        let stride = instances
            .iter()
            .map(|f| f.argument_size())
            .max()
            .unwrap_or(0)
            .max(1);

        let mut plan = Self {
            instances,
            linked,
            function_indices,
            stride,
            arguments: Vec::new(),
            descriptors: Vec::new(),
        };
        plan.write(materials);
        Ok(plan)
    }

    /// Refreshes argument and descriptor bytes from a new material list.
    ///
    /// The list must produce the same function sequence as the composed one;
    /// anything else needs a fresh composition.
    pub fn update(&mut self, materials: &[Material]) -> Result<(), SetupError> {
        let fallback;
        let materials = if materials.is_empty() {
            fallback = default_materials();
            fallback.as_slice()
        } else {
            materials
        };

        let unchanged = materials.len() == self.instances.len()
            && materials
                .iter()
                .zip(&self.instances)
                .all(|(m, f)| m.function_name() == f.name());
        if !unchanged {
            return Err(SetupError::CompositionChanged {
                expected: self.instances.iter().map(|f| f.name().to_string()).collect(),
                found: materials.iter().map(|m| m.function_name().to_string()).collect(),
            });
        }

        for (function, material) in self.instances.iter_mut().zip(materials) {
            function.update(material);
        }
        self.write(materials);
        Ok(())
    }

    fn write(&mut self, materials: &[Material]) {
        let stride = self.stride;
        self.arguments.clear();
        self.arguments.resize(stride * self.instances.len(), 0);
        for (slot, function) in self.instances.iter().enumerate() {
            let block = &mut self.arguments[slot * stride..(slot + 1) * stride];
            function.write_arguments(block);
        }

        self.descriptors.clear();
        self.descriptors.extend(materials.iter().enumerate().map(|(i, material)| {
            MaterialDescriptor {
                function_index: self.function_indices[i] as i32,
                argument_slot: i as i32,
                blend: material.blend_mode().index(),
                opacity: material.opacity() as f32,
            }
        }));
    }

    #[inline]
    pub fn linked_functions(&self) -> &[LinkedFunction] {
        &self.linked
    }

    pub fn function_names(&self) -> Vec<String> {
        self.linked.iter().map(|f| f.name.to_string()).collect()
    }

    #[inline]
    pub fn material_count(&self) -> usize {
        self.instances.len()
    }

    /// Bytes between consecutive argument blocks. Never zero.
    #[inline]
    pub fn argument_stride(&self) -> usize {
        self.stride
    }

    #[inline]
    pub fn argument_bytes(&self) -> &[u8] {
        &self.arguments
    }

    #[inline]
    pub fn descriptors(&self) -> &[MaterialDescriptor] {
        &self.descriptors
    }

    #[inline]
    pub fn descriptor_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.descriptors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::BlendMode;
    use crate::paint::ColorRgb;

    #[derive(Default)]
    struct FakeTextures {
        loaded: Vec<String>,
    }

    impl TextureSource for FakeTextures {
        fn load_texture(&mut self, name: &str) -> Result<u32, ResourceError> {
            if name.starts_with("missing") {
                return Err(ResourceError::NotFound(name.to_string()));
            }
            self.loaded.push(name.to_string());
            Ok(self.loaded.len() as u32 - 1)
        }
    }

    fn compose(materials: &[Material]) -> CompositionPlan {
        CompositionPlan::compose(materials, &mut FakeTextures::default()).unwrap()
    }

    #[test]
    fn shared_function_is_linked_once() {
        let plan = compose(&[
            Material::color(ColorRgb::white()),
            Material::normal(),
            Material::color(ColorRgb::black()).blend(BlendMode::Multiply, 0.5),
        ]);

        assert_eq!(plan.function_names(), vec!["color_material", "normal_material"]);
        let d = plan.descriptors();
        assert_eq!(d.len(), 3);
        assert_eq!(d[0].function_index, 0);
        assert_eq!(d[1].function_index, 1);
        assert_eq!(d[2].function_index, 0);
    }

    #[test]
    fn function_index_points_at_matching_name() {
        let materials = [
            Material::normal(),
            Material::fresnel(ColorRgb::white(), 2.0),
            Material::texture("wood"),
            Material::fresnel(ColorRgb::black(), 1.0),
        ];
        let plan = compose(&materials);
        for (material, d) in materials.iter().zip(plan.descriptors()) {
            let linked = plan.linked_functions()[d.function_index as usize];
            assert_eq!(linked.name, material.function_name());
        }
    }

    #[test]
    fn descriptors_carry_slot_blend_and_opacity() {
        let plan = compose(&[
            Material::normal(),
            Material::color(ColorRgb::white()).blend(BlendMode::Overlay, 0.25),
        ]);
        let d = plan.descriptors()[1];
        assert_eq!(d.argument_slot, 1);
        assert_eq!(d.blend, BlendMode::Overlay.index());
        assert_eq!(d.opacity, 0.25);
        assert_eq!(plan.descriptor_bytes().len(), 2 * MATERIAL_DESCRIPTOR_SIZE);
    }

    #[test]
    fn stride_is_largest_argument_block() {
        let plan = compose(&[
            Material::color(ColorRgb::white()),
            Material::fresnel(ColorRgb::white(), 1.0),
            Material::matcap("clay"),
        ]);
        assert_eq!(plan.argument_stride(), 32);
        assert_eq!(plan.argument_bytes().len(), 32 * 3);
    }

    #[test]
    fn stride_is_at_least_one_byte() {
        let plan = compose(&[Material::normal()]);
        assert_eq!(plan.argument_stride(), 1);
        assert_eq!(plan.argument_bytes().len(), 1);
    }

    #[test]
    fn argument_blocks_start_at_slot_offsets() {
        let plan = compose(&[
            Material::fresnel(ColorRgb::white(), 3.0),
            Material::color(ColorRgb::white()),
        ]);
        let bytes = plan.argument_bytes();
        let second: &[f32] = bytemuck::cast_slice(&bytes[32..48]);
        assert_eq!(second, &[1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn empty_list_composes_black() {
        let plan = compose(&[]);
        assert_eq!(plan.material_count(), 1);
        assert_eq!(plan.function_names(), vec!["color_material"]);
        assert!(plan.argument_bytes().iter().all(|b| *b == 0));
        assert_eq!(plan.descriptors()[0].opacity, 1.0);
    }

    #[test]
    fn resource_failure_aborts_composition() {
        let err = CompositionPlan::compose(
            &[Material::normal(), Material::texture("missing-wood")],
            &mut FakeTextures::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ResourceError::NotFound(_)));
    }

    #[test]
    fn textures_load_once_per_material() {
        let mut textures = FakeTextures::default();
        let plan = CompositionPlan::compose(
            &[Material::texture("a"), Material::matcap("b"), Material::texture("c")],
            &mut textures,
        )
        .unwrap();
        assert_eq!(textures.loaded, vec!["a", "b", "c"]);
        let slot_of = |i: usize| {
            let start = i * plan.argument_stride();
            u32::from_le_bytes(plan.argument_bytes()[start..start + 4].try_into().unwrap())
        };
        assert_eq!((slot_of(0), slot_of(1), slot_of(2)), (0, 1, 2));
    }

    // ── update ────────────────────────────────────────────────────────────

    #[test]
    fn update_with_same_list_is_idempotent() {
        let materials = [
            Material::fresnel(ColorRgb::new(0.2, 0.4, 0.8), 2.5),
            Material::color(ColorRgb::white()).blend(BlendMode::Screen, 0.7),
        ];
        let mut plan = compose(&materials);

        plan.update(&materials).unwrap();
        let args = plan.argument_bytes().to_vec();
        let descs = plan.descriptor_bytes().to_vec();

        plan.update(&materials).unwrap();
        assert_eq!(plan.argument_bytes(), args.as_slice());
        assert_eq!(plan.descriptor_bytes(), descs.as_slice());
    }

    #[test]
    fn update_rewrites_arguments_in_place() {
        let mut plan = compose(&[Material::color(ColorRgb::black())]);
        plan.update(&[Material::color(ColorRgb::white()).blend(BlendMode::Multiply, 0.5)])
            .unwrap();

        let words: &[f32] = bytemuck::cast_slice(&plan.argument_bytes()[..16]);
        assert_eq!(words, &[1.0, 1.0, 1.0, 0.0]);
        assert_eq!(plan.descriptors()[0].blend, BlendMode::Multiply.index());
        assert_eq!(plan.descriptors()[0].opacity, 0.5);
    }

    #[test]
    fn update_rejects_changed_functions() {
        let mut plan = compose(&[Material::normal()]);
        let err = plan.update(&[Material::color(ColorRgb::white())]).unwrap_err();
        assert!(matches!(err, SetupError::CompositionChanged { .. }));

        let err = plan
            .update(&[Material::normal(), Material::normal()])
            .unwrap_err();
        assert!(matches!(err, SetupError::CompositionChanged { .. }));
    }
}
