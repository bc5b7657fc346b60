use bytemuck::{Pod, Zeroable};

/// Per-body render data read by the TypeScript renderer from WASM memory.
/// Must match the TypeScript protocol: 13 floats = 52 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct RenderInstance {
    /// Position in world space.
    pub x: f32,
    pub y: f32,
    pub z: f32,
    /// Spin about the body's own Y axis, in radians.
    pub rotation: f32,
    /// Tumble about the world X axis, in radians. Applied before `rotation`.
    pub tilt: f32,
    /// Sphere radius in world units.
    pub radius: f32,
    /// Display scale on top of the radius.
    pub scale: f32,
    /// RGB color, components in [0, 1].
    pub r: f32,
    pub g: f32,
    pub b: f32,
    /// Emissive strength.
    pub emissive: f32,
    /// Highlight amount (hovered body / orbit ring).
    pub highlight: f32,
    /// Entity id, so hit-testing on the JS side can report it back.
    pub id: f32,
}

impl RenderInstance {
    pub const FLOATS: usize = 13;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;
}

/// Render buffer containing all body instances for the current frame.
pub struct RenderBuffer {
    pub instances: Vec<RenderInstance>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
    }

    pub fn push(&mut self, instance: RenderInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Raw pointer to instance data for reads from WASM memory.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_instance_is_13_floats() {
        assert_eq!(std::mem::size_of::<RenderInstance>(), RenderInstance::STRIDE_BYTES);
        assert_eq!(RenderInstance::FLOATS, 13);
    }

    #[test]
    fn render_buffer_push_and_count() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance::default());
        buf.push(RenderInstance::default());
        assert_eq!(buf.instance_count(), 2);
        buf.clear();
        assert_eq!(buf.instance_count(), 0);
    }

    #[test]
    fn instances_cast_to_flat_floats() {
        let mut buf = RenderBuffer::new();
        buf.push(RenderInstance { x: 1.0, tilt: 0.25, id: 7.0, ..Default::default() });
        let floats: &[f32] = bytemuck::cast_slice(&buf.instances);
        assert_eq!(floats.len(), RenderInstance::FLOATS);
        assert_eq!(floats[0], 1.0);
        assert_eq!(floats[4], 0.25);
        assert_eq!(floats[12], 7.0);
    }
}
