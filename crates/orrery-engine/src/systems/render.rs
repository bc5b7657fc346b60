use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities, in scene order.
/// Inactive entities are skipped. Stops at `max_instances`.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    buffer: &mut RenderBuffer,
    max_instances: usize,
) {
    buffer.clear();

    let mut dropped = 0usize;
    for entity in entities.filter(|e| e.active) {
        if buffer.instances.len() >= max_instances {
            dropped += 1;
            continue;
        }
        buffer.push(RenderInstance {
            x: entity.pos.x,
            y: entity.pos.y,
            z: entity.pos.z,
            rotation: entity.rotation,
            tilt: entity.tilt,
            radius: entity.radius,
            scale: entity.scale,
            r: entity.color[0],
            g: entity.color[1],
            b: entity.color[2],
            emissive: entity.emissive,
            highlight: entity.highlight,
            id: entity.id.0 as f32,
        });
    }

    if dropped > 0 {
        log::warn!("render buffer full: {} entities over {} not drawn", dropped, max_instances);
    }
}
