//! Shape generation for 2D primitives
//!
//! All shapes are in canvas pixels (top-left origin, y down); the pipeline
//! maps them to clip space.

use glam::Vec2;
use std::f32::consts::PI;

use super::vertex::{Vertex, colors, sprite_color};
use crate::sim::{Snapshot, Sprite, SpriteRect};

/// Segments used for enemy hulls
const ENEMY_SEGMENTS: u32 = 20;

/// Axis-aligned filled rectangle (two triangles)
pub fn quad(pos: Vec2, size: Vec2, color: [f32; 4]) -> [Vertex; 6] {
    let (x0, y0) = (pos.x, pos.y);
    let (x1, y1) = (pos.x + size.x, pos.y + size.y);
    [
        Vertex::new(x0, y0, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x0, y1, color),
        Vertex::new(x1, y0, color),
        Vertex::new(x1, y1, color),
    ]
}

/// Generate vertices for a filled circle
pub fn circle(center: Vec2, radius: f32, color: [f32; 4], segments: u32) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity((segments * 3) as usize);

    for i in 0..segments {
        let theta1 = (i as f32 / segments as f32) * 2.0 * PI;
        let theta2 = ((i + 1) as f32 / segments as f32) * 2.0 * PI;

        // Triangle from center to edge
        vertices.push(Vertex::new(center.x, center.y, color));
        vertices.push(Vertex::new(
            center.x + radius * theta1.cos(),
            center.y + radius * theta1.sin(),
            color,
        ));
        vertices.push(Vertex::new(
            center.x + radius * theta2.cos(),
            center.y + radius * theta2.sin(),
            color,
        ));
    }

    vertices
}

/// Player ship: body, nose pointing right, cockpit
fn player_ship(rect: &SpriteRect) -> Vec<Vertex> {
    let pos = Vec2::new(rect.x, rect.y);
    let size = Vec2::new(rect.width, rect.height);
    let color = sprite_color(rect.sprite);

    let body = Vec2::new(size.x * 0.7, size.y * 0.6);
    let body_pos = pos + Vec2::new(0.0, size.y * 0.2);
    let mut vertices = quad(body_pos, body, color).to_vec();

    let nose_base = pos.x + body.x;
    vertices.push(Vertex::new(nose_base, body_pos.y, color));
    vertices.push(Vertex::new(pos.x + size.x, pos.y + size.y / 2.0, color));
    vertices.push(Vertex::new(nose_base, body_pos.y + body.y, color));

    let cockpit = pos + Vec2::new(size.x * 0.45, size.y * 0.5);
    vertices.extend(circle(cockpit, size.y * 0.12, colors::PLAYER_COCKPIT, 10));
    vertices
}

/// Vertices for a whole frame in draw order
pub fn scene_vertices(snapshot: &Snapshot) -> Vec<Vertex> {
    let mut vertices = Vec::with_capacity(
        snapshot.enemies.len() * ENEMY_SEGMENTS as usize * 3 + snapshot.bullets.len() * 6 + 64,
    );

    for rect in snapshot.sprites() {
        match rect.sprite {
            Sprite::Player => vertices.extend(player_ship(rect)),
            Sprite::Enemy(_) => {
                let radius = rect.width / 2.0;
                let center = Vec2::new(rect.x + radius, rect.y + rect.height / 2.0);
                vertices.extend(circle(
                    center,
                    radius,
                    sprite_color(rect.sprite),
                    ENEMY_SEGMENTS,
                ));
            }
            Sprite::PlayerBullet | Sprite::EnemyBullet => vertices.extend(quad(
                Vec2::new(rect.x, rect.y),
                Vec2::new(rect.width, rect.height),
                sprite_color(rect.sprite),
            )),
        }
    }

    vertices
}
