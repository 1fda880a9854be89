//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

use crate::sim::{EnemyKind, Sprite};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    pub const SKY: [f32; 4] = [0.53, 0.81, 0.92, 1.0]; // Light sky blue
    pub const PLAYER: [f32; 4] = [0.2, 0.35, 0.85, 1.0];
    pub const PLAYER_COCKPIT: [f32; 4] = [0.85, 0.95, 1.0, 1.0];
    pub const ENEMY_STRAIGHT: [f32; 4] = [0.55, 0.55, 0.6, 1.0];
    pub const ENEMY_CIRCLE: [f32; 4] = [0.2, 0.7, 0.3, 1.0];
    pub const ENEMY_ZIGZAG: [f32; 4] = [0.9, 0.5, 0.1, 1.0];
    pub const ENEMY_SHOOTER: [f32; 4] = [0.75, 0.1, 0.15, 1.0];
    pub const ENEMY_PAUSE_MOVE: [f32; 4] = [0.55, 0.25, 0.7, 1.0];
    pub const ENEMY_FIGHTER: [f32; 4] = [0.15, 0.15, 0.2, 1.0];
    pub const PLAYER_BULLET: [f32; 4] = [1.0, 0.9, 0.1, 1.0]; // Yellow
    pub const ENEMY_BULLET: [f32; 4] = [0.95, 0.1, 0.1, 1.0]; // Red
}

/// Fill color for a sprite
pub fn sprite_color(sprite: Sprite) -> [f32; 4] {
    match sprite {
        Sprite::Player => colors::PLAYER,
        Sprite::PlayerBullet => colors::PLAYER_BULLET,
        Sprite::EnemyBullet => colors::ENEMY_BULLET,
        Sprite::Enemy(kind) => match kind {
            EnemyKind::Straight => colors::ENEMY_STRAIGHT,
            EnemyKind::Circle => colors::ENEMY_CIRCLE,
            EnemyKind::Zigzag => colors::ENEMY_ZIGZAG,
            EnemyKind::Shooter => colors::ENEMY_SHOOTER,
            EnemyKind::PauseMove => colors::ENEMY_PAUSE_MOVE,
            EnemyKind::Fighter => colors::ENEMY_FIGHTER,
        },
    }
}
