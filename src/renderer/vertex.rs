//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

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

/// Scale a color's alpha
pub fn with_alpha(color: [f32; 4], alpha: f32) -> [f32; 4] {
    [color[0], color[1], color[2], color[3] * alpha]
}

/// Mix two colors (t = 0 gives `a`)
pub fn mix(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    let t = t.clamp(0.0, 1.0);
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
        a[3] + (b[3] - a[3]) * t,
    ]
}

/// Neon palette
pub mod colors {
    pub const BACKGROUND: [f32; 4] = [0.02, 0.01, 0.06, 1.0];
    pub const GRID: [f32; 4] = [0.35, 0.1, 0.6, 1.0];
    pub const STAR: [f32; 4] = [0.85, 0.9, 1.0, 1.0];
    pub const ARENA_WALL: [f32; 4] = [0.3, 0.3, 0.5, 1.0];
    pub const CENTER_LINE: [f32; 4] = [0.4, 0.4, 0.6, 0.5];
    pub const PADDLE_LEFT: [f32; 4] = [0.1, 0.9, 1.0, 1.0];
    pub const PADDLE_RIGHT: [f32; 4] = [1.0, 0.2, 0.7, 1.0];
    pub const BALL: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
    pub const BALL_COMBO: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const BALL_SPEED: [f32; 4] = [1.0, 0.45, 0.2, 1.0];
    pub const ENERGY: [f32; 4] = [0.3, 1.0, 0.4, 1.0];
    pub const POWER_SPEED: [f32; 4] = [1.0, 0.45, 0.2, 1.0];
    pub const POWER_MULTI: [f32; 4] = [0.4, 0.7, 1.0, 1.0];
    pub const POWER_COMBO: [f32; 4] = [1.0, 0.85, 0.2, 1.0];
    pub const POWER_GROW: [f32; 4] = [0.4, 1.0, 0.5, 1.0];
    pub const SPARK: [f32; 4] = [1.0, 0.95, 0.7, 1.0];
    pub const TEXT: [f32; 4] = [0.95, 0.95, 1.0, 1.0];
    pub const TEXT_DIM: [f32; 4] = [0.6, 0.6, 0.75, 1.0];
    pub const BUTTON: [f32; 4] = [0.12, 0.08, 0.25, 0.9];
    pub const BUTTON_HOT: [f32; 4] = [0.3, 0.15, 0.55, 0.95];
    pub const BUTTON_EDGE: [f32; 4] = [0.1, 0.9, 1.0, 1.0];
    pub const OVERLAY: [f32; 4] = [0.0, 0.0, 0.0, 0.65];
}
