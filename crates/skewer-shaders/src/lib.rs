//! skewer-shaders: WGSL sources for the renderer.

/// Solid color pipeline: vertices carry color in linear space (premultiplied alpha).
pub const SOLID_WGSL: &str = r#"
struct ViewportUniform {
    scale: vec2<f32>,      // 2/W, -2/H
    translate: vec2<f32>,  // (-1, +1)
};

@group(0) @binding(0) var<uniform> vp: ViewportUniform;

struct VsOut {
    @builtin(position) pos: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) in_pos: vec2<f32>, @location(1) in_color: vec4<f32>) -> VsOut {
    var out: VsOut;
    // in_pos is in window pixel coordinates (y-down)
    let ndc = vec2<f32>(in_pos.x * vp.scale.x + vp.translate.x,
                        in_pos.y * vp.scale.y + vp.translate.y);
    out.pos = vec4<f32>(ndc, 0.0, 1.0);
    out.color = in_color;
    return out;
}

@fragment
fn fs_main(inp: VsOut) -> @location(0) vec4<f32> {
    return inp.color;
}
"#;

/// Viewport uniform for a `width` x `height` pixel target: `[2/W, -2/H, -1, 1]`.
pub fn viewport_uniform(width: u32, height: u32) -> [f32; 4] {
    [
        2.0 / (width.max(1) as f32),
        -2.0 / (height.max(1) as f32),
        -1.0,
        1.0,
    ]
}
