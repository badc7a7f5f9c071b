use bytemuck::{Pod, Zeroable};
use lyon_geom::point;
use lyon_tessellation::{BuffersBuilder, FillOptions, FillTessellator, FillVertex, VertexBuffers};

use crate::allocator::{BufKey, OwnedBuffer, RenderAllocator};
use crate::display_list::{Command, DisplayList};
use crate::scene::Rect;

/// Default flattening tolerance for curved shapes, in pixels.
pub const DEFAULT_TOLERANCE: f32 = 0.1;

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub pos: [f32; 2],
    pub color: [f32; 4],
}

/// CPU-side triangle soup for one display list.
#[derive(Clone, Debug, Default)]
pub struct Geometry {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl Geometry {
    pub fn triangles(&self) -> usize {
        self.indices.len() / 3
    }

    fn base(&self) -> u32 {
        u32::try_from(self.vertices.len()).unwrap_or(u32::MAX)
    }

    fn append(&mut self, geom: &VertexBuffers<[f32; 2], u32>, color: [f32; 4]) {
        let base = self.base();
        self.vertices
            .extend(geom.vertices.iter().map(|p| Vertex { pos: *p, color }));
        self.indices.extend(geom.indices.iter().map(|i| base + *i));
    }
}

pub struct GpuScene {
    pub vertex: OwnedBuffer,
    pub index: OwnedBuffer,
    pub vertices: u32,
    pub indices: u32,
}

fn rect_to_verts(rect: Rect, color: [f32; 4]) -> ([Vertex; 4], [u32; 6]) {
    let x0 = rect.x;
    let y0 = rect.y;
    let x1 = rect.x + rect.w;
    let y1 = rect.y + rect.h;
    (
        [
            Vertex { pos: [x0, y0], color },
            Vertex { pos: [x1, y0], color },
            Vertex { pos: [x1, y1], color },
            Vertex { pos: [x0, y1], color },
        ],
        [0, 1, 2, 0, 2, 3],
    )
}

fn fill_options(tolerance: f32) -> FillOptions {
    // Non-zero so self-intersecting results (heavy shear) still fill solid.
    FillOptions::default()
        .with_tolerance(tolerance)
        .with_fill_rule(lyon_tessellation::FillRule::NonZero)
}

fn tessellate_polygon(out: &mut Geometry, points: &[[f32; 2]], color: [f32; 4], tolerance: f32) {
    let mut builder = lyon_path::Path::builder();
    let mut iter = points.iter();
    let Some(first) = iter.next() else {
        return;
    };
    builder.begin(point(first[0], first[1]));
    for p in iter {
        builder.line_to(point(p[0], p[1]));
    }
    builder.end(true);
    let path = builder.build();

    let mut tess = FillTessellator::new();
    let mut geom: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let result = tess.tessellate_path(
        &path,
        &fill_options(tolerance),
        &mut BuffersBuilder::new(&mut geom, |fv: FillVertex| {
            let p = fv.position();
            [p.x, p.y]
        }),
    );
    if let Err(e) = result {
        log::warn!("polygon with {} vertices not drawn: {e:?}", points.len());
        return;
    }
    out.append(&geom, color);
}

fn tessellate_circle(
    out: &mut Geometry,
    center: [f32; 2],
    radius: f32,
    color: [f32; 4],
    tolerance: f32,
) {
    let mut tess = FillTessellator::new();
    let mut geom: VertexBuffers<[f32; 2], u32> = VertexBuffers::new();
    let result = tess.tessellate_circle(
        point(center[0], center[1]),
        radius,
        &fill_options(tolerance),
        &mut BuffersBuilder::new(&mut geom, |fv: FillVertex| {
            let p = fv.position();
            [p.x, p.y]
        }),
    );
    if let Err(e) = result {
        log::warn!("circle of radius {radius} not drawn: {e:?}");
        return;
    }
    out.append(&geom, color);
}

/// Turn a display list into colored triangles, in command order.
pub fn tessellate_display_list(list: &DisplayList, tolerance: f32) -> Geometry {
    let mut out = Geometry::default();
    for cmd in &list.commands {
        match cmd {
            Command::FillPolygon { points, color } => {
                tessellate_polygon(&mut out, points, color.to_array(), tolerance);
            }
            Command::FillCircle {
                center,
                radius,
                color,
            } => {
                tessellate_circle(&mut out, *center, *radius, color.to_array(), tolerance);
            }
            Command::FillRect { rect, color } => {
                let (v, i) = rect_to_verts(*rect, color.to_array());
                let base = out.base();
                out.vertices.extend_from_slice(&v);
                out.indices.extend(i.iter().map(|idx| base + idx));
            }
        }
    }
    out
}

pub fn upload_geometry(
    allocator: &mut RenderAllocator,
    queue: &wgpu::Queue,
    geometry: &Geometry,
) -> GpuScene {
    let vsize = std::mem::size_of_val(geometry.vertices.as_slice()) as u64;
    let isize = std::mem::size_of_val(geometry.indices.as_slice()) as u64;
    let vbuf = allocator.allocate_buffer(BufKey {
        size: vsize.max(4),
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
    });
    let ibuf = allocator.allocate_buffer(BufKey {
        size: isize.max(4),
        usage: wgpu::BufferUsages::INDEX | wgpu::BufferUsages::COPY_DST,
    });
    if vsize > 0 {
        queue.write_buffer(&vbuf.buffer, 0, bytemuck::cast_slice(&geometry.vertices));
    }
    if isize > 0 {
        queue.write_buffer(&ibuf.buffer, 0, bytemuck::cast_slice(&geometry.indices));
    }

    GpuScene {
        vertex: vbuf,
        index: ibuf,
        vertices: geometry.vertices.len() as u32,
        indices: geometry.indices.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display_list::Viewport;
    use crate::painter::Painter;
    use crate::renderer::Renderer;
    use crate::scene::Color;

    fn pentagon() -> Vec<[f32; 2]> {
        (0..5)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / 5.0;
                [300.0 + 150.0 * a.cos(), 300.0 + 150.0 * a.sin()]
            })
            .collect()
    }

    #[test]
    fn pentagon_becomes_three_triangles() {
        let mut p = Painter::begin_frame(Viewport { width: 600, height: 600 });
        p.draw_polygon(&pentagon(), Color::blue());
        let geom = tessellate_display_list(p.display_list(), DEFAULT_TOLERANCE);
        assert_eq!(geom.vertices.len(), 5);
        assert_eq!(geom.triangles(), 3);
        assert!(geom.vertices.iter().all(|v| v.color == Color::blue().to_array()));
    }

    #[test]
    fn rect_is_two_triangles() {
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_rect(Rect::new(10.0, 20.0, 30.0, 40.0), Color::yellow());
        let geom = tessellate_display_list(p.display_list(), DEFAULT_TOLERANCE);
        assert_eq!(geom.indices, vec![0, 1, 2, 0, 2, 3]);
        assert_eq!(geom.vertices[2].pos, [40.0, 60.0]);
    }

    #[test]
    fn circle_stays_within_radius() {
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_circle([300.0, 300.0], 100.0, Color::black());
        let geom = tessellate_display_list(p.display_list(), DEFAULT_TOLERANCE);
        assert!(geom.triangles() > 8);
        for v in &geom.vertices {
            let d = ((v.pos[0] - 300.0).powi(2) + (v.pos[1] - 300.0).powi(2)).sqrt();
            assert!(d <= 100.0 + 1e-3);
        }
    }

    #[test]
    fn later_commands_index_past_earlier_vertices() {
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::white());
        p.draw_polygon(&pentagon(), Color::blue());
        let geom = tessellate_display_list(p.display_list(), DEFAULT_TOLERANCE);
        assert!(geom.indices[6..].iter().all(|i| *i >= 4));
        assert_eq!(geom.indices.len(), 6 + 9);
    }

    #[test]
    fn indices_reach_past_sixteen_bits() {
        let n = 70_000;
        let ring: Vec<[f32; 2]> = (0..n)
            .map(|i| {
                let a = i as f32 * std::f32::consts::TAU / n as f32;
                [300.0 + 250.0 * a.cos(), 300.0 + 250.0 * a.sin()]
            })
            .collect();
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_polygon(&ring, Color::blue());
        p.draw_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::black());
        let geom = tessellate_display_list(p.display_list(), DEFAULT_TOLERANCE);

        let ring_vertices = geom.vertices.len() - 4;
        assert!(ring_vertices > usize::from(u16::MAX));
        let rect_indices = &geom.indices[geom.indices.len() - 6..];
        assert_eq!(rect_indices[0] as usize, ring_vertices);
        assert!(geom.indices.iter().all(|i| (*i as usize) < geom.vertices.len()));
    }

    #[test]
    fn collapsed_polygon_produces_no_area() {
        // zero scale on x collapses the shape onto a vertical line
        let line: Vec<[f32; 2]> = pentagon().iter().map(|p| [300.0, p[1]]).collect();
        let mut p = Painter::begin_frame(Viewport::default());
        p.draw_polygon(&line, Color::blue());
        let geom = tessellate_display_list(p.display_list(), DEFAULT_TOLERANCE);
        for tri in geom.indices.chunks(3) {
            let xs: Vec<f32> = tri.iter().map(|i| geom.vertices[*i as usize].pos[0]).collect();
            assert!(xs.iter().all(|x| (*x - 300.0).abs() < 1e-3));
        }
    }
}
