//! Paints showcase tiles with egui meshes
//!
//! The inner container is a plane in 3D. Every shape on it (shadow, image,
//! debug text, reflection) is mapped through [`Tilt::project`] and then scaled
//! around the slot centre by the outer container's scale.

use egui::epaint::{Vertex, WHITE_UV};
use egui::{Align2, Color32, FontId, Mesh, Painter, Pos2, Rect, Shape, TextureId};

use crate::effects::{BoxShadow, Reflection, Tilt};
use crate::elements::Showcase;
use crate::picture::cover_uv;

/// Grid cells per side for the textured image
const IMAGE_STEPS: usize = 8;
/// Grid cells per side for the reflection overlay
const OVERLAY_STEPS: usize = 24;
/// Stacked quads approximating the shadow blur
const SHADOW_LAYERS: usize = 10;
/// Debug text line height in points
pub const DEBUG_LINE_HEIGHT: f32 = 16.0;

/// A texture to draw in the tile, with its pixel dimensions.
#[derive(Debug, Clone, Copy)]
pub struct TileTexture {
    pub id: TextureId,
    pub size: [f32; 2],
}

/// Height the inner container needs for the debug lines.
pub fn debug_height(showcase: &Showcase) -> f32 {
    if showcase.options().debug {
        DEBUG_LINE_HEIGHT * 2.0
    } else {
        0.0
    }
}

/// Size of the inner container: image plus debug lines.
pub fn inner_size(showcase: &Showcase) -> egui::Vec2 {
    let [width, height] = showcase.image_size();
    egui::vec2(
        (width as f32).max(0.0),
        (height as f32).max(0.0) + debug_height(showcase),
    )
}

/// Maps points of the inner container onto the screen.
#[derive(Debug, Clone, Copy)]
struct Projection {
    tilt: Option<Tilt>,
    center: Pos2,
    scale: f32,
    width: f32,
    height: f32,
}

impl Projection {
    /// Point relative to the container centre, y down.
    fn local(&self, x: f32, y: f32) -> Pos2 {
        let [px, py] = match self.tilt {
            Some(tilt) => tilt.project(x as f64, y as f64),
            None => [x as f64, y as f64],
        };
        self.center + egui::vec2(px as f32, py as f32) * self.scale
    }

    /// Point in normalized container coordinates.
    fn uv(&self, u: f32, v: f32) -> Pos2 {
        self.local((u - 0.5) * self.width, (v - 0.5) * self.height)
    }
}

/// Paint one tile into `slot` (the outer container's layout rect).
///
/// `scale` is the current, possibly animating, outer scale.
pub fn paint_showcase(
    painter: &Painter,
    slot: Rect,
    scale: f32,
    showcase: &Showcase,
    texture: Option<TileTexture>,
) {
    let options = showcase.options();
    let effects = showcase.effects();
    let size = inner_size(showcase);

    let projection = Projection {
        tilt: effects.tilt,
        center: slot.center(),
        scale,
        width: size.x,
        height: size.y,
    };

    if options.shadow {
        if let Some(shadow) = effects.shadow {
            paint_shadow(painter, &projection, &shadow);
        }
    }

    paint_image(painter, &projection, showcase, texture);

    if options.debug {
        paint_debug(painter, &projection, showcase);
    }

    if let Some(reflection) = effects.reflection(options) {
        paint_reflection(painter, &projection, &reflection);
    }
}

fn paint_shadow(painter: &Painter, projection: &Projection, shadow: &BoxShadow) {
    if shadow.alpha <= 0.0 {
        return;
    }

    // Per-layer opacity so that the fully covered core reaches the shadow alpha.
    let layer_alpha = 1.0 - (1.0 - shadow.alpha as f32).powf(1.0 / SHADOW_LAYERS as f32);
    let color = Color32::from_black_alpha((layer_alpha * 255.0).round() as u8);

    let half_w = projection.width / 2.0;
    let half_h = projection.height / 2.0;
    let x_offset = shadow.x_offset as f32;
    let y_offset = shadow.y_offset as f32;
    let spread = shadow.spread as f32;
    let blur = shadow.blur as f32;

    for layer in 0..SHADOW_LAYERS {
        let expand = spread + blur / 2.0 - blur * layer as f32 / SHADOW_LAYERS as f32;
        let (x0, x1) = (x_offset - half_w - expand, x_offset + half_w + expand);
        let (y0, y1) = (y_offset - half_h - expand, y_offset + half_h + expand);
        if x1 <= x0 || y1 <= y0 {
            continue;
        }

        let mut mesh = Mesh::default();
        for (x, y) in [(x0, y0), (x1, y0), (x1, y1), (x0, y1)] {
            mesh.colored_vertex(projection.local(x, y), color);
        }
        mesh.add_triangle(0, 1, 2);
        mesh.add_triangle(0, 2, 3);
        painter.add(Shape::mesh(mesh));
    }
}

fn paint_image(
    painter: &Painter,
    projection: &Projection,
    showcase: &Showcase,
    texture: Option<TileTexture>,
) {
    let [image_width, image_height] = showcase.image_size();
    let image_width = (image_width as f32).max(0.0);
    let image_height = (image_height as f32).max(0.0);
    if image_width <= 0.0 || image_height <= 0.0 {
        return;
    }

    let top = -projection.height / 2.0;
    let left = -image_width / 2.0;

    let (mut mesh, [u0, v0, u1, v1], color) = match texture {
        Some(texture) => (
            Mesh::with_texture(texture.id),
            cover_uv(texture.size[0], texture.size[1], image_width, image_height),
            Color32::WHITE,
        ),
        None => (Mesh::default(), [0.0; 4], Color32::from_gray(60)),
    };

    subdivide(&mut mesh, IMAGE_STEPS, |s, t| {
        let pos = projection.local(left + s * image_width, top + t * image_height);
        let uv = if texture.is_some() {
            Pos2::new(u0 + s * (u1 - u0), v0 + t * (v1 - v0))
        } else {
            WHITE_UV
        };
        Vertex { pos, uv, color }
    });
    painter.add(Shape::mesh(mesh));
}

fn paint_debug(painter: &Painter, projection: &Projection, showcase: &Showcase) {
    let Some(debug) = showcase.style().debug else {
        return;
    };

    let color = painter.ctx().style().visuals.text_color();
    let font = FontId::proportional(12.0 * projection.scale);
    let [_, image_height] = showcase.image_size();
    let first_line = -projection.height / 2.0 + (image_height as f32).max(0.0);

    for (line, text) in [debug.position, debug.angle].into_iter().enumerate() {
        let y = first_line + line as f32 * DEBUG_LINE_HEIGHT;
        painter.text(projection.local(0.0, y), Align2::CENTER_TOP, text, font.clone(), color);
    }
}

fn paint_reflection(painter: &Painter, projection: &Projection, reflection: &Reflection) {
    let mut mesh = Mesh::default();
    subdivide(&mut mesh, OVERLAY_STEPS, |u, v| {
        let intensity = reflection.intensity_at(u, v, projection.width, projection.height);
        Vertex {
            pos: projection.uv(u, v),
            uv: WHITE_UV,
            color: Color32::from_white_alpha((intensity.clamp(0.0, 1.0) * 255.0).round() as u8),
        }
    });
    painter.add(Shape::mesh(mesh));
}

/// Fill `mesh` with a `steps` x `steps` grid; `vertex` receives the
/// normalized grid coordinates of each corner.
fn subdivide(mesh: &mut Mesh, steps: usize, mut vertex: impl FnMut(f32, f32) -> Vertex) {
    let steps = steps.max(1);
    let base = mesh.vertices.len() as u32;
    let row = (steps + 1) as u32;

    for j in 0..=steps {
        for i in 0..=steps {
            mesh.vertices
                .push(vertex(i as f32 / steps as f32, j as f32 / steps as f32));
        }
    }

    for j in 0..steps as u32 {
        for i in 0..steps as u32 {
            let a = base + j * row + i;
            let b = a + 1;
            let c = a + row;
            let d = c + 1;
            mesh.add_triangle(a, b, d);
            mesh.add_triangle(a, d, c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effects::NormalizedPosition;
    use crate::elements::{ShowcaseId, ShowcaseOptions};

    #[test]
    fn test_subdivide_counts() {
        let mut mesh = Mesh::default();
        subdivide(&mut mesh, 4, |u, v| Vertex {
            pos: Pos2::new(u, v),
            uv: WHITE_UV,
            color: Color32::WHITE,
        });
        assert_eq!(mesh.vertices.len(), 25);
        assert_eq!(mesh.indices.len(), 4 * 4 * 6);
        assert!(mesh.is_valid());
    }

    #[test]
    fn test_inner_size_grows_with_debug() {
        let plain = Showcase::new(ShowcaseId::new(1), "a.png");
        assert_eq!(inner_size(&plain), egui::vec2(110.0, 150.0));

        let debug = Showcase::new(ShowcaseId::new(2), "a.png").with_options(ShowcaseOptions {
            debug: true,
            ..Default::default()
        });
        assert_eq!(inner_size(&debug), egui::vec2(110.0, 150.0 + DEBUG_LINE_HEIGHT * 2.0));
    }

    #[test]
    fn test_untilted_projection_scales_around_centre() {
        let projection = Projection {
            tilt: None,
            center: Pos2::new(100.0, 100.0),
            scale: 1.5,
            width: 50.0,
            height: 80.0,
        };
        assert_eq!(projection.uv(0.5, 0.5), Pos2::new(100.0, 100.0));
        assert_eq!(projection.uv(1.0, 1.0), Pos2::new(137.5, 160.0));
    }

    #[test]
    fn test_tilted_projection_keeps_centre() {
        let projection = Projection {
            tilt: Some(Tilt::from_position(NormalizedPosition::new(0.9, 0.1))),
            center: Pos2::new(10.0, 20.0),
            scale: 1.0,
            width: 100.0,
            height: 100.0,
        };
        let centre = projection.uv(0.5, 0.5);
        assert!((centre.x - 10.0).abs() < 1e-4);
        assert!((centre.y - 20.0).abs() < 1e-4);
    }
}
