use std::sync::Arc;

use crate::foundation::core::{Affine, Canvas, Point, Rect, Rgba8};
use crate::foundation::error::{LayoutError, LayoutResult};
use crate::overlay::plan::{GuideOp, OverlayPlan, StrokeStyle};
use crate::render::frame::RasterImage;
use crate::render::labels::{labels_svg, rasterize_labels};

/// Executes an [`OverlayPlan`] on the CPU with `vello_cpu`.
///
/// Every call allocates its own target pixmap; the source image is only read.
pub fn execute_plan(plan: &OverlayPlan, source: &RasterImage) -> LayoutResult<RasterImage> {
    if source.canvas() != plan.canvas {
        return Err(LayoutError::render(format!(
            "plan canvas {}x{} does not match source {}x{}",
            plan.canvas.width, plan.canvas.height, source.width, source.height
        )));
    }
    let (width, height) = canvas_u16(plan.canvas)?;

    let mut ctx = vello_cpu::RenderContext::new(width, height);

    draw_backdrop(&mut ctx, plan, source)?;

    for op in &plan.ops {
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        match op {
            GuideOp::Line { from, to, stroke } => {
                let mut path = vello_cpu::kurbo::BezPath::new();
                path.move_to(point_to_cpu(*from));
                path.line_to(point_to_cpu(*to));
                stroke_path(&mut ctx, &path, stroke);
            }
            GuideOp::Rect { rect, stroke } => {
                stroke_path(&mut ctx, &rect_path(*rect), stroke);
            }
            // Labels are drawn as one layer after the vector ops.
            GuideOp::Label { .. } => {}
        }
    }

    if let Some(svg) = labels_svg(plan.canvas, &plan.ops) {
        match rasterize_labels(plan.canvas, &svg) {
            Ok(layer) => draw_full_canvas_image(&mut ctx, &layer, Affine::IDENTITY, 1.0)?,
            Err(err) => tracing::warn!(%err, "skipping overlay labels"),
        }
    }

    let mut pixmap = vello_cpu::Pixmap::new(width, height);
    ctx.flush();
    ctx.render_to_pixmap(&mut pixmap);

    RasterImage::new(
        plan.canvas.width,
        plan.canvas.height,
        pixmap.data_as_u8_slice().to_vec(),
    )
}

fn draw_backdrop(
    ctx: &mut vello_cpu::RenderContext,
    plan: &OverlayPlan,
    source: &RasterImage,
) -> LayoutResult<()> {
    let opacity = plan.backdrop.opacity;
    if opacity <= 0.0 {
        return Ok(());
    }
    draw_full_canvas_image(ctx, source, plan.backdrop.transform, opacity as f32)
}

fn draw_full_canvas_image(
    ctx: &mut vello_cpu::RenderContext,
    img: &RasterImage,
    transform: Affine,
    opacity: f32,
) -> LayoutResult<()> {
    let paint = image_paint(img)?;

    ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
    ctx.set_transform(affine_to_cpu(transform));
    ctx.set_paint(paint);

    if opacity < 1.0 {
        ctx.push_opacity_layer(opacity);
    }
    ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
        0.0,
        0.0,
        f64::from(img.width),
        f64::from(img.height),
    ));
    if opacity < 1.0 {
        ctx.pop_layer();
    }
    Ok(())
}

fn stroke_path(
    ctx: &mut vello_cpu::RenderContext,
    path: &vello_cpu::kurbo::BezPath,
    style: &StrokeStyle,
) {
    let mut stroke = vello_cpu::kurbo::Stroke::new(style.width);
    if let Some(dash) = style.dash {
        stroke = stroke.with_dashes(0.0, [dash.on, dash.off]);
    }
    ctx.set_stroke(stroke);
    ctx.set_paint(color_to_cpu(style.effective_color()));
    ctx.stroke_path(path);
}

fn image_paint(img: &RasterImage) -> LayoutResult<vello_cpu::Image> {
    let pixmap = image_premul_bytes_to_pixmap(&img.data, img.width, img.height)?;
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> LayoutResult<vello_cpu::Pixmap> {
    let (w, h) = canvas_u16(Canvas { width, height })?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(LayoutError::render("image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}

fn canvas_u16(canvas: Canvas) -> LayoutResult<(u16, u16)> {
    let w: u16 = canvas
        .width
        .try_into()
        .map_err(|_| LayoutError::render("image width exceeds u16"))?;
    let h: u16 = canvas
        .height
        .try_into()
        .map_err(|_| LayoutError::render("image height exceeds u16"))?;
    Ok((w, h))
}

fn rect_path(r: Rect) -> vello_cpu::kurbo::BezPath {
    let mut path = vello_cpu::kurbo::BezPath::new();
    path.move_to(vello_cpu::kurbo::Point::new(r.x0, r.y0));
    path.line_to(vello_cpu::kurbo::Point::new(r.x1, r.y0));
    path.line_to(vello_cpu::kurbo::Point::new(r.x1, r.y1));
    path.line_to(vello_cpu::kurbo::Point::new(r.x0, r.y1));
    path.close_path();
    path
}

fn color_to_cpu(c: Rgba8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
