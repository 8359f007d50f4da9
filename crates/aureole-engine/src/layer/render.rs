//! Gradient rasterization.
//!
//! One pass over the pixels of `bounds ∩ context`. Each pixel center is mapped
//! into gradient space, turned into a ramp parameter and composited with the
//! ring coverage as weight.

use core::f32::consts::TAU;

use crate::coords::{PixelSpan, Rect, Vec2};
use crate::paint::{Color, ColorRamp};
use crate::raster::DrawContext;

use super::config::{GradientConfig, GradientStyle, ResolvedGeometry};

pub(crate) fn rasterize<C: DrawContext + ?Sized>(config: &GradientConfig, ctx: &mut C, bounds: Rect) {
    let Some(span) = bounds.pixel_span(ctx.width(), ctx.height()) else {
        log::trace!("gradient render skipped: bounds {bounds:?} cover no pixels");
        return;
    };

    let Some(ramp) = ColorRamp::new(&config.stops) else {
        log::trace!("gradient render skipped: no color stops");
        return;
    };

    let first = config.stops[0].color;
    if config.stops.len() < 2 {
        fill_solid(ctx, span, first);
        return;
    }

    let transform = &config.transform;
    if !transform.is_invertible() {
        log::debug!("degenerate transform {transform:?}; filling with the first stop");
        fill_solid(ctx, span, first);
        return;
    }

    let geom = config.geometry.resolve(bounds);
    if !(geom.center.is_finite() && geom.inner.is_finite() && geom.outer.is_finite()) {
        log::debug!("unresolvable geometry for bounds {bounds:?}; filling with the first stop");
        fill_solid(ctx, span, first);
        return;
    }

    // Ring edges are anti-aliased in device pixels, so radii are measured
    // after scaling.
    let device_scale = transform.scale.abs();

    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            let p = Vec2::new(x as f32 + 0.5, y as f32 + 0.5);
            let q = transform.to_local(p - geom.center);
            let r = q.length();

            let coverage = if geom.ring { ring_coverage(&geom, r, device_scale) } else { 1.0 };
            if coverage <= 0.0 {
                continue;
            }

            let t = match config.style {
                GradientStyle::Radial => radial_param(&geom, r, config),
                GradientStyle::Angular => angular_param(q),
            };
            ctx.blend_pixel(x, y, ramp.eval(t), coverage);
        }
    }
}

fn fill_solid<C: DrawContext + ?Sized>(ctx: &mut C, span: PixelSpan, color: Color) {
    for y in span.y0..span.y1 {
        for x in span.x0..span.x1 {
            ctx.blend_pixel(x, y, color, 1.0);
        }
    }
}

fn radial_param(geom: &ResolvedGeometry, r: f32, config: &GradientConfig) -> f32 {
    let width = geom.outer - geom.inner;
    if width > 0.0 {
        config.spread.apply((r - geom.inner) / width)
    } else if r > geom.inner {
        1.0
    } else {
        0.0
    }
}

/// `atan2` in [0, 1), starting on +X, increasing clockwise on screen.
fn angular_param(q: Vec2) -> f32 {
    let t = q.y.atan2(q.x) / TAU;
    let t = t.rem_euclid(1.0);
    // rem_euclid can round up to exactly 1.0 for tiny negative inputs.
    if t >= 1.0 { 0.0 } else { t }
}

/// Fraction of a pixel at gradient radius `r` that lies inside the ring.
fn ring_coverage(geom: &ResolvedGeometry, r: f32, device_scale: f32) -> f32 {
    let r = r * device_scale;
    let outer = geom.outer * device_scale;
    let inner = geom.inner * device_scale;

    let outside = (outer - r + 0.5).clamp(0.0, 1.0);
    let inside = if geom.inner > 0.0 { (r - inner + 0.5).clamp(0.0, 1.0) } else { 1.0 };
    outside * inside
}
