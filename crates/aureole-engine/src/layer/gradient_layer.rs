use std::rc::Rc;

use crate::coords::{Rect, Vec2};
use crate::paint::{Color, ColorStop, SpreadMode};
use crate::raster::DrawContext;

use super::config::{check_colors, check_locations, even_stops};
use super::render::rasterize;
use super::{ConfigError, GradientConfig, GradientStyle, LayerId, RadialGeometry, RedrawSink, Transform};

/// A drawable layer that paints a radial or angular gradient.
///
/// The host owns the layer, attaches it to its invalidation mechanism and calls
/// [`display`](Self::display) from its draw cycle. Every accepted change marks
/// the layer as needing display and requests a redraw; rejected changes leave
/// the configuration untouched and request nothing.
///
/// The layer is single-threaded (`!Send`). Configuration computed on another
/// thread must be handed over through the host's own commit step.
pub struct GradientLayer {
    config: GradientConfig,
    needs_display: bool,
    id: Option<LayerId>,
    sink: Option<Rc<dyn RedrawSink>>,
}

impl Default for GradientLayer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GradientLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GradientLayer")
            .field("id", &self.id)
            .field("needs_display", &self.needs_display)
            .field("config", &self.config)
            .finish()
    }
}

impl GradientLayer {
    /// Creates a detached layer with no colors. It needs display until first drawn.
    pub fn new() -> Self {
        Self {
            config: GradientConfig::default(),
            needs_display: true,
            id: None,
            sink: None,
        }
    }

    /// Creates a detached layer from a full configuration.
    pub fn with_config(config: GradientConfig) -> Result<Self, ConfigError> {
        let mut layer = Self::new();
        layer.apply_config(config)?;
        Ok(layer)
    }

    // ── host wiring ────────────────────────────────────────────────────────

    /// Connects the layer to the host's invalidation mechanism.
    ///
    /// A pending `needs_display` is forwarded immediately.
    pub fn attach(&mut self, id: LayerId, sink: Rc<dyn RedrawSink>) {
        log::debug!("{id}: attached");
        self.id = Some(id);
        self.sink = Some(sink);
        if self.needs_display {
            self.request_redraw();
        }
    }

    /// Disconnects from the host. Changes still mark the layer dirty.
    pub fn detach(&mut self) {
        if let Some(id) = self.id.take() {
            log::debug!("{id}: detached");
        }
        self.sink = None;
    }

    #[inline]
    pub fn id(&self) -> Option<LayerId> {
        self.id
    }

    #[inline]
    pub fn needs_display(&self) -> bool {
        self.needs_display
    }

    // ── accessors ──────────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &GradientConfig {
        &self.config
    }

    pub fn colors(&self) -> Vec<Color> {
        self.config.stops.iter().map(|s| s.color).collect()
    }

    /// Effective stop positions, explicit or evenly spaced.
    pub fn locations(&self) -> Vec<f32> {
        self.config.stops.iter().map(|s| s.t).collect()
    }

    #[inline]
    pub fn has_explicit_locations(&self) -> bool {
        self.config.explicit_locations
    }

    #[inline]
    pub fn transform(&self) -> Transform {
        self.config.transform
    }

    #[inline]
    pub fn geometry(&self) -> RadialGeometry {
        self.config.geometry
    }

    #[inline]
    pub fn style(&self) -> GradientStyle {
        self.config.style
    }

    #[inline]
    pub fn spread(&self) -> SpreadMode {
        self.config.spread
    }

    /// True when a render would produce an actual gradient rather than a
    /// transparent or solid fallback.
    pub fn is_renderable(&self) -> bool {
        self.config.stops.len() >= 2 && self.config.transform.is_invertible()
    }

    // ── stops ──────────────────────────────────────────────────────────────

    /// Replaces the colors.
    ///
    /// With explicit locations in place the count must stay the same; use
    /// [`set_stops`](Self::set_stops) to change both together.
    pub fn set_colors(&mut self, colors: Vec<Color>) -> Result<(), ConfigError> {
        let result = check_colors(colors.iter().copied()).and_then(|()| {
            if !self.config.explicit_locations {
                return Ok(even_stops(&colors));
            }
            if colors.len() != self.config.stops.len() {
                return Err(ConfigError::StopCountMismatch {
                    colors: colors.len(),
                    locations: self.config.stops.len(),
                });
            }
            Ok(self
                .config
                .stops
                .iter()
                .zip(&colors)
                .map(|(s, &c)| ColorStop::new(s.t, c))
                .collect())
        });
        let stops = self.check("colors", result)?;
        self.replace_stops(stops, self.config.explicit_locations);
        Ok(())
    }

    /// Sets explicit stop positions, or `None` to space stops evenly.
    pub fn set_locations(&mut self, locations: Option<Vec<f32>>) -> Result<(), ConfigError> {
        let colors = self.colors();
        self.set_stops(colors, locations)
    }

    /// Replaces colors and locations in one step.
    pub fn set_stops(&mut self, colors: Vec<Color>, locations: Option<Vec<f32>>) -> Result<(), ConfigError> {
        let result = build_stops(&colors, locations.as_deref());
        let stops = self.check("stops", result)?;
        self.replace_stops(stops, locations.is_some());
        Ok(())
    }

    fn replace_stops(&mut self, stops: Vec<ColorStop>, explicit: bool) {
        if stops == self.config.stops && explicit == self.config.explicit_locations {
            return;
        }
        self.config.stops = stops;
        self.config.explicit_locations = explicit;
        self.changed();
    }

    // ── transform ──────────────────────────────────────────────────────────

    /// Sets offset, rotation (radians) and scale. Never rejected; a zero or
    /// non-finite scale renders as a solid fill.
    pub fn set_transform(&mut self, offset: Vec2, rotation: f32, scale: f32) {
        self.update_transform(Transform::new(offset, rotation, scale));
    }

    pub fn set_offset(&mut self, offset: Vec2) {
        self.update_transform(Transform { offset, ..self.config.transform });
    }

    pub fn set_rotation(&mut self, rotation: f32) {
        self.update_transform(Transform { rotation, ..self.config.transform });
    }

    pub fn set_scale(&mut self, scale: f32) {
        self.update_transform(Transform { scale, ..self.config.transform });
    }

    fn update_transform(&mut self, transform: Transform) {
        // Bitwise comparison so a NaN assignment still counts as a change once.
        if same_transform(&transform, &self.config.transform) {
            return;
        }
        self.config.transform = transform;
        self.changed();
    }

    // ── geometry & style ───────────────────────────────────────────────────

    pub fn set_radial_parameters(&mut self, geometry: RadialGeometry) -> Result<(), ConfigError> {
        let result = geometry.validate();
        self.check("radial parameters", result)?;
        if geometry != self.config.geometry {
            self.config.geometry = geometry;
            self.changed();
        }
        Ok(())
    }

    pub fn set_style(&mut self, style: GradientStyle) {
        if style != self.config.style {
            self.config.style = style;
            self.changed();
        }
    }

    pub fn set_spread(&mut self, spread: SpreadMode) {
        if spread != self.config.spread {
            self.config.spread = spread;
            self.changed();
        }
    }

    /// Replaces the whole configuration after validating it.
    pub fn apply_config(&mut self, mut config: GradientConfig) -> Result<(), ConfigError> {
        let result = config.validate();
        self.check("config", result)?;
        config.normalize();
        if config != self.config {
            self.config = config;
            self.changed();
        }
        Ok(())
    }

    // ── drawing ────────────────────────────────────────────────────────────

    /// Requests a redraw even though no observable property changed.
    ///
    /// For state the layer cannot see, such as animation progress applied by
    /// an external driver.
    pub fn force_update(&mut self) {
        log::trace!("{}: forced update", self.label());
        self.changed();
    }

    /// Paints the gradient into `ctx`, clipped to `bounds`, composited
    /// source-over. Never fails; degenerate configurations paint a
    /// transparent or solid fallback.
    pub fn render<C: DrawContext + ?Sized>(&self, ctx: &mut C, bounds: Rect) {
        rasterize(&self.config, ctx, bounds);
    }

    /// Host draw-cycle entry point: renders and clears `needs_display`.
    pub fn display<C: DrawContext + ?Sized>(&mut self, ctx: &mut C, bounds: Rect) {
        self.render(ctx, bounds);
        self.needs_display = false;
    }

    // ── private helpers ────────────────────────────────────────────────────

    fn changed(&mut self) {
        self.needs_display = true;
        self.request_redraw();
    }

    fn request_redraw(&self) {
        if let (Some(id), Some(sink)) = (self.id, self.sink.as_ref()) {
            sink.request_redraw(id);
        }
    }

    fn check<T>(&self, what: &str, result: Result<T, ConfigError>) -> Result<T, ConfigError> {
        if let Err(err) = &result {
            log::debug!("{}: rejected {what}: {err}", self.label());
        }
        result
    }

    fn label(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => "detached layer".to_owned(),
        }
    }
}

fn build_stops(colors: &[Color], locations: Option<&[f32]>) -> Result<Vec<ColorStop>, ConfigError> {
    check_colors(colors.iter().copied())?;
    let Some(locations) = locations else {
        return Ok(even_stops(colors));
    };
    if locations.len() != colors.len() {
        return Err(ConfigError::StopCountMismatch { colors: colors.len(), locations: locations.len() });
    }
    check_locations(locations)?;
    Ok(colors.iter().zip(locations).map(|(&c, &t)| ColorStop::new(t, c)).collect())
}

fn same_transform(a: &Transform, b: &Transform) -> bool {
    a.offset.x.to_bits() == b.offset.x.to_bits()
        && a.offset.y.to_bits() == b.offset.y.to_bits()
        && a.rotation.to_bits() == b.rotation.to_bits()
        && a.scale.to_bits() == b.scale.to_bits()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::layer::RedrawQueue;
    use crate::raster::{Canvas, Pixel};

    fn red() -> Color { Color::rgb(1.0, 0.0, 0.0) }
    fn green() -> Color { Color::rgb(0.0, 1.0, 0.0) }
    fn blue() -> Color { Color::rgb(0.0, 0.0, 1.0) }

    fn attached() -> (GradientLayer, RedrawQueue) {
        let queue = RedrawQueue::new();
        let mut layer = GradientLayer::new();
        layer.attach(LayerId(1), Rc::new(queue.clone()));
        queue.drain();
        (layer, queue)
    }

    fn red_blue() -> GradientLayer {
        let mut layer = GradientLayer::new();
        layer.set_stops(vec![red(), blue()], Some(vec![0.0, 1.0])).unwrap();
        layer
    }

    fn draw(layer: &GradientLayer, w: u32, h: u32) -> Canvas {
        let mut canvas = Canvas::new(w, h);
        layer.render(&mut canvas, Rect::from_size(w as f32, h as f32));
        canvas
    }

    fn px(c: &Canvas, x: u32, y: u32) -> Pixel {
        c.pixel(x, y).unwrap()
    }

    // ── stops ──────────────────────────────────────────────────────────────

    #[test]
    fn omitted_locations_are_evenly_spaced() {
        let mut layer = GradientLayer::new();
        layer.set_colors(vec![red(), green(), blue(), red(), green()]).unwrap();
        assert_eq!(layer.locations(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert!(!layer.has_explicit_locations());
    }

    #[test]
    fn mismatched_locations_rejected_and_state_kept() {
        let mut layer = GradientLayer::new();
        layer.set_colors(vec![red(), green(), blue()]).unwrap();
        let before = layer.config().clone();

        let err = layer.set_locations(Some(vec![0.0, 1.0])).unwrap_err();
        assert_eq!(err, ConfigError::StopCountMismatch { colors: 3, locations: 2 });
        assert_eq!(layer.config(), &before);
    }

    #[test]
    fn set_colors_keeps_explicit_locations() {
        let mut layer = GradientLayer::new();
        layer.set_stops(vec![red(), blue()], Some(vec![0.2, 0.8])).unwrap();
        layer.set_colors(vec![green(), red()]).unwrap();
        assert_eq!(layer.locations(), vec![0.2, 0.8]);
        assert_eq!(layer.colors(), vec![green(), red()]);
    }

    #[test]
    fn set_colors_with_new_count_needs_set_stops_when_locations_explicit() {
        let mut layer = GradientLayer::new();
        layer.set_stops(vec![red(), blue()], Some(vec![0.2, 0.8])).unwrap();
        assert_eq!(
            layer.set_colors(vec![red(), green(), blue()]),
            Err(ConfigError::StopCountMismatch { colors: 3, locations: 2 })
        );
        layer.set_stops(vec![red(), green(), blue()], None).unwrap();
        assert_eq!(layer.locations(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn clearing_locations_respaces() {
        let mut layer = GradientLayer::new();
        layer.set_stops(vec![red(), green(), blue()], Some(vec![0.0, 0.1, 0.2])).unwrap();
        layer.set_locations(None).unwrap();
        assert_eq!(layer.locations(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn non_finite_color_rejected() {
        let mut layer = GradientLayer::new();
        let bad = Color::from_premul(f32::NAN, 0.0, 0.0, 1.0);
        assert_eq!(layer.set_colors(vec![red(), bad]), Err(ConfigError::NonFiniteColor { index: 1 }));
        assert!(layer.colors().is_empty());
    }

    // ── radial parameters ──────────────────────────────────────────────────

    #[test]
    fn inverted_annulus_rejected_ordered_accepted() {
        let mut layer = GradientLayer::new();
        let bad = RadialGeometry::Annular { center: None, inner: 10.0, outer: 5.0 };
        let good = RadialGeometry::Annular { center: None, inner: 5.0, outer: 10.0 };

        assert_eq!(
            layer.set_radial_parameters(bad),
            Err(ConfigError::InvertedRadii { inner: 10.0, outer: 5.0 })
        );
        assert_eq!(layer.geometry(), RadialGeometry::Fit);

        layer.set_radial_parameters(good).unwrap();
        assert_eq!(layer.geometry(), good);
    }

    // ── redraw requests ────────────────────────────────────────────────────

    #[test]
    fn attach_forwards_pending_display() {
        let queue = RedrawQueue::new();
        let mut layer = GradientLayer::new();
        layer.attach(LayerId(4), Rc::new(queue.clone()));
        assert_eq!(queue.drain(), vec![LayerId(4)]);
    }

    #[test]
    fn accepted_change_requests_redraw() {
        let (mut layer, queue) = attached();
        layer.set_colors(vec![red(), blue()]).unwrap();
        assert_eq!(queue.drain(), vec![LayerId(1)]);
        assert!(layer.needs_display());
    }

    #[test]
    fn rejected_change_requests_nothing() {
        let (mut layer, queue) = attached();
        let _ = layer.set_radial_parameters(RadialGeometry::Simple { center: None, radius: -3.0 });
        assert!(queue.is_empty());
    }

    #[test]
    fn identical_value_requests_nothing() {
        let (mut layer, queue) = attached();
        layer.set_rotation(0.5);
        queue.drain();
        layer.set_rotation(0.5);
        layer.set_style(GradientStyle::Radial);
        layer.set_spread(SpreadMode::Pad);
        assert!(queue.is_empty());
    }

    #[test]
    fn force_update_always_requests() {
        let (mut layer, queue) = attached();
        let mut canvas = Canvas::new(4, 4);
        layer.display(&mut canvas, Rect::from_size(4.0, 4.0));
        assert!(!layer.needs_display());

        layer.force_update();
        assert_eq!(queue.drain(), vec![LayerId(1)]);
        assert!(layer.needs_display());
    }

    #[test]
    fn detached_layer_only_marks_dirty() {
        let (mut layer, queue) = attached();
        layer.detach();
        layer.set_scale(2.0);
        assert!(queue.is_empty());
        assert!(layer.needs_display());
        assert_eq!(layer.id(), None);
    }

    // ── rendering ──────────────────────────────────────────────────────────

    #[test]
    fn red_to_blue_radial_scenario() {
        let canvas = draw(&red_blue(), 100, 100);

        let first = px(&canvas, 50, 50);
        assert!(first.r >= 240 && first.b <= 15, "center {first:?}");

        let last = px(&canvas, 99, 50);
        assert!(last.b >= 240 && last.r <= 15, "edge {last:?}");

        // Smooth and monotonic along the radius.
        let mut prev = px(&canvas, 50, 50);
        for x in 51..100 {
            let p = px(&canvas, x, 50);
            assert!(p.r <= prev.r && p.b >= prev.b, "x={x}: {prev:?} -> {p:?}");
            assert!(prev.r - p.r <= 8, "jump at x={x}");
            assert_eq!(p.a, 255);
            prev = p;
        }
    }

    #[test]
    fn render_is_deterministic() {
        let mut layer = red_blue();
        layer.set_transform(Vec2::new(3.0, -7.0), 0.3, 1.7);
        layer.set_style(GradientStyle::Angular);
        assert_eq!(draw(&layer, 37, 23), draw(&layer, 37, 23));
    }

    #[test]
    fn force_update_with_same_config_renders_identically() {
        let mut layer = red_blue();
        let mut before = Canvas::new(64, 64);
        layer.display(&mut before, Rect::from_size(64.0, 64.0));

        layer.force_update();
        let mut after = Canvas::new(64, 64);
        layer.display(&mut after, Rect::from_size(64.0, 64.0));

        assert_eq!(before.as_bytes(), after.as_bytes());
    }

    #[test]
    fn offset_moves_the_center() {
        let mut layer = red_blue();
        layer.set_offset(Vec2::new(20.0, 0.0));
        let canvas = draw(&layer, 100, 100);
        let p = px(&canvas, 70, 50);
        assert!(p.r >= 240 && p.b <= 15, "{p:?}");
    }

    #[test]
    fn angular_sweeps_clockwise_from_plus_x() {
        let mut layer = red_blue();
        layer.set_style(GradientStyle::Angular);
        let canvas = draw(&layer, 101, 101);

        // Right of center: start of the sweep.
        let right = px(&canvas, 90, 50);
        assert!(right.r >= 240, "{right:?}");

        // Below center: a quarter of the way round.
        let below = px(&canvas, 50, 90);
        assert!((185..=198).contains(&below.r), "{below:?}");

        // Above center: three quarters of the way round.
        let above = px(&canvas, 50, 10);
        assert!((57..=70).contains(&above.r), "{above:?}");
    }

    #[test]
    fn rotation_turns_the_sweep() {
        let mut layer = red_blue();
        layer.set_style(GradientStyle::Angular);
        layer.set_rotation(core::f32::consts::FRAC_PI_2);
        let canvas = draw(&layer, 101, 101);

        // The sweep start now points down; sample just clockwise of the seam.
        let below = px(&canvas, 45, 90);
        assert!(below.r >= 240, "{below:?}");
    }

    #[test]
    fn offset_is_applied_in_screen_space_under_rotation() {
        let mut layer = red_blue();
        layer.set_transform(Vec2::new(20.0, 0.0), core::f32::consts::FRAC_PI_2, 1.0);
        let canvas = draw(&layer, 100, 100);

        let center = px(&canvas, 70, 50);
        assert!(center.r >= 240 && center.b <= 15, "{center:?}");

        // Rotating the offset would have put the center here instead.
        let rotated = px(&canvas, 50, 70);
        assert!(rotated.r < 200, "{rotated:?}");
    }

    #[test]
    fn hard_edge_stays_put_on_a_large_radius() {
        let mut layer = GradientLayer::new();
        layer
            .set_stops(vec![red(), red(), blue(), blue()], Some(vec![0.0, 0.31, 0.31, 1.0]))
            .unwrap();
        layer
            .set_radial_parameters(RadialGeometry::Simple { center: Some(Vec2::new(0.0, 0.5)), radius: 1000.0 })
            .unwrap();
        let canvas = draw(&layer, 1000, 1);

        // Pixel x samples t = (x + 0.5) / 1000.
        assert_eq!(px(&canvas, 309, 0), Pixel::new(255, 0, 0, 255));
        assert_eq!(px(&canvas, 310, 0), Pixel::new(0, 0, 255, 255));
        assert_eq!(px(&canvas, 311, 0), Pixel::new(0, 0, 255, 255));
    }

    #[test]
    fn annulus_paints_only_the_ring() {
        let mut layer = red_blue();
        layer
            .set_radial_parameters(RadialGeometry::Annular { center: None, inner: 10.0, outer: 20.0 })
            .unwrap();
        let canvas = draw(&layer, 100, 100);

        assert_eq!(px(&canvas, 50, 50).a, 0);
        assert_eq!(px(&canvas, 65, 50).a, 255);
        assert_eq!(px(&canvas, 90, 50).a, 0);
    }

    #[test]
    fn scale_grows_the_gradient() {
        let mut layer = red_blue();
        layer
            .set_radial_parameters(RadialGeometry::Simple { center: None, radius: 10.0 })
            .unwrap();
        let unscaled = px(&draw(&layer, 100, 100), 60, 50);
        layer.set_scale(2.0);
        let scaled = px(&draw(&layer, 100, 100), 60, 50);

        assert!(unscaled.b >= 250, "{unscaled:?}");
        assert!(scaled.r > 60 && scaled.b < 200, "{scaled:?}");
    }

    #[test]
    fn repeat_spread_restarts_past_the_radius() {
        let mut layer = red_blue();
        layer
            .set_radial_parameters(RadialGeometry::Simple { center: None, radius: 10.0 })
            .unwrap();
        layer.set_spread(SpreadMode::Repeat);
        let canvas = draw(&layer, 100, 100);
        // Distance 10.5 from center is just past one period.
        let p = px(&canvas, 60, 50);
        assert!(p.r >= 240, "{p:?}");
    }

    // ── degradation ────────────────────────────────────────────────────────

    #[test]
    fn no_stops_paints_nothing() {
        let canvas = draw(&GradientLayer::new(), 8, 8);
        assert!(canvas.pixels().iter().all(|p| p.a == 0));
    }

    #[test]
    fn single_stop_is_a_solid_fill() {
        let mut layer = GradientLayer::new();
        layer.set_colors(vec![green()]).unwrap();
        assert!(!layer.is_renderable());
        let canvas = draw(&layer, 8, 8);
        assert!(canvas.pixels().iter().all(|p| *p == Pixel::new(0, 255, 0, 255)));
    }

    #[test]
    fn zero_scale_falls_back_to_first_stop() {
        let mut layer = red_blue();
        layer.set_scale(0.0);
        assert!(!layer.is_renderable());
        let canvas = draw(&layer, 8, 8);
        assert!(canvas.pixels().iter().all(|p| *p == Pixel::new(255, 0, 0, 255)));
    }

    #[test]
    fn empty_bounds_paint_nothing() {
        let layer = red_blue();
        let mut canvas = Canvas::new(8, 8);
        layer.render(&mut canvas, Rect::new(2.0, 2.0, 0.0, 5.0));
        layer.render(&mut canvas, Rect::new(f32::NAN, 0.0, 5.0, 5.0));
        assert!(canvas.pixels().iter().all(|p| p.a == 0));
    }

    #[test]
    fn bounds_clip_the_output() {
        let layer = red_blue();
        let mut canvas = Canvas::new(20, 20);
        layer.render(&mut canvas, Rect::new(5.0, 5.0, 10.0, 10.0));
        assert_eq!(px(&canvas, 4, 10).a, 0);
        assert_eq!(px(&canvas, 5, 10).a, 255);
        assert_eq!(px(&canvas, 15, 10).a, 0);
    }

    // ── config ─────────────────────────────────────────────────────────────

    #[test]
    fn apply_config_validates_and_normalizes() {
        let mut layer = GradientLayer::new();
        let config = GradientConfig {
            stops: vec![ColorStop::new(0.9, red()), ColorStop::new(0.9, blue())],
            explicit_locations: false,
            style: GradientStyle::Angular,
            ..GradientConfig::default()
        };
        layer.apply_config(config).unwrap();
        assert_eq!(layer.locations(), vec![0.0, 1.0]);
        assert_eq!(layer.style(), GradientStyle::Angular);

        let bad = GradientConfig {
            geometry: RadialGeometry::Annular { center: None, inner: 3.0, outer: 1.0 },
            ..layer.config().clone()
        };
        assert!(layer.apply_config(bad).is_err());
        assert_eq!(layer.geometry(), RadialGeometry::Fit);
    }

    #[test]
    fn with_config_roundtrips_through_config() {
        let layer = red_blue();
        let copy = GradientLayer::with_config(layer.config().clone()).unwrap();
        assert_eq!(copy.config(), layer.config());
    }
}
