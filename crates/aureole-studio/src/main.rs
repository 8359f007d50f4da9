mod host;

use std::f32::consts::TAU;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context, Result};

use aureole_engine::anim::{Easing, Repeat, TransformTween};
use aureole_engine::coords::{Rect, Vec2};
use aureole_engine::logging::{init_logging, LoggingConfig};
use aureole_engine::paint::{Color, SpreadMode};
use aureole_engine::raster::{Canvas, DrawContext};
use aureole_engine::time::FrameClock;
use aureole_engine::{GradientLayer, GradientStyle, RadialGeometry, Transform};

use host::Compositor;

const FRAME_SIZE: u32 = 256;
const DEFAULT_FRAMES: u32 = 24;
const DEFAULT_OUT_DIR: &str = "aureole-frames";

/// Command-line options: `aureole-studio [OUT_DIR] [FRAMES]`.
struct Options {
    out_dir: PathBuf,
    frames: u32,
}

impl Options {
    fn from_args() -> Result<Self> {
        let mut args = std::env::args().skip(1);
        let out_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUT_DIR), PathBuf::from);
        let frames = match args.next() {
            Some(s) => s.parse().with_context(|| format!("invalid frame count {s:?}"))?,
            None => DEFAULT_FRAMES,
        };
        if frames == 0 {
            bail!("frame count must be at least 1");
        }
        Ok(Self { out_dir, frames })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());
    let opts = Options::from_args()?;

    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("creating {}", opts.out_dir.display()))?;

    let half = (FRAME_SIZE / 2) as f32;
    let mut host = Compositor::new(FRAME_SIZE, FRAME_SIZE);

    host.add(Rect::new(0.0, 0.0, FRAME_SIZE as f32, FRAME_SIZE as f32), backdrop()?);
    host.add(Rect::new(0.0, 0.0, half, half), sunset()?);
    let ring = host.add(Rect::new(half, 0.0, half, half), color_wheel()?);
    let pulse = host.add(Rect::new(0.0, half, half, half), ripples()?);

    let mut spin = TransformTween::new(
        Transform::IDENTITY,
        Transform::new(Vec2::zero(), TAU, 1.0),
        opts.frames as f32 / 24.0,
    )
    .repeat(Repeat::Loop);
    let mut breathe = TransformTween::new(
        Transform::IDENTITY,
        Transform::new(Vec2::new(6.0, -6.0), 0.0, 1.6),
        opts.frames as f32 / 48.0,
    )
    .easing(Easing::EaseInOut)
    .repeat(Repeat::PingPong);

    let mut clock = FrameClock::fixed(Duration::from_secs_f32(1.0 / 24.0));
    for _ in 0..opts.frames {
        let ft = clock.tick();

        spin.advance(ft.dt);
        breathe.advance(ft.dt);
        if let Some(layer) = host.layer_mut(ring) {
            spin.apply(layer);
        }
        if let Some(layer) = host.layer_mut(pulse) {
            breathe.apply(layer);
        }

        let frame = host.draw_frame();
        let path = opts.out_dir.join(format!("frame_{:04}.png", ft.frame_index));
        write_png(&frame, &path)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn backdrop() -> Result<GradientLayer> {
    let mut layer = GradientLayer::new();
    layer.set_colors(vec![Color::from_srgb_u8(0x20, 0x24, 0x30, 0xff), Color::from_srgb_u8(0x08, 0x09, 0x0c, 0xff)])?;
    layer.set_scale(1.5);
    Ok(layer)
}

fn sunset() -> Result<GradientLayer> {
    let mut layer = GradientLayer::new();
    layer.set_stops(
        vec![
            Color::from_srgb_u8(0xff, 0xe0, 0x80, 0xff),
            Color::from_srgb_u8(0xff, 0x70, 0x30, 0xff),
            Color::from_srgb_u8(0x80, 0x10, 0x60, 0xc0),
            Color::transparent(),
        ],
        Some(vec![0.0, 0.3, 0.8, 1.0]),
    )?;
    Ok(layer)
}

fn color_wheel() -> Result<GradientLayer> {
    let mut layer = GradientLayer::new();
    layer.set_colors(vec![
        Color::rgb(1.0, 0.0, 0.0),
        Color::rgb(1.0, 1.0, 0.0),
        Color::rgb(0.0, 1.0, 0.0),
        Color::rgb(0.0, 1.0, 1.0),
        Color::rgb(0.0, 0.0, 1.0),
        Color::rgb(1.0, 0.0, 1.0),
        Color::rgb(1.0, 0.0, 0.0),
    ])?;
    layer.set_style(GradientStyle::Angular);
    layer.set_radial_parameters(RadialGeometry::Annular { center: None, inner: 28.0, outer: 56.0 })?;
    Ok(layer)
}

fn ripples() -> Result<GradientLayer> {
    let mut layer = GradientLayer::new();
    layer.set_colors(vec![Color::rgb(0.1, 0.6, 1.0), Color::from_straight(0.1, 0.6, 1.0, 0.1)])?;
    layer.set_radial_parameters(RadialGeometry::Simple { center: None, radius: 14.0 })?;
    layer.set_spread(SpreadMode::Reflect);
    Ok(layer)
}

fn write_png(canvas: &Canvas, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(canvas.width(), canvas.height(), canvas.to_straight_rgba8())
        .context("canvas buffer does not match its dimensions")?;
    img.save(path).with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}
