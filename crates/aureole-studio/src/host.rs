use std::rc::Rc;

use aureole_engine::coords::Rect;
use aureole_engine::layer::{LayerId, RedrawQueue};
use aureole_engine::raster::{Canvas, DrawContext};
use aureole_engine::GradientLayer;

/// A layer placed in the frame, with its own backing store.
struct Slot {
    id: LayerId,
    frame: Rect,
    layer: GradientLayer,
    backing: Canvas,
}

/// Minimal stand-in for a compositing host.
///
/// Layers render into private backing stores only when they requested a
/// redraw; every frame composites all backing stores in insertion order.
pub struct Compositor {
    width: u32,
    height: u32,
    queue: RedrawQueue,
    slots: Vec<Slot>,
    next_id: u64,
}

impl Compositor {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            queue: RedrawQueue::new(),
            slots: Vec::new(),
            next_id: 1,
        }
    }

    /// Adds a layer occupying `frame` (whole pixels) and attaches it to the queue.
    pub fn add(&mut self, frame: Rect, mut layer: GradientLayer) -> LayerId {
        let id = LayerId(self.next_id);
        self.next_id += 1;
        layer.attach(id, Rc::new(self.queue.clone()));
        let backing = Canvas::new(frame.size.x.max(0.0) as u32, frame.size.y.max(0.0) as u32);
        self.slots.push(Slot { id, frame, layer, backing });
        id
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut GradientLayer> {
        self.slots.iter_mut().find(|s| s.id == id).map(|s| &mut s.layer)
    }

    /// Runs one draw cycle and returns the composited frame.
    pub fn draw_frame(&mut self) -> Canvas {
        let pending = self.queue.drain();
        for id in &pending {
            let Some(slot) = self.slots.iter_mut().find(|s| s.id == *id) else {
                log::warn!("redraw requested for unknown {id}");
                continue;
            };
            let bounds = Rect::from_size(slot.backing.width() as f32, slot.backing.height() as f32);
            slot.backing = Canvas::new(slot.backing.width(), slot.backing.height());
            slot.layer.display(&mut slot.backing, bounds);
        }
        log::debug!("redrew {} of {} layers", pending.len(), self.slots.len());

        let mut frame = Canvas::new(self.width, self.height);
        for slot in &self.slots {
            blit(&mut frame, &slot.backing, slot.frame);
        }
        frame
    }
}

fn blit(dst: &mut Canvas, src: &Canvas, at: Rect) {
    let ox = at.origin.x as i64;
    let oy = at.origin.y as i64;
    for y in 0..src.height() {
        for x in 0..src.width() {
            let (dx, dy) = (ox + x as i64, oy + y as i64);
            if dx < 0 || dy < 0 {
                continue;
            }
            if let Some(p) = src.pixel(x, y) {
                dst.blend_pixel(dx as u32, dy as u32, p.to_color(), 1.0);
            }
        }
    }
}
