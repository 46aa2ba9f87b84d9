//! Application state - the demo page and its tiles

use egui::{Id, LayerId, Order, TextureOptions};
use showcase_ui::effects::{HOVER_SCALE, TRANSITION_SECS};
use showcase_ui::painter::{inner_size, paint_showcase};
use showcase_ui::{
    dispatch, Bounds, ElementSize, PictureData, PointerTracker, ResizeObserver, Showcase,
    ShowcaseApp, ShowcaseOptions, TileTexture,
};

use crate::config::{Config, TileConfig};
use crate::ui;

/// A showcase plus what the page needs to drive and draw it
struct Tile {
    showcase: Showcase,
    tint: [u8; 3],
    tracker: PointerTracker,
    texture: Option<egui::TextureHandle>,
}

impl Tile {
    /// Upload the picture on first use.
    fn texture(&mut self, ctx: &egui::Context) -> TileTexture {
        let handle = self.texture.get_or_insert_with(|| {
            let picture = PictureData::load_or_placeholder(self.showcase.src(), self.tint);
            ctx.load_texture(self.showcase.src(), picture.to_color_image(), TextureOptions::LINEAR)
        });
        let [width, height] = handle.size();
        TileTexture {
            id: handle.id(),
            size: [width as f32, height as f32],
        }
    }
}

/// Main application state
pub struct DemoApp {
    tiles: Vec<Tile>,
    observer: ResizeObserver,
    options: ShowcaseOptions,
    /// Raw text of the size field
    size_text: String,
    /// Tile currently under the pointer
    hovered: Option<usize>,
}

impl DemoApp {
    /// Create new app from configuration
    pub fn new(config: &Config) -> Self {
        let options = config.showcase.options();
        let sources: Vec<TileConfig> = ui::tile_sources(config);
        let observer = ResizeObserver::new();

        let tiles = ui::create_showcases_from_config(&sources, options)
            .into_iter()
            .zip(&sources)
            .map(|(mut showcase, source)| {
                showcase.mount(&observer);
                Tile {
                    showcase,
                    tint: source.tint,
                    tracker: PointerTracker::new(),
                    texture: None,
                }
            })
            .collect::<Vec<_>>();

        log::info!("Showing {} tiles with {:?}", tiles.len(), options);

        Self {
            tiles,
            observer,
            options,
            size_text: config.showcase.size.to_string(),
            hovered: None,
        }
    }

    /// Deliver resize notifications queued during the previous frame.
    fn deliver_resizes(&mut self) {
        for (target, size) in self.observer.take_notifications() {
            if let Some(tile) = self
                .tiles
                .iter_mut()
                .find(|tile| tile.showcase.target() == Some(target))
            {
                log::debug!(
                    "Showcase {:?} resized to {}x{}",
                    tile.showcase.id(),
                    size.width,
                    size.height
                );
                tile.showcase.on_resize(size);
            }
        }
    }

    fn set_options(&mut self, options: ShowcaseOptions) {
        log::debug!("Options changed: {:?}", options);
        self.options = options;
        for tile in &mut self.tiles {
            tile.showcase.set_options(options);
        }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        let mut options = self.options;

        ui.label("Size (in px)");
        let response = ui.add(egui::TextEdit::singleline(&mut self.size_text).desired_width(120.0));
        if response.changed() {
            options.size = ui::parse_size(&self.size_text);
        }

        ui.add_space(8.0);
        ui.checkbox(&mut options.debug, "Debug");
        ui.checkbox(&mut options.shadow, "Shadows");
        ui.checkbox(&mut options.reflection, "Reflection");
        ui.checkbox(&mut options.radial_reflection, "Use Radial Reflection");

        // NaN sizes never compare equal, so compare the bits
        let changed = options.size.to_bits() != self.options.size.to_bits()
            || options.debug != self.options.debug
            || options.shadow != self.options.shadow
            || options.reflection != self.options.reflection
            || options.radial_reflection != self.options.radial_reflection;
        if changed {
            self.set_options(options);
        }
    }

    fn tiles(&mut self, ui: &mut egui::Ui) {
        let ctx = ui.ctx().clone();
        let sizes: Vec<egui::Vec2> = self.tiles.iter().map(|tile| inner_size(&tile.showcase)).collect();
        let origin = ui.cursor().min;
        let (slots, height) = ui::layout_rows(origin, ui.available_width(), &sizes);
        ui.allocate_space(egui::vec2(ui.available_width(), height));

        // Current outer scale of every tile
        let scales: Vec<f32> = self
            .tiles
            .iter()
            .map(|tile| {
                let t = ctx.animate_bool_with_time(
                    scale_id(&tile.showcase),
                    tile.showcase.is_hovered(),
                    TRANSITION_SECS,
                );
                1.0 + (HOVER_SCALE as f32 - 1.0) * ease_out(t)
            })
            .collect();

        let pointer = ctx.input(|i| i.pointer.hover_pos());
        let scaled: Vec<egui::Rect> = slots
            .iter()
            .zip(&scales)
            .map(|(slot, scale)| egui::Rect::from_center_size(slot.center(), slot.size() * *scale))
            .collect();
        self.hovered = pick_hovered(self.hovered, pointer, &scaled);

        for (index, tile) in self.tiles.iter_mut().enumerate() {
            let slot = slots[index];
            let scale = scales[index];

            if let Some(target) = tile.showcase.target() {
                let size = ElementSize::new(slot.width() as f64, slot.height() as f64);
                if self.observer.report(target, size) {
                    // Delivered on the next frame
                    ctx.request_repaint();
                }
            }

            let rect = scaled[index];
            let bounds = Bounds::new(
                rect.left() as f64,
                rect.top() as f64,
                rect.width() as f64,
                rect.height() as f64,
            );
            let sample = pointer
                .filter(|_| self.hovered == Some(index))
                .map(|p| [p.x as f64, p.y as f64]);
            if let Some(event) = tile.tracker.update(sample, bounds) {
                log::trace!("Showcase {:?}: {:?}", tile.showcase.id(), event);
                dispatch(&mut tile.showcase, event);
            }

            let texture = tile.texture(&ctx);
            if tile.showcase.is_hovered() || scale > 1.0 {
                // Raised tiles paint above their neighbours
                let layer = LayerId::new(Order::Foreground, Id::new(("showcase-layer", tile.showcase.id().0)));
                paint_showcase(&ctx.layer_painter(layer), slot, scale, &tile.showcase, Some(texture));
            } else {
                paint_showcase(ui.painter(), slot, scale, &tile.showcase, Some(texture));
            }
        }
    }
}

fn scale_id(showcase: &Showcase) -> Id {
    Id::new(("showcase-scale", showcase.id().0))
}

/// Quadratic ease-out for the hover zoom.
fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t) * (1.0 - t)
}

/// The tile under the pointer. The current one keeps the pointer while it
/// still covers it, since raised tiles overlap their neighbours.
fn pick_hovered(current: Option<usize>, pointer: Option<egui::Pos2>, rects: &[egui::Rect]) -> Option<usize> {
    let pointer = pointer?;
    if let Some(index) = current {
        if rects.get(index).is_some_and(|rect| rect.contains(pointer)) {
            return Some(index);
        }
    }
    rects.iter().position(|rect| rect.contains(pointer))
}

impl ShowcaseApp for DemoApp {
    fn ui(&mut self, ctx: &egui::Context) {
        self.deliver_resizes();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Showcase Demo");
                ui.add_space(8.0);
                self.controls(ui);
                ui.add_space(24.0);
            });
            self.tiles(ui);
        });
    }

    fn on_close(&mut self) {
        for tile in &mut self.tiles {
            tile.showcase.unmount();
        }
        log::info!("Closing showcase demo");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::{pos2, Rect};

    #[test]
    fn test_ease_out() {
        assert_eq!(ease_out(0.0), 0.0);
        assert_eq!(ease_out(1.0), 1.0);
        assert_eq!(ease_out(0.5), 0.75);
        assert_eq!(ease_out(2.0), 1.0);
    }

    #[test]
    fn test_pick_hovered_prefers_current_tile() {
        let rects = [
            Rect::from_min_max(pos2(0.0, 0.0), pos2(120.0, 100.0)),
            Rect::from_min_max(pos2(100.0, 0.0), pos2(200.0, 100.0)),
        ];
        let overlap = Some(pos2(110.0, 50.0));

        assert_eq!(pick_hovered(None, overlap, &rects), Some(0));
        assert_eq!(pick_hovered(Some(1), overlap, &rects), Some(1));
        assert_eq!(pick_hovered(Some(0), Some(pos2(150.0, 50.0)), &rects), Some(1));
        assert_eq!(pick_hovered(Some(0), None, &rects), None);
        assert_eq!(pick_hovered(None, Some(pos2(500.0, 50.0)), &rects), None);
    }

    #[test]
    fn test_new_app_mounts_every_tile() {
        let app = DemoApp::new(&Config::default());
        assert_eq!(app.tiles.len(), 3);
        assert_eq!(app.observer.len(), 3);
        assert_eq!(app.size_text, "200");
        assert!(app.tiles.iter().all(|tile| tile.showcase.is_mounted()));
    }

    #[test]
    fn test_resizes_are_delivered_next_frame() {
        let mut app = DemoApp::new(&Config::default());
        let target = app.tiles[0].showcase.target().unwrap();
        app.observer.report(target, ElementSize::new(220.0, 300.0));
        assert_eq!(app.tiles[0].showcase.size(), None);

        app.deliver_resizes();
        assert_eq!(app.tiles[0].showcase.size(), Some(ElementSize::new(220.0, 300.0)));
        assert_eq!(app.tiles[1].showcase.size(), None);
    }

    #[test]
    fn test_set_options_reaches_every_tile() {
        let mut app = DemoApp::new(&Config::default());
        let options = ShowcaseOptions { debug: true, ..app.options };
        app.set_options(options);
        assert!(app.tiles.iter().all(|tile| tile.showcase.options().debug));
    }

    #[test]
    fn test_close_unmounts() {
        let mut app = DemoApp::new(&Config::default());
        app.on_close();
        assert!(app.observer.is_empty());
    }
}
