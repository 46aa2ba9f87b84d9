//! UI layer - tiles, size parsing, row layout

use egui::{Pos2, Rect, Vec2};
use glob::glob;
use showcase_ui::{Showcase, ShowcaseId, ShowcaseOptions};

use crate::config::{Config, TileConfig};

/// Horizontal and vertical gap between tiles
pub const TILE_GAP: f32 = 10.0;

/// Tiles shown when the config names none
fn default_tiles() -> Vec<TileConfig> {
    [
        ("assets/covers/one.jpg", [180, 60, 40]),
        ("assets/covers/two.png", [40, 90, 170]),
        ("assets/covers/three.jpg", [70, 140, 80]),
    ]
    .into_iter()
    .map(|(src, tint)| TileConfig { src: src.to_string(), tint })
    .collect()
}

/// Parse the size field the way `parseInt(value, 10)` does.
///
/// Leading whitespace and a sign are accepted, then the longest run of
/// digits. Anything without digits is NaN.
pub fn parse_size(text: &str) -> f64 {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let digits = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_digit()).len();
    if digits == 0 {
        return f64::NAN;
    }

    let value: f64 = rest[..digits].parse().unwrap_or(f64::NAN);
    if negative {
        -value
    } else {
        value
    }
}

/// Configured tiles followed by gallery matches, or the built-in set when
/// both are empty.
pub fn tile_sources(config: &Config) -> Vec<TileConfig> {
    let mut tiles = config.tiles.clone();

    if let Some(gallery) = &config.gallery {
        match glob(&gallery.pattern) {
            Ok(paths) => {
                for entry in paths {
                    match entry {
                        Ok(path) => tiles.push(TileConfig {
                            src: path.to_string_lossy().into_owned(),
                            tint: gallery.tint,
                        }),
                        Err(e) => log::warn!("Skipping gallery entry: {}", e),
                    }
                }
            }
            Err(e) => log::warn!("Invalid gallery pattern '{}': {}", gallery.pattern, e),
        }
    }

    if tiles.is_empty() {
        log::warn!("No tiles configured, using the built-in set");
        tiles = default_tiles();
    }

    tiles
}

/// Create showcase widgets from tile configuration
pub fn create_showcases_from_config(tiles: &[TileConfig], options: ShowcaseOptions) -> Vec<Showcase> {
    tiles
        .iter()
        .enumerate()
        .map(|(index, tile)| Showcase::new(ShowcaseId::new(index as u32), &tile.src).with_options(options))
        .collect()
}

/// Place slots of the given sizes in centred rows that wrap at `width`.
///
/// Returns one rect per slot plus the total height used.
pub fn layout_rows(origin: Pos2, width: f32, sizes: &[Vec2]) -> (Vec<Rect>, f32) {
    let mut rects = Vec::with_capacity(sizes.len());
    let mut top = origin.y;
    let mut start = 0;

    while start < sizes.len() {
        // Always take at least one slot per row
        let mut end = start + 1;
        let mut row_width = sizes[start].x;
        while end < sizes.len() && row_width + TILE_GAP + sizes[end].x <= width {
            row_width += TILE_GAP + sizes[end].x;
            end += 1;
        }

        let row_height = sizes[start..end].iter().fold(0.0_f32, |h, s| h.max(s.y));
        let mut left = origin.x + ((width - row_width) / 2.0).max(0.0);
        for size in &sizes[start..end] {
            // Align items to the row's vertical centre
            let y = top + (row_height - size.y) / 2.0;
            rects.push(Rect::from_min_size(Pos2::new(left, y), *size));
            left += size.x + TILE_GAP;
        }

        top += row_height + TILE_GAP;
        start = end;
    }

    let height = if rects.is_empty() { 0.0 } else { top - TILE_GAP - origin.y };
    (rects, height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GalleryConfig;

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("200"), 200.0);
        assert_eq!(parse_size("  150px"), 150.0);
        assert_eq!(parse_size("+7"), 7.0);
        assert_eq!(parse_size("-5"), -5.0);
        assert_eq!(parse_size("12.9"), 12.0);
        assert!(parse_size("").is_nan());
        assert!(parse_size("abc").is_nan());
        assert!(parse_size("-").is_nan());
    }

    #[test]
    fn test_unparsable_size_falls_back_to_default_image() {
        assert_eq!(showcase_ui::image_size(parse_size("")), [110.0, 150.0]);
        assert_eq!(showcase_ui::image_size(parse_size("0")), [110.0, 150.0]);
    }

    #[test]
    fn test_tile_sources_fall_back_to_builtin() {
        let tiles = tile_sources(&Config::default());
        assert_eq!(tiles, default_tiles());
    }

    #[test]
    fn test_tile_sources_keep_configured_order() {
        let config = Config {
            tiles: vec![TileConfig { src: "b.png".into(), tint: [1, 2, 3] }],
            gallery: Some(GalleryConfig {
                pattern: "does/not/exist/*.png".into(),
                tint: [0, 0, 0],
            }),
            ..Default::default()
        };
        assert_eq!(tile_sources(&config), config.tiles);
    }

    #[test]
    fn test_create_showcases_share_options() {
        let options = ShowcaseOptions { size: 50.0, debug: true, ..Default::default() };
        let showcases = create_showcases_from_config(&default_tiles(), options);
        assert_eq!(showcases.len(), 3);
        assert_eq!(showcases[1].id(), ShowcaseId::new(1));
        assert_eq!(showcases[2].src(), "assets/covers/three.jpg");
        assert!(showcases.iter().all(|s| *s.options() == options));
    }

    #[test]
    fn test_layout_single_row_is_centred() {
        let sizes = [Vec2::new(100.0, 50.0), Vec2::new(100.0, 50.0)];
        let (rects, height) = layout_rows(Pos2::ZERO, 400.0, &sizes);
        // 210 wide row in 400: 95 on each side
        assert_eq!(rects[0].min, Pos2::new(95.0, 0.0));
        assert_eq!(rects[1].min, Pos2::new(205.0, 0.0));
        assert_eq!(height, 50.0);
    }

    #[test]
    fn test_layout_wraps() {
        let sizes = [Vec2::new(100.0, 50.0); 3];
        let (rects, height) = layout_rows(Pos2::new(0.0, 10.0), 250.0, &sizes);
        assert_eq!(rects[0].min.y, 10.0);
        assert_eq!(rects[2].min, Pos2::new(75.0, 70.0));
        assert_eq!(height, 110.0);
    }

    #[test]
    fn test_layout_empty() {
        let (rects, height) = layout_rows(Pos2::ZERO, 100.0, &[]);
        assert!(rects.is_empty());
        assert_eq!(height, 0.0);
    }
}
