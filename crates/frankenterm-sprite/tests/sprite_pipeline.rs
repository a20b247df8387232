//! End-to-end: metrics → cache → rasterizer → atlas.

use frankenterm_sprite::{
    LineMetrics, LineStyle, SpriteAtlas, SpriteCache, SpriteError, SpriteRequest, render_glyph,
};

fn atlas_rows(atlas: &SpriteAtlas, x: u32, y: u32, w: u32, h: u32) -> Vec<Vec<u8>> {
    (y..y + h)
        .map(|row| (x..x + w).map(|col| atlas.get(col, row).unwrap_or(0)).collect())
        .collect()
}

#[test]
fn underline_lands_in_atlas_fully_covered() {
    let mut atlas = SpriteAtlas::new(128, 64);
    let req = SpriteRequest::new(36, 18, 9, 2);
    let glyph = render_glyph(&mut atlas, LineStyle::Underline, &req).expect("glyph");

    assert_eq!((glyph.width, glyph.height), (36, 2));
    assert_eq!(glyph.offset_y, 18 - 9);
    assert_eq!(glyph.advance_x, 36);

    let rows = atlas_rows(&atlas, glyph.atlas_x, glyph.atlas_y, 36, 2);
    assert!(rows.iter().flatten().all(|&c| c == 255));
    // Padding border stays empty.
    assert_eq!(atlas.get(glyph.atlas_x - 1, glyph.atlas_y), Some(0));
    assert_eq!(atlas.get(glyph.atlas_x + 36, glyph.atlas_y), Some(0));
}

#[test]
fn dotted_pattern_survives_packing() {
    let mut atlas = SpriteAtlas::new(64, 64);
    let req = SpriteRequest::new(36, 18, 16, 1);
    let glyph = render_glyph(&mut atlas, LineStyle::DottedUnderline, &req).expect("glyph");

    let row = &atlas_rows(&atlas, glyph.atlas_x, glyph.atlas_y, 36, 1)[0];
    let filled: Vec<usize> = row
        .iter()
        .enumerate()
        .filter(|(_, c)| **c == 255)
        .map(|(x, _)| x)
        .collect();
    let expected: Vec<usize> = (4..13).chain(22..31).collect();
    assert_eq!(filled, expected);
}

#[test]
fn thick_stroke_on_short_cell_does_not_fault() {
    // Regression: thickness 200 on an 18px cell.
    let mut atlas = SpriteAtlas::new(2048, 2048);
    let req = SpriteRequest::new(36, 18, 9, 200);
    for style in LineStyle::ALL {
        let glyph = render_glyph(&mut atlas, style, &req).expect("glyph");
        assert_eq!(glyph.advance_x, 36);
    }
}

#[test]
fn cache_serves_every_style_from_metrics() {
    let metrics = LineMetrics::from_json_str(
        r#"{"cell_width": 12, "cell_height": 24, "underline_position": 20, "underline_thickness": 2}"#,
    )
    .expect("metrics");
    let mut cache = SpriteCache::new(SpriteAtlas::new(256, 256));

    let first: Vec<_> = LineStyle::ALL
        .iter()
        .map(|&style| cache.get_or_render_for(&metrics, style).expect("render"))
        .collect();
    let second: Vec<_> = LineStyle::ALL
        .iter()
        .map(|&style| cache.get_or_render_for(&metrics, style).expect("cached"))
        .collect();

    assert_eq!(first, second);
    assert_eq!(cache.stats().misses, LineStyle::ALL.len() as u64);
    assert_eq!(cache.stats().hits, LineStyle::ALL.len() as u64);
}

#[test]
fn exhausted_atlas_fails_the_request_only() {
    let mut cache = SpriteCache::new(SpriteAtlas::new(40, 8));
    let req = SpriteRequest::new(36, 18, 9, 2);
    cache.get_or_render(LineStyle::Underline, &req).expect("fits");

    let err = cache
        .get_or_render(LineStyle::Strikethrough, &SpriteRequest::new(36, 18, 9, 3))
        .unwrap_err();
    assert_eq!(err, SpriteError::AtlasFull);

    // The earlier sprite is still served from the cache.
    cache.get_or_render(LineStyle::Underline, &req).expect("hit");
    assert_eq!(cache.stats().hits, 1);
}
