//! Embedded tray icon asset
//!
//! A framed landscape picture, rendered from SVG to an ARGB32 pixmap for
//! `StatusNotifierItem`.

pub const ICON_TRAY: &[u8] = include_bytes!("../../icons/tray/bgchanger-tray.svg");

/// Standard tray icon size (pixels)
const ICON_SIZE: u32 = 64;

/// Render SVG bytes to ARGB32 pixmap for `StatusNotifierItem`
///
/// Returns `None` if the SVG cannot be parsed or rendered.
#[allow(clippy::cast_precision_loss)] // 64 fits in f32 mantissa
pub fn render_svg_to_argb32(svg_data: &[u8]) -> Option<ksni::Icon> {
    let opts = resvg::usvg::Options::default();
    let tree = resvg::usvg::Tree::from_data(svg_data, &opts).ok()?;

    let mut pixmap = resvg::tiny_skia::Pixmap::new(ICON_SIZE, ICON_SIZE)?;
    let render_ts = resvg::tiny_skia::Transform::from_scale(
        ICON_SIZE as f32 / tree.size().width(),
        ICON_SIZE as f32 / tree.size().height(),
    );
    resvg::render(&tree, render_ts, &mut pixmap.as_mut());

    // tiny_skia stores RGBA, StatusNotifierItem wants ARGB
    let argb_data = pixmap
        .data()
        .chunks_exact(4)
        .flat_map(|px| [px[3], px[0], px[1], px[2]])
        .collect();

    #[allow(clippy::cast_possible_wrap)] // ICON_SIZE=64 is safe for i32
    let icon_size_i32 = ICON_SIZE as i32;

    Some(ksni::Icon {
        width: icon_size_i32,
        height: icon_size_i32,
        data: argb_data,
    })
}
