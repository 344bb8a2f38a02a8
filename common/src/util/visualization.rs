use crate::db::core::Layout;
use image::{ImageResult, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect as ImageRect;
use std::path::Path;

const BACKGROUND: Rgb<u8> = Rgb([20, 20, 20]);

/// Renders modules as filled rectangles and every driver-to-sink connection as
/// a straight line. Overlapping modules show through their outlines.
pub fn draw_floorplan(layout: &Layout, filename: &str, width: u32, height: u32) -> ImageResult<()> {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);

    let extent_x = layout
        .modules()
        .iter()
        .map(|m| m.x() + m.width())
        .max()
        .unwrap_or(0);
    let extent_y = layout
        .modules()
        .iter()
        .map(|m| m.y() + m.height())
        .max()
        .unwrap_or(0);
    if extent_x <= 0 || extent_y <= 0 {
        return img.save(Path::new(filename));
    }

    // Uniform scale keeps the aspect ratio of the floorplan.
    let scale = (width as f64 / extent_x as f64).min(height as f64 / extent_y as f64);
    let map = |x: i64, y: i64| (x as f64 * scale, height as f64 - y as f64 * scale);

    let color_module = Rgb([180, 60, 60]);
    let color_outline = Rgb([240, 200, 200]);
    let color_net = Rgb([60, 160, 220]);

    for module in layout.modules() {
        let (x, y_bot) = map(module.x(), module.y());
        let w = (module.width() as f64 * scale).max(2.0);
        let h = (module.height() as f64 * scale).max(2.0);
        let rect = ImageRect::at(x as i32, (y_bot - h) as i32).of_size(w as u32, h as u32);
        draw_filled_rect_mut(&mut img, rect, color_module);
        draw_hollow_rect_mut(&mut img, rect, color_outline);
    }

    for net in layout.nets() {
        let Some(driver) = net.driver() else {
            continue;
        };
        let source = layout.module(driver).center();
        let (sx, sy) = map(source.x, source.y);
        for &sink in net.sinks() {
            let target = layout.module(sink).center();
            let (tx, ty) = map(target.x, target.y);
            draw_line_segment_mut(
                &mut img,
                (sx as f32, sy as f32),
                (tx as f32, ty as f32),
                color_net,
            );
        }
    }

    img.save(Path::new(filename))
}

/// Plots best cost against temperature, hottest step on the left. The
/// temperature axis is logarithmic since the schedule is geometric.
pub fn draw_cost_curve(
    samples: &[(f64, f64)],
    filename: &str,
    width: u32,
    height: u32,
) -> ImageResult<()> {
    let mut img = RgbImage::from_pixel(width, height, BACKGROUND);
    let margin = 40.0;
    let plot_w = (width as f64 - 2.0 * margin).max(1.0);
    let plot_h = (height as f64 - 2.0 * margin).max(1.0);

    let axis = Rgb([200, 200, 200]);
    let origin = (margin as f32, (height as f64 - margin) as f32);
    draw_line_segment_mut(&mut img, origin, ((margin + plot_w) as f32, origin.1), axis);
    draw_line_segment_mut(&mut img, origin, (origin.0, margin as f32), axis);

    let points: Vec<(f64, f64)> = samples
        .iter()
        .filter(|(t, c)| *t > 0.0 && c.is_finite())
        .map(|&(t, c)| (t.log10(), c))
        .collect();
    if points.len() < 2 {
        return img.save(Path::new(filename));
    }

    let (mut t_min, mut t_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut c_min, mut c_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(t, c) in &points {
        t_min = t_min.min(t);
        t_max = t_max.max(t);
        c_min = c_min.min(c);
        c_max = c_max.max(c);
    }
    let t_span = (t_max - t_min).max(f64::EPSILON);
    let c_span = (c_max - c_min).max(f64::EPSILON);

    let map = |t: f64, c: f64| {
        (
            (margin + (t_max - t) / t_span * plot_w) as f32,
            (height as f64 - margin - (c - c_min) / c_span * plot_h) as f32,
        )
    };

    let curve = Rgb([80, 120, 255]);
    for pair in points.windows(2) {
        let a = map(pair[0].0, pair[0].1);
        let b = map(pair[1].0, pair[1].1);
        draw_line_segment_mut(&mut img, a, b, curve);
    }
    for &(t, c) in &points {
        let (x, y) = map(t, c);
        let marker = ImageRect::at(x as i32 - 1, y as i32 - 1).of_size(3, 3);
        draw_filled_rect_mut(&mut img, marker, curve);
    }

    img.save(Path::new(filename))
}
