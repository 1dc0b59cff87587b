use super::legend::GradientStop;
use crate::models::style::Rgb;
use anyhow::Context;
use colorgrad::{Gradient, GradientBuilder, LinearGradient};
use image::{ColorType, ImageEncoder, Rgba, RgbaImage, codecs::png::PngEncoder};
use std::io::Cursor;

/// Linear gradient through `colors` placed at `domain` (ascending).
pub fn linear_gradient(colors: &[Rgb], domain: &[f32]) -> anyhow::Result<LinearGradient> {
    let colors: Vec<colorgrad::Color> = colors.iter().map(Rgb::to_colorgrad).collect();
    GradientBuilder::new()
        .colors(&colors)
        .domain(domain)
        .build::<LinearGradient>()
        .context("invalid colour gradient")
}

/// Paint the stop list as a vertical bar, lowest elevation at the bottom.
/// An empty stop list yields a fully transparent image.
pub fn render_legend_png(stops: &[GradientStop], width: u32, height: u32) -> anyhow::Result<Vec<u8>> {
    let mut img = RgbaImage::new(width, height);

    if stops.len() >= 2 {
        let colors: Vec<Rgb> = stops.iter().map(|s| s.color).collect();
        let domain: Vec<f32> = stops.iter().map(|s| s.position as f32).collect();
        let grad = linear_gradient(&colors, &domain)?;

        for y in 0..height {
            let t = 100.0 * (1.0 - (y as f32 + 0.5) / height as f32);
            let px = Rgba(grad.at(t).to_rgba8());
            for x in 0..width {
                img.put_pixel(x, y, px);
            }
        }
    }

    let mut png_data = Vec::new();
    PngEncoder::new(Cursor::new(&mut png_data))
        .write_image(img.as_raw(), width, height, ColorType::Rgba8.into())
        .context("failed to encode legend PNG")?;
    Ok(png_data)
}
