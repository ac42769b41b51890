use nesbridge_core::display::RasterSurface;

/// Encode a raster surface as an 8-bit RGBA PNG.
pub fn encode_png(surface: &RasterSurface) -> Result<Vec<u8>, png::EncodingError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, surface.width(), surface.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(surface.as_bytes())?;
        writer.finish()?;
    }
    Ok(out)
}
