use cairo::{Context, Format, ImageSurface};
use harmony_wheel::{DiscImage, Handle, Wheel};
use palette::Srgba;
use std::f64::consts::PI;
use std::path::Path;
use thiserror::Error;

pub const HANDLE_RADIUS: f64 = 12.0;
pub const HANDLE_BORDER: f64 = 2.0;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),
    #[error("Surface data unavailable: {0}")]
    Borrow(#[from] cairo::BorrowError),
    #[error("Failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Colours for the markers drawn on top of the disc.
pub struct HandleStyle {
    pub primary_fill: Srgba<f64>,
    pub primary_border: Srgba<f64>,
    pub ring: Srgba<f64>,
}

impl Default for HandleStyle {
    fn default() -> Self {
        Self {
            primary_fill: Srgba::new(1.0, 1.0, 1.0, 1.0),
            primary_border: Srgba::new(0.0, 0.0, 0.0, 0.1),
            ring: Srgba::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

/// Writes the wheel, optionally with its handles, to a PNG file.
pub fn render_png(wheel: &mut Wheel, path: &Path, with_handles: bool) -> Result<(), RenderError> {
    let handles = if with_handles {
        wheel.handles()
    } else {
        Vec::new()
    };
    let surface = paint(wheel.background(), &handles, &HandleStyle::default())?;

    let mut file = fs_err::File::create(path)?;
    surface.write_to_png(&mut file)?;
    log::info!("Wrote {}", path.display());
    Ok(())
}

pub fn paint(
    image: &DiscImage,
    handles: &[Handle],
    style: &HandleStyle,
) -> Result<ImageSurface, RenderError> {
    let mut surface =
        ImageSurface::create(Format::ARgb32, image.width as i32, image.height as i32)?;
    copy_disc(&mut surface, image)?;

    // the context holds a reference, so it can't exist while the pixel data is borrowed
    let cr = Context::new(&surface)?;
    for (i, handle) in handles.iter().enumerate() {
        if i == 0 {
            draw_handle(&cr, handle, style.primary_fill, style.primary_border)?;
        } else {
            draw_handle(&cr, handle, Srgba::new(0.0, 0.0, 0.0, 0.0), style.ring)?;
        }
    }
    drop(cr);

    surface.flush();
    Ok(surface)
}

/// Copies straight-alpha RGBA into cairo's premultiplied, native-endian ARGB32.
fn copy_disc(surface: &mut ImageSurface, image: &DiscImage) -> Result<(), RenderError> {
    let stride = surface.stride() as usize;
    let row_bytes = image.width as usize * 4;
    let mut data = surface.data()?;

    for (y, row) in image.data.chunks_exact(row_bytes).enumerate() {
        for (x, px) in row.chunks_exact(4).enumerate() {
            let a = u32::from(px[3]);
            let premultiply = |c: u8| u32::from(c) * a / 255;
            let argb = (a << 24)
                | (premultiply(px[0]) << 16)
                | (premultiply(px[1]) << 8)
                | premultiply(px[2]);
            let i = y * stride + x * 4;
            data[i..i + 4].copy_from_slice(&argb.to_ne_bytes());
        }
    }
    Ok(())
}

fn draw_handle(
    cr: &Context,
    handle: &Handle,
    fill: Srgba<f64>,
    border: Srgba<f64>,
) -> Result<(), cairo::Error> {
    cr.new_path();
    cr.arc(
        handle.position.x,
        handle.position.y,
        HANDLE_RADIUS - HANDLE_BORDER / 2.0,
        0.0,
        2.0 * PI,
    );

    let (r, g, b, a) = fill.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.fill_preserve()?;

    let (r, g, b, a) = border.into_components();
    cr.set_source_rgba(r, g, b, a);
    cr.set_line_width(HANDLE_BORDER);
    cr.stroke()
}
