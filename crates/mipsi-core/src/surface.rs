//! Drawing surface model and the reset operation.

use crate::color::Color;
use crate::error::{BootstrapError, BootstrapResult};
use serde::{Deserialize, Serialize};

/// Logical size of the drawing surface in units, plus the pixel size of
/// one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSpec {
    pub width: u32,
    pub height: u32,
    pub unit_width: u32,
    pub unit_height: u32,
}

impl Default for SurfaceSpec {
    fn default() -> Self {
        Self::new(64, 64, 1, 1)
    }
}

impl SurfaceSpec {
    pub const fn new(width: u32, height: u32, unit_width: u32, unit_height: u32) -> Self {
        Self {
            width,
            height,
            unit_width,
            unit_height,
        }
    }

    /// Pixel dimensions `(width * unit_width, height * unit_height)`.
    /// Zero factors and products that overflow `u32` are rejected.
    pub fn pixel_size(&self) -> BootstrapResult<(u32, u32)> {
        let invalid = || BootstrapError::InvalidSurface {
            width: self.width,
            height: self.height,
            unit_width: self.unit_width,
            unit_height: self.unit_height,
        };
        if self.width == 0 || self.height == 0 || self.unit_width == 0 || self.unit_height == 0 {
            return Err(invalid());
        }
        let w = self.width.checked_mul(self.unit_width).ok_or_else(invalid)?;
        let h = self.height.checked_mul(self.unit_height).ok_or_else(invalid)?;
        Ok((w, h))
    }
}

/// A pixel-addressable surface with a 2D fill primitive.
///
/// Resizing clears any fill style previously set, as a canvas does, so
/// callers set the style after sizing.
pub trait DrawingSurface {
    fn set_size(&mut self, width: u32, height: u32);
    fn size(&self) -> (u32, u32);
    fn set_fill_style(&mut self, color: Color);
    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32);
}

/// Size the surface to `spec` and paint every pixel `color`.
pub fn reset_surface<S: DrawingSurface + ?Sized>(
    surface: &mut S,
    spec: SurfaceSpec,
    color: Color,
) -> BootstrapResult<()> {
    let (w, h) = spec.pixel_size()?;
    surface.set_size(w, h);
    surface.set_fill_style(color);
    surface.fill_rect(0, 0, w, h);
    log::debug!("surface reset to {w}x{h} filled {color}");
    Ok(())
}

/// In-memory RGBA surface. Backs headless hosts.
#[derive(Debug, Clone, Default)]
pub struct MemorySurface {
    width: u32,
    height: u32,
    fill: Color,
    pixels: Vec<u8>,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        let mut surface = Self::default();
        surface.set_size(width, height);
        surface
    }

    /// RGBA bytes of the pixel at `(x, y)`, or `None` outside the surface.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let px = &self.pixels[i..i + 4];
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// True if every pixel equals `color`.
    pub fn is_filled_with(&self, color: Color) -> bool {
        let want = color.to_rgba_bytes();
        self.pixels.chunks_exact(4).all(|px| px == want)
    }
}

impl DrawingSurface for MemorySurface {
    fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.fill = Color::BLACK;
        // A freshly sized canvas is transparent black.
        self.pixels = vec![0; width as usize * height as usize * 4];
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn set_fill_style(&mut self, color: Color) {
        self.fill = color;
    }

    fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32) {
        let x_end = x.saturating_add(width).min(self.width);
        let y_end = y.saturating_add(height).min(self.height);
        let rgba = self.fill.to_rgba_bytes();
        for row in y.min(y_end)..y_end {
            let start = (row as usize * self.width as usize + x as usize) * 4;
            let end = (row as usize * self.width as usize + x_end as usize) * 4;
            if start >= end {
                continue;
            }
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }
}
