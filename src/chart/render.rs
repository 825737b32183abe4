use crate::chart::spec::{ChartSpec, Rgb};
use crate::utils::error::Result;

/// Canvas size of every rendered bar chart, in pixels.
pub const CHART_WIDTH: u32 = 300;
pub const CHART_HEIGHT: u32 = 5;

/// Gridline color overlaid on the bands.
const GRIDLINE: Rgb = Rgb::new(0x66, 0x66, 0x66);

/// Rasterize a proportion bar chart to PNG bytes.
///
/// The background segment fills the canvas; each further segment covers
/// `floor(width * length / full_length)` pixels at the running left offset,
/// one row short of the bottom. The running offset is not clamped - bands
/// past the right edge are clipped by the canvas, which is accepted.
/// Gridlines land at `x = i * width / divisions` over the full height.
///
/// Validation happens before any pixel is touched, so a failure never
/// produces partial image bytes.
pub fn render_bar_chart(spec: &ChartSpec) -> Result<Vec<u8>> {
    spec.validate()?;

    let width = CHART_WIDTH as usize;
    let height = CHART_HEIGHT as usize;
    let mut canvas = Canvas::filled(width, height, spec.segments[0].color);

    let full_length = spec.full_length();
    let mut left = 0usize;
    for segment in &spec.segments[1..] {
        // Widened so absurd lengths can't overflow; anything past the right
        // edge is clipped by the canvas regardless.
        let pixels = (CHART_WIDTH as u128 * segment.length as u128 / full_length as u128)
            .min(CHART_WIDTH as u128) as usize;
        canvas.fill_rect(left, 0, pixels, height - 1, segment.color);
        left = left.saturating_add(pixels);
    }

    for i in 0..spec.divisions {
        let x = (i as u64 * CHART_WIDTH as u64 / spec.divisions as u64) as usize;
        canvas.fill_rect(x, 0, 1, height, GRIDLINE);
    }

    canvas.encode_png()
}

/// Fixed-size RGB pixel buffer.
struct Canvas {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Canvas {
    fn filled(width: usize, height: usize, color: Rgb) -> Self {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            pixels.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Fill a rectangle, clipped to the canvas bounds.
    fn fill_rect(&mut self, x: usize, y: usize, w: usize, h: usize, color: Rgb) {
        let x_end = (x + w).min(self.width);
        let y_end = (y + h).min(self.height);
        for row in y..y_end {
            for col in x.min(self.width)..x_end {
                let offset = (row * self.width + col) * 3;
                self.pixels[offset] = color.r;
                self.pixels[offset + 1] = color.g;
                self.pixels[offset + 2] = color.b;
            }
        }
    }

    fn encode_png(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut encoder =
                png::Encoder::new(&mut buffer, self.width as u32, self.height as u32);
            encoder.set_color(png::ColorType::Rgb);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&self.pixels)?;
        }
        Ok(buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::spec::{ChartSegment, ChartSpecError};

    fn spec(colors_lengths: &[(&str, u64)], divisions: u32) -> ChartSpec {
        ChartSpec {
            segments: colors_lengths
                .iter()
                .map(|(color, length)| ChartSegment {
                    color: color.parse().unwrap(),
                    length: *length,
                })
                .collect(),
            divisions,
        }
    }

    /// Decode the produced PNG back into an RGB pixel reader.
    fn decode(bytes: &[u8]) -> Vec<u8> {
        let decoder = png::Decoder::new(bytes);
        let mut reader = decoder.read_info().unwrap();
        let mut pixels = vec![0u8; reader.output_buffer_size()];
        let info = reader.next_frame(&mut pixels).unwrap();
        assert_eq!(info.width, CHART_WIDTH);
        assert_eq!(info.height, CHART_HEIGHT);
        pixels.truncate(info.buffer_size());
        pixels
    }

    fn pixel(pixels: &[u8], x: u32, y: u32) -> (u8, u8, u8) {
        let offset = ((y * CHART_WIDTH + x) * 3) as usize;
        (pixels[offset], pixels[offset + 1], pixels[offset + 2])
    }

    #[test]
    fn renders_proportional_bands_and_gridlines() {
        // 37/100 of a 300px canvas is a 111px band.
        let bytes = render_bar_chart(&spec(&[("eeeeee", 100), ("0000ff", 37)], 10)).unwrap();
        let pixels = decode(&bytes);

        // Gridline at x=0 overdraws the band's first column.
        assert_eq!(pixel(&pixels, 0, 0), (0x66, 0x66, 0x66));
        // Band body.
        assert_eq!(pixel(&pixels, 5, 0), (0x00, 0x00, 0xff));
        assert_eq!(pixel(&pixels, 110, 2), (0x00, 0x00, 0xff));
        // First background column past the band (111 is not a gridline).
        assert_eq!(pixel(&pixels, 111, 0), (0xee, 0xee, 0xee));
        // Bottom row is left to the background.
        assert_eq!(pixel(&pixels, 5, CHART_HEIGHT - 1), (0xee, 0xee, 0xee));
        // Gridlines at multiples of 30 span the full height.
        for i in 0..10u32 {
            assert_eq!(pixel(&pixels, i * 30, 0), (0x66, 0x66, 0x66));
            assert_eq!(pixel(&pixels, i * 30, CHART_HEIGHT - 1), (0x66, 0x66, 0x66));
        }
        // No gridline at the right edge.
        assert_eq!(pixel(&pixels, 299, 0), (0xee, 0xee, 0xee));
    }

    #[test]
    fn stacked_segments_advance_left_to_right() {
        let bytes =
            render_bar_chart(&spec(&[("eeeeee", 10), ("ff0000", 3), ("00ff00", 2)], 1)).unwrap();
        let pixels = decode(&bytes);

        // 3/10 -> 90px red, then 2/10 -> 60px green.
        assert_eq!(pixel(&pixels, 89, 1), (0xff, 0x00, 0x00));
        assert_eq!(pixel(&pixels, 90, 1), (0x00, 0xff, 0x00));
        assert_eq!(pixel(&pixels, 149, 1), (0x00, 0xff, 0x00));
        assert_eq!(pixel(&pixels, 150, 1), (0xee, 0xee, 0xee));
    }

    #[test]
    fn overlong_segments_are_clipped_not_rejected() {
        let bytes = render_bar_chart(&spec(&[("eeeeee", 10), ("ff0000", 25)], 1)).unwrap();
        let pixels = decode(&bytes);
        assert_eq!(pixel(&pixels, 299, 0), (0xff, 0x00, 0x00));
    }

    #[test]
    fn invalid_specs_fail_before_drawing() {
        let err = render_bar_chart(&spec(&[("eeeeee", 0), ("ff0000", 5)], 10)).unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::PoolscopeError::InvalidChartSpec(ChartSpecError::ZeroFullLength)
        ));

        let err = render_bar_chart(&spec(&[("eeeeee", 10)], 0)).unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::PoolscopeError::InvalidChartSpec(ChartSpecError::ZeroDivisions)
        ));

        let err = render_bar_chart(&ChartSpec {
            segments: Vec::new(),
            divisions: 10,
        })
        .unwrap_err();
        assert!(matches!(
            err,
            crate::utils::error::PoolscopeError::InvalidChartSpec(ChartSpecError::NoSegments)
        ));
    }

    #[test]
    fn output_carries_the_png_signature() {
        let bytes = render_bar_chart(&spec(&[("eeeeee", 1)], 1)).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n']);
    }
}
