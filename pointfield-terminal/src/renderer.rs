/// ASCII presentation of the framebuffer
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use pointfield_core::Canvas;
use std::io::Write;

/// Character luminosity ramp for brightness (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Downsamples a canvas into a grid of terminal cells
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells.resize(width * height, 0);
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.cells.fill(0);
    }

    /// Fill every cell with the brightest canvas pixel it covers.
    ///
    /// Canvas row 0 is the bottom of the picture, so rows are flipped.
    pub fn sample(&mut self, canvas: &Canvas) {
        self.clear();
        if canvas.width() == 0 || canvas.height() == 0 {
            return;
        }

        for row in 0..self.height {
            let (top, bottom) = span(row, self.height, canvas.height());
            for col in 0..self.width {
                let (left, right) = span(col, self.width, canvas.width());
                let mut brightest = 0;
                for y in top..bottom {
                    let canvas_y = canvas.height() - 1 - y;
                    for x in left..right {
                        brightest = brightest.max(canvas.brightness_at(x, canvas_y).unwrap_or(0));
                    }
                }
                self.cells[row * self.width + col] = brightest;
            }
        }
    }

    pub fn cell(&self, col: usize, row: usize) -> char {
        if col >= self.width || row >= self.height {
            return ' ';
        }
        ramp(self.cells[row * self.width + col])
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in 0..self.height {
            for col in 0..self.width {
                let c = self.cell(col, row);

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if row + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Ramp character for a brightness; any lit pixel gets at least '.'
fn ramp(brightness: u8) -> char {
    if brightness == 0 {
        return LUMINOSITY_RAMP[0];
    }
    let steps = LUMINOSITY_RAMP.len() - 2;
    LUMINOSITY_RAMP[1 + (brightness as usize - 1) * steps / 254]
}

/// Source range covered by cell `index` of `cells`, never empty
fn span(index: usize, cells: usize, source: usize) -> (usize, usize) {
    let start = (index * source / cells).min(source - 1);
    let end = ((index + 1) * source / cells).clamp(start + 1, source);
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pointfield_core::ScreenSample;

    #[test]
    fn test_ramp_ends() {
        assert_eq!(ramp(0), ' ');
        assert_eq!(ramp(1), '.');
        assert_eq!(ramp(128), '+');
        assert_eq!(ramp(255), '@');
    }

    #[test]
    fn test_span_covers_source() {
        assert_eq!(span(0, 4, 8), (0, 2));
        assert_eq!(span(3, 4, 8), (6, 8));
        // More cells than pixels still reads one pixel
        assert_eq!(span(5, 10, 4), (2, 3));
        assert_eq!(span(9, 10, 4), (3, 4));
    }

    #[test]
    fn test_sample_flips_rows_and_keeps_max() {
        let mut canvas = Canvas::new(4, 4);
        // Bottom-left canvas pixels
        canvas.plot(ScreenSample { x: 0, y: 0, brightness: 40 });
        canvas.plot(ScreenSample { x: 1, y: 1, brightness: 255 });

        let mut renderer = AsciiRenderer::new(2, 2);
        renderer.sample(&canvas);

        assert_eq!(renderer.cell(0, 1), '@');
        assert_eq!(renderer.cell(0, 0), ' ');
        assert_eq!(renderer.cell(1, 1), ' ');
        assert_eq!(renderer.cell(5, 5), ' ');
    }

    #[test]
    fn test_draw_writes_every_cell() {
        let renderer = AsciiRenderer::new(3, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 1);
    }

    #[test]
    fn test_resize() {
        let mut renderer = AsciiRenderer::new(3, 2);
        renderer.resize(10, 5);
        assert_eq!((renderer.width(), renderer.height()), (10, 5));
        assert_eq!(renderer.cell(9, 4), ' ');
    }
}
