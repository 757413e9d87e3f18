use std::path::Path;

use nalgebra::DMatrix;
use plotters::prelude::*;

use super::{extrema, gray_level, Render, RenderError};

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Plot(e.to_string())
    }
}

/// Annotated frame chart
///
/// The frame is drawn as a gray heat map without ticks, next to a colorbar
/// and below a bold `frame: <index>` label.
#[derive(Debug, Clone)]
pub struct ChartRenderer {
    pub size: (u32, u32),
    pub colorbar_width: u32,
    pub font_size: f64,
}
impl Default for ChartRenderer {
    fn default() -> Self {
        Self {
            size: (640, 480),
            colorbar_width: 110,
            font_size: 16.,
        }
    }
}
impl Render for ChartRenderer {
    fn render(
        &self,
        index: usize,
        frame: &DMatrix<f64>,
        filename: &Path,
    ) -> Result<(), RenderError> {
        let (rows, cols) = frame.shape();
        let (min, max) = extrema(frame);
        let (vmin, vmax) = if max > min {
            (min, max)
        } else {
            (min - 0.5, max + 0.5)
        };

        let root = BitMapBackend::new(filename, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let (frame_area, bar_area) = root.split_horizontally(self.size.0 - self.colorbar_width);

        let mut chart = ChartBuilder::on(&frame_area)
            .margin(10)
            .margin_top(40)
            .build_cartesian_2d(0..cols as i32, 0..rows as i32)?;
        chart
            .configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .disable_y_axis()
            .draw()?;
        // row 0 on top
        chart.draw_series((0..rows).flat_map(|i| (0..cols).map(move |j| (i, j))).map(
            |(i, j)| {
                let (r, g, b) = gray_level(frame[(i, j)], (min, max));
                let (x, y) = (j as i32, (rows - i) as i32);
                Rectangle::new([(x, y), (x + 1, y - 1)], RGBColor(r, g, b).filled())
            },
        ))?;

        let (x0, y0) = chart.backend_coord(&(0, rows as i32));
        let cell = chart.backend_coord(&(1, rows as i32)).0 - x0;
        let label = format!("frame: {index}");
        root.draw_text(
            &label,
            &("sans-serif", self.font_size)
                .into_font()
                .style(FontStyle::Bold)
                .color(&BLACK),
            (x0 + 2 * cell, y0 - 2 * cell.min(10)),
        )?;

        let mut bar = ChartBuilder::on(&bar_area)
            .margin(10)
            .margin_top(40)
            .set_label_area_size(LabelAreaPosition::Right, 60)
            .build_cartesian_2d(0f64..1f64, vmin..vmax)?;
        bar.configure_mesh()
            .disable_mesh()
            .disable_x_axis()
            .y_labels(6)
            .y_label_formatter(&|v| format!("{v:.2}"))
            .draw()?;
        let n_step = 100;
        let step = (vmax - vmin) / n_step as f64;
        bar.draw_series((0..n_step).map(|k| {
            let v = vmin + k as f64 * step;
            let (r, g, b) = gray_level(v + 0.5 * step, (vmin, vmax));
            Rectangle::new([(0., v), (1., v + step)], RGBColor(r, g, b).filled())
        }))?;

        root.present()?;
        Ok(())
    }
}
