//! Drawing the composed scene through the `plotters` backend.
//!
//! One sub-area per row, split evenly, all sharing the same cartesian ranges.
//! Fills are drawn first, outlines second, baselines and annotations on top.

use std::path::Path;

use plotters::prelude::*;
use plotters::series::DashedLineSeries;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::plotting::core::{Annotation, RowScene};
use crate::{Diagram, Rgba, SeqPlotError, SeqPlotResult};

/// Fraction of the figure width reserved for row labels.
const LABEL_AREA_FRACTION: u32 = 8;

fn render_err(e: impl std::fmt::Display) -> SeqPlotError {
    SeqPlotError::Render(e.to_string())
}

fn solid(c: Rgba) -> RGBAColor {
    RGBColor(c.r, c.g, c.b).mix(c.a)
}

impl Diagram {
    /// Render the diagram to an image file.
    ///
    /// The backend is picked from the extension: `.svg` renders through the
    /// vector backend, anything else through the bitmap backend.
    pub fn render_to_file(&self, path: impl AsRef<Path>) -> SeqPlotResult<()> {
        let path = path.as_ref();
        let size = self.style.diagram.figure_size;
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

        if is_svg {
            let root = SVGBackend::new(path, size).into_drawing_area();
            root.fill(&solid(self.style.diagram.background))
                .map_err(render_err)?;
            self.render_on(&root)?;
            root.present().map_err(render_err)?;
        } else {
            let root = BitMapBackend::new(path, size).into_drawing_area();
            root.fill(&solid(self.style.diagram.background))
                .map_err(render_err)?;
            self.render_on(&root)?;
            root.present().map_err(render_err)?;
        }
        tracing::debug!(
            path = %path.display(),
            width = size.0,
            height = size.1,
            "rendered diagram"
        );
        Ok(())
    }

    /// Draw the diagram onto a caller-provided drawing area, so it can be
    /// embedded into a larger figure.
    pub fn render_on<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, plotters::coord::Shift>,
    ) -> SeqPlotResult<()>
    where
        DB::ErrorType: 'static,
    {
        let sub_areas = area.split_evenly((self.rows.len(), 1));
        for (idx, (row, sub)) in self.rows.iter().zip(sub_areas.iter()).enumerate() {
            self.render_row(idx, row, sub)?;
        }
        Ok(())
    }

    fn render_row<DB: DrawingBackend>(
        &self,
        idx: usize,
        row: &RowScene,
        area: &DrawingArea<DB, plotters::coord::Shift>,
    ) -> SeqPlotResult<()>
    where
        DB::ErrorType: 'static,
    {
        let style = &self.style.diagram;
        let (area_w, _) = area.dim_in_pixel();
        let (label_area, plot_area) = area.split_horizontally(area_w / LABEL_AREA_FRACTION);

        self.draw_row_label(&row.label, &label_area)?;

        let (t0, t1) = self.time_range;
        let (y0, y1) = (self.y_limits.min, self.y_limits.max);
        let ticks = style.axes_ticks;

        let mut chart = ChartBuilder::on(&plot_area)
            .margin(0)
            .x_label_area_size(if ticks { 22 } else { 0 })
            .build_cartesian_2d(t0..t1, y0..y1)
            .map_err(render_err)?;

        if ticks {
            chart
                .configure_mesh()
                .disable_mesh()
                .x_labels(10)
                .label_style(
                    TextStyle::from(("sans-serif", style.font_size / 2).into_font())
                        .color(&solid(style.axis_color)),
                )
                .draw()
                .map_err(render_err)?;
        }

        // Fills and outlines, in the z-order fixed at composition.
        for trace in &row.traces {
            for segment in &trace.segments {
                chart
                    .draw_series(AreaSeries::new(
                        segment.points.iter().copied(),
                        0.0,
                        solid(trace.style.fill).filled(),
                    ))
                    .map_err(render_err)?;
            }
        }
        for trace in &row.traces {
            for segment in &trace.segments {
                chart
                    .draw_series(LineSeries::new(
                        segment.points.iter().copied(),
                        solid(trace.style.color).stroke_width(trace.style.line_width),
                    ))
                    .map_err(render_err)?;
            }
        }

        // Baseline, only where the row is silent (or everywhere, on request).
        for segment in &row.baseline {
            chart
                .draw_series(LineSeries::new(
                    segment.points.iter().copied(),
                    solid(style.axis_color).stroke_width(style.axis_width),
                ))
                .map_err(render_err)?;
        }

        // Arrow head at the right edge: time continues.
        let head_len = style.arrow_length * (t1 - t0);
        let head_w = style.arrow_width / 2.0;
        chart
            .draw_series(std::iter::once(Polygon::new(
                vec![(t1 - head_len, -head_w), (t1, 0.0), (t1 - head_len, head_w)],
                solid(style.axis_color).filled(),
            )))
            .map_err(render_err)?;

        for annotation in &self.annotations {
            self.draw_annotation(idx, annotation, &mut chart)?;
        }
        Ok(())
    }

    fn draw_row_label<DB: DrawingBackend>(
        &self,
        label: &str,
        area: &DrawingArea<DB, plotters::coord::Shift>,
    ) -> SeqPlotResult<()>
    where
        DB::ErrorType: 'static,
    {
        let style = &self.style.diagram;
        let axis_color = solid(style.axis_color);
        let font = TextStyle::from(("sans-serif", style.font_size).into_font())
            .color(&axis_color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        let (w, h) = area.dim_in_pixel();
        let lines: Vec<&str> = label.split('\n').collect();
        let line_h = style.font_size as i32 + 2;
        for (j, line) in lines.iter().enumerate() {
            let offset = (2 * j as i32 - (lines.len() as i32 - 1)) * line_h / 2;
            area.draw(&Text::new(
                (*line).to_string(),
                (w as i32 / 2, h as i32 / 2 + offset),
                font.clone(),
            ))
            .map_err(render_err)?;
        }
        Ok(())
    }

    fn draw_annotation<DB: DrawingBackend>(
        &self,
        row_idx: usize,
        annotation: &Annotation,
        chart: &mut ChartContext<
            '_,
            DB,
            Cartesian2d<
                plotters::coord::types::RangedCoordf64,
                plotters::coord::types::RangedCoordf64,
            >,
        >,
    ) -> SeqPlotResult<()>
    where
        DB::ErrorType: 'static,
    {
        let style = &self.style.diagram;
        let (y0, y1) = (self.y_limits.min, self.y_limits.max);
        match annotation {
            Annotation::VLine {
                rows,
                t,
                style: marker,
            } => {
                if !rows.contains(&row_idx) {
                    return Ok(());
                }
                let points = [(*t, y0), (*t, y1)];
                let line_style = solid(marker.color).stroke_width(marker.width);
                if marker.dashed {
                    chart
                        .draw_series(DashedLineSeries::new(
                            points.iter().copied(),
                            4,
                            4,
                            line_style,
                        ))
                        .map_err(render_err)?;
                } else {
                    chart
                        .draw_series(LineSeries::new(points.iter().copied(), line_style))
                        .map_err(render_err)?;
                }
            }
            Annotation::Label { row, t, y, text } => {
                if *row != row_idx {
                    return Ok(());
                }
                self.draw_text(chart, text, (*t, *y))?;
            }
            Annotation::Interval { row, span, y, text } => {
                if *row != row_idx {
                    return Ok(());
                }
                let (a, b) = *span;
                let head_len = style.arrow_length * (self.time_range.1 - self.time_range.0);
                let head_w = style.arrow_width / 2.0;
                chart
                    .draw_series(LineSeries::new(
                        [(a, *y), (b, *y)].iter().copied(),
                        solid(style.axis_color).stroke_width(style.axis_width / 2 + 1),
                    ))
                    .map_err(render_err)?;
                for (tip, inner) in [(a, a + head_len), (b, b - head_len)] {
                    chart
                        .draw_series(std::iter::once(Polygon::new(
                            vec![(inner, *y - head_w), (tip, *y), (inner, *y + head_w)],
                            solid(style.axis_color).filled(),
                        )))
                        .map_err(render_err)?;
                }
                if let Some(text) = text {
                    self.draw_text(chart, text, ((a + b) / 2.0, *y))?;
                }
            }
        }
        Ok(())
    }

    fn draw_text<DB: DrawingBackend>(
        &self,
        chart: &mut ChartContext<
            '_,
            DB,
            Cartesian2d<
                plotters::coord::types::RangedCoordf64,
                plotters::coord::types::RangedCoordf64,
            >,
        >,
        text: &str,
        at: (f64, f64),
    ) -> SeqPlotResult<()>
    where
        DB::ErrorType: 'static,
    {
        let style = &self.style.diagram;
        let axis_color = solid(style.axis_color);
        let font = TextStyle::from(("sans-serif", style.font_size).into_font())
            .color(&axis_color)
            .pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(std::iter::once(Text::new(text.to_string(), at, font)))
            .map_err(render_err)?;
        Ok(())
    }
}
