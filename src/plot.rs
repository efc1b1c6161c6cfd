//! Drawing surfaces for sampled curves, built on `plotters`.
//!
//! The library only knows the `PlotSurface` trait. `SvgFigure` renders a
//! single figure, `GifAnimation` appends one frame per call.
use std::path::{Path, PathBuf};

use ndarray::ArrayView1;
use plotters::coord::Shift;
use plotters::prelude::*;

use crate::error::PlotError;
use crate::model::WaveParameters;
use crate::sampler::Grid;

/// Title, axis labels and fixed ranges of a line chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: (f64, f64),
    pub y_range: (f64, f64),
}

impl Chart {
    /// Axes of the animated string: `[0, L]` by `[-1.1A, 1.1A]`.
    pub fn animation(params: &WaveParameters) -> Chart {
        let a = 1.1 * params.amplitude().abs();
        let a = if a > 0. { a } else { 1. };
        Chart {
            title: "Wave on a string".to_string(),
            x_label: "Position x [m]".to_string(),
            y_label: "Displacement y [m]".to_string(),
            x_range: (0., params.length()),
            y_range: (-a, a),
        }
    }

    /// Axes fitted to a sampled profile.
    pub fn profile(title: &str, grid: &Grid, ys: ArrayView1<f64>) -> Chart {
        let (x0, x1) = grid.span();
        let x1 = if x1 > x0 { x1 } else { x0 + 1. };
        let peak = ys.iter().fold(0., |m: f64, y| m.max(y.abs()));
        let peak = if peak > 0. && peak.is_finite() {
            1.1 * peak
        } else {
            1.
        };
        Chart {
            title: title.to_string(),
            x_label: "Position x [m]".to_string(),
            y_label: "Displacement y [m]".to_string(),
            x_range: (x0, x1),
            y_range: (-peak, peak),
        }
    }
}

/// One curve of a chart.
#[derive(Debug, Clone, Copy)]
pub struct Series<'a> {
    pub xs: ArrayView1<'a, f64>,
    pub ys: ArrayView1<'a, f64>,
    pub color: RGBColor,
    pub label: Option<&'a str>,
}

impl<'a> Series<'a> {
    pub fn new(xs: ArrayView1<'a, f64>, ys: ArrayView1<'a, f64>, color: RGBColor) -> Self {
        Series {
            xs,
            ys,
            color,
            label: None,
        }
    }

    pub fn labelled(mut self, label: &'a str) -> Self {
        self.label = Some(label);
        self
    }
}

/// Display collaborator receiving sampled curves.
pub trait PlotSurface {
    fn present(&mut self, chart: &Chart, series: &[Series]) -> Result<(), PlotError>;
}

/// Whether the backend can render glyphs. Bitmap backends have no font
/// engine in this build, so they get the curves and a label-free grid only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Text {
    Drawn,
    Omitted,
}

const GRID_LINES: usize = 10;

fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    chart: &Chart,
    series: &[Series],
    text: Text,
) -> Result<(), PlotError> {
    root.fill(&WHITE).map_err(PlotError::backend)?;

    let (x0, x1) = chart.x_range;
    let (y0, y1) = chart.y_range;
    let mut builder = ChartBuilder::on(root);
    builder.margin(12);
    if text == Text::Drawn {
        builder
            .caption(&chart.title, ("sans-serif", 22))
            .x_label_area_size(40)
            .y_label_area_size(60);
    }
    let mut ctx = builder
        .build_cartesian_2d(x0..x1, y0..y1)
        .map_err(PlotError::backend)?;

    match text {
        Text::Drawn => {
            ctx.configure_mesh()
                .x_desc(chart.x_label.as_str())
                .y_desc(chart.y_label.as_str())
                .draw()
                .map_err(PlotError::backend)?;
        }
        Text::Omitted => {
            let grey = RGBColor(220, 220, 220);
            for i in 0..=GRID_LINES {
                let f = i as f64 / GRID_LINES as f64;
                let x = x0 + f * (x1 - x0);
                let y = y0 + f * (y1 - y0);
                ctx.draw_series(LineSeries::new(vec![(x, y0), (x, y1)], grey))
                    .map_err(PlotError::backend)?;
                ctx.draw_series(LineSeries::new(vec![(x0, y), (x1, y)], grey))
                    .map_err(PlotError::backend)?;
            }
        }
    }

    let mut labelled = false;
    for s in series {
        let points = s.xs.iter().copied().zip(s.ys.iter().copied());
        let drawn = ctx
            .draw_series(LineSeries::new(points, s.color.stroke_width(2)))
            .map_err(PlotError::backend)?;
        if let (Some(label), Text::Drawn) = (s.label, text) {
            let color = s.color;
            drawn
                .label(label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
            labelled = true;
        }
    }

    if labelled {
        ctx.configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(PlotError::backend)?;
    }

    root.present().map_err(PlotError::backend)
}

/// Writes each presented chart to the same SVG file.
#[derive(Debug, Clone)]
pub struct SvgFigure {
    path: PathBuf,
    size: (u32, u32),
}

impl SvgFigure {
    pub fn new<P: Into<PathBuf>>(path: P, size: (u32, u32)) -> Self {
        SvgFigure {
            path: path.into(),
            size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PlotSurface for SvgFigure {
    fn present(&mut self, chart: &Chart, series: &[Series]) -> Result<(), PlotError> {
        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir)?;
        }
        let root = SVGBackend::new(&self.path, self.size).into_drawing_area();
        draw(&root, chart, series, Text::Drawn)
    }
}

/// Animated GIF; every `present` call appends one frame.
pub struct GifAnimation {
    root: DrawingArea<BitMapBackend<'static>, Shift>,
    frames: usize,
}

impl GifAnimation {
    /// - `delay_ms`: display time of each frame
    pub fn create<P: AsRef<Path>>(
        path: P,
        size: (u32, u32),
        delay_ms: u32,
    ) -> Result<Self, PlotError> {
        if let Some(dir) = path.as_ref().parent() {
            std::fs::create_dir_all(dir)?;
        }
        let backend = BitMapBackend::gif(path, size, delay_ms).map_err(PlotError::backend)?;
        Ok(GifAnimation {
            root: backend.into_drawing_area(),
            frames: 0,
        })
    }

    pub fn frames(&self) -> usize {
        self.frames
    }
}

impl PlotSurface for GifAnimation {
    fn present(&mut self, chart: &Chart, series: &[Series]) -> Result<(), PlotError> {
        draw(&self.root, chart, series, Text::Omitted)?;
        self.frames += 1;
        Ok(())
    }
}

/// Keeps every presented curve in memory.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    pub charts: Vec<Chart>,
    pub curves: Vec<Vec<(Vec<f64>, Vec<f64>)>>,
    pub fail_after: Option<usize>,
}

#[cfg(test)]
impl PlotSurface for Recorder {
    fn present(&mut self, chart: &Chart, series: &[Series]) -> Result<(), PlotError> {
        if self.fail_after == Some(self.curves.len()) {
            return Err(PlotError::Backend("window closed".to_string()));
        }
        self.charts.push(chart.clone());
        self.curves.push(
            series
                .iter()
                .map(|s| (s.xs.to_vec(), s.ys.to_vec()))
                .collect(),
        );
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::Array1;

    #[test]
    fn animation_axes() {
        let p = WaveParameters::new(2., 0.05, 10., 0.01, 1).unwrap();
        let c = Chart::animation(&p);
        assert_eq!(c.x_range, (0., 2.));
        assert!((c.y_range.0 + 0.055).abs() < 1e-12);
        assert!((c.y_range.1 - 0.055).abs() < 1e-12);

        let flat = WaveParameters::new(2., 0., 10., 0.01, 1).unwrap();
        assert_eq!(Chart::animation(&flat).y_range, (-1., 1.));
    }

    #[test]
    fn profile_axes() {
        let g = Grid::stepped(1., 0.1).unwrap();
        let ys = Array1::from_shape_fn(g.len(), |i| if i == 3 { -0.5 } else { 0.1 });
        let c = Chart::profile("p", &g, ys.view());
        assert_eq!(c.x_range.0, 0.);
        assert!((c.x_range.1 - 1.).abs() < 1e-12);
        assert!((c.y_range.1 - 0.55).abs() < 1e-12);
        assert_eq!(c.y_range.0, -c.y_range.1);
    }

    #[test]
    fn gif_frames_skip_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frames.gif");
        let g = Grid::linspace(1., 50);
        let ys = g.positions().mapv(|x| (std::f64::consts::PI * x).sin());
        let chart = Chart::profile("captioned", &g, ys.view());
        let mut gif = GifAnimation::create(&path, (160, 120), 50).unwrap();
        for _ in 0..3 {
            gif.present(&chart, &[Series::new(g.positions(), ys.view(), BLUE).labelled("sin")])
                .unwrap();
        }
        assert_eq!(gif.frames(), 3);
        drop(gif);
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..3], b"GIF");
    }

    #[test]
    fn svg_figure_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("fig.svg");
        let g = Grid::linspace(1., 50);
        let ys = g.positions().mapv(|x| (std::f64::consts::PI * x).sin());
        let chart = Chart::profile("sine", &g, ys.view());
        let mut fig = SvgFigure::new(&path, (320, 240));
        fig.present(&chart, &[Series::new(g.positions(), ys.view(), BLUE).labelled("sin")])
            .unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.contains("<svg"));
        assert!(text.contains("polyline") || text.contains("path"));
    }
}
