//! Chart Plotter Module
//! Draws bar-chart variants to PNG files using plotters' bitmap backend.

use plotters::coord::ranged1d::{DefaultFormatting, KeyPointHint, Ranged};
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

/// Brand red used for single-series charts.
pub const NETFLIX_RED: RGBColor = RGBColor(229, 9, 20);

pub const PALETTE: [RGBColor; 6] = [
    RGBColor(229, 9, 20),    // Red
    RGBColor(178, 7, 16),    // Dark red
    RGBColor(131, 16, 16),   // Maroon
    RGBColor(86, 77, 77),    // Warm grey
    RGBColor(34, 31, 31),    // Near black
    RGBColor(245, 245, 241), // Off white
];

const FONT: &str = "sans-serif";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to prepare chart output: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

impl RenderError {
    fn drawing<E: std::fmt::Display>(err: E) -> Self {
        RenderError::Drawing(err.to_string())
    }
}

/// Titles and canvas size for one chart.
#[derive(Debug, Clone, Copy)]
pub struct ChartLayout {
    pub title: &'static str,
    pub x_desc: &'static str,
    pub y_desc: &'static str,
    pub size: (u32, u32),
}

/// One bar of a single-series chart.
#[derive(Debug, Clone)]
pub struct Bar {
    pub label: String,
    pub value: usize,
    pub color: RGBColor,
    /// Text drawn at the end of the bar.
    pub annotation: String,
}

/// One series of a multi-series chart; `values` align with the category labels.
#[derive(Debug, Clone)]
pub struct SeriesData {
    pub name: String,
    pub color: RGBColor,
    pub values: Vec<usize>,
}

/// Categorical axis: category `i` sits at position `i`, padded half a slot
/// on each side.
#[derive(Debug, Clone)]
pub struct CategoryAxis {
    count: usize,
}

impl CategoryAxis {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Index of the category at `position`, if it is a tick position.
    pub fn index_of(&self, position: f64) -> Option<usize> {
        let rounded = position.round();
        if (position - rounded).abs() > 1e-6 || rounded < 0.0 {
            return None;
        }
        let index = rounded as usize;
        (index < self.count).then_some(index)
    }
}

impl Ranged for CategoryAxis {
    type FormatOption = DefaultFormatting;
    type ValueType = f64;

    fn map(&self, value: &f64, limit: (i32, i32)) -> i32 {
        let span = self.count.max(1) as f64;
        let ratio = (value + 0.5) / span;
        limit.0 + (ratio * (limit.1 - limit.0) as f64).round() as i32
    }

    fn key_points<Hint: KeyPointHint>(&self, _hint: Hint) -> Vec<f64> {
        (0..self.count).map(|i| i as f64).collect()
    }

    fn range(&self) -> Range<f64> {
        -0.5..(self.count.max(1) as f64 - 0.5)
    }
}

type CategoryChart<'a, 'b> =
    ChartContext<'a, BitMapBackend<'b>, Cartesian2d<CategoryAxis, RangedCoordf64>>;

/// Draws bar charts.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Vertical bars, one per category, each with its own color and annotation.
    pub fn bar_chart(path: &Path, layout: &ChartLayout, bars: &[Bar]) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, layout.size).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::drawing)?;

        let labels: Vec<String> = bars.iter().map(|b| b.label.clone()).collect();
        let max = bars.iter().map(|b| b.value).max().unwrap_or(0);
        let mut chart = Self::category_chart(&root, layout, &labels, Self::headroom(max))?;

        let half = 0.35;
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new([(x - half, 0.0), (x + half, bar.value as f64)], bar.color.filled())
            }))
            .map_err(RenderError::drawing)?;
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                let x = i as f64;
                Rectangle::new(
                    [(x - half, 0.0), (x + half, bar.value as f64)],
                    BLACK.stroke_width(2),
                )
            }))
            .map_err(RenderError::drawing)?;

        let annotation_style = Self::bold(14).pos(Pos::new(HPos::Center, VPos::Bottom));
        chart
            .draw_series(bars.iter().enumerate().map(|(i, bar)| {
                Text::new(
                    bar.annotation.clone(),
                    (i as f64, bar.value as f64),
                    annotation_style.clone(),
                )
            }))
            .map_err(RenderError::drawing)?;

        root.present().map_err(RenderError::drawing)?;
        Ok(())
    }

    /// Horizontal ranking: first entry at the top, value printed after each bar.
    pub fn horizontal_bar_chart(
        path: &Path,
        layout: &ChartLayout,
        entries: &[(String, usize)],
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, layout.size).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::drawing)?;

        let n = entries.len();
        let axis = CategoryAxis::new(n);
        let max = entries.iter().map(|(_, v)| *v).max().unwrap_or(0);
        // Rank r is drawn at position n - 1 - r so the leader sits on top.
        let position = |rank: usize| (n - 1 - rank) as f64;

        let mut chart = ChartBuilder::on(&root)
            .caption(layout.title, Self::bold(24))
            .margin(20)
            .x_label_area_size(50)
            .y_label_area_size(240)
            .build_cartesian_2d(0f64..Self::headroom(max), axis.clone())
            .map_err(RenderError::drawing)?;

        let label_of = |v: &f64| {
            axis.index_of(*v)
                .map(|pos| entries[n - 1 - pos].0.clone())
                .unwrap_or_default()
        };
        let count_of = |v: &f64| Self::format_count(v.max(0.0).round() as usize);
        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(layout.x_desc)
            .y_desc(layout.y_desc)
            .y_labels(n.max(1))
            .y_label_formatter(&label_of)
            .x_label_formatter(&count_of)
            .label_style((FONT, 14))
            .axis_desc_style(Self::bold(16))
            .draw()
            .map_err(RenderError::drawing)?;

        let half = 0.4;
        chart
            .draw_series(entries.iter().enumerate().map(|(rank, (_, value))| {
                let y = position(rank);
                Rectangle::new([(0.0, y - half), (*value as f64, y + half)], NETFLIX_RED.filled())
            }))
            .map_err(RenderError::drawing)?;
        chart
            .draw_series(entries.iter().enumerate().map(|(rank, (_, value))| {
                let y = position(rank);
                Rectangle::new([(0.0, y - half), (*value as f64, y + half)], BLACK.stroke_width(1))
            }))
            .map_err(RenderError::drawing)?;

        let value_style = Self::bold(13).pos(Pos::new(HPos::Left, VPos::Center));
        chart
            .draw_series(entries.iter().enumerate().map(|(rank, (_, value))| {
                Text::new(
                    format!("  {}", Self::format_count(*value)),
                    (*value as f64, position(rank)),
                    value_style.clone(),
                )
            }))
            .map_err(RenderError::drawing)?;

        root.present().map_err(RenderError::drawing)?;
        Ok(())
    }

    /// Series stacked on top of each other per category, with a legend.
    pub fn stacked_bar_chart(
        path: &Path,
        layout: &ChartLayout,
        labels: &[String],
        series: &[SeriesData],
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, layout.size).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::drawing)?;

        let max = (0..labels.len())
            .map(|i| series.iter().map(|s| s.values.get(i).copied().unwrap_or(0)).sum())
            .max()
            .unwrap_or(0);
        let mut chart = Self::category_chart(&root, layout, labels, Self::headroom(max))?;

        let half = 0.3;
        let mut base = vec![0usize; labels.len()];
        for data in series {
            let color = data.color;
            let segments: Vec<(f64, f64, f64)> = base
                .iter_mut()
                .enumerate()
                .map(|(i, floor)| {
                    let value = data.values.get(i).copied().unwrap_or(0);
                    let bottom = *floor as f64;
                    *floor += value;
                    (i as f64, bottom, *floor as f64)
                })
                .collect();

            chart
                .draw_series(segments.iter().map(|&(x, bottom, top)| {
                    Rectangle::new([(x - half, bottom), (x + half, top)], color.filled())
                }))
                .map_err(RenderError::drawing)?
                .label(data.name.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
                });
            chart
                .draw_series(segments.iter().map(|&(x, bottom, top)| {
                    Rectangle::new([(x - half, bottom), (x + half, top)], BLACK.stroke_width(1))
                }))
                .map_err(RenderError::drawing)?;
        }

        Self::draw_legend(&mut chart)?;
        root.present().map_err(RenderError::drawing)?;
        Ok(())
    }

    /// Series side by side per category, with a legend.
    pub fn grouped_bar_chart(
        path: &Path,
        layout: &ChartLayout,
        labels: &[String],
        series: &[SeriesData],
    ) -> Result<(), RenderError> {
        let root = BitMapBackend::new(path, layout.size).into_drawing_area();
        root.fill(&WHITE).map_err(RenderError::drawing)?;

        let max = series
            .iter()
            .flat_map(|s| s.values.iter().copied())
            .max()
            .unwrap_or(0);
        let mut chart = Self::category_chart(&root, layout, labels, Self::headroom(max))?;

        let width = 0.7 / series.len().max(1) as f64;
        for (k, data) in series.iter().enumerate() {
            let color = data.color;
            // Offset of this series' bar within the category slot.
            let offset = -0.35 + width * k as f64;
            let bars: Vec<(f64, f64)> = data
                .values
                .iter()
                .enumerate()
                .take(labels.len())
                .map(|(i, v)| (i as f64 + offset, *v as f64))
                .collect();

            chart
                .draw_series(bars.iter().map(|&(left, value)| {
                    Rectangle::new([(left, 0.0), (left + width, value)], color.filled())
                }))
                .map_err(RenderError::drawing)?
                .label(data.name.as_str())
                .legend(move |(x, y)| {
                    Rectangle::new([(x, y - 6), (x + 14, y + 6)], color.filled())
                });
            chart
                .draw_series(bars.iter().map(|&(left, value)| {
                    Rectangle::new([(left, 0.0), (left + width, value)], BLACK.stroke_width(1))
                }))
                .map_err(RenderError::drawing)?;
        }

        Self::draw_legend(&mut chart)?;
        root.present().map_err(RenderError::drawing)?;
        Ok(())
    }

    /// Format a count with thousands separators.
    pub fn format_count(value: usize) -> String {
        let digits = value.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, ch) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(ch);
        }
        out
    }

    /// Build a chart with a categorical x axis and a count y axis, mesh drawn.
    fn category_chart<'a, 'b>(
        root: &'a DrawingArea<BitMapBackend<'b>, Shift>,
        layout: &ChartLayout,
        labels: &[String],
        y_max: f64,
    ) -> Result<CategoryChart<'a, 'b>, RenderError> {
        let axis = CategoryAxis::new(labels.len());
        let mut chart = ChartBuilder::on(root)
            .caption(layout.title, Self::bold(24))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(80)
            .build_cartesian_2d(axis.clone(), 0f64..y_max)
            .map_err(RenderError::drawing)?;

        let label_of = |v: &f64| {
            axis.index_of(*v)
                .map(|i| labels[i].clone())
                .unwrap_or_default()
        };
        let count_of = |v: &f64| Self::format_count(v.max(0.0).round() as usize);
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc(layout.x_desc)
            .y_desc(layout.y_desc)
            .x_labels(labels.len().max(1))
            .x_label_formatter(&label_of)
            .y_label_formatter(&count_of)
            .label_style((FONT, 14))
            .axis_desc_style(Self::bold(16))
            .draw()
            .map_err(RenderError::drawing)?;

        Ok(chart)
    }

    fn draw_legend<'a, 'b: 'a>(chart: &mut CategoryChart<'a, 'b>) -> Result<(), RenderError> {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .label_font((FONT, 14))
            .draw()
            .map_err(RenderError::drawing)
    }

    /// Upper axis bound leaving room for annotations above the tallest bar.
    fn headroom(max: usize) -> f64 {
        (max.max(1) as f64 * 1.15).ceil()
    }

    fn bold(size: u32) -> TextStyle<'static> {
        TextStyle::from((FONT, size).into_font().style(FontStyle::Bold))
    }
}
