//! Multi-series memory chart frames.
//!
//! Series are drawn by ratatui's [`Chart`] widget into an off-screen
//! buffer, which is then flattened into text with ANSI colours. Labels sit
//! on the left, the caption is centred underneath.

use crossterm::style::{Color as TermColor, ResetColor, SetForegroundColor};
use dockmem_common::constants::{
    CAPTION_PREFIX, CHART_HEIGHT, CHART_LOWER_BOUND, CHART_WIDTH,
};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::symbols::Marker;
use ratatui::widgets::{Axis, Chart, Dataset, GraphType, Widget};

use crate::window::SlidingWindow;

/// Colour a series is drawn in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SeriesColor {
    /// Terminal default foreground.
    #[default]
    Default,
    /// Light coral (256-colour index 210).
    LightCoral,
    /// Turquoise (256-colour index 80).
    Turquoise,
}

impl SeriesColor {
    /// Widget colour for the series.
    #[must_use]
    pub const fn to_color(self) -> Color {
        match self {
            Self::Default => Color::Reset,
            Self::LightCoral => Color::Indexed(210),
            Self::Turquoise => Color::Indexed(80),
        }
    }
}

/// Rendering parameters for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Plot height in rows.
    pub height: u16,
    /// Plot width in columns, not counting the labels.
    pub width: u16,
    /// Axis minimum, applied only when lower than the data.
    pub lower_bound: Option<f64>,
    /// Decimal places on axis labels.
    pub precision: usize,
    /// Colour per series, in series order.
    pub series_colors: Vec<SeriesColor>,
    /// Caption under the chart; empty for none.
    pub caption: String,
}

impl ChartConfig {
    /// Fixed memory chart for `container`: limit in light coral, usage in
    /// turquoise.
    #[must_use]
    pub fn for_container(container: &str) -> Self {
        Self {
            height: CHART_HEIGHT,
            width: CHART_WIDTH,
            lower_bound: Some(CHART_LOWER_BOUND),
            precision: 2,
            series_colors: vec![SeriesColor::LightCoral, SeriesColor::Turquoise],
            caption: format!("{CAPTION_PREFIX}{container}"),
        }
    }
}

/// Plots the given windows in order on one set of axes.
#[must_use]
pub fn render(windows: &[&SlidingWindow], config: &ChartConfig) -> String {
    let data: Vec<Vec<f64>> = windows.iter().map(|w| w.to_vec()).collect();
    plot_many(&data, config)
}

/// Plots every series on one set of axes and appends the caption.
///
/// Sample `i` of each series sits at `x = i`. Non-finite samples are
/// skipped; with nothing finite to draw only the caption is returned.
#[must_use]
pub fn plot_many(series: &[Vec<f64>], config: &ChartConfig) -> String {
    let points: Vec<Vec<(f64, f64)>> = series.iter().map(Vec::as_slice).map(to_points).collect();
    let Some((min, max)) = value_range(&points, config.lower_bound) else {
        return config.caption.clone();
    };
    let longest = series.iter().map(Vec::len).max().unwrap_or(0);

    let labels = axis_labels(min, max, config.precision);
    let label_width = labels.iter().map(String::len).max().unwrap_or(0);
    let label_columns = u16::try_from(label_width + 1).unwrap_or(u16::MAX);
    let area = Rect::new(0, 0, label_columns.saturating_add(config.width), config.height);

    let datasets: Vec<Dataset<'_>> = points
        .iter()
        .enumerate()
        .map(|(i, data)| {
            let color = config.series_colors.get(i).copied().unwrap_or_default();
            Dataset::default()
                .marker(Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(color.to_color()))
                .data(data)
        })
        .collect();

    #[allow(clippy::cast_precision_loss)]
    let x_max = longest.saturating_sub(1).max(1) as f64;
    let chart = Chart::new(datasets)
        .x_axis(Axis::default().bounds([0.0, x_max]))
        .y_axis(Axis::default().bounds([min, max]).labels(labels));

    let mut buf = Buffer::empty(area);
    chart.render(area, &mut buf);

    let mut out = buffer_to_text(&buf);
    if !config.caption.is_empty() {
        let slack = usize::from(config.width).saturating_sub(config.caption.chars().count());
        out.push_str(&" ".repeat(usize::from(label_columns) + slack / 2));
        out.push_str(&config.caption);
    }
    out
}

#[allow(clippy::cast_precision_loss)]
fn to_points(series: &[f64]) -> Vec<(f64, f64)> {
    series
        .iter()
        .enumerate()
        .filter(|(_, v)| v.is_finite())
        .map(|(i, &v)| (i as f64, v))
        .collect()
}

/// Vertical extent covering every point and the lower bound. A flat range
/// is widened by one so the widget has something to scale.
fn value_range(points: &[Vec<(f64, f64)>], lower_bound: Option<f64>) -> Option<(f64, f64)> {
    let mut values = points.iter().flatten().map(|&(_, v)| v).peekable();
    if values.peek().is_none() {
        return None;
    }
    let (mut min, max) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if let Some(bound) = lower_bound {
        min = min.min(bound);
    }
    let max = if max > min { max } else { min + 1.0 };
    Some((min, max))
}

fn axis_labels(min: f64, max: f64, precision: usize) -> Vec<String> {
    let mid = min + (max - min) / 2.0;
    [min, mid, max]
        .iter()
        .map(|v| format!("{v:.precision$}"))
        .collect()
}

/// Flattens the buffer into lines, wrapping coloured runs in escapes.
fn buffer_to_text(buf: &Buffer) -> String {
    let width = usize::from(buf.area.width).max(1);
    let mut out = String::new();
    for row in buf.content.chunks(width) {
        let mut line = String::new();
        let mut current: Option<TermColor> = None;
        for cell in row {
            let color = term_color(cell.fg);
            if color != current {
                if current.is_some() {
                    line.push_str(&ResetColor.to_string());
                }
                if let Some(c) = color {
                    line.push_str(&SetForegroundColor(c).to_string());
                }
                current = color;
            }
            line.push_str(cell.symbol());
        }
        if current.is_some() {
            line.push_str(&ResetColor.to_string());
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

const fn term_color(color: Color) -> Option<TermColor> {
    match color {
        Color::Indexed(i) => Some(TermColor::AnsiValue(i)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1b' {
                for c in chars.by_ref() {
                    if c == 'm' {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    fn plain_config() -> ChartConfig {
        ChartConfig {
            height: 4,
            width: 10,
            lower_bound: None,
            precision: 2,
            series_colors: Vec::new(),
            caption: String::new(),
        }
    }

    #[test]
    fn container_config_uses_fixed_geometry() {
        let config = ChartConfig::for_container("web");
        assert_eq!(config.height, 15);
        assert_eq!(config.width, 75);
        assert_eq!(config.lower_bound, Some(0.0));
        assert_eq!(config.caption, "Memory usage for container: web");
        assert_eq!(
            config.series_colors,
            vec![SeriesColor::LightCoral, SeriesColor::Turquoise]
        );
    }

    #[test]
    fn empty_series_render_caption_only() {
        let config = ChartConfig::for_container("web");
        let out = plot_many(&[Vec::new(), Vec::new()], &config);
        assert_eq!(out, "Memory usage for container: web");
        assert_eq!(plot_many(&[], &plain_config()), "");
    }

    #[test]
    fn frame_has_plot_rows_then_caption() {
        let config = ChartConfig::for_container("web");
        let out = plot_many(&[vec![2.0], vec![1.0]], &config);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 16);
        assert_eq!(lines[15].trim(), "Memory usage for container: web");
    }

    #[test]
    fn axis_spans_lower_bound_to_peak() {
        let config = ChartConfig::for_container("web");
        let plain = strip_ansi(&plot_many(&[vec![2.0], vec![1.0]], &config));
        assert!(plain.contains("2.00"));
        assert!(plain.contains("1.00"));
        assert!(plain.contains("0.00"));
    }

    #[test]
    fn series_are_coloured() {
        let config = ChartConfig::for_container("web");
        let out = plot_many(&[vec![2.0, 2.0], vec![1.0, 1.0]], &config);
        assert!(out.contains("\x1b[38;5;210m"));
        assert!(out.contains("\x1b[38;5;80m"));
        assert!(out.contains("\x1b[0m"));
    }

    #[test]
    fn uncoloured_series_emit_no_escapes() {
        let out = plot_many(&[vec![0.0, 4.0]], &plain_config());
        assert!(!out.contains('\x1b'));
        assert_eq!(out.lines().count(), 4);
    }

    #[test]
    fn flat_zero_series_does_not_panic() {
        let config = ChartConfig::for_container("idle");
        let out = plot_many(&[vec![0.0], vec![0.0]], &config);
        assert!(out.contains("idle"));
    }

    #[test]
    fn non_finite_values_are_skipped() {
        let config = ChartConfig::for_container("odd");
        let out = strip_ansi(&plot_many(&[vec![f64::NAN, 1.0, f64::INFINITY], vec![2.0]], &config));
        assert!(out.contains("2.00"));
        assert_eq!(plot_many(&[vec![f64::NAN]], &config), config.caption);
    }

    #[test]
    fn negative_values_extend_axis_below_lower_bound() {
        let config = ChartConfig::for_container("neg");
        let out = strip_ansi(&plot_many(&[vec![-1.0, 1.0]], &config));
        assert!(out.contains("-1.00"));
    }

    #[test]
    fn value_range_widens_flat_data() {
        assert_eq!(value_range(&[vec![(0.0, 3.0)]], None), Some((3.0, 4.0)));
        assert_eq!(value_range(&[vec![(0.0, 3.0)]], Some(0.0)), Some((0.0, 3.0)));
        assert_eq!(value_range(&[Vec::new()], Some(0.0)), None);
    }

    #[test]
    fn render_plots_windows_in_given_order() {
        let mut limit = SlidingWindow::new();
        let mut usage = SlidingWindow::new();
        limit.push(2.0);
        usage.push(1.0);
        let config = ChartConfig::for_container("web");
        assert_eq!(
            render(&[&limit, &usage], &config),
            plot_many(&[vec![2.0], vec![1.0]], &config)
        );
    }
}
