use crate::error::RenderError;
use crate::types::chart::{ChartData, ChartKind, RenderOptions};

const MAX_X_LABELS: usize = 12;
const LEGEND_ITEM_WIDTH: f64 = 170.0;
const BAR_GROUP_FILL: f64 = 0.8;
const RANGE_HEADROOM: f64 = 0.05;
const FONT_FAMILY: &str = "DejaVu Sans, Arial, sans-serif";

/// Plot area in SVG coordinates.
#[derive(Clone, Copy)]
struct Frame {
    left: f64,
    right: f64,
    top: f64,
    bottom: f64,
    min: f64,
    max: f64,
}

impl Frame {
    fn y(&self, value: f64) -> f64 {
        let t = (value - self.min) / (self.max - self.min);
        self.bottom - t * (self.bottom - self.top)
    }

    fn slot_width(&self, count: usize) -> f64 {
        (self.right - self.left) / count.max(1) as f64
    }

    fn slot_center(&self, index: usize, count: usize) -> f64 {
        self.left + self.slot_width(count) * (index as f64 + 0.5)
    }
}

/// Line chart for `Progress`, grouped bars for `Strength`.
pub fn render_svg(data: &ChartData, options: &RenderOptions) -> Result<String, RenderError> {
    let width = options.width as f64;
    let height = options.height as f64;
    let padding = options.padding as f64;
    if width - 2.0 * padding <= 0.0 || height - 2.0 * padding <= 0.0 {
        return Err(RenderError::SvgError("Invalid viewport size".to_string()));
    }
    if data.labels.is_empty() || data.series.is_empty() {
        return Err(RenderError::SvgError("Nothing to plot".to_string()));
    }

    let (min, max) = value_bounds(data)?;
    let frame = Frame {
        left: padding,
        right: width - padding,
        top: padding,
        bottom: height - padding,
        min,
        max,
    };

    let plot = match data.kind {
        ChartKind::Progress => build_lines(data, &frame, options),
        ChartKind::Strength => build_bars(data, &frame, options),
    };

    Ok(format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}">
  <text x="{title_x:.1}" y="{title_y:.1}" font-family="{font}" font-size="20" fill="#222222" text-anchor="middle">{title}</text>
  {grid}
  {x_labels}
  {plot}
  {legend}
</svg>"##,
        w = width,
        h = height,
        title_x = width / 2.0,
        title_y = padding * 0.4,
        font = FONT_FAMILY,
        title = data.kind.title(),
        grid = build_grid(&frame, options.y_ticks),
        x_labels = build_x_labels(&data.labels, &frame),
        plot = plot,
        legend = build_legend(data, &frame, options),
    ))
}

fn value_bounds(data: &ChartData) -> Result<(f64, f64), RenderError> {
    let mut values = data
        .series
        .iter()
        .flat_map(|s| s.values.iter().copied())
        .filter(|v| v.is_finite())
        .peekable();
    if values.peek().is_none() {
        return Err(RenderError::SvgError("No finite values to plot".to_string()));
    }

    let (mut min, mut max) = values.fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));

    // Bars grow from zero.
    if data.kind == ChartKind::Strength {
        min = min.min(0.0);
        max = max.max(0.0);
    }

    if (max - min).abs() < f64::EPSILON {
        min -= 1.0;
        max += 1.0;
    }

    let headroom = (max - min) * RANGE_HEADROOM;
    if data.kind == ChartKind::Progress || min < 0.0 {
        min -= headroom;
    }
    max += headroom;

    Ok((min, max))
}

fn build_grid(frame: &Frame, ticks: usize) -> String {
    let ticks = ticks.max(1);
    let mut out = String::new();
    for i in 0..=ticks {
        let value = frame.min + (frame.max - frame.min) * i as f64 / ticks as f64;
        let y = frame.y(value);
        out.push_str(&format!(
            r##"<line x1="{:.1}" y1="{y:.1}" x2="{:.1}" y2="{y:.1}" stroke="#E5E5E5" stroke-width="1"/><text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" fill="#555555" text-anchor="end">{}</text>"##,
            frame.left,
            frame.right,
            frame.left - 8.0,
            y + 4.0,
            format_tick(value),
        ));
    }
    out.push_str(&format!(
        r##"<line x1="{l:.1}" y1="{b:.1}" x2="{r:.1}" y2="{b:.1}" stroke="#888888" stroke-width="1"/>"##,
        l = frame.left,
        r = frame.right,
        b = frame.bottom,
    ));
    out
}

fn build_x_labels(labels: &[String], frame: &Frame) -> String {
    let step = labels.len().div_ceil(MAX_X_LABELS).max(1);
    labels
        .iter()
        .enumerate()
        .filter(|(i, _)| i % step == 0 || *i == labels.len() - 1)
        .map(|(i, label)| {
            format!(
                r##"<text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="12" fill="#555555" text-anchor="middle">{}</text>"##,
                frame.slot_center(i, labels.len()),
                frame.bottom + 20.0,
                label
            )
        })
        .collect()
}

fn build_lines(data: &ChartData, frame: &Frame, options: &RenderOptions) -> String {
    let count = data.labels.len();
    let mut out = String::new();

    for (s_idx, series) in data.series.iter().enumerate() {
        let color = options.palette.series_color(s_idx, data.series.len());
        let points: Vec<(f64, f64)> = series
            .values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.is_finite())
            .map(|(i, v)| (frame.slot_center(i, count), frame.y(*v)))
            .collect();

        if points.len() > 1 {
            let coords: Vec<String> = points.iter().map(|(x, y)| format!("{:.1},{:.1}", x, y)).collect();
            out.push_str(&format!(
                r#"<polyline points="{}" fill="none" stroke="{}" stroke-width="{:.1}" stroke-linecap="round" stroke-linejoin="round"/>"#,
                coords.join(" "),
                color,
                options.stroke_width
            ));
        }

        for (x, y) in &points {
            out.push_str(&format!(
                r##"<circle cx="{:.1}" cy="{:.1}" r="{:.1}" fill="{}" stroke="#FFFFFF" stroke-width="1"/>"##,
                x,
                y,
                options.stroke_width * 1.6,
                color
            ));
        }
    }

    out
}

fn build_bars(data: &ChartData, frame: &Frame, options: &RenderOptions) -> String {
    let count = data.labels.len();
    let group_width = frame.slot_width(count) * BAR_GROUP_FILL;
    let bar_width = group_width / data.series.len() as f64;
    let zero = frame.y(0.0_f64.clamp(frame.min, frame.max));
    let mut out = String::new();

    for (s_idx, series) in data.series.iter().enumerate() {
        let color = options.palette.series_color(s_idx, data.series.len());
        for (i, value) in series.values.iter().enumerate() {
            if !value.is_finite() {
                continue;
            }
            let x = frame.slot_center(i, count) - group_width / 2.0 + bar_width * s_idx as f64;
            let y = frame.y(*value);
            out.push_str(&format!(
                r#"<rect x="{:.1}" y="{:.1}" width="{:.1}" height="{:.1}" fill="{}"/>"#,
                x,
                y.min(zero),
                bar_width,
                (zero - y).abs(),
                color
            ));
        }
    }

    out
}

fn build_legend(data: &ChartData, frame: &Frame, options: &RenderOptions) -> String {
    let y = frame.top - 16.0;
    data.series
        .iter()
        .enumerate()
        .map(|(i, series)| {
            let x = frame.left + LEGEND_ITEM_WIDTH * i as f64;
            format!(
                r##"<rect x="{:.1}" y="{:.1}" width="12" height="12" fill="{}"/><text x="{:.1}" y="{:.1}" font-family="{FONT_FAMILY}" font-size="13" fill="#222222">{}</text>"##,
                x,
                y - 10.0,
                options.palette.series_color(i, data.series.len()),
                x + 18.0,
                y,
                series.name
            )
        })
        .collect()
}

fn format_tick(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{:.0}", value)
    } else {
        format!("{:.1}", value)
    }
}
