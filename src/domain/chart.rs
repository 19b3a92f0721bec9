// Chart geometry: scale mapping, polyline path building, sparklines.
// Pure functions over small in-memory slices; no state, no I/O.
use std::fmt;

use super::series::Sample;

/// A numeric interval, used both as value domain and as pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the span, with a collapsed span counting as 1 so callers
    /// never divide by zero.
    pub fn extent(&self) -> f64 {
        let extent = self.max - self.min;
        if extent == 0.0 { 1.0 } else { extent }
    }
}

/// Linearly map `value` from `domain` into `range`. `invert` flips the
/// range direction — chart coordinates put y = 0 at the top, so higher
/// values need smaller pixel-y.
///
/// A collapsed domain (`min == max`) substitutes a divisor of 1 instead of
/// failing: the result stays finite for any finite input, and a value equal
/// to the collapsed domain maps to `range.min` (`range.max` when inverted).
pub fn scale(value: f64, domain: Span, range: Span, invert: bool) -> f64 {
    let t = (value - domain.min) / domain.extent();
    if invert {
        range.max - t * (range.max - range.min)
    } else {
        range.min + t * (range.max - range.min)
    }
}

/// One SVG-style drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathCommand::MoveTo(x, y) => write!(f, "M {} {}", x, y),
            PathCommand::LineTo(x, y) => write!(f, "L {} {}", x, y),
            PathCommand::Close => write!(f, "Z"),
        }
    }
}

fn render(commands: &[PathCommand]) -> String {
    commands
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Line and area command sequences for one series.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartPath {
    pub line: Vec<PathCommand>,
    pub area: Vec<PathCommand>,
}

impl ChartPath {
    pub fn line_d(&self) -> String {
        render(&self.line)
    }

    pub fn area_d(&self) -> String {
        render(&self.area)
    }
}

/// Convert an ordered series into a polyline path plus a filled-area
/// variant closed down to the baseline `y = height`.
///
/// Sample `i` of `n` sits at `x = i / (n - 1) * width` (`0` for a
/// single-sample series, which yields a lone move-to). Values map through
/// `scale` with an inverted `(0, height)` range; input order is preserved
/// and segments are strictly linear. In the area only, points below the
/// baseline are clipped to it so the fill never dips under the chart —
/// the line keeps the true coordinates. An empty series yields empty
/// paths.
pub fn build_path(samples: &[Sample], domain: Span, width: f64, height: f64) -> ChartPath {
    let n = samples.len();
    let y_range = Span::new(0.0, height);
    let mut line = Vec::with_capacity(n);
    let mut area = Vec::with_capacity(n + 3);

    for (i, sample) in samples.iter().enumerate() {
        let x = if n > 1 {
            i as f64 / (n - 1) as f64 * width
        } else {
            0.0
        };
        let y = scale(sample.value, domain, y_range, true);
        line.push(if i == 0 {
            PathCommand::MoveTo(x, y)
        } else {
            PathCommand::LineTo(x, y)
        });
        if i == 0 {
            area.push(PathCommand::MoveTo(x, height));
        }
        area.push(PathCommand::LineTo(x, y.min(height)));
    }

    if n > 0 {
        let last_x = if n > 1 { width } else { 0.0 };
        area.push(PathCommand::LineTo(last_x, height));
        area.push(PathCommand::Close);
    }

    ChartPath { line, area }
}

/// Sparkline geometry: line, filled area and the end-dot position.
#[derive(Debug, Clone, PartialEq)]
pub struct Sparkline {
    pub path: ChartPath,
    pub end_x: f64,
    pub end_y: f64,
}

/// Build a sparkline inside a `width` x `height` box with `padding` kept
/// clear on every side. The value domain comes from the data itself
/// (min..max, flat data spans 1), so the little chart always uses its full
/// height. Fewer than two values cannot form a line; that yields `None`.
pub fn sparkline(values: &[f64], width: f64, height: f64, padding: f64) -> Option<Sparkline> {
    if values.len() < 2 {
        return None;
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    let domain = Span::new(min, max);
    let y_range = Span::new(padding, height - padding);
    let baseline = height - padding;
    let n = values.len();

    let mut line = Vec::with_capacity(n);
    let mut area = Vec::with_capacity(n + 3);
    let mut end = (0.0, 0.0);
    for (i, value) in values.iter().enumerate() {
        let x = padding + i as f64 / (n - 1) as f64 * (width - padding * 2.0);
        let y = scale(*value, domain, y_range, true);
        line.push(if i == 0 {
            PathCommand::MoveTo(x, y)
        } else {
            PathCommand::LineTo(x, y)
        });
        if i == 0 {
            area.push(PathCommand::MoveTo(x, baseline));
        }
        area.push(PathCommand::LineTo(x, y));
        end = (x, y);
    }
    area.push(PathCommand::LineTo(width - padding, baseline));
    area.push(PathCommand::Close);

    Some(Sparkline {
        path: ChartPath { line, area },
        end_x: end.0,
        end_y: end.1,
    })
}
