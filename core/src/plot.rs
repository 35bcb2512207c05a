use crate::Matrix;

/// Inclusive axis range in data coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn of(values: impl IntoIterator<Item = f64>) -> Option<Self> {
        let mut min = f64::MAX;
        let mut max = f64::MIN;
        let mut seen = false;
        for v in values {
            if v.is_nan() {
                continue;
            }
            min = min.min(v);
            max = max.max(v);
            seen = true;
        }
        seen.then_some(Self { min, max })
    }

    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Expands both ends by `frac` of the span; collapses to a unit span when
    /// min == max so a degenerate axis still renders.
    pub fn padded(&self, frac: f64) -> Self {
        let mut max = self.max;
        if self.min == max {
            max = self.min + 1.0;
        }
        let pad = (max - self.min) * frac;
        Self {
            min: self.min - pad,
            max: max + pad,
        }
    }

    /// Fraction of the range at which `v` sits, clamped to [0, 1].
    pub fn frac(&self, v: f64) -> f64 {
        let span = self.span().max(1e-12);
        ((v - self.min) / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Solid,
    Dashed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
}

impl MarkerShape {
    /// Per-series shape cycle, mirroring the per-method symbols of the charts.
    pub fn cycle(idx: usize) -> Self {
        match idx % 3 {
            0 => MarkerShape::Circle,
            1 => MarkerShape::Square,
            _ => MarkerShape::Diamond,
        }
    }
}

/// One scatter series. `color_index` selects from the active theme's series
/// palette so the same spec renders under both themes.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub points: Vec<(f64, f64)>,
    pub color_index: usize,
    pub shape: MarkerShape,
}

/// Color scale for a heatmap grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HeatScale {
    /// Low-to-high over the observed min/max.
    Sequential,
    /// Centered at zero with a symmetric bound.
    Diverging { bound: f64 },
}

/// Background tint for a diagnostic zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneTint {
    Safe,
    Warn,
    Fail,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlotItem {
    Points(Series),
    Line {
        label: Option<String>,
        points: Vec<(f64, f64)>,
        color_index: usize,
        style: LineStyle,
    },
    HLine {
        y: f64,
        style: LineStyle,
        label: Option<String>,
    },
    VLine {
        x: f64,
        style: LineStyle,
        label: Option<String>,
    },
    Zone {
        x0: f64,
        x1: f64,
        y0: f64,
        y1: f64,
        tint: ZoneTint,
    },
    HeatMap {
        matrix: Matrix,
        scale: HeatScale,
    },
    /// Free text pinned at a fractional position of the plot area.
    Note { frac: (f32, f32), text: String },
}

/// Declarative chart: what to draw, not how. The gpui canvas painter and the
/// SVG exporter both consume this.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotSpec {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Range,
    pub y_range: Range,
    /// Tick positions with labels; None means evenly spaced numeric ticks.
    pub x_ticks: Option<Vec<(f64, String)>>,
    /// Lock the plot area to a square so diagonal references keep slope 1.
    pub equal_aspect: bool,
    pub items: Vec<PlotItem>,
}

impl PlotSpec {
    pub fn new(title: impl Into<String>, x_range: Range, y_range: Range) -> Self {
        Self {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x_range,
            y_range,
            x_ticks: None,
            equal_aspect: false,
            items: Vec::new(),
        }
    }

    pub fn heatmap(&self) -> Option<(&Matrix, HeatScale)> {
        self.items.iter().find_map(|item| match item {
            PlotItem::HeatMap { matrix, scale } => Some((matrix, *scale)),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn range_of_skips_nan() {
        let r = Range::of([1.0, f64::NAN, 3.0]).unwrap();
        assert_eq!(r.min, 1.0);
        assert_eq!(r.max, 3.0);
        assert!(Range::of([f64::NAN]).is_none());
    }

    #[test]
    fn padded_expands_symmetrically() {
        let r = Range::new(0.0, 10.0).padded(0.05);
        assert_relative_eq!(r.min, -0.5);
        assert_relative_eq!(r.max, 10.5);
    }

    #[test]
    fn padded_handles_a_degenerate_range() {
        let r = Range::new(2.0, 2.0).padded(0.1);
        assert!(r.span() > 0.0);
        assert!(r.min < 2.0 || r.max > 2.0);
    }

    #[test]
    fn frac_clamps() {
        let r = Range::new(0.0, 4.0);
        assert_relative_eq!(r.frac(1.0), 0.25);
        assert_eq!(r.frac(-1.0), 0.0);
        assert_eq!(r.frac(9.0), 1.0);
    }

    #[test]
    fn marker_shapes_cycle() {
        assert_eq!(MarkerShape::cycle(0), MarkerShape::Circle);
        assert_eq!(MarkerShape::cycle(4), MarkerShape::Square);
    }
}
