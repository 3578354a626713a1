//! Backend-neutral chart description.
//!
//! A [`Figure`] carries everything a renderer needs to draw an annotated bar
//! chart or histogram: axis labels, bar geometry, gridlines and the count
//! labels placed above bars. The terminal UI and the text/JSON outputs all
//! draw from the same figure.

use serde::{Deserialize, Serialize};

/// Opacity used for gridlines and histogram bars.
pub const REDUCED_ALPHA: f32 = 0.75;
/// Vertical distance, in points, between a bar top and its count label.
pub const ANNOTATION_OFFSET_POINTS: f32 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FigureKind {
    /// One bar per category label.
    Categorical,
    /// Contiguous bars over a numeric range.
    Histogram,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridLines {
    pub axis: Axis,
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureBar {
    /// Category name, or the bin range for histograms.
    pub label: String,
    /// Left edge in data coordinates.
    pub x: f64,
    pub width: f64,
    pub height: u64,
    pub color: String,
    pub edge_color: Option<String>,
    pub alpha: f32,
}

impl FigureBar {
    pub fn center(&self) -> f64 {
        self.x + self.width / 2.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub text: String,
    /// Anchor at the horizontal centre of the bar top.
    pub x: f64,
    pub y: f64,
    pub offset_points: (f32, f32),
    pub rotation_deg: f32,
    pub font_size: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub kind: FigureKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub size_inches: (f32, f32),
    pub grid: GridLines,
    pub bars: Vec<FigureBar>,
    pub annotations: Vec<Annotation>,
}

impl Figure {
    pub fn new(kind: FigureKind, title: impl Into<String>, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            size_inches: (8.0, 6.0),
            grid: GridLines { axis: Axis::Y, alpha: REDUCED_ALPHA },
            bars: Vec::new(),
            annotations: Vec::new(),
        }
    }

    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.size_inches = (width, height);
        self
    }

    /// Places an integer count label above every bar accepted by `keep`.
    pub fn annotate_bars(&mut self, rotation_deg: f32, font_size: Option<f32>, keep: impl Fn(&FigureBar) -> bool) {
        self.annotations = self
            .bars
            .iter()
            .filter(|b| keep(b))
            .map(|b| Annotation {
                text: b.height.to_string(),
                x: b.center(),
                y: b.height as f64,
                offset_points: (0.0, ANNOTATION_OFFSET_POINTS),
                rotation_deg,
                font_size,
            })
            .collect();
    }

    pub fn total(&self) -> u64 {
        self.bars.iter().map(|b| b.height).sum()
    }

    pub fn max_height(&self) -> u64 {
        self.bars.iter().map(|b| b.height).max().unwrap_or(0)
    }
}
