use serde::{Deserialize, Serialize};

/// Headroom added above the largest value so lines never touch the top edge.
pub const AXIS_HEADROOM: f64 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

impl AxisBounds {
    pub fn span(&self) -> f64 {
        self.max - self.min
    }

    /// Position of `value` inside the bounds, clamped to `0.0..=1.0`.
    pub fn fraction(&self, value: f64) -> f64 {
        let span = self.span();
        if span <= 0.0 {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

/// Minimum and padded maximum of `data`.
///
/// Non-finite values are skipped; `None` when nothing is left to measure.
pub fn min_max_values(data: &[f64]) -> Option<AxisBounds> {
    let mut values = data.iter().copied().filter(|value| value.is_finite());
    let first = values.next()?;
    let (min, max) = values.fold((first, first), |(min, max), value| {
        (min.min(value), max.max(value))
    });
    Some(AxisBounds {
        min,
        max: max + AXIS_HEADROOM,
    })
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AxisOptions {
    pub title: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl AxisOptions {
    pub fn bounds(&self) -> Option<AxisBounds> {
        match (self.min, self.max) {
            (Some(min), Some(max)) => Some(AxisBounds { min, max }),
            _ => None,
        }
    }
}

/// Render configuration of one chart.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChartOptions {
    pub title: String,
    pub y_axis: AxisOptions,
    pub labels: Vec<String>,
}

impl ChartOptions {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Copy of these options with the y-axis bounds replaced.
    pub fn with_y_bounds(&self, bounds: AxisBounds) -> Self {
        Self {
            y_axis: AxisOptions {
                min: Some(bounds.min),
                max: Some(bounds.max),
                ..self.y_axis.clone()
            },
            ..self.clone()
        }
    }

    pub fn with_labels(&self, labels: Vec<String>) -> Self {
        Self {
            labels,
            ..self.clone()
        }
    }
}
