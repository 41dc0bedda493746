//! Text labels placed along isolines.

use crate::collection::IsolineCollection;
use crate::config::IsolineConfig;
use crate::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};

/// Default path length between two labels.
pub const DEFAULT_LABEL_SPACING: f64 = 10.0;

/// Significant digits used for label text.
const LABEL_DIGITS: usize = 2;

/// A label positioned on an isoline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolineTextLabel {
    /// Level value, two significant digits
    pub text: String,
    /// Anchor in data space, always a vertex of the labelled line
    pub position: Point,
    /// Direction of the line at the anchor, in degrees
    pub rotation: f64,
}

impl IsolineTextLabel {
    /// Rotation folded into (-90, 90] so text never renders upside down.
    pub fn upright_rotation(&self) -> f64 {
        let r = self.rotation.rem_euclid(360.0);
        if r > 90.0 && r <= 270.0 {
            r - 180.0
        } else if r > 270.0 {
            r - 360.0
        } else {
            r
        }
    }
}

/// Walks isolines and emits a label every `way_before_text` units of length.
#[derive(Debug, Clone, PartialEq)]
pub struct IsolineTextAnnotater {
    way_before_text: f64,
}

impl Default for IsolineTextAnnotater {
    fn default() -> Self {
        Self {
            way_before_text: DEFAULT_LABEL_SPACING,
        }
    }
}

impl IsolineTextAnnotater {
    pub fn new(way_before_text: f64) -> Self {
        Self { way_before_text }
    }

    pub fn from_config(config: &IsolineConfig) -> Self {
        Self::new(config.label_spacing)
    }

    pub fn way_before_text(&self) -> f64 {
        self.way_before_text
    }

    pub fn set_way_before_text(&mut self, way_before_text: f64) {
        self.way_before_text = way_before_text;
    }

    /// Produce labels for every line in `collection`.
    ///
    /// The running length resets after each label. Labels outside `visible`
    /// are not culled.
    pub fn annotate(&self, collection: &IsolineCollection, _visible: Rect) -> Vec<IsolineTextLabel> {
        let mut labels = Vec::new();

        for line in collection.lines() {
            let text = format_significant(line.value, LABEL_DIGITS);
            let mut way = 0.0;
            for segment in line.segments() {
                way += segment.length();
                if way > self.way_before_text {
                    way = 0.0;
                    labels.push(IsolineTextLabel {
                        text: text.clone(),
                        position: segment.end,
                        rotation: segment.angle_degrees(),
                    });
                }
            }
        }

        tracing::debug!(
            lines = collection.len(),
            labels = labels.len(),
            spacing = self.way_before_text,
            "Annotated isolines"
        );

        labels
    }
}

/// Format `value` with `digits` significant digits in general notation.
///
/// Plain decimal is used when the decimal exponent is in `[-5, digits)`,
/// scientific `d.dE+XX` otherwise. Trailing zeros are dropped.
pub fn format_significant(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return scientific;
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return scientific;
    };

    if exponent < -5 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}E{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
