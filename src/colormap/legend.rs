//! Legend derived from the colormap: a decimated display subset, a capped
//! gradient stop list and fixed elevation labels.

use crate::models::style::{ColorBreakpoint, Rgb};
use serde::Serialize;

/// Above this many breakpoints the display subset is decimated.
pub const DISPLAY_LIMIT: usize = 20;
/// Elevation (m) where the gradient is capped into a flat terminal band.
pub const CUTOFF: f64 = 2000.0;
/// Share of the gradient axis (percent) reserved above the cutoff.
pub const TOP_SPACER: f64 = 10.0;
pub const LABEL_MARKS: [f64; 5] = [0.0, 500.0, 1000.0, 1500.0, 2000.0];
/// Edge labels stay this far (percent) from either end.
pub const LABEL_INSET: f64 = 5.0;
pub const COLLAPSED_GLYPH: &str = "⛰";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradientStop {
    pub color: Rgb,
    /// Percent along the axis, 0 at the lowest elevation.
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TickLabel {
    pub text: String,
    pub position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum LegendDisplay {
    Collapsed {
        glyph: &'static str,
    },
    Expanded {
        breakpoints: Vec<ColorBreakpoint>,
        stops: Vec<GradientStop>,
        labels: Vec<TickLabel>,
        css: String,
    },
}

/// What the legend control shows: collapse flag plus the displayed subset.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendDisplayState {
    pub collapsed: bool,
    pub breakpoints: Vec<ColorBreakpoint>,
}

impl LegendDisplayState {
    pub fn new(source: &[ColorBreakpoint], collapsed: bool) -> Self {
        LegendDisplayState {
            collapsed,
            breakpoints: decimate(source),
        }
    }

    pub fn toggle(&mut self) -> bool {
        self.collapsed = !self.collapsed;
        self.collapsed
    }

    pub fn display(&self) -> LegendDisplay {
        if self.collapsed {
            return LegendDisplay::Collapsed {
                glyph: COLLAPSED_GLYPH,
            };
        }
        let stops = build_gradient(&self.breakpoints);
        let labels = match self.breakpoints.first() {
            Some(lowest) if !stops.is_empty() => build_labels(lowest.elevation),
            _ => Vec::new(),
        };
        LegendDisplay::Expanded {
            breakpoints: self.breakpoints.clone(),
            css: gradient_css(&stops),
            stops,
            labels,
        }
    }
}

pub fn build_legend(breakpoints: &[ColorBreakpoint], collapsed: bool) -> LegendDisplay {
    LegendDisplayState::new(breakpoints, collapsed).display()
}

/// Every `len / DISPLAY_LIMIT`-th breakpoint, always ending on the highest.
pub fn decimate(breakpoints: &[ColorBreakpoint]) -> Vec<ColorBreakpoint> {
    if breakpoints.len() <= DISPLAY_LIMIT {
        return breakpoints.to_vec();
    }
    let step = breakpoints.len() / DISPLAY_LIMIT;
    let last = breakpoints.len() - 1;

    let mut shown: Vec<ColorBreakpoint> = breakpoints.iter().step_by(step).cloned().collect();
    if last % step != 0 {
        shown.push(breakpoints[last].clone());
    }
    shown
}

/// Cap-and-extend gradient over breakpoints sorted by elevation.
///
/// Breakpoints up to [`CUTOFF`] map linearly onto `0..=100 - TOP_SPACER`; a
/// synthetic stop at 100 % repeats the colour of the highest one kept.
pub fn build_gradient(breakpoints: &[ColorBreakpoint]) -> Vec<GradientStop> {
    let capped = collapse_duplicates(breakpoints.iter().filter(|b| b.elevation <= CUTOFF));
    let (Some(lowest), Some(highest)) = (capped.first(), capped.last()) else {
        return Vec::new();
    };
    let floor = lowest.elevation;

    let mut stops: Vec<GradientStop> = capped
        .iter()
        .map(|b| GradientStop {
            color: b.color,
            position: axis_position(b.elevation, floor),
        })
        .collect();
    stops.push(GradientStop {
        color: highest.color,
        position: 100.0,
    });
    stops
}

/// Labels at the fixed marks; the cutoff mark reads `>2000m`.
pub fn build_labels(floor: f64) -> Vec<TickLabel> {
    LABEL_MARKS
        .iter()
        .map(|&mark| {
            if mark >= CUTOFF {
                TickLabel {
                    text: format!(">{}m", CUTOFF as i64),
                    position: 100.0 - LABEL_INSET,
                }
            } else {
                TickLabel {
                    text: format!("{}m", mark as i64),
                    position: axis_position(mark, floor).clamp(LABEL_INSET, 100.0 - LABEL_INSET),
                }
            }
        })
        .collect()
}

pub fn gradient_css(stops: &[GradientStop]) -> String {
    if stops.is_empty() {
        return String::new();
    }
    let parts: Vec<String> = stops
        .iter()
        .map(|s| format!("{} {:.2}%", s.color.css(), s.position))
        .collect();
    format!("linear-gradient(to top, {})", parts.join(", "))
}

fn axis_position(elevation: f64, floor: f64) -> f64 {
    let span = CUTOFF - floor;
    if span <= 0.0 {
        return 0.0;
    }
    (elevation - floor) / span * (100.0 - TOP_SPACER)
}

// equal elevations collapse onto the last one
fn collapse_duplicates<'a>(
    breakpoints: impl Iterator<Item = &'a ColorBreakpoint>,
) -> Vec<&'a ColorBreakpoint> {
    let mut kept: Vec<&ColorBreakpoint> = Vec::new();
    for bp in breakpoints {
        match kept.last_mut() {
            Some(prev) if prev.elevation == bp.elevation => *prev = bp,
            _ => kept.push(bp),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bp(elevation: f64, shade: u8) -> ColorBreakpoint {
        ColorBreakpoint {
            elevation,
            color: Rgb::new(shade, shade, shade),
            alpha: 255,
            label: None,
        }
    }

    #[test]
    fn test_decimate_hundred_keeps_extremes() {
        let source: Vec<ColorBreakpoint> = (0..100).map(|e| bp(e as f64, e as u8)).collect();
        let shown = decimate(&source);

        assert!(shown.len() <= DISPLAY_LIMIT + 1);
        assert_eq!(shown.first().map(|b| b.elevation), Some(0.0));
        assert_eq!(shown.last().map(|b| b.elevation), Some(99.0));
        assert_eq!(shown[1].elevation, 5.0);
    }

    #[test]
    fn test_decimate_does_not_repeat_last_when_stride_hits_it() {
        // 41 entries, stride 2: index 40 is already on the stride.
        let source: Vec<ColorBreakpoint> = (0..41).map(|e| bp(e as f64, 0)).collect();
        let shown = decimate(&source);
        assert_eq!(shown.len(), 21);
        assert_eq!(shown.last().map(|b| b.elevation), Some(40.0));
    }

    #[test]
    fn test_decimate_small_input_untouched() {
        let source: Vec<ColorBreakpoint> = (0..20).map(|e| bp(e as f64, 0)).collect();
        assert_eq!(decimate(&source), source);
    }

    #[test]
    fn test_gradient_caps_at_cutoff_with_flat_terminal_band() {
        let source = vec![
            bp(0.0, 10),
            bp(1000.0, 20),
            bp(1800.0, 30),
            bp(2500.0, 40),
            bp(3000.0, 50),
        ];
        let stops = build_gradient(&source);

        let positions: Vec<f64> = stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 45.0, 81.0, 100.0]);
        assert!(stops.iter().all(|s| s.color.red < 40));

        let n = stops.len();
        assert_eq!(stops[n - 1].color, stops[n - 2].color);
    }

    #[test]
    fn test_gradient_from_below_sea_level() {
        let source = vec![bp(-2000.0, 1), bp(0.0, 2), bp(2000.0, 3)];
        let stops = build_gradient(&source);
        let positions: Vec<f64> = stops.iter().map(|s| s.position).collect();
        assert_eq!(positions, vec![0.0, 45.0, 90.0, 100.0]);
        assert_eq!(stops[3].color, Rgb::new(3, 3, 3));
    }

    #[test]
    fn test_gradient_duplicate_elevation_last_wins() {
        let source = vec![bp(0.0, 1), bp(500.0, 2), bp(500.0, 3), bp(2000.0, 4)];
        let stops = build_gradient(&source);
        assert_eq!(stops.len(), 4);
        assert_eq!(stops[1].color, Rgb::new(3, 3, 3));
    }

    #[test]
    fn test_gradient_empty_when_everything_above_cutoff() {
        assert!(build_gradient(&[bp(2500.0, 1)]).is_empty());
        assert!(build_gradient(&[]).is_empty());
    }

    #[test]
    fn test_labels_inset_and_cap_text() {
        let labels = build_labels(0.0);
        let rendered: Vec<(&str, f64)> = labels
            .iter()
            .map(|l| (l.text.as_str(), l.position))
            .collect();
        assert_eq!(
            rendered,
            vec![
                ("0m", 5.0),
                ("500m", 22.5),
                ("1000m", 45.0),
                ("1500m", 67.5),
                (">2000m", 95.0),
            ]
        );
    }

    #[test]
    fn test_css_matches_stops() {
        let stops = build_gradient(&[bp(0.0, 0), bp(2000.0, 255)]);
        assert_eq!(
            gradient_css(&stops),
            "linear-gradient(to top, rgb(0, 0, 0) 0.00%, rgb(255, 255, 255) 90.00%, rgb(255, 255, 255) 100.00%)"
        );
    }

    #[test]
    fn test_collapsed_legend_is_single_glyph() {
        let source = vec![bp(0.0, 0), bp(2000.0, 255)];
        assert_eq!(
            build_legend(&source, true),
            LegendDisplay::Collapsed {
                glyph: COLLAPSED_GLYPH
            }
        );

        let mut state = LegendDisplayState::new(&source, true);
        assert!(!state.toggle());
        assert!(matches!(state.display(), LegendDisplay::Expanded { .. }));
    }

    #[test]
    fn test_expanded_legend_json() {
        let legend = build_legend(&[bp(0.0, 0), bp(2000.0, 255)], false);
        let json = serde_json::to_value(&legend).unwrap();

        assert_eq!(json["state"], "expanded");
        assert_eq!(json["stops"].as_array().map(Vec::len), Some(3));
        assert_eq!(json["labels"][4]["text"], ">2000m");
        assert_eq!(json["breakpoints"][1]["color"]["red"], 255);
    }

    #[test]
    fn test_empty_legend_has_no_labels() {
        match build_legend(&[], false) {
            LegendDisplay::Expanded {
                stops, labels, css, ..
            } => {
                assert!(stops.is_empty());
                assert!(labels.is_empty());
                assert!(css.is_empty());
            }
            other => panic!("unexpected {other:?}"),
        }
    }
}
