use crate::colormap::legend::{CUTOFF, build_gradient, decimate};
use crate::colormap::render::linear_gradient;
use crate::models::style::{ColorBreakpoint, Rgb};
use colorgrad::Gradient;
use comfy_table::{Attribute, Cell, CellAlignment, Table};

const BAR_WIDTH: usize = 24;

fn header(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Center)
}

/// Truecolor bar sampled along the capped legend gradient.
pub fn colourbar(breakpoints: &[ColorBreakpoint]) -> String {
    let stops = build_gradient(&decimate(breakpoints));
    let colors: Vec<Rgb> = stops.iter().map(|s| s.color).collect();
    let domain: Vec<f32> = stops.iter().map(|s| s.position as f32).collect();

    let grad = if stops.len() >= 2 {
        linear_gradient(&colors, &domain).ok()
    } else {
        None
    };

    let mut s = String::new();
    match grad {
        Some(grad) => {
            for i in 0..BAR_WIDTH {
                let t = 100.0 * i as f32 / (BAR_WIDTH - 1) as f32;
                let [r, g, b, _] = grad.at(t).to_rgba8();
                s.push_str(&format!("\x1b[38;2;{};{};{}m█\x1b[0m", r, g, b));
            }
        }
        None => {
            // fallback to grayscale gradient
            for i in 0..BAR_WIDTH {
                let v = (255.0 * i as f32 / (BAR_WIDTH - 1) as f32).round() as u8;
                s.push_str(&format!("\x1b[38;2;{0};{0};{0}m█\x1b[0m", v));
            }
        }
    }
    s
}

pub fn summary_table(source: &str, breakpoints: &[ColorBreakpoint]) -> (Table, Vec<String>) {
    let shown = decimate(breakpoints);
    let mut warnings = Vec::new();

    let mut status = "✅";
    let (min_v, max_v) = match (breakpoints.first(), breakpoints.last()) {
        (Some(lo), Some(hi)) => (format!("{:.0}", lo.elevation), format!("{:.0}", hi.elevation)),
        _ => {
            warnings.push(format!("  ⚠️{}: no usable breakpoints, legend will be empty", source));
            status = "⚠️";
            ("-".to_string(), "-".to_string())
        }
    };

    if !breakpoints.is_empty() && breakpoints.iter().all(|b| b.elevation > CUTOFF) {
        warnings.push(format!(
            "  ⚠️{}: every breakpoint lies above {:.0} m, the legend gradient is empty",
            source, CUTOFF
        ));
        status = "⚠️";
    }

    let labels = breakpoints
        .iter()
        .filter_map(|b| b.label.as_deref())
        .collect::<Vec<_>>()
        .join(", ");

    let mut table = Table::new();
    table
        .set_header(vec![
            header(""),
            header("Colormap"),
            header("Breaks"),
            header("Shown"),
            header("Min"),
            header("Max"),
            header("Labels"),
            Cell::new("Colourbar").add_attribute(Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::ASCII_BORDERS_ONLY_CONDENSED);

    table.add_row(vec![
        Cell::new(status).set_alignment(CellAlignment::Center),
        Cell::new(source),
        Cell::new(breakpoints.len()).set_alignment(CellAlignment::Center),
        Cell::new(shown.len()).set_alignment(CellAlignment::Center),
        Cell::new(min_v).set_alignment(CellAlignment::Center),
        Cell::new(max_v).set_alignment(CellAlignment::Center),
        Cell::new(labels),
        Cell::new(colourbar(breakpoints)),
    ]);

    (table, warnings)
}

pub fn print_colormap_summary(source: &str, breakpoints: &[ColorBreakpoint]) {
    let (table, warnings) = summary_table(source, breakpoints);
    println!("\nColormap summary:\n{}", table);

    if !warnings.is_empty() {
        println!("\nWarnings:");
        for warning in warnings {
            println!("{}", warning);
        }
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::parse_colormap;

    #[test]
    fn test_summary_counts_and_range() {
        let breakpoints = parse_colormap("0,0,0,255,255,deep\n2500,255,0,0,255,high\n");
        let (table, warnings) = summary_table("ramp.txt", &breakpoints);
        let rendered = table.to_string();

        assert!(warnings.is_empty());
        assert!(rendered.contains("ramp.txt"));
        assert!(rendered.contains("2500"));
        assert!(rendered.contains("deep, high"));
    }

    #[test]
    fn test_summary_warns_on_empty_colormap() {
        let (_, warnings) = summary_table("empty.txt", &[]);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("no usable breakpoints"));
    }

    #[test]
    fn test_summary_warns_when_nothing_below_cutoff() {
        let breakpoints = parse_colormap("3000,1,1,1,255\n");
        let (_, warnings) = summary_table("alpine.txt", &breakpoints);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("above 2000 m"));
    }

    #[test]
    fn test_colourbar_has_fixed_width() {
        let breakpoints = parse_colormap("0,0,0,0,255\n2000,255,255,255,255\n");
        assert_eq!(colourbar(&breakpoints).matches('█').count(), BAR_WIDTH);
        assert_eq!(colourbar(&[]).matches('█').count(), BAR_WIDTH);
    }
}
