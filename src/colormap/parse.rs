use crate::models::style::{ColorBreakpoint, Rgb};
use csv::{ReaderBuilder, StringRecord, Trim};

/// Directive line in GDAL colour-relief files; carries no breakpoint.
const DIRECTIVE: &str = "INTERPOLATION";

/// Parse `elevation,r,g,b,alpha[,label]` lines into breakpoints sorted by
/// elevation. Comments, the directive line, blank lines and any line with a
/// missing or malformed numeric field are skipped.
pub fn parse_colormap(text: &str) -> Vec<ColorBreakpoint> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .comment(Some(b'#'))
        .from_reader(text.as_bytes());

    let mut breakpoints: Vec<ColorBreakpoint> = reader
        .records()
        .filter_map(Result::ok)
        .filter_map(|record| parse_record(&record))
        .collect();

    // stable, so equal elevations keep file order
    breakpoints.sort_by(|a, b| a.elevation.total_cmp(&b.elevation));
    breakpoints
}

fn parse_record(record: &StringRecord) -> Option<ColorBreakpoint> {
    let first = record.get(0)?;
    if first.is_empty() || first.starts_with(DIRECTIVE) || record.len() < 5 {
        return None;
    }

    let elevation: f64 = first.parse().ok().filter(|v: &f64| v.is_finite())?;
    let red = record.get(1)?.parse().ok()?;
    let green = record.get(2)?.parse().ok()?;
    let blue = record.get(3)?.parse().ok()?;
    let alpha = record.get(4)?.parse().ok()?;
    let label = record
        .get(5)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    Some(ColorBreakpoint {
        elevation,
        color: Rgb::new(red, green, blue),
        alpha,
        label,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_line_between_valid_ones_is_dropped() {
        let text = "2500,255,0,0,255,high\n12x,1,2,3,255\n0,0,0,255,255,deep\n";
        let stops = parse_colormap(text);

        assert_eq!(stops.len(), 2);
        assert_eq!(stops[0].elevation, 0.0);
        assert_eq!(stops[0].color, Rgb::new(0, 0, 255));
        assert_eq!(stops[0].label.as_deref(), Some("deep"));
        assert_eq!(stops[1].elevation, 2500.0);
        assert_eq!(stops[1].label.as_deref(), Some("high"));
    }

    #[test]
    fn test_comments_directive_and_blank_lines_are_skipped() {
        let text = "# GDAL colour relief\nINTERPOLATION:INTERPOLATED\n\n  \n-100, 0, 0, 128, 255\n100,10,200,10,255\n";
        let stops = parse_colormap(text);

        let elevations: Vec<f64> = stops.iter().map(|s| s.elevation).collect();
        assert_eq!(elevations, vec![-100.0, 100.0]);
        assert_eq!(stops[0].color, Rgb::new(0, 0, 128));
        assert_eq!(stops[0].label, None);
    }

    #[test]
    fn test_short_and_out_of_range_lines_are_dropped() {
        let text = "0,0,0,0\n10,256,0,0,255\n20,0,0,0,-1\nNaN,1,1,1,255\n30,1,2,3,4\n";
        let stops = parse_colormap(text);

        assert_eq!(stops.len(), 1);
        assert_eq!(stops[0].elevation, 30.0);
        assert_eq!(stops[0].alpha, 4);
    }

    #[test]
    fn test_duplicate_elevations_keep_file_order() {
        let text = "500,1,1,1,255\n100,0,0,0,255\n500,2,2,2,255\n";
        let stops = parse_colormap(text);

        let colours: Vec<Rgb> = stops.iter().map(|s| s.color).collect();
        assert_eq!(
            colours,
            vec![Rgb::new(0, 0, 0), Rgb::new(1, 1, 1), Rgb::new(2, 2, 2)]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_colormap("").is_empty());
        assert!(parse_colormap("# nothing here\n").is_empty());
    }
}
