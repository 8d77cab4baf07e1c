use crate::numerical::quadrature::QuadratureRule;
use crate::numerical::quadrature_compare::ResultSet;
use log::{info, warn};
use plotters::prelude::*;
use std::error::Error;
use std::path::Path;

/// (n, abs error) points of every rule that has at least one defined, non-zero error.
/// Zero errors cannot be drawn on a log axis and are left out.
pub fn error_series(results: &ResultSet) -> Vec<(QuadratureRule, Vec<(f64, f64)>)> {
    results
        .rules()
        .into_iter()
        .filter_map(|rule| {
            let points: Vec<(f64, f64)> = results
                .for_rule(rule)
                .iter()
                .filter_map(|r| r.abs_err.filter(|&e| e > 0.0).map(|e| (r.n as f64, e)))
                .collect();
            if points.is_empty() {
                warn!("{}: no defined error to plot", rule);
                None
            } else {
                Some((rule, points))
            }
        })
        .collect()
}

/// (n, value) points of every rule; values are always defined
pub fn value_series(results: &ResultSet) -> Vec<(QuadratureRule, Vec<(f64, f64)>)> {
    results
        .rules()
        .into_iter()
        .map(|rule| {
            let points: Vec<(f64, f64)> = results
                .for_rule(rule)
                .iter()
                .map(|r| (r.n as f64, r.value))
                .collect();
            (rule, points)
        })
        .collect()
}

/// x range padded like [`bounds`], y range padded linearly (values may be negative or equal)
fn value_bounds(series: &[(QuadratureRule, Vec<(f64, f64)>)]) -> ((f64, f64), (f64, f64)) {
    let ((x_min, x_max), _) = bounds(series);
    let ys = series.iter().flat_map(|(_, p)| p.iter().map(|&(_, y)| y));
    let (y_min, y_max) = ys.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), y| {
        (lo.min(y), hi.max(y))
    });
    let pad = if y_max > y_min {
        0.05 * (y_max - y_min)
    } else {
        0.05 * y_max.abs().max(1.0)
    };
    ((x_min, x_max), (y_min - pad, y_max + pad))
}

fn bounds(series: &[(QuadratureRule, Vec<(f64, f64)>)]) -> ((f64, f64), (f64, f64)) {
    let points = series.iter().flat_map(|(_, p)| p.iter());
    let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
    for &(x, y) in points {
        x_min = x_min.min(x);
        x_max = x_max.max(x);
        y_min = y_min.min(y);
        y_max = y_max.max(y);
    }
    // a single n would give an empty axis range
    ((x_min * 0.5, x_max * 2.0), (y_min * 0.5, y_max * 2.0))
}

/// log-log plot of the absolute error against n, one line per rule
pub fn plot_errors(results: &ResultSet, filename: &Path) -> Result<(), Box<dyn Error>> {
    let series = error_series(results);
    if series.is_empty() {
        return Err("nothing to plot: no rule has a defined absolute error".into());
    }
    let ((x_min, x_max), (y_min, y_max)) = bounds(&series);

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption("Absolute error vs n", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d((x_min..x_max).log_scale(), (y_min..y_max).log_scale())?;

    chart
        .configure_mesh()
        .x_desc("n")
        .y_desc("abs error")
        .y_label_formatter(&|y| format!("{:.0e}", y))
        .draw()?;

    for (idx, (rule, points)) in series.into_iter().enumerate() {
        let color = Palette99::pick(idx);
        chart
            .draw_series(LineSeries::new(points.clone(), &color))?
            .label(rule.to_string())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(idx))
            });
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    info!("error plot saved to: {}", filename.display());
    Ok(())
}

/// integral value against n (log x axis), one line per rule
pub fn plot_values(results: &ResultSet, filename: &Path) -> Result<(), Box<dyn Error>> {
    let series = value_series(results);
    if series.is_empty() {
        return Err("nothing to plot: the result set is empty".into());
    }
    let ((x_min, x_max), (y_min, y_max)) = value_bounds(&series);

    let root_area = BitMapBackend::new(filename, (800, 600)).into_drawing_area();
    root_area.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root_area)
        .caption("Integral value vs n", ("sans-serif", 40))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(90)
        .build_cartesian_2d((x_min..x_max).log_scale(), y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("n")
        .y_desc("value")
        .y_label_formatter(&|y| format!("{:.6}", y))
        .draw()?;

    for (idx, (rule, points)) in series.into_iter().enumerate() {
        let color = Palette99::pick(idx);
        chart
            .draw_series(LineSeries::new(points.clone(), &color))?
            .label(rule.to_string())
            .legend(move |(x, y)| {
                PathElement::new(vec![(x, y), (x + 20, y)], &Palette99::pick(idx))
            });
        chart.draw_series(points.into_iter().map(|p| Circle::new(p, 3, color.filled())))?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()?;
    root_area.present()?;
    info!("value plot saved to: {}", filename.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::quadrature_compare::{MethodResult, compare};

    #[test]
    fn test_error_series_skips_undefined_errors() {
        let results = compare(0.0, 1.0, &[10, 100], |x: f64| x.cosh(), None);
        assert!(error_series(&results).is_empty());
        let dir = tempfile::tempdir().unwrap();
        assert!(plot_errors(&results, &dir.path().join("errors.png")).is_err());
    }

    #[test]
    fn test_error_series_drops_zero_errors() {
        let results = ResultSet::from_records(vec![
            MethodResult::new(QuadratureRule::Simpson, 2, 4.0, Some(4.0)),
            MethodResult::new(QuadratureRule::Simpson, 4, 4.0, Some(4.0)),
            MethodResult::new(QuadratureRule::Trapezoid, 2, 5.0, Some(4.0)),
        ]);
        let series = error_series(&results);
        assert_eq!(series.len(), 1);
        assert_eq!(series[0].0, QuadratureRule::Trapezoid);
        assert_eq!(series[0].1, vec![(2.0, 1.0)]);
    }

    #[test]
    fn test_error_series_points() {
        let results = compare(0.0, 1.0, &[10, 100, 1000], |x: f64| x.cosh(), Some(1.0_f64.sinh()));
        let series = error_series(&results);
        assert_eq!(series.len(), 4);
        for (_, points) in &series {
            let ns: Vec<f64> = points.iter().map(|p| p.0).collect();
            assert!(ns.windows(2).all(|w| w[0] < w[1]));
        }
        let ((x_min, x_max), (y_min, y_max)) = bounds(&series);
        assert!(x_min < 10.0 && x_max > 1000.0);
        assert!(y_min > 0.0 && y_min < y_max);
    }

    #[test]
    fn test_value_series_keeps_every_record() {
        // no exact value: the error plot has nothing, the value plot has every rule
        let results = compare(0.0, 1.0, &[10, 100], |_x: f64| 0.5, None);
        let series = value_series(&results);
        assert_eq!(series.len(), 4);
        for (_, points) in &series {
            assert_eq!(points.len(), 2);
            assert!(points.iter().all(|&(_, v)| (v - 0.5).abs() < 1e-12));
        }
        let (_, (y_min, y_max)) = value_bounds(&series);
        assert!(y_min < 0.5 && y_max > 0.5);
    }

    #[test]
    fn test_plot_values_renders_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("value_vs_n.png");
        let results = compare(0.0, 1.0, &[10, 100, 1000], |x: f64| x.cosh(), None);
        plot_values(&results, &path).unwrap();
        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
        assert!(plot_values(&ResultSet::default(), &dir.path().join("empty.png")).is_err());
    }
}
