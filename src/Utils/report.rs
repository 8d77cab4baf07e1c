/*
Pretty tables over a comparison result set: the raw records and a convergence view with the
observed order of every rule between consecutive partition counts.
*/
use crate::numerical::quadrature_compare::ResultSet;
use log::info;
use tabled::{builder::Builder, settings::Style};

fn format_err(err: Option<f64>) -> String {
    err.map(|e| format!("{:.6e}", e)).unwrap_or_default()
}

pub fn results_table(results: &ResultSet) -> String {
    let mut builder = Builder::default();
    builder.push_record(["method", "n", "value", "abs error"].map(String::from));
    for r in results {
        builder.push_record([
            r.name(),
            r.n.to_string(),
            format!("{:.12}", r.value),
            format_err(r.abs_err),
        ]);
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

/// per rule: n, error and the observed order reached when coming from the previous n
pub fn convergence_table(results: &ResultSet) -> String {
    let mut builder = Builder::default();
    builder.push_record(
        ["method", "n", "abs error", "observed order", "expected order"].map(String::from),
    );
    for rule in results.rules() {
        let records = results.for_rule(rule);
        let orders = results.observed_orders(rule);
        for (i, r) in records.iter().enumerate() {
            let order = if i == 0 {
                String::new()
            } else {
                orders[i - 1].map(|p| format!("{:.3}", p)).unwrap_or_default()
            };
            builder.push_record([
                r.name(),
                r.n.to_string(),
                format_err(r.abs_err),
                order,
                rule.order().to_string(),
            ]);
        }
    }
    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.to_string()
}

pub fn log_report(results: &ResultSet) {
    info!("\n \n RESULTS \n \n {}", results_table(results));
    if results.iter().any(|r| r.abs_err.is_some()) {
        info!("\n \n CONVERGENCE \n \n {}", convergence_table(results));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::quadrature_compare::compare;

    #[test]
    fn test_results_table_lists_every_record() {
        let results = compare(0.0, 1.0, &[10, 100], |x: f64| x.cosh(), Some(1.0_f64.sinh()));
        let table = results_table(&results);
        for name in ["LeftRect", "MidRect", "Trapezoid", "Simpson"] {
            assert_eq!(table.matches(name).count(), 2, "{}", name);
        }
        assert!(table.contains("abs error"));
    }

    #[test]
    fn test_results_table_leaves_undefined_error_blank() {
        let results = compare(0.0, 1.0, &[10], |x: f64| x, None);
        let table = results_table(&results);
        assert!(!table.contains("NaN"));
        assert!(!table.contains("e-"));
    }

    #[test]
    fn test_convergence_table_shows_orders() {
        let results = compare(0.0, 1.0, &[10, 100], |x: f64| x.cosh(), Some(1.0_f64.sinh()));
        let table = convergence_table(&results);
        assert!(table.contains("observed order"));
        // trapezoid and midpoint converge with order ~2
        assert!(table.contains("2.00") || table.contains("1.99"));
    }
}
