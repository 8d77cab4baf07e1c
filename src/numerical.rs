/// fixed-grid quadrature rules: left/right/midpoint rectangles, trapezoid and Simpson
///  Example#1
/// ```
/// use RustedQuadrature::numerical::quadrature::{simpson, trapezoid};
/// let s = simpson(0.0, 1.0, 100, |x: f64| x.cosh());
/// let t = trapezoid(0.0, 1.0, 100, |x: f64| x.cosh());
/// assert!((s - 1.0_f64.sinh()).abs() < (t - 1.0_f64.sinh()).abs());
/// ```
pub mod quadrature;
/// run every rule on every partition count and collect the results
///  Example#1
/// ```
/// use RustedQuadrature::numerical::quadrature_compare::compare;
/// let results = compare(0.0, 1.0, &[10, 1000], |x: f64| x * x, Some(1.0 / 3.0));
/// assert_eq!(results.len(), 8);
/// ```
pub mod quadrature_compare;
/// built-in integrands with exact values, and run presets
pub mod integrands;
