//! Fixed-grid quadrature rules on a uniform partition of [a, b].
//!
//! Every rule comes in two flavours: an infallible one taking `Fn(f64) -> f64`
//! and a `try_*` one taking `Fn(f64) -> Result<f64, E>` which stops at the first
//! failed evaluation and hands the integrand's error back untouched.
//! Sums are accumulated node by node in increasing index order so that two runs
//! with the same input give bit-identical results.
//!
//! ```
//! use RustedQuadrature::numerical::quadrature::{simpson, trapezoid, QuadratureRule};
//! let f = |x: f64| x.powi(3);
//! let s = simpson(0.0, 2.0, 10, &f);
//! assert!((s - 4.0).abs() < 1e-9);
//! let t = QuadratureRule::Trapezoid.apply(0.0, 2.0, 10, &f);
//! assert_eq!(t, trapezoid(0.0, 2.0, 10, &f));
//! ```
use std::convert::Infallible;
use strum_macros::{Display, EnumIter, EnumString};

/// rules compared by the driver, in the order they appear in every result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
pub enum QuadratureRule {
    LeftRect,
    MidRect,
    Trapezoid,
    Simpson,
}

impl QuadratureRule {
    pub fn apply<F>(&self, a: f64, b: f64, n: usize, f: F) -> f64
    where
        F: Fn(f64) -> f64,
    {
        match self {
            QuadratureRule::LeftRect => left_rect(a, b, n, f),
            QuadratureRule::MidRect => mid_rect(a, b, n, f),
            QuadratureRule::Trapezoid => trapezoid(a, b, n, f),
            QuadratureRule::Simpson => simpson(a, b, n, f),
        }
    }

    pub fn try_apply<F, E>(&self, a: f64, b: f64, n: usize, f: F) -> Result<f64, E>
    where
        F: Fn(f64) -> Result<f64, E>,
    {
        match self {
            QuadratureRule::LeftRect => try_left_rect(a, b, n, f),
            QuadratureRule::MidRect => try_mid_rect(a, b, n, f),
            QuadratureRule::Trapezoid => try_trapezoid(a, b, n, f),
            QuadratureRule::Simpson => try_simpson(a, b, n, f),
        }
    }

    /// partition count the rule actually works with (Simpson rounds odd n up)
    pub fn effective_n(&self, n: usize) -> usize {
        match self {
            QuadratureRule::Simpson => simpson_partitions(n),
            _ => n,
        }
    }

    /// theoretical convergence order k in O(h^k) for a smooth integrand
    pub fn order(&self) -> u32 {
        match self {
            QuadratureRule::LeftRect => 1,
            QuadratureRule::MidRect | QuadratureRule::Trapezoid => 2,
            QuadratureRule::Simpson => 4,
        }
    }
}

/// Simpson needs an even number of sub-intervals: odd n becomes n + 1
pub fn simpson_partitions(n: usize) -> usize {
    if n % 2 != 0 { n + 1 } else { n }
}

fn step(a: f64, b: f64, n: usize) -> f64 {
    (b - a) / n as f64
}

fn into_value(res: Result<f64, Infallible>) -> f64 {
    match res {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

//////////////////////////////////////////////////////////////////////////////////////
//                 FALLIBLE RULES
//////////////////////////////////////////////////////////////////////////////////////

pub fn try_left_rect<F, E>(a: f64, b: f64, n: usize, f: F) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let h = step(a, b, n);
    let mut s = 0.0;
    for i in 0..n {
        s += f(a + i as f64 * h)?;
    }
    Ok(s * h)
}

pub fn try_right_rect<F, E>(a: f64, b: f64, n: usize, f: F) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let h = step(a, b, n);
    let mut s = 0.0;
    for i in 1..=n {
        s += f(a + i as f64 * h)?;
    }
    Ok(s * h)
}

pub fn try_mid_rect<F, E>(a: f64, b: f64, n: usize, f: F) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let h = step(a, b, n);
    let mut s = 0.0;
    for i in 0..n {
        s += f(a + (i as f64 + 0.5) * h)?;
    }
    Ok(s * h)
}

pub fn try_trapezoid<F, E>(a: f64, b: f64, n: usize, f: F) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let h = step(a, b, n);
    let mut s = 0.5 * (f(a)? + f(b)?);
    for i in 1..n {
        s += f(a + i as f64 * h)?;
    }
    Ok(s * h)
}

/// Composite Simpson rule. Odd `n` is rounded up before the step is computed,
/// see [`simpson_partitions`].
pub fn try_simpson<F, E>(a: f64, b: f64, n: usize, f: F) -> Result<f64, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let n = simpson_partitions(n);
    let h = step(a, b, n);
    let mut s = f(a)? + f(b)?;
    // odd nodes carry weight 4
    for i in (1..n).step_by(2) {
        s += 4.0 * f(a + i as f64 * h)?;
    }
    // interior even nodes carry weight 2
    for i in (2..n).step_by(2) {
        s += 2.0 * f(a + i as f64 * h)?;
    }
    Ok(s * h / 3.0)
}

//////////////////////////////////////////////////////////////////////////////////////
//                 INFALLIBLE RULES
//////////////////////////////////////////////////////////////////////////////////////

/// left-rectangle rule: samples the left edge of every sub-interval
pub fn left_rect<F>(a: f64, b: f64, n: usize, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    into_value(try_left_rect(a, b, n, |x| Ok(f(x))))
}

/// right-rectangle rule: samples the right edge of every sub-interval
pub fn right_rect<F>(a: f64, b: f64, n: usize, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    into_value(try_right_rect(a, b, n, |x| Ok(f(x))))
}

pub fn mid_rect<F>(a: f64, b: f64, n: usize, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    into_value(try_mid_rect(a, b, n, |x| Ok(f(x))))
}

pub fn trapezoid<F>(a: f64, b: f64, n: usize, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    into_value(try_trapezoid(a, b, n, |x| Ok(f(x))))
}

pub fn simpson<F>(a: f64, b: f64, n: usize, f: F) -> f64
where
    F: Fn(f64) -> f64,
{
    into_value(try_simpson(a, b, n, |x| Ok(f(x))))
}

///////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////
