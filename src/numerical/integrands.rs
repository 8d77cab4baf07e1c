//! a collection of built-in integrands with known antiderivatives (for testing and demonstration
//! of the quadrature rules), plus ready-made run presets
use crate::numerical::quadrature::QuadratureRule;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/*
 cosh:      f(x) = cosh(x)           F(x) = sinh(x)
 quad:      f(x) = x^2               F(x) = x^3/3
 exp:       f(x) = e^x               F(x) = e^x
 logistic:  f(x) = e^x / (1 + e^x)   F(x) = ln(1 + e^x)
 identity:  f(x) = x                 treated as a function without a reference value,
                                     so every absolute error comes out undefined
*/
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum IntegrandKind {
    Cosh,
    Quad,
    Exp,
    Logistic,
    Identity,
}

impl IntegrandKind {
    /// plain function pointer, handy where a `Fn(f64) -> f64 + Sync` is needed
    pub fn function(&self) -> fn(f64) -> f64 {
        match self {
            IntegrandKind::Cosh => f64::cosh,
            IntegrandKind::Quad => |x: f64| x * x,
            IntegrandKind::Exp => f64::exp,
            IntegrandKind::Logistic => |x: f64| x.exp() / (1.0 + x.exp()),
            IntegrandKind::Identity => |x: f64| x,
        }
    }

    /// exact value of the integral over [a, b], `None` when no reference is available
    pub fn exact(&self, a: f64, b: f64) -> Option<f64> {
        match self {
            IntegrandKind::Cosh => Some(b.sinh() - a.sinh()),
            IntegrandKind::Quad => Some((b * b * b - a * a * a) / 3.0),
            IntegrandKind::Exp => Some(b.exp() - a.exp()),
            IntegrandKind::Logistic => Some(b.exp().ln_1p() - a.exp().ln_1p()),
            IntegrandKind::Identity => None,
        }
    }

    pub fn formula(&self) -> &'static str {
        match self {
            IntegrandKind::Cosh => "cosh(x)",
            IntegrandKind::Quad => "x^2",
            IntegrandKind::Exp => "exp(x)",
            IntegrandKind::Logistic => "exp(x)/(1+exp(x))",
            IntegrandKind::Identity => "x",
        }
    }

    pub fn names() -> Vec<String> {
        IntegrandKind::iter().map(|k| k.to_string()).collect()
    }
}

/// partition counts used when the user gives none
pub const DEFAULT_PARTITIONS: [i64; 3] = [10, 1000, 100000];

/// Settings of one ready-made run: integrand, interval, partition counts, output file
/// and the rules shown in the report.
#[derive(Debug, Clone, PartialEq)]
pub struct PresetSettings {
    pub integrand: IntegrandKind,
    pub a: f64,
    pub b: f64,
    pub partitions: Vec<i64>,
    pub csv_path: PathBuf,
    pub display_rules: Vec<QuadratureRule>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Preset {
    /// any built-in integrand, cosh on [0, 1] by default
    Generic,
    /// cosh(x) on [0, 1]
    Variant15,
    /// e^x / (1 + e^x) on [0, 1], only trapezoid and Simpson are reported
    Variant22,
}

impl Preset {
    pub fn settings(&self) -> PresetSettings {
        let all_rules: Vec<QuadratureRule> = QuadratureRule::iter().collect();
        match self {
            Preset::Generic => PresetSettings {
                integrand: IntegrandKind::Cosh,
                a: 0.0,
                b: 1.0,
                partitions: DEFAULT_PARTITIONS.to_vec(),
                csv_path: PathBuf::from("results.csv"),
                display_rules: all_rules,
            },
            Preset::Variant15 => PresetSettings {
                integrand: IntegrandKind::Cosh,
                a: 0.0,
                b: 1.0,
                partitions: DEFAULT_PARTITIONS.to_vec(),
                csv_path: PathBuf::from("results_task15.csv"),
                display_rules: all_rules,
            },
            Preset::Variant22 => PresetSettings {
                integrand: IntegrandKind::Logistic,
                a: 0.0,
                b: 1.0,
                partitions: vec![10, 1000, 100000, 1000000],
                csv_path: PathBuf::from("results_task22.csv"),
                display_rules: vec![QuadratureRule::Trapezoid, QuadratureRule::Simpson],
            },
        }
    }
}
