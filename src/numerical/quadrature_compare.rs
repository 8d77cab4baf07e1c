//! Runs every compared quadrature rule over a list of partition counts and measures each
//! approximation against an (optional) exact value.
//!
//! ```
//! use RustedQuadrature::numerical::quadrature_compare::compare;
//! let exact = 1.0_f64.sinh();
//! let results = compare(0.0, 1.0, &[10, -5, 0, 1000], |x: f64| x.cosh(), Some(exact));
//! // 2 retained counts x 4 rules
//! assert_eq!(results.len(), 8);
//! assert!(results.iter().all(|r| r.abs_err.is_some()));
//! ```
use crate::Utils::timer::elapsed_time;
use crate::numerical::quadrature::QuadratureRule;
use itertools::Itertools;
use log::{debug, info};
use rayon::prelude::*;
use std::ops::Deref;
use std::time::Instant;
use strum::IntoEnumIterator;

/// one approximation: which rule, with how many sub-intervals, what it gave and how far it is
/// from the exact value. `abs_err` is `None` when no exact value was available.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MethodResult {
    pub rule: QuadratureRule,
    pub n: usize,
    pub value: f64,
    pub abs_err: Option<f64>,
}

impl MethodResult {
    pub fn new(rule: QuadratureRule, n: usize, value: f64, exact: Option<f64>) -> MethodResult {
        MethodResult {
            rule,
            n,
            value,
            abs_err: exact.map(|exact| (value - exact).abs()),
        }
    }

    pub fn name(&self) -> String {
        self.rule.to_string()
    }
}

/// Ordered records of one comparison run: for each retained partition count (in the order
/// given by the caller) one record per rule in the fixed rule order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultSet {
    records: Vec<MethodResult>,
}

impl ResultSet {
    pub fn from_records(records: Vec<MethodResult>) -> ResultSet {
        ResultSet { records }
    }

    pub fn for_rule(&self, rule: QuadratureRule) -> Vec<MethodResult> {
        self.records
            .iter()
            .filter(|r| r.rule == rule)
            .copied()
            .collect()
    }

    /// copy keeping only the listed rules, order of the remaining records unchanged
    pub fn retain_rules(&self, rules: &[QuadratureRule]) -> ResultSet {
        let records = self
            .records
            .iter()
            .filter(|r| rules.contains(&r.rule))
            .copied()
            .collect();
        ResultSet { records }
    }

    /// rules present in the set, in order of first appearance
    pub fn rules(&self) -> Vec<QuadratureRule> {
        self.records.iter().map(|r| r.rule).unique().collect()
    }

    /// Empirical convergence order between consecutive records of one rule:
    /// p = ln(e1/e2) / ln(n2/n1).
    /// Entry i belongs to the (i, i+1) pair and is `None` when an error is undefined or zero
    /// or when n did not change.
    pub fn observed_orders(&self, rule: QuadratureRule) -> Vec<Option<f64>> {
        self.for_rule(rule)
            .iter()
            .tuple_windows()
            .map(|(first, second)| observed_order(first, second))
            .collect()
    }
}

fn observed_order(first: &MethodResult, second: &MethodResult) -> Option<f64> {
    let (e1, e2) = (first.abs_err?, second.abs_err?);
    if e1 == 0.0 || e2 == 0.0 || first.n == second.n {
        return None;
    }
    Some((e1 / e2).ln() / (second.n as f64 / first.n as f64).ln())
}

impl Deref for ResultSet {
    type Target = [MethodResult];
    fn deref(&self) -> &[MethodResult] {
        &self.records
    }
}

impl IntoIterator for ResultSet {
    type Item = MethodResult;
    type IntoIter = std::vec::IntoIter<MethodResult>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a MethodResult;
    type IntoIter = std::slice::Iter<'a, MethodResult>;
    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// drops non-positive partition counts, keeps the order of the rest
pub fn retained_partitions(partition_counts: &[i64]) -> Vec<usize> {
    let mut retained = Vec::with_capacity(partition_counts.len());
    let mut dropped = Vec::new();
    for &n in partition_counts {
        match usize::try_from(n) {
            Ok(n) if n > 0 => retained.push(n),
            _ => dropped.push(n),
        }
    }
    if !dropped.is_empty() {
        debug!("skipping partition counts that are not positive or do not fit usize {:?}", dropped);
    }
    retained
}

/// (rule, n) pairs in result-set order
fn jobs(partitions: &[usize]) -> Vec<(QuadratureRule, usize)> {
    partitions
        .iter()
        .flat_map(|&n| QuadratureRule::iter().map(move |rule| (rule, n)))
        .collect()
}

fn log_run(partitions: &[usize], records: usize, start: Instant) {
    let (unit, time) = elapsed_time(start.elapsed());
    info!(
        "compared {} rules over n = [{}]: {} records in {}{}",
        QuadratureRule::iter().count(),
        partitions.iter().join(", "),
        records,
        time,
        unit
    );
}

/// Compare all rules on [a, b] for every positive count in `partition_counts`.
/// Simpson records carry the even n actually used.
pub fn compare<F>(
    a: f64,
    b: f64,
    partition_counts: &[i64],
    f: F,
    exact: Option<f64>,
) -> ResultSet
where
    F: Fn(f64) -> f64,
{
    let start = Instant::now();
    let partitions = retained_partitions(partition_counts);
    let records: Vec<MethodResult> = jobs(&partitions)
        .into_iter()
        .map(|(rule, n)| {
            let value = rule.apply(a, b, n, &f);
            MethodResult::new(rule, rule.effective_n(n), value, exact)
        })
        .collect();
    log_run(&partitions, records.len(), start);
    ResultSet { records }
}

/// Same as [`compare`] for a fallible integrand: the first evaluation error stops the run
/// and is returned as is.
pub fn try_compare<F, E>(
    a: f64,
    b: f64,
    partition_counts: &[i64],
    f: F,
    exact: Option<f64>,
) -> Result<ResultSet, E>
where
    F: Fn(f64) -> Result<f64, E>,
{
    let start = Instant::now();
    let partitions = retained_partitions(partition_counts);
    let mut records = Vec::with_capacity(partitions.len() * QuadratureRule::iter().count());
    for (rule, n) in jobs(&partitions) {
        let value = rule.try_apply(a, b, n, &f)?;
        records.push(MethodResult::new(rule, rule.effective_n(n), value, exact));
    }
    log_run(&partitions, records.len(), start);
    Ok(ResultSet { records })
}

/// [`compare`] with the (rule, n) pairs spread over the rayon pool. Each kernel still sums
/// sequentially, so the result is identical to the sequential run.
pub fn compare_parallel<F>(
    a: f64,
    b: f64,
    partition_counts: &[i64],
    f: F,
    exact: Option<f64>,
) -> ResultSet
where
    F: Fn(f64) -> f64 + Sync,
{
    let start = Instant::now();
    let partitions = retained_partitions(partition_counts);
    let records: Vec<MethodResult> = jobs(&partitions)
        .into_par_iter()
        .map(|(rule, n)| {
            let value = rule.apply(a, b, n, &f);
            MethodResult::new(rule, rule.effective_n(n), value, exact)
        })
        .collect();
    log_run(&partitions, records.len(), start);
    ResultSet { records }
}

///////////////////////////////////////////////////////////
// TESTS
//////////////////////////////////////////////////////////
