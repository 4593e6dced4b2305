//! Turning resolved documents into probability tables.

use serde::{Deserialize, Serialize};
use tracing::warn;

use qbench_hal::Histogram;
use qbench_schemes::{
    CircuitRole, QuasiDistribution, compute_probabilities_from_direct_sum_distributions,
    compute_probabilities_from_direct_sum_measurements,
    compute_probabilities_from_postselection_distributions,
    compute_probabilities_from_postselection_measurements,
};

use crate::document::{FourierDiscriminationResult, SingleResult};
use crate::error::{FourierError, FourierResult};
use crate::experiment::Method;
use crate::probability::discrimination_probability_upper_bound;

/// One `(pair, angle)` trial reduced to its probabilities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabulatedRow {
    /// Target qubit of the trial.
    pub target: u32,
    /// Ancilla qubit of the trial.
    pub ancilla: u32,
    /// Angle of the trial.
    pub phi: f64,
    /// Closed-form bound an ideal device would reach at this angle.
    pub ideal_prob: f64,
    /// Discrimination probability estimated from the raw histograms.
    pub disc_prob: f64,
    /// Estimate from the mitigated histograms, when every circuit of the
    /// trial carries one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mit_disc_prob: Option<f64>,
}

/// Tabulate a resolved document into one row per `(pair, angle)` trial.
///
/// Rows follow document order: grouped by pair, angles ascending. A trial
/// whose histograms cannot be interpreted is logged with its coordinates and
/// skipped; the remaining trials still tabulate. Tabulating a document that
/// still holds job references is an error.
pub fn tabulate_results(result: &FourierDiscriminationResult) -> FourierResult<Vec<TabulatedRow>> {
    let singles = result.single_results().ok_or(FourierError::NotResolved)?;
    let method = result.metadata.experiments.method;

    let mut rows = Vec::with_capacity(singles.len());
    for single in singles {
        match tabulate_single(single, method) {
            Ok(row) => rows.push(row),
            Err(error) => warn!(
                "Skipping trial (target {}, ancilla {}, phi {}): {}",
                single.target, single.ancilla, single.phi, error
            ),
        }
    }
    Ok(rows)
}

fn tabulate_single(single: &SingleResult, method: Method) -> FourierResult<TabulatedRow> {
    let disc_prob = match method {
        Method::Postselection => compute_probabilities_from_postselection_measurements(
            histogram_for(single, CircuitRole::IdV0)?,
            histogram_for(single, CircuitRole::IdV1)?,
            histogram_for(single, CircuitRole::UV0)?,
            histogram_for(single, CircuitRole::UV1)?,
        )?,
        Method::DirectSum => compute_probabilities_from_direct_sum_measurements(
            histogram_for(single, CircuitRole::Id)?,
            histogram_for(single, CircuitRole::U)?,
        )?,
    };

    Ok(TabulatedRow {
        target: single.target,
        ancilla: single.ancilla,
        phi: single.phi,
        ideal_prob: discrimination_probability_upper_bound(single.phi),
        disc_prob,
        mit_disc_prob: mitigated_probability(single, method)?,
    })
}

fn histogram_for(single: &SingleResult, role: CircuitRole) -> FourierResult<&Histogram> {
    single
        .results_per_circuit
        .iter()
        .find(|entry| entry.name == role)
        .map(|entry| &entry.histogram)
        .ok_or_else(|| {
            FourierError::InvalidExperiment(format!("trial carries no {role} histogram"))
        })
}

/// Interpret the mitigated quasi-histograms of a trial, if every role has
/// one.
fn mitigated_probability(single: &SingleResult, method: Method) -> FourierResult<Option<f64>> {
    let mitigated: Option<Vec<&QuasiDistribution>> = method
        .roles()
        .iter()
        .map(|role| {
            single
                .results_per_circuit
                .iter()
                .find(|entry| entry.name == *role)
                .and_then(|entry| entry.mitigated_histogram.as_ref())
        })
        .collect();
    let Some(mitigated) = mitigated else {
        return Ok(None);
    };

    let probability = match method {
        Method::Postselection => compute_probabilities_from_postselection_distributions(
            mitigated[0],
            mitigated[1],
            mitigated[2],
            mitigated[3],
        )?,
        Method::DirectSum => {
            compute_probabilities_from_direct_sum_distributions(mitigated[0], mitigated[1])?
        }
    };
    Ok(Some(probability))
}
