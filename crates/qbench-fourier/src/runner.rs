//! Experiment orchestration.
//!
//! [`run_experiment`] expands an experiment set into circuits, splits them
//! into backend-sized batches and either runs them to completion
//! (synchronous descriptions) or submits them and records job references
//! (asynchronous descriptions). [`fetch_statuses`] reports job progress on
//! an unresolved document; [`resolve_results`] turns it into histogram form
//! once every job has finished.

use std::collections::BTreeMap;

use tracing::{debug, info};

use qbench_hal::{Backend, BackendDescription, Histogram, JobStatus, batch_circuits_with_keys};
use qbench_ir::Circuit;
use qbench_schemes::{
    CircuitRole, SchemeError, assemble_direct_sum_circuits, assemble_postselection_circuits,
    mitigate_counts,
};

use crate::components::FourierComponents;
use crate::document::{
    BatchRecord, CircuitKey, FourierDiscriminationResult, MitigationInfo, ResultData,
    ResultForCircuit, ResultMetadata, SingleResult,
};
use crate::error::{FourierError, FourierResult};
use crate::experiment::{FourierExperimentSet, Method};

/// Run (or submit) a full experiment set on a backend.
///
/// Each `(pair, angle)` trial contributes one circuit per method role, all
/// bound to the configured gateset. The expanded sequence is split to honor
/// the backend's batch limit. For a synchronous description the returned
/// document holds measured histograms, with a mitigated quasi-histogram
/// attached wherever the backend publishes readout calibration for both
/// qubits of a pair. For an asynchronous description the document holds one
/// batch record per submitted job; persist it and finish later with
/// [`resolve_results`].
pub async fn run_experiment(
    backend: &dyn Backend,
    experiments: &FourierExperimentSet,
    description: &BackendDescription,
) -> FourierResult<FourierDiscriminationResult> {
    experiments.validate()?;
    info!(
        "Running {} discrimination on {}: {} pair(s), {} angle(s), {} circuits",
        experiments.method,
        backend.name(),
        experiments.qubits.len(),
        experiments.angles.num_steps,
        experiments.num_circuits()
    );

    let keyed = assemble_keyed_circuits(experiments)?;
    let batches = batch_circuits_with_keys(keyed, backend.max_batch_size());
    debug!("Workload split into {} batch(es)", batches.len());

    let data = if description.asynchronous {
        let mut records = Vec::with_capacity(batches.len());
        for batch in batches {
            let job_id = backend
                .submit(&batch.circuits, experiments.num_shots)
                .await?;
            debug!("Submitted job {} covering {} circuit(s)", job_id, batch.len());
            records.push(BatchRecord {
                job_id,
                keys: batch.keys,
            });
        }
        info!(
            "Submitted {} job(s); document holds references for later resolution",
            records.len()
        );
        ResultData::BatchRecords(records)
    } else {
        let mut scattered = Vec::with_capacity(experiments.num_circuits());
        for batch in batches {
            let histograms = backend
                .run(&batch.circuits, experiments.num_shots)
                .await?;
            check_histogram_count(batch.keys.len(), histograms.len())?;
            scattered.extend(batch.keys.into_iter().zip(histograms));
        }
        info!("Collected histograms for {} circuit(s)", scattered.len());
        ResultData::SingleResults(collect_single_results(scattered, backend)?)
    };

    Ok(FourierDiscriminationResult {
        metadata: ResultMetadata {
            experiments: experiments.clone(),
            backend_description: description.clone(),
        },
        data,
    })
}

/// Count the jobs of an unresolved document by status name.
///
/// Returns a map like `{"Completed": 3, "Queued": 1}`. Asking for statuses
/// of a document that already holds histograms is an error.
pub async fn fetch_statuses(
    backend: &dyn Backend,
    result: &FourierDiscriminationResult,
) -> FourierResult<BTreeMap<String, usize>> {
    let records = result
        .batch_records()
        .ok_or(FourierError::AlreadyResolved)?;

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        let status = backend.status(&record.job_id).await?;
        *counts.entry(status.name().to_string()).or_insert(0) += 1;
    }
    Ok(counts)
}

/// Resolve a job-reference document into histogram form, in place.
///
/// A document that already holds histograms is left as-is. Otherwise every
/// referenced job is status-checked before anything is retrieved: a failed
/// or cancelled job aborts resolution fatally, and pending jobs produce a
/// retryable [`FourierError::JobsNotReady`] listing their ids. Histograms
/// are scattered back to circuits through each record's key list and
/// mitigation is attached exactly as in the synchronous path. On any error
/// the document is left byte-for-byte unchanged.
pub async fn resolve_results(
    result: &mut FourierDiscriminationResult,
    backend: &dyn Backend,
) -> FourierResult<()> {
    let records = match &result.data {
        ResultData::SingleResults(_) => return Ok(()),
        ResultData::BatchRecords(records) => records,
    };

    let mut pending = Vec::new();
    for record in records {
        match backend.status(&record.job_id).await? {
            JobStatus::Completed => {}
            JobStatus::Failed(reason) => {
                return Err(FourierError::JobFailed {
                    job_id: record.job_id.to_string(),
                    reason,
                });
            }
            JobStatus::Cancelled => {
                return Err(FourierError::JobFailed {
                    job_id: record.job_id.to_string(),
                    reason: "job was cancelled".into(),
                });
            }
            status => {
                debug!("Job {} still {}", record.job_id, status.name());
                pending.push(record.job_id.to_string());
            }
        }
    }
    if !pending.is_empty() {
        return Err(FourierError::JobsNotReady(pending));
    }

    let mut scattered = Vec::new();
    for record in records {
        let histograms = backend.retrieve(&record.job_id).await?;
        check_histogram_count(record.keys.len(), histograms.len())?;
        scattered.extend(record.keys.iter().copied().zip(histograms));
    }
    info!(
        "Resolved {} job(s) into {} histogram(s)",
        records.len(),
        scattered.len()
    );

    result.data = ResultData::SingleResults(collect_single_results(scattered, backend)?);
    Ok(())
}

/// Expand an experiment set into `(key, circuit)` pairs in execution order:
/// pairs in configured order, angles ascending, method roles within a trial.
fn assemble_keyed_circuits(
    experiments: &FourierExperimentSet,
) -> FourierResult<Vec<(CircuitKey, Circuit)>> {
    let mut keyed = Vec::with_capacity(experiments.num_circuits());
    for (pair, phi) in experiments.enumerate_experiment_labels() {
        let components = FourierComponents::new(phi, experiments.gateset)?;
        let named: Vec<(CircuitRole, Circuit)> = match experiments.method {
            Method::Postselection => assemble_postselection_circuits(
                pair.target,
                pair.ancilla,
                components.state_preparation(),
                components.u_dag(),
                components.v0_dag(),
                components.v1_dag(),
            )?
            .into_named()
            .into(),
            Method::DirectSum => assemble_direct_sum_circuits(
                pair.target,
                pair.ancilla,
                components.state_preparation(),
                components.u_dag(),
                components.v0_v1_dag(),
            )?
            .into_named()
            .into(),
        };
        for (role, circuit) in named {
            keyed.push((
                CircuitKey::new(pair.target, pair.ancilla, role, phi),
                circuit,
            ));
        }
    }
    Ok(keyed)
}

fn check_histogram_count(expected: usize, got: usize) -> FourierResult<()> {
    if got != expected {
        return Err(SchemeError::HistogramCountMismatch { expected, got }.into());
    }
    Ok(())
}

/// Group keyed histograms into per-trial records, first occurrence of each
/// `(pair, angle)` deciding the order, and attach mitigation where the
/// backend publishes calibration for both qubits.
fn collect_single_results(
    scattered: Vec<(CircuitKey, Histogram)>,
    backend: &dyn Backend,
) -> FourierResult<Vec<SingleResult>> {
    let mut singles: Vec<SingleResult> = Vec::new();
    for (key, histogram) in scattered {
        let entry = result_for_circuit(key, histogram, backend)?;
        match singles
            .iter_mut()
            .find(|single| (single.target, single.ancilla, single.phi) == key.trial())
        {
            Some(single) => single.results_per_circuit.push(entry),
            None => singles.push(SingleResult {
                target: key.target(),
                ancilla: key.ancilla(),
                phi: key.phi(),
                results_per_circuit: vec![entry],
            }),
        }
    }
    Ok(singles)
}

fn result_for_circuit(
    key: CircuitKey,
    histogram: Histogram,
    backend: &dyn Backend,
) -> FourierResult<ResultForCircuit> {
    let calibration = backend
        .readout_error(key.target())
        .zip(backend.readout_error(key.ancilla()));
    let (mitigation_info, mitigated_histogram) = match calibration {
        Some((target, ancilla)) => {
            let mitigated = mitigate_counts(&histogram, &target, &ancilla)?;
            (Some(MitigationInfo { target, ancilla }), Some(mitigated))
        }
        None => (None, None),
    };
    Ok(ResultForCircuit {
        name: key.role(),
        histogram,
        mitigation_info,
        mitigated_histogram,
    })
}
