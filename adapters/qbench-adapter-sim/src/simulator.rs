//! Simulator backend implementation.

use async_trait::async_trait;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Instant;
use tracing::{debug, instrument};
use uuid::Uuid;

use qbench_hal::{
    Backend, BackendConfig, BackendFactory, HalError, HalResult, Histogram, Job, JobId, JobStatus,
    ReadoutError,
};
use qbench_ir::Circuit;

use crate::statevector::Statevector;

/// Job data for the simulator.
struct SimJob {
    job: Job,
    histograms: Option<Vec<Histogram>>,
    /// Results computed at submission but not yet published, for jobs
    /// submitted while completion is held back.
    held: Option<Vec<Histogram>>,
}

/// Job store shared by every factory-created simulator in the process, so a
/// backend re-created from the same description still sees earlier jobs.
fn shared_jobs() -> Arc<Mutex<FxHashMap<String, SimJob>>> {
    static SHARED: OnceLock<Arc<Mutex<FxHashMap<String, SimJob>>>> = OnceLock::new();
    SHARED.get_or_init(Default::default).clone()
}

/// Local simulator backend.
///
/// This backend simulates quantum circuits using a statevector simulation.
/// It supports circuits up to ~20 qubits (limited by memory). Jobs complete
/// synchronously inside `submit()`, so `status()` reports `Completed` as soon
/// as submission returns.
///
/// Readout noise, submission failures, failing jobs and delayed completion
/// can be injected for testing the mitigation, resolution and recovery paths
/// of callers. [`SimulatorBackend::new`] gives each instance a private job
/// store; instances built through [`BackendFactory::from_config`] share one
/// process-wide store instead, matching providers whose jobs outlive a
/// single client object.
pub struct SimulatorBackend {
    /// Backend configuration.
    config: BackendConfig,
    /// Active jobs.
    jobs: Arc<Mutex<FxHashMap<String, SimJob>>>,
    /// Maximum number of qubits supported.
    max_qubits: u32,
    /// Maximum circuits accepted per submission.
    max_batch: Option<usize>,
    /// Readout error applied uniformly to every measured qubit.
    readout_error: Option<ReadoutError>,
    /// Number of upcoming submissions that fail on purpose.
    fail_submissions: AtomicU32,
    /// Submission indices whose jobs end up Failed instead of Completed.
    fail_jobs: Vec<usize>,
    /// Submissions accepted so far, for failure injection.
    submissions: AtomicUsize,
    /// While set, new jobs stay Queued until [`SimulatorBackend::release_jobs`].
    hold: AtomicBool,
}

impl SimulatorBackend {
    /// Create a new simulator backend with default settings.
    pub fn new() -> Self {
        Self {
            config: BackendConfig::new("simulator"),
            jobs: Arc::new(Mutex::new(FxHashMap::default())),
            max_qubits: 20,
            max_batch: None,
            readout_error: None,
            fail_submissions: AtomicU32::new(0),
            fail_jobs: Vec::new(),
            submissions: AtomicUsize::new(0),
            hold: AtomicBool::new(false),
        }
    }

    /// Set the maximum number of qubits.
    pub fn with_max_qubits(mut self, max_qubits: u32) -> Self {
        self.max_qubits = max_qubits;
        self
    }

    /// Limit the number of circuits accepted per submission.
    pub fn with_max_batch_size(mut self, max_batch: usize) -> Self {
        self.max_batch = Some(max_batch);
        self
    }

    /// Apply symmetric readout noise to every measured qubit.
    pub fn with_readout_error(mut self, prob_meas1_prep0: f64, prob_meas0_prep1: f64) -> Self {
        self.readout_error = Some(ReadoutError::new(prob_meas1_prep0, prob_meas0_prep1));
        self
    }

    /// Make the jobs at the given submission indices (0-based) fail instead
    /// of completing. The submission call itself still succeeds.
    pub fn with_failing_jobs(mut self, indices: impl IntoIterator<Item = usize>) -> Self {
        self.fail_jobs = indices.into_iter().collect();
        self
    }

    /// Make the next `count` calls to `submit()` fail.
    pub fn fail_next_submissions(&self, count: u32) {
        self.fail_submissions.store(count, Ordering::SeqCst);
    }

    /// Keep jobs submitted from now on in `Queued` until
    /// [`SimulatorBackend::release_jobs`] is called.
    pub fn hold_jobs(&self) {
        self.hold.store(true, Ordering::SeqCst);
    }

    /// Publish the results of all held jobs and stop holding new ones.
    pub fn release_jobs(&self) {
        self.hold.store(false, Ordering::SeqCst);
        let mut jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        for sim_job in jobs.values_mut() {
            if let Some(histograms) = sim_job.held.take() {
                sim_job.histograms = Some(histograms);
                sim_job.job = sim_job.job.clone().with_status(JobStatus::Completed);
            }
        }
    }

    /// Run simulation synchronously.
    #[instrument(skip(self, circuit))]
    fn run_simulation(&self, circuit: &Circuit, shots: u32) -> Histogram {
        use rand::Rng;

        let start = Instant::now();

        let num_qubits = circuit.num_qubits();
        debug!("Starting simulation: {} qubits, {} shots", num_qubits, shots);

        let mut sv = Statevector::new(num_qubits);
        for inst in circuit.instructions() {
            sv.apply(inst);
        }

        let measurements: Vec<(usize, usize)> = circuit
            .measurements()
            .map(|(q, c)| (q.0 as usize, c.0 as usize))
            .collect();

        let mut rng = rand::thread_rng();
        let mut histogram = Histogram::new();

        for _ in 0..shots {
            let outcome = sv.sample();
            let mut bits = vec!['0'; circuit.num_clbits()];
            for &(qubit, clbit) in &measurements {
                let mut bit = (outcome >> qubit) & 1;
                if let Some(noise) = &self.readout_error {
                    let r: f64 = rng.r#gen();
                    bit = match bit {
                        0 if r < noise.prob_meas1_prep0 => 1,
                        1 if r < noise.prob_meas0_prep1 => 0,
                        b => b,
                    };
                }
                bits[clbit] = if bit == 1 { '1' } else { '0' };
            }
            histogram.add(bits.into_iter().collect::<String>(), 1);
        }

        let elapsed = start.elapsed();
        debug!("Simulation completed in {:?}", elapsed);

        histogram
    }
}

impl Default for SimulatorBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for SimulatorBackend {
    fn name(&self) -> &str {
        &self.config.name
    }

    fn max_batch_size(&self) -> Option<usize> {
        self.max_batch
    }

    fn readout_error(&self, _qubit: u32) -> Option<ReadoutError> {
        self.readout_error
    }

    #[instrument(skip(self, circuits))]
    async fn submit(&self, circuits: &[Circuit], shots: u32) -> HalResult<JobId> {
        if self
            .fail_submissions
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(HalError::SubmissionFailed(
                "injected submission failure".into(),
            ));
        }

        if shots == 0 {
            return Err(HalError::InvalidShots("shots must be positive".into()));
        }
        if circuits.is_empty() {
            return Err(HalError::SubmissionFailed("empty circuit batch".into()));
        }
        if let Some(max) = self.max_batch {
            if circuits.len() > max {
                return Err(HalError::SubmissionFailed(format!(
                    "batch of {} circuits exceeds limit of {}",
                    circuits.len(),
                    max
                )));
            }
        }
        for circuit in circuits {
            if circuit.num_qubits() > self.max_qubits as usize {
                return Err(HalError::InvalidCircuit(format!(
                    "Circuit '{}' has {} qubits but simulator only supports {}",
                    circuit.name(),
                    circuit.num_qubits(),
                    self.max_qubits
                )));
            }
        }

        let index = self.submissions.fetch_add(1, Ordering::SeqCst);

        // Generate job ID
        let job_id = JobId::new(Uuid::new_v4().to_string());

        // Create job
        let job = Job::new(job_id.clone(), shots).with_backend("simulator");

        if self.fail_jobs.contains(&index) {
            let sim_job = SimJob {
                job: job.with_status(JobStatus::Failed("injected job failure".into())),
                histograms: None,
                held: None,
            };
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), sim_job);
            debug!("Submitted job: {} (injected failure)", job_id);
            return Ok(job_id);
        }

        let sim_job = SimJob {
            job,
            histograms: None,
            held: None,
        };

        // Store job
        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            jobs.insert(job_id.0.clone(), sim_job);
        }

        debug!("Submitted job: {} ({} circuits)", job_id, circuits.len());

        // Run every circuit immediately (in a real implementation, this
        // would be async); histograms keep the submission order.
        let histograms: Vec<Histogram> = circuits
            .iter()
            .map(|circuit| self.run_simulation(circuit, shots))
            .collect();

        // Publish results, or park them while completion is held back.
        {
            let mut jobs = self
                .jobs
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner);
            if let Some(sim_job) = jobs.get_mut(&job_id.0) {
                if self.hold.load(Ordering::SeqCst) {
                    sim_job.held = Some(histograms);
                } else {
                    sim_job.histograms = Some(histograms);
                    sim_job.job = sim_job.job.clone().with_status(JobStatus::Completed);
                }
            }
        }

        Ok(job_id)
    }

    async fn status(&self, job_id: &JobId) -> HalResult<JobStatus> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        jobs.get(&job_id.0)
            .map(|j| j.job.status.clone())
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))
    }

    async fn retrieve(&self, job_id: &JobId) -> HalResult<Vec<Histogram>> {
        let jobs = self
            .jobs
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let sim_job = jobs
            .get(&job_id.0)
            .ok_or_else(|| HalError::JobNotFound(job_id.0.clone()))?;
        if let JobStatus::Failed(reason) = &sim_job.job.status {
            return Err(HalError::JobFailed(reason.clone()));
        }
        sim_job
            .histograms
            .clone()
            .ok_or_else(|| HalError::JobNotReady(job_id.0.clone()))
    }
}

impl BackendFactory for SimulatorBackend {
    fn from_config(config: BackendConfig) -> HalResult<Self> {
        let as_f64 = |key: &str| {
            config
                .extra
                .get(key)
                .and_then(serde_json::Value::as_f64)
        };

        let max_qubits = config
            .extra
            .get("max_qubits")
            .and_then(serde_json::Value::as_u64)
            .map_or(20, |v| v as u32);

        let max_batch = config
            .extra
            .get("max_batch_size")
            .and_then(serde_json::Value::as_u64)
            .map(|v| v as usize);

        let prob_meas1_prep0 = as_f64("prob_meas1_prep0");
        let prob_meas0_prep1 = as_f64("prob_meas0_prep1");
        let readout_error = match (prob_meas1_prep0, prob_meas0_prep1) {
            (None, None) => None,
            (p10, p01) => Some(ReadoutError::new(
                p10.unwrap_or(0.0),
                p01.unwrap_or(0.0),
            )),
        };

        let fail_jobs = config
            .extra
            .get("fail_job_indices")
            .and_then(serde_json::Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(serde_json::Value::as_u64)
                    .map(|v| v as usize)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            config,
            jobs: shared_jobs(),
            max_qubits,
            max_batch,
            readout_error,
            fail_submissions: AtomicU32::new(0),
            fail_jobs,
            submissions: AtomicUsize::new(0),
            hold: AtomicBool::new(false),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qbench_ir::QubitId;

    fn bell_circuit() -> Circuit {
        let mut circuit = Circuit::new("bell", 2, 2);
        circuit.h(QubitId(0)).unwrap();
        circuit.cx(QubitId(0), QubitId(1)).unwrap();
        circuit.measure_all().unwrap();
        circuit
    }

    fn one_circuit() -> Circuit {
        let mut circuit = Circuit::new("one", 1, 1);
        circuit.x(QubitId(0)).unwrap();
        circuit.measure_all().unwrap();
        circuit
    }

    fn zero_circuit() -> Circuit {
        let mut circuit = Circuit::new("zero", 1, 1);
        circuit.measure_all().unwrap();
        circuit
    }

    #[tokio::test]
    async fn test_simulator_bell_state() {
        let backend = SimulatorBackend::new();

        let job_id = backend.submit(&[bell_circuit()], 1000).await.unwrap();

        let status = backend.status(&job_id).await.unwrap();
        assert!(status.is_success());

        let histograms = backend.retrieve(&job_id).await.unwrap();
        assert_eq!(histograms.len(), 1);

        // Bell state should produce only 00 and 11
        let counts = &histograms[0];
        assert_eq!(counts.get("00") + counts.get("11"), 1000);
        assert_eq!(counts.get("01") + counts.get("10"), 0);
    }

    #[tokio::test]
    async fn test_histograms_follow_submission_order() {
        let backend = SimulatorBackend::new();

        let job_id = backend
            .submit(&[one_circuit(), zero_circuit()], 100)
            .await
            .unwrap();
        let histograms = backend.retrieve(&job_id).await.unwrap();

        assert_eq!(histograms[0].get("1"), 100);
        assert_eq!(histograms[1].get("0"), 100);
    }

    #[tokio::test]
    async fn test_simulator_too_many_qubits() {
        let backend = SimulatorBackend::new().with_max_qubits(5);

        let circuit = Circuit::new("test", 10, 0);
        let result = backend.submit(&[circuit], 100).await;

        assert!(matches!(result, Err(HalError::InvalidCircuit(_))));
    }

    #[tokio::test]
    async fn test_zero_shots_rejected() {
        let backend = SimulatorBackend::new();
        let result = backend.submit(&[bell_circuit()], 0).await;
        assert!(matches!(result, Err(HalError::InvalidShots(_))));
    }

    #[tokio::test]
    async fn test_empty_batch_rejected() {
        let backend = SimulatorBackend::new();
        let result = backend.submit(&[], 100).await;
        assert!(matches!(result, Err(HalError::SubmissionFailed(_))));
    }

    #[tokio::test]
    async fn test_batch_limit_enforced() {
        let backend = SimulatorBackend::new().with_max_batch_size(2);
        assert_eq!(backend.max_batch_size(), Some(2));

        let circuits = vec![zero_circuit(), zero_circuit(), zero_circuit()];
        let result = backend.submit(&circuits, 100).await;
        assert!(matches!(result, Err(HalError::SubmissionFailed(_))));
    }

    #[tokio::test]
    async fn test_unknown_job() {
        let backend = SimulatorBackend::new();
        let result = backend.status(&JobId::new("nope")).await;
        assert!(matches!(result, Err(HalError::JobNotFound(_))));
    }

    #[tokio::test]
    async fn test_injected_submission_failure() {
        let backend = SimulatorBackend::new();
        backend.fail_next_submissions(1);

        let first = backend.submit(&[zero_circuit()], 100).await;
        assert!(matches!(first, Err(HalError::SubmissionFailed(_))));

        let second = backend.submit(&[zero_circuit()], 100).await;
        assert!(second.is_ok());
    }

    #[tokio::test]
    async fn test_held_jobs_stay_queued_until_release() {
        let backend = SimulatorBackend::new();
        backend.hold_jobs();

        let job_id = backend.submit(&[zero_circuit()], 100).await.unwrap();
        assert!(backend.status(&job_id).await.unwrap().is_pending());
        assert!(matches!(
            backend.retrieve(&job_id).await,
            Err(HalError::JobNotReady(_))
        ));

        backend.release_jobs();
        assert!(backend.status(&job_id).await.unwrap().is_success());
        let histograms = backend.retrieve(&job_id).await.unwrap();
        assert_eq!(histograms[0].get("0"), 100);
    }

    #[tokio::test]
    async fn test_release_only_affects_held_jobs() {
        let backend = SimulatorBackend::new();
        let early = backend.submit(&[zero_circuit()], 10).await.unwrap();

        backend.hold_jobs();
        let held = backend.submit(&[one_circuit()], 10).await.unwrap();
        assert!(backend.status(&early).await.unwrap().is_success());
        assert!(backend.status(&held).await.unwrap().is_pending());

        backend.release_jobs();
        assert!(backend.status(&held).await.unwrap().is_success());
    }

    #[tokio::test]
    async fn test_injected_job_failure() {
        let backend = SimulatorBackend::new().with_failing_jobs([1]);

        let ok_job = backend.submit(&[zero_circuit()], 100).await.unwrap();
        let bad_job = backend.submit(&[zero_circuit()], 100).await.unwrap();

        assert!(backend.status(&ok_job).await.unwrap().is_success());
        let status = backend.status(&bad_job).await.unwrap();
        assert!(matches!(status, JobStatus::Failed(_)));
        assert!(matches!(
            backend.retrieve(&bad_job).await,
            Err(HalError::JobFailed(_))
        ));
    }

    #[tokio::test]
    async fn test_readout_noise_flips_deterministic_outcomes() {
        let backend = SimulatorBackend::new().with_readout_error(1.0, 0.0);
        let job_id = backend.submit(&[zero_circuit()], 200).await.unwrap();
        let histograms = backend.retrieve(&job_id).await.unwrap();
        assert_eq!(histograms[0].get("1"), 200);

        let backend = SimulatorBackend::new().with_readout_error(0.0, 1.0);
        let job_id = backend.submit(&[one_circuit()], 200).await.unwrap();
        let histograms = backend.retrieve(&job_id).await.unwrap();
        assert_eq!(histograms[0].get("0"), 200);
    }

    #[tokio::test]
    async fn test_readout_error_exposed_per_qubit() {
        let backend = SimulatorBackend::new().with_readout_error(0.02, 0.05);
        let error = backend.readout_error(0).unwrap();
        assert_eq!(error.prob_meas1_prep0, 0.02);
        assert_eq!(error.prob_meas0_prep1, 0.05);

        assert!(SimulatorBackend::new().readout_error(0).is_none());
    }

    #[tokio::test]
    async fn test_from_config() {
        let config = BackendConfig::new("simulator")
            .with_extra("max_qubits", serde_json::json!(8))
            .with_extra("max_batch_size", serde_json::json!(4))
            .with_extra("prob_meas1_prep0", serde_json::json!(0.01));

        let backend = SimulatorBackend::from_config(config).unwrap();
        assert_eq!(backend.max_qubits, 8);
        assert_eq!(backend.max_batch_size(), Some(4));
        let noise = backend.readout_error(0).unwrap();
        assert_eq!(noise.prob_meas1_prep0, 0.01);
        assert_eq!(noise.prob_meas0_prep1, 0.0);
    }

    #[tokio::test]
    async fn test_from_config_failing_jobs() {
        let config = BackendConfig::new("simulator")
            .with_extra("fail_job_indices", serde_json::json!([0]));

        let backend = SimulatorBackend::from_config(config).unwrap();
        let job_id = backend.submit(&[zero_circuit()], 10).await.unwrap();
        assert!(matches!(
            backend.status(&job_id).await.unwrap(),
            JobStatus::Failed(_)
        ));
    }

    #[tokio::test]
    async fn test_factory_backends_share_jobs() {
        let first = SimulatorBackend::from_config(BackendConfig::new("simulator")).unwrap();
        let second = SimulatorBackend::from_config(BackendConfig::new("simulator")).unwrap();

        let job_id = first.submit(&[zero_circuit()], 10).await.unwrap();
        assert!(second.status(&job_id).await.unwrap().is_success());
        assert_eq!(second.retrieve(&job_id).await.unwrap().len(), 1);
    }
}
