//! Benchmarks for assembling and simulating discrimination circuits
//!
//! Run with: cargo bench -p qbench-fourier

use std::f64::consts::FRAC_PI_2;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use qbench_adapter_sim::SimulatorBackend;
use qbench_fourier::{FourierComponents, Gateset};
use qbench_hal::Backend;
use qbench_ir::Circuit;
use qbench_schemes::assemble_postselection_circuits;

fn assembled_circuits(gateset: Gateset) -> Vec<Circuit> {
    let components = FourierComponents::new(FRAC_PI_2, gateset).unwrap();
    assemble_postselection_circuits(
        0,
        1,
        components.state_preparation(),
        components.u_dag(),
        components.v0_dag(),
        components.v1_dag(),
    )
    .unwrap()
    .into_named()
    .into_iter()
    .map(|(_, circuit)| circuit)
    .collect()
}

/// Benchmark building components and assembling one trial's circuits
fn bench_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assembly");

    for gateset in [Gateset::Generic, Gateset::Rigetti, Gateset::Ibmq] {
        group.bench_with_input(
            BenchmarkId::new("postselection_trial", gateset),
            &gateset,
            |b, &gateset| {
                b.iter(|| assembled_circuits(black_box(gateset)));
            },
        );
    }

    group.finish();
}

/// Benchmark statevector execution of assembled circuits
fn bench_statevector_execution(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let backend = SimulatorBackend::new();
    let circuits = assembled_circuits(Gateset::Generic);

    let mut group = c.benchmark_group("statevector_execution");
    group.sample_size(20);

    for shots in &[100u32, 1_000, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("postselection_trial", shots),
            shots,
            |b, &shots| {
                b.iter(|| {
                    rt.block_on(async {
                        backend
                            .run(black_box(&circuits), black_box(shots))
                            .await
                            .unwrap()
                    })
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_assembly, bench_statevector_execution);
criterion_main!(benches);
