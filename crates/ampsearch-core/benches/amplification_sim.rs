use ampsearch_core::prelude::*;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_mcz(c: &mut Criterion) {
    let mut group = c.benchmark_group("mcz");

    for num_qubits in [4, 8, 12, 16] {
        group.bench_with_input(BenchmarkId::new("all_positions", num_qubits), &num_qubits, |b, &n| {
            let gate = Gate::Mcz((0..n).collect());
            b.iter(|| {
                let mut state = QuantumState::new_with_seed(n, 0).unwrap();
                state.apply_gate(&gate).unwrap();
            });
        });
    }
    group.finish();
}

/// One textbook round: mark |0...0>, then reflect about the uniform state.
fn round(n: u32) -> (Operator, Operator, Operator) {
    let mut prep = QuantumCircuit::new(n);
    prep.h_all();

    let mut oracle = QuantumCircuit::new(n);
    oracle.x_all().mcz_all().x_all();

    let mut diffuser = QuantumCircuit::new(n);
    diffuser.h_all().x_all().mcz_all().x_all().h_all();

    (
        Operator::from_circuit("prep", prep),
        Operator::from_circuit("oracle", oracle),
        Operator::from_circuit("diffuser", diffuser),
    )
}

fn bench_amplification_rounds(c: &mut Criterion) {
    let mut group = c.benchmark_group("amplification_rounds");

    for num_qubits in [4, 6, 8, 10] {
        let (prep, oracle, diffuser) = round(num_qubits);
        let rounds = ((std::f64::consts::FRAC_PI_4) * ((1u64 << num_qubits) as f64).sqrt()) as usize;
        let mut ops = vec![prep];
        for _ in 0..rounds {
            ops.push(oracle.clone());
            ops.push(diffuser.clone());
        }

        group.bench_with_input(BenchmarkId::new("evolve", num_qubits), &num_qubits, |b, &n| {
            b.iter(|| {
                let mut state = QuantumState::new_with_seed(n, 0).unwrap();
                Simulator::evolve(&mut state, &ops, None).unwrap();
            });
        });

        group.bench_with_input(
            BenchmarkId::new("sample_1024", num_qubits),
            &num_qubits,
            |b, &n| {
                let mut backend = StateVectorBackend::with_seed(1);
                b.iter(|| backend.execute(n, &ops, 1024, None).unwrap());
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_mcz, bench_amplification_rounds);
criterion_main!(benches);
