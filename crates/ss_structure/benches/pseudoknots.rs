use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use ss_structure::NAIDX;
use ss_structure::Pair;
use ss_structure::HelixSplit;
use ss_structure::DotBracketVec;
use ss_structure::assign_layers;
use ss_structure::max_nested_subset;
use ss_structure::group_into_helices;

/// Pair up a random half of all positions, which gives a heavily
/// pseudoknotted pair list.
fn random_pairs(length: usize, seed: u64) -> Vec<Pair> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut positions: Vec<NAIDX> = (0..length as NAIDX).collect();
    positions.shuffle(&mut rng);
    positions[..length / 2]
        .chunks_exact(2)
        .map(|c| Pair::new(c[0].min(c[1]), c[0].max(c[1])))
        .collect()
}

pub fn pseudoknot_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pseudoknots");
    let pairs = random_pairs(10_000, 42);

    group.bench_function("Maximum nested subset (10k nt)", |b| {
        b.iter(|| {
            let _ = max_nested_subset(&pairs);
        });
    });

    group.bench_function("Layer assignment (10k nt)", |b| {
        b.iter(|| {
            let (_, crossing) = max_nested_subset(&pairs);
            let _ = assign_layers(&crossing);
        });
    });

    let (nested, _) = max_nested_subset(&pairs);
    let db = DotBracketVec::encode(&nested, 10_000).unwrap();
    group.bench_function("Helix grouping (10k nt)", |b| {
        b.iter(|| {
            let _ = group_into_helices(&db, HelixSplit::Interior);
        });
    });
}

criterion_group!(benches, pseudoknot_resolution);
criterion_main!(benches);
