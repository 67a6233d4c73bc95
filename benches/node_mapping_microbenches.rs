//! Microbenches for the individual node mapping shapes. Takes quite a
//! while to run.

use std::collections::HashSet;
use std::time::{Duration, Instant};

use criterion::{criterion_group, criterion_main, Criterion, Throughput};

use art::mapping::direct::DirectMapping;
use art::mapping::indexed::IndexedMapping;
use art::mapping::small::SmallMapping;
use art::mapping::{Mode, NodeMapping};
use art::utils::bitset::Bitset64;

fn full_bench_profile() -> bool {
    std::env::var("ART_BENCH_FULL").as_deref() == Ok("1")
}

fn microbench_sample_size() -> usize {
    if full_bench_profile() {
        4096
    } else {
        256
    }
}

fn microbench_measurement_time() -> Duration {
    if full_bench_profile() {
        Duration::from_secs(10)
    } else {
        Duration::from_secs(2)
    }
}

fn benched_add_child<const WIDTH: usize, MappingType>(iters: u64) -> Duration
where
    MappingType: NodeMapping<u64, WIDTH> + Default,
{
    let mut mapping_set = make_mapping_sets::<WIDTH, MappingType>(iters);
    let start = Instant::now();
    for (mapping, child_set) in &mut mapping_set {
        for child in child_set {
            mapping.add_child(*child, 0u64);
        }
    }
    start.elapsed()
}

fn benched_del_child<const WIDTH: usize, MappingType>(iters: u64) -> Duration
where
    MappingType: NodeMapping<u64, WIDTH> + Default,
{
    let mut mapping_set = make_mapping_sets::<WIDTH, MappingType>(iters);
    for (mapping, child_set) in &mut mapping_set {
        for child in child_set {
            mapping.add_child(*child, 0u64);
        }
    }

    let start = Instant::now();
    for (mapping, child_set) in &mut mapping_set {
        for child in child_set {
            mapping.delete_child(*child);
        }
    }
    start.elapsed()
}

fn benched_seek_child<const WIDTH: usize, MappingType>(iters: u64) -> Duration
where
    MappingType: NodeMapping<u64, WIDTH> + Default,
{
    let mut mapping_set = make_mapping_sets::<WIDTH, MappingType>(iters);
    for (mapping, child_set) in &mut mapping_set {
        for child in child_set {
            mapping.add_child(*child, 0u64);
        }
    }

    let start = Instant::now();
    for (mapping, child_set) in &mut mapping_set {
        for child in child_set {
            mapping.seek_child(*child);
        }
    }
    start.elapsed()
}

fn make_mapping_sets<const WIDTH: usize, MappingType>(iters: u64) -> Vec<(MappingType, Vec<u8>)>
where
    MappingType: NodeMapping<u64, WIDTH> + Default,
{
    // Break iters into WIDTH-sized chunks, preparing a fresh mapping and a
    // unique child-key set for each chunk.
    let mut mapping_set = Vec::with_capacity((iters / (WIDTH as u64)) as usize);
    for _ in 0..iters / (WIDTH as u64) {
        let mut child_hash_set = HashSet::with_capacity(WIDTH);
        while child_hash_set.len() < WIDTH {
            child_hash_set.insert(rand::random::<u8>());
        }
        let child_set = child_hash_set.into_iter().collect::<Vec<u8>>();
        mapping_set.push((MappingType::default(), child_set));
    }
    mapping_set
}

// `SmallMapping` and `IndexedMapping` aren't `Default` on their own (they
// need a `Mode` / have no zero-arg constructor respectively for one, and a
// const assertion for the other), so give each width its own wrapper that
// is.
macro_rules! small_default {
    ($name:ident, $width:expr) => {
        struct $name(SmallMapping<u64, $width>);
        impl Default for $name {
            fn default() -> Self {
                $name(SmallMapping::new(Mode::Ordered))
            }
        }
        impl NodeMapping<u64, $width> for $name {
            fn add_child(&mut self, key: u8, node: u64) {
                self.0.add_child(key, node)
            }
            fn seek_child(&self, key: u8) -> Option<&u64> {
                self.0.seek_child(key)
            }
            fn seek_child_mut(&mut self, key: u8) -> Option<&mut u64> {
                self.0.seek_child_mut(key)
            }
            fn delete_child(&mut self, key: u8) -> Option<u64> {
                self.0.delete_child(key)
            }
            fn num_children(&self) -> usize {
                self.0.num_children()
            }
            fn iter(&self) -> Box<dyn DoubleEndedIterator<Item = (u8, &u64)> + '_> {
                self.0.iter()
            }
        }
    };
}

small_default!(SmallN4, 4);
small_default!(SmallN8, 8);
small_default!(SmallN16, 16);
small_default!(SmallN32, 32);

pub fn add_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_child");
    group.throughput(Throughput::Elements(1));
    group.sample_size(microbench_sample_size());
    group.measurement_time(microbench_measurement_time());

    group.bench_function("n4", |b| {
        b.iter_custom(benched_add_child::<4, SmallN4>);
    });
    group.bench_function("n8", |b| {
        b.iter_custom(benched_add_child::<8, SmallN8>);
    });
    group.bench_function("n16", |b| {
        b.iter_custom(benched_add_child::<16, SmallN16>);
    });
    group.bench_function("n32", |b| {
        b.iter_custom(benched_add_child::<32, SmallN32>);
    });
    group.bench_function("n64", |b| {
        b.iter_custom(benched_add_child::<64, IndexedMapping<u64, 64, Bitset64<1>>>);
    });
    group.bench_function("n128", |b| {
        b.iter_custom(benched_add_child::<128, IndexedMapping<u64, 128, Bitset64<2>>>);
    });
    group.bench_function("n256", |b| {
        b.iter_custom(benched_add_child::<256, DirectMapping<u64>>);
    });

    group.finish();
}

pub fn del_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("del_child");
    group.throughput(Throughput::Elements(1));
    group.sample_size(microbench_sample_size());
    group.measurement_time(microbench_measurement_time());

    group.bench_function("n4", |b| {
        b.iter_custom(benched_del_child::<4, SmallN4>);
    });
    group.bench_function("n8", |b| {
        b.iter_custom(benched_del_child::<8, SmallN8>);
    });
    group.bench_function("n16", |b| {
        b.iter_custom(benched_del_child::<16, SmallN16>);
    });
    group.bench_function("n32", |b| {
        b.iter_custom(benched_del_child::<32, SmallN32>);
    });
    group.bench_function("n64", |b| {
        b.iter_custom(benched_del_child::<64, IndexedMapping<u64, 64, Bitset64<1>>>);
    });
    group.bench_function("n128", |b| {
        b.iter_custom(benched_del_child::<128, IndexedMapping<u64, 128, Bitset64<2>>>);
    });
    group.bench_function("n256", |b| {
        b.iter_custom(benched_del_child::<256, DirectMapping<u64>>);
    });

    group.finish();
}

pub fn seek_child(c: &mut Criterion) {
    let mut group = c.benchmark_group("seek_child");
    group.throughput(Throughput::Elements(1));
    group.sample_size(microbench_sample_size());
    group.measurement_time(microbench_measurement_time());

    group.bench_function("n4", |b| {
        b.iter_custom(benched_seek_child::<4, SmallN4>);
    });
    group.bench_function("n8", |b| {
        b.iter_custom(benched_seek_child::<8, SmallN8>);
    });
    group.bench_function("n16", |b| {
        b.iter_custom(benched_seek_child::<16, SmallN16>);
    });
    group.bench_function("n32", |b| {
        b.iter_custom(benched_seek_child::<32, SmallN32>);
    });
    group.bench_function("n64", |b| {
        b.iter_custom(benched_seek_child::<64, IndexedMapping<u64, 64, Bitset64<1>>>);
    });
    group.bench_function("n128", |b| {
        b.iter_custom(benched_seek_child::<128, IndexedMapping<u64, 128, Bitset64<2>>>);
    });
    group.bench_function("n256", |b| {
        b.iter_custom(benched_seek_child::<256, DirectMapping<u64>>);
    });

    group.finish();
}

// Exercise the grow transitions directly (small -> small, small -> indexed,
// indexed -> direct) via `drain_sorted`/`drain` + `from_pairs`, mirroring
// what `node.rs`'s `Inner::grow` does on a capacity overflow.
pub fn grow_node(c: &mut Criterion) {
    let mut group = c.benchmark_group("grow_node");
    group.throughput(Throughput::Elements(1));
    group.sample_size(microbench_sample_size());
    group.measurement_time(microbench_measurement_time());

    group.bench_function("n16_to_n32", |b| {
        b.iter_custom(|iters| {
            let mut mapping_set = make_mapping_sets::<16, SmallN16>(iters);
            for (mapping, child_set) in &mut mapping_set {
                for child in child_set {
                    mapping.add_child(*child, 0u64);
                }
            }
            let start = Instant::now();
            for (mapping, _) in mapping_set.drain(..) {
                let pairs = mapping.0.drain_sorted();
                let _new: SmallMapping<u64, 32> = {
                    let mut m = SmallMapping::new(Mode::Ordered);
                    for (k, v) in pairs {
                        m.add_child(k, v);
                    }
                    m
                };
            }
            start.elapsed()
        });
    });

    group.bench_function("n32_to_n64", |b| {
        b.iter_custom(|iters| {
            let mut mapping_set = make_mapping_sets::<32, SmallN32>(iters);
            for (mapping, child_set) in &mut mapping_set {
                for child in child_set {
                    mapping.add_child(*child, 0u64);
                }
            }
            let start = Instant::now();
            for (mapping, _) in mapping_set.drain(..) {
                let pairs = mapping.0.drain_sorted();
                let _new: IndexedMapping<u64, 64, Bitset64<1>> = IndexedMapping::from_pairs(pairs);
            }
            start.elapsed()
        });
    });

    group.bench_function("n128_to_n256", |b| {
        b.iter_custom(|iters| {
            let mut mapping_set =
                make_mapping_sets::<128, IndexedMapping<u64, 128, Bitset64<2>>>(iters);
            for (mapping, child_set) in &mut mapping_set {
                for child in child_set {
                    mapping.add_child(*child, 0u64);
                }
            }
            let start = Instant::now();
            for (mapping, _) in mapping_set.drain(..) {
                let pairs = mapping.drain();
                let _new: DirectMapping<u64> = DirectMapping::from_pairs(pairs);
            }
            start.elapsed()
        });
    });

    group.finish();
}

criterion_group!(benches, grow_node, add_child, del_child, seek_child);
criterion_main!(benches);
