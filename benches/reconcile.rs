use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tvhome::entry::{Entry, EntryKey, IconRef, Intent};
use tvhome::reconcile::reconcile;
use tvhome::section::{Section, SectionId};
use tvhome::snapshot::{KeepPolicy, Snapshot};

/// A populated accessories-style section with `count` device entries plus a
/// pinned add button at the end.
fn build_section(count: usize) -> Section {
    let mut section = Section::new(SectionId::new("accessories"), "Accessories");
    for i in 0..count {
        section.push(
            Entry::new(
                EntryKey::for_device(&format!("AA:BB:CC:00:{:02X}:{:02X}", i / 256, i % 256)),
                format!("Device {}", i),
                IconRef::new("ic_accessory_remote"),
                Intent::new("tvhome.ACCESSORY"),
            )
            .with_description(if i % 3 == 0 {
                Some("Connected".to_string())
            } else {
                None
            }),
        );
    }
    section.push(
        Entry::new(
            EntryKey::for_static("add_accessory"),
            "Add accessory",
            IconRef::new("ic_settings_add"),
            Intent::new("tvhome.ADD_ACCESSORY"),
        )
        .pinned_last(),
    );
    section
}

/// A snapshot that drops every 5th device, flips every 3rd description and
/// adds a tail of new devices, exercising all three result buckets.
fn build_snapshot(count: usize) -> Snapshot {
    let mut entries = Vec::new();
    for i in 0..count {
        if i % 5 == 0 {
            continue;
        }
        entries.push(
            Entry::new(
                EntryKey::for_device(&format!("AA:BB:CC:00:{:02X}:{:02X}", i / 256, i % 256)),
                format!("Device {}", i),
                IconRef::new("ic_accessory_remote"),
                Intent::new("tvhome.ACCESSORY"),
            )
            .with_description(if i % 3 == 1 {
                Some("Connected".to_string())
            } else {
                None
            }),
        );
    }
    for i in count..count + count / 4 {
        entries.push(Entry::new(
            EntryKey::for_device(&format!("DD:EE:FF:00:{:02X}:{:02X}", i / 256, i % 256)),
            format!("Device {}", i),
            IconRef::new("ic_accessory_gamepad"),
            Intent::new("tvhome.ACCESSORY"),
        ));
    }
    Snapshot::new(
        entries,
        KeepPolicy::keys(vec![EntryKey::for_static("add_accessory")]),
    )
}

fn bench_reconcile(c: &mut Criterion) {
    for size in [16, 128, 1024] {
        let section = build_section(size);
        let snapshot = build_snapshot(size);
        c.bench_function(&format!("reconcile_{}_entries", size), |b| {
            b.iter(|| reconcile(black_box(&section), black_box(&snapshot)))
        });
    }
}

fn bench_apply(c: &mut Criterion) {
    let section = build_section(128);
    let snapshot = build_snapshot(128);
    c.bench_function("reconcile_and_apply_128_entries", |b| {
        b.iter(|| {
            let mut working = section.clone();
            let result = reconcile(&working, &snapshot);
            working.apply(black_box(&result));
            working
        })
    });
}

fn bench_converged(c: &mut Criterion) {
    let mut section = build_section(128);
    let snapshot = build_snapshot(128);
    let result = reconcile(&section, &snapshot);
    section.apply(&result);
    c.bench_function("reconcile_converged_128_entries", |b| {
        b.iter(|| reconcile(black_box(&section), black_box(&snapshot)))
    });
}

criterion_group!(benches, bench_reconcile, bench_apply, bench_converged);
criterion_main!(benches);
