//! Benchmark: YAML parsing vs code generation for the checked-in family specs,
//! plus the attribute codec the generated bindings spend their time in.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ynlgen::runtime::{AttributeDecoder, AttributeEncoder};
use ynlgen::{generate, spec, Config};

const SPECS: &[(&str, &str)] = &[
    ("nlctrl", include_str!("../testdata/nlctrl.yaml")),
    ("ethtool", include_str!("../testdata/ethtool.yaml")),
];

fn bench_generate(c: &mut Criterion) {
    let cfg = Config::default();
    for (name, source) in SPECS {
        let parsed = spec::parse_str(source).expect("parse");
        let code = generate(&parsed, &cfg).expect("generate");
        eprintln!(
            "{}: {} yaml bytes, {} operations, {} generated bytes",
            name,
            source.len(),
            parsed.operations.list.len(),
            code.len()
        );

        c.bench_function(&format!("parse_{}", name), |b| {
            b.iter(|| spec::parse_str(black_box(source)).expect("parse"));
        });

        c.bench_function(&format!("generate_{}", name), |b| {
            b.iter(|| generate(black_box(&parsed), &cfg).expect("generate"));
        });
    }
}

fn bench_attributes(c: &mut Criterion) {
    // Roughly one dump_getfamily reply per registered family.
    let families: Vec<Vec<u8>> = (0..64u16)
        .map(|i| {
            let mut ae = AttributeEncoder::new();
            ae.u16(1, 16 + i);
            ae.string(2, &format!("family{}", i));
            ae.u32(3, 1);
            ae.u32(4, 0);
            ae.u32(5, 12);
            ae.encode().expect("encode")
        })
        .collect();

    c.bench_function("encode_getfamily_request", |b| {
        b.iter(|| {
            let mut ae = AttributeEncoder::new();
            ae.string(2, black_box("nlctrl"));
            ae.encode().expect("encode")
        });
    });

    c.bench_function("decode_getfamily_dump_64", |b| {
        b.iter(|| {
            let mut ids = 0u32;
            for data in &families {
                for attr in AttributeDecoder::new(black_box(data)) {
                    let attr = attr.expect("decode");
                    if attr.kind() == 1 {
                        ids += u32::from(attr.u16().expect("u16"));
                    }
                }
            }
            black_box(ids)
        });
    });
}

criterion_group!(benches, bench_generate, bench_attributes);
criterion_main!(benches);
