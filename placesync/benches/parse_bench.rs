use criterion::{criterion_group, criterion_main, Criterion};
use placesync::Schematic;
use std::io::Cursor;

/// Build a flat synthetic schematic with `n` resistors.
fn synthetic_schematic(n: usize) -> String {
    let mut out = String::from("EESchema Schematic File Version 2\nLIBS:device\nEELAYER 25 0\nEELAYER END\n");
    for i in 0..n {
        let x = (i % 100) * 100;
        let y = (i / 100) * 100;
        out.push_str(&format!(
            "$Comp\n\
             L Device:R R{i}\n\
             U 1 1 5D30{i:04X}\n\
             P {x} {y}\n\
             F 0 \"R{i}\" H 170 246 50  0000 L CNN\n\
             F 1 \"10k\" H 170 155 50  0000 L CNN\n\
             \t1    {x}  {y}\n\
             \t1    0    0    -1\n\
             $EndComp\n"
        ));
    }
    out.push_str("$EndSCHEMATC\n");
    out
}

fn bench_parse(c: &mut Criterion) {
    let small = synthetic_schematic(50);
    let large = synthetic_schematic(2000);

    c.bench_function("parse_50_components", |b| {
        b.iter(|| Schematic::parse_reader(Cursor::new(small.as_bytes()), "bench.sch").unwrap())
    });

    c.bench_function("parse_2000_components", |b| {
        b.iter(|| Schematic::parse_reader(Cursor::new(large.as_bytes()), "bench.sch").unwrap())
    });

    let parsed = Schematic::parse_reader(Cursor::new(large.as_bytes()), "bench.sch").unwrap();
    c.bench_function("flatten_2000_components", |b| b.iter(|| parsed.locations()));
}

criterion_group!(benches, bench_parse);
criterion_main!(benches);
