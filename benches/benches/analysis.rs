use benches::synthetic_program;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use engine::EngineConfig;
use pkb::Pkb;
use std::{fs, path::PathBuf};

fn sample_program() -> String {
    let file = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../fixtures/simple/sample.txt");
    fs::read_to_string(&file).expect("read fixture")
}

fn bench_parser(c: &mut Criterion) {
    let src = synthetic_program(10, 20);
    c.bench_function("parse_synthetic", |b| {
        b.iter(|| parsers::parse_program(black_box(&src)).unwrap())
    });
}

fn bench_population(c: &mut Criterion) {
    let parsed = parsers::parse_program(&synthetic_program(10, 20)).unwrap();
    c.bench_function("populate_synthetic", |b| {
        b.iter(|| Pkb::from_program(black_box(&parsed)))
    });
}

struct QueryBench {
    name: &'static str,
    query: &'static str,
}

const QUERY_BENCHES: &[QueryBench] = &[
    QueryBench {
        name: "query_next_star",
        query: "stmt s1, s2; Select <s1, s2> such that Next*(s1, s2)",
    },
    QueryBench {
        name: "query_affects",
        query: "assign a1, a2; Select a1 such that Affects(a1, a2)",
    },
    QueryBench {
        name: "query_pattern_join",
        query: "assign a; while w; variable v; Select a such that Parent*(w, a) pattern a(v, _\"x\"_)",
    },
    QueryBench {
        name: "query_negation",
        query: "stmt s; Select s such that not Follows*(s, _)",
    },
    QueryBench {
        name: "query_independent_groups",
        query: "stmt s1, s2; procedure p, q; Select s1 such that Follows(s1, s2) and Calls*(p, q)",
    },
];

fn bench_queries(c: &mut Criterion) {
    let parsed = parsers::parse_program(&synthetic_program(10, 20)).unwrap();
    let pkb = Pkb::from_program(&parsed);
    for bench in QUERY_BENCHES {
        c.bench_function(bench.name, |b| {
            b.iter(|| engine::answer(black_box(&pkb), black_box(bench.query)))
        });
    }
}

fn bench_sequential(c: &mut Criterion) {
    let parsed = parsers::parse_program(&synthetic_program(10, 20)).unwrap();
    let pkb = Pkb::from_program(&parsed);
    let cfg = EngineConfig {
        optimise: false,
        parallel: false,
    };
    let query = "stmt s1, s2; procedure p, q; Select s1 such that Follows(s1, s2) and Calls*(p, q)";
    c.bench_function("query_unoptimised", |b| {
        b.iter(|| engine::answer_with_config(black_box(&pkb), black_box(query), cfg))
    });
}

fn bench_fixture(c: &mut Criterion) {
    let parsed = parsers::parse_program(&sample_program()).unwrap();
    let pkb = Pkb::from_program(&parsed);
    c.bench_function("query_fixture_tuple", |b| {
        b.iter(|| {
            engine::answer(
                black_box(&pkb),
                black_box("assign a; variable v; Select <a, v> such that Uses(a, v)"),
            )
        })
    });
}

criterion_group!(
    benches,
    bench_parser,
    bench_population,
    bench_queries,
    bench_sequential,
    bench_fixture
);
criterion_main!(benches);
