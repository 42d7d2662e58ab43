pub use engine::*;
use pkb::Pkb;

mod clauses;
mod laws;
mod relations;
mod scenarios;

pub(crate) const PROGRAM: &str = "
procedure main {
    read x;
    while (x > 0) {
        if (x > 5) then {
            y = x * 2;
        } else {
            z = y + 1;
            call helper;
        }
        x = x - 1;
    }
    print y;
}
procedure helper {
    w = 007 + q;
    call leaf;
}
procedure leaf {
    print leaf;
}";

pub(crate) fn build(src: &str) -> Pkb {
    let parsed = parsers::parse_program(src).expect("valid SIMPLE program");
    Pkb::from_program(&parsed)
}

pub(crate) fn ask(pkb: &Pkb, query: &str) -> Vec<String> {
    answer(pkb, query)
}

/// Routes engine logs to the test output; `cargo test -- --nocapture`
/// shows the per-clause traces.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .with_target(false)
        .try_init();
}

/// Evaluates `query` with every combination of optimiser and parallelism
/// switches and checks they agree.
pub(crate) fn ask_all_ways(pkb: &Pkb, query: &str) -> Vec<String> {
    init_tracing();
    let baseline = answer_with_config(
        pkb,
        query,
        EngineConfig {
            optimise: false,
            parallel: false,
        },
    );
    for (optimise, parallel) in [(true, false), (true, true), (false, true)] {
        let got = answer_with_config(pkb, query, EngineConfig { optimise, parallel });
        assert_eq!(got, baseline, "optimise={optimise} parallel={parallel}: {query}");
    }
    baseline
}
