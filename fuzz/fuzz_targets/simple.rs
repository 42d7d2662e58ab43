#![no_main]
use libfuzzer_sys::fuzz_target;
use pkb::Pkb;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(parsed) = parsers::parse_program(s) {
            let _ = Pkb::from_program(&parsed);
        }
    }
});
