//! Spec fuzz target: arbitrary YAML through parsing and generation.
//! Neither step may panic; inconsistent specs must come back as errors.
//! Build with: cargo fuzz run spec_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(spec) = ynlgen::spec::parse_str(s) {
        let _ = ynlgen::generate(&spec, &ynlgen::Config::default());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run spec_fuzz");
}
