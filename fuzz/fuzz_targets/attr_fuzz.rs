//! Attribute decoder fuzz target: arbitrary kernel replies.
//! Decoding must stop with an error on malformed input, never panic or loop.
//! Build with: cargo fuzz run attr_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    for attr in ynlgen::runtime::AttributeDecoder::new(data) {
        let Ok(attr) = attr else { break };
        let _ = attr.u16();
        let _ = attr.u32();
        let _ = attr.string();
    }
    if let Ok(frames) = ynlgen::runtime::frame::decode_frames(data) {
        for frame in &frames {
            let _ = frame.control();
        }
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run attr_fuzz");
}
