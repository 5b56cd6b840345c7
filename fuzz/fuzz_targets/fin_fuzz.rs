//! FIN reader fuzz target: feed arbitrary text to the parser, the writer and the validator.
//! None of them may panic.
//! Build with: cargo fuzz run fin_fuzz (requires nightly and cargo fuzz).

#![cfg_attr(fuzzing, no_main)]

#[cfg(fuzzing)]
use libfuzzer_sys::fuzz_target;

#[cfg(fuzzing)]
fuzz_target!(|data: &[u8]| {
    let s = match std::str::from_utf8(data) {
        Ok(x) => x,
        Err(_) => return,
    };
    if let Ok(m) = swiftmt::parse(s) {
        let _ = swiftmt::validate(&m, &swiftmt::ValidationConfig::default());
        let _ = swiftmt::resolve_path(&m.block4, &["GENL", "LINK"]);
        let _ = swiftmt::parse(&m.to_fin());
    }
});

#[cfg(not(fuzzing))]
fn main() {
    eprintln!("Build with: cargo fuzz run fin_fuzz");
}
