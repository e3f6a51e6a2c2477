#![no_main]

use heirloom_custody::Address;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try parsing arbitrary bytes as a UTF-8 string, then as an address.
    // Address parsing must never panic — it should always return Ok or Err.
    if let Ok(s) = std::str::from_utf8(data) {
        let _ = s.parse::<Address>();

        // Also try with the "0x" prefix prepended to exercise the hex path
        let prefixed = format!("0x{}", s);
        let _ = prefixed.parse::<Address>();
    }
});
