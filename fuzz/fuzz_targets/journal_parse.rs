#![no_main]

use heirloom_custody::{CustodyVault, EventJournal};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Try deserializing arbitrary bytes as the persisted state files.
    // Deserialization must never panic — it should always return Ok or Err.
    if let Ok(journal) = serde_json::from_slice::<EventJournal>(data) {
        // If deserialization succeeds, re-serialization must not panic either
        let bytes = serde_json::to_vec(&journal).unwrap();
        let _ = serde_json::from_slice::<EventJournal>(&bytes);
    }

    let _ = serde_json::from_slice::<CustodyVault>(data);
});
