//! Fuzz target for snapshot loading and the full check pass.
//!
//! Any snapshot that deserializes and indexes must check without panicking.

#![no_main]

use libfuzzer_sys::fuzz_target;
use dircheck::{DirCheck, Directory, DirectorySnapshot};

fuzz_target!(|data: &[u8]| {
    let Ok(snapshot) = serde_json::from_slice::<DirectorySnapshot>(data) else {
        return;
    };
    let Ok(directory) = Directory::new(snapshot) else {
        return;
    };
    let _ = DirCheck::new().run(&directory);
});
