#![no_main]

use fdsn_features::document::{Document, QuakeMlDocument};
use fdsn_features::projector::Projector;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Parsing may fail but must never panic
    let Ok(document) = Document::from_bytes(data) else {
        return;
    };

    // Projection of whatever parsed must not panic either
    let projector = Projector::default();
    for row in projector.project(&document).take(1000) {
        let _ = row;
    }

    // Follow-up merges run on untrusted replies too
    let mut doc = QuakeMlDocument::default();
    let _ = doc.parse_missing_origin(data);
    let _ = doc.scan_for_missing_origins();
});
