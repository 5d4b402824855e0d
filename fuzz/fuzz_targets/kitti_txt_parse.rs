//! Fuzz target for whole-file KITTI label parsing.
//!
//! Parses arbitrary UTF-8 text, then writes and re-parses the result,
//! checking for panics and that the writer's output always parses cleanly.

#![no_main]

use kitti_resize::ir::io_kitti::{from_kitti_str, to_kitti_string};
use kitti_resize::report::ResizeReport;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() > 10 * 1024 * 1024 {
        return;
    }

    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    let mut report = ResizeReport::new();
    let objects = from_kitti_str(text, &mut report);
    let written = to_kitti_string(&objects, &mut report);

    let mut reread = ResizeReport::new();
    let again = from_kitti_str(&written, &mut reread);
    assert_eq!(again.len(), objects.len());
    assert!(reread.is_clean());
});
