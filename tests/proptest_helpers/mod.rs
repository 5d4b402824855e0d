#![allow(dead_code)]

use kitti_resize::ir::{BBoxXYXY, KittiObject, Pixel};
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

/// Largest rounding error of a field written with 2 decimals.
pub const EPS_2DP: f64 = 0.005 + 1e-9;
/// Largest rounding error of a field written with 6 decimals.
pub const EPS_6DP: f64 = 0.000_000_5 + 1e-12;
/// Largest rounding error of a field written with 4 decimals.
pub const EPS_4DP: f64 = 0.000_05 + 1e-12;

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(64);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

pub fn class_name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][A-Za-z_]{0,11}"
}

pub fn arb_bbox_within(width: u32, height: u32) -> BoxedStrategy<BBoxXYXY<Pixel>> {
    let (w, h) = (f64::from(width), f64::from(height));
    (0.0..w, 0.0..h, 0.0..w, 0.0..h)
        .prop_map(|(xa, ya, xb, yb)| {
            BBoxXYXY::from_xyxy(xa.min(xb), ya.min(yb), xa.max(xb), ya.max(yb))
        })
        .boxed()
}

pub fn arb_object_within(width: u32, height: u32, with_score: bool) -> BoxedStrategy<KittiObject> {
    (
        class_name_strategy(),
        0.0..=1.0f64,
        0i32..=3,
        -3.2..3.2f64,
        arb_bbox_within(width, height),
        prop::array::uniform3(0.1..20.0f64),
        prop::array::uniform3(-100.0..100.0f64),
        -3.2..3.2f64,
        0.0..=1.0f64,
    )
        .prop_map(
            move |(class_name, truncation, occlusion, alpha, bbox, dims, loc, ry, score)| {
                KittiObject {
                    class_name,
                    truncation,
                    occlusion,
                    alpha,
                    bbox: Some(bbox),
                    dimensions: dims,
                    location: loc,
                    rotation_y: ry,
                    score: with_score.then_some(score),
                }
            },
        )
        .boxed()
}

pub fn arb_objects(max_objects: usize, with_score: bool) -> BoxedStrategy<Vec<KittiObject>> {
    proptest::collection::vec(arb_object_within(1242, 375, with_score), 0..=max_objects).boxed()
}

fn close(label: &str, a: f64, b: f64, eps: f64) -> Result<(), String> {
    if (a - b).abs() <= eps {
        Ok(())
    } else {
        Err(format!("{label}: {a} vs {b} (eps {eps})"))
    }
}

/// Checks that `restored` equals `original` within the writer's precision.
pub fn assert_objects_equivalent(
    original: &[KittiObject],
    restored: &[KittiObject],
) -> Result<(), String> {
    if original.len() != restored.len() {
        return Err(format!(
            "object count mismatch: left={} right={}",
            original.len(),
            restored.len()
        ));
    }

    for (i, (a, b)) in original.iter().zip(restored).enumerate() {
        if a.class_name != b.class_name {
            return Err(format!("object {i}: class {} vs {}", a.class_name, b.class_name));
        }
        if a.occlusion != b.occlusion {
            return Err(format!("object {i}: occlusion {} vs {}", a.occlusion, b.occlusion));
        }
        close("truncation", a.truncation, b.truncation, EPS_2DP)?;
        close("alpha", a.alpha, b.alpha, EPS_6DP)?;
        close("rotation_y", a.rotation_y, b.rotation_y, EPS_6DP)?;

        let (Some(ba), Some(bb)) = (a.bbox, b.bbox) else {
            return Err(format!("object {i}: missing bbox"));
        };
        for (x, y) in ba.to_array().into_iter().zip(bb.to_array()) {
            close("bbox", x, y, EPS_2DP)?;
        }
        for (x, y) in a.dimensions.into_iter().zip(b.dimensions) {
            close("dimensions", x, y, EPS_2DP)?;
        }
        for (x, y) in a.location.into_iter().zip(b.location) {
            close("location", x, y, EPS_2DP)?;
        }

        match (a.score, b.score) {
            (None, None) => {}
            (Some(x), Some(y)) => close("score", x, y, EPS_4DP)?,
            (x, y) => return Err(format!("object {i}: score {x:?} vs {y:?}")),
        }
    }

    Ok(())
}
