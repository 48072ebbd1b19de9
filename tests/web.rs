//! Browser smoke tests for the JavaScript facade

#![cfg(target_arch = "wasm32")]

use signature_tree::{InstancedGroup, TreeScene};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

const SMALL: &str = r#"
seed: 7
populations:
  foliage: 100
  gift_boxes: 10
  baubles: 40
  micro_lights: 20
  ribbon_segments: 50
"#;

#[wasm_bindgen_test]
fn scene_builds_from_yaml() {
    let scene = TreeScene::with_config(SMALL).unwrap();
    assert_eq!(scene.instance_count(InstancedGroup::Baubles), 40);
    assert_eq!(scene.instance_matrices(InstancedGroup::Ribbon).len(), 50 * 16);
    assert_eq!(scene.foliage_randoms().len(), 100);
    assert!(!scene.is_assembled());
}

#[wasm_bindgen_test]
fn invalid_yaml_is_an_error() {
    assert!(TreeScene::with_config("tree_height: [").is_err());
    assert!(TreeScene::with_config("tree_height: -3").is_err());
}

#[wasm_bindgen_test]
fn toggling_assembles_the_tree() {
    let mut scene = TreeScene::with_config(SMALL).unwrap();
    assert!(scene.toggle());
    for _ in 0..600 {
        scene.render(1.0 / 60.0);
    }
    assert!(scene.foliage_ratio() > 0.9);
    assert!(scene.core_visible());
    assert!(scene.take_instances_dirty(InstancedGroup::GiftBoxes));
    assert!(!scene.take_instances_dirty(InstancedGroup::GiftBoxes));
}

#[wasm_bindgen_test]
fn default_scene_has_full_populations() {
    let scene = TreeScene::new().unwrap();
    assert_eq!(scene.foliage_count(), 4000);
    assert_eq!(scene.instance_count(InstancedGroup::MicroLights), 300);
    assert!(scene.pixel_ratio() <= 2.0);
}

#[wasm_bindgen_test]
fn yaml_scene_uses_window_pixel_ratio() {
    let dpr = web_sys::window().unwrap().device_pixel_ratio();
    let scene = TreeScene::with_config(SMALL).unwrap();
    assert_eq!(scene.pixel_ratio(), (dpr as f32).min(2.0));
}
