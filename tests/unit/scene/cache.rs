use super::*;
use crate::path::shape::ShapeDef;

fn scene(d: &str) -> SceneInput {
    SceneInput::from_json_str(&format!(
        r#"{{"canvas":{{"width":200,"height":200}},"fps":30,"draw_budget_frames":60,
            "shapes":[{{"kind":"path","d":"{d}"}}]}}"#
    ))
    .unwrap()
}

#[test]
fn key_depends_on_content_only() {
    let a = SceneKey::of(&scene("M0 0 L50 50")).unwrap();
    let b = SceneKey::of(&scene("M0 0 L50 50")).unwrap();
    let c = SceneKey::of(&scene("M0 0 L50 60")).unwrap();
    assert_eq!(a, b);
    assert_ne!(a, c);
    assert_eq!(a.to_string().len(), 32);
}

#[test]
fn repeated_input_is_served_from_cache() {
    let mut cache = SceneCache::new(4);
    let input = scene("M0 0 L50 50");
    let (k1, s1) = cache.get_or_prepare(&input).unwrap();
    let (k2, s2) = cache.get_or_prepare(&input).unwrap();
    assert_eq!(k1, k2);
    assert!(Arc::ptr_eq(&s1, &s2));
    assert_eq!(
        cache.stats(),
        CacheStats {
            hits: 1,
            misses: 1,
            evictions: 0
        }
    );
}

#[test]
fn capacity_evicts_least_recently_used() {
    let mut cache = SceneCache::new(2);
    let (ka, _) = cache.get_or_prepare(&scene("M0 0 L10 10")).unwrap();
    let (kb, _) = cache.get_or_prepare(&scene("M0 0 L20 20")).unwrap();
    // Touch `a` so `b` becomes the eviction candidate.
    cache.get_or_prepare(&scene("M0 0 L10 10")).unwrap();
    let (kc, _) = cache.get_or_prepare(&scene("M0 0 L30 30")).unwrap();

    assert_eq!(cache.len(), 2);
    assert!(cache.get(&ka).is_some());
    assert!(cache.get(&kb).is_none());
    assert!(cache.get(&kc).is_some());
    assert_eq!(cache.stats().evictions, 1);
}

#[test]
fn invalidate_and_clear_drop_entries() {
    let mut cache = SceneCache::default();
    let (k, _) = cache.get_or_prepare(&scene("M0 0 L10 10")).unwrap();
    assert!(cache.invalidate(&k));
    assert!(!cache.invalidate(&k));
    assert!(cache.is_empty());

    cache.get_or_prepare(&scene("M0 0 L10 10")).unwrap();
    cache.clear();
    assert!(cache.is_empty());
    assert_eq!(cache.stats().misses, 2);
}

#[test]
fn preparation_errors_are_not_cached() {
    let mut cache = SceneCache::new(2);
    let mut bad = scene("M0 0 L10 10");
    bad.shapes.push(ShapeDef::path("M1 1 L2 2"));
    bad.fps.num = 0;
    assert!(cache.get_or_prepare(&bad).is_err());
    assert!(cache.is_empty());
}

#[test]
fn inputs_differing_outside_shapes_get_separate_entries() {
    let base = scene("M0 0 L50 50");
    let mut other = base.clone();
    other.draw_budget_frames = 90;

    let mut cache = SceneCache::new(4);
    let (k1, s1) = cache.get_or_prepare(&base).unwrap();
    let (k2, s2) = cache.get_or_prepare(&other).unwrap();
    assert_ne!(k1, k2);
    assert!(!Arc::ptr_eq(&s1, &s2));
    assert_eq!(s2.schedule().budget_frames, 90);
    assert_eq!(cache.len(), 2);
    assert_eq!(cache.stats().misses, 2);
}
