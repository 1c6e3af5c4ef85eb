use std::fs;
use std::path::PathBuf;

use formula_sketch::artifacts::create_next;
use formula_sketch::{ArtifactStore, PersistenceError, RasterImage, next_available_name};

// Fresh scratch directory under the system temp dir
fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("formula_sketch_test_{}", uuid::Uuid::new_v4().simple()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn create_test_store(root: &PathBuf) -> ArtifactStore {
    ArtifactStore::new(root.join("images"), root.join("formulas"), "formula", "формула")
}

#[test]
fn test_next_available_name_skips_existing() {
    let dir = scratch_dir();
    assert_eq!(next_available_name(&dir, "img", "png"), dir.join("img_1.png"));

    fs::write(dir.join("img_1.png"), b"").unwrap();
    fs::write(dir.join("img_2.png"), b"").unwrap();
    // Different extension does not count
    fs::write(dir.join("img_3.txt"), b"").unwrap();

    let next = next_available_name(&dir, "img", "png");
    assert_eq!(next, dir.join("img_3.png"));
    assert!(!next.exists());
}

#[test]
fn test_next_available_name_is_idempotent() {
    let dir = scratch_dir();
    fs::write(dir.join("img_1.png"), b"").unwrap();
    let first = next_available_name(&dir, "img", "png");
    let second = next_available_name(&dir, "img", "png");
    assert_eq!(first, second);
}

#[test]
fn test_next_available_name_fills_gaps() {
    let dir = scratch_dir();
    fs::write(dir.join("img_2.png"), b"").unwrap();
    assert_eq!(next_available_name(&dir, "img", "png"), dir.join("img_1.png"));
}

#[test]
fn test_create_next_never_reuses_a_name() {
    let dir = scratch_dir();
    let (a, _) = create_next(&dir, "note", "txt").unwrap();
    let (b, _) = create_next(&dir, "note", "txt").unwrap();
    assert_eq!(a, dir.join("note_1.txt"));
    assert_eq!(b, dir.join("note_2.txt"));
}

#[test]
fn test_save_all_twice_produces_numbered_pairs() {
    let root = scratch_dir();
    let store = create_test_store(&root);
    let raster = RasterImage::new(40, 20);

    let first = store.save_all(&raster, "x^2").unwrap();
    let second = store.save_all(&raster, "x^2").unwrap();

    assert_eq!(first.image_path, root.join("images").join("formula_1.png"));
    assert_eq!(first.formula_path, root.join("formulas").join("формула_1.txt"));
    assert_eq!(second.image_path, root.join("images").join("formula_2.png"));
    assert_eq!(second.formula_path, root.join("formulas").join("формула_2.txt"));

    assert_eq!(fs::read_to_string(&first.formula_path).unwrap(), "x^2");
    assert_eq!(fs::read_to_string(&second.formula_path).unwrap(), "x^2");

    let decoded = image::open(&first.image_path).unwrap().to_rgb8();
    assert_eq!(&decoded, raster.as_rgb());
}

#[test]
fn test_save_all_indices_are_independent() {
    let root = scratch_dir();
    let store = create_test_store(&root);
    store.ensure_dirs().unwrap();
    for i in 1..=3 {
        fs::write(root.join("images").join(format!("formula_{i}.png")), b"").unwrap();
    }

    let saved = store.save_all(&RasterImage::new(8, 8), "").unwrap();
    assert_eq!(saved.image_path, root.join("images").join("formula_4.png"));
    assert_eq!(saved.formula_path, root.join("formulas").join("формула_1.txt"));
    assert_eq!(fs::read_to_string(&saved.formula_path).unwrap(), "");
}

#[test]
fn test_save_all_creates_missing_directories() {
    let root = scratch_dir().join("nested").join("deeper");
    let store = create_test_store(&root);
    assert!(!store.images_dir().exists());

    store.save_all(&RasterImage::new(4, 4), "a").unwrap();
    assert!(store.images_dir().is_dir());
    assert!(store.formulas_dir().is_dir());
}

#[test]
fn test_save_all_reports_unwritable_directory() {
    let root = scratch_dir();
    // A regular file where the images directory should be
    fs::write(root.join("images"), b"not a directory").unwrap();
    let store = create_test_store(&root);

    let err = store.save_all(&RasterImage::new(4, 4), "a").unwrap_err();
    assert!(matches!(err, PersistenceError::CreateDir { .. }));
    assert!(!root.join("formulas").join("формула_1.txt").exists());
}

#[test]
fn test_save_all_keeps_image_when_formula_cannot_be_created() {
    let root = scratch_dir();
    // The prefix points into a subdirectory that never gets created
    let store = ArtifactStore::new(root.join("images"), root.join("formulas"), "formula", "missing/формула");
    let raster = RasterImage::new(12, 6);

    let err = store.save_all(&raster, "x^2").unwrap_err();
    let kept = root.join("images").join("formula_1.png");
    match &err {
        PersistenceError::CreateText { path, image_path, .. } => {
            assert_eq!(path, &root.join("formulas").join("missing/формула_1.txt"));
            assert_eq!(image_path, &kept);
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert!(err.to_string().contains("image kept at"));

    let decoded = image::open(&kept).unwrap().to_rgb8();
    assert_eq!(&decoded, raster.as_rgb());
}

#[test]
fn test_save_all_removes_image_that_failed_to_encode() {
    let root = scratch_dir();
    let store = create_test_store(&root);

    // PNG has no zero-width images
    let err = store.save_all(&RasterImage::new(0, 4), "a").unwrap_err();
    assert!(matches!(err, PersistenceError::WriteImage { .. }));
    assert!(fs::read_dir(root.join("images")).unwrap().next().is_none());
    assert!(fs::read_dir(root.join("formulas")).unwrap().next().is_none());
}
