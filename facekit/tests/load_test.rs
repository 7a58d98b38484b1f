//! End-to-end loads into the in-memory scene
//!
//! Generates small OBJ face directories, loads them through `Scene`, and
//! checks the resulting shape keys and packed output.

mod common;

use common::FaceDirBuilder;
use facekit::formats::{read_face_model, write_face_model};
use facekit::{ErrorKind, FaceModelLoader, Layout, Scene, load_face_model};

#[test]
fn test_scenario_smile_and_one_identity() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile", "frown"]}"#)
        .variant("smile", 0.1)
        .variant("identity000", 0.2)
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    assert_eq!(report.counts(), (1, 1));
    assert_eq!(scene.len(), 1, "variant objects should be deleted");

    let face = scene.object(report.face_model).unwrap();
    assert_eq!(face.name, "ICTFaceModel");
    let keys: Vec<&str> = face.shape_key_names().collect();
    assert_eq!(keys, vec!["Basis", "smile", "identity000"]);
}

#[test]
fn test_scenario_without_identities() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile", "frown"]}"#)
        .variant("smile", 0.1)
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    assert_eq!(report.counts(), (1, 0));
}

#[test]
fn test_shape_keys_follow_manifest_then_identity_order() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["mouthLeft", "browUp", "eyeBlink_L"]}"#)
        .variant("eyeBlink_L", 0.3)
        .variant("mouthLeft", 0.1)
        .variant("browUp", 0.2)
        .variant("identity001", 0.5)
        .variant("identity000", 0.4)
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    let face = scene.object(report.face_model).unwrap();
    let keys: Vec<&str> = face.shape_key_names().collect();
    assert_eq!(
        keys,
        vec![
            "Basis",
            "mouthLeft",
            "browUp",
            "eyeBlink_L",
            "identity000",
            "identity001"
        ]
    );
    assert_eq!(face.shape_key("browUp").unwrap().positions[0][1], 0.2);
}

#[test]
fn test_empty_variant_file_is_skipped() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile", "frown"]}"#)
        .raw("smile.obj", "# exported without geometry\n")
        .variant("frown", 0.1)
        .raw("identity000.obj", "")
        .variant("identity001", 0.3)
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    assert_eq!(report.expressions, vec!["frown"]);
    assert_eq!(report.identities, vec!["identity001"]);
}

#[test]
fn test_corrupt_identity_ends_scan() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile"]}"#)
        .variant("smile", 0.1)
        .variant("identity000", 0.2)
        .raw("identity001.obj", "v 0 0 0\nf 1 2 9\n")
        .variant("identity002", 0.3)
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    assert_eq!(report.identities, vec!["identity000"]);
}

#[test]
fn test_no_variants_leaves_base_in_scene() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile"]}"#)
        .build();
    let mut scene = Scene::new();

    let err = load_face_model(dir.path(), &mut scene).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NoMorphTargets);
    assert_eq!(scene.len(), 1);
    assert!(scene.find_by_name("ICTFaceModel").is_some());
}

#[test]
fn test_empty_manifest_object() {
    let dir = FaceDirBuilder::new()
        .manifest("{}")
        .variant("identity000", 0.1)
        .build();
    let mut scene = Scene::new();

    let err = load_face_model(dir.path(), &mut scene).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Config);
    assert!(scene.is_empty());
}

#[test]
fn test_missing_base_mesh() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile"]}"#)
        .variant("smile", 0.1)
        .without_base()
        .build();
    let mut scene = Scene::new();

    let err = load_face_model(dir.path(), &mut scene).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("generic_neutral_mesh.obj"));
    assert!(scene.is_empty());
}

#[test]
fn test_mismatched_topology_is_left_to_host() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile", "frown"]}"#)
        .variant("smile", 0.1)
        .raw("frown.obj", "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n")
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    // Both imported, only the matching one became a shape key
    assert_eq!(report.counts(), (2, 0));
    let keys: Vec<&str> = scene
        .object(report.face_model)
        .unwrap()
        .shape_key_names()
        .collect();
    assert_eq!(keys, vec!["Basis", "smile"]);
}

#[test]
fn test_repeated_expression_reports_host_name() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["smile", "smile"]}"#)
        .variant("smile", 0.1)
        .build();
    let mut scene = Scene::new();

    let report = load_face_model(dir.path(), &mut scene).unwrap();

    assert_eq!(report.expressions, vec!["smile", "smile.001"]);
    let keys: Vec<&str> = scene
        .object(report.face_model)
        .unwrap()
        .shape_key_names()
        .collect();
    assert_eq!(keys, vec!["Basis", "smile", "smile.001"]);
}

#[test]
fn test_custom_layout_with_scene() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": []}"#)
        .variant("id_0000", 0.1)
        .build();
    let layout = Layout {
        identity_prefix: "id_".to_string(),
        identity_digits: 4,
        ..Default::default()
    };
    let mut scene = Scene::new();

    let report = FaceModelLoader::new(layout)
        .load(dir.path(), &mut scene)
        .unwrap();

    assert_eq!(report.identities, vec!["id_0000"]);
}

#[test]
fn test_loaded_model_packs() {
    let dir = FaceDirBuilder::new()
        .manifest(r#"{"expressions": ["jawOpen"]}"#)
        .variant("jawOpen", -0.25)
        .variant("identity000", 0.5)
        .build();
    let mut scene = Scene::new();
    let report = load_face_model(dir.path(), &mut scene).unwrap();

    let mut buf = Vec::new();
    write_face_model(&mut buf, scene.object(report.face_model).unwrap()).unwrap();
    let packed = read_face_model(&buf).unwrap();

    assert_eq!(packed.positions.len(), common::BASE_QUAD.len());
    let names: Vec<&str> = packed.shapes.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["jawOpen", "identity000"]);
    assert_eq!(packed.shapes[0].deltas[0], [0.0, -0.25, 0.0]);
}
