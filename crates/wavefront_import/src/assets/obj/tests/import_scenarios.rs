//! End-to-end import scenarios
//!
//! Loads small object files from disk (or memory) and checks the assembled
//! model: attribute ordering, sentinel root handling, material-driven mesh
//! splits, permissive numeric parsing and material library handling.

use crate::assets::materials::MaterialLibraryError;
use crate::assets::obj::{
    AttributeKind, DiagnosticKind, Face, LoadError, PoolError, VertexRef, WavefrontModel, ROOT_NAME,
};
use crate::core::config::ImportConfig;
use crate::foundation::math::{Vec2, Vec3};
use approx::assert_relative_eq;
use std::io::Cursor;
use std::path::Path;
use tempfile::tempdir;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> WavefrontModel {
        parse_with(source, &ImportConfig::default())
    }

    fn parse_with(source: &str, config: &ImportConfig) -> WavefrontModel {
        WavefrontModel::from_reader(Cursor::new(source.as_bytes()), "memory.obj", config)
    }

    const TRIANGLE: &str = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvt 0 0\nvt 1 0\nvt 0 1\nvn 0 0 1\n";

    #[test]
    fn test_positions_keep_file_order_across_interleaving() {
        let model = parse(
            "v 1 1 1\nvn 0 1 0\nvt 0.5 0.5\nv 2 2 2\nvt 0.1 0.2\nvn 1 0 0\nv 3 3 3\n",
        );

        for n in 1..=3u32 {
            let expected = n as f32;
            assert_eq!(model.resolve_position(n).unwrap(), Vec3::new(expected, expected, expected));
        }
        assert_eq!(model.resolve_normal(2).unwrap(), Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(model.resolve_texcoord(2).unwrap(), Vec2::new(0.1, 0.2));
        assert!(model.resolve_position(4).is_err());
        assert!(model.diagnostics().is_empty());
    }

    #[test]
    fn test_face_without_object_lands_in_root() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

        let meshes: Vec<_> = model.meshes().collect();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].name(), ROOT_NAME);
        assert_eq!(meshes[0].faces().len(), 1);
        assert_eq!(meshes[0].faces()[0].material, ROOT_NAME);
        assert_eq!(meshes[0].faces()[0].vertices[2], VertexRef::new(3, 0, 0));
    }

    #[test]
    fn test_material_change_splits_populated_mesh() {
        let source = format!(
            "{TRIANGLE}o box\nusemtl red\nf 1/1/1 2/2/1 3/3/1\nusemtl blue\nf 1/1/1 2/2/1 3/3/1\n"
        );
        let model = parse(&source);

        let names: Vec<&str> = model.meshes().map(|m| m.name()).collect();
        assert_eq!(names, vec![ROOT_NAME, "box", "boxblue"]);

        let box_mesh = model.mesh("box").unwrap();
        assert_eq!(box_mesh.faces().len(), 1);
        assert_eq!(box_mesh.faces()[0].material, "red");

        let blue_mesh = model.mesh("boxblue").unwrap();
        assert_eq!(blue_mesh.faces().len(), 1);
        assert_eq!(blue_mesh.faces()[0].material, "blue");

        assert!(model.material("red").is_some());
        assert!(model.material("blue").is_some());
    }

    #[test]
    fn test_material_change_on_empty_mesh_does_not_split() {
        let source = format!("{TRIANGLE}o box\nusemtl red\nusemtl blue\nf 1/1/1 2/2/1 3/3/1\n");
        let model = parse(&source);

        assert!(model.mesh("boxred").is_none());
        assert!(model.mesh("boxblue").is_none());
        let box_mesh = model.mesh("box").unwrap();
        assert_eq!(box_mesh.faces().len(), 1);
        assert_eq!(box_mesh.faces()[0].material, "blue");
    }

    #[test]
    fn test_malformed_position_becomes_zero_and_parsing_continues() {
        let model = parse("v 1 2 3\nv 4 oops 6\nv 7 8 9\nf 1 2 3\n");

        assert_eq!(model.resolve_position(2).unwrap(), Vec3::zeros());
        assert_eq!(model.resolve_position(3).unwrap(), Vec3::new(7.0, 8.0, 9.0));
        assert_eq!(model.face_count(), 1);

        let diagnostics = model.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert!(matches!(
            &diagnostics[0].kind,
            DiagnosticKind::MalformedNumericField { directive: "v", field } if field == "oops"
        ));
    }

    #[test]
    fn test_missing_texcoord_component_is_zero() {
        let model = parse("vt 0.5\nvt 0.25 0.75 0.0\n");

        assert_eq!(model.resolve_texcoord(1).unwrap(), Vec2::zeros());
        assert_eq!(model.resolve_texcoord(2).unwrap(), Vec2::new(0.25, 0.75));
        assert_eq!(model.diagnostics().len(), 1);
    }

    #[test]
    fn test_nonexistent_file_fails_to_open() {
        let dir = tempdir().unwrap();
        let result = WavefrontModel::load(dir.path().join("missing.obj"));

        match result {
            Err(LoadError::FileNotOpened { path, .. }) => assert!(path.ends_with("missing.obj")),
            Ok(_) => panic!("expected FileNotOpened"),
        }
    }

    #[test]
    fn test_directory_path_fails_to_open() {
        let dir = tempdir().unwrap();
        let result = WavefrontModel::load(dir.path());

        match result {
            Err(LoadError::FileNotOpened { path, .. }) => assert_eq!(path, dir.path()),
            Ok(_) => panic!("expected FileNotOpened"),
        }
    }

    #[test]
    fn test_repeated_missing_index_reported_once_per_face() {
        let model = parse("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 3//1 2//1 1//1\n");

        let diagnostics = model.diagnostics();
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 4);
        assert!(matches!(
            diagnostics[0].kind,
            DiagnosticKind::IndexOutOfRange(PoolError::IndexOutOfRange { kind: AttributeKind::Normal, index: 1, len: 0 })
        ));
    }

    #[test]
    fn test_irregular_spacing_parses_like_single_spacing() {
        let irregular = parse(&format!("{TRIANGLE}f  1/1/1   2/2/1  3/3/1\n"));
        let regular = parse(&format!("{TRIANGLE}f 1/1/1 2/2/1 3/3/1\n"));

        assert_eq!(
            irregular.mesh(ROOT_NAME).unwrap().faces(),
            regular.mesh(ROOT_NAME).unwrap().faces()
        );
    }

    #[test]
    fn test_comments_blank_lines_and_unknown_directives_are_skipped() {
        let model = parse("# header\n\n   \ns 1\nl 1 2\nv 1 2 3\r\nvp 0.5\n");

        assert_eq!(model.attributes().len(AttributeKind::Position), 1);
        assert_relative_eq!(model.resolve_position(1).unwrap().z, 3.0);
        assert!(model.diagnostics().is_empty());
    }

    #[test]
    fn test_slash_normal_faces_decoded_by_default() {
        let model = parse(&format!("{TRIANGLE}f 1//1 2//1 3//1\n"));

        let face = &model.mesh(ROOT_NAME).unwrap().faces()[0];
        assert_eq!(face.vertices[0], VertexRef::new(1, 0, 1));
        assert!(model.diagnostics().is_empty());
    }

    #[test]
    fn test_slash_normal_faces_kept_with_zero_indices_in_legacy_mode() {
        let model = parse_with(&format!("{TRIANGLE}f 1//1 2//1 3//1\n"), &ImportConfig::legacy());

        let faces = model.mesh(ROOT_NAME).unwrap().faces();
        assert_eq!(faces, &[Face::empty(ROOT_NAME)]);
        assert!(matches!(model.diagnostics()[0].kind, DiagnosticKind::UnsupportedFaceEncoding { .. }));
    }

    #[test]
    fn test_forward_reference_is_reported_but_kept() {
        let model = parse("v 0 0 0\nv 1 0 0\nf 1 2 3\nv 0 1 0\n");

        assert_eq!(model.face_count(), 1);
        assert!(model.resolve_position(3).is_ok());
        assert!(matches!(
            model.diagnostics()[0].kind,
            DiagnosticKind::IndexOutOfRange(_)
        ));
    }

    #[test]
    fn test_short_face_dropped_and_reported() {
        let model = parse("v 0 0 0\nv 1 0 0\nf 1 2\n");

        assert_eq!(model.face_count(), 0);
        assert!(matches!(model.diagnostics()[0].kind, DiagnosticKind::TooFewVertices { found: 2 }));
    }

    #[test]
    fn test_quad_triangulated_when_enabled() {
        let config = ImportConfig { triangulate_polygons: true, ..ImportConfig::default() };
        let model = parse_with("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n", &config);

        assert_eq!(model.face_count(), 2);
        assert!(model.diagnostics().is_empty());
    }

    #[test]
    fn test_triangulation_keeps_first_triangle_when_trailing_reference_differs() {
        let config = ImportConfig { triangulate_polygons: true, ..ImportConfig::default() };
        let model = parse_with(&format!("{TRIANGLE}v 1 1 0\nf 1/1 2/2 3/3 4\n"), &config);

        let faces = model.mesh(ROOT_NAME).unwrap().faces();
        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].vertices[2], VertexRef::new(3, 3, 0));
        assert_eq!(model.diagnostics().len(), 1);
        assert!(matches!(model.diagnostics()[0].kind, DiagnosticKind::UnsupportedFaceEncoding { .. }));
    }

    #[test]
    fn test_nameless_directives_are_ignored() {
        let model = parse("o\nusemtl\nv 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n");

        assert_eq!(model.mesh(ROOT_NAME).unwrap().faces().len(), 1);
        assert_eq!(model.diagnostics().len(), 2);
        assert!(model
            .diagnostics()
            .iter()
            .all(|d| matches!(d.kind, DiagnosticKind::MissingName { .. })));
    }

    #[test]
    fn test_material_library_recorded_relative_to_object_file() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("scene.mtl"), "newmtl red\nKd 1 0 0\n").unwrap();
        let obj_path = dir.path().join("scene.obj");
        std::fs::write(&obj_path, format!("mtllib scene.mtl\n{TRIANGLE}usemtl red\nf 1 2 3\n")).unwrap();

        let model = WavefrontModel::load(&obj_path).unwrap();

        assert_eq!(model.object_path(), obj_path.as_path());
        assert_eq!(model.material_library_path(), Some(dir.path().join("scene.mtl").as_path()));
        assert!(model.material_library_source().unwrap().contains("newmtl red"));
        assert!(model.material("red").unwrap().properties.is_none());
    }

    #[test]
    fn test_material_library_interpreted_when_enabled() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("scene.mtl"),
            "newmtl red\nKd 1 0 0\nmap_Kd red.png\nnewmtl unused\nKd 0 1 0\n",
        )
        .unwrap();
        let obj_path = dir.path().join("scene.obj");
        std::fs::write(&obj_path, format!("{TRIANGLE}usemtl red\nf 1 2 3\nmtllib scene.mtl\n")).unwrap();

        let model = WavefrontModel::load_with_config(&obj_path, &ImportConfig::full()).unwrap();

        let red = model.material("red").unwrap().properties.as_ref().unwrap();
        assert_eq!(red.diffuse, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(red.diffuse_map.as_deref(), Some(dir.path().join("red.png").as_path()));
        assert!(model.material("unused").is_some());
        assert_eq!(model.mesh(ROOT_NAME).unwrap().faces()[0].material, "red");
    }

    #[test]
    fn test_unreadable_material_library_does_not_abort() {
        let model = parse(&format!("mtllib nowhere.mtl\n{TRIANGLE}f 1 2 3\n"));

        assert_eq!(model.material_library_path(), Some(Path::new("nowhere.mtl")));
        assert!(model.material_library_source().is_none());
        assert_eq!(model.face_count(), 1);
        assert!(matches!(
            model.diagnostics()[0].kind,
            DiagnosticKind::MaterialLibrary(MaterialLibraryError::Unreadable { .. })
        ));
    }
}
