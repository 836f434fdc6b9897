//! Integration tests for the export command

use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

use crate::helpers::{arg, image_tree, imgcsv, run_imgcsv};

fn season_tree() -> TempDir {
    image_tree(&[
        "Sommer/Artikel-XY/119/img001.jpg",
        "Sommer/Artikel-XY/119/img002.png",
        "Sommer/B2/200/a.webp",
        "Sommer/notes.txt",
        ".cache/Old/1/x.jpg",
    ])
}

// ============================================================================
// Folder Mode
// ============================================================================

#[test]
fn convention_exports_parent_folders() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    let (stdout, stderr, code) = run_imgcsv(&home, &["export", &arg(tree.path()), "--convention"]);

    assert_eq!(code, 0, "stderr: {}", stderr);
    insta::assert_snapshot!(stdout, @r"
    Itemcode,Colorcode,ImageLink
    Artikel-XY,119,Sommer/Artikel-XY/119/img001.jpg
    Artikel-XY,119,Sommer/Artikel-XY/119/img002.png
    B2,200,Sommer/B2/200/a.webp
    ");
}

#[test]
fn convention_is_unaffected_by_include_leaf_flag() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    let (stdout, stderr, code) = run_imgcsv(
        &home,
        &["export", &arg(tree.path()), "--convention", "--include-leaf"],
    );

    assert_eq!(code, 0, "stderr: {}", stderr);
    insta::assert_snapshot!(stdout, @r"
    Itemcode,Colorcode,ImageLink
    Artikel-XY,119,Sommer/Artikel-XY/119/img001.jpg
    Artikel-XY,119,Sommer/Artikel-XY/119/img002.png
    B2,200,Sommer/B2/200/a.webp
    ");
}

#[test]
fn convention_is_unaffected_by_configured_include_leaf() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[mapping]\ninclude_leaf = true\n",
    )
    .unwrap();
    let tree = image_tree(&["Sommer/Artikel-XY/119/img001.jpg"]);

    imgcsv(&home)
        .args(["export", &arg(tree.path()), "--convention"])
        .assert()
        .success()
        .stdout("Itemcode,Colorcode,ImageLink\nArtikel-XY,119,Sommer/Artikel-XY/119/img001.jpg\n");
}

#[test]
fn explicit_roles_on_folder_levels() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    let (stdout, _stderr, code) = run_imgcsv(
        &home,
        &[
            "export",
            &arg(tree.path()),
            "--role",
            "0=tag:Season",
            "--role",
            "1=itemcode",
            "--role",
            "-1=colorcode",
        ],
    );

    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout, @r"
    Itemcode,Colorcode,Season,ImageLink
    Artikel-XY,119,Sommer,Sommer/Artikel-XY/119/img001.jpg
    Artikel-XY,119,Sommer,Sommer/Artikel-XY/119/img002.png
    B2,200,Sommer,Sommer/B2/200/a.webp
    ");
}

#[test]
fn hidden_folders_are_listed_on_request() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    imgcsv(&home)
        .args(["export", &arg(tree.path()), "--convention", "--hidden"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Old,1,.cache/Old/1/x.jpg"));
}

#[test]
fn base_url_builds_links() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["Sommer/Artikel XY/119/img 1.jpg"]);
    imgcsv(&home)
        .args([
            "export",
            &arg(tree.path()),
            "--convention",
            "--base-url",
            "https://cdn.example.com/img/",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Artikel XY,119,https://cdn.example.com/img/Sommer/Artikel%20XY/119/img%201.jpg",
        ));
}

#[test]
fn missing_manifest_entry_leaves_link_empty_and_continues() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    let manifest = home.path().join("links.csv");
    fs::write(
        &manifest,
        "path,url\n\
         Sommer/Artikel-XY/119/img001.jpg,https://share.example/1\n\
         a.webp,https://share.example/a\n",
    )
    .unwrap();

    let (stdout, stderr, code) = run_imgcsv(
        &home,
        &[
            "export",
            &arg(tree.path()),
            "--convention",
            "--links",
            &arg(&manifest),
        ],
    );

    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout, @r"
    Itemcode,Colorcode,ImageLink
    Artikel-XY,119,https://share.example/1
    Artikel-XY,119,
    B2,200,https://share.example/a
    ");
    assert!(stderr.contains("Link resolution failed"));
}

#[test]
fn listing_file_exports_remote_paths() {
    let home = TempDir::new().unwrap();
    let listing = home.path().join("remote.txt");
    fs::write(
        &listing,
        "# shared drive dump\n\
         Winter/K9/300/front.jpg\n\
         Winter/K9/300/spec.pdf\n\
         ./Winter/K9/301/back.png\n",
    )
    .unwrap();

    let (stdout, _stderr, code) = run_imgcsv(
        &home,
        &["export", "--list", &arg(&listing), "--convention"],
    );

    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout, @r"
    Itemcode,Colorcode,ImageLink
    K9,300,Winter/K9/300/front.jpg
    K9,301,Winter/K9/301/back.png
    ");
}

// ============================================================================
// Filename Mode
// ============================================================================

#[test]
fn named_files_split_on_separator() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["CSF440-119.jpg", "CSF441-120.png"]);
    let (stdout, _stderr, code) = run_imgcsv(
        &home,
        &[
            "export",
            &arg(&tree.path().join("CSF440-119.jpg")),
            &arg(&tree.path().join("CSF441-120.png")),
            "--role",
            "0=itemcode",
            "--role",
            "1=colorcode",
        ],
    );

    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout, @r"
    Itemcode,Colorcode,ImageLink
    CSF440,119,CSF440-119.jpg
    CSF441,120,CSF441-120.png
    ");
}

#[test]
fn multiple_separators_and_removed_keywords() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["CSF440__119-front_thumb.webp"]);
    imgcsv(&home)
        .args([
            "export",
            &arg(&tree.path().join("CSF440__119-front_thumb.webp")),
            "-s",
            "__",
            "-s",
            "-",
            "-r",
            "_thumb",
            "--role",
            "0=itemcode",
            "--role",
            "1=colorcode",
            "--role",
            "2=tag:View",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Itemcode,Colorcode,View,ImageLink\nCSF440,119,front,CSF440__119-front_thumb.webp\n",
        ));
}

#[test]
fn values_with_commas_are_quoted() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["A1-red, dark-2024.jpg"]);
    let (stdout, _stderr, code) = run_imgcsv(
        &home,
        &[
            "export",
            &arg(&tree.path().join("A1-red, dark-2024.jpg")),
            "--role",
            "0=itemcode",
            "--role",
            "1=tag:Color",
            "--role",
            "2=tag:Season",
            "--filename-column",
        ],
    );

    assert_eq!(code, 0);
    insta::assert_snapshot!(stdout, @r#"
    Itemcode,Colorcode,Color,Season,ImageLink,Filename
    A1,,"red, dark",2024,"A1-red, dark-2024.jpg","A1-red, dark-2024.jpg"
    "#);
}

#[test]
fn duplicate_singular_role_warns_and_later_position_wins() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["A-B.jpg"]);
    let (stdout, stderr, code) = run_imgcsv(
        &home,
        &[
            "export",
            &arg(&tree.path().join("A-B.jpg")),
            "--role",
            "0=itemcode",
            "--role",
            "1=itemcode",
        ],
    );

    assert_eq!(code, 0);
    assert!(stdout.contains("\nB,,A-B.jpg\n"));
    assert!(stderr.contains("itemcode is assigned to positions 0, 1"));
}

// ============================================================================
// Output
// ============================================================================

#[test]
fn output_file_is_written() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    let out = home.path().join("export.csv");

    imgcsv(&home)
        .args([
            "export",
            &arg(tree.path()),
            "--convention",
            "-o",
            &arg(&out),
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Exported 3 row(s)"));

    let content = fs::read_to_string(&out).unwrap();
    assert!(content.starts_with("Itemcode,Colorcode,ImageLink\n"));
    assert_eq!(content.lines().count(), 4);
}

#[test]
fn json_format_emits_objects() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    let (stdout, _stderr, code) = run_imgcsv(
        &home,
        &["export", &arg(tree.path()), "--convention", "--format", "json"],
    );

    assert_eq!(code, 0);
    let rows: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(rows.as_array().unwrap().len(), 3);
    assert_eq!(rows[2]["itemcode"], "B2");
    assert_eq!(rows[2]["display_name"], "a.webp");
}

#[test]
fn configured_headers_and_separators_are_used() {
    let home = TempDir::new().unwrap();
    fs::write(
        home.path().join("config.toml"),
        "[mapping]\nseparators = [\"_\"]\n\n[export]\nitemcode_header = \"Artikel\"\ncolorcode_header = \"Farbcode\"\n",
    )
    .unwrap();
    let tree = image_tree(&["K9_300.jpg"]);

    imgcsv(&home)
        .args([
            "export",
            &arg(&tree.path().join("K9_300.jpg")),
            "--role",
            "0=itemcode",
            "--role",
            "1=farbcode",
        ])
        .assert()
        .success()
        .stdout("Artikel,Farbcode,ImageLink\nK9,300,K9_300.jpg\n");
}

// ============================================================================
// Error Handling
// ============================================================================

#[test]
fn empty_input_warns_and_writes_nothing() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["docs/readme.txt"]);
    let out = home.path().join("export.csv");

    let (stdout, stderr, code) = run_imgcsv(
        &home,
        &["export", &arg(tree.path()), "--convention", "-o", &arg(&out)],
    );

    assert_eq!(code, 0);
    assert!(stdout.is_empty());
    assert!(stderr.contains("No images found"));
    assert!(!out.exists());
}

#[test]
fn missing_source_exits_1() {
    let home = TempDir::new().unwrap();
    imgcsv(&home)
        .args(["export", "/nonexistent/photo.jpg", "--role", "0=itemcode"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn no_roles_is_an_error() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    imgcsv(&home)
        .args(["export", &arg(tree.path())])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("No roles assigned"));
}

#[test]
fn convention_on_named_files_is_an_error() {
    let home = TempDir::new().unwrap();
    let tree = image_tree(&["CSF440-119-front.jpg"]);
    imgcsv(&home)
        .args([
            "export",
            &arg(&tree.path().join("CSF440-119-front.jpg")),
            "--convention",
        ])
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("--convention maps folder levels"));
}

#[test]
fn convention_with_filename_mode_is_an_error() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    imgcsv(&home)
        .args([
            "export",
            &arg(tree.path()),
            "--mode",
            "filename",
            "--convention",
        ])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs folder mode"));
}

#[test]
fn invalid_role_spec_is_an_error() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    imgcsv(&home)
        .args(["export", &arg(tree.path()), "--role", "0=size"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown role 'size'"));
}

#[test]
fn interactive_without_terminal_is_an_error() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    imgcsv(&home)
        .args(["export", &arg(tree.path()), "--interactive"])
        .write_stdin("itemcode\n")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("needs a terminal"));
}

#[test]
fn invalid_base_url_is_an_error() {
    let home = TempDir::new().unwrap();
    let tree = season_tree();
    imgcsv(&home)
        .args([
            "export",
            &arg(tree.path()),
            "--convention",
            "--base-url",
            "cdn.example.com",
        ])
        .assert()
        .code(1);
}
