/*!
 * Integration tests for the filtergen binary
 */

use std::fs::{self, File};
use std::path::Path;
use std::process::{Command, Output};

use tempfile::tempdir;

fn filtergen(args: &[&str], cwd: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_filtergen"))
        .args(args)
        .current_dir(cwd)
        .output()
        .unwrap()
}

fn create_layout(root: &Path, files: &[&str]) {
    let core = root.join("src").join("Lightroom.Core");
    fs::create_dir_all(core.join("d3d11rhi")).unwrap();
    for name in files {
        File::create(core.join("d3d11rhi").join(name)).unwrap();
    }
}

#[test]
fn test_default_run_without_arguments() {
    let temp_dir = tempdir().unwrap();
    create_layout(temp_dir.path(), &["D3D11RHI.cpp", "D3D11RHI.h", "notes.txt"]);

    let output = filtergen(&[], temp_dir.path());
    assert!(output.status.success(), "{:?}", output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        "Generated Lightroom.Core.vcxproj.filters"
    );

    let manifest = temp_dir
        .path()
        .join("src")
        .join("Lightroom.Core")
        .join("Lightroom.Core.vcxproj.filters");
    let xml = fs::read_to_string(manifest).unwrap();
    assert!(xml.contains(r#"<ClCompile Include="LightroomSDK.cpp">"#));
    assert!(xml.contains(r#"<ClCompile Include="d3d11rhi\D3D11RHI.cpp">"#));
    assert!(xml.contains(r#"<ClInclude Include="LightroomSDK.h">"#));
    assert!(xml.contains(r#"<ClInclude Include="d3d11rhi\D3D11RHI.h">"#));
    assert!(xml.contains("<Filter>d3d11rhi</Filter>"));
    assert!(!xml.contains("notes.txt"));
}

#[test]
fn test_missing_subdirectory_exits_with_failure() {
    let temp_dir = tempdir().unwrap();
    let core = temp_dir.path().join("src").join("Lightroom.Core");
    fs::create_dir_all(&core).unwrap();
    fs::write(core.join("Lightroom.Core.vcxproj.filters"), "keep me").unwrap();

    let output = filtergen(&[], temp_dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("d3d11rhi"));
    assert_eq!(
        fs::read_to_string(core.join("Lightroom.Core.vcxproj.filters")).unwrap(),
        "keep me"
    );
}

#[test]
fn test_explicit_root_output_and_stable_ids() {
    let temp_dir = tempdir().unwrap();
    create_layout(temp_dir.path(), &["b.cpp", "a.cpp"]);
    let root = temp_dir.path().join("src").join("Lightroom.Core");
    let root = root.to_string_lossy().to_string();

    let args = [root.as_str(), "-o", "out.filters", "--ids", "stable", "--sort"];
    assert!(filtergen(&args, temp_dir.path()).status.success());
    let first = fs::read_to_string(Path::new(&root).join("out.filters")).unwrap();

    assert!(filtergen(&args, temp_dir.path()).status.success());
    let second = fs::read_to_string(Path::new(&root).join("out.filters")).unwrap();

    assert_eq!(first, second);
    let a = first.find(r"d3d11rhi\a.cpp").unwrap();
    let b = first.find(r"d3d11rhi\b.cpp").unwrap();
    assert!(a < b);
}

#[test]
fn test_layout_file_and_table_report() {
    let temp_dir = tempdir().unwrap();
    fs::create_dir_all(temp_dir.path().join("engine").join("render")).unwrap();
    File::create(temp_dir.path().join("engine").join("render").join("pass.cpp")).unwrap();
    fs::write(
        temp_dir.path().join("layout.json"),
        r#"{
            "root": "engine",
            "output_file": "Engine.vcxproj.filters",
            "fixed_entries": [],
            "scans": [ { "subdirectory": "render", "group": "Render" } ]
        }"#,
    )
    .unwrap();

    let output = filtergen(&["--layout", "layout.json", "--report", "table"], temp_dir.path());
    assert!(output.status.success(), "{:?}", output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(r"render\pass.cpp"));
    assert!(stdout.contains("MANIFEST GENERATED"));

    let xml =
        fs::read_to_string(temp_dir.path().join("engine").join("Engine.vcxproj.filters")).unwrap();
    assert!(xml.contains(r#"<ClCompile Include="render\pass.cpp">"#));
    assert!(xml.contains("<Filter>Render</Filter>"));
}

#[test]
fn test_invalid_layout_is_rejected() {
    let temp_dir = tempdir().unwrap();
    create_layout(temp_dir.path(), &[]);
    fs::write(
        temp_dir.path().join("layout.json"),
        r#"{ "root": "src/Lightroom.Core", "scans": [ { "subdirectory": "d3d11rhi", "group": "Header Files" } ] }"#,
    )
    .unwrap();

    let output = filtergen(&["--layout", "layout.json"], temp_dir.path());
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Duplicate group name"));
}
