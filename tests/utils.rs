#![allow(dead_code)]

use log::debug;
use scaffold::context::{ProjectFields, Variables};
use scaffold::project::{create_project, CreateRequest};
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub const TEMPLATES_DIR: &str = "tests/templates";

/// Request that renders `tests/templates/py-lib` reproducibly.
pub fn py_lib_request(output_dir: &Path) -> CreateRequest {
    let fields = ProjectFields {
        description: "Tools for Acme.".into(),
        python_version: ">=3.12".into(),
        author: "Ada Lovelace".into(),
        email: "ada@example.com".into(),
        year: 2024,
        ..ProjectFields::new("Acme Tools")
    };

    CreateRequest {
        fields,
        template: "py-lib".into(),
        output_dir: output_dir.to_path_buf(),
        extra: Variables::new(),
        overwrite: false,
    }
}

/// Every file below `root` as a relative path.
pub fn relative_files(root: &Path) -> BTreeSet<PathBuf> {
    WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.path().is_file())
        .map(|e| e.path().strip_prefix(root).unwrap().to_path_buf())
        .collect()
}

/// Prints a diff of files and their contents between two directories.
/// Shows files only present in one directory and content differences for files present in both.
pub fn print_dir_diff(actual: &Path, expected: &Path) {
    let actual_files = relative_files(actual);
    let expected_files = relative_files(expected);

    println!("\n=== Directory Comparison ===");
    println!("Actual output:   {:?}", actual);
    println!("Expected output: {:?}", expected);

    for file in actual_files.difference(&expected_files) {
        println!("  + {:?}", file);
    }
    for file in expected_files.difference(&actual_files) {
        println!("  - {:?}", file);
    }
    for file in actual_files.intersection(&expected_files) {
        let content1 = fs::read(actual.join(file)).unwrap();
        let content2 = fs::read(expected.join(file)).unwrap();
        if content1 != content2 {
            println!("\n  File: {:?}", file);
            println!("  --- Actual content:\n{}", String::from_utf8_lossy(&content1));
            println!("  --- Expected content:\n{}", String::from_utf8_lossy(&content2));
        }
    }
    println!("=== End of Comparison ===\n");
}

/// Asserts that two directories hold byte-identical trees.
pub fn assert_same_tree(actual: &Path, expected: &Path) {
    let different = dir_diff::is_different(actual, expected).unwrap();
    if different {
        print_dir_diff(actual, expected);
        panic!("Directories differ. See above for details.");
    }
}

/// Creates `py-lib` in a temporary directory, strips the manifest and compares
/// the project with `expected_dir`.
pub fn run_and_assert(expected_dir: &str) {
    let tmp_dir = tempfile::tempdir().unwrap();
    let destination = create_project(TEMPLATES_DIR, &py_lib_request(tmp_dir.path())).unwrap();
    debug!("Generated into {}", destination.display());

    // The manifest carries a timestamp, so it is checked separately.
    fs::remove_dir_all(destination.join(".scaffold")).unwrap();
    assert_same_tree(&destination, Path::new(expected_dir));
}
