//! Unit tests for zip archive creation.

use super::*;
use crate::error::PackagerError;
use rstest::{fixture, rstest};
use std::io::Read;
use tempfile::TempDir;

#[fixture]
fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir creation succeeds")
}

fn root(dir: &TempDir) -> Utf8PathBuf {
    Utf8PathBuf::try_from(dir.path().to_path_buf()).expect("temp dir is UTF-8")
}

fn write_sources(root: &Utf8Path, files: &[(&str, &str)]) -> Vec<(Utf8PathBuf, String)> {
    files
        .iter()
        .map(|(name, body)| {
            let path = root.join(name);
            fs::write(&path, body).expect("write source");
            (path, (*name).to_owned())
        })
        .collect()
}

#[rstest]
fn compute_sha256_of_known_content(temp_dir: TempDir) {
    let path = root(&temp_dir).join("empty.bin");
    // SHA-256 of an empty file is the well-known constant.
    fs::write(&path, b"").expect("write");
    let digest = compute_sha256(&path).expect("sha256 succeeds");
    assert_eq!(
        digest,
        concat!(
            "e3b0c44298fc1c149afbf4c8996fb924",
            "27ae41e4649b934ca495991b7852b855"
        )
    );
}

#[rstest]
fn archive_contains_entries_by_base_name(temp_dir: TempDir) {
    let root = root(&temp_dir);
    let entries = write_sources(
        &root,
        &[("content.js", "alpha"), ("manifest.json", r#"{"version":"1.0"}"#)],
    );
    let archive_path = root.join("out.zip");

    ZipArchiveWriter
        .write_archive(&archive_path, &entries)
        .expect("archive creation succeeds");

    assert_eq!(
        list_entries(&archive_path).expect("list"),
        ["content.js", "manifest.json"]
    );
}

#[rstest]
fn archive_entries_are_deflated_and_round_trip(temp_dir: TempDir) {
    let root = root(&temp_dir);
    let body = "document.querySelectorAll('a');\n".repeat(64);
    let entries = write_sources(&root, &[("content.js", body.as_str())]);
    let archive_path = root.join("out.zip");
    ZipArchiveWriter
        .write_archive(&archive_path, &entries)
        .expect("archive");

    let mut archive = ZipArchive::new(fs::File::open(&archive_path).expect("open"))
        .expect("valid zip");
    let mut entry = archive.by_name("content.js").expect("entry present");
    assert_eq!(entry.compression(), CompressionMethod::Deflated);
    assert!(entry.compressed_size() < entry.size());

    let mut contents = String::new();
    entry.read_to_string(&mut contents).expect("read entry");
    assert_eq!(contents, body);
}

#[rstest]
fn empty_entry_list_produces_empty_archive(temp_dir: TempDir) {
    let archive_path = root(&temp_dir).join("empty.zip");

    ZipArchiveWriter
        .write_archive(&archive_path, &[])
        .expect("empty archive");

    assert!(archive_path.is_file());
    assert!(list_entries(&archive_path).expect("list").is_empty());
}

#[rstest]
fn identical_inputs_produce_identical_archives(temp_dir: TempDir) {
    let root = root(&temp_dir);
    let entries = write_sources(&root, &[("popup.js", "let x = 1;"), ("popup.html", "<p>")]);

    let mut digests = Vec::new();
    for i in 0..2 {
        let archive_path = root.join(format!("run{i}.zip"));
        ZipArchiveWriter
            .write_archive(&archive_path, &entries)
            .expect("archive");
        digests.push(compute_sha256(&archive_path).expect("digest"));
    }

    assert_eq!(digests[0], digests[1]);
}

#[rstest]
fn missing_source_fails_without_leaving_archive(temp_dir: TempDir) {
    let root = root(&temp_dir);
    let archive_path = root.join("out.zip");
    let entries = vec![(root.join("absent.js"), "absent.js".to_owned())];

    let err = ZipArchiveWriter
        .write_archive(&archive_path, &entries)
        .expect_err("missing source rejected");

    assert!(matches!(err, PackagerError::Io(_)), "got {err:?}");
    assert!(!archive_path.exists());
    let leftovers: Vec<_> = fs::read_dir(&root).expect("read dir").collect();
    assert!(leftovers.is_empty(), "temporary file left behind");
}

#[rstest]
fn write_replaces_existing_file(temp_dir: TempDir) {
    let root = root(&temp_dir);
    let archive_path = root.join("out.zip");
    fs::write(&archive_path, b"not a zip").expect("write stale");
    let entries = write_sources(&root, &[("background.js", "chrome.runtime;")]);

    ZipArchiveWriter
        .write_archive(&archive_path, &entries)
        .expect("archive");

    assert_eq!(list_entries(&archive_path).expect("list"), ["background.js"]);
}

#[rstest]
fn list_entries_rejects_non_zip(temp_dir: TempDir) {
    let path = root(&temp_dir).join("bogus.zip");
    fs::write(&path, b"plain text").expect("write");

    let err = list_entries(&path).expect_err("not a zip");

    assert!(matches!(err, PackagerError::Archive(_)), "got {err:?}");
}
