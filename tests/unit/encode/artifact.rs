use super::*;

#[test]
fn temp_names_are_unique() {
    let a = TempArtifact::in_temp_dir("crtype-test", "gif");
    let b = TempArtifact::in_temp_dir("crtype-test", "gif");
    assert_ne!(a.path(), b.path());
    assert!(a.path().to_string_lossy().ends_with(".gif"));
}

#[test]
fn dropping_removes_the_file() {
    let artifact = TempArtifact::in_temp_dir("crtype-test", "bin");
    std::fs::write(artifact.path(), b"data").unwrap();
    let path = artifact.path().to_path_buf();
    assert_eq!(artifact.read().unwrap(), b"data");
    drop(artifact);
    assert!(!path.exists());
}

#[test]
fn persisting_moves_the_file_and_keeps_it() {
    let artifact = TempArtifact::in_temp_dir("crtype-test", "bin");
    std::fs::write(artifact.path(), b"kept").unwrap();
    let dest = std::env::temp_dir().join(format!("crtype-persist-{}.bin", std::process::id()));
    artifact.persist(&dest).unwrap();
    assert_eq!(std::fs::read(&dest).unwrap(), b"kept");
    std::fs::remove_file(dest).unwrap();
}

#[test]
fn sibling_path_stays_in_the_output_directory() {
    let out = Path::new("some/dir/out.gif");
    let tmp = sibling_temp_path(out);
    assert_eq!(tmp.parent(), Some(Path::new("some/dir")));
    let name = tmp.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with(".out.gif-"));
    assert!(name.ends_with(".tmp"));

    let bare = sibling_temp_path(Path::new("out.gif"));
    assert_eq!(bare.parent(), Some(Path::new("")));
}
