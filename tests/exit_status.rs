use std::{fs, process::Command};
use tempfile::tempdir;

fn unicorn_cache() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_unicorn-cache"));
    cmd.env_remove("UNICORN_HTTP_TIMEOUT_SECS")
        .env("RUST_LOG", "error");
    cmd
}

#[test]
fn cache_dir_collision_exits_nonzero() {
    let tmp = tempdir().unwrap();
    let cache = tmp.path().join("cached-data");
    fs::write(&cache, "not a directory").unwrap();

    let status = unicorn_cache()
        .env("UNICORN_CACHE_DIR", &cache)
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(cache.is_file());
    assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
}

#[test]
fn bad_config_exits_nonzero_without_writing() {
    let tmp = tempdir().unwrap();
    let cache = tmp.path().join("cached-data");

    let status = unicorn_cache()
        .env("UNICORN_CACHE_DIR", &cache)
        .env("UNICORN_HTTP_TIMEOUT_SECS", "soon")
        .status()
        .unwrap();

    assert!(!status.success());
    assert!(!cache.exists());
}
