#![allow(dead_code)]

use lantern::config::Config;
use lantern::server::context::ServerContext;
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary web root holding `files`, plus a context serving it.
pub fn site<B: AsRef<[u8]>>(files: &[(&str, B)]) -> (TempDir, Arc<ServerContext>) {
    let dir = tempfile::tempdir().unwrap();
    for (name, bytes) in files {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, AsRef::<[u8]>::as_ref(bytes)).unwrap();
    }

    let config = Config {
        web_root: dir.path().to_path_buf(),
        ..Config::default()
    };
    (dir, Arc::new(ServerContext::new(config)))
}

/// An empty web root.
pub fn empty_site() -> (TempDir, Arc<ServerContext>) {
    site::<&[u8]>(&[])
}

/// Splits a raw response into head and body.
pub fn split_response(raw: &[u8]) -> (String, Vec<u8>) {
    let end = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has no header terminator");
    let head = String::from_utf8(raw[..end].to_vec()).unwrap();
    (head, raw[end + 4..].to_vec())
}

/// Value of a header line in a serialized response head.
pub fn header<'a>(head: &'a str, name: &str) -> Option<&'a str> {
    head.lines()
        .skip(1)
        .find_map(|line| line.strip_prefix(name)?.strip_prefix(": "))
}
