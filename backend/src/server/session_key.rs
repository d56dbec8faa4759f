//! Session signing key loading.

use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_MIN_LEN: usize = 64;

#[derive(Debug, thiserror::Error)]
pub enum SessionKeyError {
    #[error("failed to read session key at {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= 64 bytes, got {length}")]
    TooShort { path: PathBuf, length: usize },
}

/// Read the key at `path`, or generate an ephemeral key when `allow_ephemeral`
/// is set or this is a debug build.
pub fn load_session_key(path: &Path, allow_ephemeral: bool) -> Result<Key, SessionKeyError> {
    match read_key(path) {
        Ok(key) => Ok(key),
        Err(err) if allow_ephemeral || cfg!(debug_assertions) => {
            warn!(path = %path.display(), error = %err, "using ephemeral session key");
            Ok(Key::generate())
        }
        Err(err) => Err(err),
    }
}

fn read_key(path: &Path) -> Result<Key, SessionKeyError> {
    let mut bytes = std::fs::read(path).map_err(|source| SessionKeyError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let length = bytes.len();
    let key = if length < SESSION_KEY_MIN_LEN {
        Err(SessionKeyError::TooShort {
            path: path.to_path_buf(),
            length,
        })
    } else {
        Ok(Key::derive_from(&bytes))
    };
    bytes.zeroize();
    key
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::NamedTempFile;

    use super::*;

    fn key_file(len: usize) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("create key file");
        file.write_all(&vec![b'k'; len]).expect("write key file");
        file
    }

    #[rstest]
    fn reads_a_long_enough_key() {
        let file = key_file(SESSION_KEY_MIN_LEN);
        let first = read_key(file.path()).expect("key loads");
        let second = read_key(file.path()).expect("key loads");
        assert_eq!(first.master(), second.master());
    }

    #[rstest]
    fn rejects_short_keys() {
        let file = key_file(16);
        let err = read_key(file.path()).err().expect("too short");
        assert!(matches!(err, SessionKeyError::TooShort { length: 16, .. }));
    }

    #[rstest]
    fn missing_file_falls_back_when_ephemeral_is_allowed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("missing");
        assert!(load_session_key(&path, true).is_ok());
        assert!(matches!(read_key(&path), Err(SessionKeyError::Read { .. })));
    }
}
