//! Filesystem operations
//!
//! Handles file and directory operations.

use std::io::Read;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::FilesystemError;

/// Create a directory and all parent directories
pub fn create_dir_all(path: &Path) -> Result<(), FilesystemError> {
    std::fs::create_dir_all(path).map_err(|e| FilesystemError::CreateDir {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Remove a directory and all its contents
pub fn remove_dir_all(path: &Path) -> Result<(), FilesystemError> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| FilesystemError::RemoveDir {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
    }
    Ok(())
}

/// Write content to a file
pub fn write_file(path: &Path, content: &str) -> Result<(), FilesystemError> {
    if let Some(parent) = path.parent() {
        create_dir_all(parent)?;
    }
    std::fs::write(path, content).map_err(|e| FilesystemError::WriteFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Read content from a file
pub fn read_file(path: &Path) -> Result<String, FilesystemError> {
    std::fs::read_to_string(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })
}

/// Compute the lowercase hex SHA256 digest of a file
pub fn sha256_file(path: &Path) -> Result<String, FilesystemError> {
    let mut file = std::fs::File::open(path).map_err(|e| FilesystemError::ReadFile {
        path: path.to_path_buf(),
        error: e.to_string(),
    })?;

    let mut hasher = Sha256::new();
    let mut buf = [0u8; 64 * 1024];
    loop {
        let n = file.read(&mut buf).map_err(|e| FilesystemError::ReadFile {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(hex::encode(hasher.finalize()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sha256_file_known_digest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data.bin");
        std::fs::write(&path, b"abc").unwrap();

        let digest = sha256_file(&path).unwrap();
        assert_eq!(
            digest,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_missing_file_errors() {
        let dir = TempDir::new().unwrap();
        assert!(sha256_file(&dir.path().join("absent")).is_err());
    }

    #[test]
    fn test_write_file_creates_parents() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/deeper/file.txt");
        write_file(&path, "content").unwrap();
        assert_eq!(read_file(&path).unwrap(), "content");
    }

    #[test]
    fn test_remove_dir_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("gone");
        assert!(remove_dir_all(&target).is_ok());
        std::fs::create_dir(&target).unwrap();
        assert!(remove_dir_all(&target).is_ok());
        assert!(!target.exists());
    }
}
