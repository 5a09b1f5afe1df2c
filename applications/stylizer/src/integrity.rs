/// File integrity digests
use anyhow::Context;
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Hex-encoded SHA-256 of a file's contents
pub fn sha256_file(path: &Path) -> std::io::Result<String> {
    let mut file = File::open(path)?;
    let mut hasher = Sha256::new();
    let mut buffer = [0u8; 8192];

    loop {
        let bytes_read = file.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hex::encode(hasher.finalize()))
}

/// Path and SHA-256 of the running executable
pub fn executable_digest() -> anyhow::Result<(PathBuf, String)> {
    let exe = std::env::current_exe().context("locating the running executable")?;
    let digest =
        sha256_file(&exe).with_context(|| format!("hashing {}", exe.display()))?;
    Ok((exe, digest))
}
