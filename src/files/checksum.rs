//! Streaming content digests for copy verification

use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{Result, SeqError};
use crate::types::ChecksumKind;

const BUFFER_SIZE: usize = 64 * 1024;

/// Incremental hasher for either supported digest
pub enum Hasher {
    Md5(md5::Context),
    Sha256(Sha256),
}

impl Hasher {
    pub fn new(kind: ChecksumKind) -> Self {
        match kind {
            ChecksumKind::Md5 => Hasher::Md5(md5::Context::new()),
            ChecksumKind::Sha256 => Hasher::Sha256(Sha256::new()),
        }
    }

    pub fn update(&mut self, data: &[u8]) {
        match self {
            Hasher::Md5(ctx) => ctx.consume(data),
            Hasher::Sha256(hasher) => hasher.update(data),
        }
    }

    /// Lowercase hex digest
    pub fn finalize(self) -> String {
        match self {
            Hasher::Md5(ctx) => format!("{:x}", ctx.compute()),
            Hasher::Sha256(hasher) => format!("{:x}", hasher.finalize()),
        }
    }
}

/// Reader that hashes everything read through it
pub struct HashingReader<R> {
    inner: R,
    hasher: Hasher,
}

impl<R: Read> HashingReader<R> {
    pub fn new(inner: R, kind: ChecksumKind) -> Self {
        Self {
            inner,
            hasher: Hasher::new(kind),
        }
    }

    pub fn finalize(self) -> String {
        self.hasher.finalize()
    }
}

impl<R: Read> Read for HashingReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }
}

/// Digest the full contents of a reader
pub fn hash_reader<R: Read>(mut reader: R, kind: ChecksumKind) -> io::Result<String> {
    let mut hasher = Hasher::new(kind);
    let mut buffer = vec![0u8; BUFFER_SIZE];
    loop {
        let n = reader.read(&mut buffer)?;
        if n == 0 {
            break;
        }
        hasher.update(&buffer[..n]);
    }
    Ok(hasher.finalize())
}

/// Digest the full contents of a file
pub fn hash_file(path: &Path, kind: ChecksumKind) -> Result<String> {
    let transfer_err = |e: io::Error| SeqError::Transfer {
        path: path.to_path_buf(),
        source: e,
    };
    let file = File::open(path).map_err(transfer_err)?;
    hash_reader(file, kind).map_err(transfer_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_md5_known_value() {
        let digest = hash_reader(Cursor::new(b"hello"), ChecksumKind::Md5).unwrap();
        assert_eq!(digest, "5d41402abc4b2a76b9719d911017c592");
    }

    #[test]
    fn test_sha256_known_value() {
        let digest = hash_reader(Cursor::new(b"hello"), ChecksumKind::Sha256).unwrap();
        assert_eq!(
            digest,
            "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
        );
    }

    #[test]
    fn test_hashing_reader_matches_direct_hash() {
        let data = vec![7u8; BUFFER_SIZE * 2 + 13];
        let mut reader = HashingReader::new(Cursor::new(data.clone()), ChecksumKind::Md5);
        let mut sink = Vec::new();
        io::copy(&mut reader, &mut sink).unwrap();

        assert_eq!(sink, data);
        assert_eq!(
            reader.finalize(),
            hash_reader(Cursor::new(data), ChecksumKind::Md5).unwrap()
        );
    }

    #[test]
    fn test_hash_file_missing() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = hash_file(&dir.path().join("nope"), ChecksumKind::Md5).unwrap_err();
        assert!(matches!(err, SeqError::Transfer { .. }));
    }
}
