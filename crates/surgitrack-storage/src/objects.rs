use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StorageError;

const TMP_SUFFIX: &str = ".tmp";

/// Map a `/`-separated key onto a path under `root`.
///
/// Rejects empty keys, absolute keys, and any `.`/`..` or empty segment, so
/// a key can never escape the data directory.
fn resolve(root: &Path, key: &str) -> Result<PathBuf, StorageError> {
    let invalid = || StorageError::InvalidKey {
        key: key.to_string(),
    };
    if key.is_empty() || key.starts_with('/') || key.contains('\\') {
        return Err(invalid());
    }
    let mut path = root.to_path_buf();
    for segment in key.split('/') {
        if segment.is_empty() || segment == "." || segment == ".." {
            return Err(invalid());
        }
        path.push(segment);
    }
    Ok(path)
}

fn not_found(key: &str) -> impl FnOnce(std::io::Error) -> StorageError + '_ {
    move |e| {
        if e.kind() == ErrorKind::NotFound {
            StorageError::NotFound {
                key: key.to_string(),
            }
        } else {
            StorageError::Io(e)
        }
    }
}

/// Read an object's bytes.
pub async fn get_object(root: &Path, key: &str) -> Result<Vec<u8>, StorageError> {
    let path = resolve(root, key)?;
    tokio::fs::read(&path).await.map_err(not_found(key))
}

/// Write an object, replacing any existing one.
///
/// Writes to a sibling temp file and renames it into place, so readers never
/// see a partial object.
pub async fn put_object(root: &Path, key: &str, body: &[u8]) -> Result<(), StorageError> {
    let path = resolve(root, key)?;
    if let Some(parent) = path.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(TMP_SUFFIX);
    let tmp_path = path.with_file_name(tmp_name);

    tokio::fs::write(&tmp_path, body).await?;
    tokio::fs::rename(&tmp_path, &path).await?;

    tracing::debug!(key, bytes = body.len(), "object written");
    Ok(())
}

/// Delete an object. Missing objects are reported as `NotFound`.
pub async fn delete_object(root: &Path, key: &str) -> Result<(), StorageError> {
    let path = resolve(root, key)?;
    tokio::fs::remove_file(&path).await.map_err(not_found(key))?;
    tracing::debug!(key, "object deleted");
    Ok(())
}

/// List object keys starting with `prefix`, sorted.
///
/// A prefix ending in `/` lists everything beneath that directory,
/// recursively. An empty prefix lists the whole store.
pub async fn list_objects(root: &Path, prefix: &str) -> Result<Vec<String>, StorageError> {
    let dir_prefix = match prefix.rfind('/') {
        Some(idx) => &prefix[..=idx],
        None => "",
    };
    let start = if dir_prefix.is_empty() {
        root.to_path_buf()
    } else {
        resolve(root, dir_prefix.trim_end_matches('/'))?
    };

    let mut keys = Vec::new();
    let mut pending = vec![(start, dir_prefix.to_string())];

    while let Some((dir, key_prefix)) = pending.pop() {
        let mut entries = match tokio::fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            let key = format!("{key_prefix}{name}");
            let file_type = entry.file_type().await?;
            if file_type.is_dir() {
                pending.push((entry.path(), format!("{key}/")));
            } else if file_type.is_file() && !name.ends_with(TMP_SUFFIX) && key.starts_with(prefix)
            {
                keys.push(key);
            }
        }
    }

    keys.sort();
    Ok(keys)
}

/// Delete all objects under a prefix.
///
/// Returns the number of objects deleted.
pub async fn delete_objects_by_prefix(root: &Path, prefix: &str) -> Result<usize, StorageError> {
    let keys = list_objects(root, prefix).await?;
    let count = keys.len();
    for key in &keys {
        delete_object(root, key).await?;
    }
    Ok(count)
}
