use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use cairn_crypto::hasher::DELIMITER;
use cairn_types::ObjectId;
use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::object::Object;
use crate::traits::ObjectStore;

/// Loose-object store on the local filesystem.
///
/// Each object lives in its own file, `<root>/<id[0:2]>/<id>`, holding the
/// canonical encoding `kind || 0x00 || payload`. Writes go to a temporary
/// file in the shard directory and are renamed into place, so an
/// interrupted write never leaves a truncated object behind.
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at `root` (typically `.cairn/objects`).
    ///
    /// No I/O happens here; shard directories are created on first write.
    pub fn open(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The objects directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path of the file holding `id`.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.root.join(id.shard()).join(id.to_hex())
    }

    fn write_new(&self, object: &Object, shard: &Path, path: &Path) -> io::Result<()> {
        let mut tmp = NamedTempFile::new_in(shard)?;
        tmp.write_all(object.kind().as_str().as_bytes())?;
        tmp.write_all(&[DELIMITER])?;
        tmp.write_all(object.payload())?;
        tmp.flush()?;
        set_read_only(tmp.as_file())?;
        // A failed persist drops the temporary file, which removes it.
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

#[cfg(unix)]
fn set_read_only(file: &fs::File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o444))
}

#[cfg(not(unix))]
fn set_read_only(file: &fs::File) -> io::Result<()> {
    let mut perms = file.metadata()?.permissions();
    perms.set_readonly(true);
    file.set_permissions(perms)
}

impl ObjectStore for FsObjectStore {
    fn put(&self, object: &Object) -> StoreResult<()> {
        let id = object.id();
        let path = self.object_path(&id);
        // An intact copy is left alone; anything else at the path is replaced.
        if path.is_file() && self.get_verified(&id).is_ok() {
            debug!(%id, "object already present");
            return Ok(());
        }

        let shard = self.root.join(id.shard());
        fs::create_dir_all(&shard).map_err(|source| StoreError::Write {
            path: shard.clone(),
            source,
        })?;
        self.write_new(object, &shard, &path)
            .map_err(|source| StoreError::Write {
                path: path.clone(),
                source,
            })?;

        debug!(%id, kind = %object.kind(), size = object.size(), "object written");
        Ok(())
    }

    fn get(&self, id: &ObjectId) -> StoreResult<Object> {
        let path = self.object_path(id);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound(*id));
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };
        let object = Object::decode(bytes, *id)
            .map_err(|source| StoreError::MalformedObject { id: *id, source })?;
        debug!(%id, kind = %object.kind(), size = object.size(), "object read");
        Ok(object)
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        let path = self.object_path(id);
        path.try_exists()
            .map_err(|source| StoreError::Read { path, source })
    }
}
