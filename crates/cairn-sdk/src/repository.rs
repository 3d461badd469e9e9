use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use cairn_crypto::ContentHasher;
use cairn_store::{FsObjectStore, Object, ObjectStore};
use cairn_tree::{Tree, TreeBuilder, METADATA_DIR};
use cairn_types::{ObjectId, ObjectKind};
use tracing::info;

use crate::config::{RepoConfig, CONFIG_FILE};
use crate::error::{SdkError, SdkResult};

/// Directories created under `.cairn` by [`Repository::init`].
const LAYOUT: [&str; 3] = ["objects", "refs", "refs/heads"];

/// A Cairn repository rooted at an explicit working directory.
pub struct Repository {
    root: PathBuf,
    store: FsObjectStore,
    config: RepoConfig,
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository")
            .field("root", &self.root)
            .finish()
    }
}

impl Repository {
    /// Create the `.cairn` layout under `root` and a default configuration.
    ///
    /// An existing repository is opened unchanged.
    pub fn init(root: &Path) -> SdkResult<Self> {
        let meta = root.join(METADATA_DIR);
        if meta.is_dir() {
            info!(path = %meta.display(), "repository already exists");
            return Self::open(root);
        }

        for dir in LAYOUT {
            let path = meta.join(dir);
            fs::create_dir_all(&path).map_err(SdkError::io(&path))?;
        }
        RepoConfig::default().save(&meta.join(CONFIG_FILE))?;
        info!(path = %meta.display(), "initialized repository");
        Self::open(root)
    }

    /// Open the repository whose working directory is `root`.
    pub fn open(root: &Path) -> SdkResult<Self> {
        let meta = root.join(METADATA_DIR);
        if !meta.is_dir() {
            return Err(SdkError::NotARepository(root.to_path_buf()));
        }
        let config = RepoConfig::load(&meta.join(CONFIG_FILE))?;
        Ok(Self {
            root: root.to_path_buf(),
            store: FsObjectStore::open(meta.join("objects")),
            config,
        })
    }

    /// Find the repository containing `start`, searching upwards.
    pub fn discover(start: &Path) -> SdkResult<Self> {
        let start = start.canonicalize().map_err(SdkError::io(start))?;
        for dir in start.ancestors() {
            if dir.join(METADATA_DIR).is_dir() {
                return Self::open(dir);
            }
        }
        Err(SdkError::NotARepository(start))
    }

    /// The working directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The `.cairn` metadata directory.
    pub fn meta_dir(&self) -> PathBuf {
        self.root.join(METADATA_DIR)
    }

    pub fn store(&self) -> &FsObjectStore {
        &self.store
    }

    pub fn config(&self) -> &RepoConfig {
        &self.config
    }

    // ---- Object operations ----

    /// Identify the content of `reader` as an object of `kind`, persisting
    /// it when `write` is set. Without `write` the content is streamed
    /// through the hasher and never buffered.
    pub fn hash_object<R: Read>(&self, kind: ObjectKind, reader: R, write: bool) -> SdkResult<ObjectId> {
        if !write {
            return ContentHasher::new(kind)
                .hash_reader(reader)
                .map_err(SdkError::Input);
        }
        let object = Object::new(kind, reader).map_err(SdkError::Input)?;
        self.store.put(&object)?;
        Ok(object.id())
    }

    /// Read an object by ID.
    pub fn read_object(&self, id: &ObjectId) -> SdkResult<Object> {
        Ok(self.store.get(id)?)
    }

    /// Read an object that must be of `expected` kind.
    pub fn cat_file(&self, expected: ObjectKind, id: &ObjectId) -> SdkResult<Object> {
        let object = self.read_object(id)?;
        if object.kind() != expected {
            return Err(SdkError::TypeMismatch {
                id: *id,
                expected,
                actual: object.kind(),
            });
        }
        Ok(object)
    }

    /// Read an object and check that its content hashes to `id`.
    pub fn verify(&self, id: &ObjectId) -> SdkResult<Object> {
        Ok(self.store.get_verified(id)?)
    }

    // ---- Tree operations ----

    /// Snapshot the whole working directory.
    pub fn write_tree(&self) -> SdkResult<Object> {
        self.snapshot(&self.root)
    }

    /// Snapshot `prefix`, taken relative to the working directory unless it
    /// is absolute.
    pub fn write_tree_at(&self, prefix: &Path) -> SdkResult<Object> {
        self.snapshot(&self.root.join(prefix))
    }

    /// Snapshot `dir` with the repository's snapshot settings.
    pub fn snapshot(&self, dir: &Path) -> SdkResult<Object> {
        let builder = TreeBuilder::with_config(&self.store, self.config.effective_snapshot());
        let tree = builder.snapshot(dir)?;
        info!(id = %tree.id(), path = %dir.display(), "snapshot complete");
        Ok(tree)
    }

    /// Read and parse a tree object.
    pub fn ls_tree(&self, id: &ObjectId) -> SdkResult<Tree> {
        let object = self.cat_file(ObjectKind::Tree, id)?;
        Ok(Tree::from_object(&object)?)
    }
}
