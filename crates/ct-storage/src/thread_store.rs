//! File system storage for comment threads

use ct_core::comment::CommentRecord;
use ct_core::error::{Result, ThreadError};
use ct_core::store::CommentStore;
use ct_core::types::PostId;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, warn};

/// Current thread file schema version
pub const CURRENT_SCHEMA_VERSION: u32 = 1;

/// On-disk representation of one post's thread
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThreadFile {
    pub schema_version: u32,
    pub post_id: PostId,
    #[serde(default)]
    pub comments: Vec<CommentRecord>,
}

impl ThreadFile {
    /// Wrap a thread with the current schema version
    pub fn new(post_id: PostId, comments: Vec<CommentRecord>) -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            post_id,
            comments,
        }
    }
}

/// File system based comment storage
///
/// Each post lives in `<base>/threads/<post>.json`.
pub struct FileSystemStore {
    /// Threads subdirectory
    threads_dir: PathBuf,
    /// Serializes read-modify-write cycles within this process
    write_lock: Mutex<()>,
}

impl FileSystemStore {
    /// Create a new file system store
    pub fn new(base_dir: impl Into<PathBuf>) -> Result<Self> {
        let threads_dir = base_dir.into().join("threads");

        let store = Self {
            threads_dir,
            write_lock: Mutex::new(()),
        };

        store.ensure_dirs()?;
        Ok(store)
    }

    /// Ensure required directories exist
    fn ensure_dirs(&self) -> Result<()> {
        if !self.threads_dir.exists() {
            fs::create_dir_all(&self.threads_dir).map_err(|e| {
                ThreadError::Io(std::io::Error::new(
                    e.kind(),
                    format!("Failed to create threads directory: {}", e),
                ))
            })?;
            debug!("Created threads directory: {:?}", self.threads_dir);
        }
        Ok(())
    }

    /// Get the path for a thread file
    fn thread_path(&self, post: &PostId) -> PathBuf {
        self.threads_dir.join(format!("{}.json", post))
    }

    /// Get a temporary path for atomic writes
    fn temp_path(&self, post: &PostId) -> PathBuf {
        self.threads_dir.join(format!(".{}.json.tmp", post))
    }

    /// Write a thread atomically (write to temp, then rename)
    fn atomic_write(&self, post: &PostId, comments: Vec<CommentRecord>) -> Result<()> {
        let temp_path = self.temp_path(post);
        let final_path = self.thread_path(post);

        let file = ThreadFile::new(post.clone(), comments);

        let temp_file = fs::File::create(&temp_path).map_err(|e| {
            ThreadError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to create temp file: {}", e),
            ))
        })?;
        let mut writer = BufWriter::new(temp_file);
        serde_json::to_writer_pretty(&mut writer, &file)?;
        writer.flush()?;

        fs::rename(&temp_path, &final_path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            ThreadError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to rename temp file: {}", e),
            ))
        })?;

        debug!("Saved thread {} to {:?}", post, final_path);
        Ok(())
    }

    /// Read and parse a thread file
    fn read_thread(&self, path: &Path) -> Result<ThreadFile> {
        let file = fs::File::open(path)?;
        let reader = BufReader::new(file);
        let thread: ThreadFile = serde_json::from_reader(reader)?;

        if thread.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(ThreadError::UnsupportedSchemaVersion(thread.schema_version));
        }

        Ok(thread)
    }

}

impl CommentStore for FileSystemStore {
    fn fetch_thread(&self, post: &PostId) -> Result<Vec<CommentRecord>> {
        let path = self.thread_path(post);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let thread = self
            .read_thread(&path)
            .map_err(|e| e.with_context(format!("Failed to read {}", path.display())))?;
        Ok(thread.comments)
    }

    fn append(&self, post: &PostId, record: CommentRecord) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .map_err(|_| ThreadError::Storage("thread store lock poisoned".to_string()))?;

        let mut comments = self.fetch_thread(post)?;
        if comments.iter().any(|r| r.id == record.id) {
            return Err(ThreadError::Validation(format!(
                "Comment with ID {} already exists",
                record.id
            )));
        }

        comments.push(record);
        self.atomic_write(post, comments)
    }

    fn list_posts(&self) -> Result<Vec<PostId>> {
        let mut posts = Vec::new();

        let entries = fs::read_dir(&self.threads_dir).map_err(|e| {
            ThreadError::Io(std::io::Error::new(
                e.kind(),
                format!("Failed to read threads directory: {}", e),
            ))
        })?;

        for entry in entries {
            let entry = match entry {
                Ok(e) => e,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();

            // Skip non-json files and temp files
            if !path.extension().map(|e| e == "json").unwrap_or(false) {
                continue;
            }
            if path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with('.'))
                .unwrap_or(false)
            {
                continue;
            }

            match self.read_thread(&path) {
                Ok(thread) => posts.push(thread.post_id),
                Err(e) => {
                    warn!("Failed to read thread file {:?}: {}", path, e);
                }
            }
        }

        posts.sort();
        Ok(posts)
    }
}
