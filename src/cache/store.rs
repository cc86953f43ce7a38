//! Persistent diagram cache.
//!
//! All entries live in one JSON document, `<cache_dir>/diagram_cache.json`,
//! keyed by the canonical source path. A corrupt or unreadable index is
//! treated as empty and failures to persist are logged, so the cache never
//! aborts a build.

use serde::Serialize;
use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::{Component, Path, PathBuf};

use super::entry::{file_modified, now, CacheEntry, Metadata, OutputFiles};
use super::hash::{hash_content, hash_file};
use super::CACHE_FILE_NAME;
use crate::error::{ArchdocError, Result};

/// Aggregate statistics about a cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Number of entries.
    pub total_entries: usize,
    /// Sum of output files across all entries.
    pub total_outputs: usize,
    /// Size of the index file in bytes, 0 if not yet written.
    pub cache_file_size: u64,
    /// Absolute path of the index file.
    pub cache_file_path: PathBuf,
}

/// Cache of generated diagrams backed by a JSON index file.
#[derive(Debug)]
pub struct DiagramCache {
    cache_dir: PathBuf,
    cache_file: PathBuf,
    entries: BTreeMap<String, CacheEntry>,
}

impl DiagramCache {
    /// Open the cache stored in `cache_dir`, creating the directory if needed.
    ///
    /// An existing index that cannot be parsed is logged and ignored. Only a
    /// failure to create the directory is an error.
    pub fn open(cache_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = cache_dir.as_ref();
        fs::create_dir_all(dir)?;

        let cache_dir = fs::canonicalize(dir).unwrap_or_else(|_| resolve(dir));
        let cache_file = cache_dir.join(CACHE_FILE_NAME);

        let mut cache = Self {
            cache_dir,
            cache_file,
            entries: BTreeMap::new(),
        };
        cache.reload();

        Ok(cache)
    }

    /// Directory holding the index file.
    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Path of the index file.
    pub fn cache_file(&self) -> &Path {
        &self.cache_file
    }

    /// Canonical lookup key for a source path.
    ///
    /// Existing paths are fully resolved. For paths that do not exist the
    /// deepest existing ancestor is resolved and the remainder appended.
    pub fn cache_key(source: impl AsRef<Path>) -> String {
        resolve(source.as_ref()).to_string_lossy().into_owned()
    }

    /// Replace the in-memory entries with what is currently on disk.
    pub fn reload(&mut self) {
        self.entries = match read_index(&self.cache_file) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Could not load cache file: {}", e);
                BTreeMap::new()
            }
        };
        tracing::debug!(
            "Loaded {} cache entries from {}",
            self.entries.len(),
            self.cache_file.display()
        );
    }

    /// Check whether a diagram is cached and up to date.
    ///
    /// When `content` is given it is hashed and compared against the stored
    /// digest; the file system is not consulted. Otherwise an existing source
    /// file is stale if its mtime is newer than the recorded one, and its
    /// bytes are hashed when the mtime has not moved. An entry whose source
    /// no longer exists counts as cached.
    pub fn is_cached(&self, source: impl AsRef<Path>, content: Option<&str>) -> bool {
        let source = source.as_ref();
        let key = Self::cache_key(source);

        let Some(entry) = self.entries.get(&key) else {
            tracing::debug!("Cache miss for {}: no entry", key);
            return false;
        };

        if let Some(content) = content {
            return hash_content(content) == entry.content_hash;
        }

        if source.exists() {
            if let Some(mtime) = file_modified(source) {
                if mtime > entry.last_modified {
                    tracing::debug!("Cache miss for {}: modified since cached", key);
                    return false;
                }
            }

            let current = hash_file(source);
            return !current.is_empty() && current == entry.content_hash;
        }

        true
    }

    /// Output files recorded for a source.
    ///
    /// Returns `None` if there is no entry or if any absolute output path no
    /// longer exists. Relative output paths are not checked.
    pub fn cached_outputs(&self, source: impl AsRef<Path>) -> Option<&OutputFiles> {
        let key = Self::cache_key(source);
        let entry = self.entries.get(&key)?;

        let missing = entry
            .output_files
            .values()
            .map(Path::new)
            .find(|p| p.is_absolute() && !p.exists());
        if let Some(path) = missing {
            tracing::debug!("Cached output {} for {} is gone", path.display(), key);
            return None;
        }

        Some(&entry.output_files)
    }

    /// Record the outputs of generating a diagram and persist the index.
    ///
    /// The digest comes from `content` when given, otherwise from the source
    /// file's bytes.
    pub fn cache_diagram(
        &mut self,
        source: impl AsRef<Path>,
        content: Option<&str>,
        output_files: OutputFiles,
        metadata: Metadata,
    ) {
        let source = source.as_ref();
        let key = Self::cache_key(source);

        let content_hash = match content {
            Some(content) => hash_content(content),
            None => hash_file(source),
        };
        let last_modified = file_modified(source).unwrap_or_else(now);

        let entry = CacheEntry::new(source.to_string_lossy(), content_hash, last_modified)
            .with_outputs(output_files)
            .with_metadata(metadata);

        tracing::debug!("Caching {} ({} outputs)", key, entry.output_count());
        self.entries.insert(key, entry);
        self.save();
    }

    /// Drop the entry for a source, if any.
    pub fn invalidate(&mut self, source: impl AsRef<Path>) {
        let key = Self::cache_key(source);

        if self.entries.remove(&key).is_some() {
            tracing::debug!("Invalidated {}", key);
            self.save();
        }
    }

    /// Drop all entries.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.save();
    }

    /// Remove entries whose recorded source file no longer exists.
    ///
    /// The check uses the path as originally supplied, so a relative path is
    /// resolved against the current working directory, not the lookup key.
    pub fn cleanup_stale_entries(&mut self) -> usize {
        let before = self.entries.len();
        self.entries.retain(|key, entry| {
            let exists = entry.source_exists();
            if !exists {
                tracing::debug!("Removing stale entry {}", key);
            }
            exists
        });

        let removed = before - self.entries.len();
        if removed > 0 {
            self.save();
        }
        removed
    }

    /// Statistics about the current entries and the index file.
    pub fn stats(&self) -> CacheStats {
        let cache_file_size = fs::metadata(&self.cache_file)
            .map(|m| m.len())
            .unwrap_or(0);

        CacheStats {
            total_entries: self.entries.len(),
            total_outputs: self.entries.values().map(CacheEntry::output_count).sum(),
            cache_file_size,
            cache_file_path: self.cache_file.clone(),
        }
    }

    /// Entry for a source, looked up by its canonical key.
    pub fn entry(&self, source: impl AsRef<Path>) -> Option<&CacheEntry> {
        self.entries.get(&Self::cache_key(source))
    }

    /// All entries ordered by key.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &CacheEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the cache has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn save(&self) {
        if let Err(e) = self.write_index() {
            tracing::warn!("Could not save cache file: {}", e);
        }
    }

    /// Write the index using the write-to-temp-then-rename pattern.
    fn write_index(&self) -> Result<()> {
        fs::create_dir_all(&self.cache_dir)?;

        let content =
            serde_json::to_string_pretty(&self.entries).map_err(|e| ArchdocError::CacheIndex {
                path: self.cache_file.clone(),
                message: format!("Failed to serialize index: {}", e),
            })?;

        let temp_path = self.cache_file.with_extension("json.tmp");
        fs::write(&temp_path, content)?;
        if let Err(e) = fs::rename(&temp_path, &self.cache_file) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        Ok(())
    }
}

fn read_index(path: &Path) -> Result<BTreeMap<String, CacheEntry>> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }

    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| ArchdocError::CacheIndex {
        path: path.to_path_buf(),
        message: e.to_string(),
    })
}

fn resolve(path: &Path) -> PathBuf {
    if let Ok(real) = fs::canonicalize(path) {
        return real;
    }

    let absolute = normalize(&std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf()));
    resolve_existing_ancestor(&absolute).unwrap_or(absolute)
}

fn resolve_existing_ancestor(path: &Path) -> Option<PathBuf> {
    let mut ancestor = path;
    let mut rest: Vec<&OsStr> = Vec::new();

    while let (Some(parent), Some(name)) = (ancestor.parent(), ancestor.file_name()) {
        rest.push(name);
        ancestor = parent;

        if let Ok(mut real) = fs::canonicalize(ancestor) {
            real.extend(rest.iter().rev());
            return Some(real);
        }
    }

    None
}

fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::hash::DIGEST_HEX_LEN;
    use serde_json::json;
    use std::fs::File;
    use std::time::{Duration, SystemTime};
    use tempfile::TempDir;

    fn setup() -> (TempDir, DiagramCache) {
        let temp = TempDir::new().unwrap();
        let cache = DiagramCache::open(temp.path()).unwrap();
        (temp, cache)
    }

    fn outputs(pairs: &[(&str, &str)]) -> OutputFiles {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn set_mtime(path: &Path, time: SystemTime) {
        let file = File::options().write(true).open(path).unwrap();
        file.set_modified(time).unwrap();
    }

    #[test]
    fn open_creates_directory() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("nested").join(".cache");

        let cache = DiagramCache::open(&dir).unwrap();

        assert!(dir.is_dir());
        assert!(cache.is_empty());
        assert_eq!(cache.cache_file(), cache.cache_dir().join(CACHE_FILE_NAME));
        assert!(cache.cache_file().is_absolute());
    }

    #[test]
    fn cache_diagram_records_entry() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "diagram content").unwrap();

        let mut metadata = Metadata::new();
        metadata.insert("type".into(), json!("system_context"));
        metadata.insert("title".into(), json!("Test Diagram"));
        let files = outputs(&[("json", "test.json"), ("png", "test.png")]);

        cache.cache_diagram(&source, None, files.clone(), metadata.clone());

        let entry = cache.entry(&source).unwrap();
        assert_eq!(entry.file_path, source.to_string_lossy());
        assert_eq!(entry.output_files, files);
        assert_eq!(entry.metadata, metadata);
        assert_eq!(entry.content_hash.len(), DIGEST_HEX_LEN);
        assert!(cache.cache_file().exists());
    }

    #[test]
    fn is_cached_with_file() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "original content").unwrap();

        assert!(!cache.is_cached(&source, None));

        cache.cache_diagram(&source, None, outputs(&[("json", "test.json")]), Metadata::new());
        assert!(cache.is_cached(&source, None));

        std::thread::sleep(Duration::from_millis(100));
        fs::write(&source, "modified content").unwrap();
        assert!(!cache.is_cached(&source, None));
    }

    #[test]
    fn newer_mtime_is_stale_without_content_change() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());
        set_mtime(&source, SystemTime::now() + Duration::from_secs(120));

        assert!(!cache.is_cached(&source, None));
    }

    #[test]
    fn older_mtime_falls_back_to_hash() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());

        set_mtime(&source, SystemTime::now() - Duration::from_secs(3600));
        assert!(cache.is_cached(&source, None));

        fs::write(&source, "changed").unwrap();
        set_mtime(&source, SystemTime::now() - Duration::from_secs(3600));
        assert!(!cache.is_cached(&source, None));
    }

    #[test]
    fn is_cached_with_content() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");

        assert!(!cache.is_cached(&source, Some("test content")));

        cache.cache_diagram(
            &source,
            Some("test content"),
            outputs(&[("json", "test.json")]),
            Metadata::new(),
        );

        assert!(cache.is_cached(&source, Some("test content")));
        assert!(!cache.is_cached(&source, Some("different content")));
    }

    #[test]
    fn content_mode_ignores_file_state() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "on disk").unwrap();

        cache.cache_diagram(&source, Some("supplied"), OutputFiles::new(), Metadata::new());
        fs::write(&source, "changed on disk").unwrap();

        assert!(cache.is_cached(&source, Some("supplied")));
        assert!(!cache.is_cached(&source, None));
    }

    #[test]
    fn missing_source_is_treated_as_cached() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());

        fs::remove_file(&source).unwrap();

        assert!(cache.is_cached(&source, None));
    }

    #[test]
    fn cached_outputs_round_trip() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        let files = outputs(&[("json", "test.json"), ("png", "test.png")]);

        assert!(cache.cached_outputs(&source).is_none());

        cache.cache_diagram(&source, None, files.clone(), Metadata::new());
        assert_eq!(cache.cached_outputs(&source), Some(&files));
    }

    #[test]
    fn cached_outputs_none_when_absolute_output_missing() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        let present = temp.path().join("test.json");
        let missing = temp.path().join("test.png");
        fs::write(&source, "content").unwrap();
        fs::write(&present, "{}").unwrap();

        let files = outputs(&[
            ("json", &present.to_string_lossy()),
            ("png", &missing.to_string_lossy()),
        ]);
        cache.cache_diagram(&source, None, files, Metadata::new());
        assert!(cache.cached_outputs(&source).is_none());

        fs::write(&missing, "png").unwrap();
        assert_eq!(cache.cached_outputs(&source).map(|o| o.len()), Some(2));
    }

    #[test]
    fn relative_outputs_are_not_checked() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        cache.cache_diagram(
            &source,
            None,
            outputs(&[("json", "does/not/exist.json")]),
            Metadata::new(),
        );

        assert!(cache.cached_outputs(&source).is_some());
    }

    #[test]
    fn persistence_across_instances() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        let mut first = DiagramCache::open(temp.path()).unwrap();
        first.cache_diagram(&source, None, outputs(&[("json", "test.json")]), Metadata::new());

        let second = DiagramCache::open(temp.path()).unwrap();
        assert!(second.is_cached(&source, None));
        assert_eq!(
            second.cached_outputs(&source),
            Some(&outputs(&[("json", "test.json")]))
        );
    }

    #[test]
    fn reload_picks_up_other_writers() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        let mut reader = DiagramCache::open(temp.path()).unwrap();
        let mut writer = DiagramCache::open(temp.path()).unwrap();
        writer.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());

        assert!(!reader.is_cached(&source, None));
        reader.reload();
        assert!(reader.is_cached(&source, None));
    }

    #[test]
    fn invalidate_removes_entry() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());

        cache.invalidate(&source);

        assert!(!cache.is_cached(&source, None));
        let reopened = DiagramCache::open(temp.path()).unwrap();
        assert!(reopened.is_empty());
    }

    #[test]
    fn invalidate_unknown_is_noop() {
        let (temp, mut cache) = setup();
        cache.invalidate(temp.path().join("never-cached.py"));
        assert!(cache.is_empty());
        assert!(!cache.cache_file().exists());
    }

    #[test]
    fn clear_removes_everything() {
        let (temp, mut cache) = setup();
        let one = temp.path().join("test1.py");
        let two = temp.path().join("test2.py");
        fs::write(&one, "content1").unwrap();
        fs::write(&two, "content2").unwrap();
        cache.cache_diagram(&one, None, outputs(&[("json", "test1.json")]), Metadata::new());
        cache.cache_diagram(&two, None, outputs(&[("json", "test2.json")]), Metadata::new());

        cache.clear();

        assert!(!cache.is_cached(&one, None));
        assert!(!cache.is_cached(&two, None));
        assert_eq!(cache.stats().total_entries, 0);
    }

    #[test]
    fn cleanup_removes_only_missing_sources() {
        let (temp, mut cache) = setup();
        let one = temp.path().join("test1.py");
        let two = temp.path().join("test2.py");
        fs::write(&one, "content1").unwrap();
        fs::write(&two, "content2").unwrap();
        cache.cache_diagram(&one, None, outputs(&[("json", "test1.json")]), Metadata::new());
        cache.cache_diagram(&two, None, outputs(&[("json", "test2.json")]), Metadata::new());

        fs::remove_file(&one).unwrap();

        assert_eq!(cache.cleanup_stale_entries(), 1);
        assert_eq!(cache.len(), 1);
        assert!(cache.is_cached(&two, None));
        assert_eq!(cache.cleanup_stale_entries(), 0);
    }

    #[test]
    fn cleanup_checks_recorded_path_not_key() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());

        // An entry whose recorded path points elsewhere is judged by that path.
        let key = DiagramCache::cache_key(&source);
        cache.entries.get_mut(&key).unwrap().file_path =
            temp.path().join("moved.py").to_string_lossy().into_owned();

        assert_eq!(cache.cleanup_stale_entries(), 1);
        assert!(source.exists());
    }

    #[test]
    fn cleanup_without_removals_leaves_index_untouched() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        cache.cache_diagram(&source, None, outputs(&[("json", "test.json")]), Metadata::new());

        let past = SystemTime::now() - Duration::from_secs(3600);
        set_mtime(cache.cache_file(), past);
        let before = fs::read(cache.cache_file()).unwrap();

        assert_eq!(cache.cleanup_stale_entries(), 0);

        let after = fs::metadata(cache.cache_file()).unwrap();
        assert_eq!(after.modified().unwrap(), past);
        assert_eq!(fs::read(cache.cache_file()).unwrap(), before);
    }

    #[test]
    fn stats_count_entries_and_outputs() {
        let (temp, mut cache) = setup();

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 0);
        assert_eq!(stats.total_outputs, 0);
        assert_eq!(stats.cache_file_size, 0);
        assert_eq!(stats.cache_file_path, cache.cache_file());

        let one = temp.path().join("one.py");
        let two = temp.path().join("two.py");
        fs::write(&one, "1").unwrap();
        fs::write(&two, "2").unwrap();
        cache.cache_diagram(
            &one,
            None,
            outputs(&[("json", "one.json"), ("png", "one.png")]),
            Metadata::new(),
        );
        cache.cache_diagram(&two, None, outputs(&[("json", "two.json")]), Metadata::new());

        let stats = cache.stats();
        assert_eq!(stats.total_entries, 2);
        assert_eq!(stats.total_outputs, 3);
        assert_eq!(
            stats.cache_file_size,
            fs::metadata(cache.cache_file()).unwrap().len()
        );
    }

    #[test]
    fn corrupt_index_loads_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CACHE_FILE_NAME), "{ not json").unwrap();

        let cache = DiagramCache::open(temp.path()).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn index_with_missing_fields_loads_empty() {
        let temp = TempDir::new().unwrap();
        fs::write(
            temp.path().join(CACHE_FILE_NAME),
            r#"{"/a.py": {"file_path": "/a.py"}}"#,
        )
        .unwrap();

        let cache = DiagramCache::open(temp.path()).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn index_with_bad_timestamp_loads_empty() {
        let temp = TempDir::new().unwrap();
        let index = json!({
            "/a.py": {
                "file_path": "/a.py",
                "content_hash": "",
                "last_modified": "not a date",
                "output_files": {},
                "metadata": {}
            }
        });
        fs::write(temp.path().join(CACHE_FILE_NAME), index.to_string()).unwrap();

        let cache = DiagramCache::open(temp.path()).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn index_layout_on_disk() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();
        cache.cache_diagram(&source, None, outputs(&[("json", "test.json")]), Metadata::new());

        let raw = fs::read_to_string(cache.cache_file()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let entry = &value[DiagramCache::cache_key(&source)];

        assert_eq!(entry["file_path"], &*source.to_string_lossy());
        assert_eq!(entry["output_files"]["json"], "test.json");
        assert!(entry["last_modified"].is_string());
        assert!(!cache.cache_file().with_extension("json.tmp").exists());
    }

    #[test]
    fn save_failure_keeps_memory_state() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("cache");
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        let mut cache = DiagramCache::open(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();
        fs::write(&dir, "not a directory").unwrap();

        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());
        assert!(cache.is_cached(&source, None));
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let (temp, mut cache) = setup();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        // A non-empty directory in place of the index makes the rename fail.
        fs::create_dir_all(cache.cache_file()).unwrap();
        fs::write(cache.cache_file().join("keep"), "x").unwrap();

        cache.cache_diagram(&source, None, OutputFiles::new(), Metadata::new());

        assert!(cache.is_cached(&source, None));
        assert!(!cache.cache_file().with_extension("json.tmp").exists());
        assert!(cache.cache_file().is_dir());
    }

    #[test]
    fn cache_key_is_canonical() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("test.py");
        fs::write(&source, "content").unwrap();

        let dotted = temp.path().join(".").join("sub").join("..").join("test.py");
        assert_eq!(DiagramCache::cache_key(&dotted), DiagramCache::cache_key(&source));
        assert!(Path::new(&DiagramCache::cache_key(&source)).is_absolute());
    }

    #[test]
    fn cache_key_for_missing_path_is_absolute() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("missing").join("diagram.py");

        let key = DiagramCache::cache_key(&missing);
        assert!(Path::new(&key).is_absolute());
        assert!(key.ends_with("diagram.py"));
        assert_eq!(key, DiagramCache::cache_key(&missing));
    }

    #[test]
    fn cache_key_relative_resolves_against_cwd() {
        let key = DiagramCache::cache_key("no-such-dir-archdoc/test.py");
        let expected = std::env::current_dir()
            .unwrap()
            .canonicalize()
            .unwrap()
            .join("no-such-dir-archdoc")
            .join("test.py");
        assert_eq!(key, expected.to_string_lossy());
    }
}
