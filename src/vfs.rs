//! Virtual module maps for type analysis
//!
//! An in-memory substitute for a filesystem of declaration files, handed to
//! the analysis engine so it can resolve imports without real disk I/O.
//! Two tiers: a base map (standard library, built once per target version
//! and cached) and an optional overlay scanned per call from a folder of
//! installed package declarations.
//!
//! The base maps are never mutated in place; every caller receives its own
//! copy, so concurrent analyzer invocations never observe each other's
//! overlay insertions.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::VfsError;

/// Declaration file extension recognised by the overlay scan
const DECLARATION_SUFFIX: &str = ".d.ts";

/// Language version the standard-library map is built for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScriptTarget {
    Es5,
    #[default]
    Es2015,
    Es2017,
    Es2020,
    EsNext,
}

/// Mapping from module specifier to declaration source text.
///
/// Cloning is O(entries) and shares the declaration contents (`Arc<str>`
/// values), so handing out a copy per analysis call never re-derives them.
#[derive(Debug, Clone, Default)]
pub struct VirtualModuleMap {
    files: HashMap<String, Arc<str>>,
}

impl VirtualModuleMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, specifier: impl Into<String>, source: impl Into<Arc<str>>) {
        self.files.insert(specifier.into(), source.into());
    }

    pub fn get(&self, specifier: &str) -> Option<&str> {
        self.files.get(specifier).map(|s| s.as_ref())
    }

    pub fn contains(&self, specifier: &str) -> bool {
        self.files.contains_key(specifier)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.files.iter().map(|(k, v)| (k.as_str(), v.as_ref()))
    }
}

impl PartialEq for VirtualModuleMap {
    fn eq(&self, other: &Self) -> bool {
        self.files.len() == other.files.len()
            && self
                .files
                .iter()
                .all(|(k, v)| other.get(k) == Some(v.as_ref()))
    }
}

/// Source of standard-library declarations, the expensive-to-derive tier
/// of the module map.
pub trait StdlibSource {
    fn standard_lib(&self, target: ScriptTarget) -> Result<VirtualModuleMap, VfsError>;
}

/// Reads `lib.*.d.ts` standard-library files from a directory on disk,
/// keyed by file stem (e.g. "lib.es2015").
pub struct DirStdlibSource {
    root: PathBuf,
}

impl DirStdlibSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl StdlibSource for DirStdlibSource {
    fn standard_lib(&self, target: ScriptTarget) -> Result<VirtualModuleMap, VfsError> {
        let mut map = VirtualModuleMap::new();
        let entries = std::fs::read_dir(&self.root).map_err(|source| VfsError::Stdlib {
            target,
            source,
        })?;
        for entry in entries {
            let entry = entry.map_err(|source| VfsError::Stdlib { target, source })?;
            let path = entry.path();
            let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if !file_name.starts_with("lib.") || !file_name.ends_with(DECLARATION_SUFFIX) {
                continue;
            }
            let source = std::fs::read_to_string(&path).map_err(|source| VfsError::Stdlib {
                target,
                source,
            })?;
            let specifier = file_name.trim_end_matches(DECLARATION_SUFFIX);
            map.insert(specifier, source);
        }
        tracing::debug!(
            "Built stdlib map for {:?} from {} ({} files)",
            target,
            self.root.display(),
            map.len()
        );
        Ok(map)
    }
}

/// Per-target cache of base module maps.
///
/// Each target's map is built at most once per process and reused; every
/// request returns a fresh copy so per-call mutation never corrupts the
/// shared base.
pub struct ModuleMapCache<S> {
    source: S,
    base: Mutex<HashMap<ScriptTarget, VirtualModuleMap>>,
}

impl<S: StdlibSource> ModuleMapCache<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            base: Mutex::new(HashMap::new()),
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// A copy of the base map for the given target, building it on first
    /// request.
    pub fn base_map(&self, target: ScriptTarget) -> Result<VirtualModuleMap, VfsError> {
        let mut base = self.lock();
        if let Some(map) = base.get(&target) {
            return Ok(map.clone());
        }
        let map = self.source.standard_lib(target)?;
        tracing::debug!("Caching base module map for {:?}", target);
        base.insert(target, map.clone());
        Ok(map)
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<ScriptTarget, VirtualModuleMap>> {
        self.base
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

/// Scan a folder of installed package declarations into the supplied map
/// copy.
///
/// Files are keyed by their resolved module specifier relative to the
/// folder: `foo/index.d.ts` becomes `foo`, `foo/bar.d.ts` becomes
/// `foo/bar`. Folder absence is not an error; the map is left untouched.
/// Contents are re-scanned on every call since installed packages may
/// change within a long-lived process.
///
/// Returns the number of declaration files inserted.
pub fn add_files_from_folder(
    map: &mut VirtualModuleMap,
    folder: &Path,
) -> Result<usize, VfsError> {
    if !folder.is_dir() {
        tracing::debug!("Overlay folder {} does not exist, skipping", folder.display());
        return Ok(0);
    }
    let mut inserted = 0;
    scan_dir(map, folder, folder, &mut inserted)?;
    tracing::debug!(
        "Overlaid {} declaration files from {}",
        inserted,
        folder.display()
    );
    Ok(inserted)
}

fn scan_dir(
    map: &mut VirtualModuleMap,
    root: &Path,
    dir: &Path,
    inserted: &mut usize,
) -> Result<(), VfsError> {
    let entries = std::fs::read_dir(dir).map_err(|source| VfsError::Read {
        path: dir.to_path_buf(),
        source,
    })?;
    for entry in entries {
        let entry = entry.map_err(|source| VfsError::Read {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        if path.is_dir() {
            scan_dir(map, root, &path, inserted)?;
            continue;
        }
        let Some(specifier) = module_specifier(root, &path) else {
            continue;
        };
        let source = std::fs::read_to_string(&path).map_err(|source| VfsError::Read {
            path: path.clone(),
            source,
        })?;
        map.insert(specifier, source);
        *inserted += 1;
    }
    Ok(())
}

/// Module specifier for a declaration file, or None for other files.
fn module_specifier(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let rel = rel.to_str()?.replace('\\', "/");
    let rel = rel.strip_suffix(DECLARATION_SUFFIX)?;
    Some(match rel.strip_suffix("/index") {
        Some(pkg) => pkg.to_string(),
        None => rel.to_string(),
    })
}
