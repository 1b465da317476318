mod common;

use std::fs;

use codefence::vfs::{
    add_files_from_folder, DirStdlibSource, ModuleMapCache, ScriptTarget, StdlibSource,
    VirtualModuleMap,
};

use common::CountingStdlib;

#[test]
fn base_map_is_built_once_per_target() {
    let cache = ModuleMapCache::new(CountingStdlib::default());

    let a = cache.base_map(ScriptTarget::Es2015).unwrap();
    let b = cache.base_map(ScriptTarget::Es2015).unwrap();
    assert_eq!(a, b);

    // Distinct target builds separately, same target is a cache hit
    cache.base_map(ScriptTarget::EsNext).unwrap();
    cache.base_map(ScriptTarget::Es2015).unwrap();
}

#[test]
fn copies_never_mutate_the_shared_base() {
    let cache = ModuleMapCache::new(CountingStdlib::default());
    let stdlib = CountingStdlib::default();
    let expected = stdlib.standard_lib(ScriptTarget::Es2015).unwrap();

    let mut copy = cache.base_map(ScriptTarget::Es2015).unwrap();
    copy.insert("react", "declare module 'react';");

    let fresh = cache.base_map(ScriptTarget::Es2015).unwrap();
    assert!(!fresh.contains("react"));
    assert_eq!(fresh, expected);
}

#[test]
fn overlay_scan_keys_by_module_specifier() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path();
    fs::create_dir_all(types.join("react")).unwrap();
    fs::write(types.join("react/index.d.ts"), "declare module 'react';").unwrap();
    fs::write(types.join("react/jsx.d.ts"), "declare namespace JSX {}").unwrap();
    fs::write(types.join("README.md"), "not a declaration").unwrap();

    let mut map = VirtualModuleMap::new();
    let inserted = add_files_from_folder(&mut map, types).unwrap();

    assert_eq!(inserted, 2);
    assert_eq!(map.get("react"), Some("declare module 'react';"));
    assert_eq!(map.get("react/jsx"), Some("declare namespace JSX {}"));
    assert!(!map.contains("README"));
}

#[test]
fn overlay_is_rescanned_per_call() {
    let dir = tempfile::tempdir().unwrap();
    let types = dir.path();
    fs::create_dir_all(types.join("left-pad")).unwrap();
    fs::write(types.join("left-pad/index.d.ts"), "declare function leftPad();").unwrap();

    let mut first = VirtualModuleMap::new();
    add_files_from_folder(&mut first, types).unwrap();
    assert!(first.contains("left-pad"));

    // Installed packages changed between calls
    fs::create_dir_all(types.join("lodash")).unwrap();
    fs::write(types.join("lodash/index.d.ts"), "declare var _: any;").unwrap();

    let mut second = VirtualModuleMap::new();
    add_files_from_folder(&mut second, types).unwrap();
    assert!(second.contains("lodash"));
    // The earlier copy is untouched
    assert!(!first.contains("lodash"));
}

#[test]
fn missing_overlay_folder_yields_the_base_unchanged() {
    let mut map = VirtualModuleMap::new();
    map.insert("lib.es2015", "declare var Promise: any;");
    let before = map.clone();

    let inserted =
        add_files_from_folder(&mut map, std::path::Path::new("/no/such/folder")).unwrap();
    assert_eq!(inserted, 0);
    assert_eq!(map, before);
}

#[test]
fn dir_stdlib_source_reads_lib_declarations() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("lib.es5.d.ts"), "declare var Array: any;").unwrap();
    fs::write(dir.path().join("lib.es2015.d.ts"), "declare var Promise: any;").unwrap();
    fs::write(dir.path().join("typescript.js"), "// not a declaration").unwrap();

    let source = DirStdlibSource::new(dir.path());
    let map = source.standard_lib(ScriptTarget::Es2015).unwrap();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get("lib.es5"), Some("declare var Array: any;"));
    assert_eq!(map.get("lib.es2015"), Some("declare var Promise: any;"));
}

#[test]
fn dir_stdlib_source_missing_root_is_an_error() {
    let source = DirStdlibSource::new("/no/such/stdlib");
    let err = source.standard_lib(ScriptTarget::Es2015).unwrap_err();
    assert!(err.to_string().contains("standard library"));
}
