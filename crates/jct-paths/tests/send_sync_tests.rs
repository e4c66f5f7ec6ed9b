//! Tests to verify that all public types are Send + Sync as required.

use jct_paths::*;

const fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn test_manager_types_are_send_sync() {
    assert_send_sync::<LocationManager>();
    assert_send_sync::<PathFileManager>();
    assert_send_sync::<RootSet>();
    assert_send_sync::<Lazy<PathClassLoader>>();
}

#[test]
fn test_file_types_are_send_sync() {
    assert_send_sync::<PathFileObject>();
    assert_send_sync::<ListRequest<'static>>();
}

#[test]
fn test_loader_types_are_send_sync() {
    assert_send_sync::<PathClassLoader>();
    assert_send_sync::<ModuleFinder>();
    assert_send_sync::<ModuleReference>();
    assert_send_sync::<Configuration>();
    assert_send_sync::<ModuleLayer>();
    assert_send_sync::<ServiceLoader>();
    assert_send_sync::<ServiceProvider>();
}
