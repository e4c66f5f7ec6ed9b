//! Cross-location behaviour of `PathFileManager`, including module routing
//! and service loading.

use jct_core::{JctConfig, Kind, Location, StandardLocation};
use jct_memfs::TemporaryFileSystem;
use jct_paths::PathFileManager;
use std::sync::Arc;

fn module_root() -> TemporaryFileSystem {
    let fs = TemporaryFileSystem::named("modules").unwrap();
    fs.create_file("org.greet.api/module-info.class", b"").unwrap();
    fs.create_file("org.greet.api/org/greet/Greeter.class", b"api").unwrap();
    fs.create_file("org.greet.en/module-info.class", b"").unwrap();
    fs.create_file_lines(
        "org.greet.en/META-INF/services/org.greet.Greeter",
        ["org.greet.en.English"],
    )
    .unwrap();
    fs.create_file("org.greet.fr/module-info.class", b"").unwrap();
    fs.create_file_lines(
        "org.greet.fr/META-INF/services/org.greet.Greeter",
        ["# French", "org.greet.fr.French"],
    )
    .unwrap();
    fs
}

#[test]
fn test_services_on_module_path_come_from_a_new_layer() {
    let modules = module_root();
    let module_path: Location = StandardLocation::ModulePath.into();

    let mut files = PathFileManager::new();
    files.add_temp_fs(module_path.clone(), &modules);

    let services = files.get_service_loader(&module_path, "org.greet.Greeter").unwrap();
    let layer = services.layer().unwrap();
    assert_eq!(
        layer.module_names(),
        vec!["org.greet.api", "org.greet.en", "org.greet.fr"]
    );

    let cached = files.class_loader(&module_path).unwrap();
    assert!(!Arc::ptr_eq(services.class_loader(), &cached));

    let providers = services.providers().unwrap();
    let found: Vec<_> = providers
        .iter()
        .map(|p| (p.module().unwrap(), p.class_name()))
        .collect();
    assert_eq!(
        found,
        vec![
            ("org.greet.en", "org.greet.en.English"),
            ("org.greet.fr", "org.greet.fr.French"),
        ]
    );
}

#[test]
fn test_each_service_loader_gets_its_own_layer() {
    let modules = module_root();
    let module_path: Location = StandardLocation::ModulePath.into();
    let mut files = PathFileManager::new();
    files.add_temp_fs(module_path.clone(), &modules);

    let first = files.get_service_loader(&module_path, "org.greet.Greeter").unwrap();
    let second = files.get_service_loader(&module_path, "org.greet.Greeter").unwrap();
    assert!(!Arc::ptr_eq(first.class_loader(), second.class_loader()));
}

#[test]
fn test_services_on_class_path_use_cached_loader() {
    let classes = TemporaryFileSystem::named("classes").unwrap();
    classes
        .create_file_lines("META-INF/services/x.Plugin", ["x.impl.First", "x.impl.Second"])
        .unwrap();
    let class_path: Location = StandardLocation::ClassPath.into();
    let mut files = PathFileManager::new();
    files.add_temp_fs(class_path.clone(), &classes);

    let services = files.get_service_loader(&class_path, "x.Plugin").unwrap();
    assert!(services.layer().is_none());
    assert!(Arc::ptr_eq(
        services.class_loader(),
        &files.class_loader(&class_path).unwrap()
    ));
    assert_eq!(services.providers().unwrap().len(), 2);
}

#[test]
fn test_services_on_specific_module_are_unsupported() {
    let modules = module_root();
    let module = Location::module(StandardLocation::ModulePath, "org.greet.en");
    let mut files = PathFileManager::new();
    files.add_path(module.clone(), modules.path().join("org.greet.en"));

    let err = files.get_service_loader(&module, "org.greet.Greeter").unwrap_err();
    assert!(err.is_unsupported());
}

#[test]
fn test_module_prefixed_output_targets_module_location() {
    let out = TemporaryFileSystem::named("out").unwrap();
    let module_source: Location = StandardLocation::ModuleSourcePath.into();
    let module = Location::module(module_source.clone(), "org.app");

    let mut files = PathFileManager::new();
    files.add_path(module.clone(), out.path().join("org.app"));

    let file = files
        .get_java_file_for_output(&module_source, "org.app/org.app.Main", Kind::Source)
        .unwrap()
        .unwrap();
    assert_eq!(file.location(), &module);
    assert_eq!(file.path(), &out.path().join("org.app/org/app/Main.java"));
    assert_eq!(file.given_name(), "org.app.Main");

    let unregistered = files
        .get_java_file_for_output(&module_source, "org.other/org.other.Main", Kind::Source)
        .unwrap();
    assert!(unregistered.is_none());
}

#[test]
fn test_first_root_wins_across_file_manager() {
    let a = TemporaryFileSystem::named("a").unwrap();
    let b = TemporaryFileSystem::named("b").unwrap();
    a.create_file("com/example/Foo.class", b"a").unwrap();
    b.create_file("com/example/Foo.class", b"b").unwrap();

    let class_path: Location = StandardLocation::ClassPath.into();
    let mut files = PathFileManager::with_config(&JctConfig::default());
    files.add_temp_fs(class_path.clone(), &a);
    files.add_temp_fs(class_path.clone(), &b);

    let input = files
        .get_java_file_for_input(&class_path, "com.example.Foo", Kind::Class)
        .unwrap()
        .unwrap();
    assert_eq!(input.read().unwrap(), b"a");
    assert!(files.contains(&class_path, &input));

    let output = files
        .get_java_file_for_output(&class_path, "com.example.Bar", Kind::Class)
        .unwrap()
        .unwrap();
    assert!(output.path().starts_with(a.path()));
}

#[test]
fn test_removing_temp_fs_from_location() {
    let fs = TemporaryFileSystem::named("gen").unwrap();
    fs.create_file("g/Gen.java", b"").unwrap();
    let source_output: Location = StandardLocation::SourceOutput.into();

    let mut files = PathFileManager::new();
    files.add_temp_fs(source_output.clone(), &fs);
    assert_eq!(files.list(&source_output, "g", &[Kind::Source], false).unwrap().len(), 1);

    files.get_or_create(source_output.clone()).remove_temp_fs(&fs);
    assert!(files.manager_for(&source_output).unwrap().is_empty());
    assert!(files.list(&source_output, "g", &[Kind::Source], false).unwrap().is_empty());
}
