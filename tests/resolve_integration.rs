//! End-to-end resolution tests: config files on disk, an environment
//! snapshot, and the published variable registry.

use tempfile::TempDir;

use slipway::{build_registry, resolve, Env, ResolveError, ToolchainConfig};

fn write(tmp: &TempDir, name: &str, contents: &str) -> String {
    let path = tmp.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path.to_string_lossy().into_owned()
}

#[test]
fn resolves_layered_config_end_to_end() {
    let tmp = TempDir::new().unwrap();
    let toolchain = write(
        &tmp,
        "toolchain.json",
        r#"{
            "default": {
                "SDCLANG": false,
                "SDCLANG_PATH": "vendor/sdclang/default",
                "SDCLANG_PATH_2": "vendor/sdclang/legacy",
                "SDCLANG_FLAGS": "-O3 -fvectorize"
            },
            "widget": {
                "SDCLANG": true,
                "SDCLANG_FLAGS": "-O2"
            }
        }"#,
    );
    let ae = write(&tmp, "ae.json", r#"{"SDCLANG_AE_FLAG": "-fauto-enable"}"#);

    let env: Env = [
        ("TARGET_PRODUCT", "widget"),
        ("SDCLANG_CONFIG", toolchain.as_str()),
        ("SDCLANG_AE_CONFIG", ae.as_str()),
    ]
    .into_iter()
    .collect();

    let cfg = resolve(&env).unwrap();
    assert_eq!(
        cfg,
        ToolchainConfig {
            enabled: true,
            primary_path: "vendor/sdclang/default".into(),
            secondary_path: "vendor/sdclang/legacy".into(),
            primary_flags: "-O2 -fauto-enable".into(),
            secondary_flags: String::new(),
        }
    );

    let registry = build_registry(&cfg, &env, tmp.path());
    assert_eq!(registry.value("SDClangBin"), Some("vendor/sdclang/default"));
    assert_eq!(registry.value("SDClangFlags"), Some("-O2 -fauto-enable"));
    assert_eq!(registry.value("CcWrapper"), Some(""));
}

#[test]
fn environment_beats_files_everywhere() {
    let tmp = TempDir::new().unwrap();
    let toolchain = write(
        &tmp,
        "toolchain.json",
        r#"{"default": {"SDCLANG_PATH": "p1", "SDCLANG_PATH_2": "p2", "SDCLANG_FLAGS": "-file"}}"#,
    );

    let env: Env = [
        ("SDCLANG_CONFIG", toolchain.as_str()),
        ("SDCLANG", "true"),
        ("SDCLANG_PATH", "override"),
        ("SDCLANG_COMMON_FLAGS", "-env-only"),
    ]
    .into_iter()
    .collect();

    let cfg = resolve(&env).unwrap();
    assert!(cfg.enabled);
    assert_eq!(cfg.primary_path, "override");
    assert_eq!(cfg.secondary_path, "p2");
    // The env override replaces the whole computed flags string.
    assert_eq!(cfg.primary_flags, "-env-only");
}

#[test]
fn static_analysis_marker_is_appended() {
    let tmp = TempDir::new().unwrap();
    let toolchain = write(
        &tmp,
        "toolchain.json",
        r#"{"default": {"SDCLANG_PATH": "p1", "SDCLANG_PATH_2": "p2"}}"#,
    );

    let env: Env = [
        ("SDCLANG_CONFIG", toolchain.as_str()),
        ("SDCLANG_SA_ENABLED", "true"),
    ]
    .into_iter()
    .collect();

    let cfg = resolve(&env).unwrap();
    assert_eq!(cfg.primary_flags, "--compile-and-analyze llvmsa");
}

#[test]
fn resolution_is_idempotent_across_runs() {
    let tmp = TempDir::new().unwrap();
    let toolchain = write(
        &tmp,
        "toolchain.json",
        r#"{
            "default": {"SDCLANG_PATH": "p1", "SDCLANG_PATH_2": "p2"},
            "widget": {"SDCLANG_FLAGS": "-x"}
        }"#,
    );

    let env: Env = [
        ("TARGET_PRODUCT", "widget"),
        ("SDCLANG_CONFIG", toolchain.as_str()),
        ("SDCLANG_SA_ENABLED", "1"),
    ]
    .into_iter()
    .collect();

    let first = resolve(&env).unwrap();
    let second = resolve(&env).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.primary_flags, "-x --compile-and-analyze llvmsa");
}

#[test]
fn fatal_errors_never_publish_a_config() {
    let tmp = TempDir::new().unwrap();

    let no_default = write(&tmp, "no_default.json", r#"{"widget": {}}"#);
    let env: Env = [("SDCLANG_CONFIG", no_default.as_str())].into_iter().collect();
    assert!(matches!(
        resolve(&env),
        Err(ResolveError::MissingDefaultBlock)
    ));

    let malformed = write(&tmp, "broken.json", "{ this is not json");
    let env: Env = [("SDCLANG_CONFIG", malformed.as_str())].into_iter().collect();
    assert!(matches!(resolve(&env), Err(ResolveError::Malformed { .. })));
}

#[test]
fn missing_config_file_is_only_advisory() {
    // A path that does not exist is not an error; the alternate toolchain is
    // opt-in. The required-path check still applies afterwards.
    let env: Env = [
        ("SDCLANG_CONFIG", "/no/such/toolchain.json"),
        ("SDCLANG_PATH", "env/p1"),
        ("SDCLANG_PATH_2", "env/p2"),
    ]
    .into_iter()
    .collect();

    let cfg = resolve(&env).unwrap();
    assert_eq!(cfg.primary_path, "env/p1");
    assert_eq!(cfg.secondary_path, "env/p2");
    assert!(!cfg.enabled);
    assert!(cfg.primary_flags.is_empty());
}

#[test]
fn deferred_variables_share_one_answer_across_workers() {
    let tmp = TempDir::new().unwrap();
    let cfg = ToolchainConfig {
        enabled: false,
        primary_path: "p1".into(),
        secondary_path: "p2".into(),
        primary_flags: String::new(),
        secondary_flags: String::new(),
    };
    let env: Env = [("LLVM_PREBUILTS_VERSION", "clang-r111111")]
        .into_iter()
        .collect();

    let registry = build_registry(&cfg, &env, tmp.path());
    let registry = &registry;

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(move || registry.value("ClangVersion").map(str::to_string)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap().as_deref(), Some("clang-r111111"));
        }
    });
}

#[test]
fn include_variables_respect_the_source_root() {
    let tmp = TempDir::new().unwrap();
    std::fs::create_dir_all(tmp.path().join("hardware/ril/include")).unwrap();

    let cfg = ToolchainConfig {
        primary_path: "p1".into(),
        secondary_path: "p2".into(),
        ..ToolchainConfig::default()
    };
    let registry = build_registry(&cfg, &Env::default(), tmp.path());

    assert_eq!(
        registry.value("CommonGlobalIncludes"),
        Some("-Ihardware/ril/include")
    );

    // A different (empty) root yields an empty include list.
    let empty = TempDir::new().unwrap();
    let registry = build_registry(&cfg, &Env::default(), empty.path());
    assert_eq!(registry.value("CommonGlobalIncludes"), Some(""));
}
