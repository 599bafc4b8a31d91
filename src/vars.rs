//! Registry population.
//!
//! Defines every named variable the build-graph substitution system
//! consumes: joined flag lists, existence-filtered include paths, the
//! prebuilt-clang locations, and the resolved alternate-toolchain values.
//! Composite values keep their `${Name}` references; expansion belongs to
//! the substitution layer, not to us.

use std::path::Path;

use crate::config::{Env, ToolchainConfig};
use crate::flags;
use crate::registry::VariableRegistry;
use crate::util::fs::prefixed_existent_paths;

/// Override for the prebuilt-clang base directory.
pub const ENV_CLANG_BASE: &str = "LLVM_PREBUILTS_BASE";
/// Override for the prebuilt-clang version directory.
pub const ENV_CLANG_VERSION: &str = "LLVM_PREBUILTS_VERSION";
/// Override for the clang release (short) version.
pub const ENV_CLANG_SHORT_VERSION: &str = "LLVM_RELEASE_VERSION";
/// Compiler-invocation wrapper prefix (e.g. ccache).
pub const ENV_CC_WRAPPER: &str = "CC_WRAPPER";

/// Build the full variable registry from the resolved toolchain config, an
/// environment snapshot, and the source tree root used for include-path
/// existence filtering.
pub fn build_registry(cfg: &ToolchainConfig, env: &Env, source_root: &Path) -> VariableRegistry {
    let mut registry = VariableRegistry::new();

    define_global_flag_vars(&mut registry);
    define_include_vars(&mut registry, source_root);
    define_clang_prebuilt_vars(&mut registry, env);
    define_rs_prebuilt_vars(&mut registry, source_root);
    define_toolchain_vars(&mut registry, cfg);

    let wrapper_env = env.clone();
    registry.define_deferred("CcWrapper", move || {
        match wrapper_env.get_nonempty(ENV_CC_WRAPPER) {
            // Trailing space so the wrapper composes with the compiler path.
            Some(wrapper) => format!("{} ", wrapper),
            None => String::new(),
        }
    });

    registry
}

fn define_global_flag_vars(registry: &mut VariableRegistry) {
    registry.define_static(
        "CommonGlobalConlyflags",
        flags::COMMON_GLOBAL_CONLYFLAGS.join(" "),
    );
    registry.define_static(
        "DeviceGlobalCppflags",
        flags::DEVICE_GLOBAL_CPPFLAGS.join(" "),
    );
    registry.define_static("DeviceGlobalLdflags", flags::DEVICE_GLOBAL_LDFLAGS.join(" "));
    registry.define_static(
        "DeviceGlobalLldflags",
        join_with(flags::DEVICE_GLOBAL_LDFLAGS, flags::USE_LLD_FLAG),
    );
    registry.define_static("HostGlobalCppflags", flags::HOST_GLOBAL_CPPFLAGS.join(" "));
    registry.define_static("HostGlobalLdflags", flags::HOST_GLOBAL_LDFLAGS.join(" "));
    registry.define_static("HostGlobalLldflags", flags::USE_LLD_FLAG);

    registry.define_static(
        "CommonClangGlobalCflags",
        join_with(&common_global_cflags(), "${ClangExtraCflags}"),
    );
    registry.define_static(
        "DeviceClangGlobalCflags",
        join_with(flags::DEVICE_GLOBAL_CFLAGS, "${ClangExtraTargetCflags}"),
    );
    registry.define_static("HostClangGlobalCflags", flags::HOST_GLOBAL_CFLAGS.join(" "));
    registry.define_static(
        "NoOverrideClangGlobalCflags",
        join_with(
            flags::NO_OVERRIDE_GLOBAL_CFLAGS,
            "${ClangExtraNoOverrideCflags}",
        ),
    );
    registry.define_static(
        "CommonClangGlobalCppflags",
        join_with(flags::COMMON_GLOBAL_CPPFLAGS, "${ClangExtraCppflags}"),
    );
    registry.define_static("ClangExternalCflags", "${ClangExtraExternalCflags}");
}

fn define_include_vars(registry: &mut VariableRegistry, source_root: &Path) {
    registry.define_static(
        "CommonGlobalIncludes",
        prefixed_existent_paths(source_root, "-I", flags::COMMON_GLOBAL_INCLUDE_DIRS),
    );
    registry.define_static(
        "CommonNativehelperInclude",
        prefixed_existent_paths(source_root, "-I", flags::COMMON_NATIVEHELPER_INCLUDE_DIRS),
    );
}

fn define_clang_prebuilt_vars(registry: &mut VariableRegistry, env: &Env) {
    registry.define_static("ClangDefaultBase", flags::CLANG_DEFAULT_BASE);

    let base_env = env.clone();
    registry.define_deferred("ClangBase", move || {
        match base_env.get_nonempty(ENV_CLANG_BASE) {
            Some(base) => base.to_string(),
            None => "${ClangDefaultBase}".to_string(),
        }
    });

    let version_env = env.clone();
    registry.define_deferred("ClangVersion", move || {
        match version_env.get_nonempty(ENV_CLANG_VERSION) {
            Some(version) => version.to_string(),
            None => flags::CLANG_DEFAULT_VERSION.to_string(),
        }
    });

    let short_env = env.clone();
    registry.define_deferred("ClangShortVersion", move || {
        match short_env.get_nonempty(ENV_CLANG_SHORT_VERSION) {
            Some(version) => version.to_string(),
            None => flags::CLANG_DEFAULT_SHORT_VERSION.to_string(),
        }
    });

    registry.define_static("HostPrebuiltTag", host_prebuilt_tag());
    registry.define_static("ClangPath", "${ClangBase}/${HostPrebuiltTag}/${ClangVersion}");
    registry.define_static("ClangBin", "${ClangPath}/bin");
    registry.define_static("ClangTidyShellPath", "build/soong/scripts/clang-tidy.sh");
    registry.define_static(
        "ClangAsanLibDir",
        "${ClangBase}/linux-x86/${ClangVersion}/lib64/clang/${ClangShortVersion}/lib/linux",
    );
}

fn define_rs_prebuilt_vars(registry: &mut VariableRegistry, source_root: &Path) {
    registry.define_static("RSClangBase", flags::RS_CLANG_BASE);
    registry.define_static("RSClangVersion", flags::RS_CLANG_VERSION);
    registry.define_static("RSReleaseVersion", flags::RS_RELEASE_VERSION);
    registry.define_static(
        "RSLLVMPrebuiltsPath",
        "${RSClangBase}/${HostPrebuiltTag}/${RSClangVersion}/bin",
    );
    registry.define_static(
        "RSIncludePath",
        "${RSLLVMPrebuiltsPath}/../lib64/clang/${RSReleaseVersion}/include",
    );
    registry.define_static(
        "RsGlobalIncludes",
        prefixed_existent_paths(source_root, "-I", flags::RS_GLOBAL_INCLUDE_DIRS),
    );
}

/// The alternate-toolchain variables. Environment overrides were already
/// folded into `cfg` during resolution, so these are plain strings.
fn define_toolchain_vars(registry: &mut VariableRegistry, cfg: &ToolchainConfig) {
    registry.define_static("SDClangBin", cfg.primary_path.clone());
    registry.define_static("SDClangBin2", cfg.secondary_path.clone());
    registry.define_static("SDClangFlags", cfg.primary_flags.clone());
    registry.define_static("SDClangFlags2", cfg.secondary_flags.clone());
}

fn common_global_cflags() -> Vec<&'static str> {
    let mut cflags = flags::COMMON_GLOBAL_CFLAGS.to_vec();
    if cfg!(target_os = "linux") {
        // Make debug info reproducible across checkouts.
        cflags.push("-fdebug-prefix-map=/proc/self/cwd=");
    }
    cflags
}

fn host_prebuilt_tag() -> &'static str {
    if cfg!(target_os = "macos") {
        "darwin-x86"
    } else {
        "linux-x86"
    }
}

fn join_with(flags: &[&str], extra: &str) -> String {
    let mut parts = flags.to_vec();
    parts.push(extra);
    parts.join(" ")
}
