//! Global compiler-flag data.
//!
//! These lists are shared by every module in the build graph; publishing
//! them once as named variables keeps them out of every generated command
//! line. The resolver treats them as opaque strings.

/// Flags common to host and device compiles.
pub const COMMON_GLOBAL_CFLAGS: &[&str] = &[
    "-DANDROID",
    "-fmessage-length=0",
    "-W",
    "-Wall",
    "-Wno-unused",
    "-Winit-self",
    "-Wpointer-arith",
    // Make paths in deps files relative
    "-no-canonical-prefixes",
    "-fno-canonical-system-headers",
    "-DNDEBUG",
    "-UDEBUG",
    "-fno-exceptions",
    "-Wno-multichar",
    "-O2",
    "-g",
    "-fno-strict-aliasing",
];

pub const COMMON_GLOBAL_CONLYFLAGS: &[&str] = &[];

pub const DEVICE_GLOBAL_CFLAGS: &[&str] = &[
    "-fdiagnostics-color",
    "-ffunction-sections",
    "-fdata-sections",
    "-fno-short-enums",
    "-funwind-tables",
    "-fstack-protector-strong",
    "-Wa,--noexecstack",
    "-D_FORTIFY_SOURCE=2",
    "-Wstrict-aliasing=2",
    "-Werror=return-type",
    "-Werror=non-virtual-dtor",
    "-Werror=address",
    "-Werror=sequence-point",
    "-Werror=date-time",
    "-Werror=format-security",
];

pub const DEVICE_GLOBAL_CPPFLAGS: &[&str] = &["-fvisibility-inlines-hidden"];

pub const DEVICE_GLOBAL_LDFLAGS: &[&str] = &[
    "-Wl,-z,noexecstack",
    "-Wl,-z,relro",
    "-Wl,-z,now",
    "-Wl,--build-id=md5",
    "-Wl,--warn-shared-textrel",
    "-Wl,--fatal-warnings",
    "-Wl,--no-undefined-version",
    "-Wl,--exclude-libs,libgcc.a",
    "-Wl,--exclude-libs,libgcc_stripped.a",
];

pub const HOST_GLOBAL_CFLAGS: &[&str] = &[];

pub const HOST_GLOBAL_CPPFLAGS: &[&str] = &[];

pub const HOST_GLOBAL_LDFLAGS: &[&str] = &[];

pub const COMMON_GLOBAL_CPPFLAGS: &[&str] = &["-Wsign-promo"];

/// Flags no module may override.
pub const NO_OVERRIDE_GLOBAL_CFLAGS: &[&str] = &[
    "-Werror=int-to-pointer-cast",
    "-Werror=pointer-to-int-cast",
];

/// Flags modules are not allowed to request at all.
pub const ILLEGAL_FLAGS: &[&str] = &["-w"];

/// Extra linker flag selecting lld, appended to both host and device lld
/// link lines.
pub const USE_LLD_FLAG: &str = "-fuse-ld=lld";

pub const C_STD_VERSION: &str = "gnu99";
pub const CPP_STD_VERSION: &str = "gnu++17";
pub const EXPERIMENTAL_C_STD_VERSION: &str = "gnu11";
pub const EXPERIMENTAL_CPP_STD_VERSION: &str = "gnu++2a";

/// prebuilts/clang default settings.
pub const CLANG_DEFAULT_BASE: &str = "prebuilts/clang/host";
pub const CLANG_DEFAULT_VERSION: &str = "clang-r353983c1";
pub const CLANG_DEFAULT_SHORT_VERSION: &str = "9.0.3";

/// Source directories whose headers are force-included for legacy modules.
pub const COMMON_GLOBAL_INCLUDE_DIRS: &[&str] = &[
    "system/core/include",
    "system/media/audio/include",
    "hardware/libhardware/include",
    "hardware/libhardware_legacy/include",
    "hardware/ril/include",
    "frameworks/native/include",
    "frameworks/native/opengl/include",
    "frameworks/av/include",
];

/// jni.h location for non-NDK modules; there is no associated library, so
/// export_include_dirs can not supply it.
pub const COMMON_NATIVEHELPER_INCLUDE_DIRS: &[&str] = &["libnativehelper/include_jni"];

/// RenderScript prebuilt compiler; tied to the LLVM in external/llvm, so it
/// may trail the host prebuilts used for the rest of the build.
pub const RS_CLANG_BASE: &str = "prebuilts/clang/host";
pub const RS_CLANG_VERSION: &str = "clang-3289846";
pub const RS_RELEASE_VERSION: &str = "3.8";

pub const RS_GLOBAL_INCLUDE_DIRS: &[&str] = &[
    "external/clang/lib/Headers",
    "frameworks/rs/script_api/include",
];

/// Directories with warnings from legacy module definitions.
pub const WARNING_ALLOWED_PROJECTS: &[&str] = &["device/", "vendor/"];

pub const WARNING_ALLOWED_OLD_PROJECTS: &[&str] = &[];

/// `-isystem` flags for the C library headers of the given kernel arch.
pub fn bionic_headers(kernel_arch: &str) -> String {
    [
        "-isystem bionic/libc/include".to_string(),
        "-isystem bionic/libc/kernel/uapi".to_string(),
        format!("-isystem bionic/libc/kernel/uapi/asm-{}", kernel_arch),
        "-isystem bionic/libc/kernel/android/scsi".to_string(),
        "-isystem bionic/libc/kernel/android/uapi".to_string(),
    ]
    .join(" ")
}
