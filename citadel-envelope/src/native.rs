//! Native ABI surface (feature `native-backend`, off by default).
//!
//! Declares the `extern "C"` signatures a native library would export and
//! the search order used to locate one. Nothing in this module is linked
//! or called unless `native-backend` is enabled; the default, tested
//! build path never touches FFI.

use std::env::consts::{ARCH, OS};
use std::path::PathBuf;

/// C-callable result code: 0 success, -1 computational failure, -2 generic failure.
pub type NativeResult = std::os::raw::c_int;

#[cfg(feature = "native-backend")]
extern "C" {
    pub fn entanglement_secure_wipe(buf_ptr: *mut u8, len: usize);

    pub fn ml_dsa_44_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;
    pub fn ml_dsa_65_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;
    pub fn ml_dsa_87_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;

    pub fn ml_dsa_44_sign(sk_ptr: *const u8, msg_ptr: *const u8, msg_len: usize, sig_ptr: *mut u8) -> NativeResult;
    pub fn ml_dsa_65_sign(sk_ptr: *const u8, msg_ptr: *const u8, msg_len: usize, sig_ptr: *mut u8) -> NativeResult;
    pub fn ml_dsa_87_sign(sk_ptr: *const u8, msg_ptr: *const u8, msg_len: usize, sig_ptr: *mut u8) -> NativeResult;

    pub fn ml_dsa_44_verify(pk_ptr: *const u8, msg_ptr: *const u8, msg_len: usize, sig_ptr: *const u8) -> NativeResult;
    pub fn ml_dsa_65_verify(pk_ptr: *const u8, msg_ptr: *const u8, msg_len: usize, sig_ptr: *const u8) -> NativeResult;
    pub fn ml_dsa_87_verify(pk_ptr: *const u8, msg_ptr: *const u8, msg_len: usize, sig_ptr: *const u8) -> NativeResult;

    pub fn ml_kem_512_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;
    pub fn ml_kem_768_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;
    pub fn ml_kem_1024_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;

    pub fn ml_kem_512_encapsulate(pk_ptr: *const u8, ct_ptr: *mut u8, ss_ptr: *mut u8) -> NativeResult;
    pub fn ml_kem_768_encapsulate(pk_ptr: *const u8, ct_ptr: *mut u8, ss_ptr: *mut u8) -> NativeResult;
    pub fn ml_kem_1024_encapsulate(pk_ptr: *const u8, ct_ptr: *mut u8, ss_ptr: *mut u8) -> NativeResult;

    pub fn ml_kem_512_decapsulate(sk_ptr: *const u8, ct_ptr: *const u8, ss_ptr: *mut u8) -> NativeResult;
    pub fn ml_kem_768_decapsulate(sk_ptr: *const u8, ct_ptr: *const u8, ss_ptr: *mut u8) -> NativeResult;
    pub fn ml_kem_1024_decapsulate(sk_ptr: *const u8, ct_ptr: *const u8, ss_ptr: *mut u8) -> NativeResult;

    pub fn x25519_keygen(sk_ptr: *mut u8, pk_ptr: *mut u8) -> NativeResult;
    pub fn x25519_sk_to_pk(sk_ptr: *const u8, pk_ptr: *mut u8) -> NativeResult;
    pub fn x25519_dh(sk_ptr: *const u8, peer_pk_ptr: *const u8, ss_ptr: *mut u8) -> NativeResult;
}

/// Locates a native shared library by searching, in order: the bare name,
/// the arch-suffixed name, and (on macOS only) a universal-binary name.
pub struct NativeLibraryLocator;

impl NativeLibraryLocator {
    pub fn candidates(dir: &std::path::Path, name: &str) -> Vec<PathBuf> {
        let (prefix, ext) = Self::platform_prefix_and_ext();
        let arch_suffix = Self::arch_suffix();

        let mut out = vec![dir.join(format!("{prefix}{name}{ext}"))];
        out.push(dir.join(format!("{prefix}{name}_{arch_suffix}{ext}")));
        if OS == "macos" {
            out.push(dir.join(format!("{prefix}{name}_universal{ext}")));
        }
        out
    }

    fn platform_prefix_and_ext() -> (&'static str, &'static str) {
        match OS {
            "windows" => ("", ".dll"),
            "macos" => ("lib", ".dylib"),
            _ => ("lib", ".so"),
        }
    }

    fn arch_suffix() -> &'static str {
        match ARCH {
            "aarch64" => "aarch64",
            "x86_64" => "x86_64",
            "x86" => "i686",
            other => other,
        }
    }
}
