//! Runtime detection of the SIMD extensions of the executing CPU.
//!
//! The detection runs once per process; afterwards [`capabilities`] hands out the
//! cached (immutable) result.

use std::sync::OnceLock;

use log::debug;

/// Environment variable that disables all SIMD reducers when set (to anything but
/// `""`, `"0"` or `"false"`) before the first reduction.
pub const DISABLE_SIMD_ENV: &str = "MINMAX_DISABLE_SIMD";

/// SIMD instruction set extensions that gate a vector reducer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// 256-bit float instructions (x86 / x86_64).
    Avx,
    /// 256-bit integer instructions (x86 / x86_64).
    Avx2,
    /// 512-bit foundation instructions (x86 / x86_64), needs Rust 1.89 or the
    /// `nightly_simd` feature.
    Avx512F,
    /// 512-bit byte & word instructions (x86 / x86_64), needs Rust 1.89 or the
    /// `nightly_simd` feature.
    Avx512BW,
    /// 128-bit Advanced SIMD (aarch64).
    Neon,
}

/// The set of extensions that the reducers may use.
///
/// A `Capabilities` value can only be obtained by detection and can afterwards
/// only be narrowed, so it never reports an extension that the CPU lacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    avx: bool,
    avx2: bool,
    avx512f: bool,
    avx512bw: bool,
    neon: bool,
}

impl Capabilities {
    /// Query the CPU for the supported extensions.
    ///
    /// AVX-512 is only reported when the AVX-512 reducers are compiled in (Rust 1.89
    /// and above, or the `nightly_simd` feature).
    pub fn detect() -> Self {
        Capabilities {
            avx: Self::detect_avx(),
            avx2: Self::detect_avx2(),
            avx512f: Self::detect_avx512f(),
            avx512bw: Self::detect_avx512bw(),
            neon: Self::detect_neon(),
        }
    }

    /// No extension at all: every reduction takes the scalar path.
    pub const fn none() -> Self {
        Capabilities {
            avx: false,
            avx2: false,
            avx512f: false,
            avx512bw: false,
            neon: false,
        }
    }

    /// Whether the given extension may be used.
    #[inline]
    pub fn supports(&self, extension: Extension) -> bool {
        match extension {
            Extension::Avx => self.avx,
            Extension::Avx2 => self.avx2,
            Extension::Avx512F => self.avx512f,
            Extension::Avx512BW => self.avx512bw,
            Extension::Neon => self.neon,
        }
    }

    /// The same capabilities, minus the given extension.
    #[must_use]
    pub fn without(mut self, extension: Extension) -> Self {
        match extension {
            Extension::Avx => self.avx = false,
            Extension::Avx2 => self.avx2 = false,
            Extension::Avx512F => self.avx512f = false,
            Extension::Avx512BW => self.avx512bw = false,
            Extension::Neon => self.neon = false,
        }
        self
    }

    /// Whether any extension is available.
    pub fn any(&self) -> bool {
        self.avx || self.avx2 || self.avx512f || self.avx512bw || self.neon
    }

    /// Capabilities claiming exactly the given extensions, regardless of the CPU.
    /// Only used to exercise the (pure) reducer selection.
    #[cfg(test)]
    pub(crate) fn from_extensions(extensions: &[Extension]) -> Self {
        let mut caps = Self::none();
        for extension in extensions {
            match extension {
                Extension::Avx => caps.avx = true,
                Extension::Avx2 => caps.avx2 = true,
                Extension::Avx512F => caps.avx512f = true,
                Extension::Avx512BW => caps.avx512bw = true,
                Extension::Neon => caps.neon = true,
            }
        }
        caps
    }

    fn detect_avx() -> bool {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            is_x86_feature_detected!("avx")
        }
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            false
        }
    }

    fn detect_avx2() -> bool {
        #[cfg(any(target_arch = "x86", target_arch = "x86_64"))]
        {
            is_x86_feature_detected!("avx2")
        }
        #[cfg(not(any(target_arch = "x86", target_arch = "x86_64")))]
        {
            false
        }
    }

    fn detect_avx512f() -> bool {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            minmax_avx512
        ))]
        {
            is_x86_feature_detected!("avx512f")
        }
        #[cfg(not(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            minmax_avx512
        )))]
        {
            false
        }
    }

    fn detect_avx512bw() -> bool {
        #[cfg(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            minmax_avx512
        ))]
        {
            is_x86_feature_detected!("avx512bw")
        }
        #[cfg(not(all(
            any(target_arch = "x86", target_arch = "x86_64"),
            minmax_avx512
        )))]
        {
            false
        }
    }

    fn detect_neon() -> bool {
        #[cfg(target_arch = "aarch64")]
        {
            std::arch::is_aarch64_feature_detected!("neon")
        }
        #[cfg(not(target_arch = "aarch64"))]
        {
            false
        }
    }
}

static CAPABILITIES: OnceLock<Capabilities> = OnceLock::new();

fn simd_disabled_by_env() -> bool {
    match std::env::var(DISABLE_SIMD_ENV) {
        Ok(value) => !matches!(value.trim(), "" | "0" | "false"),
        Err(_) => false,
    }
}

/// The capabilities of the executing CPU, detected on first use.
pub fn capabilities() -> &'static Capabilities {
    CAPABILITIES.get_or_init(|| {
        if simd_disabled_by_env() {
            debug!("{} is set, using the scalar implementation", DISABLE_SIMD_ENV);
            return Capabilities::none();
        }
        let caps = Capabilities::detect();
        debug!("detected SIMD capabilities: {:?}", caps);
        caps
    })
}

/// Whether the executing CPU supports the given extension.
#[inline]
pub fn supports(extension: Extension) -> bool {
    capabilities().supports(extension)
}
