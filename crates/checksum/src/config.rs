//! Backend overrides from the environment.
//!
//! Each dispatched operation family reads one variable:
//!
//! | Variable | Slots |
//! |----------|-------|
//! | `ZSUM_ADLER32_FORCE` | `adler32`, `adler32_copy` |
//! | `ZSUM_CRC32_FORCE` | `crc32`, `crc32_copy` |
//! | `ZSUM_WINDOW_FORCE` | `slide_hash` |
//!
//! Values are `auto`, `portable`, `sse2`, `ssse3`, `avx2`, `neon`, `pclmul`,
//! `pmull` or `crc` (case-insensitive). The environment is read once per
//! process, before the first dispatch slot resolves; later changes have no
//! effect. A forced backend the CPU cannot run falls back to automatic
//! selection (see [`backend::select_forced`]).
//!
//! Without `std` there is no environment and every slot is `auto`.

use backend::ForceMode;

/// Variable pinning the Adler-32 backends.
pub const ADLER32_FORCE_ENV: &str = "ZSUM_ADLER32_FORCE";
/// Variable pinning the CRC-32 backends.
pub const CRC32_FORCE_ENV: &str = "ZSUM_CRC32_FORCE";
/// Variable pinning the window-slide backend.
pub const WINDOW_FORCE_ENV: &str = "ZSUM_WINDOW_FORCE";

/// Requested backend per operation family.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Config {
  /// Force mode for `adler32` and `adler32_copy`.
  pub adler32: ForceMode,
  /// Force mode for `crc32` and `crc32_copy`.
  pub crc32: ForceMode,
  /// Force mode for `slide_hash`.
  pub window: ForceMode,
}

impl Config {
  /// Build a config from a variable lookup.
  ///
  /// Unset and empty variables mean `auto`; unrecognized values are logged
  /// and ignored.
  #[must_use]
  pub fn from_lookup<S: AsRef<str>>(lookup: impl Fn(&str) -> Option<S>) -> Self {
    let force = |name: &str| {
      let value = lookup(name);
      parse_force(name, value.as_ref().map(|v| v.as_ref()))
    };
    Self { adler32: force(ADLER32_FORCE_ENV), crc32: force(CRC32_FORCE_ENV), window: force(WINDOW_FORCE_ENV) }
  }
}

fn parse_force(name: &str, value: Option<&str>) -> ForceMode {
  let Some(value) = value else {
    return ForceMode::Auto;
  };
  match value.parse::<ForceMode>() {
    Ok(mode) => {
      if mode != ForceMode::Auto {
        log::debug!("{name}={mode}");
      }
      mode
    }
    Err(err) => {
      log::warn!("ignoring {name}={value:?}: {err}");
      ForceMode::Auto
    }
  }
}

#[cfg(feature = "std")]
fn read_env() -> Config {
  Config::from_lookup(|name| std::env::var(name).ok())
}

/// The process configuration, read from the environment on first call.
#[cfg(feature = "std")]
#[must_use]
pub fn get() -> Config {
  use std::sync::OnceLock;
  static CONFIG: OnceLock<Config> = OnceLock::new();
  *CONFIG.get_or_init(read_env)
}

/// The process configuration (always `auto` without `std`).
#[cfg(not(feature = "std"))]
#[inline]
#[must_use]
pub fn get() -> Config {
  Config::default()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn lookup<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<&'a str> {
    move |name| pairs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
  }

  #[test]
  fn unset_is_auto() {
    assert_eq!(Config::from_lookup(lookup(&[])), Config::default());
  }

  #[test]
  fn reads_each_family() {
    let config = Config::from_lookup(lookup(&[
      (ADLER32_FORCE_ENV, "SSSE3"),
      (CRC32_FORCE_ENV, " pclmul "),
      (WINDOW_FORCE_ENV, "portable"),
    ]));
    assert_eq!(config.adler32, ForceMode::Ssse3);
    assert_eq!(config.crc32, ForceMode::Pclmul);
    assert_eq!(config.window, ForceMode::Portable);
  }

  #[test]
  fn garbage_is_ignored() {
    let config = Config::from_lookup(lookup(&[(CRC32_FORCE_ENV, "turbo")]));
    assert_eq!(config.crc32, ForceMode::Auto);
  }

  #[test]
  fn empty_is_auto() {
    let config = Config::from_lookup(lookup(&[(ADLER32_FORCE_ENV, "")]));
    assert_eq!(config.adler32, ForceMode::Auto);
  }

  #[cfg(feature = "std")]
  #[test]
  fn get_is_stable() {
    assert_eq!(get(), get());
  }
}
