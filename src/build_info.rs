//! Compile-time version strings.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Short source revision, or `unknown` for builds outside git.
pub const GIT_REV: &str = env!("CYBERBOT_GIT_REV");

/// Trailer for `cyberbot --help`.
pub const HELP_BUILD_METADATA: &str = concat!("Revision: ", env!("CYBERBOT_GIT_REV"));

/// Version line for the session header, e.g. `v0.4.0 (1a2b3c4d)`.
pub fn startup_metadata_line() -> String {
    format!("v{VERSION} ({GIT_REV})")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn startup_metadata_line_names_version_and_revision() {
        let text = startup_metadata_line();
        assert!(text.starts_with(&format!("v{VERSION} ")), "{text}");
        assert!(text.contains(GIT_REV));
    }
}
