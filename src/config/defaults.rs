//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn content() -> PathBuf {
        "src/content".into()
    }

    pub fn templates() -> PathBuf {
        "src/templates".into()
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn jobs() -> usize {
        0
    }
}
