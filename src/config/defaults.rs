//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [base] Section Defaults
// ============================================================================

pub mod base {
    pub fn url() -> Option<String> {
        None
    }

    pub fn language() -> String {
        "ru".into()
    }
}

// ============================================================================
// [content] Section Defaults
// ============================================================================

pub mod content {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "content".into()
    }

    pub fn categories() -> PathBuf {
        "categories.toml".into()
    }

    pub fn articles() -> PathBuf {
        "articles".into()
    }
}

// ============================================================================
// [blog] Section Defaults
// ============================================================================

pub mod blog {
    pub fn related_count() -> usize {
        3
    }

    pub fn popular_count() -> usize {
        4
    }

    pub fn sidebar_tags() -> usize {
        10
    }

    pub fn search_min_chars() -> usize {
        2
    }
}

// ============================================================================
// [serve] Section Defaults
// ============================================================================

pub mod serve {
    pub fn interface() -> String {
        "127.0.0.1".into()
    }

    pub fn port() -> u16 {
        8080
    }

    pub fn workers() -> usize {
        4
    }
}

// ============================================================================
// [roi] Section Defaults
// ============================================================================

pub mod roi {
    pub fn investment() -> u64 {
        500_000
    }

    pub fn multiplier() -> u64 {
        1_000
    }

    pub fn min_defect_rate() -> u32 {
        5
    }

    pub fn max_defect_rate() -> u32 {
        50
    }

    pub fn defect_rate() -> u32 {
        20
    }

    pub mod volume {
        pub fn small() -> u64 {
            30
        }

        pub fn medium() -> u64 {
            250
        }

        pub fn large() -> u64 {
            750
        }
    }
}

// ============================================================================
// [contact] Section Defaults
// ============================================================================

pub mod contact {
    pub fn email() -> String {
        "info@airipening.ru".into()
    }

    pub fn subject() -> String {
        "Новая заявка на демо-доступ".into()
    }
}
