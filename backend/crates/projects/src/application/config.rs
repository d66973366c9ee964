//! Application Configuration

/// Projects application configuration
#[derive(Debug, Clone)]
pub struct ProjectsConfig {
    /// Maximum accepted upload size in bytes
    pub max_file_size_bytes: usize,
}

impl Default for ProjectsConfig {
    fn default() -> Self {
        Self {
            // 50 MiB, matching the provider-side file limit
            max_file_size_bytes: 50 * 1024 * 1024,
        }
    }
}
