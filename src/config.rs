//! Configuration for tablekv
//!
//! Centralized configuration with sensible defaults.

/// Main configuration for a `MemDb` instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Table Configuration
    // -------------------------------------------------------------------------
    /// Number of records each new table pre-allocates room for
    /// (both the index and the sequence)
    pub initial_table_capacity: usize,

    // -------------------------------------------------------------------------
    // Registry Configuration
    // -------------------------------------------------------------------------
    /// Tables created when the store is opened
    pub tables: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            initial_table_capacity: 1024,
            tables: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the per-table pre-allocation (in records)
    pub fn initial_table_capacity(mut self, capacity: usize) -> Self {
        self.config.initial_table_capacity = capacity;
        self
    }

    /// Add a table to create on open
    pub fn table(mut self, name: impl Into<String>) -> Self {
        self.config.tables.push(name.into());
        self
    }

    /// Add several tables to create on open
    pub fn tables<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tables.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
