//! Configuration system for the MIPS pipeline simulator.
//!
//! This module defines all configuration structures used to parameterize the
//! simulator. It provides:
//! 1. **Defaults:** Baseline machine constants (base address, widths, queue capacities).
//! 2. **Structures:** Hierarchical config for general, memory, and pipeline settings.
//! 3. **Validation:** Rejection of machines that cannot make progress.
//!
//! Configuration is supplied as JSON (`Config::from_json`), or use `Config::default()`
//! for the reference dual-issue machine.

use serde::Deserialize;

use crate::common::constants::WORD_SIZE;
use crate::common::error::SimError;

/// Default configuration constants for the simulator.
///
/// These values describe the reference machine when not explicitly overridden
/// in a JSON configuration file.
mod defaults {
    /// Address of the first program word (0x80).
    pub const BASE_ADDRESS: u32 = crate::common::constants::BASE_ADDRESS;

    /// Cycle budget after which a run that never reaches `BREAK` is aborted.
    pub const MAX_CYCLES: u64 = 100_000;

    /// Instructions fetched per cycle.
    pub const FETCH_WIDTH: usize = 2;

    /// Instructions issued per cycle.
    pub const ISSUE_WIDTH: usize = 2;

    /// Capacity of the pre-issue queue.
    pub const PRE_ISSUE_SIZE: usize = 4;

    /// Capacity of the pre-ALU queue.
    pub const PRE_ALU_SIZE: usize = 2;

    /// Capacity of the post-ALU queue.
    pub const POST_ALU_SIZE: usize = 1;

    /// Capacity of the pre-MEM queue.
    pub const PRE_MEM_SIZE: usize = 1;

    /// Capacity of the post-MEM queue.
    pub const POST_MEM_SIZE: usize = 1;
}

/// Root configuration structure.
///
/// Every section and field is optional in JSON; missing values take the
/// reference machine's defaults.
///
/// # Examples
///
/// ```
/// use mipssim_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_cycles": 500 },
///     "pipeline": { "issue_width": 1 }
/// }"#;
///
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.general.max_cycles, 500);
/// assert_eq!(config.pipeline.issue_width, 1);
/// assert_eq!(config.pipeline.pre_issue_size, 4);
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// General simulation settings
    #[serde(default)]
    pub general: GeneralConfig,
    /// Program memory layout
    #[serde(default)]
    pub memory: MemoryConfig,
    /// Pipeline widths and queue capacities
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

impl Config {
    /// Parses and validates a JSON configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for malformed JSON or a machine that
    /// fails [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| SimError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the configured machine can make progress.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::InvalidConfig`] for a zero width, a zero queue
    /// capacity, a zero cycle budget, or a misaligned base address.
    pub fn validate(&self) -> Result<(), SimError> {
        if self.general.max_cycles == 0 {
            return Err(SimError::InvalidConfig("max_cycles must be non-zero".into()));
        }
        if self.memory.base_address % WORD_SIZE != 0 {
            return Err(SimError::InvalidConfig(format!(
                "base_address {} is not word aligned",
                self.memory.base_address
            )));
        }
        let p = &self.pipeline;
        let sizes = [
            ("fetch_width", p.fetch_width),
            ("issue_width", p.issue_width),
            ("pre_issue_size", p.pre_issue_size),
            ("pre_alu_size", p.pre_alu_size),
            ("post_alu_size", p.post_alu_size),
            ("pre_mem_size", p.pre_mem_size),
            ("post_mem_size", p.post_mem_size),
        ];
        if let Some((name, _)) = sizes.iter().find(|(_, v)| *v == 0) {
            return Err(SimError::InvalidConfig(format!("{name} must be non-zero")));
        }
        Ok(())
    }
}

/// General simulation settings and options.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct GeneralConfig {
    /// Abort with [`SimError::CycleLimitExceeded`] after this many cycles
    #[serde(default = "GeneralConfig::default_max_cycles")]
    pub max_cycles: u64,

    /// Emit a trace event for every instruction movement
    #[serde(default)]
    pub trace_instructions: bool,
}

impl GeneralConfig {
    /// Returns the default cycle budget.
    const fn default_max_cycles() -> u64 {
        defaults::MAX_CYCLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            max_cycles: defaults::MAX_CYCLES,
            trace_instructions: false,
        }
    }
}

/// Program memory layout.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MemoryConfig {
    /// Address of the first program word
    #[serde(default = "MemoryConfig::default_base_address")]
    pub base_address: u32,
}

impl MemoryConfig {
    /// Returns the default program base address.
    const fn default_base_address() -> u32 {
        defaults::BASE_ADDRESS
    }
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            base_address: defaults::BASE_ADDRESS,
        }
    }
}

/// Pipeline widths and bounded queue capacities.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Instructions fetched per cycle
    #[serde(default = "PipelineConfig::default_fetch_width")]
    pub fetch_width: usize,

    /// Instructions issued per cycle
    #[serde(default = "PipelineConfig::default_issue_width")]
    pub issue_width: usize,

    /// Pre-issue queue capacity
    #[serde(default = "PipelineConfig::default_pre_issue_size")]
    pub pre_issue_size: usize,

    /// Pre-ALU queue capacity
    #[serde(default = "PipelineConfig::default_pre_alu_size")]
    pub pre_alu_size: usize,

    /// Post-ALU queue capacity
    #[serde(default = "PipelineConfig::default_post_alu_size")]
    pub post_alu_size: usize,

    /// Pre-MEM queue capacity
    #[serde(default = "PipelineConfig::default_pre_mem_size")]
    pub pre_mem_size: usize,

    /// Post-MEM queue capacity
    #[serde(default = "PipelineConfig::default_post_mem_size")]
    pub post_mem_size: usize,
}

impl PipelineConfig {
    /// Returns the default fetch width.
    const fn default_fetch_width() -> usize {
        defaults::FETCH_WIDTH
    }

    /// Returns the default issue width.
    const fn default_issue_width() -> usize {
        defaults::ISSUE_WIDTH
    }

    /// Returns the default pre-issue capacity.
    const fn default_pre_issue_size() -> usize {
        defaults::PRE_ISSUE_SIZE
    }

    /// Returns the default pre-ALU capacity.
    const fn default_pre_alu_size() -> usize {
        defaults::PRE_ALU_SIZE
    }

    /// Returns the default post-ALU capacity.
    const fn default_post_alu_size() -> usize {
        defaults::POST_ALU_SIZE
    }

    /// Returns the default pre-MEM capacity.
    const fn default_pre_mem_size() -> usize {
        defaults::PRE_MEM_SIZE
    }

    /// Returns the default post-MEM capacity.
    const fn default_post_mem_size() -> usize {
        defaults::POST_MEM_SIZE
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fetch_width: defaults::FETCH_WIDTH,
            issue_width: defaults::ISSUE_WIDTH,
            pre_issue_size: defaults::PRE_ISSUE_SIZE,
            pre_alu_size: defaults::PRE_ALU_SIZE,
            post_alu_size: defaults::POST_ALU_SIZE,
            pre_mem_size: defaults::PRE_MEM_SIZE,
            post_mem_size: defaults::POST_MEM_SIZE,
        }
    }
}
