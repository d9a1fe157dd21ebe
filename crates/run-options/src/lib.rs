pub mod defaults;
pub mod errors;
pub mod global;
pub mod loader;
pub mod merge;
pub mod model;

pub use defaults::{headless_rule_defaults, RuleDescriptor, HEADLESS_UNSUPPORTED_TAGS};
pub use errors::OptionsError;
pub use global::{EngineConfiguration, GlobalOptions, GlobalRule, HarnessConfig};
pub use loader::{load_harness_config, load_harness_config_with_options, LoadOptions};
pub use merge::{deep_merge_map, deep_merge_value, merge};
pub use model::{RuleToggle, RunOnly, RunOnlyKind, RunOptions};
