/*! Compiler-wide settings consumed by IR generation.
 *
 * The target EVM version, how much revert-reason text ends up in the output and the optimiser
 * configuration are fixed before code generation starts. They are loaded from JSON the same way
 * the rest of the compiler configuration is, and never change while a context is alive.
 */

use crate::{IrError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvmVersion {
    Homestead,
    TangerineWhistle,
    SpuriousDragon,
    Byzantium,
    Constantinople,
    Petersburg,
    Istanbul,
    Berlin,
    London,
    Paris,
    Shanghai,
    #[default]
    Cancun,
    Prague,
}

impl EvmVersion {
    pub const ALL: [EvmVersion; 13] = [
        EvmVersion::Homestead,
        EvmVersion::TangerineWhistle,
        EvmVersion::SpuriousDragon,
        EvmVersion::Byzantium,
        EvmVersion::Constantinople,
        EvmVersion::Petersburg,
        EvmVersion::Istanbul,
        EvmVersion::Berlin,
        EvmVersion::London,
        EvmVersion::Paris,
        EvmVersion::Shanghai,
        EvmVersion::Cancun,
        EvmVersion::Prague,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            EvmVersion::Homestead => "homestead",
            EvmVersion::TangerineWhistle => "tangerineWhistle",
            EvmVersion::SpuriousDragon => "spuriousDragon",
            EvmVersion::Byzantium => "byzantium",
            EvmVersion::Constantinople => "constantinople",
            EvmVersion::Petersburg => "petersburg",
            EvmVersion::Istanbul => "istanbul",
            EvmVersion::Berlin => "berlin",
            EvmVersion::London => "london",
            EvmVersion::Paris => "paris",
            EvmVersion::Shanghai => "shanghai",
            EvmVersion::Cancun => "cancun",
            EvmVersion::Prague => "prague",
        }
    }
}

impl fmt::Display for EvmVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EvmVersion {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|version| version.name() == s)
            .ok_or_else(|| IrError::Config(format!("Unknown EVM version: {}", s)))
    }
}

/// How much revert-reason text the generated code carries. Ordered by
/// verbosity, so `>= Debug` selects the debug modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RevertStrings {
    Strip,
    #[default]
    Default,
    Debug,
    VerboseDebug,
}

impl RevertStrings {
    pub fn is_debug(&self) -> bool {
        *self >= RevertStrings::Debug
    }

    pub fn name(&self) -> &'static str {
        match self {
            RevertStrings::Strip => "strip",
            RevertStrings::Default => "default",
            RevertStrings::Debug => "debug",
            RevertStrings::VerboseDebug => "verboseDebug",
        }
    }
}

impl fmt::Display for RevertStrings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for RevertStrings {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "strip" => Ok(RevertStrings::Strip),
            "default" => Ok(RevertStrings::Default),
            "debug" => Ok(RevertStrings::Debug),
            "verboseDebug" => Ok(RevertStrings::VerboseDebug),
            _ => Err(IrError::Config(format!("Unknown revert strings mode: {}", s))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OptimiserSettings {
    pub run_peephole: bool,
    pub run_deduplicate: bool,
    pub run_cse: bool,
    pub run_constant_optimiser: bool,
    pub run_yul_optimiser: bool,
    pub optimize_stack_allocation: bool,
    pub expected_executions_per_deployment: u64,
}

impl OptimiserSettings {
    pub fn none() -> Self {
        Self {
            run_peephole: false,
            run_deduplicate: false,
            run_cse: false,
            run_constant_optimiser: false,
            run_yul_optimiser: false,
            optimize_stack_allocation: false,
            expected_executions_per_deployment: 200,
        }
    }

    pub fn minimal() -> Self {
        Self {
            run_peephole: true,
            ..Self::none()
        }
    }

    pub fn standard() -> Self {
        Self {
            run_peephole: true,
            run_deduplicate: true,
            run_cse: true,
            run_constant_optimiser: true,
            run_yul_optimiser: false,
            optimize_stack_allocation: false,
            expected_executions_per_deployment: 200,
        }
    }

    pub fn full() -> Self {
        Self {
            run_yul_optimiser: true,
            optimize_stack_allocation: true,
            ..Self::standard()
        }
    }
}

impl Default for OptimiserSettings {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    pub evm_version: EvmVersion,
    pub revert_strings: RevertStrings,
    pub optimiser: OptimiserSettings,
}

impl Settings {
    pub fn new(
        evm_version: EvmVersion,
        revert_strings: RevertStrings,
        optimiser: OptimiserSettings,
    ) -> Self {
        Self {
            evm_version,
            revert_strings,
            optimiser,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| IrError::Config(e.to_string()))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| IrError::Io(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&contents)
    }

    pub fn to_json_string(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| IrError::Config(e.to_string()))
    }
}
