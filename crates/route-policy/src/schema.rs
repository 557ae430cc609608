use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Top-level routing policy configuration loaded from a YAML file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyConfig {
    /// Schema version; currently must be "1.0".
    pub version: String,
    /// Named prefix and neighbor sets referenced by statements.
    #[serde(default)]
    pub defined_sets: DefinedSets,
    /// Policies, each an ordered list of statements.
    #[serde(default)]
    pub policy_definitions: Vec<PolicyDefinition>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefinedSets {
    #[serde(default)]
    pub prefix_sets: Vec<PrefixSet>,
    #[serde(default)]
    pub neighbor_sets: Vec<NeighborSet>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixSet {
    pub prefix_set_name: String,
    #[serde(default)]
    pub prefix_list: Vec<PrefixEntry>,
}

/// One prefix-set entry as written in configuration.
///
/// The address is kept as text so that a bad entry only costs that entry
/// when the policy is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrefixEntry {
    pub address: String,
    pub masklength: u8,
    /// `"min..max"`; either bound may be left out.  Empty means exact match.
    #[serde(default)]
    pub masklength_range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborSet {
    pub neighbor_set_name: String,
    #[serde(default)]
    pub neighbor_info_list: Vec<NeighborInfo>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NeighborInfo {
    pub address: IpAddr,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyDefinition {
    pub name: String,
    /// Evaluated in order; the first matching statement decides.
    #[serde(default)]
    pub statements: Vec<StatementDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementDefinition {
    pub name: String,
    #[serde(default)]
    pub conditions: ConditionsDefinition,
    #[serde(default)]
    pub actions: ActionsDefinition,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConditionsDefinition {
    /// Name of the prefix set to match; empty or unknown means no filter.
    #[serde(default)]
    pub match_prefix_set: String,
    /// Name of the neighbor set to match; empty or unknown means no filter.
    #[serde(default)]
    pub match_neighbor_set: String,
    #[serde(default)]
    pub match_set_options: MatchSetOptions,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionsDefinition {
    #[serde(default)]
    pub accept_route: bool,
}

/// How a statement combines the results of its conditions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchSetOptions {
    /// Every condition must match.
    All,
    /// At least one condition must match.
    #[default]
    Any,
    /// No condition may match.
    Invert,
    /// Any other configured value.  Statements with this mode never match.
    #[serde(other)]
    Unrecognized,
}
