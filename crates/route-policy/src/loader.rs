use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::schema::PolicyConfig;

/// Load a [`PolicyConfig`] from a YAML file on disk.
///
/// Validates the config after deserialization (version check, unique policy
/// and statement names).
pub fn load_policy(path: impl AsRef<Path>) -> Result<PolicyConfig> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read policy file: {}", path.display()))?;
    load_policy_from_str(&contents)
        .with_context(|| format!("failed to parse policy file: {}", path.display()))
}

/// Parse and validate a [`PolicyConfig`] from a YAML string.
pub fn load_policy_from_str(yaml: &str) -> Result<PolicyConfig> {
    let config: PolicyConfig =
        serde_yml::from_str(yaml).context("YAML deserialization failed")?;
    validate(&config)?;
    Ok(config)
}

/// Run post-deserialization validation checks.
///
/// Defined-set contents are not checked here; a bad prefix entry only costs
/// that entry when the policy is built.
fn validate(config: &PolicyConfig) -> Result<()> {
    if config.version != "1.0" {
        bail!(
            "unsupported policy version '{}'; only '1.0' is supported",
            config.version
        );
    }

    let mut policies = HashSet::new();
    for policy in &config.policy_definitions {
        if policy.name.is_empty() {
            bail!("policy name must not be empty");
        }
        if !policies.insert(&policy.name) {
            bail!("duplicate policy name: '{}'", policy.name);
        }

        let mut statements = HashSet::new();
        for statement in &policy.statements {
            if statement.name.is_empty() {
                bail!("statement name in policy '{}' must not be empty", policy.name);
            }
            if !statements.insert(&statement.name) {
                bail!(
                    "duplicate statement name '{}' in policy '{}'",
                    statement.name,
                    policy.name
                );
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_minimal_policy() {
        let yaml = r#"
version: "1.0"
"#;
        let config = load_policy_from_str(yaml).unwrap();
        assert_eq!(config.version, "1.0");
        assert!(config.policy_definitions.is_empty());
    }

    #[test]
    fn reject_wrong_version() {
        let yaml = r#"
version: "2.0"
"#;
        let err = load_policy_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("unsupported policy version"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn reject_duplicate_policy_names() {
        let yaml = r#"
version: "1.0"
policy_definitions:
  - name: "dup"
  - name: "dup"
"#;
        let err = load_policy_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("duplicate policy name"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn reject_empty_policy_name() {
        let yaml = r#"
version: "1.0"
policy_definitions:
  - name: ""
"#;
        let err = load_policy_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("must not be empty"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn reject_duplicate_statement_names() {
        let yaml = r#"
version: "1.0"
policy_definitions:
  - name: "p"
    statements:
      - name: "st"
      - name: "st"
"#;
        let err = load_policy_from_str(yaml).unwrap_err();
        assert!(
            err.to_string().contains("duplicate statement name 'st' in policy 'p'"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn same_statement_name_in_different_policies_is_fine() {
        let yaml = r#"
version: "1.0"
policy_definitions:
  - name: "a"
    statements:
      - name: "st"
  - name: "b"
    statements:
      - name: "st"
"#;
        assert!(load_policy_from_str(yaml).is_ok());
    }

    #[test]
    fn malformed_set_entries_still_load() {
        let yaml = r#"
version: "1.0"
defined_sets:
  prefix_sets:
    - prefix_set_name: "ps"
      prefix_list:
        - address: "bogus"
          masklength: 24
          masklength_range: "x..y"
"#;
        let config = load_policy_from_str(yaml).unwrap();
        assert_eq!(config.defined_sets.prefix_sets[0].prefix_list.len(), 1);
    }

    #[test]
    fn load_from_nonexistent_file() {
        let err = load_policy("/does/not/exist.yaml").unwrap_err();
        assert!(
            err.to_string().contains("failed to read policy file"),
            "unexpected error: {err}"
        );
    }

    #[test]
    fn reject_invalid_yaml() {
        let err = load_policy_from_str("version: [").unwrap_err();
        assert!(
            err.to_string().contains("YAML deserialization failed"),
            "unexpected error: {err}"
        );
    }
}
