//! AWS Authentication
//!
//! Credentials come from the standard AWS provider chain (environment, shared
//! files including SSO, assume-role and `credential_process` profiles, then
//! container and instance metadata). The default region is read from the
//! environment or the shared config file.

use anyhow::{Context, Result};
use aws_config::default_provider::credentials::DefaultCredentialsChain;
use aws_config::Region;
use aws_credential_types::provider::ProvideCredentials;
use std::collections::HashMap;
use std::path::PathBuf;

pub use aws_credential_types::Credentials;

/// Profile used when none is given
pub const DEFAULT_PROFILE: &str = "default";

/// Provider name recorded on credentials built in code
const STATIC_PROVIDER: &str = "vpcscan";

/// Resolve credentials for a profile through the default provider chain
///
/// Environment variables win over the profile, the same precedence the AWS
/// CLI uses.
pub async fn load_credentials(profile: &str, region: &str) -> Result<Credentials> {
    if !validate_profile_name(profile) {
        anyhow::bail!("Invalid AWS profile name: {:?}", profile);
    }

    let chain = DefaultCredentialsChain::builder()
        .profile_name(profile)
        .region(Region::new(region.to_string()))
        .build()
        .await;

    let credentials = chain.provide_credentials().await.with_context(|| {
        format!(
            "You must configure awscli before using vpcscan (no credentials for profile '{}')",
            profile
        )
    })?;

    tracing::debug!("Using credentials for profile '{}'", profile);
    Ok(credentials)
}

/// Credentials from known keys (tests, local emulators)
pub fn static_credentials(
    access_key_id: &str,
    secret_access_key: &str,
    session_token: Option<&str>,
) -> Credentials {
    Credentials::new(
        access_key_id,
        secret_access_key,
        session_token.map(str::to_string),
        None,
        STATIC_PROVIDER,
    )
}

/// Get the AWS CLI configuration directory
pub fn get_aws_config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".aws"))
}

fn shared_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var("AWS_CONFIG_FILE") {
        return Some(PathBuf::from(path));
    }
    get_aws_config_dir().map(|p| p.join("config"))
}

/// Validate a profile name
/// Profile names end up in section headers, keep them to a safe charset
pub fn validate_profile_name(profile: &str) -> bool {
    !profile.is_empty()
        && profile.len() <= 64
        && profile
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | '@' | '+'))
}

/// Validate an AWS region name such as `us-east-1` or `us-gov-west-1`
pub fn validate_region(region: &str) -> bool {
    let parts: Vec<&str> = region.split('-').collect();
    parts.len() >= 3
        && parts.iter().all(|p| !p.is_empty())
        && parts
            .iter()
            .all(|p| p.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
        && parts
            .last()
            .is_some_and(|p| p.chars().all(|c| c.is_ascii_digit()))
}

/// Read the default region for a profile
/// Security: Validates region format before returning
pub fn get_default_region(profile: &str) -> Option<String> {
    for var in ["AWS_REGION", "AWS_DEFAULT_REGION"] {
        if let Ok(region) = std::env::var(var) {
            if validate_region(&region) {
                return Some(region);
            }
            tracing::warn!("Invalid region format in {}", var);
        }
    }

    let content = std::fs::read_to_string(shared_config_path()?).ok()?;

    // ~/.aws/config names every section but the default one "profile <name>"
    let section_name = if profile == DEFAULT_PROFILE {
        DEFAULT_PROFILE.to_string()
    } else {
        format!("profile {}", profile)
    };

    parse_ini_section(&content, &section_name)?
        .remove("region")
        .filter(|r| validate_region(r))
}

/// Parse the key/value pairs of one `[section]` of an INI-style AWS file
pub fn parse_ini_section(content: &str, section: &str) -> Option<HashMap<String, String>> {
    let mut found = false;
    let mut in_section = false;
    let mut values = HashMap::new();

    for line in content.lines() {
        let line = line.trim();
        // Security: Skip comments and empty lines
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }
        if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = header.trim() == section;
            found |= in_section;
            continue;
        }
        if in_section {
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    found.then_some(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDENTIALS: &str = "\
[default]
aws_access_key_id = AKIADEFAULT
aws_secret_access_key = default-secret

# audit account
[audit]
aws_access_key_id=AKIAAUDIT
aws_secret_access_key=audit-secret
aws_session_token = token
";

    #[test]
    fn test_parse_default_section() {
        let section = parse_ini_section(CREDENTIALS, "default").unwrap();
        assert_eq!(section.get("aws_access_key_id").unwrap(), "AKIADEFAULT");
        assert_eq!(section.get("aws_secret_access_key").unwrap(), "default-secret");
        assert!(section.get("aws_session_token").is_none());
    }

    #[test]
    fn test_parse_named_section() {
        let section = parse_ini_section(CREDENTIALS, "audit").unwrap();
        assert_eq!(section.get("aws_access_key_id").unwrap(), "AKIAAUDIT");
        assert_eq!(section.get("aws_session_token").unwrap(), "token");
    }

    #[test]
    fn test_parse_missing_section() {
        assert!(parse_ini_section(CREDENTIALS, "prod").is_none());
    }

    #[test]
    fn test_parse_config_profile_section() {
        let config = "[default]\nregion = us-east-1\n[profile audit]\nregion = eu-west-1\n";
        let section = parse_ini_section(config, "profile audit").unwrap();
        assert_eq!(section.get("region").unwrap(), "eu-west-1");
    }

    #[test]
    fn test_validate_region() {
        assert!(validate_region("us-east-1"));
        assert!(validate_region("us-gov-west-1"));
        assert!(validate_region("ap-southeast-2"));
        assert!(!validate_region("us-east"));
        assert!(!validate_region("US-EAST-1"));
        assert!(!validate_region("../etc/passwd"));
        assert!(!validate_region(""));
    }

    #[test]
    fn test_validate_profile_name() {
        assert!(validate_profile_name("default"));
        assert!(validate_profile_name("team.audit-ro"));
        assert!(!validate_profile_name(""));
        assert!(!validate_profile_name("evil]\n[default"));
    }

    #[test]
    fn test_static_credentials() {
        let creds = static_credentials("AKID", "super-secret", Some("tok"));
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.session_token(), Some("tok"));
        assert!(creds.expiry().is_none());
        assert!(!format!("{:?}", creds).contains("super-secret"));
    }

    #[tokio::test]
    async fn test_load_rejects_invalid_profile() {
        let err = load_credentials("evil]\n[default", "us-east-1")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Invalid AWS profile name"));
    }
}
