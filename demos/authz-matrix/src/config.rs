use anyhow::{Context, Result, bail};
use fichas_authz::{LEGACY_USER_ROLE, Resource, Role};
use serde::Deserialize;
use std::fs;

// Matrix demo configuration sourced from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatrixConfig {
    pub roles: Vec<String>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Deserialize)]
struct MatrixConfigOverride {
    roles: Option<Vec<String>>,
    resources: Option<Vec<String>>,
}

impl Default for MatrixConfig {
    fn default() -> Self {
        let mut roles: Vec<String> = Role::ALL.iter().map(|role| role.to_string()).collect();
        roles.push(LEGACY_USER_ROLE.to_string());
        Self {
            roles,
            resources: Resource::known().to_vec(),
        }
    }
}

impl MatrixConfig {
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Ok(value) = std::env::var("FICHAS_AUTHZ_ROLES") {
            config.roles = split_list(&value);
        }
        if let Ok(value) = std::env::var("FICHAS_AUTHZ_RESOURCES") {
            config.resources = parse_resources(split_list(&value))
                .with_context(|| "parse FICHAS_AUTHZ_RESOURCES")?;
        }
        Ok(config)
    }

    pub fn from_env_or_yaml() -> Result<Self> {
        let mut config = Self::from_env()?;
        if let Ok(path) = std::env::var("FICHAS_AUTHZ_CONFIG") {
            let contents = fs::read_to_string(&path)
                .with_context(|| format!("read FICHAS_AUTHZ_CONFIG: {path}"))?;
            config.apply_yaml(&contents)?;
        }
        Ok(config)
    }

    fn apply_yaml(&mut self, contents: &str) -> Result<()> {
        let override_cfg: MatrixConfigOverride =
            serde_yaml::from_str(contents).with_context(|| "parse matrix config yaml")?;
        if let Some(roles) = override_cfg.roles {
            self.roles = roles;
        }
        if let Some(resources) = override_cfg.resources {
            self.resources = parse_resources(resources).with_context(|| "parse resources")?;
        }
        Ok(())
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_resources(raw: Vec<String>) -> Result<Vec<Resource>> {
    let mut resources = Vec::with_capacity(raw.len());
    for name in raw {
        if name.contains(':') {
            bail!("resource name must not contain ':': {name}");
        }
        let resource = Resource::new(name).with_context(|| "empty resource name")?;
        resources.push(resource);
    }
    Ok(resources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    struct EnvGuard {
        key: &'static str,
        prev: Option<String>,
    }

    impl EnvGuard {
        fn set(key: &'static str, value: &str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe {
                std::env::set_var(key, value);
            }
            Self { key, prev }
        }

        fn unset(key: &'static str) -> Self {
            let prev = std::env::var(key).ok();
            unsafe {
                std::env::remove_var(key);
            }
            Self { key, prev }
        }
    }

    impl Drop for EnvGuard {
        fn drop(&mut self) {
            match &self.prev {
                Some(value) => unsafe {
                    std::env::set_var(self.key, value);
                },
                None => unsafe {
                    std::env::remove_var(self.key);
                },
            }
        }
    }

    #[test]
    #[serial]
    fn defaults_cover_every_role_and_the_legacy_alias() {
        let _g1 = EnvGuard::unset("FICHAS_AUTHZ_ROLES");
        let _g2 = EnvGuard::unset("FICHAS_AUTHZ_RESOURCES");
        let config = MatrixConfig::from_env().expect("config");
        assert_eq!(config.roles.len(), Role::ALL.len() + 1);
        assert!(config.roles.iter().any(|role| role == "usuario"));
        assert_eq!(config.resources, Resource::known().to_vec());
    }

    #[test]
    #[serial]
    fn env_lists_are_split_and_trimmed() {
        let _g1 = EnvGuard::set("FICHAS_AUTHZ_ROLES", "admin, editor,,root");
        let _g2 = EnvGuard::set("FICHAS_AUTHZ_RESOURCES", "fichas , budget");
        let config = MatrixConfig::from_env().expect("config");
        assert_eq!(config.roles, vec!["admin", "editor", "root"]);
        assert_eq!(config.resources, vec![Resource::FICHAS, Resource::BUDGET]);
    }

    #[test]
    #[serial]
    fn env_rejects_grant_shaped_resources() {
        let _g1 = EnvGuard::set("FICHAS_AUTHZ_RESOURCES", "fichas:write");
        let err = MatrixConfig::from_env().expect_err("invalid resource");
        assert!(format!("{err:#}").contains("FICHAS_AUTHZ_RESOURCES"));
    }

    #[test]
    fn yaml_overrides_only_present_fields() {
        let mut config = MatrixConfig::default();
        config
            .apply_yaml("roles:\n  - manager\n  - usuario\n")
            .expect("yaml");
        assert_eq!(config.roles, vec!["manager", "usuario"]);
        assert_eq!(config.resources, Resource::known().to_vec());
    }

    #[test]
    fn yaml_rejects_empty_resource_names() {
        let mut config = MatrixConfig::default();
        let err = config
            .apply_yaml("resources:\n  - fichas\n  - \"\"\n")
            .expect_err("empty resource");
        assert!(format!("{err:#}").contains("empty resource name"));
    }

    #[test]
    fn yaml_parse_errors_are_reported() {
        let mut config = MatrixConfig::default();
        let err = config.apply_yaml("roles: [").expect_err("bad yaml");
        assert!(err.to_string().contains("parse matrix config yaml"));
    }
}
