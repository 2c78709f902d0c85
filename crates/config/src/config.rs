// Copyright 2023-, Edge & Node, GraphOps, and Semiotic Labs.
// SPDX-License-Identifier: Apache-2.0

use std::{env, net::SocketAddr, path::PathBuf, time::Duration};

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use regex::Regex;
use serde::Deserialize;
use serde_with::{serde_as, DurationSecondsWithFrac};
use url::Url;

const SHARED_PREFIX: &str = "GREETING_";

#[derive(Debug, Deserialize)]
#[cfg_attr(test, derive(PartialEq))]
pub struct Config {
    pub service: ServiceConfig,
    pub client: ClientConfig,
}

// Newtype wrapping Config to be able use serde_ignored with Figment
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ConfigWrapper(pub Config);

// Custom Deserializer for ConfigWrapper
// This is needed to warn about unknown fields
impl<'de> Deserialize<'de> for ConfigWrapper {
    fn deserialize<D>(deserializer: D) -> Result<ConfigWrapper, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let config: Config = serde_ignored::deserialize(deserializer, |path| {
            tracing::warn!("Ignoring unknown configuration field: {}", path);
        })?;

        Ok(ConfigWrapper(config))
    }
}

pub enum ConfigPrefix {
    Service,
    Client,
}

impl ConfigPrefix {
    fn get_prefix(&self) -> &'static str {
        match self {
            Self::Service => "GREETING_SERVICE_",
            Self::Client => "GREETING_CLIENT_",
        }
    }
}

impl Config {
    /// Loads the configuration by layering, from lowest to highest priority:
    /// the compiled-in defaults, the optional TOML file, the component's
    /// prefixed environment variables and finally the shared `GREETING_` ones.
    pub fn parse(prefix: ConfigPrefix, filename: Option<&PathBuf>) -> Result<Self, String> {
        let config_defaults = include_str!("../default_values.toml");

        let mut figment_config = Figment::new().merge(Toml::string(config_defaults));

        if let Some(path) = filename {
            let mut config_content = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read config file: {e}"))?;
            config_content = Self::substitute_env_vars(config_content)?;
            figment_config = figment_config.merge(Toml::string(&config_content));
        }

        let config: ConfigWrapper = figment_config
            .merge(Self::from_env_ignore_empty(prefix.get_prefix()))
            .merge(Self::from_env_ignore_empty(SHARED_PREFIX))
            .extract()
            .map_err(|e| e.to_string())?;

        config.0.validate()?;
        Ok(config.0)
    }

    fn from_env_ignore_empty(prefix: &str) -> Env {
        let prefixed_env = Env::prefixed(prefix).split("__");
        let ignore_prefixed: Vec<_> = prefixed_env
            .iter()
            .filter_map(|(key, value)| {
                if value.is_empty() {
                    Some(key.into_string())
                } else {
                    None
                }
            })
            .collect();
        let ref_ignore = ignore_prefixed
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>();
        prefixed_env.ignore(&ref_ignore)
    }

    fn substitute_env_vars(content: String) -> Result<String, String> {
        let reg = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").map_err(|e| e.to_string())?;
        let mut missing_vars = Vec::new();
        let mut result = String::new();

        for line in content.lines() {
            if !line.trim_start().starts_with('#') {
                let processed_line = reg.replace_all(line, |caps: &regex::Captures| {
                    let var_name = &caps[1];
                    match env::var(var_name) {
                        Ok(value) => value,
                        Err(_) => {
                            missing_vars.push(var_name.to_string());
                            format!("${{{var_name}}}")
                        }
                    }
                });
                result.push_str(&processed_line);
                result.push('\n');
            }
        }

        if !missing_vars.is_empty() {
            return Err(format!(
                "Missing environment variables: {}",
                missing_vars.join(", ")
            ));
        }

        Ok(result.trim_end().to_string())
    }

    // custom validation of the values
    fn validate(&self) -> Result<(), String> {
        if self.client.element_id.trim().is_empty() {
            return Err("client.element_id must not be empty".to_string());
        }

        match self.client.query_url.scheme() {
            "http" | "https" => {}
            scheme => {
                return Err(format!(
                    "client.query_url must use http or https, found `{scheme}`"
                ))
            }
        }

        if self.client.request_timeout_secs == Some(Duration::ZERO) {
            return Err("client.request_timeout_secs must be greater than 0".to_string());
        }

        if self.service.host_and_port.port() == 0 {
            tracing::warn!(
                "`service.host_and_port` uses port 0, the operating system will pick \
                a free port and clients using the default URL will not find the service."
            );
        }

        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ServiceConfig {
    pub host_and_port: SocketAddr,
}

#[serde_as]
#[derive(Debug, Deserialize, Clone)]
#[cfg_attr(test, derive(PartialEq))]
pub struct ClientConfig {
    pub query_url: Url,
    pub element_id: String,
    #[serde_as(as = "Option<DurationSecondsWithFrac<f64>>")]
    pub request_timeout_secs: Option<Duration>,
}

#[cfg(test)]
mod tests {
    use std::{env, fs, path::PathBuf, time::Duration};

    use figment::value::Uncased;
    use sealed_test::prelude::*;
    use tracing_test::traced_test;

    use super::{ClientConfig, ServiceConfig, SHARED_PREFIX};
    use crate::{Config, ConfigPrefix};

    #[test]
    fn test_defaults_without_file() {
        let config = Config::parse(ConfigPrefix::Client, None).unwrap();

        assert_eq!(
            config.service.host_and_port,
            "0.0.0.0:9001".parse().unwrap()
        );
        assert_eq!(config.client.query_url.as_str(), "http://localhost:9001/");
        assert_eq!(config.client.element_id, "greeting");
        assert_eq!(config.client.request_timeout_secs, None);
    }

    #[test]
    fn test_minimal_config() {
        Config::parse(
            ConfigPrefix::Service,
            Some(PathBuf::from("minimal-config-example.toml")).as_ref(),
        )
        .unwrap();
    }

    #[test]
    fn test_maximal_config() {
        let config = Config::parse(
            ConfigPrefix::Service,
            Some(PathBuf::from("maximal-config-example.toml")).as_ref(),
        )
        .unwrap();

        assert_eq!(
            config,
            Config {
                service: ServiceConfig {
                    host_and_port: "127.0.0.1:9101".parse().unwrap(),
                },
                client: ClientConfig {
                    query_url: "http://localhost:9101/".parse().unwrap(),
                    element_id: "banner".to_string(),
                    request_timeout_secs: Some(Duration::from_millis(2500)),
                },
            }
        );
    }

    // Test that we can load config with unknown fields, in particular coming from environment variables
    #[sealed_test(files = ["minimal-config-example.toml"])]
    #[traced_test]
    fn test_unknown_fields() {
        env::set_var("GREETING_SERVICE_PLUMBUS", "howisitmade?");

        Config::parse(
            ConfigPrefix::Service,
            Some(PathBuf::from("minimal-config-example.toml")).as_ref(),
        )
        .unwrap();

        assert!(logs_contain(
            "Ignoring unknown configuration field: plumbus"
        ));
    }

    #[sealed_test(files = ["minimal-config-example.toml"])]
    fn test_override_with_env() {
        env::set_var("GREETING_SERVICE_SERVICE__HOST_AND_PORT", "127.0.0.1:7000");

        let config = Config::parse(
            ConfigPrefix::Service,
            Some(PathBuf::from("minimal-config-example.toml")).as_ref(),
        )
        .unwrap();

        assert_eq!(
            config.service.host_and_port,
            "127.0.0.1:7000".parse().unwrap()
        );
    }

    // The client only reads its own prefix, never the service one
    #[sealed_test]
    fn test_prefix_is_scoped_to_component() {
        env::set_var("GREETING_SERVICE_CLIENT__ELEMENT_ID", "ignored");
        env::set_var("GREETING_CLIENT_CLIENT__ELEMENT_ID", "headline");

        let config = Config::parse(ConfigPrefix::Client, None).unwrap();

        assert_eq!(config.client.element_id, "headline");
    }

    #[sealed_test]
    fn test_rejects_empty_element_id() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[client]\nelement_id = \"  \"\n").unwrap();

        let err = Config::parse(
            ConfigPrefix::Client,
            Some(PathBuf::from(file.path())).as_ref(),
        )
        .unwrap_err();

        assert_eq!(err, "client.element_id must not be empty");
    }

    #[sealed_test]
    fn test_rejects_non_http_query_url() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[client]\nquery_url = \"ftp://localhost:9001/\"\n").unwrap();

        let err = Config::parse(
            ConfigPrefix::Client,
            Some(PathBuf::from(file.path())).as_ref(),
        )
        .unwrap_err();

        assert!(err.contains("ftp"), "{err}");
    }

    #[sealed_test]
    fn test_rejects_zero_timeout() {
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(file.path(), "[client]\nrequest_timeout_secs = 0\n").unwrap();

        let err = Config::parse(
            ConfigPrefix::Client,
            Some(PathBuf::from(file.path())).as_ref(),
        )
        .unwrap_err();

        assert_eq!(err, "client.request_timeout_secs must be greater than 0");
    }

    #[test]
    fn test_ignore_empty_values() {
        env::set_var("GREETING_TEST1", "123");
        env::set_var("GREETING_TEST2", "");
        env::set_var("GREETING_TEST3__TEST1", "123");
        env::set_var("GREETING_TEST3__TEST2", "");

        let env = Config::from_env_ignore_empty(SHARED_PREFIX);

        let mut values: Vec<_> = env
            .iter()
            .filter(|(key, _)| {
                matches!(
                    key.as_str().to_ascii_lowercase().as_str(),
                    "test1" | "test2" | "test3.test1" | "test3.test2"
                )
            })
            .collect();
        values.sort_by(|a, b| a.0.as_str().cmp(b.0.as_str()));

        assert_eq!(values.len(), 2);

        assert_eq!(values[0], (Uncased::new("test1"), "123".to_string()));
        assert_eq!(values[1], (Uncased::new("test3.test1"), "123".to_string()));
    }

    // Test to check substitute_env_vars function is substituting env variables
    // operators can use ${ENV_VAR_NAME} to point to the required env variable
    #[test]
    fn test_substitution_using_regex() {
        env::set_var("GREETING_TEST_VAR1", "changed_value_1");

        let input = r#"
            [section1]
            key1 = "${GREETING_TEST_VAR1}"
            key2 = "${TEST_VAR-default}"
            key3 = "{{TEST_VAR3}}"

            [section2]
            key4 = "prefix_${GREETING_TEST_VAR1}_${TEST_VAR-default}_suffix"
            key5 = "a_key_without_substitution"
        "#
        .to_string();

        let expected_output = r#"
            [section1]
            key1 = "changed_value_1"
            key2 = "${TEST_VAR-default}"
            key3 = "{{TEST_VAR3}}"

            [section2]
            key4 = "prefix_changed_value_1_${TEST_VAR-default}_suffix"
            key5 = "a_key_without_substitution"
        "#
        .to_string();

        let result = Config::substitute_env_vars(input).expect("error substiting env variables");

        assert_eq!(
            result.trim(),
            expected_output.trim(),
            "Environment variable substitution failed"
        );

        env::remove_var("GREETING_TEST_VAR1");
    }

    #[test]
    fn test_substitution_reports_missing_vars() {
        let input = "[client]\nquery_url = \"${GREETING_SURELY_UNSET_URL}\"".to_string();

        let err = Config::substitute_env_vars(input).unwrap_err();

        assert_eq!(
            err,
            "Missing environment variables: GREETING_SURELY_UNSET_URL"
        );
    }

    #[sealed_test]
    fn test_parse_with_env_substitution() {
        env::set_var("GREETING_UPSTREAM_URL", "http://greeter.internal:8080/");
        let file = tempfile::NamedTempFile::new().unwrap();
        fs::write(
            file.path(),
            "# commented lines are dropped: ${NOT_SET_ANYWHERE}\n\
             [client]\n\
             query_url = \"${GREETING_UPSTREAM_URL}\"\n",
        )
        .unwrap();

        let config = Config::parse(
            ConfigPrefix::Client,
            Some(PathBuf::from(file.path())).as_ref(),
        )
        .unwrap();

        assert_eq!(
            config.client.query_url.as_str(),
            "http://greeter.internal:8080/"
        );
    }
}
