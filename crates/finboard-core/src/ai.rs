//! AI provider configuration and the connection-probe interface.
//!
//! The store only keeps and forwards the configuration. Actually sending the
//! probe request belongs to the host platform, which implements
//! [`ConnectionProbe`].

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOCAL_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_LOCAL_MODEL: &str = "llama3";
pub const ANTHROPIC_API_VERSION: &str = "2023-06-01";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiProvider {
    #[default]
    Local,
    #[serde(rename = "openai")]
    OpenAi,
    Anthropic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AiConfig {
    pub provider: AiProvider,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: AiProvider::Local,
            api_key: None,
            base_url: Some(DEFAULT_LOCAL_BASE_URL.to_string()),
            model: Some(DEFAULT_LOCAL_MODEL.to_string()),
        }
    }
}

/// Partial update for [`AiConfig`]; `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AiConfigPatch {
    pub provider: Option<AiProvider>,
    pub api_key: Option<Option<String>>,
    pub base_url: Option<Option<String>>,
    pub model: Option<Option<String>>,
}

impl AiConfig {
    pub fn apply(&mut self, patch: AiConfigPatch) {
        if let Some(provider) = patch.provider {
            self.provider = provider;
        }
        if let Some(api_key) = patch.api_key {
            self.api_key = api_key;
        }
        if let Some(base_url) = patch.base_url {
            self.base_url = base_url;
        }
        if let Some(model) = patch.model {
            self.model = model;
        }
    }

    /// The request a connectivity probe should send for this configuration.
    ///
    /// Returns `None` when the configuration cannot be probed (a cloud
    /// provider without an API key), which counts as a failed probe.
    pub fn probe_request(&self) -> Option<ProbeRequest> {
        match self.provider {
            AiProvider::Local => {
                let base = self
                    .base_url
                    .as_deref()
                    .filter(|u| !u.is_empty())
                    .unwrap_or(DEFAULT_LOCAL_BASE_URL);
                Some(ProbeRequest {
                    url: format!("{}/api/tags", base.trim_end_matches('/')),
                    headers: Vec::new(),
                })
            }
            AiProvider::OpenAi => {
                let key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
                Some(ProbeRequest {
                    url: "https://api.openai.com/v1/models".to_string(),
                    headers: vec![("Authorization".to_string(), format!("Bearer {key}"))],
                })
            }
            AiProvider::Anthropic => {
                let key = self.api_key.as_deref().filter(|k| !k.is_empty())?;
                Some(ProbeRequest {
                    url: "https://api.anthropic.com/v1/models".to_string(),
                    headers: vec![
                        ("x-api-key".to_string(), key.to_string()),
                        (
                            "anthropic-version".to_string(),
                            ANTHROPIC_API_VERSION.to_string(),
                        ),
                    ],
                })
            }
        }
    }
}

/// An HTTP GET the host performs to test connectivity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeRequest {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Result of a connectivity test as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProbeStatus {
    #[default]
    Idle,
    Testing,
    Success,
    Error,
}

/// Host-provided transport for connectivity probes.
pub trait ConnectionProbe {
    /// Perform the request; `true` if the provider answered successfully.
    fn probe(&self, request: &ProbeRequest) -> bool;
}

/// Tracks the tri-state outcome of the latest probe.
#[derive(Debug, Clone, Default)]
pub struct ProbeTracker {
    status: ProbeStatus,
}

impl ProbeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ProbeStatus {
        self.status
    }

    /// Mark a probe as in flight (for hosts that run it asynchronously).
    pub fn begin(&mut self) {
        self.status = ProbeStatus::Testing;
    }

    /// Record the outcome of a probe started with [`begin`](Self::begin).
    pub fn finish(&mut self, ok: bool) {
        self.status = if ok {
            ProbeStatus::Success
        } else {
            ProbeStatus::Error
        };
    }

    /// Run a probe synchronously through `transport`.
    pub fn run(&mut self, config: &AiConfig, transport: &dyn ConnectionProbe) -> ProbeStatus {
        self.begin();
        let ok = match config.probe_request() {
            Some(request) => transport.probe(&request),
            None => false,
        };
        if !ok {
            log::debug!("AI connectivity probe failed for {:?}", config.provider);
        }
        self.finish(ok);
        self.status
    }

    pub fn reset(&mut self) {
        self.status = ProbeStatus::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedProbe(bool);

    impl ConnectionProbe for FixedProbe {
        fn probe(&self, _request: &ProbeRequest) -> bool {
            self.0
        }
    }

    #[test]
    fn test_default_config() {
        let config = AiConfig::default();
        assert_eq!(config.provider, AiProvider::Local);
        assert_eq!(config.base_url.as_deref(), Some(DEFAULT_LOCAL_BASE_URL));
        assert_eq!(config.model.as_deref(), Some(DEFAULT_LOCAL_MODEL));
    }

    #[test]
    fn test_patch_merges() {
        let mut config = AiConfig::default();
        config.apply(AiConfigPatch {
            provider: Some(AiProvider::OpenAi),
            api_key: Some(Some("sk-test".to_string())),
            ..Default::default()
        });
        assert_eq!(config.provider, AiProvider::OpenAi);
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model.as_deref(), Some(DEFAULT_LOCAL_MODEL));
    }

    #[test]
    fn test_local_probe_strips_trailing_slash() {
        let config = AiConfig {
            base_url: Some("http://gpu-box:11434/".to_string()),
            ..Default::default()
        };
        let request = config.probe_request().unwrap();
        assert_eq!(request.url, "http://gpu-box:11434/api/tags");
    }

    #[test]
    fn test_cloud_probe_requires_key() {
        let config = AiConfig {
            provider: AiProvider::Anthropic,
            api_key: None,
            ..Default::default()
        };
        assert!(config.probe_request().is_none());

        let mut tracker = ProbeTracker::new();
        assert_eq!(tracker.run(&config, &FixedProbe(true)), ProbeStatus::Error);
    }

    #[test]
    fn test_anthropic_headers() {
        let config = AiConfig {
            provider: AiProvider::Anthropic,
            api_key: Some("sk-ant-123".to_string()),
            ..Default::default()
        };
        let request = config.probe_request().unwrap();
        assert!(request
            .headers
            .contains(&("anthropic-version".to_string(), ANTHROPIC_API_VERSION.to_string())));
    }

    #[test]
    fn test_tracker_states() {
        let mut tracker = ProbeTracker::new();
        assert_eq!(tracker.status(), ProbeStatus::Idle);
        tracker.begin();
        assert_eq!(tracker.status(), ProbeStatus::Testing);
        assert_eq!(
            tracker.run(&AiConfig::default(), &FixedProbe(true)),
            ProbeStatus::Success
        );
        tracker.reset();
        assert_eq!(tracker.status(), ProbeStatus::Idle);
    }

    #[test]
    fn test_provider_wire_names() {
        assert_eq!(serde_json::to_string(&AiProvider::OpenAi).unwrap(), "\"openai\"");
        assert_eq!(serde_json::to_string(&AiProvider::Local).unwrap(), "\"local\"");
    }
}
