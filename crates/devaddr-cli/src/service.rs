//! Random DevAddr services
//!
//! [`RestDevAddrService`] asks the network server for an address (it knows
//! the NetID prefix and which addresses are in use). [`LocalDevAddrService`]
//! draws one locally, optionally under a configured prefix.

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use devaddr_core::DevAddr;
use devaddr_input::{DeviceIdentifier, RandomDevAddrService, ServiceError};
use serde::Deserialize;
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

use crate::config::{ApiConfig, GeneratorConfig};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RandomDevAddrRsp {
    dev_addr: String,
}

/// Network server REST API client
pub struct RestDevAddrService {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl RestDevAddrService {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, dev_eui: &DeviceIdentifier) -> String {
        format!("{}/api/devices/{}/get-random-dev-addr", self.base_url, dev_eui)
    }
}

#[async_trait]
impl RandomDevAddrService for RestDevAddrService {
    async fn get_random_dev_addr(&self, dev_eui: &DeviceIdentifier) -> Result<String, ServiceError> {
        let url = self.url(dev_eui);
        debug!(url = %url, "Requesting random DevAddr");

        let mut request = self.client.post(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ServiceError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            return Err(ServiceError::RequestFailed(format!(
                "HTTP {} from {}",
                response.status(),
                url
            )));
        }

        let rsp: RandomDevAddrRsp = response
            .json()
            .await
            .map_err(|e| ServiceError::InvalidResponse(e.to_string()))?;

        Ok(rsp.dev_addr)
    }
}

/// Address prefix written as `PPPPPPPP/N`: the top N bits of P are fixed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DevAddrPrefix {
    prefix: DevAddr,
    bits: u8,
}

impl DevAddrPrefix {
    pub fn mask(&self) -> u32 {
        match self.bits {
            0 => 0,
            n => u32::MAX << (32 - n as u32),
        }
    }

    /// Force the prefix bits onto `addr`
    pub fn apply(&self, addr: DevAddr) -> DevAddr {
        let mask = self.mask();
        let value = (self.prefix.to_u32() & mask) | (addr.to_u32() & !mask);
        DevAddr::from_be_bytes(value.to_be_bytes())
    }
}

impl FromStr for DevAddrPrefix {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (prefix, bits) = s
            .split_once('/')
            .with_context(|| format!("DevAddr prefix {:?} is not in PPPPPPPP/N form", s))?;

        let prefix: DevAddr = prefix.parse()?;
        let bits: u8 = bits
            .parse()
            .with_context(|| format!("Invalid prefix length in {:?}", s))?;
        if bits > 32 {
            bail!("Prefix length {} exceeds 32 bits", bits);
        }

        Ok(Self { prefix, bits })
    }
}

/// Draws random addresses without a network server
pub struct LocalDevAddrService {
    prefix: Option<DevAddrPrefix>,
}

impl LocalDevAddrService {
    pub fn new(config: &GeneratorConfig) -> Result<Self> {
        let prefix = config
            .dev_addr_prefix
            .as_deref()
            .map(DevAddrPrefix::from_str)
            .transpose()?;
        Ok(Self { prefix })
    }

    pub fn generate(&self) -> DevAddr {
        let addr = DevAddr::from_be_bytes(rand::random());
        match &self.prefix {
            Some(prefix) => prefix.apply(addr),
            None => addr,
        }
    }
}

#[async_trait]
impl RandomDevAddrService for LocalDevAddrService {
    async fn get_random_dev_addr(&self, dev_eui: &DeviceIdentifier) -> Result<String, ServiceError> {
        let addr = self.generate();
        debug!(dev_eui = %dev_eui, dev_addr = %addr, "Generated local DevAddr");
        Ok(hex::encode(addr.to_be_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefix() {
        let prefix: DevAddrPrefix = "26000000/7".parse().unwrap();
        assert_eq!(prefix.mask(), 0xfe00_0000);

        let zero: DevAddrPrefix = "00000000/0".parse().unwrap();
        assert_eq!(zero.mask(), 0);

        let full: DevAddrPrefix = "01020304/32".parse().unwrap();
        assert_eq!(full.mask(), u32::MAX);
    }

    #[test]
    fn test_parse_prefix_errors() {
        assert!("26000000".parse::<DevAddrPrefix>().is_err());
        assert!("260000/7".parse::<DevAddrPrefix>().is_err());
        assert!("26000000/33".parse::<DevAddrPrefix>().is_err());
        assert!("26000000/x".parse::<DevAddrPrefix>().is_err());
    }

    #[test]
    fn test_apply_prefix() {
        let prefix: DevAddrPrefix = "26000000/7".parse().unwrap();
        let addr = prefix.apply(DevAddr::from_be_bytes([0xff, 0xff, 0xff, 0xff]));
        assert_eq!(addr.to_string(), "27FFFFFF");

        let addr = prefix.apply(DevAddr::from_be_bytes([0x00, 0x12, 0x34, 0x56]));
        assert_eq!(addr.to_string(), "26123456");
    }

    #[tokio::test]
    async fn test_local_service_respects_prefix() {
        let service = LocalDevAddrService::new(&GeneratorConfig {
            dev_addr_prefix: Some("26000000/7".to_string()),
        })
        .unwrap();

        for _ in 0..32 {
            let addr = service
                .get_random_dev_addr(&DeviceIdentifier::new("0102030405060708"))
                .await
                .unwrap();
            assert_eq!(addr.len(), 8);
            let addr: DevAddr = addr.parse().unwrap();
            assert_eq!(addr.to_u32() & 0xfe00_0000, 0x2600_0000);
        }
    }

    #[test]
    fn test_rest_url() {
        let service = RestDevAddrService::new(&ApiConfig {
            url: "https://ns.example.com/".to_string(),
            token: None,
            timeout_secs: 5,
        })
        .unwrap();
        assert_eq!(
            service.url(&DeviceIdentifier::new("0102030405060708")),
            "https://ns.example.com/api/devices/0102030405060708/get-random-dev-addr"
        );
    }
}
