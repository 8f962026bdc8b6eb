//! 请求签名
//!
//! 使用环境中的 AWS 凭证为每个出站请求生成 SigV4 签名头。

use async_trait::async_trait;
use aws_config::{BehaviorVersion, Region};
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sigv4::http_request::{
    PayloadChecksumKind, SignableBody, SignableRequest, SigningParams, SigningSettings, sign,
};
use aws_sigv4::sign::v4;
use aws_smithy_runtime_api::client::identity::Identity;
use std::sync::Arc;
use std::time::SystemTime;
use tracing::info;

use crate::config::SearchConfig;
use crate::error::{AppError, Result};

/// OpenSearch Serverless 的签名服务名
pub const SERVERLESS_SERVICE: &str = "aoss";

/// 待签名的出站请求
#[derive(Debug, Clone, Copy)]
pub struct OutboundRequest<'a> {
    pub method: &'a str,
    pub url: &'a str,
    pub headers: &'a [(String, String)],
    pub body: &'a [u8],
}

#[async_trait]
pub trait RequestSigner: Send + Sync {
    /// 返回需要附加到请求上的认证头
    async fn sign(&self, request: &OutboundRequest<'_>) -> Result<Vec<(String, String)>>;
}

/// 不签名，用于本地集群
#[derive(Debug, Clone, Default)]
pub struct UnsignedSigner;

#[async_trait]
impl RequestSigner for UnsignedSigner {
    async fn sign(&self, _request: &OutboundRequest<'_>) -> Result<Vec<(String, String)>> {
        Ok(Vec::new())
    }
}

/// AWS SigV4 签名器
///
/// 凭证来自默认凭证链（环境变量、配置文件、实例/容器角色），
/// 区域和服务名在进程启动时固定。
pub struct SigV4Signer {
    credentials: SharedCredentialsProvider,
    region: String,
    service: String,
}

impl std::fmt::Debug for SigV4Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigV4Signer")
            .field("credentials", &"SharedCredentialsProvider")
            .field("region", &self.region)
            .field("service", &self.service)
            .finish()
    }
}

impl SigV4Signer {
    pub fn new(credentials: SharedCredentialsProvider, region: &str, service: &str) -> Self {
        Self {
            credentials,
            region: region.to_string(),
            service: service.to_string(),
        }
    }

    /// 从默认凭证链构造
    pub async fn from_env(region: &str, service: &str) -> Result<Self> {
        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.to_string()))
            .load()
            .await;

        let credentials = sdk_config
            .credentials_provider()
            .ok_or_else(|| AppError::Signing("no AWS credentials provider available".into()))?;

        Ok(Self::new(credentials, region, service))
    }

    fn settings(&self) -> SigningSettings {
        let mut settings = SigningSettings::default();
        if self.service == SERVERLESS_SERVICE {
            settings.payload_checksum_kind = PayloadChecksumKind::XAmzSha256;
        }
        settings
    }
}

#[async_trait]
impl RequestSigner for SigV4Signer {
    async fn sign(&self, request: &OutboundRequest<'_>) -> Result<Vec<(String, String)>> {
        let credentials = self
            .credentials
            .provide_credentials()
            .await
            .map_err(|e| AppError::Signing(e.to_string()))?;
        let identity: Identity = credentials.into();

        let params: SigningParams<'_> = v4::SigningParams::builder()
            .identity(&identity)
            .region(&self.region)
            .name(&self.service)
            .time(SystemTime::now())
            .settings(self.settings())
            .build()
            .map_err(|e| AppError::Signing(e.to_string()))?
            .into();

        let signable = SignableRequest::new(
            request.method,
            request.url,
            request
                .headers
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str())),
            SignableBody::Bytes(request.body),
        )
        .map_err(|e| AppError::Signing(e.to_string()))?;

        let (instructions, _signature) = sign(signable, &params)
            .map_err(|e| AppError::Signing(e.to_string()))?
            .into_parts();

        Ok(instructions
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect())
    }
}

/// 按配置创建签名器
pub async fn create_request_signer(config: &SearchConfig) -> Result<Arc<dyn RequestSigner>> {
    if config.signing {
        let signer = SigV4Signer::from_env(&config.region, &config.service).await?;
        info!(
            "SigV4 signing enabled (region: {}, service: {})",
            config.region, config.service
        );
        Ok(Arc::new(signer))
    } else {
        info!("Request signing disabled");
        Ok(Arc::new(UnsignedSigner))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aws_credential_types::Credentials;

    fn signer(service: &str, token: Option<&str>) -> SigV4Signer {
        let credentials = Credentials::new(
            "AKIDEXAMPLE",
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            token.map(str::to_string),
            None,
            "test",
        );
        SigV4Signer::new(SharedCredentialsProvider::new(credentials), "us-east-1", service)
    }

    fn request<'a>(headers: &'a [(String, String)], body: &'a [u8]) -> OutboundRequest<'a> {
        OutboundRequest {
            method: "POST",
            url: "https://search.example.com/opensearch/_search",
            headers,
            body,
        }
    }

    fn header<'a>(headers: &'a [(String, String)], name: &str) -> Option<&'a str> {
        headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    #[tokio::test]
    async fn test_sigv4_headers() {
        let headers = vec![("content-type".to_string(), "application/json".to_string())];
        let signed = signer("es", None)
            .sign(&request(&headers, b"{}"))
            .await
            .unwrap();

        let authorization = header(&signed, "authorization").unwrap();
        assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/"));
        assert!(authorization.contains("/us-east-1/es/aws4_request"));
        assert!(authorization.contains("content-type"));
        assert!(header(&signed, "x-amz-date").is_some());
        assert!(header(&signed, "x-amz-security-token").is_none());
        assert!(header(&signed, "x-amz-content-sha256").is_none());
    }

    #[tokio::test]
    async fn test_session_token_is_forwarded() {
        let signed = signer("es", Some("session-token"))
            .sign(&request(&[], b"{}"))
            .await
            .unwrap();

        assert_eq!(header(&signed, "x-amz-security-token"), Some("session-token"));
    }

    #[tokio::test]
    async fn test_serverless_adds_payload_hash() {
        let signed = signer(SERVERLESS_SERVICE, None)
            .sign(&request(&[], b"{}"))
            .await
            .unwrap();

        assert!(header(&signed, "x-amz-content-sha256").is_some());
        assert!(header(&signed, "authorization").unwrap().contains("/aoss/aws4_request"));
    }

    #[tokio::test]
    async fn test_unsigned_signer_adds_nothing() {
        let signed = UnsignedSigner.sign(&request(&[], b"{}")).await.unwrap();
        assert!(signed.is_empty());
    }
}
