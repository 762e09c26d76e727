//! S3 client implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from ss3-core.

use std::path::Path;

use async_trait::async_trait;
use aws_smithy_types::retry::RetryConfig;
use jiff::Timestamp;
use tokio::io::AsyncWriteExt;

use ss3_core::{
    BackendConfig, Error, ListOptions, Listing, ObjectInfo, ObjectStore, Result, StoreFactory,
};

use crate::error::{Target, classify};

/// S3 client wrapper
pub struct S3Client {
    inner: aws_sdk_s3::Client,
    region: String,
}

impl S3Client {
    /// Create a new S3 client from a backend configuration
    ///
    /// Unset fields fall back to the SDK default chain (environment,
    /// shared config files). Fails with `MissingRegion` when no region
    /// can be resolved at all.
    pub async fn new(config: &BackendConfig) -> Result<Self> {
        config.validate()?;

        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .retry_config(RetryConfig::standard().with_max_attempts(config.max_attempts));

        if let Some(profile) = &config.profile {
            loader = loader.profile_name(profile);
        }
        if let Some(region) = &config.region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        if let Some(credentials) = &config.credentials {
            loader = loader.credentials_provider(aws_credential_types::Credentials::new(
                credentials.access_key.clone(),
                credentials.secret_key.clone(),
                None, // session token
                None, // expiry
                "ss3-static-credentials",
            ));
        }

        let sdk_config = loader.load().await;
        let region = sdk_config
            .region()
            .map(|r| r.to_string())
            .ok_or(Error::MissingRegion)?;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.force_path_style)
            .build();

        tracing::debug!(
            region = %region,
            profile = config.profile.as_deref().unwrap_or("<default>"),
            "Created S3 client"
        );

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
            region,
        })
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn list_objects(&self, bucket: &str, options: ListOptions) -> Result<Listing> {
        let mut listing = Listing::default();
        let mut continuation_token: Option<String> = None;

        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .prefix(&options.prefix);

            if let Some(delimiter) = &options.delimiter {
                request = request.delimiter(delimiter);
            }
            if let Some(max) = options.max_keys {
                request = request.max_keys(max);
            }
            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| classify(&e, Target::bucket(bucket)))?;

            listing.common_prefixes.extend(
                response
                    .common_prefixes()
                    .iter()
                    .filter_map(|p| p.prefix().map(str::to_string)),
            );

            for object in response.contents() {
                let mut info = ObjectInfo::new(
                    object.key().unwrap_or_default(),
                    object.size().unwrap_or(0),
                );
                info.last_modified = object.last_modified().and_then(to_timestamp);
                info.etag = object.e_tag().map(|e| e.trim_matches('"').to_string());
                listing.objects.push(info);
            }

            // A bounded request only ever wants the first page
            if options.max_keys.is_some() || !response.is_truncated().unwrap_or(false) {
                break;
            }
            continuation_token = response.next_continuation_token().map(str::to_string);
            if continuation_token.is_none() {
                break;
            }
        }

        Ok(listing)
    }

    async fn get_object(&self, bucket: &str, key: &str, destination: &Path) -> Result<u64> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| classify(&e, Target::object(bucket, key)))?;

        if let Some(parent) = destination.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut body = response.body;
        let mut file = tokio::fs::File::create(destination).await?;
        let copied: Result<u64> = async {
            let mut written = 0u64;
            while let Some(chunk) = body
                .try_next()
                .await
                .map_err(|e| Error::Network(e.to_string()))?
            {
                file.write_all(&chunk).await?;
                written += chunk.len() as u64;
            }
            file.flush().await?;
            Ok(written)
        }
        .await;

        if copied.is_err() {
            drop(file);
            if let Err(e) = tokio::fs::remove_file(destination).await {
                tracing::warn!(path = %destination.display(), error = %e, "Could not remove partial download");
            }
        }
        copied
    }

    fn region(&self) -> Option<String> {
        Some(self.region.clone())
    }
}

/// Builds `S3Client`s for the session
#[derive(Debug, Clone, Copy, Default)]
pub struct S3Factory;

#[async_trait]
impl StoreFactory for S3Factory {
    async fn connect(&self, config: &BackendConfig) -> Result<Box<dyn ObjectStore>> {
        let client = S3Client::new(config).await?;
        Ok(Box::new(client))
    }
}

fn to_timestamp(dt: &aws_smithy_types::DateTime) -> Option<Timestamp> {
    Timestamp::new(dt.secs(), dt.subsec_nanos() as i32).ok()
}
