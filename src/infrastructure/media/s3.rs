use anyhow::{Context, anyhow};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::operation::create_bucket::CreateBucketError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::{Client, error::SdkError};

use super::{content_type_of, object_name};
use crate::application::ports::media_store::{MediaStore, StoredMedia};
use crate::bootstrap::config::Config;
use crate::domain::faculty_wear::ImageUpload;

const DEFAULT_REGION: &str = "us-east-1";

pub struct S3MediaStore {
    client: Client,
    bucket: String,
    public_base: String,
}

/// Base URL under which uploaded objects are publicly reachable.
pub fn public_base(cfg: &Config, bucket: &str) -> String {
    if let Some(base) = &cfg.s3_public_base_url {
        return base.clone();
    }
    if let Some(endpoint) = &cfg.s3_endpoint {
        return format!("{}/{}", endpoint.trim_end_matches('/'), bucket);
    }
    let region = cfg.s3_region.as_deref().unwrap_or(DEFAULT_REGION);
    format!("https://{bucket}.s3.{region}.amazonaws.com")
}

pub fn key_from_url<'a>(public_base: &str, url: &'a str) -> Option<&'a str> {
    let rest = url.strip_prefix(public_base)?.strip_prefix('/')?;
    let key = rest.split(['?', '#']).next()?;
    if key.is_empty() { None } else { Some(key) }
}

impl S3MediaStore {
    pub async fn new(cfg: &Config) -> anyhow::Result<Self> {
        let bucket = cfg
            .s3_bucket
            .clone()
            .context("S3 bucket must be configured when using S3 media backend")?;

        let mut loader = aws_config::defaults(BehaviorVersion::latest());

        if let Some(region) = &cfg.s3_region {
            loader = loader.region(Region::new(region.clone()));
        }

        let shared_config = loader.load().await;

        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);

        if let (Some(access), Some(secret)) = (&cfg.s3_access_key, &cfg.s3_secret_key) {
            let creds = Credentials::new(
                access.clone(),
                secret.clone(),
                None,
                None,
                "faculty-wear-s3-static",
            );
            builder = builder.credentials_provider(creds);
        }

        if let Some(endpoint) = &cfg.s3_endpoint {
            builder = builder.endpoint_url(endpoint.clone());
        }

        if cfg.s3_use_path_style {
            builder = builder.force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        ensure_bucket(&client, &bucket).await?;

        Ok(Self {
            public_base: public_base(cfg, &bucket),
            client,
            bucket,
        })
    }
}

#[async_trait]
impl MediaStore for S3MediaStore {
    async fn upload_image(
        &self,
        image: &ImageUpload,
        folder: &str,
    ) -> anyhow::Result<StoredMedia> {
        let folder = folder.trim_matches('/');
        let name = object_name(image);
        let key = if folder.is_empty() {
            name
        } else {
            format!("{folder}/{name}")
        };

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .content_type(content_type_of(image))
            .body(ByteStream::from(image.bytes.clone()))
            .send()
            .await
            .with_context(|| format!("failed to upload object {key}"))?;

        Ok(StoredMedia {
            url: format!("{}/{}", self.public_base, key),
            public_id: key,
            size: image.bytes.len() as i64,
        })
    }

    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool> {
        let Some(key) = key_from_url(&self.public_base, url) else {
            tracing::warn!(url = %url, bucket = %self.bucket, "media_url_outside_bucket");
            return Ok(false);
        };
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .with_context(|| format!("failed to delete object {key}"))?;
        Ok(true)
    }
}

async fn ensure_bucket(client: &Client, bucket: &str) -> anyhow::Result<()> {
    match client.head_bucket().bucket(bucket).send().await {
        Ok(_) => return Ok(()),
        Err(SdkError::ServiceError(service_err)) => {
            if !matches!(service_err.err(), HeadBucketError::NotFound(_)) {
                return Err(anyhow!(service_err.err().to_string()));
            }
        }
        Err(err) => return Err(anyhow!(err.to_string())),
    }

    match client.create_bucket().bucket(bucket).send().await {
        Ok(_) => Ok(()),
        Err(SdkError::ServiceError(service_err)) => match service_err.err() {
            CreateBucketError::BucketAlreadyOwnedByYou(_) => Ok(()),
            CreateBucketError::BucketAlreadyExists(_) => Ok(()),
            other => Err(anyhow!(other.to_string())),
        },
        Err(err) => Err(anyhow!(err.to_string())),
    }
}
