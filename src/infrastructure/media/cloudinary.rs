use anyhow::{Context, anyhow};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use sha1::Sha1;
use sha2::{Digest, Sha256};

use super::content_type_of;
use crate::application::ports::media_store::{MediaStore, StoredMedia};
use crate::bootstrap::config::{Config, SignatureAlgorithm};
use crate::domain::faculty_wear::ImageUpload;

/// Incoming transformation applied at upload: fit within 800px width,
/// automatic quality.
pub const UPLOAD_TRANSFORMATION: &str = "c_limit,q_auto:good,w_800";

const UNSIGNED_PARAMS: [&str; 5] = ["file", "api_key", "resource_type", "cloud_name", "signature"];

pub struct CloudinaryMediaStore {
    client: reqwest::Client,
    api_base: String,
    cloud_name: String,
    api_key: String,
    api_secret: String,
    algorithm: SignatureAlgorithm,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
    public_id: String,
    #[serde(default)]
    bytes: i64,
}

#[derive(Debug, Deserialize)]
struct DestroyResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorMessage,
}

#[derive(Debug, Deserialize)]
struct ErrorMessage {
    message: String,
}

/// Signs request parameters the way the Cloudinary API expects: sorted
/// `key=value` pairs joined by `&`, followed by the API secret, hex digest.
pub fn sign_params(params: &[(&str, String)], api_secret: &str, algorithm: &SignatureAlgorithm) -> String {
    let mut signed: Vec<&(&str, String)> = params
        .iter()
        .filter(|(k, v)| !UNSIGNED_PARAMS.contains(k) && !v.is_empty())
        .collect();
    signed.sort_by(|a, b| a.0.cmp(b.0));
    let to_sign = signed
        .iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&");
    let payload = format!("{to_sign}{api_secret}");
    let digest: Vec<u8> = match algorithm {
        SignatureAlgorithm::Sha1 => Sha1::digest(payload.as_bytes()).to_vec(),
        SignatureAlgorithm::Sha256 => Sha256::digest(payload.as_bytes()).to_vec(),
    };
    digest.iter().map(|b| format!("{b:02x}")).collect::<String>()
}

fn is_version_segment(segment: &str) -> bool {
    segment.len() > 1
        && segment.starts_with('v')
        && segment[1..].chars().all(|c| c.is_ascii_digit())
}

/// `c_limit,w_800` style segment: comma-separated `key_value` pairs with a
/// short lowercase key.
fn is_transformation_segment(segment: &str) -> bool {
    segment.split(',').all(|component| match component.split_once('_') {
        Some((key, value)) => {
            (1..=3).contains(&key.len())
                && key.chars().all(|c| c.is_ascii_lowercase())
                && !value.is_empty()
        }
        None => false,
    })
}

/// Extracts the public id (folder path plus name, no extension) from a
/// delivery URL such as
/// `https://res.cloudinary.com/demo/image/upload/v1700000000/faculty_wears/abc.jpg`.
pub fn public_id_from_url(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let (_, rest) = path.split_once("/upload/")?;
    let segments: Vec<&str> = rest.split('/').filter(|s| !s.is_empty()).collect();
    // Anything before the version segment is a delivery transformation.
    let segments = match segments.iter().position(|s| is_version_segment(s)) {
        Some(idx) => &segments[idx + 1..],
        None => {
            let leading = segments
                .iter()
                .take(segments.len().saturating_sub(1))
                .take_while(|s| is_transformation_segment(s))
                .count();
            &segments[leading..]
        }
    };
    let (last, dirs) = segments.split_last()?;
    let name = match last.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => last,
    };
    let mut parts: Vec<&str> = dirs.to_vec();
    parts.push(name);
    Some(parts.join("/"))
}

impl CloudinaryMediaStore {
    pub fn from_config(cfg: &Config) -> anyhow::Result<Self> {
        let cloud_name = cfg
            .cloudinary_cloud_name
            .clone()
            .context("CLOUDINARY_CLOUD_NAME must be configured")?;
        let api_key = cfg
            .cloudinary_api_key
            .clone()
            .context("CLOUDINARY_API_KEY must be configured")?;
        let api_secret = cfg
            .cloudinary_api_secret
            .clone()
            .context("CLOUDINARY_API_SECRET must be configured")?;
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()?;
        Ok(Self {
            client,
            api_base: cfg.cloudinary_api_base.clone(),
            cloud_name,
            api_key,
            api_secret,
            algorithm: cfg.cloudinary_signature_algorithm.clone(),
        })
    }

    fn endpoint(&self, resource_type: &str, action: &str) -> String {
        format!(
            "{}/{}/{}/{}",
            self.api_base, self.cloud_name, resource_type, action
        )
    }

    /// Adds `timestamp`, `api_key` and `signature` to the given parameters.
    fn signed(&self, mut params: Vec<(&'static str, String)>) -> Vec<(&'static str, String)> {
        params.push(("timestamp", chrono::Utc::now().timestamp().to_string()));
        let signature = sign_params(&params, &self.api_secret, &self.algorithm);
        params.push(("api_key", self.api_key.clone()));
        params.push(("signature", signature));
        params
    }

    async fn error_message(resp: reqwest::Response) -> String {
        let status = resp.status();
        match resp.json::<ErrorBody>().await {
            Ok(body) => format!("{status}: {}", body.error.message),
            Err(_) => status.to_string(),
        }
    }
}

#[async_trait]
impl MediaStore for CloudinaryMediaStore {
    async fn upload_image(
        &self,
        image: &ImageUpload,
        folder: &str,
    ) -> anyhow::Result<StoredMedia> {
        let params = self.signed(vec![
            ("folder", folder.to_string()),
            ("transformation", UPLOAD_TRANSFORMATION.to_string()),
        ]);
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.filename.clone())
            .mime_str(&content_type_of(image))?;
        let form = params
            .into_iter()
            .fold(Form::new(), |form, (k, v)| form.text(k, v))
            .part("file", part);

        let resp = self
            .client
            .post(self.endpoint("auto", "upload"))
            .multipart(form)
            .send()
            .await
            .context("cloudinary upload request failed")?;
        if !resp.status().is_success() {
            return Err(anyhow!(
                "cloudinary upload rejected: {}",
                Self::error_message(resp).await
            ));
        }
        let body: UploadResponse = resp
            .json()
            .await
            .context("invalid cloudinary upload response")?;
        Ok(StoredMedia {
            url: body.secure_url,
            public_id: body.public_id,
            size: body.bytes,
        })
    }

    async fn delete_by_url(&self, url: &str) -> anyhow::Result<bool> {
        let public_id = public_id_from_url(url)
            .with_context(|| format!("not a cloudinary delivery url: {url}"))?;
        let params = self.signed(vec![("public_id", public_id.clone())]);
        let resp = self
            .client
            .post(self.endpoint("image", "destroy"))
            .form(&params)
            .send()
            .await
            .context("cloudinary destroy request failed")?;
        if !resp.status().is_success() {
            return Err(anyhow!(
                "cloudinary destroy rejected: {}",
                Self::error_message(resp).await
            ));
        }
        let body: DestroyResponse = resp
            .json()
            .await
            .context("invalid cloudinary destroy response")?;
        tracing::debug!(public_id = %public_id, result = %body.result, "cloudinary_destroy");
        Ok(body.result == "ok")
    }
}
