use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AdvisorConfig;

/// What the external recommendation service is told about the member.
#[derive(Debug, Clone, Serialize)]
pub struct AdviceRequest {
    pub gender: String,
    pub age: u32,
    pub height_cm: f64,
    pub weight_kg: f64,
    pub activity_level: String,
    pub meal_type: String,
    pub today_meals: String,
}

/// Optional second opinion on the next meal. Implementations may fail or be
/// slow; callers never depend on an answer.
#[async_trait]
pub trait MealAdvisor: Send + Sync {
    async fn advise(&self, req: &AdviceRequest) -> anyhow::Result<Option<String>>;
}

#[derive(Debug, Deserialize)]
struct AdviceResponse {
    #[serde(default)]
    comment: Option<String>,
}

pub struct HttpAdvisor {
    client: reqwest::Client,
    url: String,
}

impl HttpAdvisor {
    pub fn new(config: &AdvisorConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("build advisor http client")?;
        Ok(Self {
            client,
            url: config.url.clone(),
        })
    }
}

#[async_trait]
impl MealAdvisor for HttpAdvisor {
    async fn advise(&self, req: &AdviceRequest) -> anyhow::Result<Option<String>> {
        let resp: AdviceResponse = self
            .client
            .post(&self.url)
            .json(req)
            .send()
            .await
            .context("advisor request")?
            .error_for_status()
            .context("advisor status")?
            .json()
            .await
            .context("advisor response body")?;
        Ok(resp.comment.filter(|c| !c.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_without_comment_is_accepted() {
        let resp: AdviceResponse = serde_json::from_str(r#"{"total_kcal": 1800}"#).unwrap();
        assert!(resp.comment.is_none());
    }

    #[test]
    fn request_payload_shape() {
        let req = AdviceRequest {
            gender: "male".into(),
            age: 21,
            height_cm: 175.0,
            weight_kg: 70.0,
            activity_level: "light".into(),
            meal_type: "dinner".into(),
            today_meals: "Bibimbap".into(),
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["meal_type"], "dinner");
        assert_eq!(json["activity_level"], "light");
        assert_eq!(json["age"], 21);
    }
}
