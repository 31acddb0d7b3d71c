use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use post_optimizer::config::OptimizerConfig;
use post_optimizer::{OptimizationResult, OptimizeError, OptimizeOptions, OptimizedItem, PostCandidate};

#[derive(Debug, Default, Deserialize)]
pub struct ApiPostCandidate {
    pub post: Option<String>,
    pub score: Option<Value>,
}

impl ApiPostCandidate {
    /// Anything other than a JSON number becomes a non-finite prior, which
    /// the optimizer reports as a warning on the item.
    pub fn into_candidate(self) -> PostCandidate {
        let score = match self.score {
            None | Some(Value::Null) => None,
            Some(Value::Number(number)) => Some(number.as_f64().unwrap_or(f64::NAN)),
            Some(_) => Some(f64::NAN),
        };
        PostCandidate {
            post: self.post.unwrap_or_default(),
            score,
        }
    }
}

/// Accepts either `[{post, score}, ...]` or `{"posts": [...]}`.
pub fn candidates_from_json(value: Value) -> Result<Vec<PostCandidate>, OptimizeError> {
    let posts = match value {
        Value::Object(mut map) => map.remove("posts").unwrap_or(Value::Null),
        other => other,
    };
    match posts {
        Value::Array(entries) if !entries.is_empty() => Ok(entries
            .into_iter()
            .map(|entry| {
                serde_json::from_value::<ApiPostCandidate>(entry)
                    .unwrap_or_default()
                    .into_candidate()
            })
            .collect()),
        _ => Err(OptimizeError::Validation(
            "posts array is required in body".to_string(),
        )),
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiOptimizeRequest {
    pub posts: Option<Value>,
    pub platform: Option<String>,
    pub tone: Option<String>,
    pub target_audience: Option<String>,
    pub length: Option<String>,
    pub product_name: Option<String>,
    pub content_type: Option<String>,
    pub keywords: Option<String>,
}

impl ApiOptimizeRequest {
    pub fn into_parts(
        self,
        config: &OptimizerConfig,
    ) -> Result<(Vec<PostCandidate>, OptimizeOptions, RowContext), OptimizeError> {
        let posts = candidates_from_json(json!({ "posts": self.posts.unwrap_or(Value::Null) }))?;
        let options = config.options_with(self.platform, self.tone, self.target_audience, self.length);
        let context = RowContext {
            product_name: self.product_name.unwrap_or_default(),
            content_type: self.content_type.unwrap_or_default(),
            tone: options.tone.clone(),
            keywords: self.keywords.unwrap_or_default(),
        };
        Ok((posts, options, context))
    }
}

#[derive(Debug, Clone, Default)]
pub struct RowContext {
    pub product_name: String,
    pub content_type: String,
    pub tone: String,
    pub keywords: String,
}

/// One content-metrics row per optimized post.
#[derive(Debug, Clone, Serialize)]
pub struct ContentMetricsRow {
    pub product_name: String,
    pub content_type: String,
    pub tone: String,
    pub keywords: String,
    pub original_content: String,
    pub optimized_content: String,
    pub original_score: Option<f64>,
    pub optimized_score: f64,
    pub notes: String,
}

impl ContentMetricsRow {
    pub fn from_item(context: &RowContext, item: &OptimizedItem) -> Self {
        let notes = if item.reasons.is_empty() {
            item.adjustments.join("; ")
        } else {
            item.reasons.join("; ")
        };
        Self {
            product_name: context.product_name.clone(),
            content_type: context.content_type.clone(),
            tone: context.tone.clone(),
            keywords: context.keywords.clone(),
            original_content: item.original_post.clone(),
            optimized_content: item.optimized_post.clone(),
            original_score: item.original_score,
            optimized_score: item.optimized_score,
            notes,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ApiOptimizeData {
    pub optimized: OptimizationResult,
    pub rows: Vec<ContentMetricsRow>,
}

#[derive(Debug, Serialize)]
pub struct ApiOptimizeResponse {
    pub success: bool,
    pub data: ApiOptimizeData,
}

impl ApiOptimizeResponse {
    pub fn from_result(optimized: OptimizationResult, context: &RowContext) -> Self {
        let rows = optimized
            .items
            .iter()
            .map(|item| ContentMetricsRow::from_item(context, item))
            .collect();
        Self {
            success: true,
            data: ApiOptimizeData { optimized, rows },
        }
    }
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.message,
        });
        (self.status, Json(body)).into_response()
    }
}

impl From<OptimizeError> for ApiError {
    fn from(err: OptimizeError) -> Self {
        let status = if err.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        let message = match err {
            OptimizeError::Validation(message) => message,
            other => other.to_string(),
        };
        Self { status, message }
    }
}

/// Malformed or mistyped bodies keep axum's status but get the JSON error shape.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
