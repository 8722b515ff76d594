//! The privileged remote function.
//!
//! One function (`manage-posts` by default) multiplexes several actions
//! selected by an `action` field in the JSON body. It runs with elevated
//! rights, so moderation and uploads go through it.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::{transport_error, ApiContext};
use crate::error::{QuireResult, StoreError};
use crate::models::{Comment, Post, PostDraft};

/// Body fields every action may answer with.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FunctionResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub url: Option<String>,
}

impl FunctionResponse {
    fn error_message(&self) -> Option<String> {
        match self.error.as_ref()? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            Value::Object(map) => map
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .or_else(|| Some(Value::Object(map.clone()).to_string())),
            other => Some(other.to_string()),
        }
    }

    /// `data` decoded as `T`; a missing `data` decodes from `null`.
    pub fn data_as<T: serde::de::DeserializeOwned>(&self) -> QuireResult<T> {
        let data = self.data.clone().unwrap_or(Value::Null);
        Ok(serde_json::from_value(data)?)
    }
}

#[derive(Serialize)]
struct SavePost<'a> {
    action: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    #[serde(flatten)]
    post: &'a PostDraft,
}

/// Invokes actions on the configured remote function.
#[derive(Clone)]
pub struct FunctionsClient {
    ctx: ApiContext,
}

impl FunctionsClient {
    pub fn new(ctx: ApiContext) -> Self {
        Self { ctx }
    }

    /// POST `body` and decode the reply.
    ///
    /// An `error` field in the reply fails the call even on a 2xx status.
    pub async fn invoke<B: Serialize + ?Sized>(
        &self,
        action: &str,
        body: &B,
    ) -> QuireResult<FunctionResponse> {
        let url = self.ctx.config().function_url();
        let body = serde_json::to_string(body)?;
        tracing::debug!(action, "Invoking {}", url);

        let response = self
            .ctx
            .http()
            .post(&url, &body, &self.ctx.headers())
            .await
            .map_err(|e| transport_error(e, &url))?;

        let parsed: Option<FunctionResponse> = response.json().ok();
        if let Some(message) = parsed.as_ref().and_then(FunctionResponse::error_message) {
            tracing::warn!(action, status = response.status, "Function error: {}", message);
            return Err(StoreError::Function {
                action: action.to_string(),
                message,
            }
            .into());
        }

        if !response.is_success() {
            let err = StoreError::from_response(action, response.status, &response.text_lossy());
            tracing::warn!(action, status = response.status, "Function call failed: {}", err);
            return Err(err.into());
        }

        Ok(parsed.unwrap_or_default())
    }

    async fn invoke_action(&self, action: &str, mut fields: Value) -> QuireResult<FunctionResponse> {
        if let Value::Object(ref mut map) = fields {
            map.insert("action".to_string(), Value::String(action.to_string()));
        }
        self.invoke(action, &fields).await
    }

    /// Every post, through the function's elevated rights.
    pub async fn list_all(&self) -> QuireResult<Vec<Post>> {
        let response = self.invoke_action("list_all", json!({})).await?;
        Ok(response.data_as::<Option<Vec<Post>>>()?.unwrap_or_default())
    }

    /// Every comment with its post title.
    pub async fn list_all_comments(&self) -> QuireResult<Vec<Comment>> {
        let response = self.invoke_action("list_all_comments", json!({})).await?;
        Ok(response.data_as::<Option<Vec<Comment>>>()?.unwrap_or_default())
    }

    pub async fn approve_comment(&self, id: &str, is_approved: bool) -> QuireResult<()> {
        self.invoke_action("approve_comment", json!({ "id": id, "is_approved": is_approved }))
            .await?;
        tracing::info!(comment_id = id, is_approved, "Changed comment approval");
        Ok(())
    }

    pub async fn delete_comment(&self, id: &str) -> QuireResult<()> {
        self.invoke_action("delete_comment", json!({ "id": id }))
            .await?;
        tracing::info!(comment_id = id, "Deleted comment");
        Ok(())
    }

    /// Store a base64-encoded file and return its public URL.
    pub async fn upload_image(
        &self,
        file_data: &str,
        file_name: &str,
        content_type: &str,
    ) -> QuireResult<String> {
        let response = self
            .invoke_action(
                "upload_image",
                json!({
                    "fileData": file_data,
                    "fileName": file_name,
                    "contentType": content_type,
                }),
            )
            .await?;
        let url = response
            .url
            .or_else(|| {
                response
                    .data
                    .as_ref()
                    .and_then(|d| d.get("url"))
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .ok_or_else(|| StoreError::Decode {
                message: "upload_image reply has no url".to_string(),
            })?;
        tracing::info!(file_name, "Uploaded image");
        Ok(url)
    }

    /// Create a post through the function.
    pub async fn create(&self, post: &PostDraft) -> QuireResult<FunctionResponse> {
        let body = SavePost {
            action: "create",
            id: None,
            post,
        };
        self.invoke("create", &body).await
    }

    /// Replace a post's fields through the function.
    pub async fn update(&self, id: &str, post: &PostDraft) -> QuireResult<FunctionResponse> {
        let body = SavePost {
            action: "update",
            id: Some(id),
            post,
        };
        self.invoke("update", &body).await
    }
}
