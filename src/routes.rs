use serde::Serialize;
use serde_json::json;
use worker::{Context, Env, Request, Response, Result, RouteContext, Router};

use crate::content_update;
use crate::error::ApiError;
use crate::markdown_table::{self, SortSpec};
use crate::models::{
    CreatePageResponse, DocumentPayload, OperationRequest, PageRequest, ReadPageResponse,
    UpdatePageResponse, UpdateTablePageResponse,
};
use crate::openapi;
use crate::outline_client::OutlineClient;

#[derive(Debug, Clone)]
pub struct AppState {
    pub outline_base_url: String,
}

pub async fn handle(req: Request, env: Env, _ctx: Context) -> Result<Response> {
    let outline_base_url = env
        .var("OUTLINE_BASE_URL")
        .map(|value| value.to_string())
        .unwrap_or_else(|_| crate::models::DEFAULT_OUTLINE_BASE_URL.to_string());

    let state = AppState { outline_base_url };

    Router::with_data(state)
        .post_async("/api/pages", pages_route)
        .get("/health", health_route)
        .get("/openapi.json", openapi_route)
        .get("/", root_route)
        .run(req, env)
        .await
}

async fn pages_route(mut req: Request, ctx: RouteContext<AppState>) -> Result<Response> {
    match pages_response(&mut req, &ctx.data).await {
        Ok(payload) => json_response(&payload),
        Err(error) => error.into_response(),
    }
}

fn health_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    json_response(&json!({ "status": "healthy" }))
}

fn openapi_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    json_response(&openapi::document())
}

fn root_route(_req: Request, _ctx: RouteContext<AppState>) -> Result<Response> {
    json_response(&json!({
        "service": "Outline Pages Worker",
        "description": "Proxy for creating, reading, and updating Outline wiki pages, \
                        including markdown table row upserts",
        "endpoints": {
            "pages": "/api/pages (POST)",
            "health": "/health (GET)",
            "openapi": "/openapi.json (GET)"
        }
    }))
}

async fn pages_response(
    req: &mut Request,
    state: &AppState,
) -> Result<PageResponseEnvelope, ApiError> {
    let body = req.text().await?;
    if body.trim().is_empty() {
        return Err(ApiError::Validation("request body is required".to_string()));
    }

    let page_request: PageRequest = serde_json::from_str(&body)
        .map_err(|error| ApiError::Validation(format!("invalid request body: {error}")))?;
    page_request.validate()?;

    let client = OutlineClient::new(&page_request.api_key, &state.outline_base_url)?;

    match &page_request.operation {
        OperationRequest::Create {
            collection_id,
            title,
            content,
        } => {
            let document = client.create_document(collection_id, title, content).await?;
            Ok(PageResponseEnvelope::Create(CreatePageResponse {
                success: true,
                operation: "create".to_string(),
                document_id: document.id,
                url: document.url,
            }))
        }
        OperationRequest::Read { document_id } => {
            let document = client.get_document(document_id).await?;
            Ok(PageResponseEnvelope::Read(ReadPageResponse {
                success: true,
                operation: "read".to_string(),
                document: DocumentPayload {
                    id: document.id,
                    title: document.title,
                    content: document.text,
                    url: document.url,
                    updated_at: document.updated_at,
                },
            }))
        }
        OperationRequest::Update {
            document_id,
            content,
            kind,
        } => {
            let current = client.get_document(document_id).await?;
            let new_content = content_update::apply_update(&current.text, kind, content)?;
            let updated = client.update_document(document_id, &new_content).await?;
            Ok(PageResponseEnvelope::Update(UpdatePageResponse {
                success: true,
                operation: "update".to_string(),
                update_type: kind.name().to_string(),
                document_id: updated.id,
                url: updated.url,
            }))
        }
        OperationRequest::UpdateTable {
            document_id,
            table_data,
            sort_by,
            sort_order,
        } => {
            let current = client.get_document(document_id).await?;
            let sort = sort_by.as_deref().map(|column| SortSpec {
                column,
                order: *sort_order,
            });
            let new_content = markdown_table::upsert_row(&current.text, table_data, sort.as_ref())?;
            let updated = client.update_document(document_id, &new_content).await?;
            Ok(PageResponseEnvelope::UpdateTable(UpdateTablePageResponse {
                success: true,
                operation: "update_table".to_string(),
                document_id: updated.id,
                url: updated.url,
            }))
        }
    }
}

fn json_response<T>(payload: &T) -> Result<Response>
where
    T: Serialize,
{
    let mut response = Response::from_json(payload)?;
    response.headers_mut().set("Cache-Control", "no-store")?;
    Ok(response)
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
enum PageResponseEnvelope {
    Create(CreatePageResponse),
    Read(ReadPageResponse),
    Update(UpdatePageResponse),
    UpdateTable(UpdateTablePageResponse),
}
