pub mod content_update;
pub mod error;
pub mod markdown_table;
pub mod models;
pub mod openapi;
pub mod outline_client;
pub mod routes;

use worker::{Context, Env, Request, Response, Result, event};

#[event(fetch)]
async fn fetch(req: Request, env: Env, ctx: Context) -> Result<Response> {
    routes::handle(req, env, ctx).await
}
