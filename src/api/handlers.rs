use axum::{
    Json,
    extract::{FromRequest, Request, State, rejection::JsonRejection},
    http::StatusCode,
};
use futures::future;
use std::sync::Arc;

use crate::offer::FlightOffer;
use crate::search::SearchClient;

use super::models::{SearchRequest, SearchResponse};

/// `Json` with every rejection mapped to 422, so an empty or unparseable
/// body gets the same validation-error status as a schema violation
/// (axum's stock extractor answers 400 for syntax errors).
pub struct ApiJson<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(ApiJson(value)),
            Err(rejection) => Err((StatusCode::UNPROCESSABLE_ENTITY, rejection.body_text())),
        }
    }
}

pub async fn search_handler(
    State(client): State<Option<Arc<SearchClient>>>,
    ApiJson(request): ApiJson<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let Some(client) = client else {
        return Err((
            StatusCode::SERVICE_UNAVAILABLE,
            "Provider credentials not configured. Set PROVIDER_API_KEY and PROVIDER_API_SECRET."
                .to_string(),
        ));
    };

    // One task for the outbound leg, one per return date. Each task paces
    // its own provider calls internally.
    let outbound_task = tokio::spawn({
        let client = client.clone();
        let date = request.outbound_date;
        async move { client.search_outbound(date).await }
    });
    let return_tasks: Vec<_> = request
        .return_dates
        .iter()
        .map(|&date| {
            let client = client.clone();
            tokio::spawn(async move { client.search_return(date).await })
        })
        .collect();

    let outbound = unwrap_task(outbound_task.await)?;
    let mut returns = Vec::new();
    for joined in future::join_all(return_tasks).await {
        returns.extend(unwrap_task(joined)?);
    }

    Ok(Json(SearchResponse { outbound, returns }))
}

fn unwrap_task(
    joined: Result<anyhow::Result<Vec<FlightOffer>>, tokio::task::JoinError>,
) -> Result<Vec<FlightOffer>, (StatusCode, String)> {
    match joined {
        Ok(Ok(offers)) => Ok(offers),
        Ok(Err(e)) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search error: {e:#}"),
        )),
        Err(e) => Err((
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Search task failed: {e}"),
        )),
    }
}
