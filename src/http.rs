//! HTTP transport - exposes the list service over axum.
//!
//! Requires the `http` feature.
//!
//! ## Routes
//!
//! - `GET /getAll` - every entity of the routed type as a JSON array.
//!   Store failures map to `500 { "error": "..." }`.
//!
//! Each request gets its own [`UnitOfWork`] from the `connect` factory and
//! disposes it before responding.
//!
//! ## Example
//!
//! ```ignore
//! use unit_of_work::{http, InMemoryDatabase, UnitOfWork};
//!
//! let db = InMemoryDatabase::new();
//! let app = http::router::<_, TestRow, _>(move || Ok(UnitOfWork::new(db.connect())));
//! http::serve(app, "0.0.0.0:3000").await?;
//! ```

use std::marker::PhantomData;
use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use serde_json::json;
use tokio_util::sync::CancellationToken;

use crate::entity::Entity;
use crate::error::RepositoryResult;
use crate::service::{EntityRepository, ListService};
use crate::store::PersistentStore;
use crate::unit_of_work::UnitOfWork;

type Connect<S> = dyn Fn() -> RepositoryResult<UnitOfWork<S>> + Send + Sync;

struct ListState<S, T> {
    connect: Arc<Connect<S>>,
    _marker: PhantomData<fn() -> T>,
}

impl<S, T> Clone for ListState<S, T> {
    fn clone(&self) -> Self {
        Self {
            connect: Arc::clone(&self.connect),
            _marker: PhantomData,
        }
    }
}

/// Build an axum `Router` listing `T` through a fresh unit of work per request.
pub fn router<S, T, F>(connect: F) -> Router
where
    S: PersistentStore + 'static,
    T: Entity,
    F: Fn() -> RepositoryResult<UnitOfWork<S>> + Send + Sync + 'static,
{
    let state = ListState::<S, T> {
        connect: Arc::new(connect),
        _marker: PhantomData,
    };
    Router::new()
        .route("/getAll", get(get_all_handler::<S, T>))
        .with_state(state)
}

/// Serve the router over HTTP at the given address (e.g. `"0.0.0.0:3000"`).
pub async fn serve(app: Router, addr: &str) -> Result<(), std::io::Error> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

/// `GET /getAll`
async fn get_all_handler<S, T>(State(state): State<ListState<S, T>>) -> Response
where
    S: PersistentStore + 'static,
    T: Entity,
{
    // Dropped with the request future, which cancels in-flight store calls.
    let cancel = CancellationToken::new();
    let _guard = cancel.clone().drop_guard();

    match list_all::<S, T>(&state, &cancel).await {
        Ok(items) => (StatusCode::OK, Json(items)).into_response(),
        Err(e) => {
            let body = json!({ "error": e.to_string() });
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}

async fn list_all<S, T>(
    state: &ListState<S, T>,
    cancel: &CancellationToken,
) -> RepositoryResult<Vec<T>>
where
    S: PersistentStore + 'static,
    T: Entity,
{
    let unit_of_work = Arc::new((state.connect)()?);
    let service = ListService::new(Some(EntityRepository::new(Some(Arc::clone(
        &unit_of_work,
    )))?))?;
    let items = service.list_all::<T>(cancel).await;
    drop(service);

    match Arc::try_unwrap(unit_of_work) {
        Ok(unit_of_work) => unit_of_work.dispose_async(cancel).await?,
        Err(_) => debug!("unit of work still shared after {} listing", T::COLLECTION),
    }
    items
}

