use axum::{
    extract::{Path, State},
    response::sse::{Event, KeepAlive, Sse},
};
use futures::Stream;
use std::convert::Infallible;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use uuid::Uuid;

use crate::{AppResult, AppState};

/// GET /api/shifts/{id}/events — subscribe to a shift's change stream.
///
/// Events for one shift arrive in commit order. A subscriber that lags past
/// the channel capacity receives a `resync` event carrying a fresh snapshot
/// instead of the missed entries; applying snapshots is idempotent, so
/// replays and resyncs converge to the same view.
#[utoipa::path(
    get,
    path = "/api/shifts/{id}/events",
    params(("id" = Uuid, Path, description = "Shift id")),
    responses(
        (status = 200, description = "SSE stream of staffing events", content_type = "text/event-stream"),
        (status = 404, description = "Shift not found")
    ),
    tag = "shifts"
)]
pub async fn shift_events(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    // Reject subscriptions to unknown shifts up front.
    state.engine.get_shift(id).await?;

    let rx = state.engine.bus().subscribe(id);
    let engine = state.engine.clone();

    let stream = futures::stream::unfold((rx, engine), move |(mut rx, engine)| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let Ok(sse) = Event::default().event("staffing").json_data(&event) else {
                        continue;
                    };
                    return Some((Ok(sse), (rx, engine)));
                }
                Err(RecvError::Lagged(missed)) => {
                    tracing::debug!(shift_id = %id, missed, "subscriber lagged, resyncing from snapshot");
                    match engine.get_staffing(id).await {
                        Ok(snapshot) => {
                            let Ok(sse) = Event::default().event("resync").json_data(&snapshot)
                            else {
                                continue;
                            };
                            return Some((Ok(sse), (rx, engine)));
                        }
                        Err(_) => continue,
                    }
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
