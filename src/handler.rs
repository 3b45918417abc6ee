// Venue delete flow: request, then navigate on success
use crate::client::VenueApi;
use crate::model::{DeleteError, DeleteOutcome};
use std::fmt::Display;
use tracing::{debug, info};

/// Listing page the browser is sent to after a successful delete.
pub const VENUES_PATH: &str = "/venues";

/// Performs a full page navigation in whatever environment hosts the caller.
pub trait Navigator: Send + Sync {
    fn navigate(&self, location: &str);
}

/// Navigator for the command line: there is no page, so the target is logged and printed.
pub struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, location: &str) {
        info!("Redirecting to {}", location);
        println!("{}", location);
    }
}

/// Deletes one venue and redirects to `redirect_to` when the server confirms.
///
/// A response without a truthy `deleted` field is not an error: nothing
/// happens and [`DeleteOutcome::NotDeleted`] is returned. Request and decode
/// failures are logged once and handed back to the caller; there is no retry.
pub async fn handle_delete_venue<A, N>(
    api: &A,
    navigator: &N,
    venue_id: impl Display,
    redirect_to: &str,
) -> Result<DeleteOutcome, DeleteError>
where
    A: VenueApi + ?Sized,
    N: Navigator + ?Sized,
{
    let venue_id = venue_id.to_string();

    let response = match api.delete_venue(&venue_id).await {
        Ok(response) => response,
        Err(e) => {
            debug!("Deleting venue {} failed: {}", venue_id, e);
            return Err(e);
        }
    };

    if !response.is_deleted() {
        info!("Venue {} was not deleted", venue_id);
        return Ok(DeleteOutcome::NotDeleted);
    }

    navigator.navigate(redirect_to);
    Ok(DeleteOutcome::Redirected {
        location: redirect_to.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::HttpVenueClient;
    use crate::model::DeleteResponse;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    #[derive(Default)]
    struct RecordingNavigator {
        visits: Mutex<Vec<String>>,
    }

    impl Navigator for RecordingNavigator {
        fn navigate(&self, location: &str) {
            self.visits.lock().unwrap().push(location.to_string());
        }
    }

    impl RecordingNavigator {
        fn visits(&self) -> Vec<String> {
            self.visits.lock().unwrap().clone()
        }
    }

    /// Records the level and target of every event.
    #[derive(Clone, Default)]
    struct EventLog {
        events: Arc<Mutex<Vec<(Level, String)>>>,
    }

    impl<S: Subscriber> Layer<S> for EventLog {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            let meta = event.metadata();
            self.events
                .lock()
                .unwrap()
                .push((*meta.level(), meta.target().to_string()));
        }
    }

    impl EventLog {
        fn from_target(&self, target: &str) -> Vec<Level> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .filter(|(_, t)| t == target)
                .map(|(level, _)| *level)
                .collect()
        }
    }

    /// Answers every call with the same body, counting calls and the ids seen.
    struct StubApi {
        body: serde_json::Value,
        calls: AtomicUsize,
        ids: Mutex<Vec<String>>,
    }

    impl StubApi {
        fn new(body: serde_json::Value) -> Self {
            Self {
                body,
                calls: AtomicUsize::new(0),
                ids: Mutex::default(),
            }
        }
    }

    #[async_trait::async_trait]
    impl VenueApi for StubApi {
        async fn delete_venue(&self, id: &str) -> Result<DeleteResponse, DeleteError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.ids.lock().unwrap().push(id.to_string());
            Ok(DeleteResponse::new(self.body.clone()))
        }
    }

    #[tokio::test]
    async fn deleted_redirects_to_venues() {
        let api = StubApi::new(json!({"deleted": true}));
        let nav = RecordingNavigator::default();

        let outcome = handle_delete_venue(&api, &nav, "42", VENUES_PATH).await.unwrap();

        assert_eq!(
            outcome,
            DeleteOutcome::Redirected {
                location: "/venues".into()
            }
        );
        assert_eq!(nav.visits(), vec!["/venues"]);
        assert_eq!(*api.ids.lock().unwrap(), vec!["42"]);
    }

    #[tokio::test]
    async fn not_deleted_stays_put() {
        for body in [json!({"deleted": false}), json!({}), json!({"deleted": null})] {
            let api = StubApi::new(body);
            let nav = RecordingNavigator::default();

            let outcome = handle_delete_venue(&api, &nav, "42", VENUES_PATH).await.unwrap();

            assert_eq!(outcome, DeleteOutcome::NotDeleted);
            assert!(nav.visits().is_empty());
        }
    }

    #[tokio::test]
    async fn numeric_id_is_used_verbatim() {
        let api = StubApi::new(json!({"deleted": true}));
        let nav = RecordingNavigator::default();

        handle_delete_venue(&api, &nav, 7u32, "/").await.unwrap();

        assert_eq!(*api.ids.lock().unwrap(), vec!["7"]);
        assert_eq!(nav.visits(), vec!["/"]);
    }

    #[tokio::test]
    async fn repeated_calls_are_not_deduplicated() {
        let api = StubApi::new(json!({"deleted": true}));
        let nav = RecordingNavigator::default();

        let (a, b) = tokio::join!(
            handle_delete_venue(&api, &nav, "42", VENUES_PATH),
            handle_delete_venue(&api, &nav, "42", VENUES_PATH),
        );
        a.unwrap();
        b.unwrap();

        assert_eq!(api.calls.load(Ordering::SeqCst), 2);
        assert_eq!(nav.visits().len(), 2);
    }

    #[tokio::test]
    async fn end_to_end_over_http() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("DELETE", "/venues/42"))
                .times(1)
                .respond_with(json_encoded(json!({"deleted": true}))),
        );

        let api = HttpVenueClient::new(format!("http://{}", server.addr())).unwrap();
        let nav = RecordingNavigator::default();

        let outcome = handle_delete_venue(&api, &nav, "42", VENUES_PATH).await.unwrap();
        assert!(matches!(outcome, DeleteOutcome::Redirected { .. }));
        assert_eq!(nav.visits(), vec!["/venues"]);
    }

    #[tokio::test]
    async fn network_failure_is_returned_once_without_redirect() {
        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let api = HttpVenueClient::new(format!("http://{}", addr)).unwrap();
        let nav = RecordingNavigator::default();

        let err = handle_delete_venue(&api, &nav, "42", VENUES_PATH)
            .await
            .unwrap_err();

        assert!(matches!(err, DeleteError::Request(_)));
        assert!(nav.visits().is_empty());
    }

    #[tokio::test]
    async fn decode_failure_does_not_redirect() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("DELETE", "/venues/1"))
                .respond_with(status_code(200).body("not json")),
        );

        let api = HttpVenueClient::new(format!("http://{}", server.addr())).unwrap();
        let nav = RecordingNavigator::default();

        let err = handle_delete_venue(&api, &nav, 1, VENUES_PATH).await.unwrap_err();
        assert!(matches!(err, DeleteError::Decode { .. }));
        assert!(nav.visits().is_empty());
    }

    #[tokio::test]
    async fn failure_is_logged_exactly_once() {
        let log = EventLog::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));

        let addr = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap();
        let api = HttpVenueClient::new(format!("http://{}", addr)).unwrap();
        let nav = RecordingNavigator::default();

        let result = handle_delete_venue(&api, &nav, "42", VENUES_PATH).await;

        assert!(result.is_err());
        assert_eq!(log.from_target("fyyur_client::handler"), vec![Level::DEBUG]);
        assert!(nav.visits().is_empty());
    }

    #[tokio::test]
    async fn not_deleted_is_logged_once() {
        let log = EventLog::default();
        let _guard = tracing::subscriber::set_default(tracing_subscriber::registry().with(log.clone()));

        let api = StubApi::new(json!({"deleted": false}));
        let nav = RecordingNavigator::default();

        handle_delete_venue(&api, &nav, "42", VENUES_PATH).await.unwrap();

        assert_eq!(log.from_target("fyyur_client::handler"), vec![Level::INFO]);
    }
}
