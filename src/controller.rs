use std::io::{BufRead, Write as _};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::client::ActivitiesClient;
use crate::models::{Catalog, Status, StatusKind, WriteOutcome};

/// How long a status message stays on screen before auto-hiding.
pub const STATUS_HIDE_AFTER: Duration = Duration::from_secs(5);

const SIGNUP_FALLBACK: &str = "Failed to sign up. Please try again.";
const UNREGISTER_FALLBACK: &str = "Failed to unregister. Please try again.";
const GENERIC_REJECTION: &str = "An error occurred";

/// Asks the human before a destructive action. Kept behind a trait so the
/// CLI prompt, the web flow (confirmed in the browser) and tests can all
/// supply their own answer.
pub trait Confirmation: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Interactive yes/no prompt on the terminal.
pub struct TerminalConfirm;

impl Confirmation for TerminalConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        let _ = std::io::stdout().flush();
        let mut answer = String::new();
        if std::io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        let answer = answer.trim();
        answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    }
}

/// Used where confirmation already happened elsewhere (the dashboard's
/// delete affordance confirms in the browser) or was waived with `--yes`.
pub struct AlwaysConfirm;

impl Confirmation for AlwaysConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        true
    }
}

/// Everything the page would hold: the last catalog snapshot (`None` after a
/// failed load), the status message, and the pending hide timer for it.
pub struct ViewState {
    pub catalog: Option<Catalog>,
    pub status: Status,
    pending_hide: Option<JoinHandle<()>>,
}

/// The view controller: three operations against the activities API, a
/// wholesale catalog snapshot, and one transient status message.
pub struct Controller {
    client: ActivitiesClient,
    state: Arc<Mutex<ViewState>>,
    hide_after: Duration,
}

impl Controller {
    pub fn new(client: ActivitiesClient) -> Self {
        Self::with_hide_after(client, STATUS_HIDE_AFTER)
    }

    pub fn with_hide_after(client: ActivitiesClient, hide_after: Duration) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(ViewState {
                catalog: None,
                status: Status::default(),
                pending_hide: None,
            })),
            hide_after,
        }
    }

    pub fn catalog(&self) -> Option<Catalog> {
        self.state.lock().unwrap().catalog.clone()
    }

    pub fn status(&self) -> Status {
        self.state.lock().unwrap().status.clone()
    }

    /// Fetch the catalog and replace the snapshot wholesale. A failed fetch
    /// clears the snapshot (rendered as a failure notice) and is logged; it
    /// never touches the status message and is never retried here.
    pub async fn load_activities(&self) {
        match self.client.list().await {
            Ok(catalog) => {
                self.state.lock().unwrap().catalog = Some(catalog);
            }
            Err(e) => {
                error!("Error fetching activities: {e:#}");
                self.state.lock().unwrap().catalog = None;
            }
        }
    }

    /// Sign `email` up for `activity`. On acceptance the catalog is
    /// re-fetched so counts and rosters reflect the write; on rejection or
    /// transport failure it is left alone. Returns whether the server
    /// accepted (the caller only resets its form on `true`).
    pub async fn submit_signup(&self, activity: &str, email: &str) -> bool {
        match self.client.signup(activity, email).await {
            Ok(WriteOutcome::Accepted { message }) => {
                info!("Signed up {} for {}", email, activity);
                self.show_status(StatusKind::Success, message);
                self.load_activities().await;
                true
            }
            Ok(WriteOutcome::Rejected { detail }) => {
                self.show_status(
                    StatusKind::Error,
                    detail.unwrap_or_else(|| GENERIC_REJECTION.to_string()),
                );
                false
            }
            Err(e) => {
                error!("Error signing up: {e:#}");
                self.show_status(StatusKind::Error, SIGNUP_FALLBACK.to_string());
                false
            }
        }
    }

    /// Remove `email` from `activity` after an explicit confirmation.
    /// Declining is a silent no-op: no request, no status change, `None`.
    pub async fn unregister(
        &self,
        activity: &str,
        email: &str,
        confirm: &dyn Confirmation,
    ) -> Option<bool> {
        if !confirm.confirm(&format!("Unregister {email} from {activity}?")) {
            return None;
        }

        match self.client.unregister(activity, email).await {
            Ok(WriteOutcome::Accepted { message }) => {
                info!("Unregistered {} from {}", email, activity);
                self.show_status(StatusKind::Success, message);
                self.load_activities().await;
                Some(true)
            }
            Ok(WriteOutcome::Rejected { detail }) => {
                self.show_status(
                    StatusKind::Error,
                    detail.unwrap_or_else(|| GENERIC_REJECTION.to_string()),
                );
                Some(false)
            }
            Err(e) => {
                error!("Error unregistering: {e:#}");
                self.show_status(StatusKind::Error, UNREGISTER_FALLBACK.to_string());
                Some(false)
            }
        }
    }

    /// Show a message and arm the auto-hide timer. Any previously pending
    /// hide is aborted first so only the newest message decides visibility.
    fn show_status(&self, kind: StatusKind, text: String) {
        let mut state = self.state.lock().unwrap();
        if let Some(pending) = state.pending_hide.take() {
            pending.abort();
        }
        state.status = Status {
            text,
            kind,
            visible: true,
        };

        let shared = Arc::clone(&self.state);
        let hide_after = self.hide_after;
        state.pending_hide = Some(tokio::spawn(async move {
            tokio::time::sleep(hide_after).await;
            shared.lock().unwrap().status.visible = false;
        }));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Records whether it was consulted; answers with a fixed verdict.
    struct ScriptedConfirm {
        answer: bool,
        asked: AtomicUsize,
    }

    impl ScriptedConfirm {
        fn new(answer: bool) -> Self {
            Self {
                answer,
                asked: AtomicUsize::new(0),
            }
        }
    }

    impl Confirmation for ScriptedConfirm {
        fn confirm(&self, _prompt: &str) -> bool {
            self.asked.fetch_add(1, Ordering::SeqCst);
            self.answer
        }
    }

    fn controller_for(server: &MockServer) -> Controller {
        Controller::new(ActivitiesClient::new(&server.base_url()).unwrap())
    }

    const CHESS: &str = r#"{
        "Chess Club": {
            "description": "d",
            "schedule": "Mon",
            "max_participants": 10,
            "participants": ["a@x.com"]
        }
    }"#;

    #[tokio::test]
    async fn load_replaces_snapshot_and_clears_it_on_failure() {
        let server = MockServer::start_async().await;
        let mut list = server
            .mock_async(|when, then| {
                when.method(GET).path("/activities");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(CHESS);
            })
            .await;

        let controller = controller_for(&server);
        controller.load_activities().await;
        list.assert_async().await;

        let catalog = controller.catalog().unwrap();
        assert_eq!(catalog["Chess Club"].spots_left(), 9);

        list.delete_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/activities");
                then.status(500).body("boom");
            })
            .await;

        controller.load_activities().await;
        assert!(controller.catalog().is_none());
        // A failed load never touches the status message.
        assert!(!controller.status().visible);
    }

    #[tokio::test]
    async fn accepted_signup_shows_message_and_resyncs() {
        let server = MockServer::start_async().await;
        let signup = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path_includes("/signup")
                    .query_param("email", "b@x.com");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"message": "Signed up!"}"#);
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/activities");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(CHESS);
            })
            .await;

        let controller = controller_for(&server);
        assert!(controller.submit_signup("Chess Club", "b@x.com").await);

        signup.assert_async().await;
        list.assert_async().await;

        let status = controller.status();
        assert!(status.visible);
        assert_eq!(status.kind, StatusKind::Success);
        assert_eq!(status.text, "Signed up!");
        assert!(controller.catalog().is_some());
    }

    #[tokio::test]
    async fn rejected_signup_shows_detail_and_skips_resync() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path_includes("/signup");
                then.status(400)
                    .header("content-type", "application/json")
                    .body(r#"{"detail": "Already signed up"}"#);
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/activities");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{}");
            })
            .await;

        let controller = controller_for(&server);
        assert!(!controller.submit_signup("Chess Club", "a@x.com").await);

        let status = controller.status();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Already signed up");
        list.assert_hits_async(0).await;
        assert!(controller.catalog().is_none());
    }

    #[tokio::test]
    async fn transport_failure_falls_back_to_generic_message() {
        // Nothing listens here, so the request itself fails.
        let client = ActivitiesClient::new("http://127.0.0.1:1").unwrap();
        let controller = Controller::new(client);

        assert!(!controller.submit_signup("Chess Club", "a@x.com").await);
        let status = controller.status();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Failed to sign up. Please try again.");
    }

    #[tokio::test]
    async fn declined_confirmation_is_a_silent_no_op() {
        let server = MockServer::start_async().await;
        let unregister = server
            .mock_async(|when, then| {
                when.method(DELETE).path_includes("/unregister");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"message": "bye"}"#);
            })
            .await;

        let controller = controller_for(&server);
        let confirm = ScriptedConfirm::new(false);
        let outcome = controller.unregister("Chess Club", "a@x.com", &confirm).await;

        assert_eq!(outcome, None);
        assert_eq!(confirm.asked.load(Ordering::SeqCst), 1);
        unregister.assert_hits_async(0).await;
        assert!(!controller.status().visible);
    }

    #[tokio::test]
    async fn confirmed_unregister_runs_the_full_flow() {
        let server = MockServer::start_async().await;
        let unregister = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path_includes("/unregister")
                    .query_param("email", "a@x.com");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"message": "Unregistered a@x.com from Chess Club"}"#);
            })
            .await;
        let list = server
            .mock_async(|when, then| {
                when.method(GET).path("/activities");
                then.status(200)
                    .header("content-type", "application/json")
                    .body("{}");
            })
            .await;

        let controller = controller_for(&server);
        let outcome = controller
            .unregister("Chess Club", "a@x.com", &ScriptedConfirm::new(true))
            .await;

        assert_eq!(outcome, Some(true));
        unregister.assert_async().await;
        list.assert_async().await;
        assert_eq!(
            controller.status().text,
            "Unregistered a@x.com from Chess Club"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn status_hides_after_five_seconds_and_not_before() {
        let client = ActivitiesClient::new("http://127.0.0.1:1").unwrap();
        let controller = Controller::new(client);
        controller.show_status(StatusKind::Success, "Signed up!".to_string());

        tokio::time::sleep(Duration::from_millis(4_900)).await;
        assert!(controller.status().visible);

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!controller.status().visible);
    }

    #[tokio::test(start_paused = true)]
    async fn newer_message_outlives_the_older_timer() {
        let client = ActivitiesClient::new("http://127.0.0.1:1").unwrap();
        let controller = Controller::new(client);

        controller.show_status(StatusKind::Error, "first".to_string());
        tokio::time::sleep(Duration::from_secs(3)).await;
        controller.show_status(StatusKind::Success, "second".to_string());

        // The first message's timer would fire here; it must not hide the
        // second message.
        tokio::time::sleep(Duration::from_secs(3)).await;
        let status = controller.status();
        assert!(status.visible);
        assert_eq!(status.text, "second");

        tokio::time::sleep(Duration::from_millis(2_100)).await;
        assert!(!controller.status().visible);
    }
}
