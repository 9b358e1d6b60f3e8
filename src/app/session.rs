use std::sync::mpsc::{Receiver, TryRecvError};

use tracing::{info, warn};

use crate::hierarchy::OrgTree;
use crate::notion::Credential;
use crate::store::KeyValueStore;
use crate::util::extract_notion_id;

use super::load::{LoadError, LoadRequest, LoadResult};

const CREDENTIAL_KEY: &str = "notionKey";
const CIRCLES_DB_KEY: &str = "circlesDatabaseId";
const ROLES_DB_KEY: &str = "rolesDatabaseId";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPanel {
    Expanded,
    Minimized,
}

pub enum FetchStatus {
    Idle,
    Loading { rx: Receiver<LoadResult> },
    Failed(String),
}

pub struct SessionForm {
    pub credential: String,
    pub circles_db: String,
    pub roles_db: String,
    pub panel: FormPanel,
    status: FetchStatus,
}

impl SessionForm {
    pub fn restore(store: &dyn KeyValueStore) -> Self {
        Self {
            credential: store.get(CREDENTIAL_KEY).unwrap_or_default(),
            circles_db: store.get(CIRCLES_DB_KEY).unwrap_or_default(),
            roles_db: store.get(ROLES_DB_KEY).unwrap_or_default(),
            panel: FormPanel::Expanded,
            status: FetchStatus::Idle,
        }
    }

    pub fn submit(
        &mut self,
        store: &mut dyn KeyValueStore,
        fallback_credential: Option<&str>,
    ) -> Result<LoadRequest, LoadError> {
        if self.is_loading() {
            return Err(LoadError::Validation(
                "a load is already in progress".to_owned(),
            ));
        }

        let result = self.prepare(store, fallback_credential);
        if let Err(error) = &result {
            self.status = FetchStatus::Failed(error.to_string());
        }
        result
    }

    fn prepare(
        &mut self,
        store: &mut dyn KeyValueStore,
        fallback_credential: Option<&str>,
    ) -> Result<LoadRequest, LoadError> {
        self.circles_db = extract_notion_id(&self.circles_db);
        self.roles_db = extract_notion_id(&self.roles_db);
        if self.circles_db.is_empty() || self.roles_db.is_empty() {
            return Err(LoadError::Validation(
                "both the circles and the roles database ids are required".to_owned(),
            ));
        }

        for (key, value) in [
            (CREDENTIAL_KEY, self.credential.as_str()),
            (CIRCLES_DB_KEY, self.circles_db.as_str()),
            (ROLES_DB_KEY, self.roles_db.as_str()),
        ] {
            if let Err(error) = store.set(key, value) {
                warn!(key, error = %format!("{error:#}"), "failed to save session field");
            }
        }

        let credential = Credential::resolve(&self.credential, fallback_credential)?;
        Ok(LoadRequest {
            credential,
            circles_db: self.circles_db.clone(),
            roles_db: self.roles_db.clone(),
        })
    }

    pub fn begin_loading(&mut self, rx: Receiver<LoadResult>) {
        self.status = FetchStatus::Loading { rx };
    }

    pub fn poll(&mut self) -> Option<OrgTree> {
        let FetchStatus::Loading { rx } = &self.status else {
            return None;
        };

        match rx.try_recv() {
            Ok(Ok(tree)) => {
                info!(circles = tree.circles.len(), "collapsing form after load");
                self.status = FetchStatus::Idle;
                self.panel = FormPanel::Minimized;
                Some(tree)
            }
            Ok(Err(error)) => {
                self.status = FetchStatus::Failed(error.to_string());
                None
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.status = FetchStatus::Failed(LoadError::Disconnected.to_string());
                None
            }
        }
    }

    pub fn toggle_panel(&mut self) {
        self.panel = match self.panel {
            FormPanel::Expanded => FormPanel::Minimized,
            FormPanel::Minimized => FormPanel::Expanded,
        };
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Failed(message) => Some(message.as_str()),
            FetchStatus::Idle | FetchStatus::Loading { .. } => None,
        }
    }

    pub fn uses_fallback_key(&self, fallback_credential: Option<&str>) -> bool {
        self.credential.trim().is_empty()
            && fallback_credential.is_some_and(|key| !key.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::hierarchy::{ROOT_LABEL, build_tree};
    use crate::notion::GatewayError;
    use crate::store::MemoryStore;

    fn filled_form() -> SessionForm {
        SessionForm {
            credential: String::new(),
            circles_db: " circles ".to_owned(),
            roles_db: "roles".to_owned(),
            panel: FormPanel::Expanded,
            status: FetchStatus::Idle,
        }
    }

    #[test]
    fn restores_saved_fields() {
        let mut store = MemoryStore::default();
        store.set("notionKey", "secret").expect("set");
        store.set("rolesDatabaseId", "roles").expect("set");

        let form = SessionForm::restore(&store);
        assert_eq!(form.credential, "secret");
        assert_eq!(form.circles_db, "");
        assert_eq!(form.roles_db, "roles");
        assert_eq!(form.panel, FormPanel::Expanded);
        assert!(!form.is_loading());
    }

    #[test]
    fn missing_dataset_ids_fail_validation() {
        let mut store = MemoryStore::default();
        let mut form = SessionForm {
            roles_db: "  ".to_owned(),
            ..filled_form()
        };

        let error = form.submit(&mut store, Some("env-key")).unwrap_err();
        assert!(matches!(error, LoadError::Validation(_)));
        assert_eq!(
            form.error(),
            Some("both the circles and the roles database ids are required")
        );
        assert_eq!(store.get("circlesDatabaseId"), None);
    }

    #[test]
    fn missing_credential_is_reported_after_persisting() {
        let mut store = MemoryStore::default();
        let mut form = filled_form();

        let error = form.submit(&mut store, None).unwrap_err();
        assert_eq!(error, LoadError::Gateway(GatewayError::MissingCredential));
        assert_eq!(form.error(), Some("a Notion API key is required"));
        assert!(!form.is_loading());
        assert_eq!(store.get("circlesDatabaseId").as_deref(), Some("circles"));
    }

    #[test]
    fn fallback_key_builds_a_request() {
        let mut store = MemoryStore::default();
        let mut form = filled_form();
        assert!(form.uses_fallback_key(Some("env-key")));
        assert!(!form.uses_fallback_key(None));

        let request = form.submit(&mut store, Some("env-key")).expect("request");
        assert_eq!(request.circles_db, "circles");
        assert_eq!(request.roles_db, "roles");
        assert_eq!(store.get("notionKey").as_deref(), Some(""));
    }

    #[test]
    fn successful_load_collapses_the_form() {
        let (tx, rx) = mpsc::channel();
        let mut form = filled_form();
        form.begin_loading(rx);
        assert!(form.is_loading());
        assert!(form.poll().is_none());

        tx.send(Ok(build_tree(&[], &[]))).expect("send");
        let tree = form.poll().expect("tree delivered");
        assert_eq!(tree.label, ROOT_LABEL);
        assert_eq!(form.panel, FormPanel::Minimized);
        assert!(!form.is_loading());
        assert_eq!(form.error(), None);
    }

    #[test]
    fn failed_load_sets_the_error_and_clears_loading() {
        let (tx, rx) = mpsc::channel();
        let mut form = filled_form();
        form.begin_loading(rx);

        tx.send(Err(LoadError::Gateway(GatewayError::Upstream { status: 404 })))
            .expect("send");
        assert!(form.poll().is_none());
        assert!(!form.is_loading());
        assert_eq!(form.error(), Some("Notion API error: status 404"));
        assert_eq!(form.panel, FormPanel::Expanded);
    }

    #[test]
    fn dropped_worker_is_an_error() {
        let (tx, rx) = mpsc::channel::<LoadResult>();
        let mut form = filled_form();
        form.begin_loading(rx);
        drop(tx);

        assert!(form.poll().is_none());
        assert_eq!(form.error(), Some("background load worker disconnected"));
    }

    #[test]
    fn submit_is_refused_while_loading() {
        let (_tx, rx) = mpsc::channel();
        let mut store = MemoryStore::default();
        let mut form = filled_form();
        form.begin_loading(rx);

        assert!(form.submit(&mut store, Some("env-key")).is_err());
        assert!(form.is_loading());
    }

    #[test]
    fn toggle_flips_the_panel() {
        let mut form = filled_form();
        form.toggle_panel();
        assert_eq!(form.panel, FormPanel::Minimized);
        form.toggle_panel();
        assert_eq!(form.panel, FormPanel::Expanded);
    }
}
