use std::sync::Arc;
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Instant;

use thiserror::Error;
use tracing::{error, info};

use crate::hierarchy::{HierarchyError, OrgTree, build_tree_from_values};
use crate::notion::{Credential, GatewayError, NotionGateway};

#[derive(Clone, Debug)]
pub struct LoadRequest {
    pub credential: Credential,
    pub circles_db: String,
    pub roles_db: String,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LoadError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Gateway(#[from] GatewayError),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
    #[error("background load worker disconnected")]
    Disconnected,
}

pub type LoadResult = Result<OrgTree, LoadError>;

pub fn load_organization(gateway: &NotionGateway, request: &LoadRequest) -> LoadResult {
    let started = Instant::now();
    info!(
        circles_db = %request.circles_db,
        roles_db = %request.roles_db,
        "loading organization"
    );

    let (circles, roles) = thread::scope(|scope| {
        let circles =
            scope.spawn(|| gateway.fetch_dataset(&request.circles_db, &request.credential));
        let roles = gateway.fetch_dataset(&request.roles_db, &request.credential);
        let circles = circles
            .join()
            .unwrap_or_else(|_| Err(GatewayError::Network("circles fetch panicked".to_owned())));
        (circles, roles)
    });

    let result = circles
        .and_then(|circles| roles.map(|roles| (circles, roles)))
        .map_err(LoadError::from)
        .and_then(|(circles, roles)| Ok(build_tree_from_values(&circles, &roles)?));

    match &result {
        Ok(tree) => info!(
            circles = tree.circles.len(),
            roles = tree.role_count(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "organization loaded"
        ),
        Err(load_error) => error!(error = %load_error, "organization load failed"),
    }

    result
}

pub fn spawn_load(gateway: Arc<NotionGateway>, request: LoadRequest) -> Receiver<LoadResult> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        let result = load_organization(&gateway, &request);
        let _ = tx.send(result);
    });

    rx
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};

    use super::*;
    use crate::notion::{ApiRequest, ApiResponse, GatewayConfig, Transport};

    struct RoutedTransport {
        routes: HashMap<String, Result<ApiResponse, GatewayError>>,
        hits: Mutex<Vec<String>>,
    }

    impl RoutedTransport {
        fn new(routes: Vec<(&str, Result<ApiResponse, GatewayError>)>) -> Arc<Self> {
            Arc::new(Self {
                routes: routes
                    .into_iter()
                    .map(|(db, response)| (format!("https://api.test/v1/databases/{db}/query"), response))
                    .collect(),
                hits: Mutex::new(Vec::new()),
            })
        }
    }

    impl Transport for RoutedTransport {
        fn send(&self, request: &ApiRequest) -> Result<ApiResponse, GatewayError> {
            self.hits.lock().expect("hits lock").push(request.url.clone());
            self.routes
                .get(&request.url)
                .cloned()
                .unwrap_or(Err(GatewayError::Upstream { status: 404 }))
        }
    }

    fn results(records: Value) -> Result<ApiResponse, GatewayError> {
        Ok(ApiResponse {
            status: 200,
            body: json!({ "results": records, "has_more": false, "next_cursor": null }),
        })
    }

    fn gateway(transport: Arc<RoutedTransport>) -> NotionGateway {
        NotionGateway::new(
            GatewayConfig {
                api_base: "https://api.test/v1".to_owned(),
                page_size: 100,
            },
            transport,
        )
    }

    fn request() -> LoadRequest {
        LoadRequest {
            credential: Credential::resolve("secret", None).expect("credential"),
            circles_db: "circles".to_owned(),
            roles_db: "roles".to_owned(),
        }
    }

    #[test]
    fn both_datasets_build_one_tree() {
        let transport = RoutedTransport::new(vec![
            ("circles", results(json!([{ "CircleID": "1", "CircleName": "Core" }]))),
            (
                "roles",
                results(json!([
                    { "RoleID": "r1", "RoleName": "Lead", "CircleID": "1" },
                    { "RoleID": "r2", "RoleName": "Orphan", "CircleID": "9" }
                ])),
            ),
        ]);

        let tree = load_organization(&gateway(Arc::clone(&transport)), &request()).expect("tree");
        assert_eq!(tree.circles.len(), 1);
        assert_eq!(tree.circles[0].record.name, "Core");
        assert_eq!(tree.role_count(), 1);
        assert_eq!(tree.circles[0].roles[0].record.name, "Lead");
        assert_eq!(transport.hits.lock().expect("hits lock").len(), 2);
    }

    #[test]
    fn a_failed_roles_fetch_yields_no_tree() {
        let transport = RoutedTransport::new(vec![
            ("circles", results(json!([{ "CircleID": "1", "CircleName": "Core" }]))),
            ("roles", Err(GatewayError::Timeout)),
        ]);

        let error = load_organization(&gateway(transport), &request()).unwrap_err();
        assert_eq!(error, LoadError::Gateway(GatewayError::Timeout));
    }

    #[test]
    fn circles_error_wins_when_both_fail() {
        let transport = RoutedTransport::new(vec![
            ("circles", Ok(ApiResponse { status: 401, body: Value::Null })),
            ("roles", Err(GatewayError::Timeout)),
        ]);

        let error = load_organization(&gateway(transport), &request()).unwrap_err();
        assert_eq!(error, LoadError::Gateway(GatewayError::Upstream { status: 401 }));
    }

    #[test]
    fn invalid_records_surface_as_hierarchy_errors() {
        let transport = RoutedTransport::new(vec![
            ("circles", results(json!(["not a record"]))),
            ("roles", results(json!([]))),
        ]);

        let error = load_organization(&gateway(transport), &request()).unwrap_err();
        assert!(matches!(error, LoadError::Hierarchy(_)));
        assert_eq!(
            error.to_string(),
            "invalid circles data: record 0: expected an object, found a string"
        );
    }

    #[test]
    fn spawned_load_reports_through_the_channel() {
        let transport = RoutedTransport::new(vec![
            ("circles", results(json!([]))),
            ("roles", results(json!([]))),
        ]);

        let rx = spawn_load(Arc::new(gateway(transport)), request());
        let tree = rx.recv().expect("worker reports").expect("tree");
        assert!(tree.circles.is_empty());
    }
}
