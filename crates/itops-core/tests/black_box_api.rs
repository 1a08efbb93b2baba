use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use itops::alerting::AlertAggregator;
use itops::api::{create_router, AppState};
use itops::clock::FixedClock;
use itops::config::AlertingConfig;
use itops::gateway::{FileSource, HttpSource, SnapshotSource};
use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(source: Arc<dyn SnapshotSource>, today: NaiveDate, alerting: AlertingConfig) -> Self {
        // Same router as `itops serve`, bound to an ephemeral port.
        let app = create_router(AppState {
            source,
            clock: Arc::new(FixedClock(today)),
            aggregator: AlertAggregator::new(alerting),
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn get(&self, route: &str) -> (StatusCode, Value) {
        let res = reqwest::get(format!("{}{}", self.base_url, route)).await.unwrap();
        let status = res.status();
        (status, res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

async fn backend(collections: &[(&str, Value)]) -> MockServer {
    let server = MockServer::start().await;
    for (route, body) in collections {
        Mock::given(method("GET"))
            .and(path(format!("/api/{route}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .mount(&server)
            .await;
    }
    server
}

#[tokio::test]
async fn dashboard_over_backend_orders_alerts_by_severity() {
    let upstream = backend(&[
        ("compras", json!([])),
        (
            "chamados",
            json!([
                {"id": 7, "numero_chamado": "2024-000007", "titulo": "Link caiu", "prioridade": "critica", "status": "aberto"},
                {"id": 8, "numero_chamado": "2024-000008", "titulo": "Teclado", "prioridade": "critica", "status": "resolvido"}
            ]),
        ),
        ("ativos", json!([])),
        (
            "inventario",
            json!([{"id": 1, "nome": "Toner", "quantidade": 5, "quantidade_minima": 5}]),
        ),
        (
            "contas-mensais",
            json!([
                {"id": 1, "tipo_conta": "Energia", "data_vencimento": "2024-01-01", "status_pagamento": "pendente"},
                {"id": 2, "tipo_conta": "Telefonia", "data_vencimento": "2024-01-01T00:00:00.000Z", "status_pagamento": "pago"}
            ]),
        ),
    ])
    .await;

    let source = HttpSource::new(&upstream.uri(), Duration::from_secs(5)).unwrap();
    let server = TestServer::spawn(Arc::new(source), date(2024, 1, 2), AlertingConfig::default()).await;

    let (status, body) = server.get("/api/dashboard").await;
    assert_eq!(status, StatusCode::OK);

    let alerts = body["alertas"].as_array().unwrap();
    assert_eq!(alerts.len(), 3);
    assert_eq!(alerts[0]["tipo"], json!("critico"));
    assert_eq!(alerts[0]["modulo"], json!("Chamados"));
    assert_eq!(alerts[1]["modulo"], json!("Contas Mensais"));
    assert_eq!(alerts[2]["tipo"], json!("aviso"));
    assert_eq!(alerts[2]["modulo"], json!("Inventário"));

    let stats = &body["estatisticas"];
    assert_eq!(stats["chamados"]["total"], json!(2));
    assert_eq!(stats["chamados"]["criticos"], json!(1));
    assert_eq!(stats["contas_mensais"]["pendente"], json!(1));
    assert_eq!(stats["contas_mensais"]["pago"], json!(1));
    assert_eq!(stats["contas_mensais"]["vencidas"], json!(1));
}

#[tokio::test]
async fn backend_failure_is_bad_gateway() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&upstream)
        .await;

    let source = HttpSource::new(&upstream.uri(), Duration::from_secs(5)).unwrap();
    let server = TestServer::spawn(Arc::new(source), date(2024, 1, 2), AlertingConfig::default()).await;

    let (status, body) = server.get("/api/dashboard/estatisticas").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(body["erro"].is_string());
}

#[tokio::test]
async fn file_source_honours_configured_horizons() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("contas_mensais.json"),
        r#"[{"id": 1, "tipo_conta": "Internet", "data_vencimento": "2024-01-12", "status_pagamento": "pendente"}]"#,
    )
    .unwrap();
    std::fs::write(
        dir.path().join("ativos.json"),
        r#"[{"id": 1, "nome": "Antivírus", "tipo_ativo": "licenca", "status": "ativo", "data_vencimento_licenca": "2024-02-20"}]"#,
    )
    .unwrap();

    let today = date(2024, 1, 2);

    // Default horizons: bill 10 days out and license 49 days out are both quiet
    let server = TestServer::spawn(
        Arc::new(FileSource::new(dir.path())),
        today,
        AlertingConfig::default(),
    )
    .await;
    let (_, due_soon) = server.get("/api/contas-mensais/vencendo").await;
    assert_eq!(due_soon.as_array().unwrap().len(), 0);
    let (_, alerts) = server.get("/api/dashboard/alertas").await;
    assert_eq!(alerts, json!([]));

    // Wider horizons pick both up
    let wide = AlertingConfig {
        bill_due_soon_days: 15,
        license_expiry_days: 60,
    };
    let server = TestServer::spawn(Arc::new(FileSource::new(dir.path())), today, wide).await;
    let (_, due_soon) = server.get("/api/contas-mensais/vencendo").await;
    assert_eq!(due_soon[0]["vencendo"], json!(true));
    let (_, alerts) = server.get("/api/dashboard/alertas").await;
    assert_eq!(alerts.as_array().unwrap().len(), 1);
    assert_eq!(alerts[0]["modulo"], json!("Ativos"));
}
