/// HTTP server exposing the dashboard over a JSON API
use actix_web::{middleware, web, App, HttpResponse, HttpServer};

use crate::context::DashboardContext;
use crate::messages::{DashboardPayload, ErrorBody, FilterParams};
use crate::table::records_to_csv;
use crate::view::FilteredView;
use serde::Deserialize;

/// Dashboard endpoint: loads (or reuses) the cached dataset, applies the
/// filter criteria, and returns summary, charts, and rows in one payload.
async fn dashboard(
    params: web::Query<FilterParams>,
    ctx: web::Data<DashboardContext>,
) -> HttpResponse {
    let criteria = match params.criteria() {
        Ok(criteria) => criteria,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorBody {
                message,
                hint: None,
            })
        }
    };

    match ctx.load_games().await {
        Ok(table) => {
            let view = FilteredView::new(&table, &criteria);
            HttpResponse::Ok().json(DashboardPayload::from_view(&view))
        }
        Err(err) => HttpResponse::BadGateway().json(ErrorBody::from(&err)),
    }
}

// Flat on purpose: query-string deserialization dislikes nested structs
#[derive(Debug, Deserialize)]
struct ExportParams {
    #[serde(default = "default_format")]
    format: String,
    #[serde(default)]
    search: String,
    #[serde(default = "default_export_low")]
    low: i32,
    #[serde(default = "default_export_high")]
    high: i32,
}

fn default_format() -> String {
    "csv".to_string()
}

fn default_export_low() -> i32 {
    0
}

fn default_export_high() -> i32 {
    100
}

impl ExportParams {
    fn filter(&self) -> FilterParams {
        FilterParams {
            search: self.search.clone(),
            low: self.low,
            high: self.high,
        }
    }
}

/// Dataset-explorer download: the filtered table as CSV or JSON.
async fn export(params: web::Query<ExportParams>, ctx: web::Data<DashboardContext>) -> HttpResponse {
    let criteria = match params.filter().criteria() {
        Ok(criteria) => criteria,
        Err(message) => {
            return HttpResponse::BadRequest().json(ErrorBody {
                message,
                hint: None,
            })
        }
    };

    let table = match ctx.load_games().await {
        Ok(table) => table,
        Err(err) => return HttpResponse::BadGateway().json(ErrorBody::from(&err)),
    };
    let view = FilteredView::new(&table, &criteria);

    match params.format.as_str() {
        "csv" => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(records_to_csv(view.records())),
        "json" => match crate::table::records_to_json(view.records()) {
            Ok(body) => HttpResponse::Ok()
                .content_type("application/json")
                .body(body),
            Err(err) => HttpResponse::InternalServerError().json(ErrorBody::from(&err)),
        },
        other => HttpResponse::BadRequest().json(ErrorBody {
            message: format!("unknown export format '{}', use csv or json", other),
            hint: None,
        }),
    }
}

/// Health check endpoint
async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "message": "GameLake dashboard server is running"
    }))
}

/// Start the dashboard API server around an already-connected context.
pub async fn run_server(host: &str, port: u16, ctx: DashboardContext) -> std::io::Result<()> {
    let state = web::Data::new(ctx);

    println!("🚀 GameLake Dashboard Server");
    println!("====================================");
    println!("📊 Dashboard: http://{}:{}/api/dashboard", host, port);
    println!("📥 Export:    http://{}:{}/api/export", host, port);
    println!("🏥 Health:    http://{}:{}/health", host, port);
    println!("====================================");
    println!();

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            // Enable logger
            .wrap(middleware::Logger::default())
            // CORS for development
            .wrap(
                actix_cors::Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .route("/api/dashboard", web::get().to(dashboard))
            .route("/api/export", web::get().to(export))
            .route("/health", web::get().to(health_check))
    })
    .bind((host, port))?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::QueryEngine;
    use crate::date::ReleaseDate;
    use crate::error::LakeError;
    use crate::record::{GameRecord, WireResult};
    use crate::table::GameTable;
    use actix_web::{test, App};
    use async_trait::async_trait;

    struct UnreachableEngine;

    #[async_trait]
    impl QueryEngine for UnreachableEngine {
        async fn execute(&self, _sql: &str) -> Result<WireResult, LakeError> {
            Err(LakeError::connection("engine unreachable"))
        }
    }

    fn sample_context() -> DashboardContext {
        DashboardContext::with_table(GameTable::new(vec![
            GameRecord {
                name: "Halo".to_string(),
                rating: 4.5,
                metacritic: 90,
                released: ReleaseDate::parse("2001-11-15").unwrap(),
                playtime: 10.0,
            },
            GameRecord {
                name: "Halo 2".to_string(),
                rating: 4.0,
                metacritic: 85,
                released: ReleaseDate::parse("2004-11-09").unwrap(),
                playtime: 12.0,
            },
            GameRecord {
                name: "Minesweeper".to_string(),
                rating: 3.1,
                metacritic: 62,
                released: ReleaseDate::parse("1990-10-08").unwrap(),
                playtime: 50.0,
            },
        ]))
    }

    #[actix_web::test]
    async fn test_dashboard_endpoint_filters_and_aggregates() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(sample_context()))
                .route("/api/dashboard", web::get().to(dashboard)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard?search=halo&low=80&high=100")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["summary"]["count"], 2);
        assert_eq!(body["summary"]["mean_metacritic"], 87.5);
        assert_eq!(body["top_rated"][0]["name"], "Halo");
        assert_eq!(body["rows"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn test_dashboard_rejects_bad_bounds() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(sample_context()))
                .route("/api/dashboard", web::get().to(dashboard)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/dashboard?low=90&high=10")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn test_dashboard_surfaces_load_failure_as_banner() {
        let ctx = DashboardContext::with_engine(Box::new(UnreachableEngine));
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ctx))
                .route("/api/dashboard", web::get().to(dashboard)),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/dashboard").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_GATEWAY);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["message"].as_str().unwrap().contains("unreachable"));
        assert!(body["hint"].as_str().is_some());
    }

    #[actix_web::test]
    async fn test_export_csv() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(sample_context()))
                .route("/api/export", web::get().to(export)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/export?format=csv&search=halo")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_success());

        let body = test::read_body(resp).await;
        let text = std::str::from_utf8(&body).unwrap();
        assert!(text.starts_with("name,rating,metacritic,released,playtime\n"));
        assert!(text.contains("Halo 2,4,85,2004-11-09,12"));
        assert!(!text.contains("Minesweeper"));
    }

    #[actix_web::test]
    async fn test_export_unknown_format() {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(sample_context()))
                .route("/api/export", web::get().to(export)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/api/export?format=parquet")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::BAD_REQUEST);
    }
}
