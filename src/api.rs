use actix_web::{web, App, HttpServer, Responder, HttpResponse, HttpRequest};
use std::collections::HashMap;
use serde::Serialize;
use askama::Template;
use crate::config::Config;
use crate::error::PaletteError;
use crate::palette::{generate_palette_with, Palette};
use crate::templates::{PalettePageTemplate, Swatch};
use log::{info, warn, error};

// Channel sum above which a swatch label is drawn dark.
const LIGHT_SWATCH_THRESHOLD: u16 = 384;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PaletteConfigResponse {
    palette_config: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

struct Submission {
    hex_color: String,
    color_name: String,
}

impl Submission {
    fn from_params(params: &HashMap<String, String>) -> Self {
        Self {
            hex_color: params.get("hexColor").cloned().unwrap_or_default(),
            color_name: params.get("colorName").cloned().unwrap_or_default(),
        }
    }

    fn evaluate(&self, config: &Config) -> Result<Palette, PaletteError> {
        match generate_palette_with(&self.hex_color, &self.color_name, config.shade_curve) {
            Ok(palette) => {
                info!("Generated palette '{}' from {}", palette.name, palette.base);
                Ok(palette)
            },
            Err(e) => {
                warn!("Rejected palette submission (hex: {:?}, name: {:?}): {}", self.hex_color, self.color_name, e);
                Err(e)
            },
        }
    }
}

fn parse_params(raw: &[u8]) -> HashMap<String, String> {
    url::form_urlencoded::parse(raw).into_owned().collect()
}

fn page_template(submission: Option<&Submission>, config: &Config) -> PalettePageTemplate {
    let Some(submission) = submission else {
        return PalettePageTemplate {
            base_color: config.default_base_color.clone(),
            color_name: String::new(),
            error: None,
            swatches: Vec::new(),
            tailwind_config: None,
        };
    };
    let base_color = if submission.hex_color.is_empty() {
        config.default_base_color.clone()
    } else {
        submission.hex_color.clone()
    };
    match submission.evaluate(config) {
        Ok(palette) => PalettePageTemplate {
            base_color,
            color_name: submission.color_name.clone(),
            error: None,
            swatches: palette.shades.iter().map(|s| Swatch {
                shade: s.shade,
                color: s.color.clone(),
                label_color: if s.rgb.luminance_sum() > LIGHT_SWATCH_THRESHOLD { "#18181B" } else { "#FFFFFF" },
            }).collect(),
            tailwind_config: Some(palette.tailwind_config()),
        },
        Err(e) => PalettePageTemplate {
            base_color,
            color_name: submission.color_name.clone(),
            error: Some(e.to_string()),
            swatches: Vec::new(),
            tailwind_config: None,
        },
    }
}

fn render_page(template: PalettePageTemplate) -> HttpResponse {
    match template.render() {
        Ok(body) => HttpResponse::Ok()
            .content_type("text/html; charset=utf-8")
            .body(body),
        Err(e) => {
            error!("Template error: {}", e);
            HttpResponse::InternalServerError().body(format!("Template error: {}", e))
        },
    }
}

fn palette_json(submission: &Submission, config: &Config) -> HttpResponse {
    match submission.evaluate(config) {
        Ok(palette) => HttpResponse::Ok().json(PaletteConfigResponse {
            palette_config: palette.config_entry(),
        }),
        Err(e) => HttpResponse::BadRequest().json(ErrorResponse { error: e.to_string() }),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index_handler))
        .route("/", web::post().to(submit_handler))
        .route("/api/palette", web::get().to(api_query_handler))
        .route("/api/palette", web::post().to(api_form_handler))
        .route("/healthz", web::get().to(health_handler));
}

pub async fn run_api_server() -> std::io::Result<()> {
    let config = Config::from_env();
    let addr = (config.bind_address.clone(), config.port);

    info!("Starting palette server on {}:{}", addr.0, addr.1);
    info!("Default base color: {}, shade curve: {:?}", config.default_base_color, config.shade_curve);

    let data = web::Data::new(config);
    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .configure(configure)
    })
    .bind((addr.0.as_str(), addr.1))
    .inspect_err(|e| error!("Failed to bind {}:{}: {}", addr.0, addr.1, e))?
    .run()
    .await
}

async fn index_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    let params = parse_params(req.query_string().as_bytes());
    // Links carrying both fields render the result directly.
    if params.contains_key("hexColor") && params.contains_key("colorName") {
        return render_page(page_template(Some(&Submission::from_params(&params)), &config));
    }
    let mut template = page_template(None, &config);
    if let Some(hex) = params.get("hexColor").filter(|hex| !hex.is_empty()) {
        template.base_color = hex.clone();
    }
    if let Some(name) = params.get("colorName") {
        template.color_name = name.clone();
    }
    render_page(template)
}

async fn submit_handler(body: web::Bytes, config: web::Data<Config>) -> impl Responder {
    let submission = Submission::from_params(&parse_params(&body));
    render_page(page_template(Some(&submission), &config))
}

async fn api_query_handler(req: HttpRequest, config: web::Data<Config>) -> impl Responder {
    let submission = Submission::from_params(&parse_params(req.query_string().as_bytes()));
    palette_json(&submission, &config)
}

async fn api_form_handler(body: web::Bytes, config: web::Data<Config>) -> impl Responder {
    let submission = Submission::from_params(&parse_params(&body));
    palette_json(&submission, &config)
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().content_type("text/plain").body("ok")
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, http::StatusCode};
    use crate::palette::ShadeCurve;

    fn test_config(shade_curve: ShadeCurve) -> Config {
        Config {
            bind_address: "127.0.0.1".to_string(),
            port: 0,
            default_base_color: "#3498DB".to_string(),
            shade_curve,
        }
    }

    macro_rules! app {
        ($curve:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(test_config($curve)))
                    .configure(configure),
            )
            .await
        };
    }

    fn form(uri: &str, body: &str) -> test::TestRequest {
        test::TestRequest::post()
            .uri(uri)
            .insert_header(("content-type", "application/x-www-form-urlencoded"))
            .set_payload(body.to_string())
    }

    #[actix_web::test]
    async fn api_returns_palette_config() {
        let app = app!(ShadeCurve::Anchored);
        let resp = test::call_service(&app, form("/api/palette", "hexColor=%233498DB&colorName=brand").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        let config = body["paletteConfig"].as_str().unwrap();
        assert!(config.starts_with("'brand': {"));
        assert!(config.contains("500: '#3498DB',"));
        assert!(body.get("error").is_none());
    }

    #[actix_web::test]
    async fn api_rejects_invalid_hex() {
        let app = app!(ShadeCurve::Anchored);
        for hex in ["red", "%2312345", "123456"] {
            let resp = test::call_service(&app, form("/api/palette", &format!("hexColor={}&colorName=brand", hex)).to_request()).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["error"], PaletteError::InvalidHex.to_string());
        }
    }

    #[actix_web::test]
    async fn api_rejects_missing_name() {
        let app = app!(ShadeCurve::Anchored);
        let resp = test::call_service(&app, form("/api/palette", "hexColor=%233498DB&colorName=").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Please provide a name for your color palette.");

        let resp = test::call_service(&app, form("/api/palette", "hexColor=%233498DB").to_request()).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], PaletteError::MissingName.to_string());
    }

    #[actix_web::test]
    async fn api_accepts_query_string() {
        let app = app!(ShadeCurve::Linear);
        let req = test::TestRequest::get()
            .uri("/api/palette?hexColor=%233498DB&colorName=brand")
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["paletteConfig"].as_str().unwrap().contains("500: '#3395D6',"));
    }

    #[actix_web::test]
    async fn index_renders_empty_form() {
        let app = app!(ShadeCurve::Anchored);
        let resp = test::call_service(&app, test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("Tailwind Color Palette Generator"));
        assert!(body.contains("value=\"#3498DB\""));
        assert!(!body.contains("role=\"alert\""));
        assert!(!body.contains("Generated Tailwind Config"));
    }

    #[actix_web::test]
    async fn form_submission_renders_swatches() {
        let app = app!(ShadeCurve::Anchored);
        let resp = test::call_service(&app, form("/", "hexColor=%233498DB&colorName=brand").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert_eq!(body.matches("class=\"chip\"").count(), 10);
        assert!(body.contains("background-color: #F5FAFD"));
        assert!(body.contains("background-color: #0A1E2C"));
        assert!(body.contains("Generated Tailwind Config"));
        assert!(body.contains("module.exports"));
        assert!(body.contains("value=\"brand\""));
    }

    #[actix_web::test]
    async fn form_submission_renders_error() {
        let app = app!(ShadeCurve::Anchored);
        let resp = test::call_service(&app, form("/", "hexColor=red&colorName=brand").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
        assert!(body.contains("role=\"alert\""));
        assert!(body.contains("Invalid hex color"));
        assert!(!body.contains("class=\"chip\""));
    }

    #[actix_web::test]
    async fn shared_link_renders_result() {
        let app = app!(ShadeCurve::Anchored);
        let req = test::TestRequest::get().uri("/?hexColor=%23FF0000&colorName=red").to_request();
        let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert_eq!(body.matches("class=\"chip\"").count(), 10);
        assert!(body.contains("background-color: #FF0000"));
    }

    #[actix_web::test]
    async fn partial_link_prefills_form() {
        let app = app!(ShadeCurve::Anchored);
        let req = test::TestRequest::get().uri("/?hexColor=%23FF8800").to_request();
        let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
        assert!(body.contains("value=\"#FF8800\""));
        assert!(!body.contains("value=\"#3498DB\""));
        assert!(!body.contains("role=\"alert\""));
        assert!(!body.contains("class=\"chip\""));
    }

    #[actix_web::test]
    async fn api_keeps_name_padding() {
        let app = app!(ShadeCurve::Anchored);
        let resp = test::call_service(&app, form("/api/palette", "hexColor=%233498DB&colorName=+brand+").to_request()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert!(body["paletteConfig"].as_str().unwrap().starts_with("' brand ': {"));
    }

    #[actix_web::test]
    async fn health_check() {
        let app = app!(ShadeCurve::Anchored);
        let body = test::call_and_read_body(&app, test::TestRequest::get().uri("/healthz").to_request()).await;
        assert_eq!(body, web::Bytes::from_static(b"ok"));
    }
}
