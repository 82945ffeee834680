use actix_web::{HttpResponse, web};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use chrono::Utc;
use log::{error, info, warn};
use serde_json::json;
use shared::{AnalysisResponse, AnalyzeRequest, ErrorResponse, Label, NutritionInfo};
use strum::IntoEnumIterator;

use crate::analysis::{self, Analysis, facts, scoring::ScoringBounds};
use crate::inference::model::ModelState;
use crate::inference::preprocess;
use crate::storage::uploads::UploadStore;

pub const SERVICE_NAME: &str = "FruitSense AI Backend";

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/analyze").route(web::post().to(handle_analyze)))
        .service(web::resource("/api/health").route(web::get().to(health_check)))
        .service(web::resource("/api/model_info").route(web::get().to(model_info)));
}

/// JSON extractor config shared by the server and the tests: malformed or
/// field-missing bodies get the service's error shape instead of actix's
/// default 400 body.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        actix_web::error::InternalError::from_response(
            err,
            bad_request(format!("Invalid request body: {detail}")),
        )
        .into()
    })
}

async fn handle_analyze(
    model: web::Data<ModelState>,
    uploads: web::Data<UploadStore>,
    bounds: web::Data<ScoringBounds>,
    payload: web::Json<AnalyzeRequest>,
) -> HttpResponse {
    info!(
        "analysis request received ({} characters of image data)",
        payload.image.len()
    );

    if payload.image.trim().is_empty() {
        return bad_request("No image provided".to_string());
    }

    // Strip a data-URL prefix ("data:image/jpeg;base64,...") if present.
    let encoded = match payload.image.split_once(',') {
        Some((_, rest)) => rest,
        None => payload.image.as_str(),
    };

    let bytes = match STANDARD.decode(encoded) {
        Ok(bytes) => bytes,
        Err(e) => return bad_request(format!("Invalid image: {e}")),
    };

    let image = match preprocess::decode_image(&bytes) {
        Ok(image) => {
            info!("image decoded: {}x{} pixels", image.width(), image.height());
            image
        }
        Err(e) => return bad_request(e.to_string()),
    };

    let filename = match uploads.save_scan(&image) {
        Ok(filename) => {
            info!("image saved: {}", filename);
            filename
        }
        Err(e) => {
            warn!("failed to save scan: {}", e);
            "unsaved".to_string()
        }
    };

    // Inference is blocking and CPU-bound, so keep it off the accept path.
    let state = model.clone();
    let bounds = **bounds;
    let outcome =
        web::block(move || analysis::analyze(&image, state.get_ref(), &bounds)).await;

    match outcome {
        Ok(Ok(analysis)) => HttpResponse::Ok().json(build_response(analysis, filename)),
        Ok(Err(e)) if e.is_client_error() => bad_request(e.to_string()),
        Ok(Err(e)) => {
            error!("analysis failed: {}", e);
            server_error(e.to_string())
        }
        Err(e) => {
            error!("blocking task failed: {}", e);
            server_error(e.to_string())
        }
    }
}

fn build_response(analysis: Analysis, image_saved: String) -> AnalysisResponse {
    let Analysis {
        label,
        category,
        confidence,
        freshness,
        model_used,
    } = analysis;
    let nutrition = facts::nutrition_for(label);

    AnalysisResponse {
        success: true,
        prediction: label,
        category,
        freshness: round1(freshness),
        confidence: round1(confidence),
        nutrition: NutritionInfo {
            calories: format!("{} per 100g", nutrition.calories),
            benefits: nutrition.benefits.to_string(),
            color: nutrition.color.to_string(),
        },
        health_tips: facts::health_tips_for(label)
            .iter()
            .map(|tip| tip.to_string())
            .collect(),
        timestamp: Utc::now().to_rfc3339(),
        image_saved,
        ai_model_used: model_used,
    }
}

async fn health_check(model: web::Data<ModelState>) -> HttpResponse {
    let labels: Vec<String> = if model.is_ready() {
        Label::iter().map(|label| label.to_string()).collect()
    } else {
        Vec::new()
    };

    HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "ai_model": {
            "loaded": model.is_ready(),
            "name": model.model_name(),
            "labels": labels,
        },
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

async fn model_info(model: web::Data<ModelState>) -> HttpResponse {
    match model.classifier() {
        Some(classifier) => HttpResponse::Ok().json(json!({
            "success": true,
            "model_name": classifier.name(),
            "input_shape": [1, preprocess::INPUT_EDGE, preprocess::INPUT_EDGE, 3],
            "output_shape": [1, Label::COUNT],
            "labels": Label::iter().map(|label| label.to_string()).collect::<Vec<_>>(),
            "total_params": classifier.num_parameters(),
        })),
        None => HttpResponse::NotFound().json(ErrorResponse {
            success: false,
            error: "Model not loaded".to_string(),
            message: None,
        }),
    }
}

fn bad_request(error: String) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        success: false,
        error,
        message: None,
    })
}

fn server_error(error: String) -> HttpResponse {
    HttpResponse::InternalServerError().json(ErrorResponse {
        success: false,
        error,
        message: Some("AI analysis failed".to_string()),
    })
}

fn round1(value: f32) -> f32 {
    (value * 10.0).round() / 10.0
}
