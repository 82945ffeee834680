use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use backend::analysis::scoring::ScoringBounds;
use backend::inference::model::{Classifier, ModelState, TorchClassifier};
use backend::routes::{configure_routes, json_config};
use backend::storage::uploads::UploadStore;
use std::env;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));
    dotenv::dotenv().ok();

    if let Ok(current_dir) = env::current_dir() {
        log::info!("Current working directory: {}", current_dir.display());
    }

    let model_path = env::var("MODEL_PATH").unwrap_or_else(|_| "fruit_classifier.pt".to_string());
    let model = match TorchClassifier::load(&model_path) {
        Ok(classifier) => {
            log::info!("Model loaded from {}", model_path);
            if let Some(total) = classifier.num_parameters() {
                log::info!("Model parameters: {}", total);
            }
            ModelState::Ready(Box::new(classifier))
        }
        Err(e) => {
            log::error!("Failed to load model from {}: {}", model_path, e);
            log::warn!("Serving dummy predictions until a model artifact is provided");
            ModelState::Unavailable {
                model_path: model_path.clone(),
            }
        }
    };
    let model = web::Data::new(model);

    let upload_dir = env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());
    let uploads = UploadStore::new(&upload_dir)
        .map_err(|e| std::io::Error::other(format!("Upload dir setup failed: {e}")))?;
    log::info!("Saving analyzed images under {}", upload_dir);

    let bounds = ScoringBounds::from_env();

    let port = env::var("PORT").unwrap_or_else(|_| "8081".to_string());
    let bind_address = format!("0.0.0.0:{}", port);
    log::info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allowed_methods(vec!["GET", "POST", "OPTIONS"])
                    .allowed_headers(vec![
                        actix_web::http::header::AUTHORIZATION,
                        actix_web::http::header::ACCEPT,
                        actix_web::http::header::CONTENT_TYPE,
                    ])
                    .max_age(3600),
            )
            .app_data(model.clone())
            .app_data(web::Data::new(uploads.clone()))
            .app_data(web::Data::new(bounds))
            .app_data(json_config())
            .configure(configure_routes)
    })
    .bind(&bind_address)?
    .run()
    .await
}
