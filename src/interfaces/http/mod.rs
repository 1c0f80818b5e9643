mod multipart;

use actix_cors::Cors;
use actix_web::dev::Server;
use actix_web::http::header::ContentDisposition;
use actix_web::middleware::Logger;
use actix_web::{post, web, App, HttpRequest, HttpResponse, HttpServer, Responder};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::application::use_cases::csv_augmentor::CsvAugmentor;
use crate::domain::error::AppError;
use crate::infrastructure::config::ServerConfig;

pub use multipart::{read_upload, FILE_FIELD};

#[derive(Default)]
pub struct HttpState {
    pub augmentor: CsvAugmentor,
}

#[post("/process_csv")]
async fn process_csv(
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Payload,
) -> impl Responder {
    let request_id = Uuid::new_v4();
    handle_upload(data, req, payload)
        .instrument(info_span!("process_csv", %request_id))
        .await
}

async fn handle_upload(
    data: web::Data<HttpState>,
    req: HttpRequest,
    payload: web::Payload,
) -> HttpResponse {
    let upload = match read_upload(&req, payload).await {
        Ok(upload) => upload,
        Err(err) => return error_response(&err),
    };

    if let Some(upload) = &upload {
        info!(
            filename = %upload.filename,
            bytes = upload.bytes.len(),
            "Processing CSV upload"
        );
    }

    match data.augmentor.process_upload(upload) {
        Ok(output) => {
            info!(bytes = output.bytes.len(), "CSV processed");
            HttpResponse::Ok()
                .content_type(output.content_type)
                .insert_header(ContentDisposition::attachment(output.filename))
                .body(output.bytes)
        }
        Err(err) => error_response(&err),
    }
}

/// JSON `{"error": ...}` body: 400 for request-shape errors, 500 otherwise
pub fn error_response(err: &AppError) -> HttpResponse {
    if err.is_request_error() {
        warn!(error = %err, "Rejected CSV upload");
        HttpResponse::BadRequest().json(serde_json::json!({ "error": err.to_string() }))
    } else {
        error!(error = %err, "Failed to process CSV");
        HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to process CSV: {}", err)
        }))
    }
}

/// Any origin may call the endpoint
pub fn cors() -> Cors {
    Cors::permissive()
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(process_csv);
}

pub fn start_server(config: &ServerConfig) -> std::io::Result<Server> {
    let state = web::Data::new(HttpState::default());

    let mut server = HttpServer::new(move || {
        App::new()
            .wrap(cors())
            .wrap(Logger::default())
            .app_data(state.clone())
            .configure(configure)
    });
    if let Some(workers) = config.workers {
        server = server.workers(workers);
    }

    let server = server.bind((config.host.as_str(), config.port))?.run();
    info!(address = %config.bind_address(), debug = config.debug, "CSV augmentor listening");

    Ok(server)
}
