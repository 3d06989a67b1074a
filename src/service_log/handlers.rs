use actix_web::error::{InternalError, UrlencodedError};
use actix_web::http::header::{
    Charset, ContentDisposition, DispositionParam, DispositionType, ExtendedValue,
};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use super::models::{CanonicalRecord, OutputFormat, ServiceVisitForm};
use super::normalizer::normalize;
use super::ServiceLogError;
use crate::archive::{archive_with_deadline, ArchiveOutcome, ArchiveRequest};
use crate::generators::{GeneratedDocument, Generator};
use crate::state::AppState;
use crate::StatusResponse;

/// Largest accepted form body.
pub const FORM_LIMIT: usize = 256 * 1024;

#[utoipa::path(
    post,
    path = "/generate",
    tag = "Service Log",
    request_body(content = ServiceVisitForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "PDF or XLSX download; status payload for drive_excel", body = StatusResponse),
        (status = 400, description = "Invalid form field or malformed body", body = StatusResponse),
        (status = 413, description = "Form body larger than 256 KiB", body = StatusResponse),
        (status = 500, description = "Rendering failed", body = StatusResponse),
        (status = 502, description = "Archiving failed (drive_excel only)", body = StatusResponse)
    )
)]
pub async fn generate(
    form: web::Form<ServiceVisitForm>,
    state: web::Data<AppState>,
) -> HttpResponse {
    let request_id = Uuid::new_v4();
    let form = form.into_inner();
    let mode = OutputFormat::from_discriminator(form.format.as_deref());
    info!("[{}] generating service log as {:?}", request_id, mode);

    match handle_generate(request_id, &form, mode, &state).await {
        Ok(response) => response,
        Err(e) => {
            error!("[{}] service log generation failed: {}", request_id, e);
            e.into()
        }
    }
}

async fn handle_generate(
    request_id: Uuid,
    form: &ServiceVisitForm,
    mode: OutputFormat,
    state: &AppState,
) -> Result<HttpResponse, ServiceLogError> {
    let record = normalize(form)?;

    // The PDF is archived on every call, whatever the caller downloads.
    let pdf = render(state.pdf.clone(), &record).await?;
    let pdf_bytes = tokio::fs::read(pdf.path())
        .await
        .map_err(ServiceLogError::ReadDocument)?;
    let archive_request = ArchiveRequest::new(&record, &pdf, &pdf_bytes);
    let archive = archive_with_deadline(
        state.archiver.as_ref(),
        &archive_request,
        state.archive_timeout,
    );

    match mode {
        OutputFormat::Archive => {
            let outcome = archive.await;
            log_outcome(request_id, &outcome);
            Ok(archive_status(&record, &outcome))
        }
        OutputFormat::Pdf => {
            let outcome = archive.await;
            log_outcome(request_id, &outcome);
            Ok(attachment(&pdf, pdf_bytes))
        }
        OutputFormat::Excel => {
            let (outcome, xlsx) = tokio::join!(archive, render(state.xlsx.clone(), &record));
            log_outcome(request_id, &outcome);

            let xlsx = xlsx?;
            let bytes = tokio::fs::read(xlsx.path())
                .await
                .map_err(ServiceLogError::ReadDocument)?;
            Ok(attachment(&xlsx, bytes))
        }
    }
}

/// Run a generator on the blocking pool.
async fn render(
    generator: Arc<dyn Generator>,
    record: &CanonicalRecord,
) -> Result<GeneratedDocument, ServiceLogError> {
    let record = record.clone();
    let document = web::block(move || generator.generate(&record))
        .await
        .map_err(|e| ServiceLogError::Blocking(e.to_string()))??;
    Ok(document)
}

fn log_outcome(request_id: Uuid, outcome: &ArchiveOutcome) {
    match outcome {
        ArchiveOutcome::Archived => info!("[{}] log sheet archived", request_id),
        ArchiveOutcome::Failed(reason) => warn!("[{}] archiving failed: {}", request_id, reason),
        ArchiveOutcome::TimedOut => warn!("[{}] archiving timed out", request_id),
    }
}

fn archive_status(record: &CanonicalRecord, outcome: &ArchiveOutcome) -> HttpResponse {
    match outcome.failure_message() {
        None => HttpResponse::Ok().json(StatusResponse::success(format!(
            "Log sheet saved under {} folder!",
            record.company()
        ))),
        Some(message) => HttpResponse::BadGateway().json(StatusResponse::error(message)),
    }
}

fn attachment(document: &GeneratedDocument, bytes: Vec<u8>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(document.mime_type())
        .insert_header(content_disposition(&document.filename))
        .body(bytes)
}

/// Attachment header for `filename`.
///
/// Non-ASCII names get an ASCII `filename` fallback plus a UTF-8 `filename*`.
pub fn content_disposition(filename: &str) -> ContentDisposition {
    let mut parameters = Vec::with_capacity(2);
    if filename.is_ascii() {
        parameters.push(DispositionParam::Filename(filename.to_string()));
    } else {
        let fallback: String = filename
            .chars()
            .map(|c| if c.is_ascii() { c } else { '_' })
            .collect();
        parameters.push(DispositionParam::Filename(fallback));
        parameters.push(DispositionParam::FilenameExt(ExtendedValue {
            charset: Charset::Ext("UTF-8".to_string()),
            language_tag: None,
            value: filename.as_bytes().to_vec(),
        }));
    }

    ContentDisposition {
        disposition: DispositionType::Attachment,
        parameters,
    }
}

/// Turn form extraction failures into the usual status payload.
fn form_error(err: UrlencodedError, _req: &HttpRequest) -> actix_web::Error {
    warn!("rejected /generate body: {}", err);
    let body = StatusResponse::error(err.to_string());
    let response = match &err {
        UrlencodedError::Overflow { .. } => HttpResponse::PayloadTooLarge().json(body),
        _ => HttpResponse::BadRequest().json(body),
    };
    InternalError::from_response(err, response).into()
}

/// Configure service log routes.
pub fn config(cfg: &mut web::ServiceConfig) {
    let form_config = web::FormConfig::default()
        .limit(FORM_LIMIT)
        .error_handler(form_error);

    cfg.app_data(form_config)
        .service(web::resource("/generate").route(web::post().to(generate)));
}
