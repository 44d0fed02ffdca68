use actix_web::{http::StatusCode, web, HttpResponse, ResponseError, Result};
use serde::{Deserialize, Serialize};

use crate::error::KeyGenError;
use crate::generator::{positive_count, GeneratorConfig, SerialKeyGenerator};
use crate::key_store::{open_store, StoreSettings};
use crate::luhn;
use crate::serial_key::{SerialKey, SUFFIX_SEPARATOR};

#[derive(Debug, Clone)]
pub struct AppState {
    pub store: StoreSettings,
    pub generator: GeneratorConfig,
}

impl AppState {
    pub fn in_memory() -> Self {
        AppState {
            store: StoreSettings::in_memory(),
            generator: GeneratorConfig::default(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct GenerateKeysPayload {
    #[serde(default)]
    prefix: String,
    #[serde(default)]
    suffix: String,
    count: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateKeysResponse {
    pub keys: Vec<SerialKey>,
    pub stored: Vec<SerialKey>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationResponse {
    pub key: String,
    pub valid: bool,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckDigitResponse {
    pub digits: String,
    pub check_digit: u8,
}

impl ResponseError for KeyGenError {
    fn status_code(&self) -> StatusCode {
        if self.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}

async fn generate_keys(
    payload: web::Json<GenerateKeysPayload>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    let GenerateKeysPayload {
        prefix,
        suffix,
        count,
    } = payload.into_inner();
    let count = positive_count(count)?;
    let settings = state.store.clone();
    let config = state.generator.clone();

    // Redis calls block, so the whole run goes to the blocking pool.
    let response = web::block(move || {
        let mut store = open_store(&settings)?;
        let mut generator = SerialKeyGenerator::with_config(config);
        let keys = generator.generate_valid_keys(&prefix, &suffix, count, &mut *store)?;
        let stored = store.get_all()?;
        Ok::<_, KeyGenError>(GenerateKeysResponse { keys, stored })
    })
    .await??;

    tracing::info!(generated = response.keys.len(), "served key generation request");
    Ok(HttpResponse::Ok().json(response))
}

async fn validate_key(key: web::Path<String>) -> Result<HttpResponse> {
    let key = key.into_inner();
    let numeric = key
        .split_once(SUFFIX_SEPARATOR)
        .map_or(key.as_str(), |(numeric, _)| numeric);
    let valid = luhn::is_valid(numeric)?;
    Ok(HttpResponse::Ok().json(ValidationResponse { key, valid }))
}

async fn check_digit(digits: web::Path<String>) -> Result<HttpResponse> {
    let digits = digits.into_inner();
    let check_digit = luhn::compute_check_digit(&digits)?;
    Ok(HttpResponse::Ok().json(CheckDigitResponse {
        digits,
        check_digit,
    }))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/serial-keys", web::post().to(generate_keys))
        .route("/api/serial-keys/{key}/validation", web::get().to(validate_key))
        .route("/api/check-digits/{digits}", web::get().to(check_digit));
}
