//! JSON handlers for encryption, decryption, validation and format conversion.

use axum::{extract::rejection::JsonRejection, http::StatusCode, response::Json};
use log::{debug, warn};
use serde::Deserialize;
use serde_json::{Value, json};
use tinya51_core::cipher::TinyA51;
use tinya51_core::codec;
use tinya51_core::validate::{self, InputFormat};

type ApiResponse = (StatusCode, Json<Value>);

#[derive(Deserialize)]
pub(crate) struct EncryptRequest {
    plaintext: Option<String>,
    key: Option<String>,
    input_format: Option<String>,
    verbose: Option<bool>,
}

#[derive(Deserialize)]
pub(crate) struct DecryptRequest {
    ciphertext: Option<String>,
    key: Option<String>,
    input_format: Option<String>,
    verbose: Option<bool>,
}

#[derive(Deserialize)]
pub(crate) struct ValidateRequest {
    key: Option<String>,
    data: Option<String>,
    input_format: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct ConvertRequest {
    text: Option<String>,
    from_format: Option<String>,
}

/// Names the JSON fields on each side of a transform.
#[derive(Clone, Copy)]
enum Direction {
    Encrypt,
    Decrypt,
}

impl Direction {
    const fn input_field(self) -> &'static str {
        match self {
            Self::Encrypt => "plaintext",
            Self::Decrypt => "ciphertext",
        }
    }

    const fn output_field(self) -> &'static str {
        match self {
            Self::Encrypt => "ciphertext",
            Self::Decrypt => "plaintext",
        }
    }

    const fn failure(self) -> &'static str {
        match self {
            Self::Encrypt => "Encryption failed",
            Self::Decrypt => "Decryption failed",
        }
    }
}

fn error_response(status: StatusCode, message: String) -> ApiResponse {
    warn!("Request rejected ({status}): {message}");
    (status, Json(json!({ "error": message })))
}

/// Unwraps the JSON body, turning an unreadable one into a 400 with a JSON error.
fn read_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, ApiResponse> {
    body.map(|Json(payload)| payload).map_err(|rejection| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Invalid request body: {}", rejection.body_text()),
        )
    })
}

/// `"char"` selects A-H input; anything else, or nothing, means binary.
fn input_format(value: Option<&str>) -> InputFormat {
    match value {
        Some("char") => InputFormat::Char,
        _ => InputFormat::Binary,
    }
}

/// Encrypts plaintext given in binary or as A-H characters.
pub(crate) async fn encrypt_handler(
    body: Result<Json<EncryptRequest>, JsonRejection>,
) -> ApiResponse {
    let payload = match read_body(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let (Some(plaintext), Some(key)) = (payload.plaintext, payload.key) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields: plaintext, key".to_string(),
        );
    };
    run_cipher(
        Direction::Encrypt,
        &plaintext,
        &key,
        input_format(payload.input_format.as_deref()),
        payload.verbose.unwrap_or(false),
    )
}

/// Decrypts ciphertext given in binary or as A-H characters.
pub(crate) async fn decrypt_handler(
    body: Result<Json<DecryptRequest>, JsonRejection>,
) -> ApiResponse {
    let payload = match read_body(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let (Some(ciphertext), Some(key)) = (payload.ciphertext, payload.key) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields: ciphertext, key".to_string(),
        );
    };
    run_cipher(
        Direction::Decrypt,
        &ciphertext,
        &key,
        input_format(payload.input_format.as_deref()),
        payload.verbose.unwrap_or(false),
    )
}

fn run_cipher(
    direction: Direction,
    text: &str,
    key: &str,
    format: InputFormat,
    verbose: bool,
) -> ApiResponse {
    let key_check = validate::validate_key(key);
    if !key_check.valid {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Key validation failed: {}", key_check.message),
        );
    }
    let data_check = validate::validate_data(text, format);
    if !data_check.valid {
        return error_response(
            StatusCode::BAD_REQUEST,
            format!("Data validation failed: {}", data_check.message),
        );
    }

    let binary = match format {
        InputFormat::Binary => text.to_string(),
        InputFormat::Char => match codec::encode(text) {
            Ok(binary) => binary,
            Err(e) => {
                return error_response(
                    StatusCode::BAD_REQUEST,
                    format!("Character conversion failed: {e}"),
                );
            }
        },
    };

    // Fresh instance per request.
    let result = match TinyA51::new(key).and_then(|mut cipher| cipher.transform(&binary, verbose)) {
        Ok(result) => result,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("{}: {e}", direction.failure()),
            );
        }
    };
    debug!("Processed {} bit(s) for {}", binary.len(), direction.input_field());

    let input_field = direction.input_field();
    let output_field = direction.output_field();
    let mut response = json!({
        "success": true,
        "key": key,
        "input_format": format,
    });
    response[input_field] = json!(text);
    response[format!("{input_field}_binary")] = json!(binary);
    response[output_field] = json!(result.output);
    if format == InputFormat::Char {
        response[format!("{output_field}_char")] = json!(codec::decode(&result.output).ok());
    }

    if verbose {
        response["steps"] = json!(result.steps);
        response["initial_state"] = json!(result.initial_state);
    }

    (StatusCode::OK, Json(response))
}

/// Checks a key and/or data without running the cipher. Empty fields are skipped.
pub(crate) async fn validate_handler(
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> ApiResponse {
    let payload = match read_body(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let mut errors = Vec::new();

    if let Some(key) = payload.key.as_deref().filter(|key| !key.is_empty()) {
        let verdict = validate::validate_key(key);
        if !verdict.valid {
            errors.push(format!("Key: {}", verdict.message));
        }
    }
    if let Some(data) = payload.data.as_deref().filter(|data| !data.is_empty()) {
        let format = input_format(payload.input_format.as_deref());
        let verdict = validate::validate_data(data, format);
        if !verdict.valid {
            errors.push(format!("Data: {}", verdict.message));
        }
    }

    (
        StatusCode::OK,
        Json(json!({ "valid": errors.is_empty(), "errors": errors })),
    )
}

/// Converts between A-H characters and binary.
pub(crate) async fn convert_handler(
    body: Result<Json<ConvertRequest>, JsonRejection>,
) -> ApiResponse {
    let payload = match read_body(body) {
        Ok(payload) => payload,
        Err(response) => return response,
    };
    let (Some(text), Some(from_format)) = (payload.text, payload.from_format) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Missing required fields: text, from_format".to_string(),
        );
    };

    let (converted, to_format) = match from_format.as_str() {
        "char" => (
            codec::encode(&text)
                .map_err(|e| format!("Character to binary conversion failed: {e}")),
            "binary",
        ),
        "binary" => (
            codec::decode(&text)
                .map_err(|e| format!("Binary to character conversion failed: {e}")),
            "char",
        ),
        _ => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid from_format. Use \"char\" or \"binary\"".to_string(),
            );
        }
    };

    match converted {
        Ok(converted) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "original": text,
                "converted": converted,
                "from_format": from_format,
                "to_format": to_format,
            })),
        ),
        Err(message) => error_response(StatusCode::BAD_REQUEST, message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::extract::{FromRequest, Request};
    use axum::http::header;
    use serde::de::DeserializeOwned;

    const KEY: &str = "10010101001110100110000";

    fn request<T: DeserializeOwned>(body: Value) -> Result<Json<T>, JsonRejection> {
        Ok(Json(serde_json::from_value(body).unwrap()))
    }

    async fn raw_request<T: DeserializeOwned>(
        body: &'static str,
    ) -> Result<Json<T>, JsonRejection> {
        let request = Request::builder()
            .method("POST")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .unwrap();
        Json::<T>::from_request(request, &()).await
    }

    #[tokio::test]
    async fn test_encrypt_binary() {
        let (status, Json(body)) =
            encrypt_handler(request(json!({ "plaintext": "111", "key": KEY }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["ciphertext"], "010");
        assert_eq!(body["plaintext_binary"], "111");
        assert_eq!(body["input_format"], "binary");
        assert!(body.get("steps").is_none());
        assert!(body.get("ciphertext_char").is_none());
    }

    #[tokio::test]
    async fn test_encrypt_chars_verbose() {
        let (status, Json(body)) = encrypt_handler(request(json!({
            "plaintext": "head",
            "key": KEY,
            "input_format": "char",
            "verbose": true,
        })))
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plaintext_binary"], "111100000011");
        assert_eq!(body["ciphertext"], "010000101000");
        assert_eq!(body["ciphertext_char"], "CAFA");
        assert_eq!(body["steps"].as_array().map(Vec::len), Some(12));
        assert_eq!(body["steps"][0]["X_before"], json!([1, 0, 0, 1, 0, 1]));
        assert_eq!(body["initial_state"]["Z"], json!([1, 0, 0, 1, 1, 0, 0, 0, 0]));
    }

    #[tokio::test]
    async fn test_decrypt_mirrors_encrypt() {
        let (status, Json(body)) =
            decrypt_handler(request(json!({ "ciphertext": "010", "key": KEY }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["plaintext"], "111");
        assert_eq!(body["ciphertext_binary"], "010");
    }

    #[tokio::test]
    async fn test_missing_fields() {
        let (status, Json(body)) = encrypt_handler(request(json!({ "key": KEY }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing required fields: plaintext, key");

        let (status, _) = decrypt_handler(request(json!({ "ciphertext": "1" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_invalid_key_and_data() {
        let (status, Json(body)) =
            encrypt_handler(request(json!({ "plaintext": "1", "key": "101" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["error"],
            "Key validation failed: key must be exactly 23 bits, got 3"
        );

        let (status, Json(body)) = encrypt_handler(request(json!({
            "plaintext": "XYZ",
            "key": KEY,
            "input_format": "char",
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Data validation failed:"));
    }

    #[tokio::test]
    async fn test_validate() {
        let (_, Json(body)) =
            validate_handler(request(json!({ "key": KEY, "data": "0101" }))).await;
        assert_eq!(body, json!({ "valid": true, "errors": [] }));

        let (_, Json(body)) = validate_handler(request(json!({
            "key": "1",
            "data": "abz",
            "input_format": "char",
        })))
        .await;
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"].as_array().map(Vec::len), Some(2));

        let (_, Json(body)) = validate_handler(request(json!({}))).await;
        assert_eq!(body["valid"], true);
    }

    #[tokio::test]
    async fn test_convert() {
        let (status, Json(body)) =
            convert_handler(request(json!({ "text": "Hag", "from_format": "char" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["converted"], "111000110");
        assert_eq!(body["to_format"], "binary");

        let (status, Json(body)) =
            convert_handler(request(json!({ "text": "111000", "from_format": "binary" }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["converted"], "HA");

        let (status, _) =
            convert_handler(request(json!({ "text": "1110", "from_format": "binary" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, Json(body)) =
            convert_handler(request(json!({ "text": "1", "from_format": "hex" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid from_format. Use \"char\" or \"binary\"");
    }

    #[tokio::test]
    async fn test_unknown_input_format_means_binary() {
        for format in [json!("hex"), json!("CHAR"), Value::Null] {
            let (status, Json(body)) = encrypt_handler(request(json!({
                "plaintext": "111",
                "key": KEY,
                "input_format": format.clone(),
                "verbose": null,
            })))
            .await;
            assert_eq!(status, StatusCode::OK, "input_format {format}");
            assert_eq!(body["ciphertext"], "010");
            assert_eq!(body["input_format"], "binary");
        }

        let (status, Json(body)) = decrypt_handler(request(json!({
            "ciphertext": "HEAD",
            "key": KEY,
            "input_format": "hex",
        })))
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Data validation failed:"));
    }

    #[tokio::test]
    async fn test_unreadable_body_is_json_400() {
        let (status, Json(body)) = encrypt_handler(raw_request("{not json").await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request body:"));

        let (status, Json(body)) = validate_handler(raw_request(r#"{"key": 5}"#).await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());

        let (status, _) = convert_handler(raw_request("[]").await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = decrypt_handler(raw_request("").await).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
