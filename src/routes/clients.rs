use axum::Json;
use axum::extract::{Multipart, OriginalUri, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::error::ErrorBody;
use crate::models::ClientInput;
use crate::server::AppState;
use crate::service::PhotoUpload;

/// Fields decoded from the multipart form: the client data plus the optional
/// photo part.
struct ClientForm {
    input: ClientInput,
    photo: Option<PhotoUpload>,
}

async fn read_form(mut multipart: Multipart) -> Result<ClientForm, String> {
    let mut input = ClientInput::default();
    let mut photo = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| e.to_string())? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        match name.as_str() {
            "name" => input.name = field.text().await.map_err(|e| e.to_string())?,
            "email" => input.email = field.text().await.map_err(|e| e.to_string())?,
            "cpf" => input.cpf = field.text().await.map_err(|e| e.to_string())?,
            "phone" => input.phone = field.text().await.map_err(|e| e.to_string())?,
            "photo" => {
                let file_name = field.file_name().unwrap_or("photo").to_string();
                let bytes = field.bytes().await.map_err(|e| e.to_string())?;
                photo = Some(PhotoUpload {
                    file_name,
                    bytes: bytes.to_vec(),
                });
            }
            _ => {}
        }
    }

    Ok(ClientForm { input, photo })
}

/// GET /api/clients
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<impl IntoResponse, ErrorBody> {
    let clients = state
        .service
        .get_all()
        .await
        .map_err(|e| ErrorBody::from_service(e, uri.path()))?;

    Ok(Json(clients))
}

/// POST /api/clients (multipart form)
pub async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    multipart: Multipart,
) -> Result<impl IntoResponse, ErrorBody> {
    let form = read_form(multipart)
        .await
        .map_err(|msg| ErrorBody::bad_request(msg, uri.path()))?;

    if let Err(errors) = form.input.validate() {
        return Err(ErrorBody::validation(&errors, uri.path()));
    }

    let created = state
        .service
        .create(form.input, form.photo)
        .await
        .map_err(|e| ErrorBody::from_service(e, uri.path()))?;

    Ok(Json(created))
}

/// GET /api/clients/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, ErrorBody> {
    let client = state
        .service
        .get_by_id(id)
        .await
        .map_err(|e| ErrorBody::from_service(e, uri.path()))?;

    Ok(Json(client))
}

/// PUT /api/clients/{id} (multipart form)
pub async fn update(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ErrorBody> {
    let form = read_form(multipart)
        .await
        .map_err(|msg| ErrorBody::bad_request(msg, uri.path()))?;

    if let Err(errors) = form.input.validate() {
        return Err(ErrorBody::validation(&errors, uri.path()));
    }

    let updated = state
        .service
        .update(id, form.input, form.photo)
        .await
        .map_err(|e| ErrorBody::from_service(e, uri.path()))?;

    Ok(Json(updated))
}

/// DELETE /api/clients/{id}
pub async fn delete(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<i64>,
) -> Result<StatusCode, ErrorBody> {
    state
        .service
        .delete(id)
        .await
        .map_err(|e| ErrorBody::from_service(e, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}
