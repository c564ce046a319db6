//! Product CRUD routes.
//!
//! Create and update accept multipart forms (text fields plus image files)
//! and forward them upstream as multipart; the back-office never persists
//! images itself.

use axum::{
    Json,
    extract::{Multipart, Path, State},
};
use serde::Serialize;
use tracing::{info, instrument};

use glowella_core::catalog::Product;
use glowella_core::types::ProductId;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminAuth;
use crate::routes::Envelope;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProductListBody {
    pub products: Vec<Product>,
}

#[derive(Debug, Serialize)]
pub struct ProductBody {
    pub product: Product,
}

#[derive(Debug, Serialize)]
pub struct DeletedBody {}

/// Convert an incoming multipart body into an upstream multipart form.
///
/// Field names pass through untouched; the Commerce API defines the schema
/// and rejects anything it doesn't recognize.
async fn to_upstream_form(mut multipart: Multipart) -> Result<reqwest::multipart::Form> {
    let mut form = reqwest::multipart::Form::new();
    let mut field_count = 0usize;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        let Some(name) = field.name().map(ToString::to_string) else {
            return Err(AppError::BadRequest(
                "multipart field without a name".to_string(),
            ));
        };
        let file_name = field.file_name().map(ToString::to_string);
        let content_type = field.content_type().map(ToString::to_string);
        let data = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed reading field {name}: {e}")))?;

        let mut part = reqwest::multipart::Part::bytes(data.to_vec());
        if let Some(file_name) = file_name {
            part = part.file_name(file_name);
        }
        if let Some(content_type) = content_type {
            part = part
                .mime_str(&content_type)
                .map_err(|e| AppError::BadRequest(format!("invalid content type: {e}")))?;
        }
        form = form.part(name, part);
        field_count += 1;
    }

    if field_count == 0 {
        return Err(AppError::Validation("empty product form".to_string()));
    }
    Ok(form)
}

/// GET /products
#[instrument(skip(state, admin))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
) -> Result<Json<Envelope<ProductListBody>>> {
    let products = state.api().list_products(&admin.token).await?;
    Ok(Envelope::ok(ProductListBody { products }))
}

/// POST /products - create from a multipart form.
#[instrument(skip(state, admin, multipart))]
pub async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    multipart: Multipart,
) -> Result<Json<Envelope<ProductBody>>> {
    let form = to_upstream_form(multipart).await?;
    let product = state.api().create_product(&admin.token, form).await?;
    info!(id = %product.id, name = %product.name, "product created");
    Ok(Envelope::ok(ProductBody { product }))
}

/// POST /products/{id} - update; the upstream treats it as a full replacement.
#[instrument(skip(state, admin, multipart))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<Json<Envelope<ProductBody>>> {
    let id = ProductId::from(id);
    let form = to_upstream_form(multipart).await?;
    let product = state.api().update_product(&admin.token, &id, form).await?;
    info!(%id, "product updated");
    Ok(Envelope::ok(ProductBody { product }))
}

/// DELETE /products/{id}
#[instrument(skip(state, admin))]
pub async fn remove(
    State(state): State<AppState>,
    RequireAdminAuth(admin): RequireAdminAuth,
    Path(id): Path<String>,
) -> Result<Json<Envelope<DeletedBody>>> {
    let id = ProductId::from(id);
    state.api().delete_product(&admin.token, &id).await?;
    info!(%id, "product deleted");
    Ok(Envelope::ok(DeletedBody {}))
}
