//! Attachment endpoints under `/api/v1/attachments`

use actix_web::{web, HttpResponse};
use validator::Validate;

use om_shared::ApiResponse;

use crate::app::AppState;
use crate::dto::{AttachmentTypeResponse, OrderResponse, UploadAttachmentRequest};
use crate::handlers::{handle_domain_error, validation_error_response};
use crate::middleware::CurrentUser;

use super::parse_id;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/attachments")
            .route("/upload/order/{order_id}", web::post().to(upload_attachment_for_order))
            .route("/types", web::get().to(list_attachment_types)),
    );
}

/// Handler for POST /api/v1/attachments/upload/order/{order_id}
///
/// Stores the decoded file, then links it to the order. The order is looked
/// up first so no file is written for an unknown order. An upload that
/// cannot be linked is discarded again.
pub async fn upload_attachment_for_order(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<String>,
    request: web::Json<UploadAttachmentRequest>,
) -> HttpResponse {
    if let Err(errors) = request.validate() {
        return validation_error_response(&errors);
    }

    log::info!("Uploading attachment for order: {}", path.as_str());

    let result = async {
        let order_id = parse_id(&path, "Order")?;
        state.orders.get_order_by_id(order_id).await?;

        let bytes = request.decode_content()?;
        let attachment = state
            .attachments
            .upload_attachment(&request.attachment_type, &request.file_name, &bytes)
            .await?;

        let linked = state
            .orders
            .add_attachment(order_id, attachment.clone(), Some(user.username()))
            .await;
        if linked.is_err() {
            state.attachments.discard_attachment(&attachment).await;
        }
        linked
    }
    .await;

    match result {
        Ok(order) => HttpResponse::Created().json(ApiResponse::success(
            "Attachment uploaded and added to order successfully",
            OrderResponse::from(order),
        )),
        Err(e) => handle_domain_error(e),
    }
}

pub async fn list_attachment_types(state: web::Data<AppState>) -> HttpResponse {
    match state.attachments.list_attachment_types().await {
        Ok(types) => {
            let types: Vec<AttachmentTypeResponse> = types.into_iter().map(Into::into).collect();
            HttpResponse::Ok().json(ApiResponse::success(
                "Attachment types retrieved successfully",
                types,
            ))
        }
        Err(e) => handle_domain_error(e),
    }
}
