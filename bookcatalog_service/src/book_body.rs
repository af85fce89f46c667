use actix_web::dev::Payload;
use actix_web::web::Bytes;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::LocalBoxFuture;
use paperclip::actix::OperationModifier;
use paperclip::v2::schema::Apiv2Schema;

use crate::api::BookInput;

/// Request body of create and update.
///
/// Only `application/json` bodies are parsed. A body with any other content type,
/// or an empty one, gives a `BookInput` with both fields missing, which is then
/// written as nulls. A json body that does not parse is still rejected with 400.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookBody(pub BookInput);

impl BookBody {
    pub fn into_inner(self) -> BookInput {
        self.0
    }
}

fn is_json(req: &HttpRequest) -> bool {
    req.content_type().eq_ignore_ascii_case("application/json")
}

impl FromRequest for BookBody {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let is_json = is_json(req);
        let bytes = Bytes::from_request(req, payload);

        Box::pin(async move {
            let body = bytes.await?;
            if !is_json || body.is_empty() {
                return Ok(BookBody::default());
            }
            serde_json::from_slice(&body)
                .map(BookBody)
                .map_err(actix_web::error::ErrorBadRequest)
        })
    }
}

impl Apiv2Schema for BookBody {}
impl OperationModifier for BookBody {}
