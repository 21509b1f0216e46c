//! Response envelope.
//!
//! Every JSON body is `{status, message?, payload?}`. Handlers return a
//! [`Reply`] on success and a `StatusError` on failure; the [`error_envelope`]
//! catcher rewrites error responses into the same shape.

use salvo::{
    catcher::Catcher,
    http::ResBody,
    oapi::{Components, EndpointOutRegister, Operation, ToSchema},
    prelude::*,
};
use serde::{Deserialize, Serialize};

/// Envelope status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub(crate) enum EnvelopeStatus {
    Success,
    Error,
    Warning,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub(crate) struct Envelope<T> {
    pub status: EnvelopeStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payload: Option<T>,
}

impl Envelope<()> {
    pub(crate) fn error(message: impl Into<String>) -> Self {
        Self {
            status: EnvelopeStatus::Error,
            message: Some(message.into()),
            payload: None,
        }
    }
}

/// Payload type of message-only replies.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct NoPayload {}

/// A successful (or warning) response with its status code.
#[derive(Debug)]
pub(crate) struct Reply<T> {
    status_code: StatusCode,
    envelope: Envelope<T>,
}

impl<T> Reply<T> {
    /// 200 with a payload.
    pub(crate) fn ok(payload: T) -> Self {
        Self::success(StatusCode::OK, payload)
    }

    /// 201 with a payload.
    pub(crate) fn created(payload: T) -> Self {
        Self::success(StatusCode::CREATED, payload)
    }

    fn success(status_code: StatusCode, payload: T) -> Self {
        Self {
            status_code,
            envelope: Envelope {
                status: EnvelopeStatus::Success,
                message: None,
                payload: Some(payload),
            },
        }
    }

    /// A warning carries a client error status, but still returns a payload.
    pub(crate) fn warning(status_code: StatusCode, message: impl Into<String>, payload: T) -> Self {
        Self {
            status_code,
            envelope: Envelope {
                status: EnvelopeStatus::Warning,
                message: Some(message.into()),
                payload: Some(payload),
            },
        }
    }

    #[must_use]
    pub(crate) fn with_message(mut self, message: impl Into<String>) -> Self {
        self.envelope.message = Some(message.into());
        self
    }
}

impl Reply<NoPayload> {
    /// 200 with only a message.
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::OK,
            envelope: Envelope {
                status: EnvelopeStatus::Success,
                message: Some(message.into()),
                payload: None,
            },
        }
    }
}

impl<T> Scribe for Reply<T>
where
    T: Serialize + Send,
{
    fn render(self, res: &mut Response) {
        res.status_code(self.status_code);
        res.render(Json(self.envelope));
    }
}

impl<T> EndpointOutRegister for Reply<T>
where
    T: ToSchema,
{
    fn register(components: &mut Components, operation: &mut Operation) {
        let schema = T::to_schema(components);

        operation.responses.insert(
            "200",
            salvo::oapi::Response::new("Enveloped payload").add_content("application/json", schema),
        );
    }
}

/// Catcher hoop that renders error responses as envelopes.
///
/// The message is the error's brief, or the canonical reason for the status.
#[handler]
pub(crate) async fn error_envelope(res: &mut Response, ctrl: &mut FlowCtrl) {
    let status = res.status_code.unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let message = match &res.body {
        ResBody::Error(error) if !error.brief.is_empty() => error.brief.clone(),
        ResBody::None | ResBody::Error(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_owned(),
        _ => return,
    };

    res.body = ResBody::None;
    res.status_code(status);
    res.render(Json(Envelope::error(message)));

    ctrl.skip_rest();
}

/// Wrap a router in a service whose errors are rendered as envelopes.
pub(crate) fn service(router: Router) -> Service {
    Service::new(router).catcher(Catcher::default().hoop(error_envelope))
}
