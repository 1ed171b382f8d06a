use actix_web::{
    error,
    http::{header::ContentType, StatusCode},
    HttpResponse,
};
use derive_more::{Display, Error};

/// Coarse error discrimination used by the transactional applier: validation
/// errors are re-raised unchanged, everything else is rolled up into
/// `MembershipUpdateFailed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Internal,
}

#[derive(Debug, Display, Error)]
pub enum Error {
    #[display("An internal error occured. Please try again later")]
    InternalError,
    #[display("Device group does not exist")]
    GroupDoesNotExist,
    #[display("Device group is not attached to a team")]
    GroupHasNoTeam,
    #[display("Invalid device id")]
    InvalidDeviceId,
    #[display("Some of the requested devices cannot be added to this group")]
    DevicesCannotBeAdded,
    #[display("Some of the requested devices cannot be removed from this group")]
    DevicesCannotBeRemoved,
    #[display("Failed to update device group membership: {_0}")]
    MembershipUpdateFailed(#[error(not(source))] String),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::GroupDoesNotExist
            | Self::GroupHasNoTeam
            | Self::InvalidDeviceId
            | Self::DevicesCannotBeAdded
            | Self::DevicesCannotBeRemoved => ErrorKind::Validation,
            Self::InternalError | Self::MembershipUpdateFailed(_) => ErrorKind::Internal,
        }
    }
}

impl From<diesel::result::Error> for Error {
    fn from(err: diesel::result::Error) -> Self {
        Self::MembershipUpdateFailed(err.to_string())
    }
}

impl error::ResponseError for Error {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::plaintext())
            .body(self.to_string())
    }

    fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
