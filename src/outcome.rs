use std::fmt::{self, Display};

use crate::error::Fault;

/// Outcome status reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusCode {
    Ok,
    BadRequest,
    Unauthorized,
    Forbidden,
    NotFound,
    InternalServerError,
    BadGateway,
    ServiceUnavailable,
    GatewayTimeout,
}

impl StatusCode {
    /// Failure kinds in the order fault descriptions are scanned.
    pub const FAULT_ORDER: [StatusCode; 8] = [
        StatusCode::BadRequest,
        StatusCode::Unauthorized,
        StatusCode::Forbidden,
        StatusCode::NotFound,
        StatusCode::InternalServerError,
        StatusCode::BadGateway,
        StatusCode::ServiceUnavailable,
        StatusCode::GatewayTimeout,
    ];

    pub fn code(self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::BadRequest => 400,
            StatusCode::Unauthorized => 401,
            StatusCode::Forbidden => 403,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
            StatusCode::BadGateway => 502,
            StatusCode::ServiceUnavailable => 503,
            StatusCode::GatewayTimeout => 504,
        }
    }

    /// Maps a numeric failure code onto a known kind.
    pub fn from_fault_code(code: u16) -> Option<Self> {
        Self::FAULT_ORDER.into_iter().find(|s| s.code() == code)
    }

    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }
}

impl Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StatusCode::Ok => "OK",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::Unauthorized => "Unauthorized",
            StatusCode::Forbidden => "Forbidden",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
            StatusCode::BadGateway => "Bad Gateway",
            StatusCode::ServiceUnavailable => "Service Unavailable",
            StatusCode::GatewayTimeout => "Gateway Timeout",
        };
        write!(f, "{} {label}", self.code())
    }
}

/// Uniform return value of read operations.
///
/// The status is `Ok` exactly when no fault is attached. An OK outcome may
/// still carry no payload.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    status: StatusCode,
    payload: Option<T>,
    fault: Option<Fault>,
}

impl<T> Outcome<T> {
    pub fn ok(payload: Option<T>) -> Self {
        Self {
            status: StatusCode::Ok,
            payload,
            fault: None,
        }
    }

    pub fn failed(status: StatusCode, fault: Fault) -> Self {
        debug_assert!(!status.is_ok(), "a failed outcome needs a failure status");
        Self {
            status,
            payload: None,
            fault: Some(fault),
        }
    }

    /// Local input rejection, reported as Bad Request.
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failed(StatusCode::BadRequest, Fault::precondition(message))
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn is_ok(&self) -> bool {
        self.status.is_ok()
    }

    pub fn payload(&self) -> Option<&T> {
        self.payload.as_ref()
    }

    pub fn into_payload(self) -> Option<T> {
        self.payload
    }

    pub fn fault(&self) -> Option<&Fault> {
        self.fault.as_ref()
    }

    pub fn into_fault(self) -> Option<Fault> {
        self.fault
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        Outcome {
            status: self.status,
            payload: self.payload.map(f),
            fault: self.fault,
        }
    }

    /// Re-types a failed outcome, dropping any payload.
    pub(crate) fn cast_failure<U>(self) -> Outcome<U> {
        Outcome {
            status: self.status,
            payload: None,
            fault: self.fault,
        }
    }
}

/// Return value of mutation commands (add, update, close, delete).
#[derive(Debug, Clone, PartialEq)]
pub struct MutationResult {
    pub succeeded: bool,
    /// Identifier of the created or updated entity, 0 when none was returned.
    pub id: u64,
    pub status: StatusCode,
    pub fault: Option<Fault>,
}

impl MutationResult {
    pub fn success(id: u64) -> Self {
        Self {
            succeeded: true,
            id,
            status: StatusCode::Ok,
            fault: None,
        }
    }

    pub fn failure(status: StatusCode, fault: Fault) -> Self {
        debug_assert!(!status.is_ok());
        Self {
            succeeded: false,
            id: 0,
            status,
            fault: Some(fault),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::failure(StatusCode::BadRequest, Fault::precondition(message))
    }

    /// Carries the failure of a prerequisite read into a mutation result.
    pub(crate) fn from_failed<T>(outcome: Outcome<T>) -> Self {
        let status = outcome.status();
        match outcome.into_fault() {
            Some(fault) => Self::failure(status, fault),
            None => Self::rejected("prerequisite lookup returned no data"),
        }
    }
}
