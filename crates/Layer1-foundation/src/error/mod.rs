//! Error types for PathStore
//!
//! 모든 에러를 중앙에서 관리

use crate::permission::Capability;
use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Message reported for every internal fault. The cause is never exposed.
pub const INTERNAL_FAULT_MESSAGE: &str = "Internal Server Error";

/// PathStore 에러 타입
#[derive(Error, Debug)]
pub enum Error {
    // ========================================================================
    // 권한 관련
    // ========================================================================
    #[error("{} access denied for key: {}", .capability.verb(), .key)]
    AccessDenied { key: String, capability: Capability },

    // ========================================================================
    // 경로 관련
    // ========================================================================
    #[error("Cannot create nested property under non-object key: {key}")]
    StructuralConflict { key: String },

    #[error("Cannot resolve '{segment}' in path: {path}")]
    LookupFailure { path: String, segment: String },

    // ========================================================================
    // 설정 관련
    // ========================================================================
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // ========================================================================
    // 외부 에러 변환
    // ========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ========================================================================
    // 기타
    // ========================================================================
    #[error("{}", INTERNAL_FAULT_MESSAGE)]
    InternalFault,
}

impl Error {
    /// 사용자에게 보여줄 수 있는 에러인지 확인
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            Error::AccessDenied { .. }
                | Error::StructuralConflict { .. }
                | Error::LookupFailure { .. }
                | Error::InvalidInput(_)
        )
    }

    /// Access denied 에러 생성 헬퍼
    pub fn access_denied(key: impl Into<String>, capability: Capability) -> Self {
        Error::AccessDenied {
            key: key.into(),
            capability,
        }
    }

    /// Structural conflict 에러 생성 헬퍼
    pub fn structural_conflict(key: impl Into<String>) -> Self {
        Error::StructuralConflict { key: key.into() }
    }

    /// Lookup failure 에러 생성 헬퍼
    pub fn lookup_failure(path: impl Into<String>, segment: impl Into<String>) -> Self {
        Error::LookupFailure {
            path: path.into(),
            segment: segment.into(),
        }
    }
}
