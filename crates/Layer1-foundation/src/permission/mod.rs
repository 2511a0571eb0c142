//! Permission system for PathStore
//!
//! - `level`: 권한 레벨 (`none` / `r` / `w` / `rw`)
//! - `registry`: 타입별 권한 등록/조회 (PermissionRegistry)
//! - `manifest`: JSON 권한 선언 (PermissionManifest)
//!
//! ## 사용 예시
//!
//! ```rust
//! use pathstore_foundation::permission::{declare_permission, registry, PermissionLevel};
//!
//! // 타입 정의 시점에 등록
//! declare_permission("Account", "secret", PermissionLevel::Write).unwrap();
//!
//! // 권한 확인
//! let level = registry().lookup("Account", "secret").unwrap();
//! assert_eq!(level, Some(PermissionLevel::Write));
//! ```

mod level;
mod manifest;
mod registry;

// Level
pub use level::{Capability, PermissionLevel};

// Manifest (JSON 선언)
pub use manifest::PermissionManifest;

// Registry (타입별 등록)
pub use registry::{declare_permission, registry, restrict, PermissionRegistry, TypeKey};
