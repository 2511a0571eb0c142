//! # pathstore-foundation
//!
//! Foundation layer for PathStore:
//! - Error: 중앙 에러 타입 (AccessDenied, StructuralConflict, LookupFailure, InternalFault)
//! - Permission: 권한 레벨 + 타입별 레지스트리 + JSON manifest
//! - Config: 통합 설정 (PathStoreConfig, pathstore.json)
//!
//! ## 아키텍처
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │  Store (pathstore-core)                                 │
//! │    read / write / entries                               │
//! │                     │                                   │
//! │                     ▼                                   │
//! │     PermissionRegistry (type -> property -> level)      │
//! │                     │  없으면                            │
//! │                     ▼                                   │
//! │              default policy (rw)                        │
//! │                     ▲                                   │
//! │        PathStoreConfig / PermissionManifest (JSON)      │
//! └─────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod permission;

// ============================================================================
// Error
// ============================================================================
pub use error::{Error, Result, INTERNAL_FAULT_MESSAGE};

// ============================================================================
// Permission (권한 시스템)
// ============================================================================
pub use permission::{
    declare_permission, registry, restrict, Capability, PermissionLevel, PermissionManifest,
    PermissionRegistry, TypeKey,
};

// ============================================================================
// Config (설정)
// ============================================================================
pub use config::{PathStoreConfig, CONFIG_DIR_NAME, DEFAULT_POLICY, PATHSTORE_CONFIG_FILE};

