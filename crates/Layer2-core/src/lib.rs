//! pathstore-core: Core engine for PathStore
//!
//! Layer2 - 권한 기반 path 주소 객체 저장소
//!
//! # 주요 모듈
//!
//! - `store`: Store (read / write / write_entries / entries)
//! - `path`: `:` 구분 path 파싱
//! - `value`: store 트리 노드 (JSON + 중첩 Store + Lazy)
//! - `schema`: 타입 정의 시점 권한 선언 (StoreSchema)
//!
//! # 사용 예시
//!
//! ```
//! use pathstore_core::{Error, Store};
//!
//! let mut store = Store::new("example.Settings");
//! store.write("theme:colors:primary", "#336699").unwrap();
//! store.write("volume", 3).unwrap();
//!
//! assert_eq!(store.read("theme:colors:primary").unwrap().as_str(), Some("#336699"));
//! assert!(matches!(
//!     store.write("volume:level", 1),
//!     Err(Error::StructuralConflict { .. })
//! ));
//! ```

pub mod path;
pub mod schema;
pub mod store;
pub mod value;

// Re-exports: Store
pub use path::{StorePath, SEPARATOR};
pub use schema::StoreSchema;
pub use store::Store;
pub use value::{Lazy, Object, Value};

// Re-exports: Foundation
pub use pathstore_foundation::{
    declare_permission, registry, restrict, Capability, Error, PathStoreConfig, PermissionLevel,
    PermissionManifest, PermissionRegistry, Result, TypeKey,
};
