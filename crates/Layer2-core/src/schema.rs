//! Store Schema - 타입 정의 시점 권한 선언
//!
//! 타입별 권한을 코드로 선언한다. 레지스트리 등록은 타입당 한 번만 일어난다.
//!
//! ```
//! use pathstore_core::{PermissionLevel, Store, StoreSchema};
//!
//! struct Account;
//!
//! impl StoreSchema for Account {
//!     const TYPE_NAME: &'static str = "doc.Account";
//!
//!     fn permissions() -> Vec<(&'static str, PermissionLevel)> {
//!         vec![("secret", PermissionLevel::Write), ("hidden", PermissionLevel::None)]
//!     }
//! }
//!
//! let mut account = Store::of::<Account>().unwrap();
//! account.write("secret", "hunter2").unwrap();
//! assert!(account.read("secret").is_err());
//! ```

use crate::store::Store;
use pathstore_foundation::{registry, PermissionLevel, PermissionRegistry, Result, DEFAULT_POLICY};
use std::sync::Arc;
use tracing::debug;

/// Definition of a store type
pub trait StoreSchema {
    /// Stable type name used as the registry key
    const TYPE_NAME: &'static str;

    /// Declared property permissions
    fn permissions() -> Vec<(&'static str, PermissionLevel)> {
        Vec::new()
    }

    /// Policy for properties not listed in [`StoreSchema::permissions`]
    fn default_policy() -> PermissionLevel {
        DEFAULT_POLICY
    }
}

impl Store {
    /// 스키마 타입의 store 생성 (전역 레지스트리)
    pub fn of<S: StoreSchema>() -> Result<Self> {
        Self::of_in::<S>(Arc::clone(registry()))
    }

    /// 스키마 타입의 store 생성 (지정 레지스트리)
    pub fn of_in<S: StoreSchema>(registry: Arc<PermissionRegistry>) -> Result<Self> {
        if registry.define(S::TYPE_NAME, S::permissions())? {
            debug!(type_key = S::TYPE_NAME, "store type defined");
        }
        Ok(Self::with_registry(S::TYPE_NAME, registry).with_default_policy(S::default_policy()))
    }
}
