//! 권한 레지스트리 (타입별 side-table)
//!
//! 각 store 타입이 정의 시점에 자신의 property 권한을 등록하고,
//! 런타임에는 조회만 한다. 타입의 모든 인스턴스가 같은 테이블을 공유한다.

use super::level::PermissionLevel;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::{Borrow, Cow};
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::{Arc, OnceLock, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, error};

/// Identity of a store type (a stable type name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeKey(Cow<'static, str>);

impl TypeKey {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for TypeKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TypeKey {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for TypeKey {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<&TypeKey> for TypeKey {
    fn from(key: &TypeKey) -> Self {
        key.clone()
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

type PermissionTable = HashMap<String, PermissionLevel>;

#[derive(Default)]
struct Tables {
    /// 타입별 권한 테이블 (type -> property -> level)
    permissions: HashMap<TypeKey, PermissionTable>,

    /// `define`이 이미 적용된 타입
    defined: HashSet<TypeKey>,
}

/// 권한 레지스트리
pub struct PermissionRegistry {
    tables: RwLock<Tables>,
}

impl PermissionRegistry {
    /// 새 레지스트리 생성
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(Tables::default()),
        }
    }

    fn read_tables(&self, type_key: &str) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables.read().map_err(|e| {
            error!(type_key, "permission registry poisoned: {}", e);
            Error::InternalFault
        })
    }

    fn write_tables(&self, type_key: &str) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables.write().map_err(|e| {
            error!(type_key, "permission registry poisoned: {}", e);
            Error::InternalFault
        })
    }

    /// 권한 등록
    ///
    /// The type's table is created on first use. Redeclaring a property
    /// overwrites the previous level.
    pub fn declare(
        &self,
        type_key: impl Into<TypeKey>,
        property: impl Into<String>,
        level: PermissionLevel,
    ) -> Result<()> {
        let type_key = type_key.into();
        let property = property.into();
        let mut tables = self.write_tables(type_key.as_str())?;
        debug!(type_key = %type_key, property = %property, level = %level, "declare permission");
        tables
            .permissions
            .entry(type_key)
            .or_default()
            .insert(property, level);
        Ok(())
    }

    /// 기본 레벨(`none`)로 권한 등록
    pub fn declare_default(
        &self,
        type_key: impl Into<TypeKey>,
        property: impl Into<String>,
    ) -> Result<()> {
        self.declare(type_key, property, PermissionLevel::default())
    }

    /// 타입 정의 (한 번만 적용)
    ///
    /// Declarations are merged into whatever the type already has, each one
    /// overwriting an earlier level for the same property. Returns `false`
    /// without touching the table when the type was already defined.
    pub fn define<I, P>(&self, type_key: impl Into<TypeKey>, declarations: I) -> Result<bool>
    where
        I: IntoIterator<Item = (P, PermissionLevel)>,
        P: Into<String>,
    {
        let type_key = type_key.into();
        let mut tables = self.write_tables(type_key.as_str())?;
        if tables.defined.contains(&type_key) {
            return Ok(false);
        }

        let table = tables.permissions.entry(type_key.clone()).or_default();
        let mut count = 0;
        for (property, level) in declarations {
            table.insert(property.into(), level);
            count += 1;
        }
        debug!(type_key = %type_key, count, "define store type");
        tables.defined.insert(type_key);
        Ok(true)
    }

    /// 권한 조회
    ///
    /// `Ok(None)` means nothing is declared for `property` (or the type has
    /// no table at all); callers fall back to their default policy.
    pub fn lookup(&self, type_key: &str, property: &str) -> Result<Option<PermissionLevel>> {
        let tables = self.read_tables(type_key)?;
        Ok(tables
            .permissions
            .get(type_key)
            .and_then(|table| table.get(property))
            .copied())
    }

    /// `define`이 적용된 타입인지 확인
    pub fn is_defined(&self, type_key: &str) -> Result<bool> {
        Ok(self.read_tables(type_key)?.defined.contains(type_key))
    }

    /// 타입의 권한 목록 (이름순)
    pub fn declarations(&self, type_key: &str) -> Result<Vec<(String, PermissionLevel)>> {
        let tables = self.read_tables(type_key)?;
        let mut entries: Vec<_> = tables
            .permissions
            .get(type_key)
            .map(|table| table.iter().map(|(k, v)| (k.clone(), *v)).collect())
            .unwrap_or_default();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(entries)
    }

    /// 권한이 등록된 타입 목록
    pub fn types(&self) -> Result<Vec<TypeKey>> {
        let tables = self.read_tables("*")?;
        let mut keys: Vec<_> = tables.permissions.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

impl Default for PermissionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for PermissionRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.types() {
            Ok(types) => f
                .debug_struct("PermissionRegistry")
                .field("types", &types)
                .finish(),
            Err(_) => f.write_str("PermissionRegistry(<poisoned>)"),
        }
    }
}

// 전역 레지스트리
static REGISTRY: OnceLock<Arc<PermissionRegistry>> = OnceLock::new();

/// 전역 권한 레지스트리 접근
pub fn registry() -> &'static Arc<PermissionRegistry> {
    REGISTRY.get_or_init(|| Arc::new(PermissionRegistry::new()))
}

/// 권한 등록 (편의 함수)
pub fn declare_permission(
    type_key: impl Into<TypeKey>,
    property: impl Into<String>,
    level: PermissionLevel,
) -> Result<()> {
    registry().declare(type_key, property, level)
}

/// 접근 차단 (`none`) 등록 (편의 함수)
pub fn restrict(type_key: impl Into<TypeKey>, property: impl Into<String>) -> Result<()> {
    registry().declare_default(type_key, property)
}
