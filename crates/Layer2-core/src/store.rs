//! Store - 권한 기반 path 주소 객체 저장소
//!
//! 모든 접근은 `:` 구분 path를 통해서만 이루어진다.
//!
//! ## 권한 검사
//! 권한은 path의 **첫 segment** 하나로 한 번만 판정한다. 중첩 segment는
//! 따로 검사하지 않는다. 조회 순서:
//! 1. 타입 레지스트리에 선언된 레벨
//! 2. 없으면 인스턴스의 `default_policy`
//!
//! ## 사용법
//! ```
//! use pathstore_core::{PermissionLevel, PermissionRegistry, Store};
//! use std::sync::Arc;
//!
//! let registry = Arc::new(PermissionRegistry::new());
//! registry.declare("Account", "secret", PermissionLevel::Write).unwrap();
//!
//! let mut store = Store::with_registry("Account", registry);
//! store.write("profile:name", "ada").unwrap();
//! store.write("secret", "hunter2").unwrap();
//!
//! assert_eq!(store.read("profile:name").unwrap().as_str(), Some("ada"));
//! assert!(store.read("secret").is_err());
//! ```

use crate::path::StorePath;
use crate::value::{Object, Value};
use indexmap::IndexMap;
use pathstore_foundation::{
    registry, Capability, Error, PathStoreConfig, PermissionLevel, PermissionRegistry, Result,
    TypeKey, DEFAULT_POLICY,
};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace, warn};

/// Permission-gated, path-addressable object store
#[derive(Clone)]
pub struct Store {
    /// 타입 식별자 (레지스트리 키)
    type_key: TypeKey,

    /// 선언되지 않은 property에 적용되는 정책
    pub default_policy: PermissionLevel,

    /// 최상위 property (삽입 순서 유지)
    properties: Object,

    /// 타입별 권한 레지스트리 (모든 인스턴스 공유)
    registry: Arc<PermissionRegistry>,
}

impl Store {
    /// 전역 레지스트리를 사용하는 빈 store
    pub fn new(type_key: impl Into<TypeKey>) -> Self {
        Self::with_registry(type_key, Arc::clone(registry()))
    }

    /// 지정한 레지스트리를 사용하는 빈 store
    pub fn with_registry(type_key: impl Into<TypeKey>, registry: Arc<PermissionRegistry>) -> Self {
        Self {
            type_key: type_key.into(),
            default_policy: DEFAULT_POLICY,
            properties: Object::new(),
            registry,
        }
    }

    /// 설정 기반 store
    ///
    /// Declares the type's manifest (if the config has one) and takes the
    /// default policy from the config.
    pub fn from_config(
        type_key: impl Into<TypeKey>,
        config: &PathStoreConfig,
        registry: Arc<PermissionRegistry>,
    ) -> Result<Self> {
        let type_key = type_key.into();
        if let Some(manifest) = config.types.get(&type_key) {
            manifest.apply(&registry, &type_key)?;
        }
        let default_policy = config.default_policy_for(type_key.as_str());
        Ok(Self::with_registry(type_key, registry).with_default_policy(default_policy))
    }

    pub fn with_default_policy(mut self, level: PermissionLevel) -> Self {
        self.default_policy = level;
        self
    }

    pub fn type_key(&self) -> &TypeKey {
        &self.type_key
    }

    pub fn registry(&self) -> &Arc<PermissionRegistry> {
        &self.registry
    }

    pub(crate) fn properties(&self) -> &Object {
        &self.properties
    }

    pub(crate) fn properties_mut(&mut self) -> &mut Object {
        &mut self.properties
    }

    /// 최상위 property 개수 (권한 무관)
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    // ========================================================================
    // Authorization
    // ========================================================================

    /// `key`를 첫 segment로 하는 읽기 허용 여부
    pub fn allowed_to_read(&self, key: &str) -> Result<bool> {
        self.allowed(key, Capability::Read)
    }

    /// `key`를 첫 segment로 하는 쓰기 허용 여부
    pub fn allowed_to_write(&self, key: &str) -> Result<bool> {
        self.allowed(key, Capability::Write)
    }

    fn allowed(&self, key: &str, capability: Capability) -> Result<bool> {
        let level = self
            .registry
            .lookup(self.type_key.as_str(), key)?
            .unwrap_or(self.default_policy);
        Ok(level.permits(capability))
    }

    fn authorize(&self, path: &StorePath<'_>, capability: Capability) -> Result<()> {
        let key = path.auth_key();
        if self.allowed(key, capability)? {
            return Ok(());
        }
        warn!(
            type_key = %self.type_key,
            path = %path,
            key,
            capability = %capability,
            "access denied"
        );
        Err(Error::access_denied(key, capability))
    }

    // ========================================================================
    // Read
    // ========================================================================

    /// Path의 값 조회
    ///
    /// A stored `Null` comes back as `Value::Null`; a missing property is
    /// `Error::LookupFailure`. Lazy values are returned unevaluated.
    pub fn read(&self, path: &str) -> Result<&Value> {
        let path = StorePath::parse(path);
        self.authorize(&path, Capability::Read)?;

        let mut current: Option<&Value> = None;
        for segment in path.segments() {
            let next = match current {
                None => self.properties.get(segment),
                Some(value) => value.child(segment),
            };
            current = Some(next.ok_or_else(|| {
                debug!(type_key = %self.type_key, path = %path, segment, "lookup failed");
                Error::lookup_failure(path.as_str(), segment)
            })?);
        }

        let value = current.ok_or_else(|| Error::lookup_failure(path.as_str(), path.target()))?;
        trace!(type_key = %self.type_key, path = %path, kind = value.kind(), "read");
        Ok(value)
    }

    /// Path의 값 조회 (Lazy 평가)
    pub fn read_evaluated(&self, path: &str) -> Result<Value> {
        self.read(path).map(Value::evaluate)
    }

    // ========================================================================
    // Write
    // ========================================================================

    /// Path에 값 저장, 값을 담은 컨테이너 반환
    ///
    /// Missing intermediates are created as empty objects. An existing
    /// intermediate that is not an object or store is a structural conflict.
    pub fn write(&mut self, path: &str, value: impl Into<Value>) -> Result<&mut Object> {
        let path = StorePath::parse(path);
        self.authorize(&path, Capability::Write)?;

        let type_key = &self.type_key;
        let mut container = &mut self.properties;
        for segment in path.prefix() {
            let slot = container
                .entry(segment.to_string())
                .or_insert_with(Value::object);
            let kind = slot.kind();
            container = slot.container_mut().ok_or_else(|| {
                warn!(type_key = %type_key, path = %path, segment = *segment, kind, "structural conflict");
                Error::structural_conflict(*segment)
            })?;
        }

        let value = value.into();
        debug!(type_key = %type_key, path = %path, kind = value.kind(), "write");
        container.insert(path.target().to_string(), value);
        Ok(container)
    }

    /// 여러 path 순서대로 저장
    ///
    /// Stops at the first failure. Writes already applied are kept.
    pub fn write_entries<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        for (path, value) in entries {
            self.write(path.as_ref(), value)?;
        }
        Ok(())
    }

    /// JSON object의 각 항목을 path로 저장
    ///
    /// Entries are applied in document order.
    pub fn write_json(&mut self, entries: &serde_json::Map<String, serde_json::Value>) -> Result<()> {
        self.write_entries(
            entries
                .iter()
                .map(|(path, value)| (path, Value::from(value.clone()))),
        )
    }

    // ========================================================================
    // Entries
    // ========================================================================

    /// 읽기 허용된 최상위 property (얕은 스냅샷)
    pub fn entries(&self) -> Result<IndexMap<&str, &Value>> {
        let mut entries = IndexMap::with_capacity(self.properties.len());
        for (key, value) in &self.properties {
            if self.allowed_to_read(key)? {
                entries.insert(key.as_str(), value);
            }
        }
        Ok(entries)
    }

    /// 읽기 허용된 최상위 property의 JSON 표현
    pub fn to_json(&self) -> Result<serde_json::Value> {
        let mut out = serde_json::Map::new();
        for (key, value) in self.entries()? {
            out.insert(key.to_string(), value.to_json()?);
        }
        Ok(serde_json::Value::Object(out))
    }
}

impl fmt::Debug for Store {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Store")
            .field("type_key", &self.type_key)
            .field("default_policy", &self.default_policy)
            .field("properties", &self.properties)
            .finish()
    }
}

/// Stores compare by type, policy and contents; the registry handle is ignored.
impl PartialEq for Store {
    fn eq(&self, other: &Self) -> bool {
        self.type_key == other.type_key
            && self.default_policy == other.default_policy
            && self.properties == other.properties
    }
}
