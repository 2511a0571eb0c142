//! Permission manifest 저장/로드
//!
//! 코드 대신 JSON으로 타입별 권한을 선언할 때 사용

use super::level::PermissionLevel;
use super::registry::{PermissionRegistry, TypeKey};
use crate::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 한 store 타입의 권한 선언
///
/// ```json
/// { "defaultPolicy": "r", "permissions": { "secret": "w" } }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PermissionManifest {
    /// 선언되지 않은 property에 적용할 기본 정책 (없으면 전역 기본값)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<PermissionLevel>,

    /// property 이름 -> 권한 레벨
    #[serde(default)]
    pub permissions: BTreeMap<String, PermissionLevel>,
}

impl PermissionManifest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_policy(mut self, level: PermissionLevel) -> Self {
        self.default_policy = Some(level);
        self
    }

    pub fn permission(mut self, property: impl Into<String>, level: PermissionLevel) -> Self {
        self.permissions.insert(property.into(), level);
        self
    }

    /// 레지스트리에 선언 적용
    pub fn apply(&self, registry: &PermissionRegistry, type_key: &TypeKey) -> Result<()> {
        for (property, level) in &self.permissions {
            registry.declare(type_key, property.as_str(), *level)?;
        }
        Ok(())
    }

    /// 다른 manifest 병합 (다른 쪽이 우선)
    pub fn merge(&mut self, other: PermissionManifest) {
        if other.default_policy.is_some() {
            self.default_policy = other.default_policy;
        }
        self.permissions.extend(other.permissions);
    }
}
