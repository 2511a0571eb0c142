//! PathStore Config - 통합 설정
//!
//! 전역 기본 정책과 타입별 권한 manifest를 관리하는 PathStoreConfig

use crate::permission::{PermissionLevel, PermissionManifest, PermissionRegistry, TypeKey};
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;

/// 설정 파일명
pub const PATHSTORE_CONFIG_FILE: &str = "pathstore.json";

/// 설정 디렉토리 이름 (글로벌: `pathstore/`, 프로젝트: `.pathstore/`)
pub const CONFIG_DIR_NAME: &str = "pathstore";

/// Default policy applied when neither the type nor the config names one
pub const DEFAULT_POLICY: PermissionLevel = PermissionLevel::ReadWrite;

// ============================================================================
// PathStore Config (통합)
// ============================================================================

/// PathStore 통합 설정
///
/// ```json
/// {
///   "defaultPolicy": "rw",
///   "types": {
///     "Account": { "defaultPolicy": "r", "permissions": { "secret": "w" } }
///   }
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PathStoreConfig {
    /// 전역 기본 정책
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_policy: Option<PermissionLevel>,

    /// 타입별 권한 선언
    #[serde(default)]
    pub types: BTreeMap<TypeKey, PermissionManifest>,
}

impl PathStoreConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Load / Save
    // ========================================================================

    /// 글로벌 설정 디렉토리 (~/.config/pathstore/)
    pub fn global_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(CONFIG_DIR_NAME))
            .ok_or_else(|| Error::Config("Cannot find config directory".to_string()))
    }

    /// 프로젝트 설정 디렉토리 (<root>/.pathstore/)
    pub fn project_dir(root: &Path) -> PathBuf {
        root.join(format!(".{}", CONFIG_DIR_NAME))
    }

    /// 글로벌 + 프로젝트 병합 로드
    pub fn load() -> Result<Self> {
        let mut config = Self::new();

        // 1. 글로벌 설정
        if let Ok(dir) = Self::global_dir() {
            if let Some(global) = Self::load_file(&dir.join(PATHSTORE_CONFIG_FILE))? {
                config.merge(global);
            }
        }

        // 2. 프로젝트 설정
        if let Ok(cwd) = std::env::current_dir() {
            let path = Self::project_dir(&cwd).join(PATHSTORE_CONFIG_FILE);
            if let Some(project) = Self::load_file(&path)? {
                config.merge(project);
            }
        }

        Ok(config)
    }

    /// 디렉토리의 `pathstore.json` 로드 (없으면 기본값)
    pub fn load_from(dir: &Path) -> Result<Self> {
        Ok(Self::load_file(&dir.join(PATHSTORE_CONFIG_FILE))?.unwrap_or_default())
    }

    /// 설정 파일 로드 (없으면 `None`)
    pub fn load_file(path: &Path) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        debug!(path = %path.display(), "load config");
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// 디렉토리에 `pathstore.json` 저장 (디렉토리 자동 생성)
    pub fn save_to(&self, dir: &Path) -> Result<()> {
        std::fs::create_dir_all(dir)
            .map_err(|e| Error::Config(format!("Failed to create {}: {}", dir.display(), e)))?;
        let path = dir.join(PATHSTORE_CONFIG_FILE);
        debug!(path = %path.display(), "save config");
        std::fs::write(&path, serde_json::to_string_pretty(self)?)
            .map_err(|e| Error::Config(format!("Failed to write {}: {}", path.display(), e)))
    }

    // ========================================================================
    // Merge
    // ========================================================================

    /// 다른 설정과 병합 (other가 우선)
    pub fn merge(&mut self, other: PathStoreConfig) {
        if other.default_policy.is_some() {
            self.default_policy = other.default_policy;
        }
        for (type_key, manifest) in other.types {
            self.types.entry(type_key).or_default().merge(manifest);
        }
    }

    // ========================================================================
    // Query / Apply
    // ========================================================================

    /// 전역 기본 정책
    pub fn default_policy(&self) -> PermissionLevel {
        self.default_policy.unwrap_or(DEFAULT_POLICY)
    }

    /// 타입별 기본 정책 (타입 설정 > 전역 설정 > `rw`)
    pub fn default_policy_for(&self, type_key: &str) -> PermissionLevel {
        self.types
            .get(type_key)
            .and_then(|manifest| manifest.default_policy)
            .unwrap_or_else(|| self.default_policy())
    }

    /// 모든 타입의 권한을 레지스트리에 등록
    pub fn apply(&self, registry: &PermissionRegistry) -> Result<()> {
        for (type_key, manifest) in &self.types {
            debug!(type_key = %type_key, count = manifest.permissions.len(), "apply manifest");
            manifest.apply(registry, type_key)?;
        }
        Ok(())
    }

    // ========================================================================
    // Builder
    // ========================================================================

    pub fn with_default_policy(mut self, level: PermissionLevel) -> Self {
        self.default_policy = Some(level);
        self
    }

    pub fn with_type(mut self, type_key: impl Into<TypeKey>, manifest: PermissionManifest) -> Self {
        self.types.insert(type_key.into(), manifest);
        self
    }
}
