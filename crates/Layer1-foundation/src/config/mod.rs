//! Config - 통합 설정 관리
//!
//! - `store.rs` - PathStoreConfig (기본 정책 + 타입별 권한 manifest, 파일 로드/저장)

mod store;

pub use store::{PathStoreConfig, CONFIG_DIR_NAME, DEFAULT_POLICY, PATHSTORE_CONFIG_FILE};
