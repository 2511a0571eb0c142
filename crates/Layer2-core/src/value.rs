//! Store Value - store 트리의 노드 타입
//!
//! JSON 값 + 중첩 Store + 지연 값(Lazy)을 하나의 tagged enum으로 표현한다.
//!
//! ## Lazy 평가 정책
//! Lazy producer는 저장된 그대로 보관되며 `read`/`write`/`entries`는 절대
//! 호출하지 않는다. 호출은 [`Value::evaluate`] (및 이를 사용하는
//! `Store::read_evaluated`, `to_json`)에서만 일어난다.

use crate::store::Store;
use indexmap::IndexMap;
use pathstore_foundation::Result;
use serde_json::Number;
use std::fmt;
use std::sync::Arc;

/// Insertion-ordered object node
pub type Object = IndexMap<String, Value>;

/// Zero-argument producer of a [`Value`]
#[derive(Clone)]
pub struct Lazy(Arc<dyn Fn() -> Value + Send + Sync>);

impl Lazy {
    pub fn new<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Self(Arc::new(producer))
    }

    /// Producer 호출 (한 단계만)
    pub fn call(&self) -> Value {
        (self.0)()
    }
}

impl fmt::Debug for Lazy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Lazy(..)")
    }
}

/// Producers compare by identity.
impl PartialEq for Lazy {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A node in the store tree
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(Object),
    Store(Box<Store>),
    Lazy(Lazy),
}

impl Value {
    /// 빈 object
    pub fn object() -> Self {
        Value::Object(Object::new())
    }

    /// 지연 값
    pub fn lazy<F>(producer: F) -> Self
    where
        F: Fn() -> Value + Send + Sync + 'static,
    {
        Value::Lazy(Lazy::new(producer))
    }

    /// 로그용 타입 이름
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Store(_) => "store",
            Value::Lazy(_) => "lazy",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Whether a path can nest under this value on write
    pub fn is_container(&self) -> bool {
        matches!(self, Value::Object(_) | Value::Store(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&Vec<Value>> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_store(&self) -> Option<&Store> {
        match self {
            Value::Store(store) => Some(&**store),
            _ => None,
        }
    }

    /// 한 단계 아래 노드 조회 (read 경로 탐색용)
    ///
    /// Objects and stores resolve by key, arrays by decimal index.
    pub fn child(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(segment),
            Value::Store(store) => store.properties().get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// 쓰기 가능한 컨테이너 (write 경로 탐색용)
    pub(crate) fn container_mut(&mut self) -> Option<&mut Object> {
        match self {
            Value::Object(map) => Some(map),
            Value::Store(store) => Some(store.properties_mut()),
            _ => None,
        }
    }

    /// Lazy producer를 모두 호출한 값
    ///
    /// Arrays and objects are evaluated element-wise. Nested stores are
    /// returned as-is.
    pub fn evaluate(&self) -> Value {
        match self {
            Value::Lazy(lazy) => lazy.call().evaluate(),
            Value::Array(items) => Value::Array(items.iter().map(Value::evaluate).collect()),
            Value::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.evaluate()))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// JSON 변환
    ///
    /// Lazy values are evaluated; nested stores export only the entries
    /// they allow to be read.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(match self {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Number(n) => serde_json::Value::Number(n.clone()),
            Value::String(s) => serde_json::Value::String(s.clone()),
            Value::Array(items) => serde_json::Value::Array(
                items
                    .iter()
                    .map(Value::to_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => {
                let mut out = serde_json::Map::new();
                for (key, value) in map {
                    out.insert(key.clone(), value.to_json()?);
                }
                serde_json::Value::Object(out)
            }
            Value::Store(store) => store.to_json()?,
            Value::Lazy(lazy) => lazy.call().to_json()?,
        })
    }
}

// ============================================================================
// From 구현
// ============================================================================

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Number(n.into())
    }
}

impl From<u64> for Value {
    fn from(n: u64) -> Self {
        Value::Number(n.into())
    }
}

/// Non-finite floats have no JSON form and become `Null`.
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Number::from_f64(n).map(Value::Number).unwrap_or(Value::Null)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::Array(items)
    }
}

impl From<Object> for Value {
    fn from(map: Object) -> Self {
        Value::Object(map)
    }
}

impl From<Store> for Value {
    fn from(store: Store) -> Self {
        Value::Store(Box::new(store))
    }
}

impl From<Lazy> for Value {
    fn from(lazy: Lazy) -> Self {
        Value::Lazy(lazy)
    }
}
