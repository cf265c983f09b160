use std::{
    borrow::Cow,
    fmt,
    hash::{Hash, Hasher},
};

/// The host-side type of a value or expression result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueType {
    Bool,
    Int32,
    Int64,
    Double,
    Decimal,
    String,
    Char,
    Bytes,
    DateTime,
    Guid,
    /// The receiver of provider-specific extension functions, e.g. `EF.Functions`.
    DbFunctions,
    Object,
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ValueType::Bool => "Boolean",
            ValueType::Int32 => "Int32",
            ValueType::Int64 => "Int64",
            ValueType::Double => "Double",
            ValueType::Decimal => "Decimal",
            ValueType::String => "String",
            ValueType::Char => "Char",
            ValueType::Bytes => "Byte[]",
            ValueType::DateTime => "DateTime",
            ValueType::Guid => "Guid",
            ValueType::DbFunctions => "DbFunctions",
            ValueType::Object => "Object",
        };

        f.write_str(name)
    }
}

/// Maps a host type onto the store type used by the database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeMapping {
    pub store_type: Cow<'static, str>,
    pub value_type: ValueType,
}

impl TypeMapping {
    pub fn new(store_type: impl Into<Cow<'static, str>>, value_type: ValueType) -> Self {
        Self {
            store_type: store_type.into(),
            value_type,
        }
    }
}

/// A constant value carried by the tree or bound to a parameter.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Boolean(bool),
    Integer(i64),
    Real(f64),
    Text(Cow<'static, str>),
    Bytes(Vec<u8>),
}

impl Value {
    pub fn text(value: impl Into<Cow<'static, str>>) -> Self {
        Self::Text(value.into())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// The host type a value of this kind defaults to.
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Object,
            Value::Boolean(_) => ValueType::Bool,
            Value::Integer(_) => ValueType::Int64,
            Value::Real(_) => ValueType::Double,
            Value::Text(_) => ValueType::String,
            Value::Bytes(_) => ValueType::Bytes,
        }
    }
}

// Reals compare by bit pattern so that equality stays consistent with hashing.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::Real(a), Value::Real(b)) => a.to_bits() == b.to_bits(),
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::Bytes(a), Value::Bytes(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);

        match self {
            Value::Null => (),
            Value::Boolean(b) => b.hash(state),
            Value::Integer(i) => i.hash(state),
            Value::Real(r) => r.to_bits().hash(state),
            Value::Text(t) => t.hash(state),
            Value::Bytes(b) => b.hash(state),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Value::Real(r)
    }
}

impl From<&'static str> for Value {
    fn from(s: &'static str) -> Self {
        Value::Text(Cow::Borrowed(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(Cow::Owned(s))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Value::Bytes(bytes)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(opt: Option<T>) -> Self {
        opt.map(Into::into).unwrap_or(Value::Null)
    }
}
