//! Dynamic value model for field slots, method arguments and literals.
//!
//! Values are immutable once built. Containers share their storage through
//! `Arc`, so cloning a value never copies elements and instances can alias
//! freely.
//!
//! Two textual forms exist:
//!
//! - `Display` is the user-facing form: strings render raw (`bob`).
//! - [`Value::repr`] is the representation form: strings are quoted (`'bob'`).
//!
//! Containers always render their elements in representation form, so a
//! product holding a list of strings prints as `Person(bob,22,['austin', 'dallas'])`.

use std::collections::hash_map::DefaultHasher;
use std::fmt::{self, Write};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{AdtError, AdtResult};
use crate::instance::Instance;
use crate::kind::Kind;

#[derive(Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(Arc<str>),
    List(Arc<[Value]>),
    Tuple(Arc<[Value]>),
    /// Insertion-ordered entries with unique keys.
    Dict(Arc<[(Value, Value)]>),
    /// Insertion-ordered unique elements.
    Set(Arc<[Value]>),
    Instance(Instance),
}

impl Value {
    pub fn str(text: impl Into<Arc<str>>) -> Self {
        Value::Str(text.into())
    }

    pub fn list<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }

    pub fn tuple<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        Value::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Build a dict; a repeated key keeps its first position and its last value.
    pub fn dict<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<Value>,
        V: Into<Value>,
    {
        let mut out: Vec<(Value, Value)> = Vec::new();
        for (key, value) in entries {
            let (key, value) = (key.into(), value.into());
            match out.iter_mut().find(|(k, _)| *k == key) {
                Some(slot) => slot.1 = value,
                None => out.push((key, value)),
            }
        }
        Value::Dict(out.into())
    }

    pub fn set<T: Into<Value>>(items: impl IntoIterator<Item = T>) -> Self {
        let mut out: Vec<Value> = Vec::new();
        for item in items {
            let item = item.into();
            if !out.contains(&item) {
                out.push(item);
            }
        }
        Value::Set(out.into())
    }

    pub fn kind(&self) -> Kind {
        Kind::of(self)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Value::None)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(x) => Some(*x),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s.as_ref()),
            _ => None,
        }
    }

    /// Elements of a list, tuple or set.
    pub fn as_slice(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) | Value::Tuple(items) | Value::Set(items) => Some(&items[..]),
            _ => None,
        }
    }

    pub fn as_instance(&self) -> Option<&Instance> {
        match self {
            Value::Instance(instance) => Some(instance),
            _ => None,
        }
    }

    pub fn try_int(&self) -> AdtResult<i64> {
        self.as_int()
            .ok_or_else(|| AdtError::type_mismatch("int", self.repr()))
    }

    pub fn try_float(&self) -> AdtResult<f64> {
        match self {
            Value::Float(x) => Ok(*x),
            Value::Int(n) => Ok(*n as f64),
            _ => Err(AdtError::type_mismatch("float", self.repr())),
        }
    }

    pub fn try_instance(&self) -> AdtResult<&Instance> {
        self.as_instance()
            .ok_or_else(|| AdtError::type_mismatch("instance", self.repr()))
    }

    /// Invoke `method` on this value. Only instances carry methods.
    pub fn call(&self, method: &str, args: &[Value]) -> AdtResult<Value> {
        match self {
            Value::Instance(instance) => instance.call(method, args),
            other => Err(AdtError::unknown_method(other.kind(), method)),
        }
    }

    /// Representation form of this value.
    pub fn repr(&self) -> Repr<'_> {
        Repr(self)
    }

    fn write_repr(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write_float(*x, f),
            Value::Str(s) => write_quoted(s, f),
            Value::List(items) => {
                f.write_char('[')?;
                write_joined(items, f)?;
                f.write_char(']')
            }
            Value::Tuple(items) => {
                f.write_char('(')?;
                write_joined(items, f)?;
                if items.len() == 1 {
                    f.write_char(',')?;
                }
                f.write_char(')')
            }
            Value::Dict(entries) => {
                f.write_char('{')?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    key.write_repr(f)?;
                    f.write_str(": ")?;
                    value.write_repr(f)?;
                }
                f.write_char('}')
            }
            Value::Set(items) if items.is_empty() => f.write_str("set()"),
            Value::Set(items) => {
                f.write_char('{')?;
                write_joined(items, f)?;
                f.write_char('}')
            }
            Value::Instance(instance) => write!(f, "{instance}"),
        }
    }
}

fn write_joined(items: &[Value], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item.write_repr(f)?;
    }
    Ok(())
}

fn write_float(x: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if x.is_nan() {
        f.write_str("nan")
    } else if x.is_infinite() {
        f.write_str(if x > 0.0 { "inf" } else { "-inf" })
    } else if x.fract() == 0.0 && x.abs() < 1e16 {
        write!(f, "{x:.1}")
    } else {
        write!(f, "{x}")
    }
}

fn write_quoted(s: &str, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    // Single quotes unless that would force escaping and double quotes would not.
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    f.write_char(quote)?;
    for c in s.chars() {
        match c {
            '\\' => f.write_str("\\\\")?,
            '\n' => f.write_str("\\n")?,
            '\t' => f.write_str("\\t")?,
            '\r' => f.write_str("\\r")?,
            c if c == quote => {
                f.write_char('\\')?;
                f.write_char(c)?;
            }
            c => f.write_char(c)?,
        }
    }
    f.write_char(quote)
}

/// Representation form of a [`Value`], see the module docs.
pub struct Repr<'a>(&'a Value);

impl fmt::Display for Repr<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.write_repr(f)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(s) => f.write_str(s),
            other => other.write_repr(f),
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_repr(f)
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            (Value::List(a), Value::List(b)) | (Value::Tuple(a), Value::Tuple(b)) => a == b,
            (Value::Dict(a), Value::Dict(b)) => same_elements(a, b),
            (Value::Set(a), Value::Set(b)) => same_elements(a, b),
            (Value::Instance(a), Value::Instance(b)) => a == b,
            _ => false,
        }
    }
}

// NaN breaks reflexivity; float literals used as type arguments must be finite.
impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::None => {}
            Value::Bool(b) => b.hash(state),
            Value::Int(n) => n.hash(state),
            Value::Float(x) => normalized_bits(*x).hash(state),
            Value::Str(s) => s.hash(state),
            Value::List(items) | Value::Tuple(items) => items.hash(state),
            Value::Dict(entries) => unordered_hash(entries).hash(state),
            Value::Set(items) => unordered_hash(items).hash(state),
            Value::Instance(instance) => instance.hash(state),
        }
    }
}

fn normalized_bits(x: f64) -> u64 {
    if x == 0.0 {
        0.0f64.to_bits()
    } else if x.is_nan() {
        f64::NAN.to_bits()
    } else {
        x.to_bits()
    }
}

/// Equality of the distinct elements of `a` and `b`, ignoring order.
///
/// The variants are public, so a raw `Dict`/`Set` may carry repeats; those
/// are ignored here and in [`unordered_hash`].
fn same_elements<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    a.iter().all(|x| b.contains(x)) && b.iter().all(|x| a.contains(x))
}

/// Order-independent combination of the hashes of the distinct elements.
fn unordered_hash<T: Hash + PartialEq>(items: &[T]) -> u64 {
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| !items[..*i].contains(item))
        .fold(0u64, |acc, (_, item)| {
            let mut hasher = DefaultHasher::new();
            item.hash(&mut hasher);
            acc.wrapping_add(hasher.finish())
        })
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(n.into())
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s.into())
    }
}

impl From<Instance> for Value {
    fn from(instance: Instance) -> Self {
        Value::Instance(instance)
    }
}

impl From<&Instance> for Value {
    fn from(instance: &Instance) -> Self {
        Value::Instance(instance.clone())
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items.into())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::None, Into::into)
    }
}
