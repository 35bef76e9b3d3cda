use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::entity::Entity;
use crate::temporal::{format_datetime, format_double, format_duration};

/// Kind of a primitive literal, as declared by an ontology field.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimitiveKind {
    String,
    Boolean,
    Double,
    Integer,
    NonNegativeInteger,
    Duration,
    DateTime,
}

impl PrimitiveKind {
    /// Every primitive kind, in declaration order.
    pub const ALL: [PrimitiveKind; 7] = [
        Self::String,
        Self::Boolean,
        Self::Double,
        Self::Integer,
        Self::NonNegativeInteger,
        Self::Duration,
        Self::DateTime,
    ];

    /// Short lowercase name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Boolean => "boolean",
            Self::Double => "double",
            Self::Integer => "integer",
            Self::NonNegativeInteger => "non_negative_integer",
            Self::Duration => "duration",
            Self::DateTime => "date_time",
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scalar literal.
#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    String(String),
    Boolean(bool),
    Double(f64),
    Integer(i64),
    NonNegativeInteger(u64),
    Duration(Duration),
    DateTime(DateTime<Utc>),
}

impl Primitive {
    /// The kind of this literal.
    pub fn kind(&self) -> PrimitiveKind {
        match self {
            Self::String(_) => PrimitiveKind::String,
            Self::Boolean(_) => PrimitiveKind::Boolean,
            Self::Double(_) => PrimitiveKind::Double,
            Self::Integer(_) => PrimitiveKind::Integer,
            Self::NonNegativeInteger(_) => PrimitiveKind::NonNegativeInteger,
            Self::Duration(_) => PrimitiveKind::Duration,
            Self::DateTime(_) => PrimitiveKind::DateTime,
        }
    }

    /// Canonical string form. Equal literals always produce equal strings.
    pub fn canonical(&self) -> String {
        match self {
            Self::String(s) => s.clone(),
            Self::Boolean(b) => b.to_string(),
            Self::Double(d) => format_double(*d),
            Self::Integer(i) => i.to_string(),
            Self::NonNegativeInteger(u) => u.to_string(),
            Self::Duration(d) => format_duration(d),
            Self::DateTime(dt) => format_datetime(dt),
        }
    }
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical())
    }
}

/// Reference to another top-level entity by identity.
///
/// `type_id` is the declared range of the predicate holding the link; it is
/// what the patch serializer reports as the link's datatype.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityLink {
    pub identity: String,
    pub type_id: String,
}

impl EntityLink {
    pub fn new(identity: impl Into<String>, type_id: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            type_id: type_id.into(),
        }
    }
}

/// A property value.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// A scalar literal.
    Primitive(Primitive),
    /// An embedded entity owned by its container.
    Entity(Box<Entity>),
    /// A cross-reference to another top-level entity.
    Link(EntityLink),
    /// An ordered list of values.
    List(Vec<Value>),
}

impl Value {
    pub fn as_primitive(&self) -> Option<&Primitive> {
        match self {
            Self::Primitive(p) => Some(p),
            _ => None,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            Self::Entity(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_link(&self) -> Option<&EntityLink> {
        match self {
            Self::Link(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Short name of the value category, for diagnostics.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Primitive(_) => "primitive",
            Self::Entity(_) => "entity",
            Self::Link(_) => "link",
            Self::List(_) => "list",
        }
    }
}

impl From<Primitive> for Value {
    fn from(p: Primitive) -> Self {
        Self::Primitive(p)
    }
}

impl From<Entity> for Value {
    fn from(e: Entity) -> Self {
        Self::Entity(Box::new(e))
    }
}

impl From<EntityLink> for Value {
    fn from(l: EntityLink) -> Self {
        Self::Link(l)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

macro_rules! primitive_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Primitive {
                fn from(v: $ty) -> Self {
                    Self::$variant(v.into())
                }
            }

            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::Primitive(Primitive::from(v))
                }
            }
        )*
    };
}

primitive_from! {
    String => String,
    &str => String,
    bool => Boolean,
    f64 => Double,
    i64 => Integer,
    u64 => NonNegativeInteger,
    Duration => Duration,
    DateTime<Utc> => DateTime,
}
