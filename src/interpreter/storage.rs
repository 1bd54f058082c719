use std::borrow::Cow;

use crate::{errors::fault::Fault, scope::scope::Scope};

use super::value::Value;

/// Where a value is read from and written back to.
///
/// A subscripted location reads by indexing into its base and writes by
/// rebuilding the whole base aggregate, so `a[i][j] = x` cascades one level
/// at a time down to the variable that owns the data.
#[derive(Debug, Clone)]
pub enum Location {
    Variable(String),
    /// An rvalue such as a literal or call result. Readable only.
    Temporary(Value),
    Index { base: Box<Location>, index: i64 },
}

impl Location {
    pub fn at(self, index: i64) -> Location {
        Location::Index {
            base: Box::new(self),
            index,
        }
    }

    pub fn read(&self, scope: &Scope<Value>) -> Result<Value, Fault> {
        self.resolve(scope).map(Cow::into_owned)
    }

    /// Walks an index chain without copying the aggregates along it. Only
    /// string characters, which have no stored value, come back owned.
    pub fn resolve<'s>(&'s self, scope: &'s Scope<Value>) -> Result<Cow<'s, Value>, Fault> {
        match self {
            Location::Variable(ident) => scope.get_ref(ident).map(Cow::Borrowed).ok_or_else(|| {
                Fault::TypeCheckerMissed(format!("unbound identifier '{}'", ident))
            }),
            Location::Temporary(value) => Ok(Cow::Borrowed(value)),
            Location::Index { base, index } => match base.resolve(scope)? {
                Cow::Borrowed(aggregate) => element(aggregate, *index),
                Cow::Owned(aggregate) => index_value(&aggregate, *index).map(Cow::Owned),
            },
        }
    }

    pub fn write(&self, scope: &mut Scope<Value>, value: Value) -> Result<(), Fault> {
        match self {
            Location::Variable(ident) => {
                if scope.update(ident, value) {
                    Ok(())
                } else {
                    Err(Fault::TypeCheckerMissed(format!(
                        "assignment to unbound identifier '{}'",
                        ident
                    )))
                }
            }
            Location::Temporary(_) => Err(Fault::NotAssignable),
            Location::Index { base, index } => {
                let aggregate = base.read(scope)?;
                let updated = replace_at(aggregate, *index, value)?;
                base.write(scope, updated)
            }
        }
    }
}

/// Reads element `index` of an array, or the character at `index` of a
/// string as a one character string.
pub fn index_value(aggregate: &Value, index: i64) -> Result<Value, Fault> {
    element(aggregate, index).map(Cow::into_owned)
}

fn element(aggregate: &Value, index: i64) -> Result<Cow<'_, Value>, Fault> {
    match aggregate {
        Value::Array(values) => usize::try_from(index)
            .ok()
            .and_then(|i| values.get(i))
            .map(Cow::Borrowed)
            .ok_or(Fault::IndexOutOfBounds {
                index,
                len: values.len(),
            }),
        Value::String(string) => usize::try_from(index)
            .ok()
            .and_then(|i| string.chars().nth(i))
            .map(|ch| Cow::Owned(Value::String(ch.to_string())))
            .ok_or_else(|| Fault::IndexOutOfBounds {
                index,
                len: string.chars().count(),
            }),
        other => Err(Fault::TypeCheckerMissed(format!(
            "indexing into {}",
            other.type_name()
        ))),
    }
}

/// Returns `aggregate` with `value` stored at `index`. Arrays replace the
/// element. Strings insert the new text before the character at `index`,
/// so any index from 0 to the length is accepted.
pub fn replace_at(aggregate: Value, index: i64, value: Value) -> Result<Value, Fault> {
    match (aggregate, value) {
        (Value::Array(mut values), value) => {
            let len = values.len();
            let slot = usize::try_from(index)
                .ok()
                .and_then(|i| values.get_mut(i))
                .ok_or(Fault::IndexOutOfBounds { index, len })?;
            *slot = value;
            Ok(Value::Array(values))
        }
        (Value::String(mut string), Value::String(inserted)) => {
            let len = string.chars().count();
            let offset = usize::try_from(index)
                .ok()
                .filter(|i| *i <= len)
                .map(|i| string.char_indices().nth(i).map_or(string.len(), |(at, _)| at))
                .ok_or(Fault::IndexOutOfBounds { index, len })?;
            string.insert_str(offset, &inserted);
            Ok(Value::String(string))
        }
        (aggregate, value) => Err(Fault::TypeCheckerMissed(format!(
            "storing {} into {}",
            value.type_name(),
            aggregate.type_name()
        ))),
    }
}
