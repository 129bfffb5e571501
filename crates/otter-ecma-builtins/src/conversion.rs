//! Type conversions (ES5 §9)
//!
//! Conversions of objects run script-visible code (`valueOf`, `toString`),
//! so every fallible conversion returns a completion.

use otter_ecma_core::number::{number_to_string, string_to_number, to_integer, to_uint32};
use otter_ecma_core::{
    Abrupt, InternalProperty, JsString, MagicStringId, ObjectRef, Value,
};

use crate::builtins::error::NativeErrorKind;
use crate::engine::Engine;

/// Preferred type for [`Engine::to_primitive`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PreferredType {
    /// Try `valueOf` first
    Number,
    /// Try `toString` first
    String,
}

impl Engine {
    /// ToPrimitive
    pub fn to_primitive(&self, value: &Value, hint: PreferredType) -> Result<Value, Abrupt> {
        let Value::Object(object) = value else {
            return Ok(value.clone());
        };

        let order = match hint {
            PreferredType::String => [MagicStringId::ToString, MagicStringId::ValueOf],
            PreferredType::Number => [MagicStringId::ValueOf, MagicStringId::ToString],
        };
        for name in order {
            let method = self.get_magic(object, name)?;
            if method.is_callable() {
                let result = self.call(&method, value, &[])?;
                if !result.is_object() {
                    return Ok(result);
                }
            }
        }

        Err(self.throw_error(
            NativeErrorKind::Type,
            "Cannot convert object to primitive value",
        ))
    }

    /// ToBoolean
    pub fn to_boolean(&self, value: &Value) -> bool {
        match value {
            Value::Undefined | Value::Null => false,
            Value::Boolean(b) => *b,
            Value::Number(n) => !(n.is_nan() || *n == 0.0),
            Value::String(s) => !s.is_empty(),
            Value::Object(_) => true,
        }
    }

    /// ToNumber
    pub fn to_number(&self, value: &Value) -> Result<f64, Abrupt> {
        Ok(match value {
            Value::Undefined => f64::NAN,
            Value::Null => 0.0,
            Value::Boolean(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => string_to_number(s.as_str()),
            Value::Object(_) => {
                let primitive = self.to_primitive(value, PreferredType::Number)?;
                return self.to_number(&primitive);
            }
        })
    }

    /// ToInteger
    pub fn to_integer(&self, value: &Value) -> Result<f64, Abrupt> {
        Ok(to_integer(self.to_number(value)?))
    }

    /// ToUint32
    pub fn to_uint32(&self, value: &Value) -> Result<u32, Abrupt> {
        Ok(to_uint32(self.to_number(value)?))
    }

    /// ToString
    pub fn to_string(&self, value: &Value) -> Result<JsString, Abrupt> {
        Ok(match value {
            Value::Undefined => JsString::magic(MagicStringId::Undefined),
            Value::Null => JsString::magic(MagicStringId::Null),
            Value::Boolean(true) => JsString::magic(MagicStringId::True),
            Value::Boolean(false) => JsString::magic(MagicStringId::False),
            Value::Number(n) => JsString::new(&number_to_string(*n)),
            Value::String(s) => s.clone(),
            Value::Object(_) => {
                let primitive = self.to_primitive(value, PreferredType::String)?;
                return self.to_string(&primitive);
            }
        })
    }

    /// ToObject
    pub fn to_object(&self, value: &Value) -> Result<ObjectRef, Abrupt> {
        match value {
            Value::Undefined | Value::Null => Err(self.throw_error(
                NativeErrorKind::Type,
                &format!("Cannot convert {} to object", self.type_name(value)),
            )),
            Value::Object(object) => Ok(object.clone()),
            primitive => Ok(self.new_wrapper(primitive.clone())),
        }
    }

    fn type_name(&self, value: &Value) -> &'static str {
        match value {
            Value::Null => "null",
            other => other.type_of(),
        }
    }
}

/// `[[PrimitiveValue]]` of a wrapper object
pub fn primitive_value_of(object: &ObjectRef) -> Option<Value> {
    object
        .internal(InternalProperty::PrimitiveValue)
        .and_then(|payload| payload.as_value().cloned())
}
