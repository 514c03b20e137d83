use adsql_core::{
    schema::{EnumId, EnumRepr},
    stmt::{Type, Value, ValueEnum},
    Error, Result, Schema,
};
use adsql_sql::Param;
use chrono::NaiveTime;

/// Converts values between their in-memory form and the form the storage
/// engine holds.
#[derive(Debug, Clone, Copy)]
pub struct Coercion<'a> {
    schema: &'a Schema,
    blank_as_null: bool,
}

impl<'a> Coercion<'a> {
    pub fn new(schema: &'a Schema, blank_as_null: bool) -> Coercion<'a> {
        Coercion {
            schema,
            blank_as_null,
        }
    }

    /// The storage form of a parameter value.
    ///
    /// Blank strings are sent as null. Enums are sent as their character or
    /// their variant name, depending on how the enum is stored.
    pub fn outbound(&self, value: Value) -> Value {
        match value {
            Value::String(s) if s.trim().is_empty() => Value::Null,
            Value::Enum(value) => self.enum_outbound(value),
            value => value,
        }
    }

    pub fn param(&self, param: Param) -> Param {
        match param {
            Param::Value(value) => Param::Value(self.outbound(value)),
            param => param,
        }
    }

    fn enum_outbound(&self, value: ValueEnum) -> Value {
        let enum_ty = self.schema.enum_ty(value.ty);

        let stored = match enum_ty.repr {
            EnumRepr::Char => value.as_char().map(String::from),
            EnumRepr::Name => enum_ty
                .variant_by_code(value.code)
                .map(|variant| variant.name.clone()),
        };

        // Codes without a stored form are passed through as numbers
        stored.map_or(Value::I32(value.code), Value::String)
    }

    /// Converts `raw`, read from `column`, to `target`.
    pub fn inbound(&self, column: &str, raw: Value, target: &Type) -> Result<Value> {
        match (target, raw) {
            (Type::Enum(id), raw) => self.enum_inbound(column, *id, raw),
            (_, Value::Null) => Ok(Value::Null),
            (Type::Unknown, raw) => Ok(raw),
            (Type::String, Value::String(s)) => {
                if self.blank_as_null && s.trim().is_empty() {
                    Ok(Value::Null)
                } else {
                    Ok(Value::String(s))
                }
            }
            (Type::Bool, Value::Bool(v)) => Ok(Value::Bool(v)),
            (Type::I32, Value::I32(v)) => Ok(Value::I32(v)),
            (Type::I32, raw @ Value::I64(v)) => match i32::try_from(v) {
                Ok(v) => Ok(Value::I32(v)),
                Err(_) => Err(Error::type_conversion(column, target.to_string(), raw)),
            },
            (Type::I64, Value::I32(v)) => Ok(Value::I64(v.into())),
            (Type::I64, Value::I64(v)) => Ok(Value::I64(v)),
            (Type::F64, Value::I32(v)) => Ok(Value::F64(v.into())),
            (Type::F64, Value::I64(v)) => Ok(Value::F64(v as f64)),
            (Type::F64, Value::F64(v)) => Ok(Value::F64(v)),
            (Type::Date, Value::Date(v)) => Ok(Value::Date(v)),
            (Type::Date, Value::DateTime(v)) => Ok(Value::Date(v.date())),
            (Type::DateTime, Value::DateTime(v)) => Ok(Value::DateTime(v)),
            (Type::DateTime, Value::Date(v)) => Ok(Value::DateTime(v.and_time(NaiveTime::MIN))),
            (target, raw) => Err(Error::type_conversion(column, target.to_string(), raw)),
        }
    }

    fn enum_inbound(&self, column: &str, id: EnumId, raw: Value) -> Result<Value> {
        let enum_ty = self.schema.enum_ty(id);
        let blank = raw.is_null() || raw.is_blank_string();

        let code = match (&raw, enum_ty.repr) {
            _ if blank => enum_ty.default_code,
            (Value::String(s), EnumRepr::Char) => {
                // Only the first character is significant
                s.trim()
                    .chars()
                    .next()
                    .map(|c| c as i32)
                    .filter(|code| enum_ty.variant_by_code(*code).is_some())
            }
            (Value::String(s), EnumRepr::Name) => enum_ty
                .variant_by_name(s.trim())
                .map(|variant| variant.code),
            (Value::I32(code), _) => Some(*code)
                .filter(|code| enum_ty.variant_by_code(*code).is_some()),
            (Value::I64(code), _) => i32::try_from(*code)
                .ok()
                .filter(|code| enum_ty.variant_by_code(*code).is_some()),
            _ => None,
        };

        match code {
            Some(code) => Ok(Value::Enum(ValueEnum::new(id, code))),
            None if blank => Ok(Value::Null),
            None => Err(Error::type_conversion(
                column,
                format!("enum {}", enum_ty.name),
                raw,
            )),
        }
    }
}
