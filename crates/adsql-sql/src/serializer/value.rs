use super::{Formatter, Param, Params, ToSql};

use adsql_core::{
    schema::EnumRepr,
    stmt::{Value, ValueEnum},
    Error, Result,
};

impl ToSql for &Value {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        match self {
            Value::Null => fmt!(f, "NULL"),
            Value::Bool(true) => fmt!(f, "TRUE"),
            Value::Bool(false) => fmt!(f, "FALSE"),
            Value::I32(v) => fmt!(f, *v as i64),
            Value::I64(v) => fmt!(f, *v),
            Value::F64(v) => {
                if !v.is_finite() {
                    return Err(Error::unsupported_operation(format!(
                        "{v} has no SQL literal"
                    )));
                }
                f.dst.push_str(&v.to_string());
            }
            Value::String(v) => fmt!(f, Quoted(v)),
            Value::Enum(v) => fmt!(f, *v),
            // Date literals are not portable across table types
            Value::Date(_) | Value::DateTime(_) => {
                let placeholder = f.params.push(Param::Value(self.clone()));
                fmt!(f, placeholder);
            }
            Value::List(_) | Value::Record(_) => {
                return Err(Error::unsupported_operation(format!(
                    "{self} cannot be written as a single SQL value"
                )))
            }
        }

        Ok(())
    }
}

impl ToSql for ValueEnum {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let enum_ty = f.serializer.schema.enum_ty(self.ty);

        match enum_ty.repr {
            EnumRepr::Char => fmt!(f, CharLiteral(self.code as i64)),
            EnumRepr::Name => {
                let Some(variant) = enum_ty.variant_by_code(self.code) else {
                    return Err(Error::unsupported_operation(format!(
                        "{} is not a variant code of enum `{}`",
                        self.code, enum_ty.name
                    )));
                };
                fmt!(f, Quoted(&variant.name));
            }
        }

        Ok(())
    }
}

/// A single-quoted string literal.
pub(super) struct Quoted<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Quoted<S> {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        f.dst.push('\'');
        for c in self.0.as_ref().chars() {
            if c == '\'' {
                f.dst.push('\'');
            }
            f.dst.push(c);
        }
        f.dst.push('\'');
        Ok(())
    }
}

/// An integer code written as a one-character string literal.
pub(super) struct CharLiteral(pub(super) i64);

impl ToSql for CharLiteral {
    fn to_sql<P: Params>(self, f: &mut Formatter<'_, P>) -> Result<()> {
        let Some(c) = u32::try_from(self.0).ok().and_then(char::from_u32) else {
            return Err(Error::unsupported_operation(format!(
                "{} is not a character code",
                self.0
            )));
        };

        let mut buf = [0; 4];
        fmt!(f, Quoted(&*c.encode_utf8(&mut buf)));
        Ok(())
    }
}
