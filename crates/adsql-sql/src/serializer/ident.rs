use super::{Formatter, Params, ToSql};
use adsql_core::Result;

/// A bracket-quoted identifier. Names that are already bracketed are written
/// as they are.
pub(super) struct Ident<S>(pub(super) S);

impl<S: AsRef<str>> ToSql for Ident<S> {
    fn to_sql<T: Params>(self, f: &mut Formatter<'_, T>) -> Result<()> {
        let name = self.0.as_ref();

        if name.len() >= 2 && name.starts_with('[') && name.ends_with(']') {
            f.dst.push_str(name);
        } else {
            f.dst.push('[');
            f.dst.push_str(name);
            f.dst.push(']');
        }

        Ok(())
    }
}
