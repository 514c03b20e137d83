use super::Serializer;

use adsql_core::Schema;

/// How parameter markers are written.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParamStyle {
    /// `:p0`, `:p1`, ...
    #[default]
    Colon,

    /// `?` for every parameter
    QuestionMark,
}

impl<'a> Serializer<'a> {
    pub fn advantage(schema: &'a Schema) -> Serializer<'a> {
        Serializer {
            schema,
            param_style: ParamStyle::default(),
        }
    }

    pub fn param_style(mut self, param_style: ParamStyle) -> Serializer<'a> {
        self.param_style = param_style;
        self
    }
}
