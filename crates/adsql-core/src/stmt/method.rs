/// A method call the formatter knows how to translate.
///
/// Calls are a closed set: anything outside it has to be evaluated client-side
/// by the caller before the expression reaches translation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Str(StrMethod),
    Date(DateMethod),
    Num(NumMethod),

    /// Instance comparison, `a.CompareTo(b)`. Yields -1, 0 or 1.
    CompareTo,

    /// Static comparison, `Compare(a, b)`. Yields -1, 0 or 1.
    Compare,

    /// Parses a numeric string, `Convert.ToInt32(s)` and friends.
    ParseNumber,

    /// Converts the receiver to its string form.
    ToString,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrMethod {
    StartsWith,
    EndsWith,
    Contains,
    /// Static concatenation. A single list argument is flattened.
    Concat,
    /// Static `IsNullOrEmpty(s)`.
    IsNullOrEmpty,
    ToUpper,
    ToLower,
    Replace,
    Substring,
    Remove,
    IndexOf,
    Trim,
    Length,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DateMethod {
    AddYears,
    AddMonths,
    AddDays,
    AddHours,
    AddMinutes,
    AddSeconds,
    AddMilliseconds,

    /// `later - earlier`, measured in fractional seconds.
    Subtract,

    /// Reads one component of the receiver.
    Part(DatePart),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatePart {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

/// Decimal and math helpers. Binary forms take two arguments and no receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumMethod {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Negate,
    Ceiling,
    Floor,
    Round,
    Truncate,
    Abs,
    Acos,
    Asin,
    Atan,
    Atan2,
    Cos,
    Exp,
    Log,
    Log10,
    Sin,
    Sqrt,
    Sign,
    Tan,
    Pow,
}

impl DatePart {
    pub fn as_sql(self) -> &'static str {
        match self {
            DatePart::Year => "YEAR",
            DatePart::Month => "MONTH",
            DatePart::Day => "DAY",
            DatePart::Hour => "HOUR",
            DatePart::Minute => "MINUTE",
            DatePart::Second => "SECOND",
        }
    }
}

impl From<StrMethod> for Method {
    fn from(value: StrMethod) -> Self {
        Method::Str(value)
    }
}

impl From<DateMethod> for Method {
    fn from(value: DateMethod) -> Self {
        Method::Date(value)
    }
}

impl From<NumMethod> for Method {
    fn from(value: NumMethod) -> Self {
        Method::Num(value)
    }
}
