/// How the rules of a [`Filter`] are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GroupOp {
    #[default]
    And,
    Or,
}

impl GroupOp {
    /// Wire value (`AND` / `OR`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "AND",
            Self::Or => "OR",
        }
    }
}

/// Comparison applied by a single [`Rule`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterOp {
    Equal,
    NotEqual,
    LessThan,
    LessOrEqual,
    GreaterThan,
    GreaterOrEqual,
    BeginsWith,
    NotBeginsWith,
    EndsWith,
    NotEndsWith,
    Contains,
    NotContains,
}

impl FilterOp {
    /// Two-letter wire code (`eq`, `ne`, `cn`, ...).
    pub fn code(self) -> &'static str {
        match self {
            Self::Equal => "eq",
            Self::NotEqual => "ne",
            Self::LessThan => "lt",
            Self::LessOrEqual => "le",
            Self::GreaterThan => "gt",
            Self::GreaterOrEqual => "ge",
            Self::BeginsWith => "bw",
            Self::NotBeginsWith => "bn",
            Self::EndsWith => "ew",
            Self::NotEndsWith => "en",
            Self::Contains => "cn",
            Self::NotContains => "nc",
        }
    }

    /// Look up an operator by its wire code.
    pub fn from_code(code: &str) -> Option<Self> {
        let op = match code {
            "eq" => Self::Equal,
            "ne" => Self::NotEqual,
            "lt" => Self::LessThan,
            "le" => Self::LessOrEqual,
            "gt" => Self::GreaterThan,
            "ge" => Self::GreaterOrEqual,
            "bw" => Self::BeginsWith,
            "bn" => Self::NotBeginsWith,
            "ew" => Self::EndsWith,
            "en" => Self::NotEndsWith,
            "cn" => Self::Contains,
            "nc" => Self::NotContains,
            _ => return None,
        };
        Some(op)
    }
}

/// One `field <op> data` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub field: String,
    pub op: FilterOp,
    pub data: String,
}

impl Rule {
    pub fn new(field: impl Into<String>, op: FilterOp, data: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            op,
            data: data.into(),
        }
    }

    pub fn eq(field: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Equal, data)
    }

    pub fn contains(field: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(field, FilterOp::Contains, data)
    }
}

/// A group of rules sent as the `filters` form field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Filter {
    pub group_op: GroupOp,
    pub rules: Vec<Rule>,
}

impl Filter {
    /// Form field name carrying the encoded filter (`filters`).
    pub const FIELD: &'static str = "filters";

    pub fn new(group_op: GroupOp, rules: Vec<Rule>) -> Self {
        Self { group_op, rules }
    }
}
