//! Resource descriptions: columns, write rules, filters and ordering for one table.

/// Storage type of a column; decides how payload values are coerced before binding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColumnKind {
    Int,
    Text,
    Date,
    Timestamp,
}

#[derive(Clone, Copy, Debug)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnKind,
}

impl ColumnDef {
    pub const fn int(name: &'static str) -> Self {
        ColumnDef { name, kind: ColumnKind::Int }
    }

    pub const fn text(name: &'static str) -> Self {
        ColumnDef { name, kind: ColumnKind::Text }
    }

    pub const fn date(name: &'static str) -> Self {
        ColumnDef { name, kind: ColumnKind::Date }
    }

    pub const fn timestamp(name: &'static str) -> Self {
        ColumnDef { name, kind: ColumnKind::Timestamp }
    }
}

/// How a list filter turns into a predicate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FilterOp {
    /// `column = $n`. The sentinel `"all"` disables the filter.
    Equals,
    /// `column >= CURRENT_DATE`, active only when the query parameter is `"true"`.
    OnOrAfterToday,
}

/// A query parameter accepted by the public list of a resource.
#[derive(Clone, Copy, Debug)]
pub struct FilterDef {
    /// Query-string name (e.g. `category`).
    pub param: &'static str,
    /// Column the predicate applies to (e.g. `category_key`).
    pub column: &'static str,
    pub op: FilterOp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Email,
}

/// Extra checks applied to a field whenever it is written.
#[derive(Clone, Copy, Debug)]
pub struct FieldRule {
    pub column: &'static str,
    pub format: Option<Format>,
    pub max_length: Option<usize>,
}

/// Static description of one CRUD-managed resource.
#[derive(Debug)]
pub struct ResourceSchema {
    /// Name used in logs and error messages.
    pub name: &'static str,
    pub table: &'static str,
    /// Read projection, in response order.
    pub columns: &'static [ColumnDef],
    /// Store-assigned identifier column. `None` for key-addressed read-only tables.
    pub primary_key: Option<&'static str>,
    /// Columns written by INSERT, in statement order.
    pub insertable: &'static [&'static str],
    /// Subset of `insertable` that must be present and non-empty on create.
    pub required: &'static [&'static str],
    /// Columns a partial update may set, in SET-clause order.
    pub updatable: &'static [&'static str],
    pub filters: &'static [FilterDef],
    pub rules: &'static [FieldRule],
    /// ORDER BY clause (without the keywords) for public lists.
    pub public_order: &'static str,
    /// ORDER BY clause for admin lists.
    pub admin_order: &'static str,
    /// Limit used when a `limit` parameter is supplied but cannot be parsed.
    pub default_limit: Option<u32>,
}

impl ResourceSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(&name)
    }

    pub fn is_updatable(&self, name: &str) -> bool {
        self.updatable.contains(&name)
    }

    /// Only optional updatable columns may be explicitly set to NULL.
    pub fn is_clearable(&self, name: &str) -> bool {
        self.is_updatable(name) && !self.is_required(name)
    }

    pub fn supports_writes(&self) -> bool {
        self.primary_key.is_some() && !self.insertable.is_empty()
    }
}
