//! Per-kind normalization contracts.
//!
//! Each [`DatasetKind`] maps to one static [`DatasetProfile`]: the
//! ordered column specs, the redundant columns to prune, and the
//! optional composite date-time assembly. The cleaning engine in
//! `mrdc-clean` is a single generic pipeline driven entirely by this
//! data; per-kind differences live here, not in control flow.

use crate::DatasetKind;

/// Target type of an output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Text,
    Date,
    DateTime,
    Float,
    Integer,
}

/// Which coercer a column runs through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionRule {
    /// Trim whitespace; numeric-looking cells are stringified.
    Trim,
    /// Trim and capitalize (first letter upper, rest lower).
    Capitalize,
    /// Parse against the accepted date formats.
    Date,
    /// Parse to floating point.
    Numeric,
    /// Parse to integer.
    Integer,
    /// Strip unit suffix and rescale to kilograms.
    Weight,
    /// Strip a known currency symbol, then parse as a number.
    Currency,
}

/// Contract for one output column of a dataset kind.
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpec {
    /// Canonical (lowercase, underscored) column name.
    pub name: &'static str,
    pub ty: ColumnType,
    /// Row is dropped when this column is absent or blank.
    pub required: bool,
    /// Row is dropped when this column's coercer fails, even though
    /// the raw value was present (the dataset's designated date
    /// columns, weight, price).
    pub critical: bool,
    pub rule: CoercionRule,
}

impl ColumnSpec {
    const fn text(name: &'static str) -> Self {
        Self {
            name,
            ty: ColumnType::Text,
            required: true,
            critical: false,
            rule: CoercionRule::Trim,
        }
    }

    const fn date(name: &'static str) -> Self {
        Self {
            name,
            ty: ColumnType::Date,
            required: true,
            critical: true,
            rule: CoercionRule::Date,
        }
    }

    const fn float(name: &'static str) -> Self {
        Self {
            name,
            ty: ColumnType::Float,
            required: true,
            critical: true,
            rule: CoercionRule::Numeric,
        }
    }

    const fn optional(mut self) -> Self {
        self.required = false;
        self.critical = false;
        self
    }
}

/// Assembly of a date-time from four source columns joined as
/// `YYYY-MM-DD HH:MM:SS` and parsed strictly against that pattern.
#[derive(Debug, Clone, Copy)]
pub struct CompositeDateTime {
    pub year: &'static str,
    pub month: &'static str,
    pub day: &'static str,
    pub time: &'static str,
    /// Output column; the four source columns are dropped once it
    /// exists.
    pub target: &'static str,
}

/// Static description of how one dataset kind is normalized.
#[derive(Debug, Clone, Copy)]
pub struct DatasetProfile {
    pub kind: DatasetKind,
    /// Known-redundant columns pruned when present (absence is fine).
    pub drop_columns: &'static [&'static str],
    pub columns: &'static [ColumnSpec],
    pub composite: Option<CompositeDateTime>,
    /// Orders: column pruning and dedup only, no coercion.
    pub pass_through: bool,
}

impl DatasetProfile {
    /// Profile for a dataset kind.
    pub fn for_kind(kind: DatasetKind) -> &'static DatasetProfile {
        match kind {
            DatasetKind::Users => &USERS,
            DatasetKind::Cards => &CARDS,
            DatasetKind::Stores => &STORES,
            DatasetKind::Products => &PRODUCTS,
            DatasetKind::Orders => &ORDERS,
            DatasetKind::DateTimes => &DATE_TIMES,
        }
    }

    pub fn spec(&self, column: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|spec| spec.name == column)
    }

    /// Canonical column names that must exist in the source schema.
    ///
    /// The composite target is produced by the pipeline itself, so it
    /// is replaced by its four source columns here.
    pub fn required_source_columns(&self) -> Vec<&'static str> {
        let mut required = Vec::new();
        for spec in self.columns {
            if !spec.required {
                continue;
            }
            if let Some(composite) = &self.composite
                && spec.name == composite.target
            {
                continue;
            }
            required.push(spec.name);
        }
        if let Some(composite) = &self.composite {
            required.extend([composite.year, composite.month, composite.day, composite.time]);
        }
        required
    }
}

static USERS: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Users,
    drop_columns: &["index"],
    columns: &[
        ColumnSpec::text("first_name"),
        ColumnSpec::text("last_name"),
        ColumnSpec::date("date_of_birth"),
        ColumnSpec::text("company"),
        ColumnSpec::text("email_address"),
        ColumnSpec::text("address"),
        ColumnSpec::text("country"),
        ColumnSpec::text("country_code"),
        ColumnSpec::text("phone_number"),
        ColumnSpec::date("join_date"),
        ColumnSpec::text("user_uuid"),
    ],
    composite: None,
    pass_through: false,
};

static CARDS: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Cards,
    drop_columns: &["index"],
    columns: &[
        ColumnSpec::text("card_number"),
        ColumnSpec::text("expiry_date"),
        ColumnSpec::text("card_provider"),
        ColumnSpec::date("date_payment_confirmed"),
    ],
    composite: None,
    pass_through: false,
};

static STORES: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Stores,
    drop_columns: &["index", "lat"],
    columns: &[
        ColumnSpec::text("store_code"),
        ColumnSpec::text("address"),
        ColumnSpec::text("store_type"),
        ColumnSpec::float("latitude"),
        ColumnSpec::float("longitude"),
        ColumnSpec::text("locality"),
        ColumnSpec::text("country_code"),
        ColumnSpec::text("continent").optional(),
        ColumnSpec::date("opening_date"),
        ColumnSpec {
            name: "staff_numbers",
            ty: ColumnType::Integer,
            required: false,
            critical: false,
            rule: CoercionRule::Integer,
        },
    ],
    composite: None,
    pass_through: false,
};

static PRODUCTS: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Products,
    drop_columns: &["unnamed:_0", "index"],
    columns: &[
        ColumnSpec::text("product_name"),
        ColumnSpec::text("category"),
        ColumnSpec::text("ean"),
        ColumnSpec::text("uuid"),
        ColumnSpec::text("product_code"),
        ColumnSpec::text("removed").optional(),
        ColumnSpec {
            name: "weight",
            ty: ColumnType::Float,
            required: true,
            critical: true,
            rule: CoercionRule::Weight,
        },
        ColumnSpec {
            name: "product_price",
            ty: ColumnType::Float,
            required: true,
            critical: true,
            rule: CoercionRule::Currency,
        },
        ColumnSpec::date("date_added"),
    ],
    composite: None,
    pass_through: false,
};

static ORDERS: DatasetProfile = DatasetProfile {
    kind: DatasetKind::Orders,
    drop_columns: &["level_0", "index", "first_name", "last_name", "1"],
    columns: &[],
    composite: None,
    pass_through: true,
};

static DATE_TIMES: DatasetProfile = DatasetProfile {
    kind: DatasetKind::DateTimes,
    drop_columns: &["index"],
    columns: &[
        ColumnSpec {
            name: "datetime",
            ty: ColumnType::DateTime,
            required: true,
            critical: true,
            rule: CoercionRule::Date,
        },
        ColumnSpec {
            name: "time_period",
            ty: ColumnType::Text,
            required: true,
            critical: false,
            rule: CoercionRule::Capitalize,
        },
        ColumnSpec::text("date_uuid").optional(),
    ],
    composite: Some(CompositeDateTime {
        year: "year",
        month: "month",
        day: "day",
        time: "timestamp",
        target: "datetime",
    }),
    pass_through: false,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_kind_has_a_profile() {
        for kind in DatasetKind::ALL {
            let profile = DatasetProfile::for_kind(kind);
            assert_eq!(profile.kind, kind);
        }
    }

    #[test]
    fn composite_target_is_not_a_source_requirement() {
        let profile = DatasetProfile::for_kind(DatasetKind::DateTimes);
        let required = profile.required_source_columns();
        assert!(!required.contains(&"datetime"));
        for column in ["year", "month", "day", "timestamp", "time_period"] {
            assert!(required.contains(&column), "missing {column}");
        }
    }

    #[test]
    fn orders_is_pure_pruning() {
        let profile = DatasetProfile::for_kind(DatasetKind::Orders);
        assert!(profile.pass_through);
        assert!(profile.columns.is_empty());
        assert!(profile.required_source_columns().is_empty());
    }
}
