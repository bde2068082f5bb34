use std::fmt;
use std::str::FromStr;

use crate::error::StructuralError;

/// The six dataset kinds the pipeline knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    Users,
    Cards,
    Stores,
    Products,
    Orders,
    DateTimes,
}

impl DatasetKind {
    pub const ALL: [DatasetKind; 6] = [
        DatasetKind::Users,
        DatasetKind::Cards,
        DatasetKind::Stores,
        DatasetKind::Products,
        DatasetKind::Orders,
        DatasetKind::DateTimes,
    ];

    /// Destination table this kind is loaded into.
    pub fn target_table(self) -> &'static str {
        match self {
            DatasetKind::Users => "dim_users",
            DatasetKind::Cards => "dim_card_details",
            DatasetKind::Stores => "dim_store_details",
            DatasetKind::Products => "dim_products",
            DatasetKind::Orders => "orders_table",
            DatasetKind::DateTimes => "dim_date_times",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatasetKind::Users => "users",
            DatasetKind::Cards => "cards",
            DatasetKind::Stores => "stores",
            DatasetKind::Products => "products",
            DatasetKind::Orders => "orders",
            DatasetKind::DateTimes => "date-times",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatasetKind {
    type Err = StructuralError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "users" | "user" => Ok(DatasetKind::Users),
            "cards" | "card" => Ok(DatasetKind::Cards),
            "stores" | "store" => Ok(DatasetKind::Stores),
            "products" | "product" => Ok(DatasetKind::Products),
            "orders" | "order" => Ok(DatasetKind::Orders),
            "date-times" | "date_times" | "datetimes" | "calendar" => Ok(DatasetKind::DateTimes),
            other => Err(StructuralError::UnknownDatasetKind {
                kind: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aliases() {
        assert_eq!("user".parse::<DatasetKind>().unwrap(), DatasetKind::Users);
        assert_eq!(
            "calendar".parse::<DatasetKind>().unwrap(),
            DatasetKind::DateTimes
        );
        assert!("invoices".parse::<DatasetKind>().is_err());
    }

    #[test]
    fn target_tables_are_distinct() {
        let mut names: Vec<_> = DatasetKind::ALL.iter().map(|k| k.target_table()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), DatasetKind::ALL.len());
    }
}
