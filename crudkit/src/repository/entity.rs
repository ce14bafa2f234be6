//! Entity binding between a record type and its table

use uuid::Uuid;

use super::filter::SqlValue;

/// Binds one record type to one database table
///
/// An implementation describes the table an entity lives in and how its
/// fields are bound for insertion. `COLUMNS` doubles as the whitelist the
/// query builder validates filter, order-by, and update fields against:
/// only names listed here ever appear in generated SQL.
///
/// # Invariant
///
/// `insert_values` must return exactly one value per entry in `COLUMNS`,
/// in the same order, using the `id` passed in for the identity column.
///
/// # Example
///
/// ```rust
/// use crudkit::repository::{Entity, SqlValue};
/// use uuid::Uuid;
///
/// struct Note {
///     id: Option<Uuid>,
///     body: String,
/// }
///
/// impl Entity for Note {
///     const ENTITY: &'static str = "Note";
///     const TABLE: &'static str = "notes";
///     const COLUMNS: &'static [&'static str] = &["id", "body"];
///
///     fn id(&self) -> Option<Uuid> {
///         self.id
///     }
///
///     fn insert_values(&self, id: Uuid) -> Vec<SqlValue> {
///         vec![SqlValue::Uuid(id), SqlValue::Text(self.body.clone())]
///     }
/// }
/// ```
pub trait Entity: Send + Sync + 'static {
    /// Human-readable entity name, used in error messages
    const ENTITY: &'static str;

    /// SQL table name
    const TABLE: &'static str;

    /// Ordered column list; the first entry is the identity column
    const COLUMNS: &'static [&'static str];

    /// The entity's identity, if already assigned
    fn id(&self) -> Option<Uuid>;

    /// Values for every column in `COLUMNS` order, with `id` substituted
    /// for the identity column
    fn insert_values(&self, id: Uuid) -> Vec<SqlValue>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe {
        id: Option<Uuid>,
        label: String,
    }

    impl Entity for Probe {
        const ENTITY: &'static str = "Probe";
        const TABLE: &'static str = "probes";
        const COLUMNS: &'static [&'static str] = &["id", "label"];

        fn id(&self) -> Option<Uuid> {
            self.id
        }

        fn insert_values(&self, id: Uuid) -> Vec<SqlValue> {
            vec![SqlValue::Uuid(id), SqlValue::Text(self.label.clone())]
        }
    }

    #[test]
    fn test_insert_values_align_with_columns() {
        let probe = Probe {
            id: None,
            label: "x".to_string(),
        };
        let id = Uuid::new_v4();
        let values = probe.insert_values(id);
        assert_eq!(values.len(), Probe::COLUMNS.len());
        assert_eq!(values[0], SqlValue::Uuid(id));
    }
}
