use {
    crate::error::{self, Result},
    def::{decode_row, Row, Schema},
    snafu::prelude::*,
    tracing::debug,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self::with_rows(name, schema, vec![])
    }

    pub(crate) fn with_rows(name: impl Into<String>, schema: Schema, rows: Vec<Row>) -> Self {
        Self {
            name: name.into(),
            schema,
            rows,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Decodes raw tokens against this table's schema, without storing them.
    pub fn decode_row<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Row> {
        decode_row(&self.schema, tokens).context(error::DecodeSnafu)
    }

    /// Appends a row and returns its index.
    pub fn add_row(&mut self, row: Row) -> Result<usize> {
        self.check_arity(&row)?;

        self.rows.push(row);
        let index = self.rows.len() - 1;
        debug!(table = %self.name, index, "row added");

        Ok(index)
    }

    /// Fails with an index error unless `index` names a stored row.
    pub fn check_index(&self, index: usize) -> Result<()> {
        let len = self.rows.len();
        ensure!(index < len, error::IndexSnafu { index, len });
        Ok(())
    }

    /// The index is checked before the row.
    pub fn edit_row(&mut self, index: usize, row: Row) -> Result<()> {
        self.check_index(index)?;
        self.check_arity(&row)?;

        self.rows[index] = row;
        debug!(table = %self.name, index, "row replaced");

        Ok(())
    }

    /// Returns the rows, with their indexes, whose rendered value of `field`
    /// contains `pattern`. Matching is a case-sensitive substring test and rows
    /// keep their stored order.
    pub fn search_rows(&self, field: &str, pattern: &str) -> Result<Vec<(usize, &Row)>> {
        let position = self
            .schema
            .position(field)
            .context(error::UnknownFieldSnafu {
                table: &self.name,
                name: field,
            })?;

        Ok(self
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| {
                row.get(position)
                    .is_some_and(|value| value.to_string().contains(pattern))
            })
            .collect())
    }

    fn check_arity(&self, row: &Row) -> Result<()> {
        ensure!(
            row.len() == self.schema.len(),
            error::AritySnafu {
                expected: self.schema.len(),
                actual: row.len(),
            }
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{Error, ErrorKind},
        def::{DataType, Field, Value},
        rand::prelude::*,
    };

    fn products() -> Table {
        let schema = Schema::new(vec![
            Field::new("id", DataType::Integer),
            Field::new("price", DataType::Real),
            Field::new("label", DataType::String),
        ])
        .unwrap();

        Table::new("products", schema)
    }

    fn row(id: i64, price: f64, label: &str) -> Row {
        vec![Value::Integer(id), Value::Real(price), label.into()]
    }

    #[test]
    fn add_row_appends() -> Result<()> {
        let mut table = products();

        assert_eq!(table.add_row(row(1, 9.99, "widget"))?, 0);
        assert_eq!(table.add_row(row(2, 0.5, "gadget"))?, 1);

        assert_eq!(table.rows(), &[row(1, 9.99, "widget"), row(2, 0.5, "gadget")]);

        Ok(())
    }

    #[test]
    fn add_row_arity_mismatch_leaves_rows_untouched() {
        let mut table = products();
        table.add_row(row(1, 9.99, "widget")).unwrap();

        let err = table.add_row(vec![Value::Integer(2)]).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Arity);
        assert_eq!(table.rows().len(), 1);
    }

    #[test]
    fn decode_then_add() {
        let mut table = products();

        let decoded = table.decode_row(&["1", "9.99", "widget"]).unwrap();
        table.add_row(decoded).unwrap();
        assert_eq!(table.rows(), &[row(1, 9.99, "widget")]);

        let err = table.decode_row(&["1", "abc", "widget"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Format);
        assert_eq!(table.rows().len(), 1);

        let err = table.decode_row(&["1"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);
    }

    #[test]
    fn edit_row_replaces_one_row() -> Result<()> {
        let mut table = products();
        for i in 0..4 {
            table.add_row(row(i, i as f64, "item"))?;
        }

        table.edit_row(2, row(20, 2.5, "edited"))?;

        assert_eq!(
            table.rows(),
            &[
                row(0, 0.0, "item"),
                row(1, 1.0, "item"),
                row(20, 2.5, "edited"),
                row(3, 3.0, "item"),
            ]
        );

        Ok(())
    }

    #[test]
    fn edit_row_rejects_bad_index_and_arity() {
        let mut table = products();
        table.add_row(row(1, 1.0, "a")).unwrap();
        let before = table.clone();

        let err = table.edit_row(1, row(2, 2.0, "b")).unwrap_err();
        assert!(matches!(err, Error::Index { index: 1, len: 1 }));

        let err = table.edit_row(0, vec![]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Arity);

        let err = table.edit_row(3, vec![]).unwrap_err();
        assert!(matches!(err, Error::Index { index: 3, len: 1 }));
        assert!(table.check_index(0).is_ok());

        assert_eq!(table, before);
    }

    #[test]
    fn search_by_substring() -> Result<()> {
        let mut table = products();
        table.add_row(row(10, 1.25, "Widget"))?;
        table.add_row(row(11, 5.0, "widget pro"))?;
        table.add_row(row(210, 2.5, "gizmo"))?;

        let indexes =
            |hits: Vec<(usize, &Row)>| hits.into_iter().map(|(i, _)| i).collect::<Vec<_>>();

        assert_eq!(indexes(table.search_rows("label", "widget")?), vec![1]);
        assert_eq!(indexes(table.search_rows("id", "10")?), vec![0, 2]);
        assert_eq!(indexes(table.search_rows("price", ".0")?), vec![1]);
        assert_eq!(indexes(table.search_rows("label", "")?), vec![0, 1, 2]);
        assert!(table.search_rows("label", "nothing")?.is_empty());

        Ok(())
    }

    #[test]
    fn search_unknown_field() {
        let table = products();

        let err = table.search_rows("colour", "red").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::UnknownField);
        assert_eq!(err.to_string(), r#"table "products" has no field "colour""#);
    }

    #[test]
    fn random_search_matches_filter() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut table = products();
        let words = ["ab", "ba", "abc", "cab", "b", ""];

        for i in 0..200 {
            let label = words.choose(&mut rng).unwrap();
            table.add_row(row(i, rng.gen_range(0.0..10.0), label)).unwrap();
        }

        for pattern in ["a", "ab", "b", "c", "x", ""] {
            let expected: Vec<usize> = table
                .rows()
                .iter()
                .enumerate()
                .filter(|(_, r)| r[2].to_string().contains(pattern))
                .map(|(i, _)| i)
                .collect();

            let found: Vec<usize> = table
                .search_rows("label", pattern)
                .unwrap()
                .into_iter()
                .map(|(i, _)| i)
                .collect();

            assert_eq!(found, expected);
        }
    }

    #[test]
    fn random_edits_touch_only_their_row() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut table = products();
        for i in 0..50 {
            table.add_row(row(i, 0.0, "orig")).unwrap();
        }

        let mut expected = table.rows().to_vec();
        for _ in 0..100 {
            let index = rng.gen_range(0..60);
            let new_row = row(rng.gen(), 1.0, "new");

            match table.edit_row(index, new_row.clone()) {
                Ok(()) => expected[index] = new_row,
                Err(err) => {
                    assert!(index >= 50);
                    assert_eq!(err.kind(), ErrorKind::Index);
                }
            }

            assert_eq!(table.rows(), expected.as_slice());
        }
    }
}
