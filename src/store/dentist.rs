// src/store/dentist.rs

use super::{PgQueryAs, Table};
use crate::models::Dentist;

const QUERY_INSERT: &str = r#"
    INSERT INTO dentist (surname, name, license)
    VALUES ($1, $2, $3)
    RETURNING id, surname, name, license
"#;

const QUERY_SELECT_ALL: &str = r#"
    SELECT id, surname, name, license
    FROM dentist
    ORDER BY id
"#;

const QUERY_SELECT_BY_ID: &str = r#"
    SELECT id, surname, name, license
    FROM dentist
    WHERE id = $1
"#;

const QUERY_UPDATE: &str = r#"
    UPDATE dentist
    SET surname = $1,
        name = $2,
        license = $3
    WHERE id = $4
    RETURNING id, surname, name, license
"#;

const QUERY_DELETE: &str = r#"DELETE FROM dentist WHERE id = $1"#;

impl Table for Dentist {
    const INSERT: &'static str = QUERY_INSERT;
    const SELECT_ALL: &'static str = QUERY_SELECT_ALL;
    const SELECT_BY_ID: &'static str = QUERY_SELECT_BY_ID;
    const UPDATE: &'static str = QUERY_UPDATE;
    const DELETE: &'static str = QUERY_DELETE;

    fn bind_fields<'q, O>(&self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(self.surname.clone())
            .bind(self.name.clone())
            .bind(self.license.clone())
    }
}
