// src/store/patient.rs

use super::{PgQueryAs, Table};
use crate::models::Patient;

const QUERY_INSERT: &str = r#"
    INSERT INTO patient (name, surname, address, national_id, registration_date)
    VALUES ($1, $2, $3, $4, $5)
    RETURNING id, name, surname, address, national_id, registration_date
"#;

const QUERY_SELECT_ALL: &str = r#"
    SELECT id, name, surname, address, national_id, registration_date
    FROM patient
    ORDER BY id
"#;

const QUERY_SELECT_BY_ID: &str = r#"
    SELECT id, name, surname, address, national_id, registration_date
    FROM patient
    WHERE id = $1
"#;

const QUERY_UPDATE: &str = r#"
    UPDATE patient
    SET name = $1,
        surname = $2,
        address = $3,
        national_id = $4,
        registration_date = $5
    WHERE id = $6
    RETURNING id, name, surname, address, national_id, registration_date
"#;

const QUERY_DELETE: &str = r#"DELETE FROM patient WHERE id = $1"#;

impl Table for Patient {
    const INSERT: &'static str = QUERY_INSERT;
    const SELECT_ALL: &'static str = QUERY_SELECT_ALL;
    const SELECT_BY_ID: &'static str = QUERY_SELECT_BY_ID;
    const UPDATE: &'static str = QUERY_UPDATE;
    const DELETE: &'static str = QUERY_DELETE;

    fn bind_fields<'q, O>(&self, query: PgQueryAs<'q, O>) -> PgQueryAs<'q, O> {
        query
            .bind(self.name.clone())
            .bind(self.surname.clone())
            .bind(self.address.clone())
            .bind(self.national_id.clone())
            .bind(self.registration_date.clone())
    }
}
