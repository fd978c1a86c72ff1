//! Repository implementation for patients.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::patient::{NewPatient, Patient, UpdatePatient};
use crate::domain::types::{DoctorId, PatientId};
use crate::models::patient::{
    NewPatient as DbNewPatient, Patient as DbPatient, UpdatePatient as DbUpdatePatient,
};
use crate::pagination::Paged;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    DieselRepository, PatientListQuery, PatientReader, PatientWriter, fetch_page,
};
use crate::schema::patients;

/// Patients owned by `doctor_id`. Both the count and the page fetch of the
/// patient listing start from this query.
pub(crate) fn doctor_patients(doctor_id: DoctorId) -> patients::BoxedQuery<'static, Sqlite> {
    patients::table
        .filter(patients::doctor_id.eq(doctor_id.get()))
        .into_boxed()
}

/// Escapes `LIKE` wildcards so the term only matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn into_domain(rows: Vec<DbPatient>) -> RepositoryResult<Vec<Patient>> {
    rows.into_iter()
        .map(|row| Patient::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl PatientReader for DieselRepository {
    fn get_patient_by_id(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Option<Patient>> {
        let mut conn = self.conn()?;

        let patient = doctor_patients(doctor_id)
            .filter(patients::id.eq(id.get()))
            .first::<DbPatient>(&mut conn)
            .optional()?;

        patient
            .map(Patient::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_patients(&self, query: PatientListQuery) -> RepositoryResult<Paged<Patient>> {
        let mut conn = self.conn()?;
        let doctor_id = query.doctor_id;

        fetch_page(
            &mut conn,
            query.page,
            |conn| {
                let total = doctor_patients(doctor_id)
                    .count()
                    .get_result::<i64>(conn)?;
                Ok(total)
            },
            |conn, offset, limit| {
                let rows = doctor_patients(doctor_id)
                    .order((patients::created_at.desc(), patients::id.desc()))
                    .offset(offset)
                    .limit(limit)
                    .load::<DbPatient>(conn)?;
                into_domain(rows)
            },
        )
    }

    fn search_patients(&self, doctor_id: DoctorId, term: &str) -> RepositoryResult<Vec<Patient>> {
        let mut conn = self.conn()?;
        let pattern = format!("%{}%", escape_like(term.trim()));

        let rows = doctor_patients(doctor_id)
            .filter(patients::name.like(pattern).escape('\\'))
            .order((patients::created_at.desc(), patients::id.desc()))
            .load::<DbPatient>(&mut conn)?;

        into_domain(rows)
    }
}

impl PatientWriter for DieselRepository {
    fn create_patient(&self, new_patient: &NewPatient) -> RepositoryResult<Patient> {
        let mut conn = self.conn()?;
        let insertable: DbNewPatient = new_patient.into();

        let created = diesel::insert_into(patients::table)
            .values(&insertable)
            .get_result::<DbPatient>(&mut conn)?;

        Patient::try_from(created).map_err(RepositoryError::from)
    }

    fn update_patient(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
        updates: &UpdatePatient,
    ) -> RepositoryResult<Patient> {
        let mut conn = self.conn()?;
        let changes: DbUpdatePatient = updates.into();

        let updated = diesel::update(
            patients::table
                .filter(patients::id.eq(id.get()))
                .filter(patients::doctor_id.eq(doctor_id.get())),
        )
        .set(&changes)
        .get_result::<DbPatient>(&mut conn)?;

        Patient::try_from(updated).map_err(RepositoryError::from)
    }
}
