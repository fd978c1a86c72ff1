//! Persistence traits and the Diesel-backed repository.
//!
//! Every paged listing goes through [`fetch_page`]: count the rows matching
//! the listing's filter, derive the window, then fetch exactly one page of
//! rows with the same filter.

use crate::db::{DbConnection, DbPool};
use crate::domain::clinical_record::{ClinicalRecord, ClinicalRecordEntry, NewClinicalRecord};
use crate::domain::patient::{NewPatient, Patient, UpdatePatient};
use crate::domain::types::{ClinicalRecordId, DoctorId, PatientId};
use crate::pagination::{PageRequest, Paged, compute_window};
use crate::repository::errors::RepositoryResult;

pub mod clinical_record;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;
pub mod patient;

/// Diesel repository shared by all handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        self.pool.get().map_err(|err| {
            log::error!("Failed to get connection from pool: {err}");
            err.into()
        })
    }
}

/// Patients owned by one doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientListQuery {
    pub doctor_id: DoctorId,
    pub page: PageRequest,
}

impl PatientListQuery {
    pub fn new(doctor_id: DoctorId, page: PageRequest) -> Self {
        Self { doctor_id, page }
    }
}

/// Clinical records of every patient owned by one doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClinicalRecordListQuery {
    pub doctor_id: DoctorId,
    pub page: PageRequest,
}

impl ClinicalRecordListQuery {
    pub fn new(doctor_id: DoctorId, page: PageRequest) -> Self {
        Self { doctor_id, page }
    }
}

/// Clinical records of one patient, still scoped to the owning doctor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatientRecordsQuery {
    pub doctor_id: DoctorId,
    pub patient_id: PatientId,
    pub page: PageRequest,
}

impl PatientRecordsQuery {
    pub fn new(doctor_id: DoctorId, patient_id: PatientId, page: PageRequest) -> Self {
        Self {
            doctor_id,
            patient_id,
            page,
        }
    }
}

/// Runs one count-then-slice paged query on `conn`.
///
/// `count` and `fetch` must apply the same filter. The store never receives
/// a negative offset: pages at or below zero read from the first row while
/// the window still describes the requested page. A failure of either query
/// is returned as is; no partial page is produced.
pub fn fetch_page<Conn, T, C, F>(
    conn: &mut Conn,
    request: PageRequest,
    count: C,
    fetch: F,
) -> RepositoryResult<Paged<T>>
where
    C: FnOnce(&mut Conn) -> RepositoryResult<i64>,
    F: FnOnce(&mut Conn, i64, i64) -> RepositoryResult<Vec<T>>,
{
    let total = count(conn)?;
    let window = compute_window(request.page, request.limit, total);
    let limit = request.limit.max(1);
    let rows = fetch(conn, window.offset.max(0), limit)?;

    Ok(Paged::new(rows, total, window))
}

pub trait PatientReader {
    fn get_patient_by_id(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Option<Patient>>;
    fn list_patients(&self, query: PatientListQuery) -> RepositoryResult<Paged<Patient>>;
    fn search_patients(&self, doctor_id: DoctorId, term: &str) -> RepositoryResult<Vec<Patient>>;
}

pub trait PatientWriter {
    fn create_patient(&self, new_patient: &NewPatient) -> RepositoryResult<Patient>;
    fn update_patient(
        &self,
        id: PatientId,
        doctor_id: DoctorId,
        updates: &UpdatePatient,
    ) -> RepositoryResult<Patient>;
}

pub trait ClinicalRecordReader {
    fn get_record_by_id(
        &self,
        id: ClinicalRecordId,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Option<ClinicalRecordEntry>>;
    fn list_patient_records(
        &self,
        query: PatientRecordsQuery,
    ) -> RepositoryResult<Paged<ClinicalRecord>>;
    fn list_doctor_records(
        &self,
        query: ClinicalRecordListQuery,
    ) -> RepositoryResult<Paged<ClinicalRecordEntry>>;
}

pub trait ClinicalRecordWriter {
    fn create_record(&self, new_record: &NewClinicalRecord) -> RepositoryResult<ClinicalRecord>;
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::repository::errors::RepositoryError;

    #[test]
    fn fetch_page_uses_window_offset() {
        let seen = Cell::new((0, 0));

        let paged = fetch_page(
            &mut (),
            PageRequest::new(5, 5),
            |_| Ok(23),
            |_, offset, limit| {
                seen.set((offset, limit));
                Ok(vec![21, 22, 23])
            },
        )
        .unwrap();

        assert_eq!(seen.get(), (20, 5));
        assert_eq!(paged.total_records, 23);
        assert_eq!(paged.rows.len(), 3);
        assert!(!paged.window.has_next_page);
    }

    #[test]
    fn fetch_page_never_sends_negative_offsets() {
        let seen = Cell::new(-1);

        let paged = fetch_page(
            &mut (),
            PageRequest::new(-2, 10),
            |_| Ok(30),
            |_, offset, _| {
                seen.set(offset);
                Ok(vec![1])
            },
        )
        .unwrap();

        assert_eq!(seen.get(), 0);
        assert_eq!(paged.window.offset, -30);
        assert!(!paged.window.has_previous_page);
    }

    #[test]
    fn count_failure_skips_fetch() {
        let fetched = Cell::new(false);

        let result: RepositoryResult<Paged<i32>> = fetch_page(
            &mut (),
            PageRequest::new(1, 10),
            |_| Err(RepositoryError::ConnectionError("down".to_string())),
            |_, _, _| {
                fetched.set(true);
                Ok(vec![])
            },
        );

        assert!(matches!(result, Err(RepositoryError::ConnectionError(_))));
        assert!(!fetched.get());
    }

    #[test]
    fn fetch_failure_is_not_a_zero_page() {
        let result: RepositoryResult<Paged<i32>> = fetch_page(
            &mut (),
            PageRequest::new(1, 10),
            |_| Ok(4),
            |_, _, _| Err(RepositoryError::DatabaseError("locked".to_string())),
        );

        assert!(matches!(result, Err(RepositoryError::DatabaseError(_))));
    }
}
