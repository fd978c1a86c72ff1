//! Repository implementation for clinical records.

use std::collections::{HashMap, HashSet};

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::db::DbConnection;
use crate::domain::clinical_record::{ClinicalRecord, ClinicalRecordEntry, NewClinicalRecord};
use crate::domain::patient::Patient;
use crate::domain::types::{ClinicalRecordId, DoctorId, PatientId};
use crate::models::clinical_record::{
    ClinicalRecord as DbClinicalRecord, NewClinicalRecord as DbNewClinicalRecord,
};
use crate::models::patient::Patient as DbPatient;
use crate::pagination::Paged;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{
    ClinicalRecordListQuery, ClinicalRecordReader, ClinicalRecordWriter, DieselRepository,
    PatientRecordsQuery, fetch_page,
};
use crate::schema::{clinical_records, patients};

/// Records whose patient belongs to `doctor_id`, optionally narrowed to a
/// single patient. Count and fetch of both record listings start here.
fn visible_records(
    doctor_id: DoctorId,
    patient_id: Option<PatientId>,
) -> clinical_records::BoxedQuery<'static, Sqlite> {
    let owned_patients = patients::table
        .filter(patients::doctor_id.eq(doctor_id.get()))
        .select(patients::id);

    let mut records = clinical_records::table
        .filter(clinical_records::patient_id.eq_any(owned_patients))
        .into_boxed();

    if let Some(patient_id) = patient_id {
        records = records.filter(clinical_records::patient_id.eq(patient_id.get()));
    }

    records
}

fn load_page(
    conn: &mut DbConnection,
    doctor_id: DoctorId,
    patient_id: Option<PatientId>,
    offset: i64,
    limit: i64,
) -> RepositoryResult<Vec<DbClinicalRecord>> {
    let rows = visible_records(doctor_id, patient_id)
        .order((
            clinical_records::created_at.desc(),
            clinical_records::id.desc(),
        ))
        .offset(offset)
        .limit(limit)
        .load::<DbClinicalRecord>(conn)?;
    Ok(rows)
}

fn count(
    conn: &mut DbConnection,
    doctor_id: DoctorId,
    patient_id: Option<PatientId>,
) -> RepositoryResult<i64> {
    let total = visible_records(doctor_id, patient_id)
        .count()
        .get_result::<i64>(conn)?;
    Ok(total)
}

/// Attaches the owning patient to each record, keeping the record order.
fn with_patients(
    conn: &mut DbConnection,
    doctor_id: DoctorId,
    records: Vec<DbClinicalRecord>,
) -> RepositoryResult<Vec<ClinicalRecordEntry>> {
    let patient_ids: Vec<i32> = records
        .iter()
        .map(|record| record.patient_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .collect();

    let patient_map = patients::table
        .filter(patients::doctor_id.eq(doctor_id.get()))
        .filter(patients::id.eq_any(patient_ids))
        .load::<DbPatient>(conn)?
        .into_iter()
        .map(|row| -> RepositoryResult<(i32, Patient)> {
            let id = row.id;
            Ok((id, Patient::try_from(row)?))
        })
        .collect::<RepositoryResult<HashMap<i32, Patient>>>()?;

    records
        .into_iter()
        .map(|row| -> RepositoryResult<ClinicalRecordEntry> {
            let patient = patient_map
                .get(&row.patient_id)
                .cloned()
                .ok_or(RepositoryError::NotFound)?;
            let record = ClinicalRecord::try_from(row)?;
            Ok(ClinicalRecordEntry { record, patient })
        })
        .collect()
}

impl ClinicalRecordReader for DieselRepository {
    fn get_record_by_id(
        &self,
        id: ClinicalRecordId,
        doctor_id: DoctorId,
    ) -> RepositoryResult<Option<ClinicalRecordEntry>> {
        let mut conn = self.conn()?;

        let record = visible_records(doctor_id, None)
            .filter(clinical_records::id.eq(id.get()))
            .first::<DbClinicalRecord>(&mut conn)
            .optional()?;

        match record {
            Some(record) => Ok(with_patients(&mut conn, doctor_id, vec![record])?.pop()),
            None => Ok(None),
        }
    }

    fn list_patient_records(
        &self,
        query: PatientRecordsQuery,
    ) -> RepositoryResult<Paged<ClinicalRecord>> {
        let mut conn = self.conn()?;
        let PatientRecordsQuery {
            doctor_id,
            patient_id,
            page,
        } = query;

        fetch_page(
            &mut conn,
            page,
            |conn| count(conn, doctor_id, Some(patient_id)),
            |conn, offset, limit| {
                load_page(conn, doctor_id, Some(patient_id), offset, limit)?
                    .into_iter()
                    .map(|row| ClinicalRecord::try_from(row).map_err(RepositoryError::from))
                    .collect()
            },
        )
    }

    fn list_doctor_records(
        &self,
        query: ClinicalRecordListQuery,
    ) -> RepositoryResult<Paged<ClinicalRecordEntry>> {
        let mut conn = self.conn()?;
        let doctor_id = query.doctor_id;

        fetch_page(
            &mut conn,
            query.page,
            |conn| count(conn, doctor_id, None),
            |conn, offset, limit| {
                let rows = load_page(conn, doctor_id, None, offset, limit)?;
                with_patients(conn, doctor_id, rows)
            },
        )
    }
}

impl ClinicalRecordWriter for DieselRepository {
    fn create_record(&self, new_record: &NewClinicalRecord) -> RepositoryResult<ClinicalRecord> {
        let mut conn = self.conn()?;
        let insertable: DbNewClinicalRecord = new_record.into();

        let created = diesel::insert_into(clinical_records::table)
            .values(&insertable)
            .get_result::<DbClinicalRecord>(&mut conn)?;

        ClinicalRecord::try_from(created).map_err(RepositoryError::from)
    }
}
