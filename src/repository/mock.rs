//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::clinical_record::{ClinicalRecord, ClinicalRecordEntry, NewClinicalRecord};
use crate::domain::patient::{NewPatient, Patient, UpdatePatient};
use crate::domain::types::{ClinicalRecordId, DoctorId, PatientId};
use crate::pagination::Paged;
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ClinicalRecordListQuery, ClinicalRecordReader, ClinicalRecordWriter, PatientListQuery,
    PatientReader, PatientRecordsQuery, PatientWriter,
};

mock! {
    pub Repository {}

    impl PatientReader for Repository {
        fn get_patient_by_id(
            &self,
            id: PatientId,
            doctor_id: DoctorId,
        ) -> RepositoryResult<Option<Patient>>;
        fn list_patients(&self, query: PatientListQuery) -> RepositoryResult<Paged<Patient>>;
        fn search_patients(
            &self,
            doctor_id: DoctorId,
            term: &str,
        ) -> RepositoryResult<Vec<Patient>>;
    }

    impl PatientWriter for Repository {
        fn create_patient(&self, new_patient: &NewPatient) -> RepositoryResult<Patient>;
        fn update_patient(
            &self,
            id: PatientId,
            doctor_id: DoctorId,
            updates: &UpdatePatient,
        ) -> RepositoryResult<Patient>;
    }

    impl ClinicalRecordReader for Repository {
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

    impl ClinicalRecordWriter for Repository {
        fn create_record(&self, new_record: &NewClinicalRecord) -> RepositoryResult<ClinicalRecord>;
    }
}
