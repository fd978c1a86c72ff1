use clinic_records::domain::clinical_record::{ClinicalRecord, NewClinicalRecord};
use clinic_records::domain::patient::{NewPatient, Patient, UpdatePatient};
use clinic_records::domain::types::{
    ClinicalRecordId, DoctorId, DocumentType, DocumentValue, PatientEmail, PatientId, PatientName,
    RecordMessage,
};
use clinic_records::pagination::PageRequest;
use clinic_records::repository::errors::RepositoryError;
use clinic_records::repository::{
    ClinicalRecordListQuery, ClinicalRecordReader, ClinicalRecordWriter, DieselRepository,
    PatientListQuery, PatientReader, PatientRecordsQuery, PatientWriter,
};

mod common;

fn doctor(id: i32) -> DoctorId {
    DoctorId::new(id).unwrap()
}

fn add_patient(repo: &DieselRepository, doctor_id: DoctorId, name: &str) -> Patient {
    let new_patient = NewPatient::new(
        doctor_id,
        PatientName::new(name).unwrap(),
        None,
        None,
        None,
        None,
    );
    repo.create_patient(&new_patient).unwrap()
}

fn add_record(repo: &DieselRepository, patient_id: PatientId, message: &str) -> ClinicalRecord {
    let new_record = NewClinicalRecord::new(patient_id, RecordMessage::new(message).unwrap());
    repo.create_record(&new_record).unwrap()
}

fn names(patients: &[Patient]) -> Vec<&str> {
    patients.iter().map(|patient| patient.name.as_str()).collect()
}

#[test]
fn test_patient_roster_last_page() {
    let test_db = common::TestDb::new("test_patient_roster_last_page.db");
    let repo = DieselRepository::new(test_db.pool());

    for n in 1..=23 {
        add_patient(&repo, doctor(1), &format!("Patient {n:02}"));
    }

    let paged = repo
        .list_patients(PatientListQuery::new(doctor(1), PageRequest::new(5, 5)))
        .unwrap();

    assert_eq!(paged.total_records, 23);
    assert_eq!(paged.window.pages, vec![1, 2, 3, 4, 5]);
    assert!(paged.window.has_previous_page);
    assert!(!paged.window.has_next_page);
    // Newest first, so the last page holds the three oldest patients.
    assert_eq!(
        names(&paged.rows),
        vec!["Patient 03", "Patient 02", "Patient 01"]
    );
}

#[test]
fn test_patient_roster_page_past_the_end() {
    let test_db = common::TestDb::new("test_patient_roster_page_past_the_end.db");
    let repo = DieselRepository::new(test_db.pool());

    for n in 1..=4 {
        add_patient(&repo, doctor(1), &format!("Patient {n}"));
    }

    let paged = repo
        .list_patients(PatientListQuery::new(doctor(1), PageRequest::new(3, 10)))
        .unwrap();

    assert!(paged.is_empty());
    assert_eq!(paged.total_records, 4);
    assert_eq!(paged.window.pages, vec![1]);
    assert_eq!(paged.window.visible_pages, vec![1]);
    assert!(paged.window.has_previous_page);
    assert!(!paged.window.has_next_page);
}

#[test]
fn test_non_positive_page_reads_first_rows() {
    let test_db = common::TestDb::new("test_non_positive_page_reads_first_rows.db");
    let repo = DieselRepository::new(test_db.pool());

    for n in 1..=3 {
        add_patient(&repo, doctor(1), &format!("Patient {n}"));
    }

    let paged = repo
        .list_patients(PatientListQuery::new(doctor(1), PageRequest::new(0, 2)))
        .unwrap();

    assert_eq!(names(&paged.rows), vec!["Patient 3", "Patient 2"]);
    assert!(!paged.window.has_previous_page);
    assert!(paged.window.has_next_page);
}

#[test]
fn test_patient_roster_is_isolated_per_doctor() {
    let test_db = common::TestDb::new("test_patient_roster_is_isolated_per_doctor.db");
    let repo = DieselRepository::new(test_db.pool());

    add_patient(&repo, doctor(1), "Ana");
    add_patient(&repo, doctor(1), "Andrea");
    let foreign = add_patient(&repo, doctor(2), "Anselmo");

    let paged = repo
        .list_patients(PatientListQuery::new(doctor(1), PageRequest::new(1, 10)))
        .unwrap();
    assert_eq!(paged.total_records, 2);
    assert_eq!(names(&paged.rows), vec!["Andrea", "Ana"]);

    let found = repo.search_patients(doctor(1), "An").unwrap();
    assert_eq!(found.len(), 2);
    assert!(found.iter().all(|patient| patient.doctor_id == doctor(1)));

    assert!(
        repo.get_patient_by_id(foreign.id, doctor(1))
            .unwrap()
            .is_none()
    );
    assert!(
        repo.get_patient_by_id(foreign.id, doctor(2))
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_search_treats_wildcards_literally() {
    let test_db = common::TestDb::new("test_search_treats_wildcards_literally.db");
    let repo = DieselRepository::new(test_db.pool());

    add_patient(&repo, doctor(1), "Ana");
    add_patient(&repo, doctor(1), "Beatriz");
    add_patient(&repo, doctor(1), "Carlos_Bis");

    assert!(repo.search_patients(doctor(1), "%").unwrap().is_empty());
    let underscored = repo.search_patients(doctor(1), "_").unwrap();
    assert_eq!(names(&underscored), vec!["Carlos_Bis"]);
    let found = repo.search_patients(doctor(1), "bea").unwrap();
    assert_eq!(names(&found), vec!["Beatriz"]);
}

#[test]
fn test_patient_create_and_rename() {
    let test_db = common::TestDb::new("test_patient_create_and_rename.db");
    let repo = DieselRepository::new(test_db.pool());

    let new_patient = NewPatient::new(
        doctor(1),
        PatientName::new("Lucia").unwrap(),
        None,
        Some(DocumentType::Nif),
        Some(DocumentValue::new("X1234567L").unwrap()),
        Some(PatientEmail::new("lucia@example.com").unwrap()),
    );
    let created = repo.create_patient(&new_patient).unwrap();
    assert_eq!(created.document_type, Some(DocumentType::Nif));
    assert_eq!(created.email.as_ref().unwrap().as_str(), "lucia@example.com");

    let updates = UpdatePatient::new(PatientName::new("Lucía").unwrap());
    let renamed = repo.update_patient(created.id, doctor(1), &updates).unwrap();
    assert_eq!(renamed.name.as_str(), "Lucía");
    assert_eq!(renamed.document_type, Some(DocumentType::Nif));

    let foreign = repo.update_patient(created.id, doctor(2), &updates);
    assert!(matches!(foreign, Err(RepositoryError::NotFound)));
}

#[test]
fn test_patient_records_are_scoped_to_patient() {
    let test_db = common::TestDb::new("test_patient_records_are_scoped_to_patient.db");
    let repo = DieselRepository::new(test_db.pool());

    let ana = add_patient(&repo, doctor(1), "Ana");
    let bea = add_patient(&repo, doctor(1), "Bea");
    for n in 1..=12 {
        add_record(&repo, ana.id, &format!("<p>Ana {n}</p>"));
    }
    add_record(&repo, bea.id, "<p>Bea 1</p>");

    let first = repo
        .list_patient_records(PatientRecordsQuery::new(
            doctor(1),
            ana.id,
            PageRequest::new(1, 10),
        ))
        .unwrap();
    assert_eq!(first.total_records, 12);
    assert_eq!(first.rows.len(), 10);
    assert_eq!(first.rows[0].message.as_str(), "<p>Ana 12</p>");
    assert!(first.rows.iter().all(|record| record.patient_id == ana.id));

    let second = repo
        .list_patient_records(PatientRecordsQuery::new(
            doctor(1),
            ana.id,
            PageRequest::new(2, 10),
        ))
        .unwrap();
    assert_eq!(second.rows.len(), 2);
    assert_eq!(second.rows[1].message.as_str(), "<p>Ana 1</p>");

    let foreign = repo
        .list_patient_records(PatientRecordsQuery::new(
            doctor(2),
            ana.id,
            PageRequest::new(1, 10),
        ))
        .unwrap();
    assert_eq!(foreign.total_records, 0);
    assert!(foreign.is_empty());
    assert!(foreign.window.pages.is_empty());
}

#[test]
fn test_doctor_records_include_only_own_patients() {
    let test_db = common::TestDb::new("test_doctor_records_include_only_own_patients.db");
    let repo = DieselRepository::new(test_db.pool());

    let ana = add_patient(&repo, doctor(1), "Ana");
    let bea = add_patient(&repo, doctor(1), "Bea");
    let carlos = add_patient(&repo, doctor(2), "Carlos");
    add_record(&repo, ana.id, "<p>one</p>");
    add_record(&repo, carlos.id, "<p>foreign</p>");
    add_record(&repo, bea.id, "<p>two</p>");
    add_record(&repo, ana.id, "<p>three</p>");

    let paged = repo
        .list_doctor_records(ClinicalRecordListQuery::new(
            doctor(1),
            PageRequest::new(1, 2),
        ))
        .unwrap();

    assert_eq!(paged.total_records, 3);
    assert_eq!(paged.window.pages, vec![1, 2]);
    let shown: Vec<(&str, &str)> = paged
        .rows
        .iter()
        .map(|entry| (entry.record.message.as_str(), entry.patient.name.as_str()))
        .collect();
    assert_eq!(shown, vec![("<p>three</p>", "Ana"), ("<p>two</p>", "Bea")]);

    let rest = repo
        .list_doctor_records(ClinicalRecordListQuery::new(
            doctor(1),
            PageRequest::new(2, 2),
        ))
        .unwrap();
    assert_eq!(rest.rows.len(), 1);
    assert_eq!(rest.rows[0].record.message.as_str(), "<p>one</p>");
}

#[test]
fn test_count_matches_fetchable_rows() {
    let test_db = common::TestDb::new("test_count_matches_fetchable_rows.db");
    let repo = DieselRepository::new(test_db.pool());

    let ana = add_patient(&repo, doctor(1), "Ana");
    let carlos = add_patient(&repo, doctor(2), "Carlos");
    for n in 1..=7 {
        add_record(&repo, ana.id, &format!("<p>{n}</p>"));
        add_record(&repo, carlos.id, &format!("<p>{n}</p>"));
    }

    let mut fetched = 0;
    let mut page = 1;
    loop {
        let paged = repo
            .list_doctor_records(ClinicalRecordListQuery::new(
                doctor(1),
                PageRequest::new(page, 3),
            ))
            .unwrap();
        if paged.is_empty() {
            assert_eq!(fetched, paged.total_records);
            break;
        }
        fetched += paged.rows.len() as i64;
        page += 1;
    }

    assert_eq!(fetched, 7);
}

#[test]
fn test_record_lookup_is_scoped_to_doctor() {
    let test_db = common::TestDb::new("test_record_lookup_is_scoped_to_doctor.db");
    let repo = DieselRepository::new(test_db.pool());

    let ana = add_patient(&repo, doctor(1), "Ana");
    let record = add_record(&repo, ana.id, "<p>Alergia</p>");

    let entry = repo
        .get_record_by_id(record.id, doctor(1))
        .unwrap()
        .unwrap();
    assert_eq!(entry.patient.id, ana.id);
    assert_eq!(entry.record.message.as_str(), "<p>Alergia</p>");

    assert!(
        repo.get_record_by_id(record.id, doctor(2))
            .unwrap()
            .is_none()
    );
    assert!(
        repo.get_record_by_id(ClinicalRecordId::new(999).unwrap(), doctor(1))
            .unwrap()
            .is_none()
    );
}
