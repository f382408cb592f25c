//! Integration tests for the recruitment HTTP API.
//!
//! These tests drive the full router against a stateful in-memory
//! backend: open a cycle, enroll applicants, and process screening
//! rounds all the way to cycle close, verifying the JSON contract at
//! each step.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use pyp_recruitment::adapters::http::recruitment::{recruitment_router, RecruitmentAppState};
use pyp_recruitment::domain::applicant::{Applicant, ApplicantStatus, IdNumber};
use pyp_recruitment::domain::cycle::{Cycle, StageAdvance};
use pyp_recruitment::domain::foundation::{
    ApplicantId, CycleId, DomainError, EmployeeId, ErrorCode, StageId, Timestamp,
};
use pyp_recruitment::domain::screening::{
    RoundOutcome, ScreeningDecision, ScreeningProcessor, ScreeningRecord,
};
use pyp_recruitment::ports::{
    AccessChecker, AccessDeniedReason, AccessResult, ApplicantRepository, CycleRepository,
    NewEnrollment, ScreeningRepository,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Shared in-memory state standing in for the database.
#[derive(Default)]
struct Store {
    cycle: Option<Cycle>,
    applicants: Vec<Applicant>,
    records: Vec<ScreeningRecord>,
}

/// In-memory backend implementing all repository ports over one store.
#[derive(Clone, Default)]
struct InMemoryBackend {
    store: Arc<Mutex<Store>>,
}

#[async_trait]
impl CycleRepository for InMemoryBackend {
    async fn save(&self, cycle: &Cycle) -> Result<(), DomainError> {
        self.store.lock().unwrap().cycle = Some(cycle.clone());
        Ok(())
    }

    async fn find_current(&self) -> Result<Option<Cycle>, DomainError> {
        Ok(self.store.lock().unwrap().cycle.clone())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<Cycle>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .cycle
            .clone()
            .filter(|c| c.id() == *id))
    }
}

#[async_trait]
impl ApplicantRepository for InMemoryBackend {
    async fn enroll(&self, enrollment: NewEnrollment) -> Result<Applicant, DomainError> {
        let mut store = self.store.lock().unwrap();
        let number = store
            .applicants
            .iter()
            .filter(|a| a.cycle_id() == enrollment.cycle_id)
            .count() as u32
            + 1;

        // Persist the first-stage roster membership the handler computed
        // on its own copy of the aggregate.
        let cycle = store
            .cycle
            .as_mut()
            .ok_or_else(|| DomainError::inconsistency("No cycle persisted"))?;
        cycle.register_applicant(enrollment.applicant_id)?;

        let applicant = Applicant::enroll(
            enrollment.applicant_id,
            enrollment.cycle_id,
            IdNumber::new(number)?,
            enrollment.personal,
            enrollment.apply_at,
        );
        store.applicants.push(applicant.clone());
        Ok(applicant)
    }

    async fn find(
        &self,
        cycle_id: &CycleId,
        applicant_id: &ApplicantId,
    ) -> Result<Option<Applicant>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .applicants
            .iter()
            .find(|a| a.cycle_id() == *cycle_id && a.id() == *applicant_id)
            .cloned())
    }

    async fn find_by_cycle(&self, cycle_id: &CycleId) -> Result<Vec<Applicant>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .applicants
            .iter()
            .filter(|a| a.cycle_id() == *cycle_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl ScreeningRepository for InMemoryBackend {
    async fn screened_applicants(
        &self,
        stage_id: &StageId,
    ) -> Result<HashSet<ApplicantId>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.stage_id() == *stage_id)
            .map(|r| r.applicant_id())
            .collect())
    }

    async fn find_by_stage(
        &self,
        stage_id: &StageId,
    ) -> Result<Vec<ScreeningRecord>, DomainError> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .records
            .iter()
            .filter(|r| r.stage_id() == *stage_id)
            .cloned()
            .collect())
    }

    async fn commit_round(
        &self,
        cycle: &Cycle,
        outcome: &RoundOutcome,
    ) -> Result<(), DomainError> {
        let mut store = self.store.lock().unwrap();

        // Mirror the database guard: a round computed on a stale
        // aggregate must not move the stage pointer backwards.
        let screened_stage = match outcome.transition {
            StageAdvance::Advanced { from, .. } => from,
            StageAdvance::Closed { last } => last,
        };
        let still_current = store
            .cycle
            .as_ref()
            .and_then(|c| c.stages().iter().find(|s| s.id() == screened_stage))
            .map(|s| s.is_current())
            .unwrap_or(false);
        if !still_current {
            return Err(DomainError::new(
                ErrorCode::ConcurrentModification,
                "A concurrent round advanced the cycle",
            ));
        }

        for record in &outcome.records {
            store.records.push(record.clone());
            if let Some(applicant) = store
                .applicants
                .iter_mut()
                .find(|a| a.cycle_id() == cycle.id() && a.id() == record.applicant_id())
            {
                *applicant = Applicant::reconstitute(
                    applicant.id(),
                    applicant.cycle_id(),
                    applicant.id_number(),
                    record.status(),
                    *applicant.personal(),
                    applicant.apply_at(),
                );
            }
        }
        store.cycle = Some(cycle.clone());
        Ok(())
    }
}

/// Access checker backed by a fixed set of staff user IDs.
struct StaffDirectory {
    staff: HashSet<Uuid>,
}

impl StaffDirectory {
    fn with_staff(staff: Uuid) -> Self {
        Self {
            staff: [staff].into_iter().collect(),
        }
    }

    fn check(&self, employee_id: &EmployeeId) -> AccessResult {
        if self.staff.contains(employee_id.as_uuid()) {
            AccessResult::Allowed
        } else {
            AccessResult::Denied(AccessDeniedReason::NotAnEmployee)
        }
    }
}

#[async_trait]
impl AccessChecker for StaffDirectory {
    async fn can_open_cycle(&self, employee_id: &EmployeeId) -> Result<AccessResult, DomainError> {
        Ok(self.check(employee_id))
    }

    async fn can_process_screenings(
        &self,
        employee_id: &EmployeeId,
    ) -> Result<AccessResult, DomainError> {
        Ok(self.check(employee_id))
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn app(backend: InMemoryBackend, staff: Uuid) -> Router {
    let state = RecruitmentAppState {
        cycle_repository: Arc::new(backend.clone()),
        applicant_repository: Arc::new(backend.clone()),
        screening_repository: Arc::new(backend),
        access_checker: Arc::new(StaffDirectory::with_staff(staff)),
    };
    recruitment_router().with_state(state)
}

async fn post(
    app: &Router,
    uri: &str,
    user: Uuid,
    body: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .header("X-User-Id", user.to_string())
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    read_response(response).await
}

async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    read_response(response).await
}

async fn read_response(
    response: axum::response::Response,
) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn open_cycle_body() -> serde_json::Value {
    json!({"open_date": "2025-01-06", "close_date": "2025-03-31"})
}

fn enrollment_body() -> serde_json::Value {
    json!({
        "birth_date": "2001-07-14",
        "gender": "female",
        "religion": "christian",
        "county": "montserrado"
    })
}

async fn enroll(app: &Router, user: Uuid) -> (StatusCode, serde_json::Value) {
    post(app, "/api/applicants", user, enrollment_body()).await
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn staff_runs_a_full_recruitment_cycle() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);

    // Open the cycle; the pipeline starts at Publicity.
    let (status, cycle) = post(&app, "/api/cycles", staff, open_cycle_body()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(cycle["is_current"], true);
    assert_eq!(cycle["current_stage"]["name"], "publicity");
    let cycle_id = cycle["id"].as_str().unwrap().to_string();

    // Three applicants enroll and get sequential numbers.
    let amara = Uuid::new_v4();
    let bendu = Uuid::new_v4();
    let cyrus = Uuid::new_v4();

    for (user, expected_number) in [(amara, "001"), (bendu, "002"), (cyrus, "003")] {
        let (status, applicant) = enroll(&app, user).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(applicant["id_number"], expected_number);
        assert_eq!(applicant["status"], "under_review");
    }

    // Round 1: one applicant is screened out.
    let (status, round) = post(
        &app,
        "/api/screenings",
        staff,
        json!({"decisions": [
            {"applicant_id": amara.to_string(), "status": "pending"},
            {"applicant_id": bendu.to_string(), "status": "unsuccessful",
             "rejection_reason": "document"},
            {"applicant_id": cyrus.to_string(), "status": "pending"},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(round["cycle_closed"], false);
    assert_eq!(round["records"].as_array().unwrap().len(), 3);
    let carried: Vec<&str> = round["carried_forward"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap())
        .collect();
    assert_eq!(carried.len(), 2);
    assert!(carried.contains(&amara.to_string().as_str()));
    assert!(!carried.contains(&bendu.to_string().as_str()));

    // Stage 2 is current and holds only the survivors.
    let (status, current) = get(&app, "/api/cycles/current").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(current["current_stage"]["seq"], 2);
    assert_eq!(current["current_stage"]["applicant_count"], 2);

    // Rounds 2 through 5: both survivors stay pending.
    for expected_seq in 3..=6 {
        let (status, round) = post(
            &app,
            "/api/screenings",
            staff,
            json!({"decisions": [
                {"applicant_id": amara.to_string(), "status": "pending"},
                {"applicant_id": cyrus.to_string(), "status": "pending"},
            ]}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(round["cycle_closed"], false);

        let (_, current) = get(&app, "/api/cycles/current").await;
        assert_eq!(current["current_stage"]["seq"], expected_seq);
    }

    // The final round decides placements and closes the cycle.
    let (status, round) = post(
        &app,
        "/api/screenings",
        staff,
        json!({"decisions": [
            {"applicant_id": amara.to_string(), "status": "successful"},
            {"applicant_id": cyrus.to_string(), "status": "unsuccessful",
             "rejection_reason": "job_readiness"},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(round["cycle_closed"], true);
    assert!(round["next_stage_id"].is_null());
    assert!(round["carried_forward"].as_array().unwrap().is_empty());

    let (_, current) = get(&app, "/api/cycles/current").await;
    assert_eq!(current["is_closed"], true);
    assert!(current["current_stage"].is_null());

    // Stage rosters are historical: everyone stays on stage 1, only
    // the survivors reached the later stages.
    let (status, stages) = get(&app, &format!("/api/cycles/{}/stages", cycle_id)).await;
    assert_eq!(status, StatusCode::OK);
    let stages = stages.as_array().unwrap();
    assert_eq!(stages.len(), 6);
    assert_eq!(stages[0]["applicant_count"], 3);
    assert_eq!(stages[1]["applicant_count"], 2);
    assert_eq!(stages[5]["applicant_count"], 2);
    assert!(stages.iter().all(|s| s["is_current"] == false));
}

#[tokio::test]
async fn applicant_cannot_enroll_twice() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);
    post(&app, "/api/cycles", staff, open_cycle_body()).await;

    let user = Uuid::new_v4();
    let (status, _) = enroll(&app, user).await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, error) = enroll(&app, user).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error["code"], "CONFLICT");
}

#[tokio::test]
async fn enrollment_closes_with_the_pipeline() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);
    post(&app, "/api/cycles", staff, open_cycle_body()).await;

    let user = Uuid::new_v4();
    enroll(&app, user).await;

    // Screen the lone applicant through all six stages.
    for _ in 0..6 {
        let (status, _) = post(
            &app,
            "/api/screenings",
            staff,
            json!({"decisions": [
                {"applicant_id": user.to_string(), "status": "pending"},
            ]}),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, _) = enroll(&app, Uuid::new_v4()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn opening_a_second_cycle_supersedes_the_first() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);

    let (_, first) = post(&app, "/api/cycles", staff, open_cycle_body()).await;
    let (status, second) = post(
        &app,
        "/api/cycles",
        staff,
        json!({"open_date": "2026-01-05", "close_date": "2026-03-30"}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(first["id"], second["id"]);

    let (_, current) = get(&app, "/api/cycles/current").await;
    assert_eq!(current["id"], second["id"]);

    // Numbering restarts with the new cycle.
    let (status, applicant) = enroll(&app, Uuid::new_v4()).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(applicant["id_number"], "001");
}

#[tokio::test]
async fn non_staff_cannot_open_or_screen() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);
    post(&app, "/api/cycles", staff, open_cycle_body()).await;

    let outsider = Uuid::new_v4();
    let (status, error) = post(&app, "/api/cycles", outsider, open_cycle_body()).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], "FORBIDDEN");

    let (status, _) = post(
        &app,
        "/api/screenings",
        outsider,
        json!({"decisions": [
            {"applicant_id": Uuid::new_v4().to_string(), "status": "pending"},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn stale_round_cannot_regress_the_stage_pointer() {
    let staff = Uuid::new_v4();
    let backend = InMemoryBackend::default();
    let app = app(backend.clone(), staff);
    post(&app, "/api/cycles", staff, open_cycle_body()).await;

    let user = Uuid::new_v4();
    enroll(&app, user).await;

    // Snapshot the aggregate as a slow round would have loaded it.
    let mut stale_cycle = backend.store.lock().unwrap().cycle.clone().unwrap();
    let mut stale_applicants = backend.store.lock().unwrap().applicants.clone();

    // A faster round lands first and advances the pipeline to stage 2.
    let (status, _) = post(
        &app,
        "/api/screenings",
        staff,
        json!({"decisions": [
            {"applicant_id": user.to_string(), "status": "pending"},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // The slow round commits the outcome it computed on the snapshot.
    let decisions = vec![ScreeningDecision::new(
        ApplicantId::from_uuid(user),
        ApplicantStatus::Pending,
    )];
    let outcome = ScreeningProcessor::process_batch(
        &mut stale_cycle,
        &mut stale_applicants,
        &HashSet::new(),
        &decisions,
        EmployeeId::from_uuid(staff),
        Timestamp::now(),
    )
    .unwrap();

    let err = backend
        .commit_round(&stale_cycle, &outcome)
        .await
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::ConcurrentModification);

    // The pointer stayed where the faster round left it.
    let (_, current) = get(&app, "/api/cycles/current").await;
    assert_eq!(current["current_stage"]["seq"], 2);
}

#[tokio::test]
async fn duplicate_decision_in_batch_conflicts() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);
    post(&app, "/api/cycles", staff, open_cycle_body()).await;

    let user = Uuid::new_v4();
    enroll(&app, user).await;

    let (status, _) = post(
        &app,
        "/api/screenings",
        staff,
        json!({"decisions": [
            {"applicant_id": user.to_string(), "status": "pending"},
            {"applicant_id": user.to_string(), "status": "successful"},
        ]}),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn empty_screening_batch_is_rejected() {
    let staff = Uuid::new_v4();
    let app = app(InMemoryBackend::default(), staff);
    post(&app, "/api/cycles", staff, open_cycle_body()).await;

    let (status, error) = post(&app, "/api/screenings", staff, json!({"decisions": []})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "BAD_REQUEST");
}
