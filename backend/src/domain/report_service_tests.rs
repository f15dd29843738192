//! Lifecycle service coverage: creation defaults, the role gate, and the
//! status grid.

use std::sync::Arc;

use rstest::rstest;

use crate::domain::ports::ReportLifecycle;
use crate::domain::report::{ReportDraft, ReportPatch, ReportStatus};
use crate::domain::user::{Actor, Role};
use crate::domain::{Category, ErrorCode, ReportService};
use crate::outbound::persistence::InMemoryStore;

fn service() -> ReportService<InMemoryStore> {
    ReportService::new(Arc::new(InMemoryStore::new()))
}

fn draft() -> ReportDraft {
    ReportDraft {
        category: Category::BasicServicesInfra,
        description: "water main leaking".to_owned(),
        latitude: 12.9716,
        longitude: 77.5946,
        address: Some("MG Road".to_owned()),
        image: None,
    }
}

fn citizen() -> Actor {
    Actor::new(1, Role::Citizen)
}

fn leader() -> Actor {
    Actor::new(2, Role::DistrictLeader)
}

#[tokio::test]
async fn creation_always_lands_in_pending() {
    let service = service();
    let report = service
        .create(draft(), Some(citizen()))
        .await
        .expect("creates");
    assert_eq!(report.status(), ReportStatus::Pending);
}

#[tokio::test]
async fn authenticated_callers_are_attributed() {
    let service = service();
    let report = service
        .create(draft(), Some(citizen()))
        .await
        .expect("creates");
    assert_eq!(report.owner(), Some(citizen().user_id));
}

#[tokio::test]
async fn anonymous_reports_have_no_owner() {
    let service = service();
    let report = service.create(draft(), None).await.expect("creates");
    assert_eq!(report.owner(), None);
}

#[rstest]
#[case(ReportDraft { description: "   ".to_owned(), ..draft() })]
#[case(ReportDraft { latitude: 91.0, ..draft() })]
#[case(ReportDraft { longitude: -200.0, ..draft() })]
#[case(ReportDraft { latitude: f64::NAN, ..draft() })]
#[tokio::test]
async fn invalid_drafts_create_no_row(#[case] bad: ReportDraft) {
    let service = service();
    let err = service
        .create(bad, None)
        .await
        .expect_err("validation fails");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
    assert!(service.list().await.expect("lists").is_empty());
}

#[tokio::test]
async fn citizen_status_patch_is_rejected_wholesale() {
    let service = service();
    let report = service
        .create(draft(), Some(citizen()))
        .await
        .expect("creates");

    let patch = ReportPatch {
        status: Some(ReportStatus::Resolved),
        description: Some("drive-by edit".to_owned()),
        ..ReportPatch::default()
    };
    let err = service
        .update(report.id(), patch, Some(citizen()))
        .await
        .expect_err("gate rejects");
    assert_eq!(err.code, ErrorCode::Forbidden);

    // Neither the gated nor the ungated field was applied.
    let unchanged = service.get(report.id()).await.expect("fetches");
    assert_eq!(unchanged.status(), ReportStatus::Pending);
    assert_eq!(unchanged.description(), "water main leaking");
}

#[tokio::test]
async fn anonymous_status_patch_is_rejected() {
    let service = service();
    let report = service.create(draft(), None).await.expect("creates");
    let patch = ReportPatch {
        status: Some(ReportStatus::InProgress),
        ..ReportPatch::default()
    };
    let err = service
        .update(report.id(), patch, None)
        .await
        .expect_err("gate rejects");
    assert_eq!(err.code, ErrorCode::Forbidden);
}

#[tokio::test]
async fn every_status_pair_is_legal_for_a_leader() {
    let service = service();
    let report = service.create(draft(), None).await.expect("creates");

    for from in ReportStatus::ALL {
        for to in ReportStatus::ALL {
            let reset = ReportPatch {
                status: Some(from),
                ..ReportPatch::default()
            };
            service
                .update(report.id(), reset, Some(leader()))
                .await
                .expect("leader sets the from state");

            let transition = ReportPatch {
                status: Some(to),
                ..ReportPatch::default()
            };
            let updated = service
                .update(report.id(), transition, Some(leader()))
                .await
                .expect("leader transitions");
            assert_eq!(updated.status(), to, "transition {from} -> {to}");
        }
    }
}

#[tokio::test]
async fn non_status_fields_are_open_to_any_caller() {
    // Known asymmetry carried over from the source: only status is gated.
    let service = service();
    let report = service
        .create(draft(), Some(citizen()))
        .await
        .expect("creates");

    let patch = ReportPatch {
        description: Some("pipe replaced the wrong way".to_owned()),
        address: Some("Church Street".to_owned()),
        ..ReportPatch::default()
    };
    let updated = service
        .update(report.id(), patch, None)
        .await
        .expect("ungated update applies");
    assert_eq!(updated.description(), "pipe replaced the wrong way");
    assert_eq!(updated.address(), Some("Church Street"));
    assert_eq!(updated.status(), ReportStatus::Pending);
}

#[tokio::test]
async fn patch_validation_rejects_bad_fields() {
    let service = service();
    let report = service.create(draft(), None).await.expect("creates");

    let patch = ReportPatch {
        latitude: Some(123.0),
        ..ReportPatch::default()
    };
    let err = service
        .update(report.id(), patch, None)
        .await
        .expect_err("latitude out of range");
    assert_eq!(err.code, ErrorCode::InvalidRequest);

    let patch = ReportPatch {
        description: Some(String::new()),
        ..ReportPatch::default()
    };
    let err = service
        .update(report.id(), patch, None)
        .await
        .expect_err("empty description");
    assert_eq!(err.code, ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn update_of_unknown_report_is_not_found() {
    let service = service();
    let err = service
        .update(41, ReportPatch::default(), Some(leader()))
        .await
        .expect_err("nothing to update");
    assert_eq!(err.code, ErrorCode::NotFound);
}

#[tokio::test]
async fn listing_returns_newest_first() {
    let service = service();
    let mut ids = Vec::new();
    for n in 0..3 {
        let submitted = ReportDraft {
            description: format!("issue {n}"),
            ..draft()
        };
        ids.push(service.create(submitted, None).await.expect("creates").id());
    }
    let listed = service.list().await.expect("lists");
    let listed_ids: Vec<i64> = listed.iter().map(|r| r.id()).collect();
    ids.reverse();
    assert_eq!(listed_ids, ids);
}

#[tokio::test]
async fn delete_removes_the_row() {
    let service = service();
    let report = service.create(draft(), None).await.expect("creates");
    service.delete(report.id()).await.expect("deletes");
    let err = service.get(report.id()).await.expect_err("gone");
    assert_eq!(err.code, ErrorCode::NotFound);

    let err = service.delete(report.id()).await.expect_err("already gone");
    assert_eq!(err.code, ErrorCode::NotFound);
}
