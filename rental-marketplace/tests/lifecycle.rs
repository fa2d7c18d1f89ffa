mod common;

use chrono::{Duration, TimeZone, Utc};
use domain_rental::{
    command::{CreateComplaintCommand, CreateRequestCommand},
    exception::ExceptionKind,
    model::{
        entity::{
            ComplaintStatus, NotificationKind, NotificationStatus, RequestAction, RequestStatus,
            RoomStatus,
        },
        vo::{Caller, Role},
    },
};
use uuid::Uuid;

fn command(room_id: Uuid) -> CreateRequestCommand {
    CreateRequestCommand {
        room_id: Some(room_id),
        visit_date: Some(Utc.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap()),
        message: "Can I see it on Monday?".to_owned(),
    }
}

#[tokio::test]
async fn created_request_lists_with_room_and_landlord() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);

    let created = sp.request_service().create(tenant, command(room.id)).await.unwrap();

    let listed = sp.request_service().list(tenant).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].request.id, created.id);
    assert_eq!(listed[0].request.room_id, room.id);
    assert_eq!(listed[0].counterpart_id, landlord.id);
    assert_eq!(listed[0].room.as_ref().map(|r| r.id), Some(room.id));

    let inbox = sp.notification_service().list(landlord, None).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].kind, NotificationKind::RoomRequest);
    assert_eq!(inbox[0].content.as_deref(), Some("Can I see it on Monday?"));
}

#[tokio::test]
async fn tenant_cancel_removes_request_for_both_parties() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, store, room) = common::provider_with_room(landlord.id);
    let request = sp.request_service().create(tenant, command(room.id)).await.unwrap();

    let outcome = sp
        .request_service()
        .transition(tenant, request.id, RequestAction::TenantCancel)
        .await
        .unwrap();
    assert!(outcome.is_none());

    assert!(sp.request_service().list(tenant).await.unwrap().is_empty());
    assert!(sp.request_service().list(landlord).await.unwrap().is_empty());
    let cancelled = store
        .notifications()
        .unwrap()
        .into_iter()
        .filter(|n| n.status == NotificationStatus::TenantCancelled)
        .collect::<Vec<_>>();
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].recipient, Role::Landlord);
    assert_eq!(cancelled[0].landlord_id, landlord.id);
}

#[tokio::test]
async fn wrong_role_actions_change_nothing() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, store, room) = common::provider_with_room(landlord.id);
    let request = sp.request_service().create(tenant, command(room.id)).await.unwrap();
    let before = store.notifications().unwrap().len();

    let err = sp
        .request_service()
        .transition(tenant, request.id, RequestAction::Approve)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::Authorization);
    let err = sp
        .request_service()
        .transition(landlord, request.id, RequestAction::TenantConfirm)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::Authorization);

    let stranger = Caller::landlord(Uuid::new_v4());
    let err = sp
        .request_service()
        .transition(stranger, request.id, RequestAction::Approve)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::Authorization);

    let requests = store.requests().unwrap();
    assert_eq!(requests[0].status, RequestStatus::Pending);
    assert_eq!(store.notifications().unwrap().len(), before);
    assert_eq!(store.room(room.id).unwrap().unwrap().tenant_id, None);
}

#[tokio::test]
async fn approve_then_confirm_assigns_the_room() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let rival = Caller::tenant(Uuid::new_v4());
    let (sp, store, room) = common::provider_with_room(landlord.id);
    let request = sp.request_service().create(tenant, command(room.id)).await.unwrap();
    let rival_request = sp.request_service().create(rival, command(room.id)).await.unwrap();

    let approved = sp
        .request_service()
        .transition(landlord, request.id, RequestAction::Approve)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(approved.status, RequestStatus::Approved);
    sp.request_service()
        .transition(landlord, rival_request.id, RequestAction::Approve)
        .await
        .unwrap();
    let inbox = sp.notification_service().list(tenant, Some(NotificationKind::RoomStatus)).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].status, NotificationStatus::Approve);

    let completed = sp
        .request_service()
        .transition(tenant, request.id, RequestAction::TenantConfirm)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, RequestStatus::Completed);
    let occupied = store.room(room.id).unwrap().unwrap();
    assert_eq!(occupied.tenant_id, Some(tenant.id));
    assert_eq!(occupied.status, RoomStatus::Occupied);
    let landlord_inbox = sp
        .notification_service()
        .list(landlord, Some(NotificationKind::RoomStatus))
        .await
        .unwrap();
    assert_eq!(landlord_inbox[0].status, NotificationStatus::Confirmed);

    let err = sp
        .request_service()
        .transition(rival, rival_request.id, RequestAction::TenantConfirm)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::Conflict);
    assert_eq!(store.room(room.id).unwrap().unwrap(), occupied);
}

#[tokio::test]
async fn completed_request_cannot_be_cancelled() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);
    let request = sp.request_service().create(tenant, command(room.id)).await.unwrap();
    sp.request_service().transition(landlord, request.id, RequestAction::Approve).await.unwrap();
    sp.request_service()
        .transition(tenant, request.id, RequestAction::TenantConfirm)
        .await
        .unwrap();

    for (caller, action) in [
        (tenant, RequestAction::TenantCancel),
        (landlord, RequestAction::LandlordCancel),
        (landlord, RequestAction::Approve),
    ] {
        let err = sp.request_service().transition(caller, request.id, action).await.unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Conflict);
    }
}

#[tokio::test]
async fn read_badges_follow_each_party() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);
    let request = sp.request_service().create(tenant, command(room.id)).await.unwrap();

    assert_eq!(sp.request_service().unread_count(landlord).await.unwrap(), 1);
    assert_eq!(sp.request_service().unread_count(tenant).await.unwrap(), 0);

    sp.request_service()
        .transition(landlord, request.id, RequestAction::LandlordCancel)
        .await
        .unwrap();
    assert_eq!(sp.request_service().unread_count(landlord).await.unwrap(), 0);
    assert_eq!(sp.request_service().unread_count(tenant).await.unwrap(), 1);

    sp.request_service().mark_read(tenant, request.id).await.unwrap();
    assert_eq!(sp.request_service().unread_count(tenant).await.unwrap(), 0);
}

#[tokio::test]
async fn visitable_today_uses_half_open_day_window() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);

    let today = Utc::now().date_naive().and_hms_opt(0, 0, 0).unwrap().and_utc();
    let mut expected = None;
    for visit_date in [today, today + Duration::days(1), today - Duration::seconds(1)] {
        let request = sp
            .request_service()
            .create(
                tenant,
                CreateRequestCommand {
                    room_id: Some(room.id),
                    visit_date: Some(visit_date),
                    message: String::new(),
                },
            )
            .await
            .unwrap();
        sp.request_service().transition(landlord, request.id, RequestAction::Approve).await.unwrap();
        expected.get_or_insert(request.id);
    }
    sp.request_service()
        .create(
            tenant,
            CreateRequestCommand {
                room_id: Some(room.id),
                visit_date: Some(today + Duration::hours(12)),
                message: String::new(),
            },
        )
        .await
        .unwrap();

    let visits = sp.request_service().visitable_today(tenant).await.unwrap();
    assert_eq!(visits.iter().map(|v| v.request.id).collect::<Vec<_>>(), expected.into_iter().collect::<Vec<_>>());
}

#[tokio::test]
async fn complaint_hidden_by_tenant_stays_with_landlord_until_cancelled() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let tenant = Caller::tenant(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);
    let request = sp.request_service().create(tenant, command(room.id)).await.unwrap();
    sp.request_service().transition(landlord, request.id, RequestAction::Approve).await.unwrap();
    sp.request_service()
        .transition(tenant, request.id, RequestAction::TenantConfirm)
        .await
        .unwrap();

    let complaint = sp
        .complaint_service()
        .create(
            tenant,
            CreateComplaintCommand {
                room_id: Some(room.id),
                kind: "plumbing".to_owned(),
                description: "The sink leaks.".to_owned(),
            },
        )
        .await
        .unwrap();
    sp.complaint_service()
        .set_status(landlord, complaint.id, ComplaintStatus::InProgress)
        .await
        .unwrap();
    sp.complaint_service()
        .set_status(landlord, complaint.id, ComplaintStatus::Resolved)
        .await
        .unwrap();

    sp.complaint_service().hide(tenant, complaint.id).await.unwrap();
    assert!(sp.complaint_service().list(tenant).await.unwrap().is_empty());
    let landlord_view = sp.complaint_service().list(landlord).await.unwrap();
    assert_eq!(landlord_view.len(), 1);
    assert_eq!(landlord_view[0].status, ComplaintStatus::Resolved);

    let hidden = sp.complaint_service().hide(landlord, complaint.id).await.unwrap();
    assert_eq!(hidden.status, ComplaintStatus::Cancelled);
    assert!(sp.complaint_service().list(landlord).await.unwrap().is_empty());

    let issues = sp
        .notification_service()
        .list(tenant, Some(NotificationKind::IssueReport))
        .await
        .unwrap();
    let statuses = issues.iter().map(|n| n.status).collect::<Vec<_>>();
    assert!(statuses.contains(&NotificationStatus::InProgress));
    assert!(statuses.contains(&NotificationStatus::Resolved));
    assert!(statuses.contains(&NotificationStatus::Cancelled));
}

#[tokio::test]
async fn only_the_current_tenant_can_complain() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);
    let err = sp
        .complaint_service()
        .create(
            Caller::tenant(Uuid::new_v4()),
            CreateComplaintCommand {
                room_id: Some(room.id),
                kind: "noise".to_owned(),
                description: "Loud".to_owned(),
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::Authorization);
}

#[tokio::test]
async fn notification_inbox_counts_and_clears() {
    let landlord = Caller::landlord(Uuid::new_v4());
    let (sp, _, room) = common::provider_with_room(landlord.id);
    for _ in 0..3 {
        sp.request_service()
            .create(Caller::tenant(Uuid::new_v4()), command(room.id))
            .await
            .unwrap();
    }
    let notifications = sp.notification_service();
    assert_eq!(notifications.unread_count(landlord).await.unwrap(), 3);

    let inbox = notifications.list(landlord, None).await.unwrap();
    sp.notification_service().mark_read(landlord, inbox[0].id).await.unwrap();
    assert_eq!(sp.notification_service().unread_count(landlord).await.unwrap(), 2);

    sp.notification_service().delete(landlord, inbox[1].id).await.unwrap();
    sp.notification_service().mark_all_read(landlord).await.unwrap();
    assert_eq!(sp.notification_service().unread_count(landlord).await.unwrap(), 0);
    assert_eq!(sp.notification_service().list(landlord, None).await.unwrap().len(), 2);

    let err = sp
        .notification_service()
        .delete(Caller::tenant(Uuid::new_v4()), inbox[0].id)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ExceptionKind::NotFound);
}
