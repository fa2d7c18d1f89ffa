use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{FixedOffset, Offset, Utc};
use domain_rental::{
    command::CreateRequestCommand,
    exception::{RentalException, RentalResult},
    model::{
        entity::{Request, RequestAction, RequestChange, Room, Transition},
        vo::{Caller, DayWindow, RequestDetail, Role, RoomSummary},
    },
    repository::{NotificationRepo, RequestRepo, RoomRepo, TenantRepo},
    service::RequestService,
};
use uuid::Uuid;

use crate::commit_conflict;

/// Request lifecycle engine.
///
/// All repositories handed in share one unit of work; `request_repo.save_changed()`
/// commits the request change, the room claim and the notification together.
#[derive(typed_builder::TypedBuilder)]
pub struct RequestServiceImpl {
    request_repo: Arc<dyn RequestRepo>,
    room_repo: Arc<dyn RoomRepo>,
    tenant_repo: Arc<dyn TenantRepo>,
    notification_repo: Arc<dyn NotificationRepo>,
    /// Offset whose calendar day bounds the same-day visit window.
    #[builder(default = Utc.fix())]
    time_zone: FixedOffset,
}

#[async_trait]
impl RequestService for RequestServiceImpl {
    async fn create(&self, caller: Caller, command: CreateRequestCommand) -> RentalResult<Request> {
        caller.require_role(Role::Tenant, "create request")?;
        let room_id = command.room_id.ok_or(RentalException::MissingField { field: "roomId" })?;
        let room = self
            .room_repo
            .get_by_id(room_id)
            .await?
            .ok_or(RentalException::RoomNotFound { id: room_id })?;

        let now = Utc::now();
        let request = Request::new(caller.id, &room, command.visit_date, command.message, now);
        let notification = request.created_notification(now);
        self.request_repo.insert(&request).await?;
        self.notification_repo.insert(&notification).await?;
        self.request_repo.save_changed().await?;

        tracing::info!(request_id = %request.id, room_id = %room.id, tenant_id = %caller.id, "request created");
        Ok(request)
    }

    async fn list(&self, caller: Caller) -> RentalResult<Vec<RequestDetail>> {
        let requests = match caller.role {
            Role::Tenant => self.request_repo.get_by_tenant(caller.id).await?,
            Role::Landlord => self.request_repo.get_by_landlord(caller.id).await?,
        };
        let rooms = self.rooms_of(&requests).await?;
        Ok(requests.into_iter().map(|r| detail(&caller, r, &rooms)).collect())
    }

    #[tracing::instrument(skip(self))]
    async fn transition(
        &self,
        caller: Caller,
        request_id: Uuid,
        action: RequestAction,
    ) -> RentalResult<Option<Request>> {
        let request = self.get_request(request_id).await?;
        let now = Utc::now();

        if action == RequestAction::TenantConfirm {
            caller.require_party(Role::Tenant, request.tenant_id, action.as_str())?;
            let room = self
                .room_repo
                .get_by_id(request.room_id)
                .await?
                .ok_or(RentalException::RoomNotFound { id: request.room_id })?;
            if room.is_occupied() {
                return Err(RentalException::RoomOccupied { room_id: room.id });
            }
        }

        let Transition {
            change,
            notification,
        } = request.transition(action, &caller, now)?;
        // Every request write is guarded by the status read above, so a
        // concurrent transition by the other party fails this commit.
        let outcome = match change {
            RequestChange::Update(updated) => {
                self.request_repo.update_from(&updated, request.status).await?;
                Some(updated)
            }
            RequestChange::Delete(id) => {
                self.request_repo.delete_from(id, request.status).await?;
                None
            }
            RequestChange::Confirm(confirmed) => {
                self.room_repo
                    .claim_occupancy(confirmed.room_id, confirmed.tenant_id, now)
                    .await?;
                self.request_repo.update_from(&confirmed, request.status).await?;
                self.tenant_repo
                    .append_occupied_room(confirmed.tenant_id, confirmed.room_id)
                    .await?;
                Some(confirmed)
            }
        };
        self.notification_repo.insert(&notification).await?;
        self.request_repo.save_changed().await.map_err(commit_conflict)?;

        tracing::info!(
            %request_id,
            action = %action,
            status = outcome.as_ref().map(|r| r.status.as_str()).unwrap_or("deleted"),
            "request transitioned"
        );
        Ok(outcome)
    }

    async fn visitable_today(&self, caller: Caller) -> RentalResult<Vec<RequestDetail>> {
        caller.require_role(Role::Tenant, "list visitable requests")?;
        let window = DayWindow::containing(Utc::now(), self.time_zone);
        let requests = self
            .request_repo
            .get_approved_visits(caller.id, window.start, window.end)
            .await?;
        let rooms = self.rooms_of(&requests).await?;
        // Skip rooms another tenant has claimed since the approval.
        Ok(requests
            .into_iter()
            .filter(|r| r.visit_date.is_some_and(|d| window.contains(&d)))
            .filter(|r| rooms.get(&r.room_id).is_some_and(|room| !room.is_occupied()))
            .map(|r| detail(&caller, r, &rooms))
            .collect())
    }

    async fn mark_read(&self, caller: Caller, request_id: Uuid) -> RentalResult<()> {
        let mut request = self.get_request(request_id).await?;
        if !request.involves(&caller) {
            return Err(RentalException::Forbidden {
                caller: caller.id,
                operation: "mark request read".to_owned(),
            });
        }
        match caller.role {
            Role::Landlord if request.is_new => request.is_new = false,
            Role::Tenant if !request.is_read => request.is_read = true,
            _ => return Ok(()),
        }
        self.request_repo.update_from(&request, request.status).await?;
        self.request_repo.save_changed().await.map_err(commit_conflict)?;
        Ok(())
    }

    async fn unread_count(&self, caller: Caller) -> RentalResult<u64> {
        Ok(match caller.role {
            Role::Landlord => self.request_repo.count_new(caller.id).await?,
            Role::Tenant => self.request_repo.count_unread(caller.id).await?,
        })
    }
}

impl RequestServiceImpl {
    async fn get_request(&self, id: Uuid) -> RentalResult<Request> {
        self.request_repo
            .get_by_id(id)
            .await?
            .ok_or(RentalException::RequestNotFound { id })
    }

    async fn rooms_of(&self, requests: &[Request]) -> RentalResult<HashMap<Uuid, Room>> {
        let mut ids = requests.iter().map(|r| r.room_id).collect::<Vec<_>>();
        ids.sort_unstable();
        ids.dedup();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }
        let rooms = self.room_repo.get_by_ids(&ids).await?;
        Ok(rooms.into_iter().map(|room| (room.id, room)).collect())
    }
}

fn detail(caller: &Caller, request: Request, rooms: &HashMap<Uuid, Room>) -> RequestDetail {
    let counterpart_id = match caller.role {
        Role::Tenant => request.landlord_id,
        Role::Landlord => request.tenant_id,
    };
    RequestDetail {
        room: rooms.get(&request.room_id).map(RoomSummary::from),
        counterpart_id,
        request,
    }
}

#[cfg(test)]
mod tests {
    use domain_rental::{
        exception::ExceptionKind,
        mock::{MockNotificationRepo, MockRequestRepo, MockRoomRepo, MockTenantRepo},
        model::entity::{NotificationKind, NotificationStatus, RequestStatus, RoomStatus},
        repository::ConditionNotMet,
    };
    use mockall::predicate::eq;

    use super::*;

    struct Mocks {
        request: MockRequestRepo,
        room: MockRoomRepo,
        tenant: MockTenantRepo,
        notification: MockNotificationRepo,
    }

    impl Mocks {
        fn new() -> Self {
            Self {
                request: MockRequestRepo::new(),
                room: MockRoomRepo::new(),
                tenant: MockTenantRepo::new(),
                notification: MockNotificationRepo::new(),
            }
        }

        fn load(self) -> RequestServiceImpl {
            RequestServiceImpl::builder()
                .request_repo(Arc::new(self.request))
                .room_repo(Arc::new(self.room))
                .tenant_repo(Arc::new(self.tenant))
                .notification_repo(Arc::new(self.notification))
                .build()
        }
    }

    fn room(landlord_id: Uuid, tenant_id: Option<Uuid>) -> Room {
        Room {
            id: Uuid::new_v4(),
            landlord_id,
            address: "7 Orchard Street".to_owned(),
            rent: 1500,
            status: if tenant_id.is_some() { RoomStatus::Occupied } else { RoomStatus::Vacant },
            is_active: tenant_id.is_some(),
            tenant_id,
            joining_date: None,
            created_time: Utc::now(),
        }
    }

    fn approved(room: &Room, tenant_id: Uuid) -> Request {
        let mut request = Request::new(tenant_id, room, Some(Utc::now()), String::new(), Utc::now());
        request.status = RequestStatus::Approved;
        request
    }

    #[tokio::test]
    async fn create_stages_request_and_landlord_notification() {
        let tenant = Caller::tenant(Uuid::new_v4());
        let landlord = Uuid::new_v4();
        let room = room(landlord, None);
        let room_id = room.id;

        let mut mocks = Mocks::new();
        mocks.room.expect_get_by_id().with(eq(room_id)).return_once(move |_| Ok(Some(room)));
        mocks
            .request
            .expect_insert()
            .withf(move |r| r.room_id == room_id && r.status == RequestStatus::Pending)
            .times(1)
            .returning(|r| Ok(r.id));
        mocks
            .notification
            .expect_insert()
            .withf(move |n| {
                n.recipient == Role::Landlord
                    && n.landlord_id == landlord
                    && n.kind == NotificationKind::RoomRequest
                    && n.status == NotificationStatus::Pending
            })
            .times(1)
            .returning(|n| Ok(n.id));
        mocks.request.expect_save_changed().times(1).returning(|| Ok(true));

        let request = mocks
            .load()
            .create(
                tenant,
                CreateRequestCommand {
                    room_id: Some(room_id),
                    visit_date: None,
                    message: "Hello".to_owned(),
                },
            )
            .await
            .unwrap();
        assert_eq!(request.landlord_id, landlord);
        assert_eq!(request.tenant_id, tenant.id);
    }

    #[tokio::test]
    async fn create_requires_room_id() {
        let err = Mocks::new()
            .load()
            .create(
                Caller::tenant(Uuid::new_v4()),
                CreateRequestCommand {
                    room_id: None,
                    visit_date: None,
                    message: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Validation);
    }

    #[tokio::test]
    async fn landlord_cannot_create() {
        let err = Mocks::new()
            .load()
            .create(
                Caller::landlord(Uuid::new_v4()),
                CreateRequestCommand {
                    room_id: Some(Uuid::new_v4()),
                    visit_date: None,
                    message: String::new(),
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Authorization);
    }

    #[tokio::test]
    async fn unknown_request_is_not_found() {
        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().returning(|_| Ok(None));
        let err = mocks
            .load()
            .transition(Caller::landlord(Uuid::new_v4()), Uuid::new_v4(), RequestAction::Approve)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::NotFound);
    }

    #[tokio::test]
    async fn tenant_approving_changes_nothing() {
        let tenant = Uuid::new_v4();
        let room = room(Uuid::new_v4(), None);
        let request = Request::new(tenant, &room, None, String::new(), Utc::now());

        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().return_once(move |_| Ok(Some(request)));
        mocks.request.expect_update_from().never();
        mocks.request.expect_save_changed().never();
        mocks.notification.expect_insert().never();

        let err = mocks
            .load()
            .transition(Caller::tenant(tenant), Uuid::new_v4(), RequestAction::Approve)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Authorization);
    }

    #[tokio::test]
    async fn confirm_on_occupied_room_is_conflict_without_writes() {
        let tenant = Uuid::new_v4();
        let occupied = room(Uuid::new_v4(), Some(Uuid::new_v4()));
        let request = approved(&occupied, tenant);

        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().return_once(move |_| Ok(Some(request)));
        mocks.room.expect_get_by_id().return_once(move |_| Ok(Some(occupied)));
        mocks.room.expect_claim_occupancy().never();
        mocks.request.expect_update_from().never();
        mocks.tenant.expect_append_occupied_room().never();
        mocks.notification.expect_insert().never();
        mocks.request.expect_save_changed().never();

        let err = mocks
            .load()
            .transition(Caller::tenant(tenant), Uuid::new_v4(), RequestAction::TenantConfirm)
            .await
            .unwrap_err();
        assert!(matches!(err, RentalException::RoomOccupied { .. }));
    }

    #[tokio::test]
    async fn lost_claim_at_commit_is_conflict() {
        let tenant = Uuid::new_v4();
        let vacant = room(Uuid::new_v4(), None);
        let room_id = vacant.id;
        let request = approved(&vacant, tenant);

        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().return_once(move |_| Ok(Some(request)));
        mocks.room.expect_get_by_id().return_once(move |_| Ok(Some(vacant)));
        mocks
            .room
            .expect_claim_occupancy()
            .withf(move |room, t, _| *room == room_id && *t == tenant)
            .times(1)
            .returning(|_, _, _| Ok(()));
        mocks
            .request
            .expect_update_from()
            .withf(|r, from| r.status == RequestStatus::Completed && *from == RequestStatus::Approved)
            .times(1)
            .returning(|_, _| Ok(()));
        mocks.tenant.expect_append_occupied_room().times(1).returning(|_, _| Ok(()));
        mocks.notification.expect_insert().times(1).returning(|n| Ok(n.id));
        mocks.request.expect_save_changed().times(1).returning(move || {
            Err(ConditionNotMet {
                entity: "room",
                id: room_id,
            }
            .into())
        });

        let err = mocks
            .load()
            .transition(Caller::tenant(tenant), Uuid::new_v4(), RequestAction::TenantConfirm)
            .await
            .unwrap_err();
        assert!(matches!(err, RentalException::RoomOccupied { room_id: id } if id == room_id));
    }

    #[tokio::test]
    async fn cancel_racing_another_write_is_conflict() {
        let tenant = Uuid::new_v4();
        let vacant = room(Uuid::new_v4(), None);
        let request = approved(&vacant, tenant);
        let request_id = request.id;

        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().return_once(move |_| Ok(Some(request)));
        mocks
            .request
            .expect_delete_from()
            .with(eq(request_id), eq(RequestStatus::Approved))
            .times(1)
            .returning(|_, _| Ok(()));
        mocks.notification.expect_insert().times(1).returning(|n| Ok(n.id));
        mocks.request.expect_save_changed().times(1).returning(move || {
            Err(ConditionNotMet {
                entity: "request",
                id: request_id,
            }
            .into())
        });

        let err = mocks
            .load()
            .transition(Caller::tenant(tenant), request_id, RequestAction::TenantCancel)
            .await
            .unwrap_err();
        assert!(matches!(err, RentalException::RequestChanged { id } if id == request_id));
        assert_eq!(err.kind(), ExceptionKind::Conflict);
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let landlord = Uuid::new_v4();
        let vacant = room(landlord, None);
        let request = Request::new(Uuid::new_v4(), &vacant, None, String::new(), Utc::now());

        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().return_once(move |_| Ok(Some(request)));
        mocks.request.expect_update_from().returning(|_, _| Ok(()));
        mocks.notification.expect_insert().returning(|n| Ok(n.id));
        mocks
            .request
            .expect_save_changed()
            .returning(|| Err(anyhow::anyhow!("connection reset")));

        let err = mocks
            .load()
            .transition(Caller::landlord(landlord), Uuid::new_v4(), RequestAction::Approve)
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ExceptionKind::Internal);
    }

    #[tokio::test]
    async fn visitable_today_skips_claimed_rooms() {
        let tenant = Uuid::new_v4();
        let landlord = Uuid::new_v4();
        let free = room(landlord, None);
        let taken = room(landlord, Some(Uuid::new_v4()));
        let visit_free = approved(&free, tenant);
        let visit_taken = approved(&taken, tenant);
        let free_id = free.id;

        let mut mocks = Mocks::new();
        mocks
            .request
            .expect_get_approved_visits()
            .withf(move |t, start, end| *t == tenant && start < end)
            .return_once(move |_, _, _| Ok(vec![visit_free, visit_taken]));
        mocks.room.expect_get_by_ids().return_once(move |_| Ok(vec![free, taken]));

        let visits = mocks.load().visitable_today(Caller::tenant(tenant)).await.unwrap();
        assert_eq!(visits.len(), 1);
        assert_eq!(visits[0].request.room_id, free_id);
        assert_eq!(visits[0].counterpart_id, landlord);
    }

    #[tokio::test]
    async fn mark_read_clears_the_callers_badge_only() {
        let landlord = Uuid::new_v4();
        let request = Request::new(Uuid::new_v4(), &room(landlord, None), None, String::new(), Utc::now());

        let mut mocks = Mocks::new();
        mocks.request.expect_get_by_id().return_once(move |_| Ok(Some(request)));
        mocks
            .request
            .expect_update_from()
            .withf(|r, from| !r.is_new && r.is_read && *from == RequestStatus::Pending)
            .times(1)
            .returning(|_, _| Ok(()));
        mocks.request.expect_save_changed().times(1).returning(|| Ok(true));

        mocks.load().mark_read(Caller::landlord(landlord), Uuid::new_v4()).await.unwrap();
    }

    #[tokio::test]
    async fn unread_count_is_role_scoped() {
        let mut mocks = Mocks::new();
        mocks.request.expect_count_new().returning(|_| Ok(3));
        mocks.request.expect_count_unread().returning(|_| Ok(1));
        let service = mocks.load();
        assert_eq!(service.unread_count(Caller::landlord(Uuid::new_v4())).await.unwrap(), 3);
        assert_eq!(service.unread_count(Caller::tenant(Uuid::new_v4())).await.unwrap(), 1);
    }
}
