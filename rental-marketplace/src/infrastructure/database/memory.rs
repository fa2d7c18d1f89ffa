use std::cmp::Reverse;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use domain_rental::{
    model::{
        entity::{Complaint, Notification, NotificationKind, Request, RequestStatus, Room, RoomStatus},
        vo::Role,
    },
    repository::{
        ComplaintRepo, ConditionNotMet, DBRepository, MutableRepository, NotificationRepo,
        ReadOnlyRepository, RequestRepo, RoomRepo, TenantRepo,
    },
};
use uuid::Uuid;

#[derive(Clone, Default)]
struct Tables {
    rooms: HashMap<Uuid, Room>,
    requests: HashMap<Uuid, Request>,
    notifications: HashMap<Uuid, Notification>,
    complaints: HashMap<Uuid, Complaint>,
    /// 租客 -> 已入住房源
    tenant_rooms: HashMap<Uuid, Vec<Uuid>>,
}

/// Process-local store shared by every [`MemoryRepo`] scope.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> anyhow::Result<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| anyhow::anyhow!("Unable to lock memory store."))
    }

    /// Rooms belong to the listing side; this is how they enter the store.
    pub fn put_room(&self, room: Room) -> anyhow::Result<()> {
        self.lock()?.rooms.insert(room.id, room);
        Ok(())
    }

    pub fn room(&self, id: Uuid) -> anyhow::Result<Option<Room>> {
        Ok(self.lock()?.rooms.get(&id).cloned())
    }

    pub fn occupied_room_ids(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Uuid>> {
        Ok(self.lock()?.tenant_rooms.get(&tenant_id).cloned().unwrap_or_default())
    }

    pub fn requests(&self) -> anyhow::Result<Vec<Request>> {
        Ok(self.lock()?.requests.values().cloned().collect())
    }

    pub fn notifications(&self) -> anyhow::Result<Vec<Notification>> {
        let mut notifications = self.lock()?.notifications.values().cloned().collect::<Vec<_>>();
        notifications.sort_by_key(|n| n.created_time);
        Ok(notifications)
    }

    fn read<T>(&self, f: impl FnOnce(&Tables) -> T) -> anyhow::Result<T> {
        Ok(f(&*self.lock()?))
    }

    /// Applies a batch on a copy of the tables and swaps it in only when
    /// every guard held.
    fn commit(&self, ops: Vec<StagedOp>) -> anyhow::Result<()> {
        let mut tables = self.lock()?;
        let mut next = tables.clone();
        for op in ops {
            op.apply(&mut next)?;
        }
        *tables = next;
        Ok(())
    }
}

enum StagedOp {
    PutRequest(Request),
    DeleteRequest(Uuid),
    UpdateRequestFrom {
        request: Request,
        expected: RequestStatus,
    },
    DeleteRequestFrom { id: Uuid, expected: RequestStatus },
    PutNotification(Notification),
    DeleteNotification(Uuid),
    MarkAllRead { recipient: Role, party_id: Uuid },
    PutComplaint(Complaint),
    DeleteComplaint(Uuid),
    ClaimRoom {
        room_id: Uuid,
        tenant_id: Uuid,
        joining_date: DateTime<Utc>,
    },
    ReleaseRoom { room_id: Uuid, tenant_id: Uuid },
    AppendTenantRoom { tenant_id: Uuid, room_id: Uuid },
    RemoveTenantRoom { tenant_id: Uuid, room_id: Uuid },
}

impl StagedOp {
    fn apply(self, tables: &mut Tables) -> anyhow::Result<()> {
        match self {
            StagedOp::PutRequest(request) => {
                tables.requests.insert(request.id, request);
            }
            StagedOp::DeleteRequest(id) => {
                tables.requests.remove(&id);
            }
            StagedOp::UpdateRequestFrom { request, expected } => {
                let stored = tables
                    .requests
                    .get_mut(&request.id)
                    .filter(|stored| stored.status == expected)
                    .ok_or(ConditionNotMet {
                        entity: "request",
                        id: request.id,
                    })?;
                stored.status = request.status;
                stored.is_new = request.is_new;
                stored.is_read = request.is_read;
            }
            StagedOp::DeleteRequestFrom { id, expected } => {
                if !tables.requests.get(&id).is_some_and(|stored| stored.status == expected) {
                    return Err(ConditionNotMet {
                        entity: "request",
                        id,
                    }
                    .into());
                }
                tables.requests.remove(&id);
            }
            StagedOp::PutNotification(notification) => {
                tables.notifications.insert(notification.id, notification);
            }
            StagedOp::DeleteNotification(id) => {
                tables.notifications.remove(&id);
            }
            StagedOp::MarkAllRead {
                recipient,
                party_id,
            } => tables
                .notifications
                .values_mut()
                .filter(|n| n.is_addressed_to(recipient, party_id))
                .for_each(|n| n.is_read = true),
            StagedOp::PutComplaint(complaint) => {
                tables.complaints.insert(complaint.id, complaint);
            }
            StagedOp::DeleteComplaint(id) => {
                tables.complaints.remove(&id);
            }
            StagedOp::ClaimRoom {
                room_id,
                tenant_id,
                joining_date,
            } => {
                let room = tables
                    .rooms
                    .get_mut(&room_id)
                    .filter(|room| room.tenant_id.is_none())
                    .ok_or(ConditionNotMet {
                        entity: "room",
                        id: room_id,
                    })?;
                room.tenant_id = Some(tenant_id);
                room.joining_date = Some(joining_date);
                room.status = RoomStatus::Occupied;
                room.is_active = true;
            }
            StagedOp::ReleaseRoom { room_id, tenant_id } => {
                let room = tables
                    .rooms
                    .get_mut(&room_id)
                    .filter(|room| room.is_occupied_by(tenant_id))
                    .ok_or(ConditionNotMet {
                        entity: "room",
                        id: room_id,
                    })?;
                room.tenant_id = None;
                room.joining_date = None;
                room.status = RoomStatus::Vacant;
                room.is_active = false;
            }
            StagedOp::AppendTenantRoom { tenant_id, room_id } => {
                let rooms = tables.tenant_rooms.entry(tenant_id).or_default();
                if !rooms.contains(&room_id) {
                    rooms.push(room_id);
                }
            }
            StagedOp::RemoveTenantRoom { tenant_id, room_id } => {
                if let Some(rooms) = tables.tenant_rooms.get_mut(&tenant_id) {
                    rooms.retain(|id| *id != room_id);
                }
            }
        }
        Ok(())
    }
}

/// Per-scope unit of work over a [`MemoryStore`].
pub struct MemoryRepo {
    store: Arc<MemoryStore>,
    staged: Mutex<Vec<StagedOp>>,
}

impl MemoryRepo {
    pub fn new(store: Arc<MemoryStore>) -> Self {
        Self {
            store,
            staged: Mutex::new(Vec::new()),
        }
    }

    fn stage(&self, op: StagedOp) -> anyhow::Result<()> {
        self.staged
            .lock()
            .map_err(|_| anyhow::anyhow!("Unable to lock staged changes."))?
            .push(op);
        Ok(())
    }

    fn save_changed(&self) -> anyhow::Result<bool> {
        let ops = std::mem::take(
            &mut *self
                .staged
                .lock()
                .map_err(|_| anyhow::anyhow!("Unable to lock staged changes."))?,
        );
        if ops.is_empty() {
            return Ok(false);
        }
        self.store.commit(ops)?;
        Ok(true)
    }
}

fn newest_first<T>(mut items: Vec<T>, created: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    items.sort_by_key(|item| Reverse(created(item)));
    items
}

// Staged-write plumbing shared by every entity with its own table.
macro_rules! memory_mutable {
    ($entity:ty, $put:ident, $delete:ident) => {
        #[async_trait]
        impl MutableRepository<$entity> for MemoryRepo {
            async fn insert(&self, entity: &$entity) -> anyhow::Result<Uuid> {
                self.stage(StagedOp::$put(entity.clone()))?;
                Ok(entity.id)
            }

            async fn update(&self, entity: &$entity) -> anyhow::Result<()> {
                self.stage(StagedOp::$put(entity.clone()))
            }

            async fn delete_by_id(&self, id: Uuid) -> anyhow::Result<()> {
                self.stage(StagedOp::$delete(id))
            }

            async fn save_changed(&self) -> anyhow::Result<bool> {
                MemoryRepo::save_changed(self)
            }
        }

        impl DBRepository<$entity> for MemoryRepo {}
    };
}

memory_mutable!(Request, PutRequest, DeleteRequest);
memory_mutable!(Notification, PutNotification, DeleteNotification);
memory_mutable!(Complaint, PutComplaint, DeleteComplaint);

#[async_trait]
impl ReadOnlyRepository<Request> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Request>> {
        self.store.read(|t| t.requests.get(&id).cloned())
    }
}

#[async_trait]
impl RequestRepo for MemoryRepo {
    async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Request>> {
        let requests = self.store.read(|t| {
            t.requests.values().filter(|r| r.tenant_id == tenant_id).cloned().collect()
        })?;
        Ok(newest_first(requests, |r| r.created_time))
    }

    async fn get_by_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Request>> {
        let requests = self.store.read(|t| {
            t.requests.values().filter(|r| r.landlord_id == landlord_id).cloned().collect()
        })?;
        Ok(newest_first(requests, |r| r.created_time))
    }

    async fn get_approved_visits(
        &self,
        tenant_id: Uuid,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> anyhow::Result<Vec<Request>> {
        let mut requests = self.store.read(|t| {
            t.requests
                .values()
                .filter(|r| r.tenant_id == tenant_id && r.status == RequestStatus::Approved)
                .filter(|r| r.visit_date.is_some_and(|d| start <= d && d < end))
                .cloned()
                .collect::<Vec<_>>()
        })?;
        requests.sort_by_key(|r| r.visit_date);
        Ok(requests)
    }

    async fn count_new(&self, landlord_id: Uuid) -> anyhow::Result<u64> {
        self.store.read(|t| {
            t.requests.values().filter(|r| r.landlord_id == landlord_id && r.is_new).count() as u64
        })
    }

    async fn count_unread(&self, tenant_id: Uuid) -> anyhow::Result<u64> {
        self.store.read(|t| {
            t.requests.values().filter(|r| r.tenant_id == tenant_id && !r.is_read).count() as u64
        })
    }

    async fn update_from(&self, entity: &Request, expected: RequestStatus) -> anyhow::Result<()> {
        self.stage(StagedOp::UpdateRequestFrom {
            request: entity.clone(),
            expected,
        })
    }

    async fn delete_from(&self, id: Uuid, expected: RequestStatus) -> anyhow::Result<()> {
        self.stage(StagedOp::DeleteRequestFrom { id, expected })
    }
}

#[async_trait]
impl ReadOnlyRepository<Room> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Room>> {
        self.store.read(|t| t.rooms.get(&id).cloned())
    }
}

#[async_trait]
impl RoomRepo for MemoryRepo {
    async fn get_by_ids(&self, ids: &[Uuid]) -> anyhow::Result<Vec<Room>> {
        self.store.read(|t| ids.iter().filter_map(|id| t.rooms.get(id).cloned()).collect())
    }

    async fn get_by_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Room>> {
        self.store.read(|t| {
            t.rooms.values().filter(|room| room.is_occupied_by(tenant_id)).cloned().collect()
        })
    }

    async fn claim_occupancy(
        &self,
        room_id: Uuid,
        tenant_id: Uuid,
        joining_date: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        self.stage(StagedOp::ClaimRoom {
            room_id,
            tenant_id,
            joining_date,
        })
    }

    async fn release_occupancy(&self, room_id: Uuid, tenant_id: Uuid) -> anyhow::Result<()> {
        self.stage(StagedOp::ReleaseRoom { room_id, tenant_id })
    }
}

#[async_trait]
impl TenantRepo for MemoryRepo {
    async fn append_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()> {
        self.stage(StagedOp::AppendTenantRoom { tenant_id, room_id })
    }

    async fn remove_occupied_room(&self, tenant_id: Uuid, room_id: Uuid) -> anyhow::Result<()> {
        self.stage(StagedOp::RemoveTenantRoom { tenant_id, room_id })
    }
}

#[async_trait]
impl ReadOnlyRepository<Notification> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Notification>> {
        self.store.read(|t| t.notifications.get(&id).cloned())
    }
}

#[async_trait]
impl NotificationRepo for MemoryRepo {
    async fn get_for_recipient(
        &self,
        recipient: Role,
        party_id: Uuid,
        kind: Option<NotificationKind>,
    ) -> anyhow::Result<Vec<Notification>> {
        let notifications = self.store.read(|t| {
            t.notifications
                .values()
                .filter(|n| n.is_addressed_to(recipient, party_id))
                .filter(|n| kind.map_or(true, |kind| n.kind == kind))
                .cloned()
                .collect()
        })?;
        Ok(newest_first(notifications, |n| n.created_time))
    }

    async fn count_unread(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<u64> {
        self.store.read(|t| {
            t.notifications
                .values()
                .filter(|n| n.is_addressed_to(recipient, party_id) && !n.is_read)
                .count() as u64
        })
    }

    async fn mark_all_read(&self, recipient: Role, party_id: Uuid) -> anyhow::Result<()> {
        self.stage(StagedOp::MarkAllRead {
            recipient,
            party_id,
        })
    }
}

#[async_trait]
impl ReadOnlyRepository<Complaint> for MemoryRepo {
    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Complaint>> {
        self.store.read(|t| t.complaints.get(&id).cloned())
    }
}

#[async_trait]
impl ComplaintRepo for MemoryRepo {
    async fn get_visible_for_tenant(&self, tenant_id: Uuid) -> anyhow::Result<Vec<Complaint>> {
        let complaints = self.store.read(|t| {
            t.complaints
                .values()
                .filter(|c| c.tenant_id == tenant_id && c.is_visible_to(Role::Tenant))
                .cloned()
                .collect()
        })?;
        Ok(newest_first(complaints, |c| c.created_time))
    }

    async fn get_visible_for_landlord(&self, landlord_id: Uuid) -> anyhow::Result<Vec<Complaint>> {
        let complaints = self.store.read(|t| {
            t.complaints
                .values()
                .filter(|c| c.landlord_id == landlord_id && c.is_visible_to(Role::Landlord))
                .cloned()
                .collect()
        })?;
        Ok(newest_first(complaints, |c| c.created_time))
    }
}
