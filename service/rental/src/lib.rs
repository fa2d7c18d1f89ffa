mod complaint;
mod notification;
mod request;
mod room;

pub use complaint::ComplaintServiceImpl;
pub use notification::NotificationServiceImpl;
pub use request::RequestServiceImpl;
pub use room::RoomServiceImpl;

use domain_rental::{exception::RentalException, repository::ConditionNotMet};

/// Maps a lost guarded write to the conflict it stands for; anything else is internal.
fn commit_conflict(e: anyhow::Error) -> RentalException {
    match e.downcast_ref::<ConditionNotMet>() {
        Some(ConditionNotMet {
            entity: "request",
            id,
        }) => RentalException::RequestChanged { id: *id },
        Some(ConditionNotMet { id, .. }) => RentalException::RoomOccupied { room_id: *id },
        None => e.into(),
    }
}

#[cfg(test)]
mod tests {
    use domain_rental::exception::ExceptionKind;
    use uuid::Uuid;

    use super::*;

    #[test]
    fn lost_guards_map_by_entity() {
        let id = Uuid::new_v4();
        let request = commit_conflict(ConditionNotMet { entity: "request", id }.into());
        assert!(matches!(request, RentalException::RequestChanged { id: r } if r == id));
        let room = commit_conflict(ConditionNotMet { entity: "room", id }.into());
        assert!(matches!(room, RentalException::RoomOccupied { room_id } if room_id == id));
        assert_eq!(commit_conflict(anyhow::anyhow!("io")).kind(), ExceptionKind::Internal);
    }
}
