#![allow(dead_code)]

use std::sync::Arc;

use chrono::Utc;
use domain_rental::model::{
    entity::{Room, RoomStatus},
    vo::Role,
};
use jsonwebtoken::{encode, EncodingKey, Header};
use rental_marketplace::infrastructure::{
    config::RentalConfig, database::MemoryStore, middleware::authorization::Claims,
    ServiceProvider,
};
use uuid::Uuid;

pub const SECRET: &str = "integration-secret";

pub fn vacant_room(landlord_id: Uuid) -> Room {
    Room {
        id: Uuid::new_v4(),
        landlord_id,
        address: "221B Baker Street".to_owned(),
        rent: 2000,
        status: RoomStatus::Vacant,
        is_active: false,
        tenant_id: None,
        joining_date: None,
        created_time: Utc::now(),
    }
}

/// A memory-backed provider with one vacant room owned by `landlord_id`.
pub fn provider_with_room(landlord_id: Uuid) -> (Arc<ServiceProvider>, Arc<MemoryStore>, Room) {
    let store = Arc::new(MemoryStore::new());
    let room = vacant_room(landlord_id);
    store.put_room(room.clone()).unwrap();
    let provider =
        ServiceProvider::with_memory_store(RentalConfig::default(), store.clone()).unwrap();
    (Arc::new(provider), store, room)
}

pub fn bearer(id: Uuid, user_type: Role) -> String {
    let claims = Claims {
        sub: id,
        user_type,
        exp: Utc::now().timestamp() as u64 + 3600,
        aud: None,
        iss: None,
    };
    let token =
        encode(&Header::default(), &claims, &EncodingKey::from_secret(SECRET.as_bytes())).unwrap();
    format!("Bearer {token}")
}
