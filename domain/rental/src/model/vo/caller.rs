use std::fmt::Display;
use std::str::FromStr;

use num_derive::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::exception::{RentalException, RentalResult};

/// 调用方角色
#[derive(FromPrimitive, ToPrimitive, Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Tenant,
    Landlord,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Tenant => "tenant",
            Role::Landlord => "landlord",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tenant" => Ok(Role::Tenant),
            "landlord" => Ok(Role::Landlord),
            _ => anyhow::bail!("Unknown user type: {s}"),
        }
    }
}

/// Authenticated identity every core operation runs as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    pub id: Uuid,
    pub role: Role,
}

impl Caller {
    pub fn new(id: Uuid, role: Role) -> Self {
        Self { id, role }
    }

    pub fn tenant(id: Uuid) -> Self {
        Self::new(id, Role::Tenant)
    }

    pub fn landlord(id: Uuid) -> Self {
        Self::new(id, Role::Landlord)
    }

    pub fn require_role(&self, role: Role, operation: &str) -> RentalResult<()> {
        if self.role != role {
            return Err(RentalException::Forbidden {
                caller: self.id,
                operation: operation.to_owned(),
            });
        }
        Ok(())
    }

    /// Role must match and the caller must be the stored party of that role.
    pub fn require_party(&self, role: Role, party: Uuid, operation: &str) -> RentalResult<()> {
        self.require_role(role, operation)?;
        if self.id != party {
            return Err(RentalException::Forbidden {
                caller: self.id,
                operation: operation.to_owned(),
            });
        }
        Ok(())
    }

    /// Picks the stored party id matching the caller's role.
    pub fn party_of(&self, tenant_id: Uuid, landlord_id: Uuid) -> Uuid {
        match self.role {
            Role::Tenant => tenant_id,
            Role::Landlord => landlord_id,
        }
    }
}
